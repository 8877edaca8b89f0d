// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Opaque host references stored by `Pointer` variants.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Shared reference to an arbitrary host object.
///
/// Two pointers are equal when they refer to the same allocation. Cloning
/// copies the reference, so the referenced object needs its own
/// synchronization if it is mutated from several threads.
#[derive(Clone)]
pub struct Pointer {
    target: Arc<dyn Any + Send + Sync>,
}

impl Pointer {
    /// Wrap a host object in a fresh shared allocation.
    pub fn new<T: Any + Send + Sync>(object: T) -> Self {
        Self {
            target: Arc::new(object),
        }
    }

    /// Reference an existing shared object without re-allocating.
    pub fn from_arc(target: Arc<dyn Any + Send + Sync>) -> Self {
        Self { target }
    }

    /// Borrow the referenced object as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.target.downcast_ref::<T>()
    }

    /// Share the referenced object as `Arc<T>`.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.target).downcast::<T>().ok()
    }

    /// Whether both pointers reference the same object.
    pub fn ptr_eq(&self, other: &Pointer) -> bool {
        self.address() == other.address()
    }

    /// Address of the referenced allocation.
    pub fn address(&self) -> usize {
        Arc::as_ptr(&self.target).cast::<()>() as usize
    }
}

impl PartialEq for Pointer {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Pointer {}

impl Hash for Pointer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Debug for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pointer({:#x})", self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_equality() {
        let a = Pointer::new(String::from("socket"));
        let b = a.clone();
        let c = Pointer::new(String::from("socket"));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_downcast() {
        let p = Pointer::new(42u64);
        assert_eq!(p.downcast_ref::<u64>(), Some(&42));
        assert!(p.downcast_ref::<u32>().is_none());

        let shared = p.downcast_arc::<u64>().expect("u64");
        assert_eq!(*shared, 42);
    }

    #[test]
    fn test_from_arc_keeps_identity() {
        let target: Arc<dyn Any + Send + Sync> = Arc::new(vec![1u8, 2, 3]);
        let a = Pointer::from_arc(Arc::clone(&target));
        let b = Pointer::from_arc(target);
        assert!(a.ptr_eq(&b));
    }
}
