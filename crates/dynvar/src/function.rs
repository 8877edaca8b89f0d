// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Callable handles stored by `Function` variants.
//!
//! The core never looks inside a callable. It stores it, invokes it, compares
//! it by identity, and asks it for a fresh instance when a Variant holding it
//! is cloned.

use crate::{Result, Variant, VariantError};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Host-side callable behind a `Function` variant.
pub trait Callable: Send + Sync {
    /// Invoke the callable.
    fn call(&self, args: &[Variant]) -> Result<Variant>;

    /// Produce an independent instance for a Variant clone.
    ///
    /// Returning `None` means the host cannot reconstruct this callable; the
    /// [`ClonePolicy`] in effect decides what the clone does then.
    fn fresh_instance(&self) -> Option<Arc<dyn Callable>> {
        None
    }

    /// Short label used in debug output.
    fn describe(&self) -> &str {
        "function"
    }
}

/// What a Variant clone does with a callable that has no fresh instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClonePolicy {
    /// Share the existing handle (both Variants then call the same object).
    #[default]
    ShareFallback,
    /// Fail with [`VariantError::FunctionReconstructionFailure`].
    RequireFresh,
}

/// Shared handle to a [`Callable`].
///
/// `Clone` on the handle shares the callable; use [`Function::fresh`] for an
/// independent instance.
#[derive(Clone)]
pub struct Function {
    callable: Arc<dyn Callable>,
}

impl Function {
    pub fn new<C: Callable + 'static>(callable: C) -> Self {
        Self {
            callable: Arc::new(callable),
        }
    }

    pub fn from_arc(callable: Arc<dyn Callable>) -> Self {
        Self { callable }
    }

    /// Wrap a closure; fresh instances are copies of the closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&[Variant]) -> Result<Variant> + Clone + Send + Sync + 'static,
    {
        Self::new(ClosureCallable { f })
    }

    /// Wrap a closure that cannot be copied.
    pub fn shared_fn<F>(f: F) -> Self
    where
        F: Fn(&[Variant]) -> Result<Variant> + Send + Sync + 'static,
    {
        Self::new(SharedClosure { f })
    }

    /// The null function: ignores its arguments and returns Undefined.
    pub fn noop() -> Self {
        Self::new(Noop)
    }

    pub fn call(&self, args: &[Variant]) -> Result<Variant> {
        self.callable.call(args)
    }

    /// Obtain a handle for a cloned Variant, following `policy`.
    pub fn fresh(&self, policy: ClonePolicy) -> Result<Function> {
        if let Some(callable) = self.callable.fresh_instance() {
            return Ok(Self { callable });
        }
        match policy {
            ClonePolicy::ShareFallback => {
                log::debug!(
                    "[function] {} has no fresh instance, sharing handle",
                    self.callable.describe()
                );
                Ok(self.clone())
            }
            ClonePolicy::RequireFresh => Err(VariantError::FunctionReconstructionFailure),
        }
    }

    pub fn describe(&self) -> &str {
        self.callable.describe()
    }

    /// Whether both handles share the same callable.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        self.address() == other.address()
    }

    fn address(&self) -> usize {
        Arc::as_ptr(&self.callable).cast::<()>() as usize
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Function {}

impl Hash for Function {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({} @ {:#x})", self.describe(), self.address())
    }
}

struct ClosureCallable<F> {
    f: F,
}

impl<F> Callable for ClosureCallable<F>
where
    F: Fn(&[Variant]) -> Result<Variant> + Clone + Send + Sync + 'static,
{
    fn call(&self, args: &[Variant]) -> Result<Variant> {
        (self.f)(args)
    }

    fn fresh_instance(&self) -> Option<Arc<dyn Callable>> {
        Some(Arc::new(ClosureCallable { f: self.f.clone() }))
    }

    fn describe(&self) -> &str {
        "closure"
    }
}

struct SharedClosure<F> {
    f: F,
}

impl<F> Callable for SharedClosure<F>
where
    F: Fn(&[Variant]) -> Result<Variant> + Send + Sync + 'static,
{
    fn call(&self, args: &[Variant]) -> Result<Variant> {
        (self.f)(args)
    }

    fn describe(&self) -> &str {
        "shared closure"
    }
}

struct Noop;

impl Callable for Noop {
    fn call(&self, _args: &[Variant]) -> Result<Variant> {
        Ok(Variant::undefined())
    }

    fn fresh_instance(&self) -> Option<Arc<dyn Callable>> {
        Some(Arc::new(Noop))
    }

    fn describe(&self) -> &str {
        "null function"
    }
}
