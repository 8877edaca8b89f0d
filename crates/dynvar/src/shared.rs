// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Lock-guarded Variant handle for cross-thread use.
//!
//! A [`Variant`] has no internal synchronization. When one tree has to be
//! reached from several threads, wrap it in a [`SharedVariant`]: every access
//! holds the mutex for the whole closure, and [`SharedVariant::snapshot`]
//! hands out an independent deep copy.

use crate::{Kind, Result, Variant};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to one Variant behind a mutex.
#[derive(Clone, Default)]
pub struct SharedVariant {
    inner: Arc<Mutex<Variant>>,
}

impl SharedVariant {
    pub fn new(value: impl Into<Variant>) -> Self {
        let value: Variant = value.into();
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    /// Run `f` with exclusive access to the value.
    pub fn with<T>(&self, f: impl FnOnce(&mut Variant) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    /// Deep copy of the current value, taken under the lock.
    pub fn snapshot(&self) -> Variant {
        self.inner.lock().clone()
    }

    /// Assign through the lock; a constant-locked value stays unchanged.
    pub fn assign(&self, value: impl Into<Variant>) -> Result<()> {
        self.inner.lock().assign(value)?;
        Ok(())
    }

    pub fn kind(&self) -> Kind {
        self.inner.lock().kind()
    }

    /// Whether both handles guard the same value.
    pub fn ptr_eq(&self, other: &SharedVariant) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for SharedVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_lock() {
            Some(guard) => f.debug_tuple("SharedVariant").field(&*guard).finish(),
            None => f.write_str("SharedVariant(<locked>)"),
        }
    }
}
