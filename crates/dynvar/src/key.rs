// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Key-safety rules for Object keys.
//!
//! A Variant is key-safe when its kind is none of Undefined, Function or
//! Pointer, every element of an Array is key-safe, and every live value of
//! an Object is key-safe. Tombstones count as absent. The keys of a nested
//! Object are not re-validated: they were checked when they were inserted.

use crate::{ClonePolicy, Kind, Result, Value, Variant, VariantError};
use std::hash::{Hash, Hasher};

/// Whether `candidate` may be used as an Object key.
pub fn is_key_safe(candidate: &Variant) -> bool {
    first_unsafe_kind(candidate).is_none()
}

/// Kind of the first node that makes `candidate` unusable as a key.
pub fn first_unsafe_kind(candidate: &Variant) -> Option<Kind> {
    match candidate.value() {
        Value::Undefined => Some(Kind::Undefined),
        Value::Function(_) => Some(Kind::Function),
        Value::Pointer(_) => Some(Kind::Pointer),
        Value::Array(items) => items.iter().find_map(first_unsafe_kind),
        Value::Object(object) => object
            .iter()
            .find_map(|(_, value)| first_unsafe_kind(value)),
        Value::Null | Value::Boolean(_) | Value::Number(_) | Value::String(_) => None,
    }
}

/// A validated Object key.
///
/// `Key` is `Eq` even though `Variant` is not: a key-safe value contains no
/// Undefined, so its equality is reflexive.
#[derive(Debug)]
#[repr(transparent)]
pub struct Key(Variant);

impl Key {
    /// Validate `candidate` as a key; fails with `InvalidKey`.
    pub fn new(candidate: Variant) -> Result<Key> {
        match first_unsafe_kind(&candidate) {
            Some(found) => Err(VariantError::InvalidKey { found }),
            None => Ok(Key(candidate)),
        }
    }

    /// View any Variant as a key for map lookups.
    ///
    /// Lookups only hash and compare, so an unsafe candidate simply matches
    /// nothing (Undefined equals no stored key).
    pub(crate) fn lookup(candidate: &Variant) -> &Key {
        // SAFETY: Key is #[repr(transparent)] over Variant, so both share
        // layout and the reference keeps the same lifetime.
        unsafe { &*(candidate as *const Variant).cast::<Key>() }
    }

    pub fn as_variant(&self) -> &Variant {
        &self.0
    }

    pub fn into_variant(self) -> Variant {
        self.0
    }

    pub(crate) fn deep_clone(&self, policy: ClonePolicy) -> Result<Key> {
        Ok(Key(self.0.try_clone_with(policy)?))
    }

    pub(crate) fn adopt(self) -> Key {
        Key(self.0.adopt())
    }
}

impl Clone for Key {
    fn clone(&self) -> Self {
        Key(self.0.clone())
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
