// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Object storage and the Object operations of [`Variant`].
//!
//! An entry whose value is Undefined is a tombstone: it keeps its key slot
//! but reads, counts and iterates as absent. `mem` creates tombstones for
//! missing keys; `clean` purges them.

use crate::{ClonePolicy, Key, Result, Variant};
use std::collections::HashMap;

/// Key-unique mapping from key-safe Variants to Variants.
#[derive(Debug, Default)]
pub struct Object {
    entries: HashMap<Key, Variant>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live handle to the value stored under `key`.
    ///
    /// Fails with `InvalidKey` unless the key is key-safe. A missing key gets
    /// an Undefined tombstone entry, which the caller can then assign.
    pub fn mem(&mut self, key: impl Into<Variant>) -> Result<&mut Variant> {
        let key: Variant = key.into();
        let key = Key::new(key.adopt())?;
        Ok(self.entries.entry(key).or_default())
    }

    /// Value stored under `key`; tombstones read as absent.
    pub fn get(&self, key: &Variant) -> Option<&Variant> {
        self.entries
            .get(Key::lookup(key))
            .filter(|value| !value.is_undefined())
    }

    pub fn contains_key(&self, key: &Variant) -> bool {
        self.get(key).is_some()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len() - self.tombstones()
    }

    /// Number of entries including tombstones.
    pub fn raw_len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tombstones(&self) -> usize {
        self.entries
            .values()
            .filter(|value| value.is_undefined())
            .count()
    }

    /// Live entries, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Variant, &Variant)> {
        self.iter_raw().filter(|(_, value)| !value.is_undefined())
    }

    /// All entries including tombstones, in unspecified order.
    pub fn iter_raw(&self) -> impl Iterator<Item = (&Variant, &Variant)> {
        self.entries.iter().map(|(key, value)| (key.as_variant(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Variant> {
        self.iter().map(|(key, _)| key)
    }

    pub fn raw_keys(&self) -> impl Iterator<Item = &Variant> {
        self.entries.keys().map(Key::as_variant)
    }

    pub(crate) fn entry_map(&self) -> &HashMap<Key, Variant> {
        &self.entries
    }

    /// Store a decoded entry, returning the value it replaced.
    pub(crate) fn insert(&mut self, key: Key, value: Variant) -> Option<Variant> {
        self.entries.insert(key, value)
    }

    pub(crate) fn purge_tombstones(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, value| !value.is_undefined());
        before - self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn deep_clone(&self, policy: ClonePolicy) -> Result<Object> {
        let mut entries = HashMap::with_capacity(self.len());
        for (key, value) in &self.entries {
            if value.is_undefined() {
                continue;
            }
            entries.insert(key.deep_clone(policy)?, value.try_clone_with(policy)?);
        }
        Ok(Object { entries })
    }

    pub(crate) fn adopt(self) -> Object {
        let entries = self
            .entries
            .into_iter()
            .filter(|(_, value)| !value.is_undefined())
            .map(|(key, value)| (key.adopt(), value.adopt()))
            .collect();
        Object { entries }
    }
}

impl Clone for Object {
    fn clone(&self) -> Self {
        self.deep_clone(ClonePolicy::ShareFallback)
            .unwrap_or_default()
    }
}

impl Variant {
    /// Live handle to the Object entry under `key` (`mem`).
    ///
    /// Auto-vivifies an Undefined tombstone for a missing key. Mutating the
    /// returned Variant is how values are stored in an Object.
    pub fn mem(&mut self, key: impl Into<Variant>) -> Result<&mut Variant> {
        self.object_mut("Object::mem()")?.mem(key)
    }

    /// Read an entry without creating a tombstone.
    pub fn get(&self, key: &Variant) -> Result<Option<&Variant>> {
        Ok(self.object_ref("Object::get()")?.get(key))
    }

    /// Every key, tombstoned ones included.
    pub fn key_set(&self) -> Result<Vec<&Variant>> {
        Ok(self.object_ref("Object::keySet()")?.raw_keys().collect())
    }

    /// Keys of live entries only.
    pub fn live_key_set(&self) -> Result<Vec<&Variant>> {
        Ok(self.object_ref("Object::keySet()")?.keys().collect())
    }
}
