// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural equality and hashing.
//!
//! Undefined is equal to nothing, itself included. Arrays compare in order,
//! Objects compare their live entries and ignore tombstones on both sides.
//! Pointers and Functions compare by identity.
//!
//! `Variant` is `PartialEq + Hash` but not `Eq`, since Undefined is
//! irreflexive. Hash-based collections should hold [`Key`]s, which are `Eq`.
//!
//! Both `==` and [`Variant::hash_code`] recurse once per nesting level. Trees
//! built through the API have no depth bound; the encoder refuses anything
//! deeper than [`crate::config::DEFAULT_MAX_DEPTH`].

use crate::{Key, Value, Variant};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Hash of every Undefined variant.
pub const UNDEFINED_HASH: u64 = u64::MAX;

/// Hash of every Null variant.
pub const NULL_HASH: u64 = 0;

const SENTINEL_REMAP: u64 = 0x9e37_79b9_7f4a_7c15;

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        match (self.value(), other.value()) {
            (Value::Undefined, _) | (_, Value::Undefined) => false,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Pointer(a), Value::Pointer(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
            }
            (Value::Object(a), Value::Object(b)) => {
                let (a, b) = (a.entry_map(), b.entry_map());
                let mut matched: HashSet<&Key> = HashSet::new();

                for (key, value) in a.iter().filter(|(_, v)| !v.is_undefined()) {
                    match b.get(key) {
                        Some(counterpart) if value == counterpart => {
                            matched.insert(key);
                        }
                        _ => return false,
                    }
                }
                for (key, value) in b.iter().filter(|(_, v)| !v.is_undefined()) {
                    if matched.contains(key) {
                        continue;
                    }
                    match a.get(key) {
                        Some(counterpart) if value == counterpart => {}
                        _ => return false,
                    }
                }
                true
            }
            _ => false,
        }
    }
}

impl Hash for Variant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl Variant {
    /// Structural hash consistent with `==`.
    ///
    /// Undefined and Null map to [`UNDEFINED_HASH`] and [`NULL_HASH`]; no
    /// other value hashes to either sentinel. Object hashes do not depend on
    /// iteration order.
    pub fn hash_code(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        match self.value() {
            Value::Undefined => return UNDEFINED_HASH,
            Value::Null => return NULL_HASH,
            Value::Boolean(b) => {
                hasher.write_u8(b't');
                b.hash(&mut hasher);
            }
            Value::Number(n) => {
                hasher.write_u8(b'i');
                n.hash(&mut hasher);
            }
            Value::String(s) => {
                hasher.write_u8(b's');
                s.hash(&mut hasher);
            }
            Value::Pointer(p) => {
                hasher.write_u8(b'p');
                p.hash(&mut hasher);
            }
            Value::Function(f) => {
                hasher.write_u8(b'F');
                f.hash(&mut hasher);
            }
            Value::Array(items) => {
                hasher.write_u8(b'a');
                hasher.write_usize(items.len());
                for item in items {
                    hasher.write_u64(item.hash_code());
                }
            }
            Value::Object(object) => {
                // Order-independent: sum of per-entry mixes.
                let sum = object.iter().fold(0u64, |acc, (key, value)| {
                    acc.wrapping_add(key.hash_code().rotate_left(17) ^ value.hash_code())
                });
                hasher.write_u8(b'o');
                hasher.write_u64(sum);
            }
        }
        match hasher.finish() {
            h @ (UNDEFINED_HASH | NULL_HASH) => h ^ SENTINEL_REMAP,
            h => h,
        }
    }
}
