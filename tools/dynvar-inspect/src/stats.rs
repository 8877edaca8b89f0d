// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shape summary of a decoded Variant tree.

use dynvar::{Kind, Value, Variant};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct TreeStats {
    /// Node count per kind name (keys of Objects included).
    pub kinds: BTreeMap<&'static str, usize>,
    pub nodes: usize,
    /// Deepest composite nesting; 0 for a scalar root.
    pub depth: usize,
    pub tombstones: usize,
}

impl TreeStats {
    pub fn collect(root: &Variant) -> Self {
        let mut stats = Self::default();
        stats.visit(root, 0);
        stats
    }

    pub fn count(&self, kind: Kind) -> usize {
        self.kinds.get(kind.name()).copied().unwrap_or(0)
    }

    fn visit(&mut self, node: &Variant, depth: usize) {
        self.nodes += 1;
        *self.kinds.entry(node.kind().name()).or_default() += 1;
        match node.value() {
            Value::Array(items) => {
                self.depth = self.depth.max(depth + 1);
                for item in items {
                    self.visit(item, depth + 1);
                }
            }
            Value::Object(object) => {
                self.depth = self.depth.max(depth + 1);
                self.tombstones += object.tombstones();
                for (key, value) in object.iter() {
                    self.visit(key, depth + 1);
                    self.visit(value, depth + 1);
                }
            }
            _ => {}
        }
    }
}
