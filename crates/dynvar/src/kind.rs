// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Variant kind tags.

use std::fmt;

/// The tag selecting which interpretation of a Variant's payload applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Pointer,
    Function,
    Array,
    Object,
}

impl Kind {
    /// All kinds, in declaration order.
    pub const ALL: [Kind; 9] = [
        Kind::Undefined,
        Kind::Null,
        Kind::Boolean,
        Kind::Number,
        Kind::String,
        Kind::Pointer,
        Kind::Function,
        Kind::Array,
        Kind::Object,
    ];

    /// Canonical kind name.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Undefined => "Undefined",
            Kind::Null => "Null",
            Kind::Boolean => "Boolean",
            Kind::Number => "Number",
            Kind::String => "String",
            Kind::Pointer => "Pointer",
            Kind::Function => "Function",
            Kind::Array => "Array",
            Kind::Object => "Object",
        }
    }

    /// Parse a kind name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Kind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Array and Object own nested Variants.
    pub fn is_composite(self) -> bool {
        matches!(self, Kind::Array | Kind::Object)
    }

    /// Whether the binary codec can represent this kind.
    pub fn is_serializable(self) -> bool {
        !matches!(self, Kind::Pointer | Kind::Function)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(Kind::from_name("object"), Some(Kind::Object));
        assert_eq!(Kind::from_name("NUMBER"), Some(Kind::Number));
        assert_eq!(Kind::from_name("Undefined"), Some(Kind::Undefined));
        assert_eq!(Kind::from_name("int"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_serializable_kinds() {
        assert!(!Kind::Pointer.is_serializable());
        assert!(!Kind::Function.is_serializable());
        assert!(Kind::Undefined.is_serializable());
        assert!(Kind::Object.is_composite());
        assert!(!Kind::String.is_composite());
    }
}
