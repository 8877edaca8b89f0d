// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire constants and decoder limits.
//!
//! Every tag byte and framing constant of the binary encoding is defined
//! here; the encoder and decoder never spell them out inline.
//!
//! # Example
//!
//! ```rust
//! use dynvar::{Decoder, DecodeLimits};
//!
//! let limits = DecodeLimits::default().max_depth(16).max_length(4096);
//! let mut decoder = Decoder::with_limits(&b"a2*tf"[..], limits);
//! let value = decoder.decode_value().unwrap();
//! assert_eq!(value.len().unwrap(), 2);
//! ```

// =======================================================================
// Tag bytes
// =======================================================================

/// Undefined: `u`
pub const TAG_UNDEFINED: u8 = b'u';

/// Null: `n`
pub const TAG_NULL: u8 = b'n';

/// Boolean true: `t`
pub const TAG_TRUE: u8 = b't';

/// Boolean false: `f`
pub const TAG_FALSE: u8 = b'f';

/// Number: `i` followed by a big-endian i32
pub const TAG_NUMBER: u8 = b'i';

/// String: `s` len `*` utf8 bytes
pub const TAG_STRING: u8 = b's';

/// Array: `a` len `*` values
pub const TAG_ARRAY: u8 = b'a';

/// Object: `o` len `*` key/value pairs
pub const TAG_OBJECT: u8 = b'o';

/// Terminates a decimal length prefix.
pub const LENGTH_DELIMITER: u8 = b'*';

/// Bytes of a Number payload.
pub const NUMBER_WIDTH: usize = 4;

// =======================================================================
// Decoder limits
// =======================================================================

/// Default maximum nesting of Arrays and Objects.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default maximum declared length (bytes for strings, elements for arrays,
/// pairs for objects). Matches the largest signed 32-bit length.
pub const DEFAULT_MAX_LENGTH: usize = i32::MAX as usize;

/// Default maximum number of digits in a length prefix.
pub const DEFAULT_MAX_LENGTH_DIGITS: usize = 10;

/// Bounds applied while decoding untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    pub max_depth: usize,
    pub max_length: usize,
    pub max_length_digits: usize,
}

impl DecodeLimits {
    /// Limits that only stop at platform bounds.
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
            max_length: usize::MAX,
            max_length_digits: usize::MAX,
        }
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = length;
        self
    }

    pub fn max_length_digits(mut self, digits: usize) -> Self {
        self.max_length_digits = digits;
        self
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_length: DEFAULT_MAX_LENGTH,
            max_length_digits: DEFAULT_MAX_LENGTH_DIGITS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_distinct() {
        let tags = [
            TAG_UNDEFINED,
            TAG_NULL,
            TAG_TRUE,
            TAG_FALSE,
            TAG_NUMBER,
            TAG_STRING,
            TAG_ARRAY,
            TAG_OBJECT,
            LENGTH_DELIMITER,
        ];
        for (i, a) in tags.iter().enumerate() {
            for b in &tags[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_builder_setters() {
        let limits = DecodeLimits::default().max_depth(3).max_length_digits(2);
        assert_eq!(limits.max_depth, 3);
        assert_eq!(limits.max_length_digits, 2);
        assert_eq!(limits.max_length, DEFAULT_MAX_LENGTH);
    }
}
