// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for Variant operations and the binary codec.

use crate::Kind;
use std::io;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = VariantError> = std::result::Result<T, E>;

/// Errors raised by Variant operations.
///
/// All of them are contract violations or malformed input: they are reported
/// to the caller immediately and never retried.
#[derive(Debug, Error)]
pub enum VariantError {
    #[error("{op} cannot be invoked on an Undefined variant")]
    InvalidOperationOnUndefined { op: &'static str },

    #[error("{op} cannot be invoked on {found} (expected {expected})")]
    InvalidOperationOnWrongKind {
        op: &'static str,
        expected: &'static str,
        found: Kind,
    },

    #[error("{op} cannot be invoked on a constant")]
    ConstantViolation { op: &'static str },

    #[error("a value containing {found} cannot be an Object key")]
    InvalidKey { found: Kind },

    #[error("index {index} out of range for Array of length {length}")]
    IndexOutOfRange { index: isize, length: usize },

    #[error("unsupported serialization type: {kind}")]
    UnsupportedSerialization { kind: Kind },

    #[error("cannot encode nesting deeper than {max} levels")]
    NestingTooDeep { max: usize },

    #[error("malformed encoding at byte {offset}: {fault}")]
    MalformedEncoding { offset: usize, fault: Malformed },

    #[error("function handle could not produce a fresh instance")]
    FunctionReconstructionFailure,

    #[error("I/O error while decoding: {0}")]
    Io(#[from] io::Error),
}

/// Why a byte sequence is not a valid encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unknown tag byte 0x{0:02x}")]
    UnknownTag(u8),

    #[error("empty length prefix")]
    EmptyLength,

    #[error("invalid length digit 0x{0:02x}")]
    InvalidLengthDigit(u8),

    #[error("length prefix longer than {max} digits")]
    LengthTooLong { max: usize },

    #[error("declared length {length} exceeds limit {limit}")]
    LengthLimit { length: usize, limit: usize },

    #[error("nesting deeper than {max}")]
    TooDeep { max: usize },

    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("object key containing {0} is not key-safe")]
    InvalidKey(Kind),

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}

impl VariantError {
    pub(crate) fn wrong_kind(op: &'static str, expected: &'static str, found: Kind) -> Self {
        Self::InvalidOperationOnWrongKind {
            op,
            expected,
            found,
        }
    }

    /// True for decode failures caused by the input bytes.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedEncoding { .. })
    }
}
