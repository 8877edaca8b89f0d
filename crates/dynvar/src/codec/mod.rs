// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary encoding for Variants.
//!
//! Self-describing, depth-first and prefix-tagged:
//!
//! ```text
//! value      := 'u' | 'n' | 't' | 'f' | number | string | array | object
//! number     := 'i' int32be                         -- 4 bytes
//! string     := 's' decimalLen '*' utf8bytes[decimalLen]
//! array      := 'a' decimalLen '*' value{decimalLen}
//! object     := 'o' decimalLen '*' (value value){decimalLen}
//! decimalLen := ASCII decimal digits terminated by '*'
//! ```
//!
//! Functions and Pointers cannot be encoded. Objects are written without
//! their tombstones, so `decode(encode(v)) == v` for every encodable `v`
//! that equals itself, even though two equal Objects may encode to
//! different bytes (entry order is unspecified).
//!
//! # Example
//!
//! ```rust
//! use dynvar::{codec, Variant};
//!
//! let v = Variant::array([Variant::number(1), Variant::string("hi")]);
//! let bytes = codec::encode(&v).unwrap();
//! assert_eq!(bytes, b"a2*i\x00\x00\x00\x01s2*hi");
//! assert_eq!(codec::decode(&bytes).unwrap(), v);
//! ```

mod decoder;
mod encoder;

pub use decoder::{decode, decode_from, decode_prefix, Decoder};
pub use encoder::{encode, encode_into};

use crate::{Result, Variant};

impl Variant {
    /// Encode this value; see [`encode`].
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode(self)
    }

    /// Decode exactly one value from `bytes`; see [`decode`].
    pub fn decode(bytes: &[u8]) -> Result<Variant> {
        decode(bytes)
    }
}
