// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # dynvar - dynamically-typed variant values
//!
//! A single polymorphic [`Variant`] that unifies a fixed set of primitive and
//! composite kinds, plus a compact self-describing binary encoding for it.
//! Useful for mini interpreters, flexible configuration trees and message
//! payloads where the shape of the data is only known at runtime.
//!
//! ## Quick Start
//!
//! ```rust
//! use dynvar::{codec, Kind, Variant};
//!
//! # fn main() -> dynvar::Result<()> {
//! let mut config = Variant::object();
//! config.mem("name")?.assign("sensor-7")?;
//! config.mem("ports")?.assign(vec![7400, 7401])?;
//!
//! let bytes = codec::encode(&config)?;
//! let decoded = codec::decode(&bytes)?;
//! assert_eq!(decoded, config);
//! assert_eq!(decoded.kind(), Kind::Object);
//! # Ok(())
//! # }
//! ```
//!
//! ## Kinds
//!
//! | Kind | Payload |
//! |------|---------|
//! | `Undefined` | none (uninitialized marker) |
//! | `Null` | none |
//! | `Boolean` | `bool` |
//! | `Number` | `i32` |
//! | `String` | UTF-8 text |
//! | `Pointer` | opaque shared host reference ([`Pointer`]) |
//! | `Function` | opaque callable handle ([`Function`]) |
//! | `Array` | ordered `Vec<Variant>` |
//! | `Object` | key-unique map of key-safe Variants to Variants ([`Object`]) |
//!
//! ## Wire Format
//!
//! ```text
//! value      := 'u' | 'n' | 't' | 'f' | number | string | array | object
//! number     := 'i' int32be
//! string     := 's' decimalLen '*' utf8bytes[decimalLen]
//! array      := 'a' decimalLen '*' value{decimalLen}
//! object     := 'o' decimalLen '*' (value value){decimalLen}
//! ```
//!
//! ## Modules Overview
//!
//! - [`codec`] - binary encoder and decoder
//! - [`config`] - wire constants and decode limits
//! - [`key`] - key-safety validation for Object keys
//! - [`shared`] - mutex-guarded root Variant for cross-thread use

pub mod codec;
pub mod config;
mod equality;
mod error;
mod function;
pub mod key;
mod kind;
mod pointer;
pub mod shared;
mod variant;

pub use codec::{decode, decode_from, decode_prefix, encode, encode_into, Decoder};
pub use config::DecodeLimits;
pub use equality::{NULL_HASH, UNDEFINED_HASH};
pub use error::{Malformed, Result, VariantError};
pub use function::{Callable, ClonePolicy, Function};
pub use key::{is_key_safe, Key};
pub use kind::Kind;
pub use pointer::Pointer;
pub use shared::SharedVariant;
pub use variant::{Object, Value, Variant};
