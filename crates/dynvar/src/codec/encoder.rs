// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Variant encoder.

use crate::config::{
    DEFAULT_MAX_DEPTH, LENGTH_DELIMITER, TAG_ARRAY, TAG_FALSE, TAG_NULL, TAG_NUMBER, TAG_OBJECT,
    TAG_STRING, TAG_TRUE, TAG_UNDEFINED,
};
use crate::{Result, Value, Variant, VariantError};

/// Encode `value` into a new buffer.
pub fn encode(value: &Variant) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    encode_into(value, &mut buffer)?;
    Ok(buffer)
}

/// Append the encoding of `value` to `buffer`.
///
/// On failure `buffer` is truncated back to its original length, so no
/// partial encoding is ever left behind. Trees nested deeper than
/// [`DEFAULT_MAX_DEPTH`] Arrays/Objects fail with `NestingTooDeep`, the same
/// bound a default [`crate::Decoder`] enforces.
pub fn encode_into(value: &Variant, buffer: &mut Vec<u8>) -> Result<()> {
    let start = buffer.len();
    let result = Encoder {
        buffer: &mut *buffer,
    }
    .encode_value(value, 0);
    if let Err(err) = &result {
        log::debug!("[codec] encode failed: {}", err);
        buffer.truncate(start);
    }
    result
}

struct Encoder<'a> {
    buffer: &'a mut Vec<u8>,
}

impl Encoder<'_> {
    fn encode_value(&mut self, value: &Variant, depth: usize) -> Result<()> {
        if value.kind().is_composite() && depth >= DEFAULT_MAX_DEPTH {
            return Err(VariantError::NestingTooDeep {
                max: DEFAULT_MAX_DEPTH,
            });
        }
        match value.value() {
            Value::Undefined => self.buffer.push(TAG_UNDEFINED),
            Value::Null => self.buffer.push(TAG_NULL),
            Value::Boolean(b) => self.buffer.push(if *b { TAG_TRUE } else { TAG_FALSE }),
            Value::Number(n) => {
                self.buffer.push(TAG_NUMBER);
                self.buffer.extend_from_slice(&n.to_be_bytes());
            }
            Value::String(s) => {
                self.buffer.push(TAG_STRING);
                self.write_length(s.len());
                self.buffer.extend_from_slice(s.as_bytes());
            }
            Value::Array(items) => {
                self.buffer.push(TAG_ARRAY);
                self.write_length(items.len());
                for item in items {
                    self.encode_value(item, depth + 1)?;
                }
            }
            Value::Object(object) => {
                // Tombstones are not written; the count covers live entries only.
                self.buffer.push(TAG_OBJECT);
                self.write_length(object.len());
                for (key, entry) in object.iter() {
                    self.encode_value(key, depth + 1)?;
                    self.encode_value(entry, depth + 1)?;
                }
            }
            Value::Pointer(_) | Value::Function(_) => {
                return Err(VariantError::UnsupportedSerialization {
                    kind: value.kind(),
                });
            }
        }
        Ok(())
    }

    fn write_length(&mut self, length: usize) {
        self.buffer
            .extend_from_slice(length.to_string().as_bytes());
        self.buffer.push(LENGTH_DELIMITER);
    }
}
