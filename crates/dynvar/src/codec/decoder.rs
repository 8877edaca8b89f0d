// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Variant decoder.
//!
//! Reads one tag byte, dispatches on it, and for length-prefixed kinds
//! consumes exactly the declared number of units. Running out of input is a
//! terminal `MalformedEncoding` error; no partial value is ever returned.

use crate::config::{
    DecodeLimits, LENGTH_DELIMITER, NUMBER_WIDTH, TAG_ARRAY, TAG_FALSE, TAG_NULL, TAG_NUMBER,
    TAG_OBJECT, TAG_STRING, TAG_TRUE, TAG_UNDEFINED,
};
use crate::{Key, Malformed, Object, Result, Value, Variant, VariantError};
use std::io::{self, Read};

/// Upper bound on capacity reserved from an untrusted length prefix.
const PREALLOC_LIMIT: usize = 4096;

/// Decode exactly one value occupying all of `bytes`.
pub fn decode(bytes: &[u8]) -> Result<Variant> {
    let (value, consumed) = decode_prefix(bytes)?;
    if consumed != bytes.len() {
        return Err(VariantError::MalformedEncoding {
            offset: consumed,
            fault: Malformed::TrailingBytes(bytes.len() - consumed),
        });
    }
    Ok(value)
}

/// Decode the value at the start of `bytes`, returning it with the number
/// of bytes it occupied.
pub fn decode_prefix(bytes: &[u8]) -> Result<(Variant, usize)> {
    let mut decoder = Decoder::new(bytes);
    let value = decoder.decode_value()?;
    Ok((value, decoder.position()))
}

/// Decode one value from a byte stream.
pub fn decode_from<R: Read>(reader: R) -> Result<Variant> {
    Decoder::new(reader).decode_value()
}

/// Streaming decoder over any byte source.
///
/// Successive [`Decoder::decode_value`] calls read concatenated encodings.
pub struct Decoder<R> {
    reader: R,
    position: usize,
    limits: DecodeLimits,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_limits(reader, DecodeLimits::default())
    }

    pub fn with_limits(reader: R, limits: DecodeLimits) -> Self {
        Self {
            reader,
            position: 0,
            limits,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decode the next value.
    pub fn decode_value(&mut self) -> Result<Variant> {
        self.read_value(0).map_err(|err| {
            log::debug!("[codec] decode failed: {}", err);
            err
        })
    }

    fn read_value(&mut self, depth: usize) -> Result<Variant> {
        let tag_offset = self.position;
        let tag = self.read_byte()?;
        match tag {
            TAG_UNDEFINED => Ok(Variant::undefined()),
            TAG_NULL => Ok(Variant::null()),
            TAG_TRUE => Ok(Variant::boolean(true)),
            TAG_FALSE => Ok(Variant::boolean(false)),
            TAG_NUMBER => {
                let mut bytes = [0u8; NUMBER_WIDTH];
                self.read_exact(&mut bytes)?;
                Ok(Variant::number(i32::from_be_bytes(bytes)))
            }
            TAG_STRING => {
                let length = self.read_length()?;
                let payload_offset = self.position;
                let bytes = self.read_payload(length)?;
                String::from_utf8(bytes)
                    .map(Variant::string)
                    .map_err(|_| Self::malformed_at(payload_offset, Malformed::InvalidUtf8))
            }
            TAG_ARRAY => {
                self.check_depth(depth, tag_offset)?;
                let length = self.read_length()?;
                let mut items = Vec::with_capacity(length.min(PREALLOC_LIMIT));
                for _ in 0..length {
                    items.push(self.read_value(depth + 1)?);
                }
                // Decoded items carry no locks.
                Ok(Variant::from_value(Value::Array(items)))
            }
            TAG_OBJECT => {
                self.check_depth(depth, tag_offset)?;
                let length = self.read_length()?;
                let mut object = Object::new();
                for _ in 0..length {
                    let key_offset = self.position;
                    let key = self.read_value(depth + 1)?;
                    let value = self.read_value(depth + 1)?;
                    let key = Key::new(key).map_err(|err| match err {
                        VariantError::InvalidKey { found } => {
                            Self::malformed_at(key_offset, Malformed::InvalidKey(found))
                        }
                        other => other,
                    })?;
                    if object.insert(key, value).is_some() {
                        log::debug!("[codec] duplicate object key at byte {}", key_offset);
                    }
                }
                Ok(Variant::from(object))
            }
            other => Err(Self::malformed_at(tag_offset, Malformed::UnknownTag(other))),
        }
    }

    fn check_depth(&self, depth: usize, offset: usize) -> Result<()> {
        if depth >= self.limits.max_depth {
            return Err(Self::malformed_at(
                offset,
                Malformed::TooDeep {
                    max: self.limits.max_depth,
                },
            ));
        }
        Ok(())
    }

    /// Parse ASCII digits up to the `*` delimiter.
    fn read_length(&mut self) -> Result<usize> {
        let start = self.position;
        let mut length: usize = 0;
        let mut digits = 0usize;
        loop {
            let byte = self.read_byte()?;
            if byte == LENGTH_DELIMITER {
                break;
            }
            if !byte.is_ascii_digit() {
                return Err(Self::malformed_at(
                    self.position - 1,
                    Malformed::InvalidLengthDigit(byte),
                ));
            }
            digits += 1;
            if digits > self.limits.max_length_digits {
                return Err(Self::malformed_at(
                    start,
                    Malformed::LengthTooLong {
                        max: self.limits.max_length_digits,
                    },
                ));
            }
            length = length
                .checked_mul(10)
                .and_then(|l| l.checked_add(usize::from(byte - b'0')))
                .ok_or_else(|| {
                    Self::malformed_at(
                        start,
                        Malformed::LengthLimit {
                            length: usize::MAX,
                            limit: self.limits.max_length,
                        },
                    )
                })?;
        }
        if digits == 0 {
            return Err(Self::malformed_at(start, Malformed::EmptyLength));
        }
        if length > self.limits.max_length {
            return Err(Self::malformed_at(
                start,
                Malformed::LengthLimit {
                    length,
                    limit: self.limits.max_length,
                },
            ));
        }
        Ok(length)
    }

    fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        match self.reader.read_exact(buf) {
            Ok(()) => {
                self.position += buf.len();
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                Err(Self::malformed_at(self.position, Malformed::UnexpectedEnd))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Read exactly `length` raw bytes without trusting `length` for the
    /// initial allocation.
    fn read_payload(&mut self, length: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(length.min(PREALLOC_LIMIT));
        let read = self
            .reader
            .by_ref()
            .take(length as u64)
            .read_to_end(&mut bytes)?;
        self.position += read;
        if read < length {
            return Err(Self::malformed_at(self.position, Malformed::UnexpectedEnd));
        }
        Ok(bytes)
    }

    fn malformed_at(offset: usize, fault: Malformed) -> VariantError {
        VariantError::MalformedEncoding { offset, fault }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;

    fn fault_of(result: Result<Variant>) -> (usize, Malformed) {
        match result {
            Err(VariantError::MalformedEncoding { offset, fault }) => (offset, fault),
            other => panic!("expected malformed encoding, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_scalars() {
        assert!(decode(b"u").unwrap().is_undefined());
        assert_eq!(decode(b"n").unwrap().kind(), Kind::Null);
        assert!(decode(b"t").unwrap().as_bool().unwrap());
        assert!(!decode(b"f").unwrap().as_bool().unwrap());
        assert_eq!(
            decode(&[b'i', 0x80, 0x00, 0x00, 0x00])
                .unwrap()
                .as_number()
                .unwrap(),
            i32::MIN
        );
        assert_eq!(decode(b"s5*hello").unwrap().as_str().unwrap(), "hello");
    }

    #[test]
    fn test_decode_object() {
        let v = decode(b"o2*s1*ai\x00\x00\x00\x01i\x00\x00\x00\x02t").unwrap();
        let object = v.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(
            object
                .get(&Variant::string("a"))
                .unwrap()
                .as_number()
                .unwrap(),
            1
        );
        assert!(object.get(&Variant::number(2)).unwrap().as_bool().unwrap());
    }

    #[test]
    fn test_leading_zero_length() {
        assert_eq!(decode(b"s02*ok").unwrap().as_str().unwrap(), "ok");
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(fault_of(decode(b"")), (0, Malformed::UnexpectedEnd));
        assert_eq!(fault_of(decode(b"i\x00\x01")), (1, Malformed::UnexpectedEnd));
        assert_eq!(fault_of(decode(b"s5*hel")).1, Malformed::UnexpectedEnd);
        assert_eq!(fault_of(decode(b"a3*tt")).1, Malformed::UnexpectedEnd);
        assert_eq!(fault_of(decode(b"s12")).1, Malformed::UnexpectedEnd);
        assert_eq!(fault_of(decode(b"o1*n")).1, Malformed::UnexpectedEnd);
    }

    #[test]
    fn test_bad_length_prefix() {
        assert_eq!(fault_of(decode(b"s*")), (1, Malformed::EmptyLength));
        assert_eq!(
            fault_of(decode(b"a1x*t")),
            (2, Malformed::InvalidLengthDigit(b'x'))
        );
        assert_eq!(
            fault_of(decode(b"a-1*t")),
            (1, Malformed::InvalidLengthDigit(b'-'))
        );
        assert_eq!(
            fault_of(decode(b"s99999999999*")).1,
            Malformed::LengthTooLong { max: 10 }
        );
    }

    #[test]
    fn test_length_limit() {
        let limits = DecodeLimits::default().max_length(3);
        let mut decoder = Decoder::with_limits(&b"s4*abcd"[..], limits);
        assert_eq!(
            fault_of(decoder.decode_value()).1,
            Malformed::LengthLimit {
                length: 4,
                limit: 3
            }
        );
    }

    #[test]
    fn test_depth_limit() {
        let limits = DecodeLimits::default().max_depth(2);
        let mut ok = Decoder::with_limits(&b"a1*a0*"[..], limits);
        assert_eq!(ok.decode_value().unwrap().len().unwrap(), 1);

        let mut deep = Decoder::with_limits(&b"a1*a1*a0*"[..], limits);
        assert_eq!(
            fault_of(deep.decode_value()),
            (6, Malformed::TooDeep { max: 2 })
        );
    }

    #[test]
    fn test_unknown_tag_and_trailing_bytes() {
        assert_eq!(fault_of(decode(b"x")), (0, Malformed::UnknownTag(b'x')));
        assert_eq!(fault_of(decode(b"nn")), (1, Malformed::TrailingBytes(1)));

        let (value, used) = decode_prefix(b"nn").unwrap();
        assert_eq!(value.kind(), Kind::Null);
        assert_eq!(used, 1);
    }

    #[test]
    fn test_invalid_utf8() {
        assert_eq!(
            fault_of(decode(b"s2*\xff\xfe")),
            (3, Malformed::InvalidUtf8)
        );
    }

    #[test]
    fn test_unsafe_key_rejected() {
        assert_eq!(fault_of(decode(b"o1*ut")), (3, Malformed::InvalidKey(Kind::Undefined)));
        assert_eq!(
            fault_of(decode(b"o1*a1*un")),
            (3, Malformed::InvalidKey(Kind::Undefined))
        );
    }

    #[test]
    fn test_undefined_value_is_tombstone() {
        let v = decode(b"o1*s1*ku").unwrap();
        let object = v.as_object().unwrap();
        assert_eq!(object.raw_len(), 1);
        assert!(object.is_empty());
    }

    #[test]
    fn test_nested_tombstone_survives_like_top_level() {
        let top = decode(b"o1*s1*ku").unwrap();
        let nested = decode(b"a1*o1*s1*ku").unwrap();
        assert_eq!(top.as_object().unwrap().raw_len(), 1);
        assert_eq!(
            nested.index(0).unwrap().as_object().unwrap().raw_len(),
            1
        );
        assert!(nested.index(0).unwrap().as_object().unwrap().is_empty());
    }

    #[test]
    fn test_deeply_wrapped_array() {
        let depth = 500;
        let mut bytes = b"a1*".repeat(depth);
        bytes.extend_from_slice(b"a3*i\x00\x00\x00\x01ui\x00\x00\x00\x03");

        let mut node = &decode(&bytes).unwrap();
        for _ in 0..depth {
            assert_eq!(node.len().unwrap(), 1);
            node = node.index(0).unwrap();
        }
        assert_eq!(node.len().unwrap(), 3);
        assert!(node.index(1).unwrap().is_undefined());
        assert_eq!(node.index(2).unwrap().as_number().unwrap(), 3);
    }

    #[test]
    fn test_duplicate_keys_keep_last() {
        let v = decode(b"o2*ntnf").unwrap();
        let object = v.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(!object.get(&Variant::null()).unwrap().as_bool().unwrap());
    }

    #[test]
    fn test_sequential_values() {
        let mut decoder = Decoder::new(&b"ts3*abcn"[..]);
        assert!(decoder.decode_value().unwrap().as_bool().unwrap());
        assert_eq!(decoder.decode_value().unwrap().as_str().unwrap(), "abc");
        assert_eq!(decoder.decode_value().unwrap().kind(), Kind::Null);
        assert_eq!(decoder.position(), 8);
        assert_eq!(
            fault_of(decoder.decode_value()),
            (8, Malformed::UnexpectedEnd)
        );
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "source closed"))
        }
    }

    #[test]
    fn test_io_errors_surface() {
        assert!(matches!(
            decode_from(FailingReader),
            Err(VariantError::Io(_))
        ));
    }
}
