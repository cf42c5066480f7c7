//! # Wire Primitives
//!
//! Every field occurrence on the wire is a tag followed by a payload whose
//! framing is decided by the tag's wire type alone:
//!
//! ```text
//! +-----------------------------+----------------------------------------+
//! | Tag (varint)                | Payload                                |
//! | (field_number << 3) | type  |                                        |
//! +-----------------------------+----------------------------------------+
//!
//! type 0  VARINT            raw varint bytes
//! type 1  FIXED64           8 bytes little-endian
//! type 2  LENGTH_DELIMITED  varint length L, then L bytes
//! type 5  FIXED32           4 bytes little-endian
//! ```
//!
//! Wire types 3 and 4 (groups) and 6, 7 are rejected with `UnknownWireType`.
//!
//! Because framing never depends on the semantic type, any field can be
//! skipped with [`WireReader::skip`] without a descriptor.
//!
//! ## Offsets
//!
//! `WireReader` carries a base offset so that a reader over a nested message
//! payload reports errors at positions in the top-level buffer.

use crate::config::{FIXED32_SIZE, FIXED64_SIZE, MAX_FIELD_NUMBER, MIN_FIELD_NUMBER, TAG_TYPE_BITS, TAG_TYPE_MASK};
use crate::encoding::error::{DecodeError, DecodeErrorKind};
use crate::encoding::varint::{decode_varint, is_unterminated_prefix, varint_len, write_varint};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    Fixed32 = 5,
}

impl WireType {
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(WireType::Varint),
            1 => Some(WireType::Fixed64),
            2 => Some(WireType::LengthDelimited),
            5 => Some(WireType::Fixed32),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WireType::Varint => "varint",
            WireType::Fixed64 => "fixed64",
            WireType::LengthDelimited => "length-delimited",
            WireType::Fixed32 => "fixed32",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub field_number: u32,
    pub wire_type: WireType,
}

impl Tag {
    pub fn new(field_number: u32, wire_type: WireType) -> Self {
        Self {
            field_number,
            wire_type,
        }
    }

    pub fn key(&self) -> u64 {
        ((self.field_number as u64) << TAG_TYPE_BITS) | self.wire_type as u64
    }

    pub fn from_key(key: u64) -> Result<Self, DecodeErrorKind> {
        let wire_type =
            WireType::from_bits((key & TAG_TYPE_MASK) as u8).ok_or(DecodeErrorKind::UnknownWireType)?;
        let number = key >> TAG_TYPE_BITS;
        if number < MIN_FIELD_NUMBER as u64 || number > MAX_FIELD_NUMBER as u64 {
            return Err(DecodeErrorKind::InvalidFieldNumber);
        }
        Ok(Self::new(number as u32, wire_type))
    }

    pub fn encoded_len(&self) -> usize {
        varint_len(self.key())
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        write_varint(self.key(), out);
    }
}

/// A payload read according to its wire type, without semantic interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
    Varint(u64),
    Fixed64(u64),
    Fixed32(u32),
    LengthDelimited { offset: usize, bytes: &'a [u8] },
}

#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_base(buf, 0)
    }

    /// Reader over `buf`, which starts at absolute offset `base` of the
    /// top-level input.
    pub fn with_base(buf: &'a [u8], base: usize) -> Self {
        Self { buf, pos: 0, base }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Absolute offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub fn read_varint(&mut self) -> Result<u64, DecodeError> {
        let (value, len) = decode_varint(self.rest()).map_err(|kind| kind.at(self.offset()))?;
        self.pos += len;
        Ok(value)
    }

    pub fn read_tag(&mut self) -> Result<Tag, DecodeError> {
        let start = self.offset();
        let rest = self.rest();
        if rest.is_empty() {
            return Err(DecodeErrorKind::TruncatedTag.at(start));
        }
        let (key, len) = decode_varint(rest).map_err(|kind| {
            if is_unterminated_prefix(rest) {
                DecodeErrorKind::TruncatedTag.at(start)
            } else {
                kind.at(start)
            }
        })?;
        let tag = Tag::from_key(key).map_err(|kind| kind.at(start))?;
        self.pos += len;
        Ok(tag)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeErrorKind::TruncatedPayload.at(self.offset()));
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_fixed32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.take(FIXED32_SIZE)?;
        let bytes: [u8; FIXED32_SIZE] = bytes
            .try_into()
            .map_err(|_| DecodeErrorKind::TruncatedPayload.at(self.offset()))?;
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn read_fixed64(&mut self) -> Result<u64, DecodeError> {
        let bytes = self.take(FIXED64_SIZE)?;
        let bytes: [u8; FIXED64_SIZE] = bytes
            .try_into()
            .map_err(|_| DecodeErrorKind::TruncatedPayload.at(self.offset()))?;
        Ok(u64::from_le_bytes(bytes))
    }

    /// Reads a length prefix and its payload. Returns the absolute offset of
    /// the payload's first byte together with the payload.
    pub fn read_length_delimited(&mut self) -> Result<(usize, &'a [u8]), DecodeError> {
        let len_offset = self.offset();
        let len = self.read_varint()?;
        if len > self.remaining() as u64 {
            return Err(DecodeErrorKind::TruncatedPayload.at(len_offset));
        }
        let offset = self.offset();
        let bytes = self.take(len as usize)?;
        Ok((offset, bytes))
    }

    pub fn read_raw(&mut self, wire_type: WireType) -> Result<RawValue<'a>, DecodeError> {
        match wire_type {
            WireType::Varint => self.read_varint().map(RawValue::Varint),
            WireType::Fixed64 => self.read_fixed64().map(RawValue::Fixed64),
            WireType::Fixed32 => self.read_fixed32().map(RawValue::Fixed32),
            WireType::LengthDelimited => self
                .read_length_delimited()
                .map(|(offset, bytes)| RawValue::LengthDelimited { offset, bytes }),
        }
    }

    pub fn skip(&mut self, wire_type: WireType) -> Result<(), DecodeError> {
        self.read_raw(wire_type).map(|_| ())
    }
}

pub fn write_fixed32(value: u32, out: &mut Vec<u8>) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub fn write_fixed64(value: u64, out: &mut Vec<u8>) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub fn write_length_delimited(bytes: &[u8], out: &mut Vec<u8>) {
    write_varint(bytes.len() as u64, out);
    out.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_key_combines_number_and_type() {
        assert_eq!(Tag::new(1, WireType::Varint).key(), 0x08);
        assert_eq!(Tag::new(2, WireType::LengthDelimited).key(), 0x12);
        assert_eq!(Tag::new(3, WireType::Fixed32).key(), 0x1D);
        assert_eq!(Tag::new(4, WireType::Fixed64).key(), 0x21);
    }

    #[test]
    fn tag_from_key_rejects_group_wire_types() {
        assert_eq!(Tag::from_key(0x13), Err(DecodeErrorKind::UnknownWireType));
        assert_eq!(Tag::from_key(0x14), Err(DecodeErrorKind::UnknownWireType));
        assert_eq!(Tag::from_key(0x0E), Err(DecodeErrorKind::UnknownWireType));
        assert_eq!(Tag::from_key(0x0F), Err(DecodeErrorKind::UnknownWireType));
    }

    #[test]
    fn tag_from_key_rejects_field_zero_and_oversized_numbers() {
        assert_eq!(Tag::from_key(0x00), Err(DecodeErrorKind::InvalidFieldNumber));
        let too_big = ((MAX_FIELD_NUMBER as u64 + 1) << 3) | 2;
        assert_eq!(Tag::from_key(too_big), Err(DecodeErrorKind::InvalidFieldNumber));
        let max = ((MAX_FIELD_NUMBER as u64) << 3) | 2;
        assert_eq!(Tag::from_key(max).unwrap().field_number, MAX_FIELD_NUMBER);
    }

    #[test]
    fn read_tag_on_cut_key_is_truncated_tag() {
        let mut reader = WireReader::new(&[0x80]);
        let err = reader.read_tag().unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::TruncatedTag);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn read_fixed_values_little_endian() {
        let mut buf = Vec::new();
        write_fixed32(0x0403_0201, &mut buf);
        write_fixed64(1.5f64.to_bits(), &mut buf);

        let mut reader = WireReader::new(&buf);
        assert_eq!(&buf[..4], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(reader.read_fixed32().unwrap(), 0x0403_0201);
        assert_eq!(f64::from_bits(reader.read_fixed64().unwrap()), 1.5);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_fixed_on_short_input_fails_at_payload_start() {
        let mut reader = WireReader::with_base(&[1, 2, 3], 10);
        let err = reader.read_fixed32().unwrap_err();
        assert_eq!(err, DecodeErrorKind::TruncatedPayload.at(10));
    }

    #[test]
    fn read_length_delimited_returns_absolute_payload_offset() {
        let mut buf = vec![0xFF];
        write_length_delimited(b"hello", &mut buf);

        let mut reader = WireReader::with_base(&buf[1..], 101);
        let (offset, bytes) = reader.read_length_delimited().unwrap();
        assert_eq!(offset, 102);
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn read_length_delimited_past_end_fails() {
        let mut reader = WireReader::new(&[0x05, b'a', b'b']);
        let err = reader.read_length_delimited().unwrap_err();
        assert_eq!(err, DecodeErrorKind::TruncatedPayload.at(0));
    }

    #[test]
    fn skip_moves_past_each_wire_shape() {
        let mut buf = Vec::new();
        write_varint(300, &mut buf);
        write_fixed64(7, &mut buf);
        write_length_delimited(b"abc", &mut buf);
        write_fixed32(9, &mut buf);

        let mut reader = WireReader::new(&buf);
        reader.skip(WireType::Varint).unwrap();
        assert_eq!(reader.offset(), 2);
        reader.skip(WireType::Fixed64).unwrap();
        assert_eq!(reader.offset(), 10);
        reader.skip(WireType::LengthDelimited).unwrap();
        assert_eq!(reader.offset(), 14);
        reader.skip(WireType::Fixed32).unwrap();
        assert!(reader.is_empty());
    }
}
