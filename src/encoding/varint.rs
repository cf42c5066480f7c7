//! # Variable-Length Integer Encoding
//!
//! Base-128 varints as used by the protobuf wire format for tags, lengths and
//! every VARINT-typed payload.
//!
//! ## Encoding Format
//!
//! The value is split into 7-bit groups, least significant group first. Every
//! byte except the last carries a set high bit (continuation); the last byte
//! has it clear. Encodings are always minimal: no trailing `0x80` padding.
//!
//! | Value Range                  | Bytes |
//! |------------------------------|-------|
//! | 0 - 127                      | 1     |
//! | 128 - 16383                  | 2     |
//! | 16384 - 2097151              | 3     |
//! | ...                          | ...   |
//! | 2^56 - 2^63-1                | 9     |
//! | 2^63 - u64::MAX              | 10    |
//!
//! ```text
//! 300 = 0b1_0010_1100
//!
//!   group 0: 010_1100  -> 1010_1100 (0xAC, continuation set)
//!   group 1: 000_0010  -> 0000_0010 (0x02, last byte)
//! ```
//!
//! ## Boundary Values
//!
//! - 127: Maximum 1-byte value
//! - 128: Minimum 2-byte value
//! - 2^63-1 (i64::MAX): 9 bytes
//! - u64::MAX: 10 bytes, last byte `0x01`
//!
//! ## Malformed Input
//!
//! `decode_varint` fails with `MalformedVarint` when:
//! - the buffer ends before a byte with a clear high bit
//! - ten bytes are read without termination
//! - the tenth byte carries bits beyond bit 63
//!
//! ## Zig-Zag Mapping
//!
//! Signed values declared `sint32`/`sint64` are mapped before varint encoding
//! so that small magnitudes stay short: `0 -> 0, -1 -> 1, 1 -> 2, -2 -> 3`.
//!
//! ## Usage Example
//!
//! ```rust
//! use pbcodec::encoding::varint::{decode_varint, encode_varint, varint_len};
//!
//! let mut buf = [0u8; 10];
//! let written = encode_varint(300, &mut buf);
//! assert_eq!(&buf[..written], &[0xAC, 0x02]);
//! assert_eq!(varint_len(300), 2);
//!
//! let (value, read) = decode_varint(&buf[..written]).unwrap();
//! assert_eq!((value, read), (300, 2));
//! ```
//!
//! ## Thread Safety
//!
//! All functions are pure and stateless.

use crate::config::{MAX_VARINT_LEN, VARINT_CONTINUATION, VARINT_PAYLOAD_BITS, VARINT_PAYLOAD_MASK};
use crate::encoding::error::DecodeErrorKind;

pub fn varint_len(value: u64) -> usize {
    let bits = (u64::BITS - value.leading_zeros()).max(1);
    bits.div_ceil(VARINT_PAYLOAD_BITS) as usize
}

/// Writes `value` into `buf` and returns the number of bytes written.
///
/// `buf` must hold at least `varint_len(value)` bytes; `MAX_VARINT_LEN` always
/// suffices.
pub fn encode_varint(mut value: u64, buf: &mut [u8]) -> usize {
    let mut i = 0;
    while value >= VARINT_CONTINUATION as u64 {
        buf[i] = (value as u8 & VARINT_PAYLOAD_MASK) | VARINT_CONTINUATION;
        value >>= VARINT_PAYLOAD_BITS;
        i += 1;
    }
    buf[i] = value as u8;
    i + 1
}

pub fn write_varint(value: u64, out: &mut Vec<u8>) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let len = encode_varint(value, &mut buf);
    out.extend_from_slice(&buf[..len]);
}

pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize), DecodeErrorKind> {
    if let Some(&first) = buf.first() {
        if first < VARINT_CONTINUATION {
            return Ok((first as u64, 1));
        }
    }

    let mut value = 0u64;
    for (i, &byte) in buf.iter().take(MAX_VARINT_LEN).enumerate() {
        let payload = (byte & VARINT_PAYLOAD_MASK) as u64;
        if i == MAX_VARINT_LEN - 1 && payload > 1 {
            return Err(DecodeErrorKind::MalformedVarint);
        }
        value |= payload << (i as u32 * VARINT_PAYLOAD_BITS);
        if byte & VARINT_CONTINUATION == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(DecodeErrorKind::MalformedVarint)
}

/// Returns true when `buf` is a prefix of some valid varint, i.e. decoding
/// failed only because input ran out.
pub(crate) fn is_unterminated_prefix(buf: &[u8]) -> bool {
    buf.len() < MAX_VARINT_LEN && buf.iter().all(|&b| b & VARINT_CONTINUATION != 0)
}

pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

pub fn zigzag_encode32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

pub fn zigzag_decode32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}
