//! # Encoding Module
//!
//! This module provides the low-level pieces of the protobuf wire format:
//!
//! - **Varint encoding**: Base-128 variable-length integers and zig-zag mapping
//! - **Wire primitives**: Tags, the four wire shapes, and a bounds-checked reader
//! - **Errors**: `DecodeError` with the byte offset where decoding stopped

pub mod error;
pub mod varint;
pub mod wire;

pub use error::{DecodeError, DecodeErrorKind};
pub use varint::{
    decode_varint, encode_varint, varint_len, write_varint, zigzag_decode, zigzag_decode32,
    zigzag_encode, zigzag_encode32,
};
pub use wire::{Tag, WireReader, WireType};
