//! # Message Codec
//!
//! Converts between `Record` trees and their wire encoding.
//!
//! ```text
//!            encode / encode_into
//!   Record  ---------------------->  bytes
//!           <----------------------
//!              decode / decode_with
//! ```
//!
//! Both directions walk the same `Schema`. Encoding cannot fail for a record
//! built through `Record::set`/`Record::push`; decoding reports the first
//! structural problem as a `DecodeError` carrying the absolute byte offset.

pub mod decoder;
pub mod encoder;

pub use decoder::{decode, decode_with};
pub use encoder::{encode, encode_into, encoded_len};

pub use crate::encoding::error::{DecodeError, DecodeErrorKind};
