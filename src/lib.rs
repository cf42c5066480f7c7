//! # pbcodec - Protocol Buffers Wire Codec
//!
//! pbcodec encodes trees of typed records into the Protocol Buffers binary
//! wire format and decodes them back. Output is byte compatible with other
//! implementations of the format, and decoders built against an older schema
//! skip fields they do not know.
//!
//! - **Explicit presence**: a field set to zero is encoded; an unset field is not
//! - **Recursive messages**: a message type may contain itself
//! - **Bounded decoding**: nesting depth is limited, every error carries an offset
//!
//! ## Quick Start
//!
//! ```ignore
//! use pbcodec::{decode, encode, FieldType, SchemaBuilder};
//!
//! let mut builder = SchemaBuilder::new();
//! let person = builder.declare("Person")?;
//! builder
//!     .message(person)
//!     .single(1, "id", FieldType::Int64)
//!     .single(2, "name", FieldType::String)
//!     .repeated(6, "children", FieldType::message("Person"));
//! let schema = builder.build()?;
//!
//! let desc = schema.message(person);
//! let mut john = desc.new_record();
//! john.set(desc, "id", 1021211)?;
//! john.set(desc, "name", "John Doe")?;
//!
//! let bytes = encode(&john, &schema);
//! assert_eq!(decode(&bytes, &schema, person)?, john);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │    codec (encode / decode)          │
//! ├──────────────────┬──────────────────┤
//! │ records (Record) │ inspect (scan)   │
//! ├──────────────────┴──────────────────┤
//! │    schema (descriptors, builder)    │
//! ├─────────────────────────────────────┤
//! │    encoding (varint, tags, wire)    │
//! ├─────────────────────────────────────┤
//! │    config (limits, DecodeOptions)   │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`encoding`]: varints, zig-zag, tags and the four wire shapes
//! - [`schema`]: field and message descriptors, two-phase schema builder
//! - [`records`]: in-memory message instances with validated assignment
//! - [`codec`]: message encoder and decoder
//! - [`inspect`]: descriptor-free scan of arbitrary encodings
//! - [`config`]: format limits and decoder options

pub mod codec;
pub mod config;
pub mod encoding;
pub mod inspect;
pub mod records;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

pub use codec::{decode, decode_with, encode, encode_into, encoded_len};
pub use config::{DecodeOptions, MismatchPolicy};
pub use encoding::{DecodeError, DecodeErrorKind, Tag, WireType};
pub use records::{FieldSlot, Record, Value};
pub use schema::{
    Cardinality, FieldDescriptor, FieldType, MessageDescriptor, MessageId, Schema, SchemaBuilder,
    SchemaError, SchemaErrorKind, SemanticType,
};
