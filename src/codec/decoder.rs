//! # Message Decoder
//!
//! Parses a byte buffer into a `Record` of a given message type. The decoder
//! is a single forward pass over the input; nested messages are decoded by
//! recursion over the sub-slice of their payload.
//!
//! ## States
//!
//! ```text
//!         +-------+   bytes remain   +----------+   payload read   +--------------+
//!  -----> | START | ---------------> | READ_TAG | ---------------> | READ_PAYLOAD |
//!         +-------+                  +----------+ <--------------- +--------------+
//!             |                           |                             |
//!             | input consumed            | error                       | error
//!             v                           v                             v
//!         +------+                   +--------+                    +--------+
//!         | DONE |                   | FAILED |                    | FAILED |
//!         +------+                   +--------+                    +--------+
//! ```
//!
//! DONE is reached only when the input is consumed exactly. A partial tag or
//! payload at the end of input is a failure, so truncating a valid encoding
//! never yields a record.
//!
//! ## Field Handling
//!
//! | Occurrence                                  | Action                       |
//! |---------------------------------------------|------------------------------|
//! | field number not in the table               | skip structurally            |
//! | wire type not accepted, policy `Reject`     | fail `WireTypeMismatch`      |
//! | wire type not accepted, policy `Skip`       | skip structurally            |
//! | single field                                | overwrite (last one wins)    |
//! | repeated field                              | append in encounter order    |
//! | repeated numeric, LENGTH_DELIMITED          | unpack run, append each      |
//!
//! ## Depth
//!
//! The top-level message is at depth 0. Entering a nested message whose depth
//! would exceed `DecodeOptions::max_depth` fails with `ExcessiveDepth` at the
//! offset of the nested payload, before any of its bytes are read.

use crate::config::{DecodeOptions, MismatchPolicy};
use crate::encoding::error::{DecodeError, DecodeErrorKind};
use crate::encoding::varint::{zigzag_decode, zigzag_decode32};
use crate::encoding::wire::{WireReader, WireType};
use crate::records::{Record, Value};
use crate::schema::{FieldDescriptor, MessageId, Schema, SemanticType};

/// Decodes `bytes` as one message of type `message` using default options.
///
/// # Panics
///
/// Panics if `message` does not belong to `schema`.
pub fn decode(bytes: &[u8], schema: &Schema, message: MessageId) -> Result<Record, DecodeError> {
    decode_with(bytes, schema, message, &DecodeOptions::default())
}

/// Decodes `bytes` as one message of type `message`.
///
/// # Panics
///
/// Panics if `message` does not belong to `schema`.
pub fn decode_with(
    bytes: &[u8],
    schema: &Schema,
    message: MessageId,
    options: &DecodeOptions,
) -> Result<Record, DecodeError> {
    let decoder = MessageDecoder { schema, options };
    let result = decoder.decode_message(WireReader::new(bytes), message, 0);
    if let Err(err) = &result {
        tracing::debug!(
            message_type = schema.message(message).name(),
            error = %err,
            "decode failed"
        );
    }
    result
}

struct MessageDecoder<'s> {
    schema: &'s Schema,
    options: &'s DecodeOptions,
}

impl MessageDecoder<'_> {
    fn decode_message(
        &self,
        mut reader: WireReader<'_>,
        message: MessageId,
        depth: usize,
    ) -> Result<Record, DecodeError> {
        let desc = self.schema.message(message);
        let mut record = Record::new(message);

        while !reader.is_empty() {
            let tag_offset = reader.offset();
            let tag = reader.read_tag()?;

            let field = match desc.lookup(tag.field_number) {
                Some(field) => field,
                None => {
                    tracing::trace!(
                        message_type = desc.name(),
                        field = tag.field_number,
                        wire_type = tag.wire_type.name(),
                        "skipping unknown field"
                    );
                    reader.skip(tag.wire_type)?;
                    continue;
                }
            };

            if !field.accepts(tag.wire_type) {
                match self.options.get_mismatch_policy() {
                    MismatchPolicy::Reject => {
                        return Err(DecodeErrorKind::WireTypeMismatch.at(tag_offset));
                    }
                    MismatchPolicy::Skip => {
                        tracing::debug!(
                            message_type = desc.name(),
                            field = field.name(),
                            expected = field.wire_type().name(),
                            found = tag.wire_type.name(),
                            "skipping field with mismatched wire type"
                        );
                        reader.skip(tag.wire_type)?;
                        continue;
                    }
                }
            }

            if field.is_repeated()
                && tag.wire_type == WireType::LengthDelimited
                && field.wire_type() != WireType::LengthDelimited
            {
                let (offset, bytes) = reader.read_length_delimited()?;
                let mut packed = WireReader::with_base(bytes, offset);
                while !packed.is_empty() {
                    let value = self.read_value(&mut packed, field, depth)?;
                    record.append(field.number(), value);
                }
                continue;
            }

            let value = self.read_value(&mut reader, field, depth)?;
            if field.is_repeated() {
                record.append(field.number(), value);
            } else {
                record.insert_single(field.number(), value);
            }
        }

        Ok(record)
    }

    /// Reads one element of `field` in its declared wire shape.
    fn read_value(
        &self,
        reader: &mut WireReader<'_>,
        field: &FieldDescriptor,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        let value = match field.semantic_type() {
            SemanticType::Int64 => Value::I64(reader.read_varint()? as i64),
            SemanticType::Int32 => Value::I32(reader.read_varint()? as i32),
            SemanticType::Uint64 => Value::U64(reader.read_varint()?),
            SemanticType::Uint32 => Value::U32(reader.read_varint()? as u32),
            SemanticType::Sint64 => Value::I64(zigzag_decode(reader.read_varint()?)),
            SemanticType::Sint32 => Value::I32(zigzag_decode32(reader.read_varint()? as u32)),
            SemanticType::Bool => Value::Bool(reader.read_varint()? != 0),
            SemanticType::Double => Value::F64(f64::from_bits(reader.read_fixed64()?)),
            SemanticType::Fixed64 => Value::U64(reader.read_fixed64()?),
            SemanticType::Sfixed64 => Value::I64(reader.read_fixed64()? as i64),
            SemanticType::Float => Value::F32(f32::from_bits(reader.read_fixed32()?)),
            SemanticType::Fixed32 => Value::U32(reader.read_fixed32()?),
            SemanticType::Sfixed32 => Value::I32(reader.read_fixed32()? as i32),
            SemanticType::Bytes => {
                let (_, bytes) = reader.read_length_delimited()?;
                Value::Bytes(bytes.to_vec())
            }
            SemanticType::String => {
                let (offset, bytes) = reader.read_length_delimited()?;
                match std::str::from_utf8(bytes) {
                    Ok(s) => Value::String(s.to_string()),
                    Err(e) => {
                        return Err(DecodeErrorKind::InvalidUtf8.at(offset + e.valid_up_to()))
                    }
                }
            }
            SemanticType::Message(nested) => {
                let (offset, bytes) = reader.read_length_delimited()?;
                if depth + 1 > self.options.get_max_depth() {
                    return Err(DecodeErrorKind::ExcessiveDepth.at(offset));
                }
                let child =
                    self.decode_message(WireReader::with_base(bytes, offset), nested, depth + 1)?;
                Value::Message(child)
            }
        };
        Ok(value)
    }
}
