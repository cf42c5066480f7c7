//! # Message Encoder
//!
//! Walks a `Record` against its message descriptor and writes tag/payload
//! pairs. Fields are emitted in ascending field number order; decoders accept
//! any order, so this choice only makes output deterministic.
//!
//! ## Emission Rules
//!
//! | Slot                         | Output                                       |
//! |------------------------------|----------------------------------------------|
//! | single, unset                | nothing                                      |
//! | single, set (even to zero)   | tag + payload                                |
//! | repeated                     | tag + payload per element, in order          |
//! | repeated, declared `packed`  | one tag + length-delimited run of payloads   |
//! | message value                | tag + length + recursive encoding            |
//!
//! The top-level output carries no length prefix.
//!
//! ## Sizing
//!
//! Encoding runs in two passes. The measure pass walks the tree once and
//! records the encoded length of every nested message and packed run in
//! pre-order. The write pass follows the same order and takes each length
//! prefix from that list, so no subtree is measured twice and no child needs a
//! scratch buffer.

use crate::config::{FIXED32_SIZE, FIXED64_SIZE};
use crate::encoding::varint::{varint_len, write_varint, zigzag_encode, zigzag_encode32};
use crate::encoding::wire::{write_fixed32, write_fixed64, write_length_delimited, Tag, WireType};
use crate::records::{FieldSlot, Record, Value};
use crate::schema::{FieldDescriptor, Schema, SemanticType};

/// A value reduced to its wire shape.
enum Payload<'r> {
    Varint(u64),
    Fixed64(u64),
    Fixed32(u32),
    Delimited(&'r [u8]),
    Message(&'r Record),
}

fn payload(ty: SemanticType, value: &Value) -> Option<Payload<'_>> {
    let payload = match (ty, value) {
        (SemanticType::Int64, Value::I64(v)) => Payload::Varint(*v as u64),
        (SemanticType::Int32, Value::I32(v)) => Payload::Varint(*v as i64 as u64),
        (SemanticType::Uint64, Value::U64(v)) => Payload::Varint(*v),
        (SemanticType::Uint32, Value::U32(v)) => Payload::Varint(*v as u64),
        (SemanticType::Sint64, Value::I64(v)) => Payload::Varint(zigzag_encode(*v)),
        (SemanticType::Sint32, Value::I32(v)) => Payload::Varint(zigzag_encode32(*v) as u64),
        (SemanticType::Bool, Value::Bool(v)) => Payload::Varint(*v as u64),
        (SemanticType::Double, Value::F64(v)) => Payload::Fixed64(v.to_bits()),
        (SemanticType::Fixed64, Value::U64(v)) => Payload::Fixed64(*v),
        (SemanticType::Sfixed64, Value::I64(v)) => Payload::Fixed64(*v as u64),
        (SemanticType::Float, Value::F32(v)) => Payload::Fixed32(v.to_bits()),
        (SemanticType::Fixed32, Value::U32(v)) => Payload::Fixed32(*v),
        (SemanticType::Sfixed32, Value::I32(v)) => Payload::Fixed32(*v as u32),
        (SemanticType::String, Value::String(v)) => Payload::Delimited(v.as_bytes()),
        (SemanticType::Bytes, Value::Bytes(v)) => Payload::Delimited(v),
        (SemanticType::Message(id), Value::Message(v)) if v.message_id() == id => {
            Payload::Message(v)
        }
        _ => return None,
    };
    Some(payload)
}

/// Set fields paired with their descriptors. Slots without a matching
/// descriptor can only come from a record built against another schema and
/// are left out.
fn described_fields<'a>(
    record: &'a Record,
    schema: &'a Schema,
) -> impl Iterator<Item = (&'a FieldDescriptor, &'a FieldSlot)> {
    let desc = schema.message(record.message_id());
    record.iter().filter_map(move |(number, slot)| match desc.lookup(number) {
        Some(field) => Some((field, slot)),
        None => {
            tracing::debug!(
                message_type = desc.name(),
                field = number,
                "skipping field without descriptor"
            );
            None
        }
    })
}

/// Payloads of one slot. Values whose variant does not match the field type
/// are left out.
fn slot_payloads<'a>(
    field: &'a FieldDescriptor,
    values: &'a [Value],
) -> impl Iterator<Item = Payload<'a>> + 'a {
    values
        .iter()
        .filter_map(move |value| match payload(field.semantic_type(), value) {
            Some(p) => Some(p),
            None => {
                tracing::debug!(
                    field = field.name(),
                    value = value.kind_name(),
                    "skipping value that does not match its field type"
                );
                None
            }
        })
}

struct MessageEncoder<'s> {
    schema: &'s Schema,
    /// Encoded length of every nested message and packed run, in pre-order.
    sizes: Vec<usize>,
    next: usize,
}

impl<'s> MessageEncoder<'s> {
    fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            sizes: Vec::new(),
            next: 0,
        }
    }

    fn measure_payload(&mut self, payload: &Payload<'_>) -> usize {
        match payload {
            Payload::Varint(v) => varint_len(*v),
            Payload::Fixed64(_) => FIXED64_SIZE,
            Payload::Fixed32(_) => FIXED32_SIZE,
            Payload::Delimited(bytes) => varint_len(bytes.len() as u64) + bytes.len(),
            Payload::Message(record) => {
                let index = self.sizes.len();
                self.sizes.push(0);
                let len = self.measure(record);
                self.sizes[index] = len;
                varint_len(len as u64) + len
            }
        }
    }

    /// Encoded length of `record`, recording nested lengths along the way.
    fn measure(&mut self, record: &Record) -> usize {
        let schema = self.schema;
        let mut total = 0;
        for (field, slot) in described_fields(record, schema) {
            let values = slot.values();
            if field.is_packed() {
                if values.is_empty() {
                    continue;
                }
                let index = self.sizes.len();
                self.sizes.push(0);
                let body: usize = slot_payloads(field, values)
                    .map(|p| self.measure_payload(&p))
                    .sum();
                self.sizes[index] = body;
                total += Tag::new(field.number(), WireType::LengthDelimited).encoded_len()
                    + varint_len(body as u64)
                    + body;
                continue;
            }
            let tag_len = Tag::new(field.number(), field.wire_type()).encoded_len();
            for p in slot_payloads(field, values) {
                total += tag_len + self.measure_payload(&p);
            }
        }
        total
    }

    fn next_size(&mut self) -> usize {
        let len = self.sizes[self.next];
        self.next += 1;
        len
    }

    fn write_payload(&mut self, payload: &Payload<'_>, out: &mut Vec<u8>) {
        match payload {
            Payload::Varint(v) => write_varint(*v, out),
            Payload::Fixed64(v) => write_fixed64(*v, out),
            Payload::Fixed32(v) => write_fixed32(*v, out),
            Payload::Delimited(bytes) => write_length_delimited(bytes, out),
            Payload::Message(record) => {
                let len = self.next_size();
                write_varint(len as u64, out);
                self.write(record, out);
            }
        }
    }

    /// Writes `record` using the lengths recorded by `measure`.
    fn write(&mut self, record: &Record, out: &mut Vec<u8>) {
        let schema = self.schema;
        for (field, slot) in described_fields(record, schema) {
            let values = slot.values();
            if field.is_packed() {
                if values.is_empty() {
                    continue;
                }
                let body = self.next_size();
                Tag::new(field.number(), WireType::LengthDelimited).write(out);
                write_varint(body as u64, out);
                for p in values.iter().filter_map(|v| payload(field.semantic_type(), v)) {
                    self.write_payload(&p, out);
                }
                continue;
            }
            let tag = Tag::new(field.number(), field.wire_type());
            for p in values.iter().filter_map(|v| payload(field.semantic_type(), v)) {
                tag.write(out);
                self.write_payload(&p, out);
            }
        }
    }
}

/// Exact number of bytes `encode` produces for `record`.
///
/// # Panics
///
/// Panics if `record` was created for a message id that is not part of
/// `schema`.
pub fn encoded_len(record: &Record, schema: &Schema) -> usize {
    MessageEncoder::new(schema).measure(record)
}

/// Appends the encoding of `record` to `out`.
///
/// # Panics
///
/// Panics if `record` was created for a message id that is not part of
/// `schema`.
pub fn encode_into(record: &Record, schema: &Schema, out: &mut Vec<u8>) {
    let mut encoder = MessageEncoder::new(schema);
    let len = encoder.measure(record);
    out.reserve(len);
    encoder.write(record, out);
}

/// Encodes `record` into a new buffer sized exactly for the output.
///
/// # Panics
///
/// Panics if `record` was created for a message id that is not part of
/// `schema`.
pub fn encode(record: &Record, schema: &Schema) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(record, schema, &mut out);
    out
}
