//! # Field and Message Descriptors
//!
//! A `MessageDescriptor` is the compiled table for one message type: it maps
//! field numbers to name, semantic type and cardinality. Message-typed fields
//! point at their nested type through a `MessageId`, an index into the owning
//! [`Schema`](crate::schema::Schema), so a type may reference itself.
//!
//! ## Semantic Types and Wire Types
//!
//! | Semantic type                                   | Wire type        | Value  |
//! |-------------------------------------------------|------------------|--------|
//! | int64, sint64                                   | VARINT           | I64    |
//! | int32, sint32                                   | VARINT           | I32    |
//! | uint64                                          | VARINT           | U64    |
//! | uint32                                          | VARINT           | U32    |
//! | bool                                            | VARINT           | Bool   |
//! | double                                          | FIXED64          | F64    |
//! | fixed64                                         | FIXED64          | U64    |
//! | sfixed64                                        | FIXED64          | I64    |
//! | float                                           | FIXED32          | F32    |
//! | fixed32                                         | FIXED32          | U32    |
//! | sfixed32                                        | FIXED32          | I32    |
//! | string, bytes, message                          | LENGTH_DELIMITED | varies |

use hashbrown::HashMap;

use crate::encoding::wire::WireType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub(crate) u32);

impl MessageId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Int64,
    Int32,
    Uint64,
    Uint32,
    Sint64,
    Sint32,
    Bool,
    Double,
    Float,
    Fixed64,
    Fixed32,
    Sfixed64,
    Sfixed32,
    String,
    Bytes,
    Message(MessageId),
}

impl SemanticType {
    pub fn wire_type(&self) -> WireType {
        match self {
            SemanticType::Int64
            | SemanticType::Int32
            | SemanticType::Uint64
            | SemanticType::Uint32
            | SemanticType::Sint64
            | SemanticType::Sint32
            | SemanticType::Bool => WireType::Varint,
            SemanticType::Double | SemanticType::Fixed64 | SemanticType::Sfixed64 => {
                WireType::Fixed64
            }
            SemanticType::Float | SemanticType::Fixed32 | SemanticType::Sfixed32 => {
                WireType::Fixed32
            }
            SemanticType::String | SemanticType::Bytes | SemanticType::Message(_) => {
                WireType::LengthDelimited
            }
        }
    }

    /// Scalar numeric types may use packed repeated encoding.
    pub fn is_packable(&self) -> bool {
        self.wire_type() != WireType::LengthDelimited
    }

    pub fn name(&self) -> &'static str {
        match self {
            SemanticType::Int64 => "int64",
            SemanticType::Int32 => "int32",
            SemanticType::Uint64 => "uint64",
            SemanticType::Uint32 => "uint32",
            SemanticType::Sint64 => "sint64",
            SemanticType::Sint32 => "sint32",
            SemanticType::Bool => "bool",
            SemanticType::Double => "double",
            SemanticType::Float => "float",
            SemanticType::Fixed64 => "fixed64",
            SemanticType::Fixed32 => "fixed32",
            SemanticType::Sfixed64 => "sfixed64",
            SemanticType::Sfixed32 => "sfixed32",
            SemanticType::String => "string",
            SemanticType::Bytes => "bytes",
            SemanticType::Message(_) => "message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Single,
    Repeated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    number: u32,
    name: String,
    semantic_type: SemanticType,
    cardinality: Cardinality,
    packed: bool,
}

impl FieldDescriptor {
    pub(crate) fn new(
        number: u32,
        name: String,
        semantic_type: SemanticType,
        cardinality: Cardinality,
        packed: bool,
    ) -> Self {
        Self {
            number,
            name,
            semantic_type,
            cardinality,
            packed,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn semantic_type(&self) -> SemanticType {
        self.semantic_type
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }

    pub fn is_packed(&self) -> bool {
        self.packed
    }

    pub fn wire_type(&self) -> WireType {
        self.semantic_type.wire_type()
    }

    /// Nested message type, if this is a message field.
    pub fn message_type(&self) -> Option<MessageId> {
        match self.semantic_type {
            SemanticType::Message(id) => Some(id),
            _ => None,
        }
    }

    /// Repeated numeric fields are accepted both unpacked and packed,
    /// independent of how they were declared.
    pub fn accepts(&self, wire_type: WireType) -> bool {
        wire_type == self.wire_type()
            || (self.is_repeated()
                && self.semantic_type.is_packable()
                && wire_type == WireType::LengthDelimited)
    }
}

#[derive(Debug, Clone)]
pub struct MessageDescriptor {
    id: MessageId,
    name: String,
    fields: Vec<FieldDescriptor>,
    by_number: HashMap<u32, usize>,
    by_name: HashMap<String, usize>,
}

impl MessageDescriptor {
    /// Field numbers and names must already be unique; the schema builder
    /// checks this before calling.
    pub(crate) fn new(id: MessageId, name: String, fields: Vec<FieldDescriptor>) -> Self {
        let by_number = fields
            .iter()
            .enumerate()
            .map(|(idx, f)| (f.number, idx))
            .collect();
        let by_name = fields
            .iter()
            .enumerate()
            .map(|(idx, f)| (f.name.clone(), idx))
            .collect();
        Self {
            id,
            name,
            fields,
            by_number,
            by_name,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lookup(&self, number: u32) -> Option<&FieldDescriptor> {
        self.by_number.get(&number).map(|&idx| &self.fields[idx])
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn new_record(&self) -> crate::records::Record {
        crate::records::Record::new(self.id)
    }
}
