//! # SchemaBuilder - Two-Phase Schema Construction
//!
//! Message types are first declared by name, then fields are attached. Message
//! fields name their nested type as a string, so a type can refer to itself or
//! to a type declared later. `build()` resolves every name to a `MessageId` and
//! validates each table.
//!
//! ## Usage
//!
//! ```ignore
//! let mut builder = SchemaBuilder::new();
//! let person = builder.declare("Person")?;
//! builder
//!     .message(person)
//!     .single(1, "id", FieldType::Int64)
//!     .single(2, "name", FieldType::String)
//!     .repeated(6, "children", FieldType::message("Person"));
//! let schema = builder.build()?;
//! ```
//!
//! ## Validation
//!
//! | Check                                     | Error kind             |
//! |-------------------------------------------|------------------------|
//! | message name declared twice               | `DuplicateMessage`     |
//! | field number used twice in one message    | `DuplicateFieldNumber` |
//! | field name used twice in one message      | `DuplicateFieldName`   |
//! | number outside `1..=2^29-1`               | `InvalidFieldNumber`   |
//! | message field names an undeclared type    | `UnresolvedMessage`    |
//! | `packed` on a single or non-numeric field | `InvalidPacked`        |

use hashbrown::{HashMap, HashSet};

use crate::config::{MAX_FIELD_NUMBER, MIN_FIELD_NUMBER};
use crate::schema::descriptor::{
    Cardinality, FieldDescriptor, MessageDescriptor, MessageId, SemanticType,
};
use crate::schema::error::{SchemaError, SchemaErrorKind};
use crate::schema::Schema;

/// Field type as written in a schema description, before message names are
/// resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
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
    Message(String),
}

impl FieldType {
    pub fn message(name: impl Into<String>) -> Self {
        FieldType::Message(name.into())
    }
}

#[derive(Debug, Clone)]
struct PendingField {
    message: MessageId,
    number: u32,
    name: String,
    field_type: FieldType,
    cardinality: Cardinality,
    packed: bool,
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    names: Vec<String>,
    by_name: HashMap<String, MessageId>,
    fields: Vec<PendingField>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: impl Into<String>) -> Result<MessageId, SchemaError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(SchemaError::new(
                SchemaErrorKind::DuplicateMessage,
                &name,
                None,
            ));
        }
        let id = MessageId(self.names.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.names.push(name);
        Ok(id)
    }

    /// Looks up a previously declared message type.
    pub fn id_of(&self, name: &str) -> Option<MessageId> {
        self.by_name.get(name).copied()
    }

    pub fn message(&mut self, id: MessageId) -> MessageFields<'_> {
        MessageFields { builder: self, id }
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut per_message: Vec<Vec<FieldDescriptor>> = vec![Vec::new(); self.names.len()];
        let mut seen_numbers: Vec<HashSet<u32>> = vec![HashSet::new(); self.names.len()];
        let mut seen_names: Vec<HashSet<String>> = vec![HashSet::new(); self.names.len()];

        for pending in self.fields {
            let owner = pending.message.index();
            let owner_name = match self.names.get(owner) {
                Some(name) => name.as_str(),
                None => {
                    return Err(SchemaError::new(
                        SchemaErrorKind::UnresolvedMessage,
                        &format!("#{}", owner),
                        Some(pending.number),
                    ))
                }
            };

            if !(MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER).contains(&pending.number) {
                return Err(SchemaError::new(
                    SchemaErrorKind::InvalidFieldNumber,
                    owner_name,
                    Some(pending.number),
                ));
            }
            if !seen_numbers[owner].insert(pending.number) {
                return Err(SchemaError::new(
                    SchemaErrorKind::DuplicateFieldNumber,
                    owner_name,
                    Some(pending.number),
                ));
            }
            if !seen_names[owner].insert(pending.name.clone()) {
                return Err(SchemaError::new(
                    SchemaErrorKind::DuplicateFieldName,
                    owner_name,
                    Some(pending.number),
                ));
            }

            let semantic_type = match &pending.field_type {
                FieldType::Int64 => SemanticType::Int64,
                FieldType::Int32 => SemanticType::Int32,
                FieldType::Uint64 => SemanticType::Uint64,
                FieldType::Uint32 => SemanticType::Uint32,
                FieldType::Sint64 => SemanticType::Sint64,
                FieldType::Sint32 => SemanticType::Sint32,
                FieldType::Bool => SemanticType::Bool,
                FieldType::Double => SemanticType::Double,
                FieldType::Float => SemanticType::Float,
                FieldType::Fixed64 => SemanticType::Fixed64,
                FieldType::Fixed32 => SemanticType::Fixed32,
                FieldType::Sfixed64 => SemanticType::Sfixed64,
                FieldType::Sfixed32 => SemanticType::Sfixed32,
                FieldType::String => SemanticType::String,
                FieldType::Bytes => SemanticType::Bytes,
                FieldType::Message(target) => match self.by_name.get(target) {
                    Some(&id) => SemanticType::Message(id),
                    None => {
                        return Err(SchemaError::new(
                            SchemaErrorKind::UnresolvedMessage,
                            owner_name,
                            Some(pending.number),
                        ))
                    }
                },
            };

            if pending.packed
                && (pending.cardinality != Cardinality::Repeated || !semantic_type.is_packable())
            {
                return Err(SchemaError::new(
                    SchemaErrorKind::InvalidPacked,
                    owner_name,
                    Some(pending.number),
                ));
            }

            per_message[owner].push(FieldDescriptor::new(
                pending.number,
                pending.name,
                semantic_type,
                pending.cardinality,
                pending.packed,
            ));
        }

        let messages: Vec<MessageDescriptor> = self
            .names
            .into_iter()
            .zip(per_message)
            .enumerate()
            .map(|(idx, (name, fields))| MessageDescriptor::new(MessageId(idx as u32), name, fields))
            .collect();

        tracing::debug!(messages = messages.len(), "schema built");

        Ok(Schema::from_parts(messages, self.by_name))
    }
}

/// Borrowed view used to attach fields to one declared message.
pub struct MessageFields<'b> {
    builder: &'b mut SchemaBuilder,
    id: MessageId,
}

impl MessageFields<'_> {
    fn push(
        &mut self,
        number: u32,
        name: &str,
        field_type: FieldType,
        cardinality: Cardinality,
        packed: bool,
    ) {
        self.builder.fields.push(PendingField {
            message: self.id,
            number,
            name: name.to_string(),
            field_type,
            cardinality,
            packed,
        });
    }

    pub fn single(&mut self, number: u32, name: &str, field_type: FieldType) -> &mut Self {
        self.push(number, name, field_type, Cardinality::Single, false);
        self
    }

    pub fn repeated(&mut self, number: u32, name: &str, field_type: FieldType) -> &mut Self {
        self.push(number, name, field_type, Cardinality::Repeated, false);
        self
    }

    /// Repeated numeric field written as one length-delimited run.
    pub fn packed(&mut self, number: u32, name: &str, field_type: FieldType) -> &mut Self {
        self.push(number, name, field_type, Cardinality::Repeated, true);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_builder() -> (SchemaBuilder, MessageId) {
        let mut builder = SchemaBuilder::new();
        let person = builder.declare("Person").unwrap();
        builder
            .message(person)
            .single(1, "id", FieldType::Int64)
            .single(2, "name", FieldType::String)
            .repeated(6, "children", FieldType::message("Person"));
        (builder, person)
    }

    #[test]
    fn self_referential_message_resolves_to_itself() {
        let (builder, person) = person_builder();
        let schema = builder.build().unwrap();

        let children = schema.message(person).field_by_name("children").unwrap();
        assert_eq!(children.message_type(), Some(person));
        assert!(children.is_repeated());
    }

    #[test]
    fn forward_reference_to_later_declaration() {
        let mut builder = SchemaBuilder::new();
        let outer = builder.declare("Outer").unwrap();
        builder
            .message(outer)
            .single(1, "inner", FieldType::message("Inner"));
        let inner = builder.declare("Inner").unwrap();
        builder.message(inner).single(1, "x", FieldType::Int32);

        let schema = builder.build().unwrap();
        assert_eq!(
            schema.message(outer).lookup(1).unwrap().message_type(),
            Some(inner)
        );
    }

    #[test]
    fn duplicate_field_number_fails() {
        let (mut builder, person) = person_builder();
        builder.message(person).single(2, "nickname", FieldType::String);

        let err = builder.build().unwrap_err();
        assert_eq!(err.kind(), SchemaErrorKind::DuplicateFieldNumber);
        assert_eq!(err.field(), Some(2));
        assert!(err.to_string().contains("Person"));
    }

    #[test]
    fn duplicate_field_name_fails() {
        let (mut builder, person) = person_builder();
        builder.message(person).single(9, "name", FieldType::Bytes);

        let err = builder.build().unwrap_err();
        assert_eq!(err.kind(), SchemaErrorKind::DuplicateFieldName);
    }

    #[test]
    fn duplicate_message_fails() {
        let mut builder = SchemaBuilder::new();
        builder.declare("Person").unwrap();
        let err = builder.declare("Person").unwrap_err();
        assert_eq!(err.kind(), SchemaErrorKind::DuplicateMessage);
    }

    #[test]
    fn unresolved_message_reference_fails() {
        let mut builder = SchemaBuilder::new();
        let person = builder.declare("Person").unwrap();
        builder
            .message(person)
            .single(7, "pet", FieldType::message("Pet"));

        let err = builder.build().unwrap_err();
        assert_eq!(err.kind(), SchemaErrorKind::UnresolvedMessage);
    }

    #[test]
    fn field_number_bounds_are_enforced() {
        for number in [0, MAX_FIELD_NUMBER + 1] {
            let mut builder = SchemaBuilder::new();
            let m = builder.declare("M").unwrap();
            builder.message(m).single(number, "f", FieldType::Int32);
            let err = builder.build().unwrap_err();
            assert_eq!(err.kind(), SchemaErrorKind::InvalidFieldNumber);
        }
    }

    #[test]
    fn packed_requires_repeated_numeric() {
        let mut builder = SchemaBuilder::new();
        let m = builder.declare("M").unwrap();
        builder.message(m).packed(1, "tags", FieldType::String);
        let err = builder.build().unwrap_err();
        assert_eq!(err.kind(), SchemaErrorKind::InvalidPacked);

        let mut builder = SchemaBuilder::new();
        let m = builder.declare("M").unwrap();
        builder.message(m).packed(1, "scores", FieldType::Sint32);
        let schema = builder.build().unwrap();
        assert!(schema.message(m).lookup(1).unwrap().is_packed());
    }

    #[test]
    fn foreign_message_id_is_unresolved() {
        let mut other = SchemaBuilder::new();
        other.declare("A").unwrap();
        let foreign = other.declare("B").unwrap();

        let mut builder = SchemaBuilder::new();
        builder.declare("Only").unwrap();
        builder.message(foreign).single(1, "x", FieldType::Int32);
        let err = builder.build().unwrap_err();
        assert_eq!(err.kind(), SchemaErrorKind::UnresolvedMessage);
    }
}
