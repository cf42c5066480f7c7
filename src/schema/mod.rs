//! # Schema: Compiled Field Descriptor Tables
//!
//! A `Schema` owns one `MessageDescriptor` per message type. Descriptors live
//! in an arena and refer to each other by `MessageId`, so recursive and
//! mutually recursive message types are plain data with no reference cycles.
//!
//! ## Structure
//!
//! ```text
//! Schema
//! ├── MessageDescriptor #0 "Person"
//! │   ├── 1  id        int64    single
//! │   ├── 2  name      string   single
//! │   ├── 3  age       float    single
//! │   ├── 4  weight    double   single
//! │   ├── 5  mood      int32    single
//! │   └── 6  children  message  repeated ──> #0
//! └── ...
//! ```
//!
//! ## Construction
//!
//! Schemas are only produced by [`SchemaBuilder::build`], which validates every
//! table. There is no textual schema syntax; callers that parse `.proto` files
//! or other descriptions feed the resolved shape into the builder.
//!
//! ## Thread Safety
//!
//! A built `Schema` is immutable and can be shared across threads by reference
//! or behind an `Arc`.
//!
//! ## Module Structure
//!
//! - `descriptor`: `SemanticType`, `Cardinality`, `FieldDescriptor`, `MessageDescriptor`
//! - `builder`: `SchemaBuilder` with declare-then-resolve construction
//! - `error`: `SchemaError`

pub mod builder;
pub mod descriptor;
pub mod error;

use hashbrown::HashMap;

pub use builder::{FieldType, MessageFields, SchemaBuilder};
pub use descriptor::{Cardinality, FieldDescriptor, MessageDescriptor, MessageId, SemanticType};
pub use error::{SchemaError, SchemaErrorKind};

#[derive(Debug, Clone)]
pub struct Schema {
    messages: Vec<MessageDescriptor>,
    by_name: HashMap<String, MessageId>,
}

impl Schema {
    pub(crate) fn from_parts(
        messages: Vec<MessageDescriptor>,
        by_name: HashMap<String, MessageId>,
    ) -> Self {
        Self { messages, by_name }
    }

    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Descriptor for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different builder and is out of range for
    /// this schema. Use [`Schema::get`] for ids of unknown origin.
    pub fn message(&self, id: MessageId) -> &MessageDescriptor {
        &self.messages[id.index()]
    }

    pub fn get(&self, id: MessageId) -> Option<&MessageDescriptor> {
        self.messages.get(id.index())
    }

    pub fn message_id(&self, name: &str) -> Option<MessageId> {
        self.by_name.get(name).copied()
    }

    pub fn message_by_name(&self, name: &str) -> Option<&MessageDescriptor> {
        self.message_id(name).map(|id| self.message(id))
    }

    pub fn messages(&self) -> &[MessageDescriptor] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_lookup_returns_declared_ids() {
        let mut builder = Schema::builder();
        let a = builder.declare("A").unwrap();
        let b = builder.declare("B").unwrap();
        let schema = builder.build().unwrap();

        assert_eq!(schema.message_id("A"), Some(a));
        assert_eq!(schema.message_id("B"), Some(b));
        assert_eq!(schema.message_by_name("B").map(|m| m.name()), Some("B"));
        assert!(schema.message_id("C").is_none());
        assert_eq!(schema.messages().len(), 2);
    }

    #[test]
    fn get_rejects_foreign_id() {
        let schema = Schema::builder().build().unwrap();
        assert!(schema.get(MessageId(3)).is_none());
    }

    #[test]
    fn schema_error_display_names_message_and_field() {
        let err = SchemaError::new(SchemaErrorKind::DuplicateFieldNumber, "Person", Some(5));
        assert_eq!(
            err.to_string(),
            "duplicate field number: field 5 in message Person"
        );
    }
}
