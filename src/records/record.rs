//! # Record - In-Memory Message Instance
//!
//! A `Record` is one message value: the `MessageId` of its type plus a map from
//! field number to slot. Single fields hold one value, repeated fields an
//! ordered sequence.
//!
//! ## Presence
//!
//! An absent key means "not set". Setting a field to zero is different from
//! never setting it, and only set fields are written by the encoder:
//!
//! ```ignore
//! let mut a = person.new_record();
//! let mut b = person.new_record();
//! b.set(person, "mood", 0)?;
//! assert!(!a.is_set(5));
//! assert_eq!(b.get(5), Some(&Value::I32(0)));
//! ```
//!
//! ## Ownership
//!
//! Nested records are stored by value inside their parent's slot. A child has
//! exactly one owner; sharing a subtree means cloning it.
//!
//! ## Validation
//!
//! `set` and `push` check the value against the message descriptor at the point
//! of assignment (field exists, cardinality, type, numeric range), so a record
//! that was built successfully always encodes.
//!
//! A nested record is accepted only if the parent stays within
//! `DEFAULT_MAX_DEPTH` levels of nesting, the bound the decoder applies by
//! default, so a record built through `set`/`push` also decodes with
//! `DecodeOptions::default()`. Edits made through `get_message_mut` are not
//! re-checked.

use std::collections::BTreeMap;

use eyre::{bail, ensure, Result};

use crate::config::DEFAULT_MAX_DEPTH;
use crate::records::value::Value;
use crate::schema::descriptor::{FieldDescriptor, MessageDescriptor, MessageId};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldSlot {
    Single(Value),
    Repeated(Vec<Value>),
}

impl FieldSlot {
    pub fn values(&self) -> &[Value] {
        match self {
            FieldSlot::Single(value) => std::slice::from_ref(value),
            FieldSlot::Repeated(values) => values,
        }
    }
}

/// Anything that names a field of a message: its number or its name.
pub trait FieldKey {
    fn resolve<'d>(&self, desc: &'d MessageDescriptor) -> Option<&'d FieldDescriptor>;
    fn describe(&self) -> String;
}

impl FieldKey for u32 {
    fn resolve<'d>(&self, desc: &'d MessageDescriptor) -> Option<&'d FieldDescriptor> {
        desc.lookup(*self)
    }

    fn describe(&self) -> String {
        format!("#{}", self)
    }
}

impl FieldKey for &str {
    fn resolve<'d>(&self, desc: &'d MessageDescriptor) -> Option<&'d FieldDescriptor> {
        desc.field_by_name(self)
    }

    fn describe(&self) -> String {
        format!("'{}'", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    message: MessageId,
    fields: BTreeMap<u32, FieldSlot>,
}

impl Record {
    pub fn new(message: MessageId) -> Self {
        Self {
            message,
            fields: BTreeMap::new(),
        }
    }

    pub fn message_id(&self) -> MessageId {
        self.message
    }

    fn field<'d>(
        &self,
        desc: &'d MessageDescriptor,
        key: &impl FieldKey,
    ) -> Result<&'d FieldDescriptor> {
        ensure!(
            desc.id() == self.message,
            "descriptor for message '{}' does not describe this record",
            desc.name()
        );
        match key.resolve(desc) {
            Some(field) => Ok(field),
            None => bail!(
                "message '{}' has no field {}",
                desc.name(),
                key.describe()
            ),
        }
    }

    /// Sets a single field, replacing any previous value.
    pub fn set(
        &mut self,
        desc: &MessageDescriptor,
        key: impl FieldKey,
        value: impl Into<Value>,
    ) -> Result<()> {
        let field = self.field(desc, &key)?;
        ensure!(
            !field.is_repeated(),
            "field '{}' is repeated; use push",
            field.name()
        );
        let value = value.into().coerce(field.semantic_type())?;
        check_nesting(field, &value)?;
        self.fields.insert(field.number(), FieldSlot::Single(value));
        Ok(())
    }

    /// Appends one element to a repeated field.
    pub fn push(
        &mut self,
        desc: &MessageDescriptor,
        key: impl FieldKey,
        value: impl Into<Value>,
    ) -> Result<()> {
        let field = self.field(desc, &key)?;
        ensure!(
            field.is_repeated(),
            "field '{}' is not repeated; use set",
            field.name()
        );
        let value = value.into().coerce(field.semantic_type())?;
        check_nesting(field, &value)?;
        self.append(field.number(), value);
        Ok(())
    }

    /// Removes a field, returning its previous slot.
    pub fn clear(&mut self, number: u32) -> Option<FieldSlot> {
        self.fields.remove(&number)
    }

    /// Value of a set single field.
    pub fn get(&self, number: u32) -> Option<&Value> {
        match self.fields.get(&number) {
            Some(FieldSlot::Single(value)) => Some(value),
            _ => None,
        }
    }

    /// Elements of a repeated field; empty when never pushed.
    pub fn get_repeated(&self, number: u32) -> &[Value] {
        match self.fields.get(&number) {
            Some(FieldSlot::Repeated(values)) => values,
            _ => &[],
        }
    }

    pub fn get_message_mut(&mut self, number: u32) -> Option<&mut Record> {
        match self.fields.get_mut(&number) {
            Some(FieldSlot::Single(value)) => value.as_message_mut(),
            _ => None,
        }
    }

    pub fn slot(&self, number: u32) -> Option<&FieldSlot> {
        self.fields.get(&number)
    }

    pub fn is_set(&self, number: u32) -> bool {
        self.fields.contains_key(&number)
    }

    /// Set fields in ascending field number order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &FieldSlot)> {
        self.fields.iter().map(|(&number, slot)| (number, slot))
    }

    /// Levels of nested messages below this record; 0 when it holds none.
    pub fn nesting_depth(&self) -> usize {
        self.fields
            .values()
            .flat_map(FieldSlot::values)
            .filter_map(Value::as_message)
            .map(|child| child.nesting_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn insert_single(&mut self, number: u32, value: Value) {
        self.fields.insert(number, FieldSlot::Single(value));
    }

    pub(crate) fn append(&mut self, number: u32, value: Value) {
        let slot = self
            .fields
            .entry(number)
            .or_insert_with(|| FieldSlot::Repeated(Vec::new()));
        match slot {
            FieldSlot::Repeated(values) => values.push(value),
            other => *other = FieldSlot::Repeated(vec![value]),
        }
    }
}

fn check_nesting(field: &FieldDescriptor, value: &Value) -> Result<()> {
    if let Some(child) = value.as_message() {
        let depth = child.nesting_depth() + 1;
        ensure!(
            depth <= DEFAULT_MAX_DEPTH,
            "field '{}' would nest messages {} levels deep (limit {})",
            field.name(),
            depth,
            DEFAULT_MAX_DEPTH
        );
    }
    Ok(())
}
