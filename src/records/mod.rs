//! # Record Model
//!
//! This module provides the in-memory representation of message instances
//! that the codec serializes.
//!
//! ## Shape
//!
//! ```text
//! Record (Person)
//! ├── 1 ─> Single(I64(1021211))
//! ├── 2 ─> Single(String("John Doe"))
//! └── 6 ─> Repeated([
//!            Message(Record (Person) { 1: I64(959435311), 2: "Susanne Doe" }),
//!            Message(Record (Person) { 1: I64(81154811), 2: "Mac Smith", 6: [...] }),
//!          ])
//! ```
//!
//! Field slots are kept in a `BTreeMap` keyed by field number, which gives the
//! encoder a stable ascending emission order for free.
//!
//! ## Lifecycle
//!
//! 1. Created empty with `Record::new(id)` or `MessageDescriptor::new_record()`
//! 2. Filled through `set` / `push`, which validate against the descriptor
//! 3. Borrowed immutably by the encoder, so no mutation can overlap an encode
//! 4. Decoding returns a fresh, fully owned tree
//!
//! ## Module Structure
//!
//! - `value`: `Value` enum and assignment coercion
//! - `record`: `Record`, `FieldSlot` and the `FieldKey` trait

pub mod record;
pub mod value;


pub use record::{FieldKey, FieldSlot, Record};
pub use value::Value;
