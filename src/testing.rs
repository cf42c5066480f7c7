//! Shared fixtures for unit tests.

use crate::records::Record;
use crate::schema::{FieldType, MessageId, Schema, SchemaBuilder};

/// `Person` with a self-referential `children` field and a nested `Address`.
pub(crate) fn person_schema() -> (Schema, MessageId) {
    let mut builder = SchemaBuilder::new();
    let person = builder.declare("Person").unwrap();
    let address = builder.declare("Address").unwrap();
    builder
        .message(person)
        .single(1, "id", FieldType::Int64)
        .single(2, "name", FieldType::String)
        .single(3, "age", FieldType::Float)
        .single(4, "weight", FieldType::Double)
        .single(5, "mood", FieldType::Int32)
        .repeated(6, "children", FieldType::message("Person"))
        .single(7, "address", FieldType::message("Address"))
        .packed(8, "scores", FieldType::Sint32)
        .repeated(9, "tags", FieldType::String)
        .repeated(10, "lucky", FieldType::Int32);
    builder
        .message(address)
        .single(1, "street", FieldType::String)
        .single(2, "zip", FieldType::Uint32);
    (builder.build().unwrap(), person)
}

fn person(schema: &Schema, id: MessageId, person_id: i64, name: &str) -> Record {
    let desc = schema.message(id);
    let mut record = desc.new_record();
    record.set(desc, "id", person_id).unwrap();
    record.set(desc, "name", name).unwrap();
    record
}

/// John Doe with two children, the second of which has one child.
pub(crate) fn family_tree(schema: &Schema, id: MessageId) -> Record {
    let desc = schema.message(id);

    let jane = person(schema, id, 95_941_545_151, "Jane Smith");
    let mut mac = person(schema, id, 81_154_811, "Mac Smith");
    mac.push(desc, "children", jane).unwrap();
    let susanne = person(schema, id, 959_435_311, "Susanne Doe");

    let mut john = person(schema, id, 1_021_211, "John Doe");
    john.set(desc, "age", 42.5f32).unwrap();
    john.set(desc, "weight", 80.25f64).unwrap();
    john.set(desc, "mood", -3).unwrap();
    john.push(desc, "children", susanne).unwrap();
    john.push(desc, "children", mac).unwrap();
    john
}
