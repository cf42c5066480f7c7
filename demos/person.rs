//! # Person Encoding Demo
//!
//! Builds a small family tree of `Person` records, prints the encoding of the
//! grandchild and of the whole tree as hex, and writes both to disk.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example person -- ./out
//! pbdump < ./out/person.bin
//! ```
//!
//! Without an argument the files are written to the current directory.

use std::path::PathBuf;

use eyre::{Result, WrapErr};
use pbcodec::{encode, FieldType, MessageDescriptor, Record, SchemaBuilder};

fn person(desc: &MessageDescriptor, id: i64, name: &str) -> Result<Record> {
    let mut record = desc.new_record();
    record.set(desc, "id", id)?;
    record.set(desc, "name", name)?;
    Ok(record)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut builder = SchemaBuilder::new();
    let person_id = builder.declare("Person")?;
    builder
        .message(person_id)
        .single(1, "id", FieldType::Int64)
        .single(2, "name", FieldType::String)
        .single(3, "age", FieldType::Float)
        .single(4, "weight", FieldType::Double)
        .single(5, "mood", FieldType::Int32)
        .repeated(6, "children", FieldType::message("Person"));
    let schema = builder.build()?;
    let desc = schema.message(person_id);

    let child1 = person(desc, 959_435_311, "Susanne Doe")?;
    let grandchild = person(desc, 95_941_545_151, "Jane Smith")?;
    let mut child2 = person(desc, 81_154_811, "Mac Smith")?;
    child2.push(desc, "children", grandchild.clone())?;

    let mut root = person(desc, 1_021_211, "John Doe")?;
    root.push(desc, "children", child1)?;
    root.push(desc, "children", child2)?;

    for (name, record, file) in [
        ("Jane Smith", &grandchild, "grandchild.bin"),
        ("John Doe", &root, "person.bin"),
    ] {
        let bytes = encode(record, &schema);
        let path = out_dir.join(file);
        std::fs::write(&path, &bytes)
            .wrap_err_with(|| format!("failed to write {:?}", path))?;
        tracing::info!(path = %path.display(), len = bytes.len(), "wrote encoding");

        println!("{}:", name);
        println!("{}", hex::encode(&bytes));
        println!();
    }

    Ok(())
}
