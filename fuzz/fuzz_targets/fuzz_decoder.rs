//! Fuzz testing for the message decoder.
//!
//! Builds a one-message schema from arbitrary field types, decodes arbitrary
//! bytes against it and checks that a successful decode re-encodes to bytes
//! that decode to the same encoding again.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use pbcodec::{decode, encode, FieldType, SchemaBuilder};

#[derive(Debug, Arbitrary)]
struct DecoderInput {
    fields: Vec<FuzzField>,
    data: Vec<u8>,
}

#[derive(Debug, Arbitrary, Clone, Copy)]
struct FuzzField {
    number: u8,
    field_type: FuzzFieldType,
    repeated: bool,
}

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzFieldType {
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
    SelfMessage,
}

impl From<FuzzFieldType> for FieldType {
    fn from(fft: FuzzFieldType) -> Self {
        match fft {
            FuzzFieldType::Int64 => FieldType::Int64,
            FuzzFieldType::Int32 => FieldType::Int32,
            FuzzFieldType::Uint64 => FieldType::Uint64,
            FuzzFieldType::Uint32 => FieldType::Uint32,
            FuzzFieldType::Sint64 => FieldType::Sint64,
            FuzzFieldType::Sint32 => FieldType::Sint32,
            FuzzFieldType::Bool => FieldType::Bool,
            FuzzFieldType::Double => FieldType::Double,
            FuzzFieldType::Float => FieldType::Float,
            FuzzFieldType::Fixed64 => FieldType::Fixed64,
            FuzzFieldType::Fixed32 => FieldType::Fixed32,
            FuzzFieldType::Sfixed64 => FieldType::Sfixed64,
            FuzzFieldType::Sfixed32 => FieldType::Sfixed32,
            FuzzFieldType::String => FieldType::String,
            FuzzFieldType::Bytes => FieldType::Bytes,
            FuzzFieldType::SelfMessage => FieldType::message("M"),
        }
    }
}

fuzz_target!(|input: DecoderInput| {
    if input.fields.len() > 32 {
        return;
    }

    let mut builder = SchemaBuilder::new();
    let Ok(m) = builder.declare("M") else {
        return;
    };
    for (idx, field) in input.fields.iter().enumerate() {
        let name = format!("f{}", idx);
        let number = u32::from(field.number);
        if field.repeated {
            builder.message(m).repeated(number, &name, field.field_type.into());
        } else {
            builder.message(m).single(number, &name, field.field_type.into());
        }
    }
    let Ok(schema) = builder.build() else {
        return;
    };

    if let Ok(record) = decode(&input.data, &schema, m) {
        let first = encode(&record, &schema);
        let again = decode(&first, &schema, m).expect("re-encoded record must decode");
        assert_eq!(encode(&again, &schema), first);
    }
});
