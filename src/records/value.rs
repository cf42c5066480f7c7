//! # Field Values
//!
//! `Value` is the in-memory form of one field element. Each semantic type has
//! exactly one canonical value variant (see the table in
//! [`crate::schema::descriptor`]); assignment into a `Record` coerces other
//! numeric variants into the canonical one and fails when the number does not
//! fit.
//!
//! ## Coercion Rules
//!
//! | Target  | Accepted                              | Fails when                     |
//! |---------|---------------------------------------|--------------------------------|
//! | I64     | I64, I32, U32, U64                    | U64 above `i64::MAX`           |
//! | I32     | I32, I64, U32, U64                    | outside `i32` range            |
//! | U64     | U64, U32, I32, I64                    | negative                       |
//! | U32     | U32, U64, I32, I64                    | negative or above `u32::MAX`   |
//! | F64     | F64, F32                              | never                          |
//! | F32     | F32, F64                              | finite F64 beyond `f32::MAX`   |
//! | Bool    | Bool                                  | any other variant              |
//! | String  | String                                | any other variant              |
//! | Bytes   | Bytes                                 | any other variant              |
//! | Message | Message of the field's message type   | record of another type         |

use eyre::{bail, Result};

use crate::records::record::Record;
use crate::schema::descriptor::SemanticType;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    Message(Record),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Message(_) => "message",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::F32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&Record> {
        match self {
            Value::Message(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_message_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Message(v) => Some(v),
            _ => None,
        }
    }

    fn as_wide_int(&self) -> Option<i128> {
        match self {
            Value::I32(v) => Some(*v as i128),
            Value::I64(v) => Some(*v as i128),
            Value::U32(v) => Some(*v as i128),
            Value::U64(v) => Some(*v as i128),
            _ => None,
        }
    }

    /// Converts `self` into the canonical variant for `ty`.
    pub(crate) fn coerce(self, ty: SemanticType) -> Result<Value> {
        match ty {
            SemanticType::Int64 | SemanticType::Sint64 | SemanticType::Sfixed64 => {
                let wide = self.int_for(ty)?;
                match i64::try_from(wide) {
                    Ok(v) => Ok(Value::I64(v)),
                    Err(_) => bail!("value {} out of range for {}", wide, ty.name()),
                }
            }
            SemanticType::Int32 | SemanticType::Sint32 | SemanticType::Sfixed32 => {
                let wide = self.int_for(ty)?;
                match i32::try_from(wide) {
                    Ok(v) => Ok(Value::I32(v)),
                    Err(_) => bail!("value {} out of range for {}", wide, ty.name()),
                }
            }
            SemanticType::Uint64 | SemanticType::Fixed64 => {
                let wide = self.int_for(ty)?;
                match u64::try_from(wide) {
                    Ok(v) => Ok(Value::U64(v)),
                    Err(_) => bail!("value {} out of range for {}", wide, ty.name()),
                }
            }
            SemanticType::Uint32 | SemanticType::Fixed32 => {
                let wide = self.int_for(ty)?;
                match u32::try_from(wide) {
                    Ok(v) => Ok(Value::U32(v)),
                    Err(_) => bail!("value {} out of range for {}", wide, ty.name()),
                }
            }
            SemanticType::Double => match self {
                Value::F64(v) => Ok(Value::F64(v)),
                Value::F32(v) => Ok(Value::F64(v as f64)),
                other => bail!("cannot assign {} to a double field", other.kind_name()),
            },
            SemanticType::Float => match self {
                Value::F32(v) => Ok(Value::F32(v)),
                Value::F64(v) => {
                    if v.is_finite() && v.abs() > f32::MAX as f64 {
                        bail!("value {} out of range for float", v);
                    }
                    Ok(Value::F32(v as f32))
                }
                other => bail!("cannot assign {} to a float field", other.kind_name()),
            },
            SemanticType::Bool => match self {
                Value::Bool(v) => Ok(Value::Bool(v)),
                other => bail!("cannot assign {} to a bool field", other.kind_name()),
            },
            SemanticType::String => match self {
                Value::String(v) => Ok(Value::String(v)),
                other => bail!("cannot assign {} to a string field", other.kind_name()),
            },
            SemanticType::Bytes => match self {
                Value::Bytes(v) => Ok(Value::Bytes(v)),
                other => bail!("cannot assign {} to a bytes field", other.kind_name()),
            },
            SemanticType::Message(expected) => match self {
                Value::Message(record) if record.message_id() == expected => {
                    Ok(Value::Message(record))
                }
                Value::Message(record) => bail!(
                    "cannot assign record of message #{} to a field of message #{}",
                    record.message_id().index(),
                    expected.index()
                ),
                other => bail!("cannot assign {} to a message field", other.kind_name()),
            },
        }
    }

    fn int_for(&self, ty: SemanticType) -> Result<i128> {
        match self.as_wide_int() {
            Some(v) => Ok(v),
            None => bail!("cannot assign {} to a {} field", self.kind_name(), ty.name()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Message(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::descriptor::MessageId;

    #[test]
    fn integer_literals_widen_into_int64() {
        assert_eq!(
            Value::from(42i32).coerce(SemanticType::Int64).unwrap(),
            Value::I64(42)
        );
        assert_eq!(
            Value::from(7u32).coerce(SemanticType::Sfixed64).unwrap(),
            Value::I64(7)
        );
    }

    #[test]
    fn out_of_range_int32_fails() {
        let err = Value::from(i64::from(i32::MAX) + 1)
            .coerce(SemanticType::Int32)
            .unwrap_err();
        assert!(err.to_string().contains("out of range for int32"));
    }

    #[test]
    fn negative_into_unsigned_fails() {
        assert!(Value::from(-1i32).coerce(SemanticType::Uint64).is_err());
        assert!(Value::from(-1i64).coerce(SemanticType::Fixed32).is_err());
        assert_eq!(
            Value::from(u32::MAX as u64).coerce(SemanticType::Uint32).unwrap(),
            Value::U32(u32::MAX)
        );
    }

    #[test]
    fn u64_above_i64_max_fails_for_int64() {
        assert!(Value::from(u64::MAX).coerce(SemanticType::Int64).is_err());
    }

    #[test]
    fn float_range_is_checked_for_finite_doubles() {
        assert!(Value::from(1e300f64).coerce(SemanticType::Float).is_err());
        assert_eq!(
            Value::from(0.5f64).coerce(SemanticType::Float).unwrap(),
            Value::F32(0.5)
        );
        let inf = Value::from(f64::INFINITY).coerce(SemanticType::Float).unwrap();
        assert_eq!(inf.as_f32(), Some(f32::INFINITY));
    }

    #[test]
    fn mismatched_kinds_fail() {
        assert!(Value::from("x").coerce(SemanticType::Bytes).is_err());
        assert!(Value::from(1i32).coerce(SemanticType::Bool).is_err());
        assert!(Value::from(1.0f64).coerce(SemanticType::Int64).is_err());
        assert!(Value::from(true).coerce(SemanticType::String).is_err());
    }

    #[test]
    fn message_value_must_match_type() {
        let record = Record::new(MessageId(1));
        assert!(Value::from(record.clone())
            .coerce(SemanticType::Message(MessageId(1)))
            .is_ok());
        let err = Value::from(record)
            .coerce(SemanticType::Message(MessageId(0)))
            .unwrap_err();
        assert!(err.to_string().contains("message #1"));
    }
}
