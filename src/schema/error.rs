use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaErrorKind {
    DuplicateMessage,
    DuplicateFieldNumber,
    DuplicateFieldName,
    InvalidFieldNumber,
    UnresolvedMessage,
    InvalidPacked,
}

impl SchemaErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            SchemaErrorKind::DuplicateMessage => "duplicate message type",
            SchemaErrorKind::DuplicateFieldNumber => "duplicate field number",
            SchemaErrorKind::DuplicateFieldName => "duplicate field name",
            SchemaErrorKind::InvalidFieldNumber => "invalid field number",
            SchemaErrorKind::UnresolvedMessage => "unresolved message type",
            SchemaErrorKind::InvalidPacked => "packed encoding requires a repeated numeric field",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    kind: SchemaErrorKind,
    message: String,
    field: Option<u32>,
}

impl SchemaError {
    pub(crate) fn new(kind: SchemaErrorKind, message: &str, field: Option<u32>) -> Self {
        Self {
            kind,
            message: message.to_string(),
            field,
        }
    }

    pub fn kind(&self) -> SchemaErrorKind {
        self.kind
    }

    /// Name of the message type the error was found in.
    pub fn message_name(&self) -> &str {
        &self.message
    }

    pub fn field(&self) -> Option<u32> {
        self.field
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(number) => write!(
                f,
                "{}: field {} in message {}",
                self.kind.name(),
                number,
                self.message
            ),
            None => write!(f, "{}: {}", self.kind.name(), self.message),
        }
    }
}

impl std::error::Error for SchemaError {}
