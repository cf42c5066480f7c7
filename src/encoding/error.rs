//! # Decode Errors
//!
//! Every failure while reading wire bytes is a `DecodeError`: a kind plus the
//! absolute byte offset (from the start of the top-level input) at which it was
//! detected. Nested messages report offsets into the outer buffer, not into
//! their own payload.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    /// Varint not terminated within 10 bytes, or overflowing 64 bits.
    MalformedVarint,
    /// Low 3 bits of a tag are 3, 4, 6 or 7.
    UnknownWireType,
    /// Input ended inside a tag.
    TruncatedTag,
    /// A fixed-width or length-delimited payload runs past the end of input.
    TruncatedPayload,
    /// A known field arrived with a wire type its descriptor does not allow.
    WireTypeMismatch,
    /// Nested messages exceed the configured depth limit.
    ExcessiveDepth,
    /// Tag carries field number 0 or one above the 29-bit limit.
    InvalidFieldNumber,
    /// A `string` field holds bytes that are not valid UTF-8.
    InvalidUtf8,
}

impl DecodeErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            DecodeErrorKind::MalformedVarint => "malformed varint",
            DecodeErrorKind::UnknownWireType => "unknown wire type",
            DecodeErrorKind::TruncatedTag => "truncated tag",
            DecodeErrorKind::TruncatedPayload => "truncated payload",
            DecodeErrorKind::WireTypeMismatch => "wire type mismatch",
            DecodeErrorKind::ExcessiveDepth => "excessive nesting depth",
            DecodeErrorKind::InvalidFieldNumber => "invalid field number",
            DecodeErrorKind::InvalidUtf8 => "invalid utf-8 in string field",
        }
    }

    pub fn at(self, offset: usize) -> DecodeError {
        DecodeError { kind: self, offset }
    }
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub offset: usize,
}

impl DecodeError {
    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte offset {}", self.kind, self.offset)
    }
}

impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_offset() {
        let err = DecodeErrorKind::TruncatedPayload.at(17);
        assert_eq!(err.to_string(), "truncated payload at byte offset 17");
    }

    #[test]
    fn converts_into_eyre_report() {
        fn fails() -> eyre::Result<()> {
            Err::<(), _>(DecodeErrorKind::UnknownWireType.at(3))?;
            Ok(())
        }

        let report = fails().unwrap_err();
        let err = report.downcast_ref::<DecodeError>().unwrap();
        assert_eq!(err.kind(), DecodeErrorKind::UnknownWireType);
        assert_eq!(err.offset(), 3);
    }
}
