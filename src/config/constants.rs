//! # Wire Format Constants
//!
//! All limits of the binary format in one place. Values that are derived from
//! one another are co-located and guarded with `const` assertions so a change
//! to one is caught at compile time when the others no longer agree.
//!
//! ## Dependency Graph
//!
//! ```text
//! VARINT_PAYLOAD_BITS (7)
//!       │
//!       └─> MAX_VARINT_LEN (10 = ceil(64 / 7))
//!             A u64 never needs more than 10 groups. An 11th group means the
//!             input is malformed, not merely large.
//!
//! TAG_TYPE_BITS (3)
//!       │
//!       ├─> TAG_TYPE_MASK (0b111)
//!       │
//!       └─> MAX_FIELD_NUMBER (2^29 - 1)
//!             The tag is a u32 varint: 32 - TAG_TYPE_BITS bits remain for the
//!             field number.
//!
//! DEFAULT_MAX_DEPTH (100)
//!       │
//!       └─> Nested message recursion limit used by DecodeOptions::default()
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use crate::config::{MAX_VARINT_LEN, MAX_FIELD_NUMBER};
//! ```

// ============================================================================
// VARINT LAYOUT
// ============================================================================

/// Payload bits carried by every varint byte.
pub const VARINT_PAYLOAD_BITS: u32 = 7;

/// Continuation flag in the high bit of each varint byte.
pub const VARINT_CONTINUATION: u8 = 0x80;

/// Mask selecting the payload bits of a varint byte.
pub const VARINT_PAYLOAD_MASK: u8 = 0x7F;

/// Longest legal encoding of a u64.
pub const MAX_VARINT_LEN: usize = 10;

const _: () = assert!(
    MAX_VARINT_LEN == (u64::BITS as usize).div_ceil(VARINT_PAYLOAD_BITS as usize),
    "MAX_VARINT_LEN must cover exactly 64 bits of payload"
);

// ============================================================================
// TAG LAYOUT
// ============================================================================

/// Number of low bits of a tag reserved for the wire type.
pub const TAG_TYPE_BITS: u32 = 3;

/// Mask selecting the wire type from a tag.
pub const TAG_TYPE_MASK: u64 = (1 << TAG_TYPE_BITS) - 1;

/// Smallest legal field number.
pub const MIN_FIELD_NUMBER: u32 = 1;

/// Largest legal field number.
pub const MAX_FIELD_NUMBER: u32 = (1 << (u32::BITS - TAG_TYPE_BITS)) - 1;

const _: () = assert!(
    MAX_FIELD_NUMBER == 536_870_911,
    "MAX_FIELD_NUMBER derivation mismatch"
);

// ============================================================================
// FIXED-WIDTH PAYLOADS
// ============================================================================

/// Payload size of a FIXED64 field.
pub const FIXED64_SIZE: usize = 8;

/// Payload size of a FIXED32 field.
pub const FIXED32_SIZE: usize = 4;

const _: () = assert!(FIXED64_SIZE == std::mem::size_of::<u64>());
const _: () = assert!(FIXED32_SIZE == std::mem::size_of::<u32>());

// ============================================================================
// RECURSION
// ============================================================================

/// Default nesting limit for message decoding. The top-level message is
/// depth 0.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Default nesting limit for the schemaless inspector.
pub const DEFAULT_SCAN_DEPTH: usize = 64;

const _: () = assert!(DEFAULT_SCAN_DEPTH <= DEFAULT_MAX_DEPTH);

// ============================================================================
// PRESENTATION
// ============================================================================

/// Bytes fields longer than this are truncated by the dump tool unless
/// `--full` is given.
pub const DUMP_MAX_BYTES: usize = 256;
