//! # Decoder Options
//!
//! Runtime configuration for [`crate::codec::decode_with`].
//!
//! ## Wire Type Mismatch Policy
//!
//! A tag whose field number is known but whose wire type disagrees with the
//! descriptor is either a hard error or is skipped like an unknown field:
//!
//! | Policy   | Behavior                                            |
//! |----------|-----------------------------------------------------|
//! | `Reject` | Decode fails with `WireTypeMismatch` (the default)  |
//! | `Skip`   | Payload is skipped structurally, field stays unset  |
//!
//! Packed occurrences of repeated numeric fields are never a mismatch.
//!
//! ## Usage
//!
//! ```ignore
//! let options = DecodeOptions::new()
//!     .max_depth(16)
//!     .mismatch_policy(MismatchPolicy::Skip);
//! let record = decode_with(&bytes, &schema, person, &options)?;
//! ```

use crate::config::constants::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchPolicy {
    #[default]
    Reject,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    max_depth: usize,
    mismatch_policy: MismatchPolicy,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            mismatch_policy: MismatchPolicy::Reject,
        }
    }

    /// Deepest nesting level accepted. The top-level message is level 0, so a
    /// limit of 0 rejects any nested message.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.mismatch_policy = policy;
        self
    }

    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn get_mismatch_policy(&self) -> MismatchPolicy {
        self.mismatch_policy
    }
}
