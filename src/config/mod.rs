//! # Codec Configuration Module
//!
//! This module centralizes the numeric limits of the wire format and the
//! runtime knobs of the decoder. Limits that depend on each other live next to
//! each other and are checked through compile-time assertions.
//!
//! ## Module Organization
//!
//! - [`constants`]: Wire format limits with dependency documentation
//! - [`options`]: `DecodeOptions` and `MismatchPolicy` for the message decoder

pub mod constants;
pub mod options;

pub use constants::*;
pub use options::{DecodeOptions, MismatchPolicy};
