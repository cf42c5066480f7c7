//! # Wire Inspector
//!
//! Descriptor-free view of an encoding, used by the `pbdump` tool. The scan
//! reports what the wire says (field numbers, wire shapes, raw payloads) and
//! guesses which length-delimited payloads are embedded messages.
//!
//! ```text
//! bytes --scan_entries--> [Entry] --is_selected--> rendered lines
//! ```

pub mod color;
pub mod entry;
pub mod select;
pub mod text;

pub use color::ColorMode;
pub use entry::{scan_entries, Entry, EntryPath, EntryValue, ScanConfig};
pub use select::{is_selected, SelectQuery};
pub use text::{dotted, escape_string, show_as, spaced, ShowAs};
