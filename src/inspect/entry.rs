//! # Schemaless Entry Scan
//!
//! Walks arbitrary bytes as a wire encoding without any descriptor and flattens
//! the result into one `Entry` per output line. Each entry carries the full
//! path of field numbers from the top-level message down to the field.
//!
//! ## Nested Detection
//!
//! A length-delimited payload may be a string, raw bytes, a packed run or an
//! embedded message; the wire does not say which. The scan first tries to read
//! the payload as a message. If every byte of it parses structurally the
//! payload is emitted as
//!
//! ```text
//! OpenNested   path=[.., n]
//! ...          path=[.., n, m]
//! CloseNested  path=[.., n]
//! ```
//!
//! and otherwise as a single `Bytes` entry. Short text often happens to parse,
//! so `ScanConfig::no_fixed64`/`no_fixed32` let the caller declare that those
//! wire types never occur, which rules out most accidental matches.

use smallvec::SmallVec;

use crate::config::DEFAULT_SCAN_DEPTH;
use crate::encoding::wire::{RawValue, WireReader, WireType};

pub type EntryPath = SmallVec<[u32; 8]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue {
    Varint(u64),
    Fixed64(u64),
    Fixed32(u32),
    Bytes(Vec<u8>),
    OpenNested,
    CloseNested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: EntryPath,
    pub value: EntryValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub no_fixed64: bool,
    pub no_fixed32: bool,
    /// Payloads nested deeper than this are reported as bytes.
    pub max_depth: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            no_fixed64: false,
            no_fixed32: false,
            max_depth: DEFAULT_SCAN_DEPTH,
        }
    }
}

/// Parses `bytes` as a message. Returns `None` when the bytes are not a
/// complete, structurally valid encoding. Empty input is not treated as a
/// message.
pub fn scan_entries(bytes: &[u8], config: ScanConfig) -> Option<Vec<Entry>> {
    let entries = scan_level(bytes, config, &EntryPath::new(), 0);
    if entries.is_none() {
        tracing::trace!(len = bytes.len(), "input is not a message");
    }
    entries
}

fn scan_level(bytes: &[u8], config: ScanConfig, path: &EntryPath, depth: usize) -> Option<Vec<Entry>> {
    if bytes.is_empty() {
        return None;
    }

    let mut reader = WireReader::new(bytes);
    let mut out = Vec::new();
    while !reader.is_empty() {
        let tag = reader.read_tag().ok()?;
        match tag.wire_type {
            WireType::Fixed64 if config.no_fixed64 => return None,
            WireType::Fixed32 if config.no_fixed32 => return None,
            _ => {}
        }

        let mut entry_path = path.clone();
        entry_path.push(tag.field_number);

        let value = match reader.read_raw(tag.wire_type).ok()? {
            RawValue::Varint(v) => EntryValue::Varint(v),
            RawValue::Fixed64(v) => EntryValue::Fixed64(v),
            RawValue::Fixed32(v) => EntryValue::Fixed32(v),
            RawValue::LengthDelimited { bytes, .. } => {
                let nested = if depth < config.max_depth {
                    scan_level(bytes, config, &entry_path, depth + 1)
                } else {
                    None
                };
                match nested {
                    Some(children) => {
                        out.push(Entry {
                            path: entry_path.clone(),
                            value: EntryValue::OpenNested,
                        });
                        out.extend(children);
                        EntryValue::CloseNested
                    }
                    None => EntryValue::Bytes(bytes.to_vec()),
                }
            }
        };
        out.push(Entry {
            path: entry_path,
            value,
        });
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn bytes_entry(path: &[u32], bytes: &[u8]) -> Entry {
        Entry {
            path: EntryPath::from_slice(path),
            value: EntryValue::Bytes(bytes.to_vec()),
        }
    }

    #[test]
    fn single_bytes_field() {
        let entries = scan_entries(b"\x12\x07Unknown", ScanConfig::default()).unwrap();
        assert_eq!(entries, vec![bytes_entry(&[2], b"Unknown")]);
    }

    #[test]
    fn repeated_fields_keep_order() {
        let entries =
            scan_entries(b"\x12\x07Unknown\x12\x07Unknown", ScanConfig::default()).unwrap();
        assert_eq!(
            entries,
            vec![bytes_entry(&[2], b"Unknown"), bytes_entry(&[2], b"Unknown")]
        );
    }

    #[test]
    fn incomplete_input_is_not_a_message() {
        let res = scan_entries(b"\x12\x07Unknown\x0a\x0fAtlantic ", ScanConfig::default());
        assert_eq!(res, None);
    }

    #[test]
    fn end_group_wire_type_is_not_a_message() {
        // (2 << 3) | 4
        assert_eq!(scan_entries(b"\x14\x07Unknown", ScanConfig::default()), None);
    }

    #[test]
    fn empty_input_is_not_a_message() {
        assert_eq!(scan_entries(b"", ScanConfig::default()), None);
    }

    #[test]
    fn nested_message_is_bracketed_with_full_paths() {
        // field 3 { field 1 = 150 }
        let entries = scan_entries(b"\x1a\x03\x08\x96\x01", ScanConfig::default()).unwrap();
        assert_eq!(
            entries,
            vec![
                Entry {
                    path: smallvec![3],
                    value: EntryValue::OpenNested
                },
                Entry {
                    path: smallvec![3, 1],
                    value: EntryValue::Varint(150)
                },
                Entry {
                    path: smallvec![3],
                    value: EntryValue::CloseNested
                },
            ]
        );
    }

    #[test]
    fn fixed_widths_are_reported() {
        let mut bytes = vec![0x09];
        bytes.extend_from_slice(&7u64.to_le_bytes());
        bytes.push(0x15);
        bytes.extend_from_slice(&9u32.to_le_bytes());

        let entries = scan_entries(&bytes, ScanConfig::default()).unwrap();
        assert_eq!(entries[0].value, EntryValue::Fixed64(7));
        assert_eq!(entries[1].value, EntryValue::Fixed32(9));
    }

    #[test]
    fn no_fixed_flags_reject_those_wire_types() {
        let mut bytes = vec![0x15];
        bytes.extend_from_slice(&9u32.to_le_bytes());
        let config = ScanConfig {
            no_fixed32: true,
            ..ScanConfig::default()
        };
        assert_eq!(scan_entries(&bytes, config), None);

        // "-abcd" parses as field 5 fixed32 unless fixed32 is ruled out
        let wrapped = b"\x0a\x05-abcd";
        let loose = scan_entries(wrapped, ScanConfig::default()).unwrap();
        assert_eq!(loose[0].value, EntryValue::OpenNested);
        let strict = scan_entries(wrapped, config).unwrap();
        assert_eq!(strict, vec![bytes_entry(&[1], b"-abcd")]);
    }

    #[test]
    fn field_number_zero_is_not_a_message() {
        assert_eq!(scan_entries(b"\x00\x01", ScanConfig::default()), None);
    }

    #[test]
    fn depth_limit_falls_back_to_bytes() {
        let config = ScanConfig {
            max_depth: 0,
            ..ScanConfig::default()
        };
        let entries = scan_entries(b"\x1a\x02\x08\x01", config).unwrap();
        assert_eq!(entries, vec![bytes_entry(&[3], b"\x08\x01")]);
    }
}
