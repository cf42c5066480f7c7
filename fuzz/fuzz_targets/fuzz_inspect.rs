//! Fuzz testing for the schemaless entry scan.
//!
//! Arbitrary bytes must never panic the scan, and every accepted input must
//! produce balanced OpenNested/CloseNested pairs.

#![no_main]

use libfuzzer_sys::fuzz_target;

use pbcodec::inspect::{scan_entries, EntryValue, ScanConfig};

fuzz_target!(|data: &[u8]| {
    let Some(entries) = scan_entries(data, ScanConfig::default()) else {
        return;
    };

    let mut open = Vec::new();
    for entry in &entries {
        match entry.value {
            EntryValue::OpenNested => open.push(entry.path.clone()),
            EntryValue::CloseNested => {
                assert_eq!(open.pop().as_ref(), Some(&entry.path));
            }
            _ => assert!(!entry.path.is_empty()),
        }
    }
    assert!(open.is_empty());
});
