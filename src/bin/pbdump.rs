//! # pbdump - Schemaless Wire Dump
//!
//! Reads one encoded message from stdin and prints every field it can find,
//! without a schema.
//!
//! ## Usage
//!
//! ```bash
//! # Dump everything
//! pbdump < person.bin
//!
//! # Only the subtree under field 6, first level
//! pbdump .6 < person.bin
//!
//! # Full paths instead of indentation, no fixed-width guesses
//! pbdump --indent path --no-fixed < person.bin
//!
//! # No colour codes, for pipes
//! pbdump --plain < person.bin
//! ```
//!
//! ## Output
//!
//! Integers are red and payloads green unless `--plain` is given.
//!
//! ```text
//! 1: 1021211
//! 2: (8 bytes) 'John Doe'
//! 6 {
//! · 1: 959435311
//! · 2: (11 bytes) 'Susanne Doe'
//! }
//! ```

use std::env;
use std::io::{self, Read, Write};

use eyre::{bail, Result, WrapErr};
use pbcodec::config::DUMP_MAX_BYTES;
use pbcodec::inspect::{
    dotted, escape_string, is_selected, scan_entries, show_as, spaced, ColorMode, EntryValue,
    ScanConfig, SelectQuery, ShowAs,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndentStyle {
    Dot,
    Space,
    Path,
}

impl IndentStyle {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "dot" => Ok(IndentStyle::Dot),
            "space" => Ok(IndentStyle::Space),
            "path" => Ok(IndentStyle::Path),
            other => bail!("Unknown indent style: {} (expected dot, space or path)", other),
        }
    }
}

#[derive(Debug, Clone)]
struct DumpConfig {
    indent: IndentStyle,
    select: SelectQuery,
    full: bool,
    color: ColorMode,
    scan: ScanConfig,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut indent = IndentStyle::Dot;
    let mut scan = ScanConfig::default();
    let mut full = false;
    let mut color = ColorMode::Colored;
    let mut select: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("pbdump {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--indent" | "-i" => {
                i += 1;
                match args.get(i) {
                    Some(style) => indent = IndentStyle::parse(style)?,
                    None => bail!("--indent requires a value"),
                }
            }
            "--no-fixed" => {
                scan.no_fixed64 = true;
                scan.no_fixed32 = true;
            }
            "--no-fixed64" => scan.no_fixed64 = true,
            "--no-fixed32" => scan.no_fixed32 = true,
            "--full" => full = true,
            "--plain" => color = ColorMode::Plain,
            "--color" => color = ColorMode::Colored,
            arg if arg.starts_with('-') => {
                bail!("Unknown option: {}", arg);
            }
            path => {
                if select.is_some() {
                    bail!("Multiple select paths specified");
                }
                select = Some(path.to_string());
            }
        }
        i += 1;
    }

    let select = SelectQuery::parse(select.as_deref().unwrap_or_default())
        .wrap_err("invalid select path")?;
    let config = DumpConfig {
        indent,
        select,
        full,
        color,
        scan,
    };

    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .wrap_err("failed to read stdin")?;
    tracing::debug!(len = input.len(), "read input");

    let lines = render(&input, &config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn render(bytes: &[u8], config: &DumpConfig) -> Result<Vec<String>> {
    let entries = match scan_entries(bytes, config.scan) {
        Some(entries) => entries,
        None => bail!("Input bytes is not a valid protobuf serialization"),
    };

    let mut lines = Vec::new();
    for entry in entries {
        if !is_selected(&entry, &config.select) {
            continue;
        }
        let path = &entry.path[config.select.len()..];
        if path.is_empty() {
            continue;
        }
        let label = format_path(path, config.indent);
        match &entry.value {
            EntryValue::Varint(v) => {
                lines.push(format!("{}: {}", label, config.color.red(v.to_string())))
            }
            EntryValue::Fixed64(v) => {
                lines.push(format!("{}: {}", label, config.color.red(v.to_string())))
            }
            EntryValue::Fixed32(v) => {
                lines.push(format!("{}: {}", label, config.color.red(v.to_string())))
            }
            EntryValue::Bytes(v) => lines.push(format!(
                "{}: ({} bytes) {}",
                label,
                v.len(),
                config.color.green(format_bytes(v, config.full))
            )),
            EntryValue::OpenNested => lines.push(format!("{} {{", label)),
            EntryValue::CloseNested => lines.push(close_brace(path, config.indent)),
        }
    }
    Ok(lines)
}

fn format_path(path: &[u32], indent: IndentStyle) -> String {
    let last = path.last().map(|n| n.to_string()).unwrap_or_default();
    let levels = path.len().saturating_sub(1);
    match indent {
        IndentStyle::Dot => format!("{}{}", dotted(levels), last),
        IndentStyle::Space => format!("{}{}", spaced(levels), last),
        IndentStyle::Path => path.iter().map(|n| format!(".{}", n)).collect(),
    }
}

fn close_brace(path: &[u32], indent: IndentStyle) -> String {
    let levels = path.len().saturating_sub(1);
    match indent {
        IndentStyle::Dot => format!("{}}}", dotted(levels)),
        IndentStyle::Space => format!("{}}}", spaced(levels)),
        IndentStyle::Path => format!("{} }}", format_path(path, indent)),
    }
}

fn format_bytes(bytes: &[u8], full: bool) -> String {
    match show_as(bytes) {
        ShowAs::String(s) => escape_string(s),
        ShowAs::Bytes(bytes) => {
            if full || bytes.len() <= DUMP_MAX_BYTES {
                hex::encode(bytes)
            } else {
                let mut truncated = hex::encode(&bytes[..DUMP_MAX_BYTES]);
                truncated.push('…');
                truncated
            }
        }
    }
}

fn print_usage() {
    println!("pbdump - Dump a protobuf encoding without its schema");
    println!();
    println!("USAGE:");
    println!("    pbdump [OPTIONS] [SELECT] < input.bin");
    println!();
    println!("ARGS:");
    println!("    [SELECT]              Field path to show, e.g. .2.1.1");
    println!();
    println!("OPTIONS:");
    println!("    -i, --indent <STYLE>  Indent style: dot (default), space or path");
    println!("        --no-fixed        Assume wire types 1 and 5 never occur");
    println!("        --no-fixed64      Assume wire type 1 (fixed64, sfixed64, double) never occurs");
    println!("        --no-fixed32      Assume wire type 5 (fixed32, sfixed32, float) never occurs");
    println!("        --full            Show long byte payloads in full");
    println!("        --plain           Print without colours");
    println!("        --color           Print with colours (default)");
    println!("    -h, --help            Print help information");
    println!("    -v, --version         Print version information");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(indent: IndentStyle, select: &str) -> DumpConfig {
        DumpConfig {
            indent,
            select: SelectQuery::parse(select).unwrap(),
            full: false,
            color: ColorMode::Plain,
            scan: ScanConfig::default(),
        }
    }

    // 1: 150, 3 { 1: 1 }
    const NESTED: &[u8] = b"\x08\x96\x01\x1a\x02\x08\x01";

    #[test]
    fn dot_indent() {
        let lines = render(NESTED, &config(IndentStyle::Dot, "")).unwrap();
        assert_eq!(lines, vec!["1: 150", "3 {", "· 1: 1", "}"]);
    }

    #[test]
    fn path_indent() {
        let lines = render(NESTED, &config(IndentStyle::Path, "")).unwrap();
        assert_eq!(lines, vec![".1: 150", ".3 {", ".3.1: 1", ".3 }"]);
    }

    #[test]
    fn select_strips_prefix() {
        let lines = render(NESTED, &config(IndentStyle::Space, ".3")).unwrap();
        assert_eq!(lines, vec!["1: 1"]);
    }

    #[test]
    fn text_and_bytes_payloads() {
        let lines = render(b"\x12\x03a b\x1a\x02\xff\xfe", &config(IndentStyle::Dot, "")).unwrap();
        assert_eq!(lines, vec!["2: (3 bytes) 'a b'", "3: (2 bytes) fffe"]);
    }

    #[test]
    fn long_bytes_are_truncated_unless_full() {
        let payload = vec![0xFFu8; DUMP_MAX_BYTES + 1];
        let short = format_bytes(&payload, false);
        assert!(short.ends_with('…'));
        assert_eq!(short.chars().count(), DUMP_MAX_BYTES * 2 + 1);
        assert_eq!(format_bytes(&payload, true).len(), (DUMP_MAX_BYTES + 1) * 2);
    }

    #[test]
    fn invalid_input_is_an_error() {
        assert!(render(b"", &config(IndentStyle::Dot, "")).is_err());
        assert!(render(b"\x14\x00", &config(IndentStyle::Dot, "")).is_err());
    }

    #[test]
    fn colored_mode_paints_values_only() {
        let colored = DumpConfig {
            color: ColorMode::Colored,
            ..config(IndentStyle::Dot, "")
        };
        let lines = render(b"\x08\x96\x01\x12\x03a b", &colored).unwrap();
        assert_eq!(
            lines,
            vec![
                "1: \x1b[31m150\x1b[0m".to_string(),
                "2: (3 bytes) \x1b[32m'a b'\x1b[0m".to_string(),
            ]
        );
    }
}
