//! Text helpers for rendering scanned entries.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowAs<'a> {
    String(&'a str),
    Bytes(&'a [u8]),
}

/// Length-delimited payloads that are UTF-8 without control characters (other
/// than common whitespace) are shown as text.
pub fn show_as(bytes: &[u8]) -> ShowAs<'_> {
    match std::str::from_utf8(bytes) {
        Ok(s) if s.chars().all(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t')) => {
            ShowAs::String(s)
        }
        _ => ShowAs::Bytes(bytes),
    }
}

/// Quotes a string for display.
///
/// Shell-style quoting from `snailquote`: single quotes when they avoid
/// escapes, double quotes with escapes otherwise. Text that needs no quoting
/// at all is still wrapped in double quotes.
pub fn escape_string(input: &str) -> String {
    let escaped = snailquote::escape(input);
    if escaped.starts_with('"') || escaped.starts_with('\'') {
        escaped.into_owned()
    } else {
        format!("\"{}\"", escaped)
    }
}

/// `"· "` repeated `levels` times.
pub fn dotted(levels: usize) -> String {
    "· ".repeat(levels)
}

/// Two spaces repeated `levels` times.
pub fn spaced(levels: usize) -> String {
    "  ".repeat(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_unquoted_text_gets_double_quotes() {
        assert_eq!(escape_string(""), r#""""#);
        assert_eq!(escape_string("a"), r#""a""#);
        assert_eq!(escape_string("foo"), r#""foo""#);
        assert_eq!(escape_string("a{b}"), r#""a{b}""#);
        assert_eq!(escape_string("a=b"), r#""a=b""#);
    }

    #[test]
    fn escape_prefers_single_quotes() {
        assert_eq!(escape_string("foo bar"), r#"'foo bar'"#);
        assert_eq!(escape_string("fo\"o"), r#"'fo"o'"#);
        assert_eq!(escape_string("{\"my\":\"json\"}"), r#"'{"my":"json"}'"#);
    }

    #[test]
    fn escape_falls_back_to_double_quotes() {
        assert_eq!(escape_string("f'o\"o"), r#""f'o\"o""#);
        assert_eq!(
            escape_string("{\"my\":\"json's\"}"),
            r#""{\"my\":\"json's\"}""#
        );
        assert_eq!(escape_string("a\\b"), r#""a\\b""#);
        assert_eq!(escape_string("a\u{7f}b"), r#""a\u{7f}b""#);
    }

    #[test]
    fn show_as_detects_text() {
        assert_eq!(show_as(b"John Doe"), ShowAs::String("John Doe"));
        assert_eq!(show_as(b"\x08\x96\x01"), ShowAs::Bytes(b"\x08\x96\x01"));
        assert_eq!(show_as(&[0xFF, 0xFE]), ShowAs::Bytes(&[0xFF, 0xFE]));
    }

    #[test]
    fn indent_helpers() {
        assert_eq!(dotted(0), "");
        assert_eq!(dotted(1), "· ");
        assert_eq!(dotted(3), "· · · ");
        assert_eq!(spaced(0), "");
        assert_eq!(spaced(2), "    ");
    }
}
