//! Quoted-literal sizing for stored content
//!
//! Content is measured after re-encoding it as an ASCII-only JSON literal:
//! quotes and escapes count, and every non-ASCII character is written as
//! `\uXXXX` (astral characters as a surrogate pair).

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io::{self, Write};

/// Formatter that escapes everything outside ASCII
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Sink that only counts bytes
#[derive(Default)]
struct ByteCounter(u64);

impl Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Byte length of `value` serialized as ASCII-only JSON
pub fn quoted_len<T>(value: &T) -> serde_json::Result<u64>
where
    T: Serialize + ?Sized,
{
    let mut counter = ByteCounter::default();
    let mut ser = Serializer::with_formatter(&mut counter, AsciiFormatter);
    value.serialize(&mut ser)?;
    Ok(counter.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quoted(value: &str) -> String {
        let mut out = Vec::new();
        let mut ser = Serializer::with_formatter(&mut out, AsciiFormatter);
        value.serialize(&mut ser).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_ascii_adds_quotes() {
        assert_eq!(quoted_len("hi").unwrap(), 4);
        assert_eq!(quoted_len("").unwrap(), 2);
    }

    #[test]
    fn test_escapes_count() {
        assert_eq!(quoted("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(quoted_len("line\n").unwrap(), 8);
        assert_eq!(quoted("\u{1}"), r#""\u0001""#);
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        assert_eq!(quoted("é"), r#""\u00e9""#);
        assert_eq!(quoted_len("é").unwrap(), 8);
        assert_eq!(quoted("日本"), r#""\u65e5\u672c""#);
        // Astral plane: surrogate pair
        assert_eq!(quoted("😀"), r#""\ud83d\ude00""#);
        assert_eq!(quoted_len("😀").unwrap(), 14);
    }

    #[test]
    fn test_null_content() {
        assert_eq!(quoted_len(&Option::<String>::None).unwrap(), 4);
    }
}
