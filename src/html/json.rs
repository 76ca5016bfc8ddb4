//! JSON encoding for payloads embedded in `<script>` tags.
//!
//! Output uses `", "` and `": "` separators, keeps map insertion order, writes
//! non-ASCII characters as `\uXXXX` escapes, and escapes `<`, `>` and `&` so the
//! payload can never close the surrounding script element.

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};

use crate::core::{AssetError, Result};

#[derive(Default)]
struct ScriptFormatter;

impl Formatter for ScriptFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        for ch in fragment.chars() {
            match ch {
                '<' => writer.write_all(b"\\u003C")?,
                '>' => writer.write_all(b"\\u003E")?,
                '&' => writer.write_all(b"\\u0026")?,
                c if c.is_ascii() => writer.write_all(&[c as u8])?,
                c => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        write!(writer, "\\u{unit:04x}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Serialize `value` for embedding inside a `<script>` element.
///
/// # Errors
///
/// Returns [`AssetError::SerializationError`] when the value cannot be
/// represented as JSON (for example a map with non-string keys).
pub fn to_script_json<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, ScriptFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| AssetError::SerializationError {
        reason: e.to_string(),
    })
}
