//! PDF object serialization.
//!
//! Serializes PDF objects to their byte representation according to
//! PDF specification ISO 32000-1:2008.

use std::collections::HashMap;
use std::io::Write;

use crate::object::{Object, ObjectRef};

/// Serializer for PDF objects.
///
/// Converts [`Object`] values to their byte representation following the
/// PDF specification syntax rules.
#[derive(Debug, Clone, Default)]
pub struct ObjectSerializer {
    /// Whether to use compact formatting (minimal whitespace)
    compact: bool,
}

impl ObjectSerializer {
    /// Create a new object serializer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compact serializer (minimal whitespace).
    pub fn compact() -> Self {
        Self { compact: true }
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj)
            .expect("writing to Vec cannot fail");
        buf
    }

    /// Serialize an indirect object definition.
    ///
    /// Format: `{id} {gen} obj\n{object}\nendobj\n`
    pub fn serialize_indirect(&self, id: u32, gen: u16, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        writeln!(buf, "{} {} obj", id, gen).expect("writing to Vec cannot fail");
        self.write_object(&mut buf, obj)
            .expect("writing to Vec cannot fail");
        write!(buf, "\nendobj\n").expect("writing to Vec cannot fail");
        buf
    }

    fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> std::io::Result<()> {
        match obj {
            Object::Boolean(b) => write!(w, "{}", if *b { "true" } else { "false" }),
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) => self.write_real(w, *r),
            Object::String(s) => self.write_string(w, s),
            Object::Name(n) => self.write_name(w, n),
            Object::Array(arr) => self.write_array(w, arr),
            Object::Dictionary(dict) => self.write_dictionary(w, dict),
            Object::Stream { dict, data } => self.write_stream(w, dict, data),
            Object::Reference(r) => write!(w, "{} {} R", r.id, r.gen),
        }
    }

    /// Write a real number, trimming insignificant trailing zeros.
    fn write_real<W: Write>(&self, w: &mut W, r: f64) -> std::io::Result<()> {
        if r.fract() == 0.0 && r.abs() < 1e15 {
            write!(w, "{}", r as i64)
        } else {
            let formatted = format!("{:.4}", r);
            let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
            write!(w, "{}", trimmed)
        }
    }

    /// Write a PDF string, choosing literal or hex form.
    fn write_string<W: Write>(&self, w: &mut W, data: &[u8]) -> std::io::Result<()> {
        let is_printable = data
            .iter()
            .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..=0x7E).contains(&b));

        if is_printable {
            write!(w, "(")?;
            for &byte in data {
                match byte {
                    b'(' => write!(w, "\\(")?,
                    b')' => write!(w, "\\)")?,
                    b'\\' => write!(w, "\\\\")?,
                    b'\n' => write!(w, "\\n")?,
                    b'\r' => write!(w, "\\r")?,
                    b'\t' => write!(w, "\\t")?,
                    _ => w.write_all(&[byte])?,
                }
            }
            write!(w, ")")
        } else {
            write!(w, "<")?;
            for byte in data {
                write!(w, "{:02X}", byte)?;
            }
            write!(w, ">")
        }
    }

    /// Write a PDF name.
    ///
    /// Names start with `/` and escape delimiters with `#xx`.
    fn write_name<W: Write>(&self, w: &mut W, name: &str) -> std::io::Result<()> {
        write!(w, "/")?;
        for byte in name.bytes() {
            let is_regular = byte.is_ascii_graphic()
                && !matches!(
                    byte,
                    b'#' | b'/' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'%'
                );
            if is_regular {
                w.write_all(&[byte])?;
            } else {
                write!(w, "#{:02X}", byte)?;
            }
        }
        Ok(())
    }

    fn write_array<W: Write>(&self, w: &mut W, arr: &[Object]) -> std::io::Result<()> {
        write!(w, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            self.write_object(w, obj)?;
        }
        write!(w, "]")
    }

    fn write_dictionary<W: Write>(
        &self,
        w: &mut W,
        dict: &HashMap<String, Object>,
    ) -> std::io::Result<()> {
        write!(w, "<<")?;

        // Sort keys for deterministic output
        let mut keys: Vec<_> = dict.keys().collect();
        keys.sort();

        for key in keys {
            if let Some(value) = dict.get(key) {
                if !self.compact {
                    write!(w, "\n  ")?;
                } else {
                    write!(w, " ")?;
                }
                self.write_name(w, key)?;
                write!(w, " ")?;
                self.write_object(w, value)?;
            }
        }

        if !self.compact && !dict.is_empty() {
            writeln!(w)?;
        }
        write!(w, ">>")
    }

    fn write_stream<W: Write>(
        &self,
        w: &mut W,
        dict: &HashMap<String, Object>,
        data: &[u8],
    ) -> std::io::Result<()> {
        self.write_dictionary(w, dict)?;
        write!(w, "\nstream\n")?;
        w.write_all(data)?;
        write!(w, "\nendstream")
    }

    // Convenience constructors

    /// A name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// A string object, encoded as WinAnsi bytes.
    pub fn string(s: &str) -> Object {
        Object::String(super::win_ansi_bytes(s))
    }

    /// An integer object.
    pub fn integer(i: i64) -> Object {
        Object::Integer(i)
    }

    /// A real object.
    pub fn real(r: f64) -> Object {
        Object::Real(r)
    }

    /// An array object.
    pub fn array(items: Vec<Object>) -> Object {
        Object::Array(items)
    }

    /// A dictionary object from key/value pairs.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// An indirect reference object.
    pub fn reference(id: u32, gen: u16) -> Object {
        Object::Reference(ObjectRef::new(id, gen))
    }

    /// A `[x0 y0 x1 y1]` rectangle array.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Object {
        Object::Array(vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(x + width),
            Object::Real(y + height),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string(obj: &Object) -> String {
        String::from_utf8_lossy(&ObjectSerializer::compact().serialize(obj)).to_string()
    }

    #[test]
    fn test_serialize_primitives() {
        assert_eq!(to_string(&Object::Integer(42)), "42");
        assert_eq!(to_string(&Object::Boolean(true)), "true");
        assert_eq!(to_string(&Object::Real(12.5)), "12.5");
        assert_eq!(to_string(&Object::Real(12.0)), "12");
    }

    #[test]
    fn test_serialize_string_with_escapes() {
        let obj = Object::String(b"a (b) \\c".to_vec());
        assert_eq!(to_string(&obj), "(a \\(b\\) \\\\c)");
    }

    #[test]
    fn test_serialize_non_ascii_string_as_hex() {
        let obj = ObjectSerializer::string("Dé");
        assert_eq!(to_string(&obj), "<44E9>");
    }

    #[test]
    fn test_serialize_name_escaping() {
        let obj = ObjectSerializer::name("Name With Space");
        assert_eq!(to_string(&obj), "/Name#20With#20Space");
    }

    #[test]
    fn test_serialize_array() {
        let obj = ObjectSerializer::array(vec![Object::Integer(1), Object::Integer(2)]);
        assert_eq!(to_string(&obj), "[1 2]");
    }

    #[test]
    fn test_serialize_dict_sorted_keys() {
        let obj = ObjectSerializer::dict(vec![
            ("Zebra", Object::Integer(1)),
            ("Alpha", Object::Integer(2)),
        ]);
        let s = to_string(&obj);
        assert!(s.find("/Alpha").unwrap() < s.find("/Zebra").unwrap());
    }

    #[test]
    fn test_serialize_indirect() {
        let s = ObjectSerializer::compact().serialize_indirect(3, 0, &Object::Integer(7));
        let s = String::from_utf8_lossy(&s).to_string();
        assert!(s.starts_with("3 0 obj"));
        assert!(s.contains('7'));
        assert!(s.ends_with("endobj\n"));
    }

    #[test]
    fn test_rect_constructor() {
        let s = to_string(&ObjectSerializer::rect(0.0, 0.0, 100.0, 50.0));
        assert_eq!(s, "[0 0 100 50]");
    }
}
