//! PDF output assembly.
//!
//! Builds complete PDF documents with proper structure: header, body, xref
//! table, and trailer. The content of every page is described by a
//! [`ContentStreamBuilder`]; [`PdfWriter::finish`] only assembles the final
//! byte buffer once every draw operation has succeeded, so a failed call
//! never yields a partial document.

pub mod assets;
pub mod content_stream;
pub mod object_serializer;
pub mod pdf_writer;

pub use assets::{AssetStore, ColorSpace, ImageData};
pub use content_stream::ContentStreamBuilder;
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{PdfWriter, PdfWriterConfig};

/// Encode text as WinAnsi (CP-1252) bytes, the encoding the Base-14 fonts
/// are registered with. Unmappable characters degrade to `?`.
pub(crate) fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(b'?'))
        .collect()
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let cp = c as u32;
    match cp {
        0x20..=0x7E | 0xA0..=0xFF => Some(cp as u8),
        // The CP-1252 specials the documents actually use
        0x20AC => Some(0x80), // euro sign
        0x2018 => Some(0x91), // left single quote
        0x2019 => Some(0x92), // right single quote
        0x201C => Some(0x93), // left double quote
        0x201D => Some(0x94), // right double quote
        0x2013 => Some(0x96), // en dash
        0x2014 => Some(0x97), // em dash
        0x0152 => Some(0x8C), // OE ligature
        0x0153 => Some(0x9C), // oe ligature
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(win_ansi_bytes("Total"), b"Total");
    }

    #[test]
    fn test_latin1_accents() {
        assert_eq!(win_ansi_bytes("é"), vec![0xE9]);
        assert_eq!(win_ansi_bytes("Désignation")[1], 0xE9);
    }

    #[test]
    fn test_cp1252_specials() {
        assert_eq!(win_ansi_bytes("€"), vec![0x80]);
        assert_eq!(win_ansi_bytes("œ"), vec![0x9C]);
    }

    #[test]
    fn test_unmappable_degrades() {
        assert_eq!(win_ansi_bytes("日"), vec![b'?']);
    }
}
