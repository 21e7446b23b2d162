//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure: header, body,
//! xref table, and trailer. Pages, image XObjects and opacity graphics
//! states are registered up front; nothing is written until [`PdfWriter::finish`],
//! so an error never leaves a partial buffer behind.

use std::collections::HashMap;
use std::io::Write;

use crate::error::Result;
use crate::object::{Object, ObjectRef};
use crate::text::Font;

use super::assets::{ColorSpace, ImageData};
use super::content_stream::ContentStreamBuilder;
use super::object_serializer::ObjectSerializer;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Whether to compress content streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            author: None,
            subject: None,
            creator: Some("docpress".to_string()),
            compress: true,
        }
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// A finished page waiting for assembly.
struct PageData {
    width: f32,
    height: f32,
    content: ContentStreamBuilder,
}

/// An image registered for embedding.
struct RegisteredImage {
    resource_id: String,
    image: ImageData,
}

/// PDF document writer.
///
/// Collects pages and shared resources, then assembles the byte buffer.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    images: Vec<RegisteredImage>,
    /// (resource name, alpha)
    ext_gstates: Vec<(String, f32)>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            images: Vec::new(),
            ext_gstates: Vec::new(),
        }
    }

    /// Register an image for embedding; returns its XObject resource id.
    pub fn register_image(&mut self, image: ImageData) -> String {
        let resource_id = format!("Im{}", self.images.len() + 1);
        self.images.push(RegisteredImage {
            resource_id: resource_id.clone(),
            image,
        });
        resource_id
    }

    /// Register (or reuse) an opacity graphics state; returns its resource
    /// name.
    pub fn ext_gstate(&mut self, alpha: f32) -> String {
        let key = (alpha * 1000.0).round() / 1000.0;
        if let Some((name, _)) = self
            .ext_gstates
            .iter()
            .find(|(_, a)| (*a - key).abs() < 1e-6)
        {
            return name.clone();
        }
        let name = format!("GS{}", self.ext_gstates.len() + 1);
        self.ext_gstates.push((name.clone(), key));
        name
    }

    /// Append a finished page.
    pub fn add_page(&mut self, width: f32, height: f32, content: ContentStreamBuilder) {
        self.pages.push(PageData {
            width,
            height,
            content,
        });
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Build the complete PDF document.
    pub fn finish(self) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::compact();
        let mut output = Vec::new();
        let mut xref_offsets: Vec<(u32, usize)> = Vec::new();
        let mut next_id: u32 = 0;
        let mut alloc = || {
            next_id += 1;
            next_id
        };

        // PDF header and binary marker
        writeln!(output, "%PDF-{}", self.config.version)?;
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let catalog_id = alloc();
        let pages_id = alloc();
        let resources_id = alloc();

        // Base-14 fonts, always registered
        let font_ids: Vec<(Font, u32)> = Font::all().iter().map(|f| (*f, alloc())).collect();

        // Image XObjects (and their soft masks)
        let mut image_ids: Vec<(u32, Option<u32>)> = Vec::new();
        for registered in &self.images {
            let image_id = alloc();
            let smask_id = registered.image.soft_mask.as_ref().map(|_| alloc());
            image_ids.push((image_id, smask_id));
        }

        let page_ids: Vec<(u32, u32)> = self.pages.iter().map(|_| (alloc(), alloc())).collect();
        let info_id = alloc();

        // Shared resources dictionary
        let mut font_dict = HashMap::new();
        for (font, id) in &font_ids {
            font_dict.insert(
                font.resource_name().to_string(),
                Object::Reference(ObjectRef::new(*id, 0)),
            );
        }
        let mut resource_entries = vec![("Font", Object::Dictionary(font_dict))];

        if !self.images.is_empty() {
            let xobjects: HashMap<String, Object> = self
                .images
                .iter()
                .zip(&image_ids)
                .map(|(registered, (id, _))| {
                    (
                        registered.resource_id.clone(),
                        Object::Reference(ObjectRef::new(*id, 0)),
                    )
                })
                .collect();
            resource_entries.push(("XObject", Object::Dictionary(xobjects)));
        }

        if !self.ext_gstates.is_empty() {
            let gstates: HashMap<String, Object> = self
                .ext_gstates
                .iter()
                .map(|(name, alpha)| {
                    (
                        name.clone(),
                        ObjectSerializer::dict(vec![
                            ("Type", ObjectSerializer::name("ExtGState")),
                            ("ca", ObjectSerializer::real(*alpha as f64)),
                            ("CA", ObjectSerializer::real(*alpha as f64)),
                        ]),
                    )
                })
                .collect();
            resource_entries.push(("ExtGState", Object::Dictionary(gstates)));
        }
        let resources_obj = ObjectSerializer::dict(resource_entries);

        // Catalog and page tree
        let page_refs: Vec<Object> = page_ids
            .iter()
            .map(|(page_id, _)| Object::Reference(ObjectRef::new(*page_id, 0)))
            .collect();
        let pages_obj = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Pages")),
            ("Kids", Object::Array(page_refs)),
            ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
        ]);
        let catalog_obj = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Catalog")),
            ("Pages", ObjectSerializer::reference(pages_id, 0)),
        ]);

        let mut write_indirect = |id: u32,
                                  obj: &Object,
                                  output: &mut Vec<u8>,
                                  xref: &mut Vec<(u32, usize)>| {
            xref.push((id, output.len()));
            output.extend_from_slice(&serializer.serialize_indirect(id, 0, obj));
        };

        write_indirect(catalog_id, &catalog_obj, &mut output, &mut xref_offsets);
        write_indirect(pages_id, &pages_obj, &mut output, &mut xref_offsets);
        write_indirect(resources_id, &resources_obj, &mut output, &mut xref_offsets);

        // Font objects
        for (font, id) in &font_ids {
            let font_obj = ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Font")),
                ("Subtype", ObjectSerializer::name("Type1")),
                ("BaseFont", ObjectSerializer::name(font.base_name())),
                ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
            ]);
            write_indirect(*id, &font_obj, &mut output, &mut xref_offsets);
        }

        // Image XObjects
        for (registered, (image_id, smask_id)) in self.images.iter().zip(&image_ids) {
            let image = &registered.image;
            let compressed = compress_data(&image.data)?;
            let mut dict = HashMap::new();
            dict.insert("Type".to_string(), ObjectSerializer::name("XObject"));
            dict.insert("Subtype".to_string(), ObjectSerializer::name("Image"));
            dict.insert(
                "Width".to_string(),
                ObjectSerializer::integer(image.width as i64),
            );
            dict.insert(
                "Height".to_string(),
                ObjectSerializer::integer(image.height as i64),
            );
            dict.insert(
                "ColorSpace".to_string(),
                ObjectSerializer::name(image.color_space.pdf_name()),
            );
            dict.insert("BitsPerComponent".to_string(), ObjectSerializer::integer(8));
            dict.insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
            dict.insert(
                "Length".to_string(),
                ObjectSerializer::integer(compressed.len() as i64),
            );
            if let Some(smask_id) = smask_id {
                dict.insert(
                    "SMask".to_string(),
                    ObjectSerializer::reference(*smask_id, 0),
                );
            }
            let stream = Object::Stream {
                dict,
                data: bytes::Bytes::from(compressed),
            };
            write_indirect(*image_id, &stream, &mut output, &mut xref_offsets);

            if let (Some(smask_id), Some(mask)) = (smask_id, image.soft_mask.as_ref()) {
                let compressed = compress_data(mask)?;
                let mut dict = HashMap::new();
                dict.insert("Type".to_string(), ObjectSerializer::name("XObject"));
                dict.insert("Subtype".to_string(), ObjectSerializer::name("Image"));
                dict.insert(
                    "Width".to_string(),
                    ObjectSerializer::integer(image.width as i64),
                );
                dict.insert(
                    "Height".to_string(),
                    ObjectSerializer::integer(image.height as i64),
                );
                dict.insert(
                    "ColorSpace".to_string(),
                    ObjectSerializer::name(ColorSpace::DeviceGray.pdf_name()),
                );
                dict.insert("BitsPerComponent".to_string(), ObjectSerializer::integer(8));
                dict.insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
                dict.insert(
                    "Length".to_string(),
                    ObjectSerializer::integer(compressed.len() as i64),
                );
                let stream = Object::Stream {
                    dict,
                    data: bytes::Bytes::from(compressed),
                };
                write_indirect(*smask_id, &stream, &mut output, &mut xref_offsets);
            }
        }

        // Page and content objects
        for (page_data, (page_id, content_id)) in self.pages.iter().zip(&page_ids) {
            let raw_content = page_data.content.build()?;
            let (content_bytes, is_compressed) = if self.config.compress {
                match compress_data(&raw_content) {
                    Ok(compressed) => (compressed, true),
                    Err(_) => (raw_content, false),
                }
            } else {
                (raw_content, false)
            };

            let mut content_dict = HashMap::new();
            content_dict.insert(
                "Length".to_string(),
                ObjectSerializer::integer(content_bytes.len() as i64),
            );
            if is_compressed {
                content_dict.insert(
                    "Filter".to_string(),
                    ObjectSerializer::name("FlateDecode"),
                );
            }

            let page_obj = ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Page")),
                ("Parent", ObjectSerializer::reference(pages_id, 0)),
                (
                    "MediaBox",
                    ObjectSerializer::rect(
                        0.0,
                        0.0,
                        page_data.width as f64,
                        page_data.height as f64,
                    ),
                ),
                ("Contents", ObjectSerializer::reference(*content_id, 0)),
                ("Resources", ObjectSerializer::reference(resources_id, 0)),
            ]);
            write_indirect(*page_id, &page_obj, &mut output, &mut xref_offsets);
            let content_obj = Object::Stream {
                dict: content_dict,
                data: bytes::Bytes::from(content_bytes),
            };
            write_indirect(*content_id, &content_obj, &mut output, &mut xref_offsets);
        }

        // Info object
        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", ObjectSerializer::string(title)));
        }
        if let Some(author) = &self.config.author {
            info_entries.push(("Author", ObjectSerializer::string(author)));
        }
        if let Some(subject) = &self.config.subject {
            info_entries.push(("Subject", ObjectSerializer::string(subject)));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", ObjectSerializer::string(creator)));
        }
        let info_obj = ObjectSerializer::dict(info_entries);
        write_indirect(info_id, &info_obj, &mut output, &mut xref_offsets);

        // Cross-reference table
        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", next_id + 1)?;
        writeln!(output, "0000000000 65535 f ")?;

        xref_offsets.sort_by_key(|(id, _)| *id);
        for (_, offset) in &xref_offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        // Trailer
        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer((next_id + 1) as i64)),
            ("Root", ObjectSerializer::reference(catalog_id, 0)),
            ("Info", ObjectSerializer::reference(info_id, 0)),
        ]);
        writeln!(output, "trailer")?;
        output.extend_from_slice(&serializer.serialize(&trailer));
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        Ok(output)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
