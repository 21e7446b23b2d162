//! Branding asset loading.
//!
//! Decodes the texture, logo and border-strip images into raw pixel data
//! ready to embed as PDF image XObjects. Every asset is optional: a missing
//! or unreadable file is logged as a warning and its slot stays empty, and
//! the canvas draws the documented visual fallback instead. Generation
//! never fails because of an asset.

use std::path::{Path, PathBuf};

use crate::config::Assets;

/// Color space of decoded pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Grayscale (1 component per pixel) - used for alpha soft masks
    DeviceGray,
    /// RGB color (3 components per pixel)
    DeviceRGB,
}

impl ColorSpace {
    /// Get the PDF name for this color space.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
        }
    }
}

/// Decoded image data for PDF embedding.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Color space of `data`
    pub color_space: ColorSpace,
    /// Raw pixel data (8 bits per component)
    pub data: Vec<u8>,
    /// Optional alpha channel, embedded as a DeviceGray soft mask
    pub soft_mask: Option<Vec<u8>>,
}

impl ImageData {
    /// Decode a PNG or JPEG byte buffer into raw RGB pixels.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        let mut data = Vec::with_capacity((width * height * 3) as usize);
        let mut mask = Vec::with_capacity((width * height) as usize);
        let mut opaque = true;
        for pixel in rgba.pixels() {
            data.extend_from_slice(&pixel.0[..3]);
            mask.push(pixel.0[3]);
            if pixel.0[3] != 0xFF {
                opaque = false;
            }
        }

        Ok(Self {
            width,
            height,
            color_space: ColorSpace::DeviceRGB,
            data,
            soft_mask: if opaque { None } else { Some(mask) },
        })
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// All branding assets of one engine, loaded once at construction.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    /// Header logo
    pub logo: Option<ImageData>,
    /// Page watermark
    pub watermark: Option<ImageData>,
    /// Band/panel texture
    pub texture: Option<ImageData>,
    /// Top border strip
    pub edge_top: Option<ImageData>,
    /// Bottom border strip
    pub edge_bottom: Option<ImageData>,
    /// Left border strip
    pub edge_left: Option<ImageData>,
    /// Right border strip
    pub edge_right: Option<ImageData>,
}

impl AssetStore {
    /// Load every configured asset, existence-checked, tolerating any
    /// subset missing.
    pub fn load(assets: &Assets) -> Self {
        Self {
            logo: load_slot("logo", &assets.logo),
            watermark: load_slot("watermark", &assets.watermark),
            texture: load_slot("texture", &assets.texture),
            edge_top: load_slot("edge_top", &assets.edge_top),
            edge_bottom: load_slot("edge_bottom", &assets.edge_bottom),
            edge_left: load_slot("edge_left", &assets.edge_left),
            edge_right: load_slot("edge_right", &assets.edge_right),
        }
    }
}

fn load_slot(slot: &str, path: &Option<PathBuf>) -> Option<ImageData> {
    let path = path.as_deref()?;
    if !path.exists() {
        log::warn!(
            "asset '{}' not found at {}; using visual fallback",
            slot,
            path.display()
        );
        return None;
    }
    match read_and_decode(path) {
        Ok(image) => Some(image),
        Err(reason) => {
            log::warn!(
                "asset '{}' at {} is unreadable ({}); using visual fallback",
                slot,
                path.display(),
                reason
            );
            None
        }
    }
}

fn read_and_decode(path: &Path) -> Result<ImageData, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    ImageData::decode(&bytes).map_err(|e| e.to_string())
}
