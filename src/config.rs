//! Engine configuration.
//!
//! Everything that used to be ambient (brand colors, company identity,
//! asset locations, pagination capacities) is an explicit immutable value
//! injected at engine construction, so tests run against fixture configs
//! and a second tenant is just a second `EngineConfig`.

use std::path::PathBuf;

use crate::geometry::PageMetrics;
use crate::locale::Labels;

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

impl Color {
    /// Create a color from float components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Pure white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    /// Pure black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
}

/// Brand color palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Primary brand color (headers, title band, texture fallback)
    pub primary: Color,
    /// Accent color (rules, panel highlights)
    pub accent: Color,
    /// Full-page background wash
    pub wash: Color,
    /// Alternating table row tint
    pub row_tint: Color,
    /// Box and frame border color
    pub border: Color,
    /// Body text color
    pub text: Color,
    /// De-emphasized text color (footer, placeholders)
    pub muted: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::from_rgb8(0x5D, 0x40, 0x37),
            accent: Color::from_rgb8(0xB0, 0x89, 0x68),
            wash: Color::from_rgb8(0xFC, 0xFA, 0xF6),
            row_tint: Color::from_rgb8(0xF5, 0xEF, 0xE6),
            border: Color::from_rgb8(0xB0, 0x89, 0x68),
            text: Color::from_rgb8(0x21, 0x21, 0x21),
            muted: Color::from_rgb8(0x75, 0x75, 0x75),
        }
    }
}

/// Company identity block drawn in headers and footers.
#[derive(Debug, Clone)]
pub struct CompanyIdentity {
    /// Company name
    pub name: String,
    /// One-line activity description under the name
    pub activity: String,
    /// Street address
    pub address: String,
    /// Postal code and city
    pub city: String,
    /// Contact phone
    pub phone: String,
    /// Contact email
    pub email: String,
    /// Website shown in the footer
    pub website: String,
    /// Legal identifiers line (registry numbers, tax ids)
    pub legal_line: String,
}

impl Default for CompanyIdentity {
    fn default() -> Self {
        Self {
            name: "MENUISERIE ATLAS".to_string(),
            activity: "Fabrication de meubles & agencement sur mesure".to_string(),
            address: "Zone Industrielle, Lot 42".to_string(),
            city: "20250 Casablanca".to_string(),
            phone: "+212 5 22 45 67 89".to_string(),
            email: "contact@menuiserie-atlas.ma".to_string(),
            website: "www.menuiserie-atlas.ma".to_string(),
            legal_line: "RC 123456 - IF 7891011 - ICE 001234567000089 - Patente 345678"
                .to_string(),
        }
    }
}

/// Filesystem locations of the branding assets.
///
/// Every entry is optional and existence-checked at engine construction;
/// any missing asset degrades to its documented visual fallback.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    /// Header logo image
    pub logo: Option<PathBuf>,
    /// Centered page watermark image
    pub watermark: Option<PathBuf>,
    /// Title band / panel texture image
    pub texture: Option<PathBuf>,
    /// Top border strip
    pub edge_top: Option<PathBuf>,
    /// Bottom border strip
    pub edge_bottom: Option<PathBuf>,
    /// Left border strip
    pub edge_left: Option<PathBuf>,
    /// Right border strip
    pub edge_right: Option<PathBuf>,
}

impl Assets {
    /// The production layout: all assets under `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            logo: Some(dir.join("logo.png")),
            watermark: Some(dir.join("watermark.png")),
            texture: Some(dir.join("texture.jpg")),
            edge_top: Some(dir.join("edge_top.png")),
            edge_bottom: Some(dir.join("edge_bottom.png")),
            edge_left: Some(dir.join("edge_left.png")),
            edge_right: Some(dir.join("edge_right.png")),
        }
    }
}

/// Item-table page capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Items on the first page (header and party box take its top)
    pub max_first: usize,
    /// Items on each continuation page
    pub max_continuation: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        // Continuation capacity leaves room for the totals panel, the
        // amount-in-words trailer and the signature block on the last page.
        Self {
            max_first: 12,
            max_continuation: 18,
        }
    }
}

/// Immutable engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Page geometry
    pub page: PageMetrics,
    /// Company identity block
    pub identity: CompanyIdentity,
    /// Brand palette
    pub palette: Palette,
    /// Branding asset locations
    pub assets: Assets,
    /// Default table page capacities
    pub pagination: PaginationConfig,
    /// Locale label table
    pub labels: Labels,
    /// Compress content streams with FlateDecode
    pub compress: bool,
    /// Watermark opacity
    pub watermark_opacity: f32,
    /// Texture fill opacity
    pub texture_opacity: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page: PageMetrics::a4(12.0),
            identity: CompanyIdentity::default(),
            palette: Palette::default(),
            assets: Assets::in_dir("assets"),
            pagination: PaginationConfig::default(),
            labels: Labels::french(),
            compress: true,
            watermark_opacity: 0.06,
            texture_opacity: 0.85,
        }
    }
}
