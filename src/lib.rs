//! # docpress
//!
//! Business-document PDF generator: turns structured line-item data
//! (invoices, quotes, purchase orders, delivery notes, credit notes,
//! reception certificates) into paginated, styled, print-ready PDF byte
//! buffers.
//!
//! The engine works in top-origin coordinates, threads an immutable
//! [`layout::Cursor`] through every layout step, and drives multi-page
//! item tables through an explicit page-flow state machine that keeps only
//! the terminal page open for trailing content. Branding assets are
//! optional: any missing texture, logo or border strip degrades to a flat
//! visual fallback and the document still renders completely.
//!
//! # Example
//!
//! ```no_run
//! use docpress::{Document, Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default());
//! let doc: Document = serde_json::from_str(r#"{
//!     "kind": "invoice",
//!     "number": "FA-2026-0042",
//!     "date": "2026-03-15",
//!     "client": {"name": "Hôtel Saadien"},
//!     "items": [{"designation": "Table basse", "quantity": 2, "unit_price": 1450}]
//! }"#)?;
//!
//! let bytes = engine.render(&doc)?;
//! std::fs::write(docpress::safe_filename(&doc), bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod documents;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod locale;
pub mod model;
pub mod object;
pub mod text;
pub mod totals;
pub mod writer;

pub use config::{Assets, Color, CompanyIdentity, EngineConfig, Palette, PaginationConfig};
pub use documents::safe_filename;
pub use error::{Error, Result};
pub use locale::{Labels, TextDirection};
pub use model::{Document, DocumentKind, LineItem, Party, TableRow};
pub use totals::TotalsResult;

use writer::AssetStore;

/// The document generation engine.
///
/// Construction loads and decodes the configured branding assets once;
/// after that the engine is immutable and may be shared across threads.
/// Every [`Engine::render`] call builds its own cursor, pagination state
/// and output buffer, so concurrent calls never share mutable state.
pub struct Engine {
    config: EngineConfig,
    assets: AssetStore,
}

impl Engine {
    /// Build an engine for the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        let assets = AssetStore::load(&config.assets);
        Self { config, assets }
    }

    /// The injected configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Render one document into a finished PDF buffer.
    ///
    /// Validation failures surface before anything is drawn; the buffer is
    /// only assembled once every draw operation has succeeded, so the
    /// caller always gets either a complete document or an error.
    pub fn render(&self, doc: &Document) -> Result<Vec<u8>> {
        documents::compose(&self.config, &self.assets, doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
