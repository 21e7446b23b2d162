//! Blank letterhead composer: branding, footer and border frame only.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::layout::pagination::{DocumentHeader, PageFlow};
use crate::model::Document;
use crate::writer::AssetStore;

pub(crate) fn compose(
    cfg: &EngineConfig,
    assets: &AssetStore,
    _doc: &Document,
) -> Result<Vec<u8>> {
    let mut flow = PageFlow::begin(cfg, assets, DocumentHeader::default());
    flow.draw_first_header();
    flow.finish()
}
