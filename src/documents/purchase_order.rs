//! Purchase order composer. The party box holds the supplier.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::layout::pagination::{DocumentHeader, PageFlow};
use crate::layout::party::draw_party_box;
use crate::layout::table::{draw_items_table, TableOptions};
use crate::layout::Cursor;
use crate::model::{Document, TableRow};
use crate::writer::AssetStore;

use super::{draw_note_line, draw_reference_fields, place_signature};

pub(crate) fn compose(
    cfg: &EngineConfig,
    assets: &AssetStore,
    doc: &Document,
) -> Result<Vec<u8>> {
    let labels = &cfg.labels;
    let mut flow = PageFlow::begin(
        cfg,
        assets,
        DocumentHeader {
            label: Some(labels.purchase_order.clone()),
            number: Some(doc.number.clone()),
            date: Some(doc.date_string()),
        },
    );
    let anchors = flow.draw_first_header();

    let mut fields = Vec::new();
    if let Some(reference) = &doc.reference {
        fields.push((labels.reference.clone(), reference.clone()));
    }
    let fields_cursor = draw_reference_fields(&mut flow, &anchors, &fields);
    let party_cursor = {
        let (canvas, cfg, _) = flow.parts();
        draw_party_box(canvas, cfg, &doc.client, Cursor::at(anchors.fields_y))
    };
    let cursor = fields_cursor.max(party_cursor);

    let rows: Vec<TableRow> = doc
        .items
        .iter()
        .map(|item| TableRow::from_item(item, 1.0))
        .collect();
    let outcome = draw_items_table(
        &mut flow,
        cursor,
        &rows,
        &TableOptions {
            tax_rate: doc.tax_rate,
            show_tax: doc.show_tax,
            show_amounts: true,
            document_discount_percent: doc.discount_percent,
            pagination: Some(cfg.pagination),
        },
    )?;

    // No amount-in-words on purchase orders.
    let cursor = draw_note_line(&mut flow, outcome.cursor, doc.notes.as_deref());
    place_signature(&mut flow, cursor);
    flow.finish()
}
