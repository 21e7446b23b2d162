//! Document composers.
//!
//! One thin module per business document type; each validates its input,
//! then sequences the layout engine in the same fixed order: header,
//! reference fields, party box, item table (which may spawn continuation
//! pages), totals and amount in words, notes, signature block, and finally
//! the footer and border frame drawn by the flow on the terminal page.

mod credit_note;
mod delivery_note;
mod invoice;
mod letterhead;
mod purchase_order;
mod quote;
mod reception;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::geometry::mm;
use crate::layout::canvas::TextStyle;
use crate::layout::cursor::Cursor;
use crate::layout::header::{footer_top, HeaderAnchors};
use crate::layout::pagination::PageFlow;
use crate::layout::signature::{draw_signature_block, signature_height};
use crate::model::{Document, DocumentKind};
use crate::text::{amount_in_words, Font};
use crate::writer::AssetStore;

/// Render `doc` into a finished PDF buffer.
pub(crate) fn compose(
    cfg: &EngineConfig,
    assets: &AssetStore,
    doc: &Document,
) -> Result<Vec<u8>> {
    validate(doc)?;
    match doc.kind {
        DocumentKind::Invoice => invoice::compose(cfg, assets, doc),
        DocumentKind::Quote => quote::compose(cfg, assets, doc),
        DocumentKind::PurchaseOrder => purchase_order::compose(cfg, assets, doc),
        DocumentKind::DeliveryNote => delivery_note::compose(cfg, assets, doc),
        DocumentKind::CreditNote => credit_note::compose(cfg, assets, doc),
        DocumentKind::ReceptionCertificate => reception::compose(cfg, assets, doc),
        DocumentKind::Letterhead => letterhead::compose(cfg, assets, doc),
    }
}

/// Reject unrenderable documents before anything is drawn.
fn validate(doc: &Document) -> Result<()> {
    if doc.kind == DocumentKind::Letterhead {
        return Ok(());
    }
    if doc.number.trim().is_empty() {
        return Err(Error::Validation("document number is missing".to_string()));
    }
    if doc.client.is_empty() {
        return Err(Error::Validation("client is missing".to_string()));
    }
    if doc.items.is_empty() {
        return Err(Error::Validation("items are empty".to_string()));
    }
    Ok(())
}

/// Derive the download filename: `kind-number.pdf` with filesystem-unsafe
/// characters replaced.
pub fn safe_filename(doc: &Document) -> String {
    let raw = format!("{}-{}", doc.kind.slug(), doc.number);
    let safe: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.pdf", safe)
}

/// Draw `label: value` reference lines in the zone below the header.
///
/// Mirrored to the right edge for RTL locales, opposite the party box.
fn draw_reference_fields(
    flow: &mut PageFlow<'_>,
    anchors: &HeaderAnchors,
    fields: &[(String, String)],
) -> Cursor {
    let (canvas, cfg, _) = flow.parts();
    let rtl = cfg.labels.direction == crate::locale::TextDirection::Rtl;
    let label_style = TextStyle::new(Font::HelveticaBold, 9.0).color(cfg.palette.text);
    let value_style = TextStyle::new(Font::Helvetica, 9.0).color(cfg.palette.text);

    let mut cursor = Cursor::at(anchors.fields_y);
    for (label, value) in fields {
        let y = cursor.y() + mm(4.0);
        let label = format!("{} :", label);
        if rtl {
            let right = cfg.page.content_right();
            canvas.text_right(value, right, y, &value_style);
            let offset = value_style.width(value) + mm(2.0);
            canvas.text_right(&label, right - offset, y, &label_style);
        } else {
            canvas.text(&label, anchors.left_x, y, &label_style);
            let offset = label_style.width(&label) + mm(2.0);
            canvas.text(value, anchors.left_x + offset, y, &value_style);
        }
        cursor = cursor.advance(mm(5.5));
    }
    cursor.advance(mm(2.0))
}

/// Draw the amount-in-words sentence below the totals panel.
fn draw_amount_words(flow: &mut PageFlow<'_>, cursor: Cursor, amount: f64) -> Cursor {
    let (canvas, cfg, _) = flow.parts();
    let prefix_style = TextStyle::new(Font::Helvetica, 8.5).color(cfg.palette.text);
    let words_style = TextStyle::new(Font::HelveticaOblique, 8.5).color(cfg.palette.text);

    let x = cfg.page.content_left();
    canvas.text(&cfg.labels.amount_prefix, x, cursor.y() + mm(4.0), &prefix_style);
    // Credit notes pass the absolute value; wording is never negative.
    canvas.text(
        &amount_in_words(amount.abs()),
        x,
        cursor.y() + mm(9.0),
        &words_style,
    );
    cursor.advance(mm(11.0))
}

/// Draw a free-form note paragraph (single line, as supplied).
fn draw_note_line(flow: &mut PageFlow<'_>, cursor: Cursor, note: Option<&str>) -> Cursor {
    let note = match note.filter(|n| !n.trim().is_empty()) {
        Some(note) => note,
        None => return cursor,
    };
    let (canvas, cfg, _) = flow.parts();
    let style = TextStyle::new(Font::HelveticaOblique, 8.0).color(cfg.palette.muted);
    canvas.text(note, cfg.page.content_left(), cursor.y() + mm(4.0), &style);
    cursor.advance(mm(6.0))
}

/// Place the signature block: bottom-anchored above the footer, pushed down
/// past `cursor` when the content reaches deeper.
///
/// Keeping `y + signature_height()` above the footer is the composer's
/// responsibility; the block does not clamp itself.
fn place_signature(flow: &mut PageFlow<'_>, cursor: Cursor) {
    let (canvas, cfg, _) = flow.parts();
    let preferred = footer_top(&cfg.page) - signature_height() - mm(4.0);
    let y = cursor.y().max(preferred);
    draw_signature_block(canvas, cfg, y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, Party};
    use chrono::NaiveDate;

    pub(super) fn base_doc(kind: DocumentKind, items: usize) -> Document {
        Document {
            kind,
            number: "FA-2026-0042".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            client: Party {
                name: Some("Hôtel Saadien".to_string()),
                address: Some("12 rue des Orangers".to_string()),
                city: Some("Marrakech".to_string()),
                ..Party::default()
            },
            items: (0..items)
                .map(|i| LineItem {
                    designation: format!("Article {}", i + 1),
                    quantity: 2.0,
                    unit: Some("u".to_string()),
                    unit_price: 150.0,
                    discount_percent: None,
                })
                .collect(),
            tax_rate: 0.20,
            show_tax: true,
            discount_percent: None,
            due_date: None,
            reference: None,
            notes: None,
        }
    }

    #[test]
    fn test_validate_rejects_empty_items() {
        let doc = base_doc(DocumentKind::Invoice, 0);
        assert!(matches!(validate(&doc), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_missing_client() {
        let mut doc = base_doc(DocumentKind::Invoice, 2);
        doc.client = Party::default();
        assert!(matches!(validate(&doc), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_blank_number() {
        let mut doc = base_doc(DocumentKind::Quote, 2);
        doc.number = "  ".to_string();
        assert!(matches!(validate(&doc), Err(Error::Validation(_))));
    }

    #[test]
    fn test_letterhead_skips_validation() {
        let mut doc = base_doc(DocumentKind::Letterhead, 0);
        doc.number = String::new();
        doc.client = Party::default();
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn test_safe_filename_replaces_unsafe_characters() {
        let mut doc = base_doc(DocumentKind::Invoice, 1);
        doc.number = "FA/2026 N°42".to_string();
        assert_eq!(safe_filename(&doc), "facture-FA_2026_N_42.pdf");
    }
}
