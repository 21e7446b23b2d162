//! Integration tests for end-to-end document generation.
//!
//! Exercises the complete pipeline: validation, header/party/table layout,
//! multi-page pagination, totals, and final buffer assembly, with and
//! without branding assets on disk.

use chrono::NaiveDate;
use docpress::{
    Assets, Document, DocumentKind, Engine, EngineConfig, Error, LineItem, Party,
};

/// Helper to build a renderable document with `items` line items.
fn document(kind: DocumentKind, items: usize) -> Document {
    Document {
        kind,
        number: "FA-2026-0042".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        client: Party {
            name: Some("Hôtel Saadien".to_string()),
            address: Some("12 rue des Orangers".to_string()),
            city: Some("Marrakech".to_string()),
            phone: None,
            tax_id: None,
        },
        items: (0..items)
            .map(|i| LineItem {
                designation: format!("Panneau mélaminé {}", i + 1),
                quantity: 2.0,
                unit: Some("m²".to_string()),
                unit_price: 240.0,
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

/// Engine with no assets on disk at all: everything falls back.
fn engine_without_assets() -> Engine {
    let _ = env_logger::builder().is_test(true).try_init();
    Engine::new(EngineConfig {
        assets: Assets::default(),
        ..EngineConfig::default()
    })
}

fn page_count(bytes: &[u8]) -> usize {
    let content = String::from_utf8_lossy(bytes);
    let marker = "/Count ";
    let start = content.find(marker).expect("no page tree") + marker.len();
    content[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap()
}

#[test]
fn test_invoice_renders_complete_buffer() {
    let engine = engine_without_assets();
    let bytes = engine.render(&document(DocumentKind::Invoice, 3)).unwrap();

    assert!(bytes.starts_with(b"%PDF-1.7"));
    assert!(bytes.ends_with(b"%%EOF"));
    assert_eq!(page_count(&bytes), 1);
}

#[test]
fn test_every_document_kind_renders() {
    let engine = engine_without_assets();
    for kind in [
        DocumentKind::Invoice,
        DocumentKind::Quote,
        DocumentKind::PurchaseOrder,
        DocumentKind::DeliveryNote,
        DocumentKind::CreditNote,
        DocumentKind::ReceptionCertificate,
        DocumentKind::Letterhead,
    ] {
        let bytes = engine.render(&document(kind, 4)).unwrap();
        assert!(bytes.starts_with(b"%PDF-"), "{:?}", kind);
        assert!(!bytes.is_empty(), "{:?}", kind);
    }
}

#[test]
fn test_item_count_drives_page_count() {
    let engine = engine_without_assets();
    let max_first = engine.config().pagination.max_first;
    let max_cont = engine.config().pagination.max_continuation;

    // Exactly the first page's capacity stays on one page.
    let bytes = engine
        .render(&document(DocumentKind::Invoice, max_first))
        .unwrap();
    assert_eq!(page_count(&bytes), 1);

    // One more item spills exactly one row onto a second page.
    let bytes = engine
        .render(&document(DocumentKind::Invoice, max_first + 1))
        .unwrap();
    assert_eq!(page_count(&bytes), 2);

    // Filling the continuation page still fits in two pages.
    let bytes = engine
        .render(&document(DocumentKind::Invoice, max_first + max_cont))
        .unwrap();
    assert_eq!(page_count(&bytes), 2);

    // And one more spills to a third.
    let bytes = engine
        .render(&document(DocumentKind::Invoice, max_first + max_cont + 1))
        .unwrap();
    assert_eq!(page_count(&bytes), 3);
}

#[test]
fn test_empty_items_rejected_without_output() {
    let engine = engine_without_assets();
    let result = engine.render(&document(DocumentKind::Invoice, 0));
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_missing_client_rejected_without_output() {
    let engine = engine_without_assets();
    let mut doc = document(DocumentKind::Quote, 3);
    doc.client = Party::default();
    let result = engine.render(&doc);
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_letterhead_needs_no_client_or_items() {
    let engine = engine_without_assets();
    let mut doc = document(DocumentKind::Letterhead, 0);
    doc.client = Party::default();
    doc.number = String::new();
    let bytes = engine.render(&doc).unwrap();
    assert_eq!(page_count(&bytes), 1);
}

#[test]
fn test_missing_texture_still_renders_page_correct_buffer() {
    // Point the config at asset paths that do not exist: generation must
    // succeed with flat fallbacks and the same page arithmetic.
    let dir = tempfile::tempdir().unwrap();
    let engine = Engine::new(EngineConfig {
        assets: Assets::in_dir(dir.path().join("nothing-here")),
        ..EngineConfig::default()
    });

    let max_first = engine.config().pagination.max_first;
    let bytes = engine
        .render(&document(DocumentKind::Invoice, max_first + 1))
        .unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(page_count(&bytes), 2);
}

#[test]
fn test_present_assets_are_embedded() {
    // A real logo on disk becomes an image XObject in the output.
    let dir = tempfile::tempdir().unwrap();
    let logo_path = dir.path().join("logo.png");
    let mut img = image::RgbaImage::new(4, 4);
    for p in img.pixels_mut() {
        *p = image::Rgba([90, 60, 40, 255]);
    }
    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .unwrap();
    std::fs::write(&logo_path, png).unwrap();

    let engine = Engine::new(EngineConfig {
        assets: Assets {
            logo: Some(logo_path),
            ..Assets::default()
        },
        ..EngineConfig::default()
    });
    let bytes = engine.render(&document(DocumentKind::Invoice, 2)).unwrap();
    let content = String::from_utf8_lossy(&bytes);
    assert!(content.contains("/Subtype /Image"));
    assert!(content.contains("/Im1 Do") || content.contains("/XObject"));
}

#[test]
fn test_credit_note_totals_negate_invoice_totals() {
    // Rendered through the public API both ways; the amounts land in the
    // content streams, so compare through the totals calculator instead.
    use docpress::totals::compute_totals;
    use docpress::TableRow;

    let doc = document(DocumentKind::Invoice, 5);
    let invoice_rows: Vec<TableRow> = doc
        .items
        .iter()
        .map(|i| TableRow::from_item(i, 1.0))
        .collect();
    let credit_rows: Vec<TableRow> = doc
        .items
        .iter()
        .map(|i| TableRow::from_item(i, -1.0))
        .collect();

    let invoice = compute_totals(&invoice_rows, doc.tax_rate, true, None);
    let credit = compute_totals(&credit_rows, doc.tax_rate, true, None);
    assert!((invoice.grand_total + credit.grand_total).abs() < 1e-9);

    // Both documents still render.
    let engine = engine_without_assets();
    engine.render(&doc).unwrap();
    let mut credit_doc = document(DocumentKind::CreditNote, 5);
    credit_doc.reference = Some("FA-2026-0042".to_string());
    engine.render(&credit_doc).unwrap();
}

#[test]
fn test_uncompressed_output_contains_visible_content() {
    let engine = Engine::new(EngineConfig {
        assets: Assets::default(),
        compress: false,
        ..EngineConfig::default()
    });
    let mut doc = document(DocumentKind::Invoice, 2);
    doc.notes = Some("Livraison prévue semaine 14".to_string());
    let bytes = engine.render(&doc).unwrap();
    let content = String::from_utf8_lossy(&bytes);

    assert!(content.contains("FACTURE"));
    assert!(content.contains("FA-2026-0042"));
    assert!(content.contains("15/03/2026"));
    assert!(content.contains("Saadien"));
    // the amount-in-words trailer is present
    assert!(content.contains("Dirhams"));
    assert!(content.contains("Livraison"));
}

#[test]
fn test_filename_derivation() {
    let mut doc = document(DocumentKind::DeliveryNote, 1);
    doc.number = "BL 2026/07".to_string();
    assert_eq!(docpress::safe_filename(&doc), "bon-livraison-BL_2026_07.pdf");
}
