//! Item table renderer and its pagination driver.
//!
//! Renders N line items as a banded table, splitting across physical pages
//! through the [`PageFlow`] state machine when a pagination config is given
//! and the items exceed the first page's capacity. Row numbering is
//! continuous across pages: the printed index is the global item index plus
//! one and never resets.

use crate::config::{Color, EngineConfig, PaginationConfig};
use crate::error::Result;
use crate::geometry::{mm, Point, Rect};
use crate::locale::TextDirection;
use crate::model::TableRow;
use crate::text::{format_amount, format_quantity, Font};
use crate::totals::{compute_totals, TotalsResult};

use super::canvas::{PageCanvas, TextStyle};
use super::cursor::Cursor;
use super::pagination::{PageFlow, PaginationPlan};

/// Knobs a composer sets per document type.
#[derive(Debug, Clone, Copy)]
pub struct TableOptions {
    /// Tax rate as a fraction
    pub tax_rate: f64,
    /// Draw the tax row; when false an explicit note is drawn instead
    pub show_tax: bool,
    /// Draw price columns and the totals panel (false for delivery notes)
    pub show_amounts: bool,
    /// Document-level discount percent, applied once to the subtotal
    pub document_discount_percent: Option<f64>,
    /// Split across pages under these capacities; `None` keeps one page
    pub pagination: Option<PaginationConfig>,
}

/// What the table hands back to the composer.
#[derive(Debug, Clone, Copy)]
pub struct TableOutcome {
    /// Cursor below the table (and totals panel, when drawn)
    pub cursor: Cursor,
    /// The computed totals
    pub totals: TotalsResult,
}

/// Horizontal alignment inside a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellAlign {
    Left,
    Center,
    Right,
}

struct Column {
    x: f32,
    width: f32,
    align: CellAlign,
    label: String,
}

fn row_height() -> f32 {
    mm(8.0)
}

fn band_height() -> f32 {
    mm(8.0)
}

/// Draw the item table at `cursor`; may spawn additional physical pages.
pub fn draw_items_table(
    flow: &mut PageFlow<'_>,
    cursor: Cursor,
    rows: &[TableRow],
    opts: &TableOptions,
) -> Result<TableOutcome> {
    let totals = compute_totals(
        rows,
        opts.tax_rate,
        opts.show_tax,
        opts.document_discount_percent,
    );
    let columns = column_layout(flow.config(), opts.show_amounts);

    let plan = match opts.pagination {
        Some(config) if rows.len() > config.max_first => {
            Some(PaginationPlan::new(rows.len(), config)?)
        }
        _ => None,
    };

    let mut cur = cursor;
    match plan {
        None => {
            cur = draw_band(flow, &columns, cur);
            for (index, row) in rows.iter().enumerate() {
                draw_row(flow, &columns, row, index, cur, opts.show_amounts);
                cur = cur.advance(row_height());
            }
            flow.await_trailer();
        }
        Some(plan) => {
            let total_pages = plan.total_pages();
            log::debug!("table of {} items spans {} pages", rows.len(), total_pages);
            for page in 0..total_pages {
                if page > 0 {
                    let anchors = flow.start_continuation(total_pages);
                    cur = Cursor::at(anchors.fields_y);
                }
                cur = draw_band(flow, &columns, cur);
                for index in plan.slice(page) {
                    draw_row(flow, &columns, &rows[index], index, cur, opts.show_amounts);
                    cur = cur.advance(row_height());
                }
                if !plan.is_last(page) {
                    flow.finalize_page();
                }
            }
            flow.await_trailer();
        }
    }

    cur = cur.advance(mm(3.0));
    if opts.show_amounts {
        cur = draw_totals_panel(flow, cur, &totals, opts.show_tax);
    }
    Ok(TableOutcome {
        cursor: cur,
        totals,
    })
}

/// Column geometry for the current locale and column set.
fn column_layout(cfg: &EngineConfig, show_amounts: bool) -> Vec<Column> {
    let labels = &cfg.labels;
    let specs: Vec<(f32, CellAlign, &str)> = if show_amounts {
        vec![
            (0.07, CellAlign::Center, labels.col_index.as_str()),
            (0.41, CellAlign::Left, labels.col_designation.as_str()),
            (0.10, CellAlign::Right, labels.col_quantity.as_str()),
            (0.10, CellAlign::Center, labels.col_unit.as_str()),
            (0.16, CellAlign::Right, labels.col_unit_price.as_str()),
            (0.16, CellAlign::Right, labels.col_amount.as_str()),
        ]
    } else {
        vec![
            (0.10, CellAlign::Center, labels.col_index.as_str()),
            (0.60, CellAlign::Left, labels.col_designation.as_str()),
            (0.15, CellAlign::Right, labels.col_quantity.as_str()),
            (0.15, CellAlign::Center, labels.col_unit.as_str()),
        ]
    };

    let mut ordered = specs;
    if labels.direction == TextDirection::Rtl {
        ordered.reverse();
    }

    let page = &cfg.page;
    let mut x = page.content_left();
    ordered
        .into_iter()
        .map(|(fraction, align, label)| {
            let width = page.content_width() * fraction;
            let column = Column {
                x,
                width,
                align,
                label: label.to_string(),
            };
            x += width;
            column
        })
        .collect()
}

/// Draw the textured header band; returns the cursor below it.
fn draw_band(flow: &mut PageFlow<'_>, columns: &[Column], cursor: Cursor) -> Cursor {
    let (canvas, cfg, res) = flow.parts();
    let page = canvas.metrics();
    let band = Rect::new(
        page.content_left(),
        cursor.y(),
        page.content_width(),
        band_height(),
    );
    canvas.fill_texture(
        band,
        res.texture.as_ref(),
        res.texture_gs.as_deref(),
        cfg.palette.primary,
    );

    let style = TextStyle::new(Font::HelveticaBold, 8.5).color(Color::WHITE);
    let baseline = cursor.y() + mm(5.5);
    for column in columns {
        draw_cell(canvas, &column.label, column, baseline, &style);
    }
    cursor.advance(band_height())
}

/// Draw one item row at `cursor`.
fn draw_row(
    flow: &mut PageFlow<'_>,
    columns: &[Column],
    row: &TableRow,
    index: usize,
    cursor: Cursor,
    show_amounts: bool,
) {
    let (canvas, cfg, _) = flow.parts();
    let page = canvas.metrics();
    let palette = &cfg.palette;
    let rect = Rect::new(
        page.content_left(),
        cursor.y(),
        page.content_width(),
        row_height(),
    );
    if index % 2 == 1 {
        canvas.rect_filled(rect, palette.row_tint);
    }
    canvas.line(
        Point::new(rect.left(), rect.bottom()),
        Point::new(rect.right(), rect.bottom()),
        palette.border,
        0.3,
    );

    let style = TextStyle::new(Font::Helvetica, 8.5).color(palette.text);
    let baseline = cursor.y() + mm(5.5);

    // Continuous numbering: global item index + 1, never reset per page.
    let number = (index + 1).to_string();
    let mut cells: Vec<String> = vec![
        number,
        row.description.clone(),
        format_quantity(row.quantity),
        row.unit.clone(),
    ];
    if show_amounts {
        cells.push(format_amount(row.unit_price));
        cells.push(format_amount(row.amount()));
    }
    if cfg.labels.direction == TextDirection::Rtl {
        cells.reverse();
    }

    for (column, cell) in columns.iter().zip(&cells) {
        let text = truncated(cell, &style, column.width - mm(3.0));
        draw_cell(canvas, &text, column, baseline, &style);
    }
}

fn draw_cell(canvas: &mut PageCanvas, text: &str, column: &Column, y: f32, style: &TextStyle) {
    match column.align {
        CellAlign::Left => canvas.text(text, column.x + mm(1.5), y, style),
        CellAlign::Center => canvas.text_centered(text, column.x + column.width / 2.0, y, style),
        CellAlign::Right => canvas.text_right(text, column.x + column.width - mm(1.5), y, style),
    }
}

/// Shorten `text` with an ellipsis so it fits `max_width`.
fn truncated(text: &str, style: &TextStyle, max_width: f32) -> String {
    if style.width(text) <= max_width {
        return text.to_string();
    }
    let ellipsis = "...";
    let mut kept = String::new();
    for ch in text.chars() {
        let mut candidate = kept.clone();
        candidate.push(ch);
        candidate.push_str(ellipsis);
        if style.width(&candidate) > max_width {
            break;
        }
        kept.push(ch);
    }
    kept.push_str(ellipsis);
    kept
}

/// Draw the totals panel to the reading-end side; returns the cursor below.
fn draw_totals_panel(
    flow: &mut PageFlow<'_>,
    cursor: Cursor,
    totals: &TotalsResult,
    show_tax: bool,
) -> Cursor {
    let (canvas, cfg, res) = flow.parts();
    let page = canvas.metrics();
    let palette = &cfg.palette;
    let labels = &cfg.labels;
    let rtl = labels.direction == TextDirection::Rtl;

    let width = mm(70.0);
    let line_h = mm(7.0);
    let x = if rtl {
        page.content_left()
    } else {
        page.content_right() - width
    };

    let label_style = TextStyle::new(Font::Helvetica, 9.0).color(palette.text);
    let value_style = TextStyle::new(Font::Helvetica, 9.0).color(palette.text);
    let note_style = TextStyle::new(Font::HelveticaOblique, 8.0).color(palette.muted);
    let grand_style = TextStyle::new(Font::HelveticaBold, 9.5).color(Color::WHITE);

    let mut y = cursor.y();

    // Subtotal row, always present.
    let subtotal_rect = Rect::new(x, y, width, line_h);
    canvas.rect_filled(subtotal_rect, palette.row_tint);
    canvas.text(&labels.subtotal, x + mm(2.0), y + mm(5.0), &label_style);
    canvas.text_right(
        &format_amount(totals.subtotal),
        x + width - mm(2.0),
        y + mm(5.0),
        &value_style,
    );
    y += line_h;

    // Tax row, or the explicit note so a disabled tax never reads as a
    // rendering bug.
    if show_tax {
        canvas.text(&labels.tax, x + mm(2.0), y + mm(5.0), &label_style);
        canvas.text_right(
            &format_amount(totals.tax_amount),
            x + width - mm(2.0),
            y + mm(5.0),
            &value_style,
        );
    } else {
        canvas.text(&labels.tax_not_applicable, x + mm(2.0), y + mm(5.0), &note_style);
    }
    y += line_h;

    // Grand total band.
    let grand_rect = Rect::new(x, y, width, line_h);
    canvas.fill_texture(
        grand_rect,
        res.texture.as_ref(),
        res.texture_gs.as_deref(),
        palette.primary,
    );
    canvas.text(&labels.grand_total, x + mm(2.0), y + mm(5.0), &grand_style);
    canvas.text_right(
        &format_amount(totals.grand_total),
        x + width - mm(2.0),
        y + mm(5.0),
        &grand_style,
    );
    y += line_h;

    canvas.rect_stroked(Rect::new(x, cursor.y(), width, y - cursor.y()), palette.border, 0.8);

    cursor.advance(y - cursor.y() + mm(2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::pagination::DocumentHeader;
    use crate::writer::AssetStore;

    // Fractional quantity so quantity cells never collide with the printed
    // row numbers in the assertions below.
    fn rows(n: usize) -> Vec<TableRow> {
        (0..n)
            .map(|i| TableRow {
                description: format!("Article {}", i + 1),
                quantity: 1.5,
                unit_price: 100.0,
                unit: "u".to_string(),
            })
            .collect()
    }

    fn options(pagination: Option<PaginationConfig>) -> TableOptions {
        TableOptions {
            tax_rate: 0.20,
            show_tax: true,
            show_amounts: true,
            document_discount_percent: None,
            pagination,
        }
    }

    fn render(n: usize, pagination: Option<PaginationConfig>) -> (Vec<u8>, TotalsResult) {
        let cfg = EngineConfig::default();
        let assets = AssetStore::default();
        let mut flow = PageFlow::begin(&cfg, &assets, DocumentHeader::default());
        let outcome =
            draw_items_table(&mut flow, Cursor::at(200.0), &rows(n), &options(pagination))
                .unwrap();
        let totals = outcome.totals;
        (flow.finish().unwrap(), totals)
    }

    #[test]
    fn test_single_page_when_items_fit() {
        let config = PaginationConfig {
            max_first: 12,
            max_continuation: 22,
        };
        let (bytes, totals) = render(12, Some(config));
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/Count 1"));
        assert!((totals.grand_total - 12.0 * 150.0 * 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_one_item_overflow_makes_two_pages() {
        let config = PaginationConfig {
            max_first: 12,
            max_continuation: 22,
        };
        let (bytes, _) = render(13, Some(config));
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/Count 2"));
    }

    #[test]
    fn test_three_page_table() {
        let config = PaginationConfig {
            max_first: 12,
            max_continuation: 22,
        };
        // 12 + 22 + 1
        let (bytes, _) = render(35, Some(config));
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/Count 3"));
    }

    #[test]
    fn test_no_pagination_config_keeps_one_page() {
        let (bytes, _) = render(30, None);
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/Count 1"));
    }

    #[test]
    fn test_row_numbering_is_continuous() {
        let cfg = EngineConfig {
            compress: false,
            ..EngineConfig::default()
        };
        let assets = AssetStore::default();
        let mut flow = PageFlow::begin(&cfg, &assets, DocumentHeader::default());
        let config = PaginationConfig {
            max_first: 3,
            max_continuation: 4,
        };
        draw_items_table(
            &mut flow,
            Cursor::at(200.0),
            &rows(9),
            &options(Some(config)),
        )
        .unwrap();
        let bytes = flow.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        // every row number printed exactly once, across all three pages
        for number in 1..=9 {
            let needle = format!("({}) Tj", number);
            assert_eq!(content.matches(&needle).count(), 1, "row {}", number);
        }
    }

    #[test]
    fn test_tax_note_when_tax_disabled() {
        let cfg = EngineConfig {
            compress: false,
            ..EngineConfig::default()
        };
        let assets = AssetStore::default();
        let mut flow = PageFlow::begin(&cfg, &assets, DocumentHeader::default());
        let opts = TableOptions {
            show_tax: false,
            ..options(None)
        };
        let outcome = draw_items_table(&mut flow, Cursor::at(200.0), &rows(2), &opts).unwrap();
        assert_eq!(outcome.totals.tax_amount, 0.0);

        let bytes = flow.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("TVA non applicable"));
    }

    #[test]
    fn test_truncated_fits_and_keeps_short_text() {
        let style = TextStyle::new(Font::Helvetica, 8.5);
        assert_eq!(truncated("court", &style, 200.0), "court");

        let long = "Un plan de travail en chêne massif avec chants plaqués et finition \
                    huilée, découpe sur mesure";
        let cut = truncated(long, &style, 100.0);
        assert!(cut.ends_with("..."));
        assert!(style.width(&cut) <= 100.0);
    }

    #[test]
    fn test_outcome_cursor_is_below_input() {
        let cfg = EngineConfig::default();
        let assets = AssetStore::default();
        let mut flow = PageFlow::begin(&cfg, &assets, DocumentHeader::default());
        let start = Cursor::at(200.0);
        let outcome = draw_items_table(&mut flow, start, &rows(3), &options(None)).unwrap();
        assert!(outcome.cursor.y() > start.y() + 3.0 * row_height());
        flow.finish().unwrap();
    }
}
