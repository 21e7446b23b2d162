//! Party/client information box.

use crate::config::EngineConfig;
use crate::geometry::{mm, Rect};
use crate::locale::TextDirection;
use crate::model::Party;
use crate::text::Font;

use super::canvas::{PageCanvas, TextStyle};
use super::cursor::Cursor;

const BOX_WIDTH_MM: f32 = 85.0;
const BOX_HEIGHT_MM: f32 = 28.0;

/// Draw the fixed-size bordered client box anchored at `cursor`.
///
/// Missing fields render as bracketed placeholder text rather than blanks,
/// so the document always looks complete. Returns the cursor below the box.
pub fn draw_party_box(
    canvas: &mut PageCanvas,
    cfg: &EngineConfig,
    party: &Party,
    cursor: Cursor,
) -> Cursor {
    let page = canvas.metrics();
    let palette = &cfg.palette;
    let labels = &cfg.labels;
    let rtl = labels.direction == TextDirection::Rtl;

    let width = mm(BOX_WIDTH_MM);
    let height = mm(BOX_HEIGHT_MM);
    let x = if rtl {
        page.content_left()
    } else {
        page.content_right() - width
    };
    let rect = Rect::new(x, cursor.y(), width, height);

    canvas.rect_filled(rect, palette.row_tint);
    canvas.rect_stroked(rect, palette.border, 0.8);

    let name = party
        .name
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| labels.placeholder_name.clone());
    let address = party
        .address
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| labels.placeholder_address.clone());
    let city = party
        .city
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| labels.placeholder_city.clone());

    let name_style = TextStyle::new(Font::HelveticaBold, 9.5).color(palette.text);
    let line_style = TextStyle::new(Font::Helvetica, 8.5).color(palette.text);
    let muted_style = TextStyle::new(Font::Helvetica, 8.5).color(palette.muted);

    let text_x = rect.x + mm(4.0);
    let mut y = rect.y + mm(7.0);
    canvas.text(&name, text_x, y, &name_style);
    y += mm(5.0);
    canvas.text(&address, text_x, y, &line_style);
    y += mm(5.0);
    canvas.text(&city, text_x, y, &line_style);
    y += mm(5.0);
    if let Some(phone) = party.phone.as_deref().filter(|s| !s.is_empty()) {
        canvas.text(phone, text_x, y, &muted_style);
        y += mm(5.0);
    }
    if let Some(tax_id) = party.tax_id.as_deref().filter(|s| !s.is_empty()) {
        canvas.text(tax_id, text_x, y, &muted_style);
    }

    cursor.advance(height + mm(6.0))
}
