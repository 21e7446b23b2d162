//! Signature block.

use crate::config::EngineConfig;
use crate::geometry::{mm, Rect};
use crate::text::Font;

use super::canvas::{PageCanvas, TextStyle};

/// Total height of the signature block in points.
pub fn signature_height() -> f32 {
    mm(26.0)
}

/// Draw the two side-by-side dashed signature boxes at `y`.
///
/// Not self-clamping: the caller must keep
/// `y + signature_height() <= footer_top - safety margin`.
pub fn draw_signature_block(canvas: &mut PageCanvas, cfg: &EngineConfig, y: f32) {
    let page = canvas.metrics();
    let palette = &cfg.palette;
    let labels = &cfg.labels;

    let gap = mm(10.0);
    let box_w = (page.content_width() - gap) / 2.0;
    let box_h = signature_height() - mm(6.0);
    let label_style = TextStyle::new(Font::Helvetica, 8.0).color(palette.muted);

    let left = Rect::new(page.content_left(), y + mm(6.0), box_w, box_h);
    let right = Rect::new(page.content_left() + box_w + gap, y + mm(6.0), box_w, box_h);

    canvas.text(&labels.signature_company, left.x, y + mm(4.0), &label_style);
    canvas.rect_dashed(left, palette.border, 0.8, 2.0);

    canvas.text(&labels.signature_client, right.x, y + mm(4.0), &label_style);
    canvas.rect_dashed(right, palette.border, 0.8, 2.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::layout::canvas::PageCanvas;

    #[test]
    fn test_two_dashed_boxes_with_labels() {
        let cfg = EngineConfig::default();
        let mut canvas = PageCanvas::new(cfg.page);
        draw_signature_block(&mut canvas, &cfg, 600.0);

        let content =
            String::from_utf8_lossy(&canvas.into_content().build().unwrap()).to_string();
        assert_eq!(content.matches("[2 2] 0 d").count(), 2);
        assert!(content.contains("Cachet et signature"));
        assert!(content.contains("Signature du client"));
    }
}
