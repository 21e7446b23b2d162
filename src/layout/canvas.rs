//! Drawing surface for one page.
//!
//! [`PageCanvas`] exposes the engine's primitive drawing operations in
//! top-origin coordinates and converts to PDF's bottom-up space at the
//! content-stream seam. Every asset-backed primitive tolerates its asset
//! being absent and falls back to a flat rendition, so generation always
//! completes.

use crate::config::{Color, Palette};
use crate::geometry::{mm, PageMetrics, Point, Rect};
use crate::text::{text_width, Font};
use crate::writer::ContentStreamBuilder;

/// Font, size and color of one run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font face
    pub font: Font,
    /// Size in points
    pub size: f32,
    /// Fill color
    pub color: Color,
}

impl TextStyle {
    /// Black text in the given font and size.
    pub fn new(font: Font, size: f32) -> Self {
        Self {
            font,
            size,
            color: Color::BLACK,
        }
    }

    /// Same style with another color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Measured width of `text` in this style.
    pub fn width(&self, text: &str) -> f32 {
        text_width(text, self.font, self.size)
    }
}

/// An image XObject registered with the writer, with its pixel dimensions.
#[derive(Debug, Clone)]
pub struct ImageRes {
    /// XObject resource id ("Im1")
    pub id: String,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
}

impl ImageRes {
    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// The per-document registrations every page of a flow shares.
#[derive(Debug, Clone, Default)]
pub struct PageResources {
    /// Header logo
    pub logo: Option<ImageRes>,
    /// Centered page watermark
    pub watermark: Option<ImageRes>,
    /// Band/panel texture
    pub texture: Option<ImageRes>,
    /// Border strips: top, bottom, left, right
    pub edge_top: Option<ImageRes>,
    /// Bottom strip
    pub edge_bottom: Option<ImageRes>,
    /// Left strip
    pub edge_left: Option<ImageRes>,
    /// Right strip
    pub edge_right: Option<ImageRes>,
    /// Graphics state for the watermark opacity
    pub watermark_gs: Option<String>,
    /// Graphics state for the texture opacity
    pub texture_gs: Option<String>,
}

/// Drawing surface for one physical page.
pub struct PageCanvas {
    metrics: PageMetrics,
    content: ContentStreamBuilder,
}

impl PageCanvas {
    /// A blank page surface.
    pub fn new(metrics: PageMetrics) -> Self {
        Self {
            metrics,
            content: ContentStreamBuilder::new(),
        }
    }

    /// The page geometry.
    pub fn metrics(&self) -> PageMetrics {
        self.metrics
    }

    /// Finish the page and hand its content stream to the writer.
    pub fn into_content(mut self) -> ContentStreamBuilder {
        self.content.end_text();
        self.content
    }

    /// Emit the rectangle in PDF space.
    fn pdf_rect(&mut self, rect: Rect) {
        let y = self.metrics.flip_y(rect.bottom());
        self.content.rect(rect.x, y, rect.width, rect.height);
    }

    /// Draw `text` with its baseline at top-origin `y`, left edge at `x`.
    pub fn text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.content.fill_color(style.color);
        self.content
            .set_font(style.font.resource_name(), style.size);
        self.content.text(text, x, self.metrics.flip_y(y));
    }

    /// Draw `text` ending at `right_x`.
    pub fn text_right(&mut self, text: &str, right_x: f32, y: f32, style: &TextStyle) {
        let x = right_x - style.width(text);
        self.text(text, x, y, style);
    }

    /// Draw `text` centered on `center_x`.
    pub fn text_centered(&mut self, text: &str, center_x: f32, y: f32, style: &TextStyle) {
        let x = center_x - style.width(text) / 2.0;
        self.text(text, x, y, style);
    }

    /// Fill a rectangle.
    pub fn rect_filled(&mut self, rect: Rect, color: Color) {
        self.content.end_text();
        self.content.fill_color(color);
        self.pdf_rect(rect);
        self.content.fill();
    }

    /// Stroke a rectangle outline.
    pub fn rect_stroked(&mut self, rect: Rect, color: Color, line_width: f32) {
        self.content.end_text();
        self.content.stroke_color(color);
        self.content.set_line_width(line_width);
        self.pdf_rect(rect);
        self.content.stroke();
    }

    /// Stroke a dashed rectangle outline.
    pub fn rect_dashed(&mut self, rect: Rect, color: Color, line_width: f32, dash: f32) {
        self.content.end_text();
        self.content.stroke_color(color);
        self.content.set_line_width(line_width);
        self.content.set_dash_pattern(vec![dash, dash], 0.0);
        self.pdf_rect(rect);
        self.content.stroke();
        self.content.set_solid_line();
    }

    /// Stroke a straight line between two points.
    pub fn line(&mut self, from: Point, to: Point, color: Color, line_width: f32) {
        self.content.end_text();
        self.content.stroke_color(color);
        self.content.set_line_width(line_width);
        self.content
            .move_to(from.x, self.metrics.flip_y(from.y))
            .line_to(to.x, self.metrics.flip_y(to.y))
            .stroke();
    }

    /// Tint the whole page. Drawn first, under everything else.
    pub fn wash(&mut self, color: Color) {
        self.rect_filled(self.metrics.page_rect(), color);
    }

    /// Paint an image stretched over `rect`.
    pub fn draw_image(&mut self, res: &ImageRes, rect: Rect) {
        let y = self.metrics.flip_y(rect.bottom());
        self.content
            .draw_image(&res.id, rect.x, y, rect.width, rect.height);
    }

    /// Clip to `rect` and paint the texture over it; falls back to a flat
    /// `fallback` fill when the texture asset is absent. Never fails.
    pub fn fill_texture(
        &mut self,
        rect: Rect,
        texture: Option<&ImageRes>,
        gs: Option<&str>,
        fallback: Color,
    ) {
        match texture {
            Some(res) => {
                self.content.end_text();
                self.content.save_state();
                if let Some(gs) = gs {
                    self.content.set_ext_gstate(gs);
                }
                let pdf_y = self.metrics.flip_y(rect.bottom());
                self.content.clip_rect(rect.x, pdf_y, rect.width, rect.height);
                self.content
                    .draw_image(&res.id, rect.x, pdf_y, rect.width, rect.height);
                self.content.restore_state();
            }
            None => {
                log::debug!("texture asset absent; flat fill fallback");
                self.rect_filled(rect, fallback);
            }
        }
    }

    /// Draw the centered low-opacity watermark; silently skipped when the
    /// asset is absent.
    pub fn draw_watermark(&mut self, watermark: Option<&ImageRes>, gs: Option<&str>) {
        let res = match watermark {
            Some(res) => res,
            None => {
                log::debug!("watermark asset absent; skipped");
                return;
            }
        };

        let width = self.metrics.width * 0.6;
        let height = width / res.aspect_ratio();
        let rect = Rect::new(
            (self.metrics.width - width) / 2.0,
            (self.metrics.height - height) / 2.0,
            width,
            height,
        );

        self.content.end_text();
        self.content.save_state();
        if let Some(gs) = gs {
            self.content.set_ext_gstate(gs);
        }
        let pdf_y = self.metrics.flip_y(rect.bottom());
        self.content
            .draw_image(&res.id, rect.x, pdf_y, rect.width, rect.height);
        self.content.restore_state();
    }

    /// Draw the four-sided border frame.
    ///
    /// Each edge is an independent strip: a missing strip asset degrades to
    /// a thin flat rule on that side only and never blocks the other three.
    pub fn draw_border_frame(&mut self, resources: &PageResources, palette: &Palette) {
        let thickness = mm(4.0);
        let w = self.metrics.width;
        let h = self.metrics.height;

        let sides: [(Option<&ImageRes>, Rect); 4] = [
            (
                resources.edge_top.as_ref(),
                Rect::new(0.0, 0.0, w, thickness),
            ),
            (
                resources.edge_bottom.as_ref(),
                Rect::new(0.0, h - thickness, w, thickness),
            ),
            (
                resources.edge_left.as_ref(),
                Rect::new(0.0, 0.0, thickness, h),
            ),
            (
                resources.edge_right.as_ref(),
                Rect::new(w - thickness, 0.0, thickness, h),
            ),
        ];

        for (strip, rect) in sides {
            match strip {
                Some(res) => self.draw_image(res, rect),
                None => {
                    // Thin rule centered in the strip area
                    let rule = rect.inset(thickness / 2.0 - 0.4);
                    self.rect_filled(rule, palette.border);
                }
            }
        }
    }
}
