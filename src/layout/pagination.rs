//! Pagination plan and the page flow state machine.
//!
//! [`PaginationPlan`] is the arithmetic: how many physical pages a table
//! needs and which slice of items lands on each. [`PageFlow`] owns the
//! writer and the open page, and encodes the one subtle invariant of the
//! engine as explicit states: every non-terminal page is finalized (footer
//! and border frame drawn) *before* the next page starts, because once a
//! new physical page begins the previous one can no longer be modified.
//! Only the terminal page stays open, awaiting the trailer content the
//! caller appends below the table.

use crate::config::{EngineConfig, PaginationConfig};
use crate::error::{Error, Result};
use crate::writer::{AssetStore, ImageData, PdfWriter, PdfWriterConfig};

use super::canvas::{ImageRes, PageCanvas, PageResources};
use super::header::{self, HeaderAnchors, HeaderContext};

/// How a table's items split across physical pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPlan {
    item_count: usize,
    max_first: usize,
    max_continuation: usize,
}

impl PaginationPlan {
    /// Plan for `item_count` items under the given capacities.
    pub fn new(item_count: usize, config: PaginationConfig) -> Result<Self> {
        if config.max_first == 0 || config.max_continuation == 0 {
            return Err(Error::Pagination(
                "page capacities must be at least one item".to_string(),
            ));
        }
        Ok(Self {
            item_count,
            max_first: config.max_first,
            max_continuation: config.max_continuation,
        })
    }

    /// Total physical pages the table spans.
    pub fn total_pages(&self) -> usize {
        if self.item_count <= self.max_first {
            1
        } else {
            let overflow = self.item_count - self.max_first;
            1 + (overflow + self.max_continuation - 1) / self.max_continuation
        }
    }

    /// The item index range drawn on page `page` (0-based).
    pub fn slice(&self, page: usize) -> std::ops::Range<usize> {
        if page == 0 {
            0..self.item_count.min(self.max_first)
        } else {
            let start = self.max_first + (page - 1) * self.max_continuation;
            let end = (start + self.max_continuation).min(self.item_count);
            start.min(self.item_count)..end
        }
    }

    /// True for the terminal page.
    pub fn is_last(&self, page: usize) -> bool {
        page + 1 == self.total_pages()
    }
}

/// State of a [`PageFlow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Page `k` (0-based) is open and accepting content
    RenderingPage(usize),
    /// Page `k` has its footer and frame; a continuation must start next
    PageFinalized(usize),
    /// The terminal page is open for trailing content only
    AwaitingTrailer,
}

/// The header strings repeated on every continuation page.
#[derive(Debug, Clone, Default)]
pub struct DocumentHeader {
    /// Document type label; `None` renders blank letterheads
    pub label: Option<String>,
    /// Document number
    pub number: Option<String>,
    /// Formatted issue date
    pub date: Option<String>,
}

/// One document's journey through its physical pages.
pub struct PageFlow<'a> {
    cfg: &'a EngineConfig,
    writer: PdfWriter,
    resources: PageResources,
    canvas: PageCanvas,
    state: FlowState,
    header: DocumentHeader,
}

impl<'a> PageFlow<'a> {
    /// Open the first page: background wash and watermark drawn, header not
    /// yet (the composer decides what goes in it).
    pub fn begin(cfg: &'a EngineConfig, assets: &AssetStore, header: DocumentHeader) -> Self {
        let title = match (&header.label, &header.number) {
            (Some(label), Some(number)) => Some(format!("{} {}", label, number)),
            (Some(label), None) => Some(label.clone()),
            _ => None,
        };
        let mut writer = PdfWriter::with_config(PdfWriterConfig {
            title,
            author: Some(cfg.identity.name.clone()),
            subject: header.label.clone(),
            compress: cfg.compress,
            ..PdfWriterConfig::default()
        });
        let resources = register_resources(&mut writer, cfg, assets);

        let mut canvas = PageCanvas::new(cfg.page);
        dress_page(&mut canvas, cfg, &resources);
        log::debug!("page flow started");

        Self {
            cfg,
            writer,
            resources,
            canvas,
            state: FlowState::RenderingPage(0),
            header,
        }
    }

    /// The open page's drawing surface.
    pub fn canvas(&mut self) -> &mut PageCanvas {
        &mut self.canvas
    }

    /// The engine configuration this flow renders under.
    pub fn config(&self) -> &'a EngineConfig {
        self.cfg
    }

    /// Split borrow for layout steps that draw and consult config/resources
    /// at the same time.
    pub fn parts(&mut self) -> (&mut PageCanvas, &'a EngineConfig, &PageResources) {
        (&mut self.canvas, self.cfg, &self.resources)
    }

    /// The flow's shared page resources.
    pub fn resources(&self) -> &PageResources {
        &self.resources
    }

    /// Current state.
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Pages already handed to the writer.
    pub fn finalized_pages(&self) -> usize {
        self.writer.page_count()
    }

    /// Draw the first page's header from the stored document strings.
    pub fn draw_first_header(&mut self) -> HeaderAnchors {
        let ctx = HeaderContext {
            doc_label: self.header.label.as_deref(),
            number: self.header.number.as_deref(),
            date: self.header.date.as_deref(),
            page_info: None,
        };
        header::draw_header(&mut self.canvas, self.cfg, &self.resources, &ctx)
    }

    /// Finalize the open non-terminal page: footer and border frame, then
    /// hand it to the writer. The page is immutable afterwards.
    pub fn finalize_page(&mut self) {
        let k = match self.state {
            FlowState::RenderingPage(k) => k,
            other => {
                debug_assert!(false, "finalize_page in state {:?}", other);
                return;
            }
        };
        header::draw_footer(&mut self.canvas, self.cfg);
        self.canvas
            .draw_border_frame(&self.resources, &self.cfg.palette);
        let finished = std::mem::replace(&mut self.canvas, PageCanvas::new(self.cfg.page));
        let page = self.cfg.page;
        self.writer
            .add_page(page.width, page.height, finished.into_content());
        self.state = FlowState::PageFinalized(k);
        log::debug!("page {} finalized", k + 1);
    }

    /// Start the next physical page: wash and watermark redrawn, then the
    /// continuation header with its `page k+1 of total` marker.
    pub fn start_continuation(&mut self, total_pages: usize) -> HeaderAnchors {
        let k = match self.state {
            FlowState::PageFinalized(k) => k,
            other => {
                debug_assert!(false, "start_continuation in state {:?}", other);
                0
            }
        };
        dress_page(&mut self.canvas, self.cfg, &self.resources);
        let ctx = HeaderContext {
            doc_label: self.header.label.as_deref(),
            number: self.header.number.as_deref(),
            date: self.header.date.as_deref(),
            page_info: Some((k + 2, total_pages)),
        };
        let anchors = header::draw_header(&mut self.canvas, self.cfg, &self.resources, &ctx);
        self.state = FlowState::RenderingPage(k + 1);
        log::debug!("continuation page {} of {} started", k + 2, total_pages);
        anchors
    }

    /// The table is done; the open page now only accepts trailer content
    /// (totals, notes, signature).
    pub fn await_trailer(&mut self) {
        debug_assert!(
            matches!(self.state, FlowState::RenderingPage(_)),
            "await_trailer in state {:?}",
            self.state
        );
        self.state = FlowState::AwaitingTrailer;
    }

    /// Close the terminal page (footer, border frame) and assemble the
    /// byte buffer.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        debug_assert!(
            matches!(
                self.state,
                FlowState::RenderingPage(_) | FlowState::AwaitingTrailer
            ),
            "finish in state {:?}",
            self.state
        );
        header::draw_footer(&mut self.canvas, self.cfg);
        self.canvas
            .draw_border_frame(&self.resources, &self.cfg.palette);
        let page = self.cfg.page;
        self.writer
            .add_page(page.width, page.height, self.canvas.into_content());
        self.writer.finish()
    }
}

/// Register the decoded assets and opacity states with a fresh writer.
fn register_resources(
    writer: &mut PdfWriter,
    cfg: &EngineConfig,
    assets: &AssetStore,
) -> PageResources {
    let mut register = |image: &Option<ImageData>| -> Option<ImageRes> {
        image.as_ref().map(|data| ImageRes {
            id: writer.register_image(data.clone()),
            width: data.width,
            height: data.height,
        })
    };

    let logo = register(&assets.logo);
    let watermark = register(&assets.watermark);
    let texture = register(&assets.texture);
    let edge_top = register(&assets.edge_top);
    let edge_bottom = register(&assets.edge_bottom);
    let edge_left = register(&assets.edge_left);
    let edge_right = register(&assets.edge_right);

    let watermark_gs = watermark
        .is_some()
        .then(|| writer.ext_gstate(cfg.watermark_opacity));
    let texture_gs = texture
        .is_some()
        .then(|| writer.ext_gstate(cfg.texture_opacity));

    PageResources {
        logo,
        watermark,
        texture,
        edge_top,
        edge_bottom,
        edge_left,
        edge_right,
        watermark_gs,
        texture_gs,
    }
}

/// Background layers drawn under every page's content.
fn dress_page(canvas: &mut PageCanvas, cfg: &EngineConfig, resources: &PageResources) {
    canvas.wash(cfg.palette.wash);
    canvas.draw_watermark(
        resources.watermark.as_ref(),
        resources.watermark_gs.as_deref(),
    );
}
