//! Grid compositor
//!
//! Renders one page of search results into a fixed-size masonry canvas and
//! records which source index ended up behind each visible ordinal.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use std::io::Cursor;

use super::layout::MasonryLayout;
use super::text::{draw_text, fill_rect, text_width};
use crate::error::{Result, ScoutError};
use crate::fetch::FetchUrl;
use crate::types::config::SearchConfig;

const BACKGROUND: Rgba<u8> = Rgba([30, 30, 30, 255]);
const TITLE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const SUBTITLE_COLOR: Rgba<u8> = Rgba([176, 176, 176, 255]);
const BADGE_FILL: Rgba<u8> = Rgba([0, 0, 0, 153]);
const BADGE_WIDTH: u32 = 44;
const BADGE_HEIGHT: u32 = 22;

/// One page candidate: a URL plus its index into the full result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Image URL to fetch and decode
    pub url: String,
    /// Index of this URL in the session's full result list
    pub source_index: usize,
}

/// A rendered page: PNG bytes plus the ordinal-to-source translation table
#[derive(Debug, Clone)]
pub struct RenderedGrid {
    /// PNG-encoded canvas
    pub png: Vec<u8>,
    /// `displayed_map[ordinal - 1]` is the source index behind that ordinal
    pub displayed_map: Vec<usize>,
}

/// Fixed-canvas masonry renderer for one page of candidates
pub struct GridCompositor {
    width: u32,
    height: u32,
    columns: usize,
    padding: u32,
    header_height: u32,
}

impl GridCompositor {
    /// Build a compositor from the feature configuration
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            width: config.canvas_width,
            height: config.canvas_height,
            columns: config.columns,
            padding: config.padding,
            header_height: config.header_height,
        }
    }

    /// Render `candidates` for one page.
    ///
    /// Every candidate is fetched and decoded concurrently; failures are
    /// dropped without consuming an ordinal. Tiles are placed in relevance
    /// order into the currently shortest column. Errors only surface when
    /// not a single candidate decoded or the canvas cannot be encoded.
    pub async fn render<F: FetchUrl>(
        &self,
        fetcher: &F,
        candidates: &[Candidate],
        query: &str,
        page: u32,
        total_pages: u32,
    ) -> Result<RenderedGrid> {
        let decoded = decode_candidates(fetcher, candidates).await;
        if decoded.is_empty() {
            return Err(ScoutError::decode_failed(format!(
                "no candidate decoded for page {page} of \"{query}\""
            )));
        }

        let mut canvas = RgbaImage::from_pixel(self.width, self.height, BACKGROUND);
        self.draw_header(&mut canvas, query, decoded.len());

        let mut layout = MasonryLayout::new(self.width, self.columns, self.padding, self.header_height);
        let mut displayed_map = Vec::with_capacity(decoded.len());

        for (tile, source_index) in &decoded {
            let placement = layout.place(tile.width(), tile.height());
            let scaled = tile
                .resize_exact(placement.width, placement.height, FilterType::Triangle)
                .to_rgba8();
            image::imageops::overlay(
                &mut canvas,
                &scaled,
                i64::from(placement.x),
                i64::from(placement.y),
            );

            displayed_map.push(*source_index);
            let ordinal = displayed_map.len();
            self.draw_badge(&mut canvas, placement.x, placement.y, ordinal);
            log::debug!(
                "tile {ordinal} (source {source_index}) -> column {} at y={}",
                placement.column,
                placement.y
            );
        }

        self.draw_footer(&mut canvas, layout.tallest(), page, total_pages);

        let mut png = Vec::new();
        DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;

        Ok(RenderedGrid { png, displayed_map })
    }

    fn draw_header(&self, canvas: &mut RgbaImage, query: &str, shown: usize) {
        draw_text(canvas, 20, 24, "Image search", TITLE_COLOR, 3);
        let subtitle = format!("Results for \"{query}\" ({shown} images)");
        draw_text(canvas, 20, 60, &subtitle, SUBTITLE_COLOR, 2);
    }

    fn draw_badge(&self, canvas: &mut RgbaImage, x: u32, y: u32, ordinal: usize) {
        fill_rect(canvas, x as i32, y as i32, BADGE_WIDTH, BADGE_HEIGHT, BADGE_FILL);
        let label = format!("#{ordinal}");
        let tx = x as i32 + (BADGE_WIDTH.saturating_sub(text_width(&label, 1)) / 2) as i32;
        let ty = y as i32 + ((BADGE_HEIGHT - 8) / 2) as i32;
        draw_text(canvas, tx, ty, &label, TITLE_COLOR, 1);
    }

    fn draw_footer(&self, canvas: &mut RgbaImage, tallest: u32, page: u32, total_pages: u32) {
        let label = format!("Page {page}/{total_pages}");
        let tx = (self.width.saturating_sub(text_width(&label, 2)) / 2) as i32;
        let ty = (tallest + 40).min(self.height.saturating_sub(20)) as i32;
        draw_text(canvas, tx, ty, &label, TITLE_COLOR, 2);
    }
}

/// Fetch and decode every candidate concurrently, in relevance order
///
/// Returns only the images that decoded, each paired with its source index.
/// A failed fetch or decode records nothing for that candidate.
async fn decode_candidates<F: FetchUrl>(
    fetcher: &F,
    candidates: &[Candidate],
) -> Vec<(DynamicImage, usize)> {
    let loaded = futures::future::join_all(candidates.iter().map(|candidate| async move {
        let bytes = match fetcher.fetch(&candidate.url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("skipping candidate {}: {e}", candidate.source_index);
                return None;
            }
        };
        match image::load_from_memory(&bytes) {
            Ok(img) => Some((img, candidate.source_index)),
            Err(e) => {
                log::warn!("skipping undecodable candidate {}: {e}", candidate.source_index);
                None
            }
        }
    }))
    .await;

    loaded.into_iter().flatten().collect()
}
