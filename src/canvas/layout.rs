//! Column-balanced masonry packing
//!
//! Pure layout math: tiles go to whichever column is currently shortest,
//! ties won by the lowest column index so layouts replay deterministically.

/// Where one tile lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Column index the tile was assigned to
    pub column: usize,
    /// Left edge in canvas pixels
    pub x: u32,
    /// Top edge in canvas pixels
    pub y: u32,
    /// Tile width after scaling (always the column width)
    pub width: u32,
    /// Tile height after scaling, aspect ratio preserved
    pub height: u32,
}

/// Running height accumulator for the masonry columns
#[derive(Debug)]
pub struct MasonryLayout {
    column_heights: Vec<u32>,
    column_width: u32,
    padding: u32,
}

impl MasonryLayout {
    /// Partition `canvas_width` into equal columns with `padding` between
    /// and around them, all starting at `top_offset`.
    pub fn new(canvas_width: u32, columns: usize, padding: u32, top_offset: u32) -> Self {
        let gutters = padding * (columns as u32 + 1);
        let column_width = canvas_width.saturating_sub(gutters) / columns as u32;
        Self {
            column_heights: vec![top_offset; columns],
            column_width,
            padding,
        }
    }

    /// Width every tile is scaled to
    #[must_use]
    pub fn column_width(&self) -> u32 {
        self.column_width
    }

    /// Height of the tallest column so far
    #[must_use]
    pub fn tallest(&self) -> u32 {
        self.column_heights.iter().copied().max().unwrap_or(0)
    }

    /// Snapshot of the per-column accumulators
    #[must_use]
    pub fn column_heights(&self) -> &[u32] {
        &self.column_heights
    }

    /// Assign a tile with source dimensions `(width, height)` to the
    /// shortest column and advance that column's accumulator.
    pub fn place(&mut self, width: u32, height: u32) -> Placement {
        // min_by_key keeps the first minimum, which is the lowest index
        let column = self
            .column_heights
            .iter()
            .enumerate()
            .min_by_key(|(_, h)| **h)
            .map(|(i, _)| i)
            .unwrap_or(0);

        let scaled_height = scale_height(width, height, self.column_width);
        let x = self.padding + column as u32 * (self.column_width + self.padding);
        let y = self.column_heights[column] + self.padding;

        self.column_heights[column] += scaled_height + self.padding;

        Placement {
            column,
            x,
            y,
            width: self.column_width,
            height: scaled_height,
        }
    }
}

/// Scale `height` so that `width` becomes `target_width`, never collapsing
/// a tile to zero pixels.
fn scale_height(width: u32, height: u32, target_width: u32) -> u32 {
    if width == 0 {
        return 1;
    }
    let scaled = (u64::from(height) * u64::from(target_width)) / u64::from(width);
    (scaled as u32).max(1)
}
