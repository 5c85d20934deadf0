//! Bitmap text and rectangle primitives
//!
//! Small drawing helpers over `image::RgbaImage` using the 8x8 bitmap font.
//! Enough for headers, ordinal badges, and the page footer; not a text
//! rendering engine.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgba, RgbaImage};

/// Pixel advance per glyph at scale 1
const GLYPH_ADVANCE: u32 = 8;

/// Width of `text` in pixels at the given integer scale
pub(crate) fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_ADVANCE * scale.max(1)
}

/// Draw `text` with its top-left corner at `(x, y)`
///
/// Glyphs outside the canvas are clipped; characters missing from the basic
/// font fall back to `?`.
pub(crate) fn draw_text(img: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>, scale: u32) {
    let scale = scale.max(1) as i32;
    let mut cursor_x = x;

    for ch in text.chars() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            cursor_x += GLYPH_ADVANCE as i32 * scale;
            continue;
        };
        for (row_idx, row) in glyph.iter().enumerate() {
            for col_idx in 0..8i32 {
                if (row >> col_idx) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + col_idx * scale;
                let py = y + row_idx as i32 * scale;
                fill_block(img, px, py, scale, color);
            }
        }
        cursor_x += GLYPH_ADVANCE as i32 * scale;
    }
}

/// Fill an axis-aligned rectangle, alpha-blending `color` over the canvas
pub(crate) fn fill_rect(img: &mut RgbaImage, x: i32, y: i32, width: u32, height: u32, color: Rgba<u8>) {
    for dy in 0..height as i32 {
        for dx in 0..width as i32 {
            blend_at(img, x + dx, y + dy, color);
        }
    }
}

fn fill_block(img: &mut RgbaImage, x: i32, y: i32, scale: i32, color: Rgba<u8>) {
    for sy in 0..scale {
        for sx in 0..scale {
            blend_at(img, x + sx, y + sy, color);
        }
    }
}

fn blend_at(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
        return;
    }
    let dst = *img.get_pixel(x as u32, y as u32);
    img.put_pixel(x as u32, y as u32, blend(dst, color));
}

/// Source-over blend of `src` onto an opaque `dst`
fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let alpha = u32::from(src.0[3]);
    if alpha == 255 {
        return src;
    }
    let inverse = 255 - alpha;
    let mix = |s: u8, d: u8| ((u32::from(s) * alpha + u32::from(d) * inverse) / 255) as u8;
    Rgba([
        mix(src.0[0], dst.0[0]),
        mix(src.0[1], dst.0[1]),
        mix(src.0[2], dst.0[2]),
        255,
    ])
}
