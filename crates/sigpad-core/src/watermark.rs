//! Date watermark painted behind the signature.
//!
//! Text is drawn with a small built-in bitmap font (digits and `-`) so the
//! background does not depend on platform fonts.

use kurbo::{Rect, Size};

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;
/// Horizontal advance per character, in cells.
const ADVANCE: usize = GLYPH_WIDTH + 1;

/// Row bitmaps, most significant of the low five bits is the leftmost cell.
fn glyph(c: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let rows = match c {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        _ => return None,
    };
    Some(rows)
}

/// Rectangles covering `text` centred on a surface of the given size.
///
/// Characters without a glyph advance like a space. Cell size follows the
/// surface height (5px at the default 160px) and shrinks so the text fits
/// the width.
pub fn layout_text(text: &str, surface: Size) -> Vec<Rect> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let columns = chars.len() * ADVANCE - 1;
    let by_height = (surface.height / 32.0).floor();
    let by_width = (surface.width / columns as f64).floor();
    let cell = by_height.min(by_width).max(1.0);

    let text_width = columns as f64 * cell;
    let text_height = GLYPH_HEIGHT as f64 * cell;
    let origin_x = ((surface.width - text_width) / 2.0).round();
    let origin_y = ((surface.height - text_height) / 2.0).round();

    let mut rects = Vec::new();
    for (index, c) in chars.iter().enumerate() {
        let Some(rows) = glyph(*c) else {
            continue;
        };
        let glyph_x = origin_x + (index * ADVANCE) as f64 * cell;

        for (row, bits) in rows.iter().enumerate() {
            let y = origin_y + row as f64 * cell;
            // Merge horizontal runs of lit cells into one rect.
            let mut col = 0;
            while col < GLYPH_WIDTH {
                if !is_lit(*bits, col) {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < GLYPH_WIDTH && is_lit(*bits, col) {
                    col += 1;
                }
                rects.push(Rect::new(
                    glyph_x + start as f64 * cell,
                    y,
                    glyph_x + col as f64 * cell,
                    y + cell,
                ));
            }
        }
    }
    rects
}

fn is_lit(bits: u8, col: usize) -> bool {
    bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0
}
