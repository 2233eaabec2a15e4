//! 8x8 bitmap text rendering directly into RGB frames.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};

use crate::camera::Frame;

/// Glyph cell size in pixels at scale 1.
pub const GLYPH_SIZE: u32 = 8;

/// Look up the bitmap for a character, falling back to `?`.
///
/// Each byte is one row, top to bottom; bit 0 is the leftmost pixel.
pub fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Width in pixels of `text` rendered at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_SIZE * scale
}

/// Draw `text` with its top-left corner at (`x`, `top`).
///
/// Only glyph pixels are written (no background box). Pixels falling
/// outside the frame are clipped.
pub fn draw_text(frame: &mut Frame, x: i64, top: i64, text: &str, color: [u8; 3], scale: u32) {
    let scale = scale.max(1) as i64;
    let width = frame.width as i64;
    let height = frame.height as i64;
    let stride = frame.width as usize * Frame::BYTES_PER_PIXEL;

    for (i, c) in text.chars().enumerate() {
        let origin_x = x + i as i64 * GLYPH_SIZE as i64 * scale;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_SIZE as i64 {
                if bits & (1 << col) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = origin_x + col * scale + dx;
                        let py = top + row as i64 * scale + dy;
                        if px < 0 || py < 0 || px >= width || py >= height {
                            continue;
                        }
                        let idx = py as usize * stride + px as usize * Frame::BYTES_PER_PIXEL;
                        if let Some(pixel) = frame.data.get_mut(idx..idx + Frame::BYTES_PER_PIXEL)
                        {
                            pixel.copy_from_slice(&color);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Resolution;

    #[test]
    fn test_glyph_space_is_blank() {
        assert_eq!(glyph(' '), [0; 8]);
        assert_ne!(glyph('A'), [0; 8]);
    }

    #[test]
    fn test_unknown_char_falls_back_to_question_mark() {
        assert_eq!(glyph('\u{1F600}'), glyph('?'));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("abc", 1), 24);
        assert_eq!(text_width("abc", 2), 48);
    }

    #[test]
    fn test_draw_text_stays_in_glyph_box() {
        let mut frame = Frame::filled(Resolution { width: 32, height: 16 }, [0, 0, 0]);
        draw_text(&mut frame, 4, 4, "H", [255, 255, 255], 1);

        let mut lit = 0;
        for y in 0..16 {
            for x in 0..32 {
                if frame.pixel(x, y) == Some([255, 255, 255]) {
                    assert!((4..12).contains(&x) && (4..12).contains(&y));
                    lit += 1;
                }
            }
        }
        assert!(lit > 0);
    }

    #[test]
    fn test_draw_text_clips_at_edges() {
        let mut frame = Frame::filled(Resolution { width: 8, height: 8 }, [0, 0, 0]);
        draw_text(&mut frame, -4, -4, "WW", [255, 0, 0], 2);
        assert_eq!(frame.data.len(), 8 * 8 * 3);
    }
}
