//! Per-frame order-id and timestamp stamping for recorded video.
//!
//! The order label sits at the top-left and the wall-clock timestamp at
//! the top-right, both white, with no background box.

mod font;

pub use font::{draw_text, glyph, text_width, GLYPH_SIZE};

use chrono::{DateTime, Local};

use crate::camera::Frame;

/// Format used for the on-frame timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Placement and color of the overlay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    /// Text color (RGB)
    pub color: [u8; 3],
    /// Glyph scale factor
    pub scale: u32,
    /// Left edge of the order label
    pub left: u32,
    /// Baseline (bottom of the glyph cell) shared by both labels
    pub baseline: u32,
    /// Distance from the right edge to the start of the timestamp
    pub right_inset: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: [255, 255, 255],
            scale: 1,
            left: 10,
            baseline: 20,
            right_inset: 160,
        }
    }
}

/// Text of the top-left label.
pub fn order_label(order_id: &str) -> String {
    format!("Order ID: {}", order_id)
}

/// Text of the top-right label.
pub fn timestamp_label(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Stamp the order label and timestamp onto `frame` in place.
pub fn stamp(frame: &mut Frame, order_id: &str, at: &DateTime<Local>, style: &OverlayStyle) {
    let top = style.baseline as i64 - (GLYPH_SIZE * style.scale.max(1)) as i64;

    draw_text(
        frame,
        style.left as i64,
        top,
        &order_label(order_id),
        style.color,
        style.scale,
    );

    let timestamp_x = frame.width as i64 - style.right_inset as i64;
    draw_text(
        frame,
        timestamp_x,
        top,
        &timestamp_label(at),
        style.color,
        style.scale,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Resolution;
    use chrono::TimeZone;

    fn lit_in(frame: &Frame, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> usize {
        let mut count = 0;
        for y in ys {
            for x in xs.clone() {
                if frame.pixel(x, y) == Some([255, 255, 255]) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_labels() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(order_label("A-17"), "Order ID: A-17");
        assert_eq!(timestamp_label(&at), "2024-03-09 07:05:01");
    }

    #[test]
    fn test_timestamp_fits_in_right_inset() {
        let style = OverlayStyle::default();
        assert!(text_width("2024-03-09 07:05:01", style.scale) <= style.right_inset);
    }

    #[test]
    fn test_stamp_draws_both_corners_only() {
        let mut frame = Frame::filled(Resolution::VGA, [0, 0, 0]);
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        stamp(&mut frame, "42", &at, &OverlayStyle::default());

        // Text band spans rows 12..20
        assert!(lit_in(&frame, 10..200, 12..20) > 0, "order label drawn");
        assert!(lit_in(&frame, 480..640, 12..20) > 0, "timestamp drawn");
        assert_eq!(lit_in(&frame, 0..640, 20..480), 0, "nothing below the band");
        assert_eq!(lit_in(&frame, 0..640, 0..12), 0, "nothing above the band");
    }
}
