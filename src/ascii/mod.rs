//! Camera frame to true-color character grid conversion for the preview.
//!
//! 1. **Downsampling** - average RGB per character cell
//! 2. **Character mapping** - cell luminance picks a glyph from a [`CharSet`]

mod cells;
mod charset;
mod frame;

pub use cells::{downsample_cells_into, CellColor};
pub use charset::{CharSet, BLOCKS_CHARSET, MINIMAL_CHARSET, STANDARD_CHARSET};
pub use frame::AsciiFrame;

use crate::camera::Frame;

/// Render `frame` onto a `columns` x `rows` grid.
///
/// `cells` is scratch space reused between calls.
pub fn render(
    frame: &Frame,
    columns: u16,
    rows: u16,
    charset: CharSet,
    cells: &mut Vec<CellColor>,
) -> AsciiFrame {
    downsample_cells_into(frame, columns, rows, cells);
    if cells.is_empty() {
        return AsciiFrame::default();
    }
    AsciiFrame {
        chars: cells.iter().map(|c| charset.char_for(c.luminance())).collect(),
        colors: cells.clone(),
        width: columns,
        height: rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Resolution;

    #[test]
    fn test_render_white_frame() {
        let frame = Frame::filled(Resolution::VGA, [255, 255, 255]);
        let mut cells = Vec::new();
        let out = render(&frame, 12, 4, CharSet::Standard, &mut cells);
        assert_eq!(out.width, 12);
        assert_eq!(out.height, 4);
        assert_eq!(out.chars.len(), 48);
        assert!(out.chars.iter().all(|&c| c == '@'));
        assert_eq!(out.colors[0], CellColor { r: 255, g: 255, b: 255 });
    }

    #[test]
    fn test_render_zero_grid() {
        let frame = Frame::filled(Resolution::VGA, [0, 0, 0]);
        let mut cells = Vec::new();
        let out = render(&frame, 0, 0, CharSet::Blocks, &mut cells);
        assert!(out.chars.is_empty());
    }
}
