//! Downsampling RGB frames to a grid of character cells.

use crate::camera::Frame;

/// Average color of one character cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl CellColor {
    /// ITU-R BT.601 luminance, integer math (coefficients scaled by 1000).
    pub fn luminance(&self) -> u8 {
        ((299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32) / 1000) as u8
    }
}

/// Average the pixels under each cell of a `columns` x `rows` grid.
///
/// Cells are written to `buffer` in row-major order; the previous contents
/// are discarded. Cells that cover no pixels (grid larger than the frame)
/// come out black.
pub fn downsample_cells_into(frame: &Frame, columns: u16, rows: u16, buffer: &mut Vec<CellColor>) {
    buffer.clear();

    if columns == 0 || rows == 0 || frame.width == 0 || frame.height == 0 || frame.data.is_empty() {
        return;
    }

    buffer.reserve(columns as usize * rows as usize);
    let cell_w = frame.width as f32 / columns as f32;
    let cell_h = frame.height as f32 / rows as f32;
    let stride = frame.width as usize * Frame::BYTES_PER_PIXEL;

    for cy in 0..rows as u32 {
        let y0 = (cy as f32 * cell_h) as usize;
        let y1 = (((cy + 1) as f32 * cell_h) as usize).min(frame.height as usize);
        for cx in 0..columns as u32 {
            let x0 = (cx as f32 * cell_w) as usize;
            let x1 = (((cx + 1) as f32 * cell_w) as usize).min(frame.width as usize);

            let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
            for y in y0..y1 {
                let row = y * stride;
                for x in x0..x1 {
                    let i = row + x * Frame::BYTES_PER_PIXEL;
                    if let Some(px) = frame.data.get(i..i + Frame::BYTES_PER_PIXEL) {
                        r += px[0] as u32;
                        g += px[1] as u32;
                        b += px[2] as u32;
                        n += 1;
                    }
                }
            }

            buffer.push(if n > 0 {
                CellColor {
                    r: (r / n) as u8,
                    g: (g / n) as u8,
                    b: (b / n) as u8,
                }
            } else {
                CellColor::default()
            });
        }
    }
}
