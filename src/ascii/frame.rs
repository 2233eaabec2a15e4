//! Character grid rendered from a camera frame.

use super::cells::CellColor;

/// Character grid for the preview surface.
///
/// `chars` and `colors` are row-major and both `width * height` long.
#[derive(Debug, Clone, Default)]
pub struct AsciiFrame {
    pub chars: Vec<char>,
    pub colors: Vec<CellColor>,
    /// Width in characters
    pub width: u16,
    /// Height in characters
    pub height: u16,
}

impl AsciiFrame {
    /// Cells of row `y` as (char, color) pairs.
    pub fn row(&self, y: u16) -> impl Iterator<Item = (char, CellColor)> + '_ {
        let width = (self.width as usize).max(1);
        let chars = self.chars.chunks(width).nth(y as usize).unwrap_or_default();
        let colors = self.colors.chunks(width).nth(y as usize).unwrap_or_default();
        chars.iter().copied().zip(colors.iter().copied())
    }

    /// Plain text rendering, rows joined by newlines.
    pub fn to_string_display(&self) -> String {
        if self.width == 0 || self.height == 0 {
            return String::new();
        }
        self.chars
            .chunks(self.width as usize)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_string_display() {
        let frame = AsciiFrame {
            chars: vec!['#', '.', ':', '@', '*', '+'],
            colors: vec![CellColor::default(); 6],
            width: 3,
            height: 2,
        };
        assert_eq!(frame.to_string_display(), "#.:\n@*+");
        assert_eq!(AsciiFrame::default().to_string_display(), "");
    }

    #[test]
    fn test_row_pairs_chars_with_colors() {
        let red = CellColor { r: 255, g: 0, b: 0 };
        let frame = AsciiFrame {
            chars: vec!['a', 'b', 'c', 'd'],
            colors: vec![CellColor::default(), CellColor::default(), red, red],
            width: 2,
            height: 2,
        };
        let second: Vec<_> = frame.row(1).collect();
        assert_eq!(second, vec![('c', red), ('d', red)]);
        assert_eq!(frame.row(5).count(), 0);
    }
}
