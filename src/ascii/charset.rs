//! Character ramps for the preview surface.

use serde::Deserialize;
use std::str::FromStr;

/// Standard ASCII density ramp (10 levels), darkest to brightest.
pub const STANDARD_CHARSET: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Unicode block ramp (5 levels).
pub const BLOCKS_CHARSET: &[char] = &[' ', '░', '▒', '▓', '█'];

/// Minimal ramp (4 levels).
pub const MINIMAL_CHARSET: &[char] = &[' ', '.', ':', '#'];

/// Character set used to draw the live preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharSet {
    Standard,
    /// Dense blocks read best with true-color cells, so this is the default
    #[default]
    Blocks,
    Minimal,
}

impl CharSet {
    /// Characters ordered from darkest to brightest.
    pub fn chars(&self) -> &'static [char] {
        match self {
            CharSet::Standard => STANDARD_CHARSET,
            CharSet::Blocks => BLOCKS_CHARSET,
            CharSet::Minimal => MINIMAL_CHARSET,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Standard => "standard",
            CharSet::Blocks => "blocks",
            CharSet::Minimal => "minimal",
        }
    }

    /// Pick the character for a brightness value (0-255).
    pub fn char_for(&self, brightness: u8) -> char {
        let ramp = self.chars();
        ramp[(brightness as usize * (ramp.len() - 1)) / 255]
    }
}

impl FromStr for CharSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(CharSet::Standard),
            "blocks" => Ok(CharSet::Blocks),
            "minimal" => Ok(CharSet::Minimal),
            other => Err(format!(
                "Unknown charset '{}'. Available: standard, blocks, minimal",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_for_extremes() {
        assert_eq!(CharSet::Standard.char_for(0), ' ');
        assert_eq!(CharSet::Standard.char_for(255), '@');
        assert_eq!(CharSet::Blocks.char_for(255), '█');
        assert_eq!(CharSet::Minimal.char_for(128), '.');
    }

    #[test]
    fn test_from_str() {
        assert_eq!("BLOCKS".parse::<CharSet>(), Ok(CharSet::Blocks));
        assert_eq!("minimal".parse::<CharSet>(), Ok(CharSet::Minimal));
        assert!("braille".parse::<CharSet>().is_err());
    }

    #[test]
    fn test_deserialize_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            charset: CharSet,
        }
        let w: Wrapper = toml::from_str("charset = \"standard\"").unwrap();
        assert_eq!(w.charset, CharSet::Standard);
    }
}
