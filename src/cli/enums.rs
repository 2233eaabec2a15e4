//! CLI enum types for preview options.

use clap::ValueEnum;

use crate::ascii::CharSet;

/// Preview character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    Standard,
    #[default]
    Blocks,
    Minimal,
}

impl From<CharacterSet> for CharSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Standard => CharSet::Standard,
            CharacterSet::Blocks => CharSet::Blocks,
            CharacterSet::Minimal => CharSet::Minimal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_set_conversion() {
        assert_eq!(CharSet::from(CharacterSet::Standard), CharSet::Standard);
        assert_eq!(CharSet::from(CharacterSet::Blocks), CharSet::Blocks);
        assert_eq!(CharSet::from(CharacterSet::Minimal), CharSet::Minimal);
    }
}
