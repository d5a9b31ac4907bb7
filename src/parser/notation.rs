//! Notation alphabet of plain-text tablature.

/// Technique symbols, in the order slide down, slide up, vibrato, hammer-on, pull-off, bend.
pub const SYMBOLS: [char; 6] = ['/', '\\', '~', 'h', 'p', 'b'];

pub const SHARP_NOTES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

pub const FLAT_NOTES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Character separating measures and following the root note.
pub const BAR: char = '|';

/// First character of a section header such as `[Verse]`.
pub const HEADER_START: char = '[';

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Technique {
    SlideDown,
    SlideUp,
    Vibrato,
    HammerOn,
    PullOff,
    Bend,
}

impl Technique {
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '/' => Some(Self::SlideDown),
            '\\' => Some(Self::SlideUp),
            '~' => Some(Self::Vibrato),
            'h' => Some(Self::HammerOn),
            'p' => Some(Self::PullOff),
            'b' => Some(Self::Bend),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::SlideDown => SYMBOLS[0],
            Self::SlideUp => SYMBOLS[1],
            Self::Vibrato => SYMBOLS[2],
            Self::HammerOn => SYMBOLS[3],
            Self::PullOff => SYMBOLS[4],
            Self::Bend => SYMBOLS[5],
        }
    }
}

/// Index of a note name in the chromatic scale, accepting both spellings.
pub fn note_index(name: &str) -> Option<usize> {
    SHARP_NOTES
        .iter()
        .position(|n| *n == name)
        .or_else(|| FLAT_NOTES.iter().position(|n| *n == name))
}
