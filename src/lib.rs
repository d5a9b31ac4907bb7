//! Tabdecoder - plain-text guitar tablature decoder
//!
//! This library provides:
//! - Decoding of interleaved tablature text into one symbol sequence per string
//! - Display lines of the form `root|sequence`
//! - The notation alphabet (technique symbols, sharp and flat note names)
//!
//! # Example
//!
//! ```no_run
//! use tabdecoder::TabDecoder;
//!
//! let text = std::fs::read_to_string("song.txt").unwrap();
//! let tab = TabDecoder::new(16, "4/3", 6).decode(&text).unwrap();
//! for line in tab.display_lines() {
//!     println!("{line}");
//! }
//! ```

pub mod error;
pub mod parser;

// Re-export main types for convenience
pub use error::{DecodeError, TabError};
pub use parser::notation::{Technique, FLAT_NOTES, SHARP_NOTES, SYMBOLS};
pub use parser::tab_decoder::{
    format, DecoderSettings, TabDecoder, Tablature, DEFAULT_DIVISIONS, DEFAULT_STRING_COUNT,
    DEFAULT_TIME_SIGNATURE,
};
