use crate::error::DecodeError;
use crate::parser::notation::BAR;
use crate::parser::primitive_parser::{make_string, parse_raw_line, RawLine, TabLine};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_DIVISIONS: u32 = 16;
pub const DEFAULT_TIME_SIGNATURE: &str = "4/3";
pub const DEFAULT_STRING_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderSettings {
    /// Subdivisions per beat, metadata only
    pub divisions: u32,
    /// Free-form label, metadata only
    pub time_signature: String,
    /// Lines per measure block
    pub string_count: usize,
    /// Reject short lines, incomplete blocks and inconsistent roots
    pub strict: bool,
}

impl Default for DecoderSettings {
    fn default() -> Self {
        Self {
            divisions: DEFAULT_DIVISIONS,
            time_signature: DEFAULT_TIME_SIGNATURE.to_string(),
            string_count: DEFAULT_STRING_COUNT,
            strict: false,
        }
    }
}

/// Per-string symbol sequences decoded from a tablature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tablature {
    /// Root note label of each string, taken from the first measure block
    pub roots: Vec<char>,
    /// Frets and technique symbols of each string in playing order
    pub sequences: Vec<String>,
}

impl Tablature {
    pub fn string_count(&self) -> usize {
        self.sequences.len()
    }

    pub fn sequence(&self, string: usize) -> Option<&str> {
        self.sequences.get(string).map(String::as_str)
    }

    pub fn display_lines(&self) -> Vec<String> {
        format(&self.roots, &self.sequences)
    }
}

impl fmt::Display for Tablature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.display_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// One display line per string: `root|sequence`
pub fn format(roots: &[char], sequences: &[String]) -> Vec<String> {
    roots
        .iter()
        .zip(sequences)
        .map(|(root, sequence)| format!("{root}{BAR}{sequence}"))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct TabDecoder {
    settings: DecoderSettings,
}

impl TabDecoder {
    pub fn new(divisions: u32, time_signature: impl Into<String>, string_count: usize) -> Self {
        Self {
            settings: DecoderSettings {
                divisions,
                time_signature: time_signature.into(),
                string_count,
                strict: false,
            },
        }
    }

    pub const fn from_settings(settings: DecoderSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.settings.strict = strict;
        self
    }

    pub const fn settings(&self) -> &DecoderSettings {
        &self.settings
    }

    pub const fn divisions(&self) -> u32 {
        self.settings.divisions
    }

    pub fn time_signature(&self) -> &str {
        &self.settings.time_signature
    }

    pub const fn string_count(&self) -> usize {
        self.settings.string_count
    }

    pub const fn is_strict(&self) -> bool {
        self.settings.strict
    }

    /// Decode raw bytes, UTF-8 or Windows-1252.
    pub fn decode_bytes(&self, data: &[u8]) -> Result<Tablature, DecodeError> {
        self.decode(&make_string(data))
    }

    /// Reassemble each string's full sequence from interleaved measure blocks.
    ///
    /// Block `k`, line `i` of the filtered input belongs to string `i`; headers and blank
    /// lines are skipped. The block layout is assumed, not verified, unless strict mode is on.
    pub fn decode(&self, text: &str) -> Result<Tablature, DecodeError> {
        let string_count = self.settings.string_count;
        if string_count == 0 {
            return Err(DecodeError::InvalidStringCount);
        }
        log::debug!(
            "Decoding tablature -> strings:{string_count} divisions:{} time signature:{}",
            self.settings.divisions,
            self.settings.time_signature
        );

        let lines = tab_lines(text);
        if lines.len() < string_count {
            return Err(DecodeError::InsufficientLines {
                found: lines.len(),
                required: string_count,
            });
        }

        let roots: Vec<char> = lines
            .iter()
            .take(string_count)
            .map(|(_, line)| line.root)
            .collect();

        if self.settings.strict {
            validate(&lines, &roots)?;
        }

        let mut sequences = vec![String::new(); string_count];
        for (index, (_, line)) in lines.iter().enumerate() {
            sequences[index % string_count].extend(line.symbols());
        }
        log::debug!(
            "Decoded {} tab lines into {} blocks",
            lines.len(),
            lines.len().div_ceil(string_count)
        );

        Ok(Tablature { roots, sequences })
    }
}

/// Tab lines in file order, paired with their 1-based line number.
fn tab_lines(text: &str) -> Vec<(usize, TabLine<'_>)> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| match parse_raw_line(line) {
            Ok((_, RawLine::Tab(tab_line))) => Some((index + 1, tab_line)),
            Ok((_, RawLine::Header(name))) => {
                log::debug!("Skipping section header {name:?}");
                None
            }
            Ok((_, RawLine::Blank)) => None,
            Err(err) => {
                log::debug!("Skipping unreadable line {}: {err}", index + 1);
                None
            }
        })
        .collect()
}

fn validate(lines: &[(usize, TabLine<'_>)], roots: &[char]) -> Result<(), DecodeError> {
    if let Some((line_number, line)) = lines.iter().find(|(_, line)| line.separator.is_none()) {
        return Err(DecodeError::MalformedLine {
            line_number: *line_number,
            line: line.root.to_string(),
        });
    }
    let string_count = roots.len();
    if lines.len() % string_count != 0 {
        return Err(DecodeError::IncompleteBlock {
            lines: lines.len(),
            string_count,
        });
    }
    for (index, (line_number, line)) in lines.iter().enumerate() {
        let expected = roots[index % string_count];
        if line.root != expected {
            return Err(DecodeError::RootMismatch {
                line_number: *line_number,
                expected,
                found: line.root,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTRO: &str = "[Intro]\nE|0--2--|\nB|--3----|\n\nE|1------|\nB|---4---|\n";

    #[test]
    fn test_decode_two_strings() {
        let decoder = TabDecoder::new(16, "4/3", 2);
        let tab = decoder.decode(INTRO).unwrap();
        assert_eq!(tab.roots, vec!['E', 'B']);
        assert_eq!(tab.sequences, vec!["0--2--1------", "--3-------4---"]);
        assert_eq!(tab.display_lines()[0], "E|0--2--1------");
        assert_eq!(tab.display_lines()[1], "B|--3-------4---");
    }

    #[test]
    fn test_single_block_is_trimmed_content() {
        let decoder = TabDecoder::new(16, "4/3", 3);
        let tab = decoder.decode("e|5h7|~\nB|-b-\nG|\\/").unwrap();
        assert_eq!(tab.roots, vec!['e', 'B', 'G']);
        assert_eq!(tab.sequences, vec!["5h7~", "-b-", "\\/"]);
    }

    #[test]
    fn test_insufficient_lines() {
        let decoder = TabDecoder::default();
        let err = decoder
            .decode("[Verse]\nE|---\nB|---\n\nG|---\n")
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::InsufficientLines {
                found: 3,
                required: 6
            }
        );
        assert!(matches!(
            decoder.decode(""),
            Err(DecodeError::InsufficientLines { found: 0, .. })
        ));
    }

    #[test]
    fn test_zero_strings() {
        let decoder = TabDecoder::new(16, "4/3", 0);
        assert_eq!(
            decoder.decode("E|---\n"),
            Err(DecodeError::InvalidStringCount)
        );
    }

    #[test]
    fn test_consecutive_blank_and_header_lines() {
        let text = "\n\n[Intro]\n[Part 1]\nE|01\n\n\n\nA|23\n[Outro]\n[End]\nE|45\nA|67\n\n";
        let tab = TabDecoder::new(4, "4/4", 2).decode(text).unwrap();
        assert_eq!(tab.sequences, vec!["0145", "2367"]);
    }

    #[test]
    fn test_roots_from_first_block_only() {
        let text = "E|1\nA|2\nX|3\nY|4\n";
        let tab = TabDecoder::new(4, "4/4", 2).decode(text).unwrap();
        assert_eq!(tab.roots, vec!['E', 'A']);
        assert_eq!(tab.sequences, vec!["13", "24"]);
    }

    #[test]
    fn test_crlf_terminators() {
        let tab = TabDecoder::new(4, "4/4", 2)
            .decode("[Intro]\r\nE|0-1|\r\n\r\nA|2-3|\r\n")
            .unwrap();
        assert_eq!(tab.sequences, vec!["0-1", "2-3"]);
    }

    #[test]
    fn test_lenient_short_lines() {
        let tab = TabDecoder::new(4, "4/4", 2).decode("E\nA|\n").unwrap();
        assert_eq!(tab.roots, vec!['E', 'A']);
        assert_eq!(tab.sequences, vec!["", ""]);
    }

    #[test]
    fn test_strict_malformed_line() {
        let decoder = TabDecoder::new(4, "4/4", 2).with_strict(true);
        assert_eq!(
            decoder.decode("[Intro]\nE|0\nA\n"),
            Err(DecodeError::MalformedLine {
                line_number: 3,
                line: "A".to_string()
            })
        );
    }

    #[test]
    fn test_strict_incomplete_block() {
        let decoder = TabDecoder::new(4, "4/4", 2).with_strict(true);
        assert_eq!(
            decoder.decode("E|0\nA|1\nE|2\n"),
            Err(DecodeError::IncompleteBlock {
                lines: 3,
                string_count: 2
            })
        );
        // lenient mode keeps the partial block
        let tab = decoder.with_strict(false).decode("E|0\nA|1\nE|2\n").unwrap();
        assert_eq!(tab.sequences, vec!["02", "1"]);
    }

    #[test]
    fn test_strict_root_mismatch() {
        let decoder = TabDecoder::new(4, "4/4", 2).with_strict(true);
        assert_eq!(
            decoder.decode("E|0\nA|1\n\nA|2\nE|3\n"),
            Err(DecodeError::RootMismatch {
                line_number: 4,
                expected: 'E',
                found: 'A'
            })
        );
        assert!(decoder.decode("E|0\nA|1\n\nE|2\nA|3\n").is_ok());
    }

    #[test]
    fn test_bar_removal_is_idempotent() {
        let tab = TabDecoder::new(4, "4/4", 1).decode("E|0|1||2|\n").unwrap();
        let once = &tab.sequences[0];
        assert_eq!(once, "012");
        assert_eq!(&once.replace(BAR, ""), once);
    }

    #[test]
    fn test_format_projection() {
        let roots = ['D', 'A'];
        let sequences = vec!["0-2".to_string(), String::new()];
        assert_eq!(format(&roots, &sequences), vec!["D|0-2", "A|"]);
        let tab = Tablature {
            roots: roots.to_vec(),
            sequences,
        };
        assert_eq!(tab.to_string(), "D|0-2\nA|\n");
    }

    #[test]
    fn test_default_settings() {
        let decoder = TabDecoder::default();
        assert_eq!(decoder.divisions(), 16);
        assert_eq!(decoder.time_signature(), "4/3");
        assert_eq!(decoder.string_count(), 6);
        assert!(!decoder.is_strict());
    }

    #[test]
    fn test_decode_bytes_windows_1252() {
        // 0xB4 is an acute accent in Windows-1252
        let data = b"E|0\xB4\nA|1-\n";
        let tab = TabDecoder::new(4, "4/4", 2).decode_bytes(data).unwrap();
        assert_eq!(tab.sequences, vec!["0\u{b4}", "1-"]);
    }
}
