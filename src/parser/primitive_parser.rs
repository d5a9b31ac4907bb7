use crate::parser::notation::{BAR, HEADER_START};
use encoding_rs::WINDOWS_1252;
use nom::branch::alt;
use nom::character::complete::{anychar, char};
use nom::combinator::{eof, map, opt, rest};
use nom::sequence::preceded;
use nom::{IResult, Parser};

/// One line of raw tablature text, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLine<'a> {
    Blank,
    /// Section name, e.g. `Intro` for `[Intro]`
    Header(&'a str),
    Tab(TabLine<'a>),
}

/// `<root><separator><content>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabLine<'a> {
    pub root: char,
    /// Missing when the line holds nothing but the root
    pub separator: Option<char>,
    pub content: &'a str,
}

impl TabLine<'_> {
    /// Content with every bar separator removed.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.content.chars().filter(|c| *c != BAR)
    }
}

/// Materialize properly encoded String, falling back to Windows-1252 for legacy files.
pub fn make_string(i: &[u8]) -> String {
    match std::str::from_utf8(i) {
        Ok(s) => s.to_string(),
        Err(e) => {
            log::debug!("Error UTF-8 string parsing:{e}");
            let (cow, encoding_used, had_errors) = WINDOWS_1252.decode(i);
            if had_errors {
                log::debug!("Error parsing string with {encoding_used:?}");
            }
            cow.into_owned()
        }
    }
}

/// Parse a tab line, the content being everything after the first two characters.
pub fn parse_tab_line(i: &str) -> IResult<&str, TabLine<'_>> {
    (anychar, opt(anychar), rest)
        .parse(i)
        .map(|(i, (root, separator, content))| {
            let line = TabLine {
                root,
                separator,
                content,
            };
            (i, line)
        })
}

/// Parse a section header, e.g. `[Verse]`
pub fn parse_header(i: &str) -> IResult<&str, &str> {
    preceded(char(HEADER_START), rest)
        .parse(i)
        .map(|(i, name)| (i, name.trim_end_matches(']')))
}

/// Classify a single line stripped of its terminator.
pub fn parse_raw_line(i: &str) -> IResult<&str, RawLine<'_>> {
    alt((
        map(eof, |_| RawLine::Blank),
        map(parse_header, RawLine::Header),
        map(parse_tab_line, RawLine::Tab),
    ))
    .parse(i)
}
