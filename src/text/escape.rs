//! logos-based lexer for inline style escapes.
//!
//! Text strings may embed sequences of the form `ESC [ <digits> m`. The lexer
//! splits a string into plain runs and escapes:
//!
//! - an escape runs from `ESC` up to and including the next `m`
//! - an `ESC` with no later `m` swallows the rest of the string and yields
//!   nothing
//!
//! The code is read like C `atoi` over the bytes following the introducer, so
//! `ESC[m` is code 0.

use logos::Logos;

use crate::style::Palette;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum Piece {
    /// A terminated escape sequence.
    #[regex(r"\x1b[^m]*m")]
    Escape,

    /// An escape with no terminating `m` before the end of input.
    #[regex(r"\x1b[^m]*")]
    Unterminated,

    /// A run of ordinary characters.
    #[regex(r"[^\x1b]+")]
    Text,
}

/// Effect of one escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleCode {
    /// `0`: back to the window's resolved color.
    Reset,
    /// `5`: the text cursor sits here.
    Cursor,
    /// `30`..=`37`.
    Foreground(Palette),
    /// `40`..=`47`.
    Background(Palette),
    /// Any other code; has no effect.
    Ignored(u32),
}

impl StyleCode {
    /// Interpret a numeric code.
    pub fn from_code(code: u32) -> StyleCode {
        match code {
            0 => StyleCode::Reset,
            5 => StyleCode::Cursor,
            30..=37 => Palette::ansi((code - 30) as u8)
                .map_or(StyleCode::Ignored(code), StyleCode::Foreground),
            40..=47 => Palette::ansi((code - 40) as u8)
                .map_or(StyleCode::Ignored(code), StyleCode::Background),
            other => StyleCode::Ignored(other),
        }
    }
}

/// A piece of a styled string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Style(StyleCode),
}

/// Split `input` into text runs and style codes, dropping unterminated escapes.
pub fn segments(input: &str) -> Vec<Segment<'_>> {
    Piece::lexer(input)
        .spanned()
        .filter_map(|(result, span)| {
            let slice = &input[span];
            match result {
                Ok(Piece::Escape) => Some(Segment::Style(StyleCode::from_code(escape_code(slice)))),
                Ok(Piece::Unterminated) => None,
                Ok(Piece::Text) | Err(()) => Some(Segment::Text(slice)),
            }
        })
        .collect()
}

/// `input` with every escape sequence removed.
pub fn plain_text(input: &str) -> String {
    segments(input)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Text(text) => Some(text),
            Segment::Style(_) => None,
        })
        .collect()
}

/// Numeric code of a terminated escape slice (`ESC`, introducer, body, `m`).
fn escape_code(slice: &str) -> u32 {
    let body = slice.strip_prefix('\x1b').unwrap_or(slice);
    let body = body.strip_suffix('m').unwrap_or(body);
    let mut chars = body.chars();
    chars.next();
    let digits: String = chars.take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        0
    } else {
        digits.parse().unwrap_or(u32::MAX)
    }
}
