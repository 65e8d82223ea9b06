//! ANSI-escape-aware string primitives.
//!
//! Strings produced by the highlighter interleave `ESC … <letter>` sequences
//! with visible chars. Every function here counts only visible chars toward
//! positions and never splits an escape sequence. An escape starts at ESC and
//! runs through the first ASCII letter after it; an unterminated escape runs
//! to the end of the string.

use crossterm::style::ContentStyle;

const ESC: char = '\u{1b}';
const RESET: &str = "\u{1b}[0m";

/// One lexical piece of a styled string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    Escape(&'a str),
    Visible(char),
}

/// Iterator splitting a styled string into escapes and visible chars.
pub struct Pieces<'a> {
    s: &'a str,
    pos: usize,
}

pub fn pieces(s: &str) -> Pieces<'_> {
    Pieces { s, pos: 0 }
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Piece<'a>> {
        let rest = &self.s[self.pos..];
        let c = rest.chars().next()?;
        if c != ESC {
            self.pos += c.len_utf8();
            return Some(Piece::Visible(c));
        }
        let body = &rest[ESC.len_utf8()..];
        let len = body
            .char_indices()
            .find(|(_, ch)| ch.is_ascii_alphabetic())
            .map(|(i, ch)| ESC.len_utf8() + i + ch.len_utf8())
            .unwrap_or(rest.len());
        self.pos += len;
        Some(Piece::Escape(&rest[..len]))
    }
}

/// `s` with every escape sequence removed.
pub fn strip_ansi(s: &str) -> String {
    pieces(s)
        .filter_map(|p| match p {
            Piece::Visible(c) => Some(c),
            Piece::Escape(_) => None,
        })
        .collect()
}

/// Number of visible chars in `s`.
pub fn visible_width(s: &str) -> usize {
    pieces(s)
        .filter(|p| matches!(p, Piece::Visible(_)))
        .count()
}

/// Visible chars `[start, end)` of `s`. Every escape of the input is kept in
/// order, so the style in effect at each kept char, and after the slice, is
/// the same as in the full string.
pub fn safe_slice(s: &str, start: usize, end: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut idx = 0usize;
    for piece in pieces(s) {
        match piece {
            Piece::Escape(e) => out.push_str(e),
            Piece::Visible(c) => {
                if idx >= start && idx < end {
                    out.push(c);
                }
                idx += 1;
            }
        }
    }
    out
}

/// Restyle the visible char at `idx` with `style`, then restore the styling
/// that was active before it. When `idx` is past the last visible char a
/// styled space is appended instead.
pub fn restyle_at(s: &str, idx: usize, style: ContentStyle) -> String {
    let mut out = String::with_capacity(s.len() + 24);
    let mut active: Vec<&str> = Vec::new();
    let mut seen = 0usize;
    let mut done = false;
    for piece in pieces(s) {
        match piece {
            Piece::Escape(e) => {
                if e == RESET || e == "\u{1b}[m" {
                    active.clear();
                } else {
                    active.push(e);
                }
                out.push_str(e);
            }
            Piece::Visible(c) => {
                if seen == idx {
                    out.push_str(RESET);
                    out.push_str(&style.apply(c).to_string());
                    out.push_str(RESET);
                    active.iter().for_each(|e| out.push_str(e));
                    done = true;
                } else {
                    out.push(c);
                }
                seen += 1;
            }
        }
    }
    if !done {
        out.push_str(&style.apply(' ').to_string());
    }
    out
}

/// Pad with spaces (or truncate) to exactly `width` visible chars.
pub fn fit_width(s: &str, width: usize) -> String {
    let w = visible_width(s);
    if w > width {
        return safe_slice(s, 0, width);
    }
    let mut out = String::with_capacity(s.len() + width - w);
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', width - w));
    out
}
