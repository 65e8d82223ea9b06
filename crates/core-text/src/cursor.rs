//! Cursor position and movement.
//!
//! The cursor is a bare `(line, col)` coordinate. Every movement takes the
//! line view to clamp against as a parameter; nothing here holds a reference
//! back to a buffer. `col` is a char index into the raw stored line.
//!
//! All movements keep `line < line_count` and `col <= line_len(line)`.
//! `set_position` is the only unchecked mutator.

use crate::LineSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    line: usize,
    col: usize,
}

/// Whitespace and the punctuation that separates words for `w` / `b`.
pub fn is_word_boundary(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '.' | ',' | ';' | ':' | '(' | ')' | '[' | ']' | '{' | '}'
    )
}

impl Cursor {
    pub fn new() -> Self {
        Self { line: 0, col: 0 }
    }

    pub fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    pub fn line(&self) -> usize {
        self.line
    }
    pub fn col(&self) -> usize {
        self.col
    }
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    /// Unchecked. Callers must already have validated the coordinates.
    pub fn set_position(&mut self, line: usize, col: usize) {
        self.line = line;
        self.col = col;
    }

    /// Pull an arbitrary position back into the valid range.
    pub fn clamp<S: LineSource + ?Sized>(&mut self, src: &S) {
        let count = src.line_count().max(1);
        if self.line >= count {
            self.line = count - 1;
        }
        self.clamp_col(src);
    }

    fn clamp_col<S: LineSource + ?Sized>(&mut self, src: &S) {
        let len = src.line_len(self.line);
        if self.col > len {
            self.col = len;
        }
    }

    pub fn move_up<S: LineSource + ?Sized>(&mut self, src: &S) {
        if self.line > 0 {
            self.line -= 1;
            self.clamp_col(src);
        }
    }

    pub fn move_down<S: LineSource + ?Sized>(&mut self, src: &S) {
        if self.line + 1 < src.line_count() {
            self.line += 1;
            self.clamp_col(src);
        }
    }

    /// At column 0 wraps to the end of the previous line.
    pub fn move_left<S: LineSource + ?Sized>(&mut self, src: &S) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.line > 0 {
            self.line -= 1;
            self.col = src.line_len(self.line);
        }
    }

    /// At end of line wraps to the start of the next line.
    pub fn move_right<S: LineSource + ?Sized>(&mut self, src: &S) {
        if self.col < src.line_len(self.line) {
            self.col += 1;
        } else if self.line + 1 < src.line_count() {
            self.line += 1;
            self.col = 0;
        }
    }

    pub fn move_to_line_start(&mut self) {
        self.col = 0;
    }

    pub fn move_to_line_end<S: LineSource + ?Sized>(&mut self, src: &S) {
        self.col = src.line_len(self.line);
    }

    pub fn move_to_buffer_start(&mut self) {
        self.line = 0;
        self.col = 0;
    }

    pub fn move_to_buffer_end<S: LineSource + ?Sized>(&mut self, src: &S) {
        self.line = src.line_count().saturating_sub(1);
        self.col = src.line_len(self.line);
    }

    pub fn move_page_up<S: LineSource + ?Sized>(&mut self, src: &S, page: usize) {
        self.line = self.line.saturating_sub(page);
        self.clamp_col(src);
    }

    pub fn move_page_down<S: LineSource + ?Sized>(&mut self, src: &S, page: usize) {
        let last = src.line_count().saturating_sub(1);
        self.line = self.line.saturating_add(page).min(last);
        self.clamp_col(src);
    }

    /// Skip the rest of the current word, then any boundary run. Reaching the
    /// end of the line continues at the start of the next one.
    pub fn move_word_forward<S: LineSource + ?Sized>(&mut self, src: &S) {
        let chars: Vec<char> = src.line(self.line).unwrap_or("").chars().collect();
        while self.col < chars.len() && !is_word_boundary(chars[self.col]) {
            self.col += 1;
        }
        while self.col < chars.len() && is_word_boundary(chars[self.col]) {
            self.col += 1;
        }
        if self.col >= chars.len() && self.line + 1 < src.line_count() {
            self.line += 1;
            self.col = 0;
        }
    }

    /// Step back over boundaries, then to the start of the word. At column 0
    /// moves to the end of the previous line.
    pub fn move_word_backward<S: LineSource + ?Sized>(&mut self, src: &S) {
        if self.col == 0 {
            if self.line > 0 {
                self.line -= 1;
                self.col = src.line_len(self.line);
            }
            return;
        }
        let chars: Vec<char> = src.line(self.line).unwrap_or("").chars().collect();
        if chars.is_empty() {
            self.col = 0;
            return;
        }
        self.col = self.col.min(chars.len()) - 1;
        while self.col > 0 && is_word_boundary(chars[self.col]) {
            self.col -= 1;
        }
        while self.col > 0 && !is_word_boundary(chars[self.col - 1]) {
            self.col -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn left_wraps_to_previous_line_end() {
        let l = lines(&["abc", "de"]);
        let mut c = Cursor::at(1, 0);
        c.move_left(&l);
        assert_eq!(c.position(), (0, 3));
        let mut c = Cursor::new();
        c.move_left(&l);
        assert_eq!(c.position(), (0, 0));
    }

    #[test]
    fn right_wraps_to_next_line_start() {
        let l = lines(&["ab", "c"]);
        let mut c = Cursor::at(0, 2);
        c.move_right(&l);
        assert_eq!(c.position(), (1, 0));
    }

    #[test]
    fn right_on_last_line_is_idempotent_at_end() {
        let l = lines(&["xy", "hello"]);
        let mut c = Cursor::at(1, 0);
        for _ in 0..6 {
            c.move_right(&l);
        }
        assert_eq!(c.position(), (1, 5));
        c.move_right(&l);
        c.move_right(&l);
        assert_eq!(c.position(), (1, 5));
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let l = lines(&["long line", "ab", "longer line"]);
        let mut c = Cursor::at(0, 8);
        c.move_down(&l);
        assert_eq!(c.position(), (1, 2));
        c.move_down(&l);
        assert_eq!(c.position(), (2, 2), "column stays clamped, no sticky goal");
        c.move_down(&l);
        assert_eq!(c.line(), 2);
        c.move_up(&l);
        c.move_up(&l);
        c.move_up(&l);
        assert_eq!(c.line(), 0);
    }

    #[test]
    fn word_forward_skips_word_and_boundaries() {
        let l = lines(&["foo.bar(baz)", "next"]);
        let mut c = Cursor::new();
        c.move_word_forward(&l);
        assert_eq!(c.col(), 4);
        c.move_word_forward(&l);
        assert_eq!(c.col(), 8);
        c.move_word_forward(&l);
        assert_eq!(c.position(), (1, 0), "end of line continues on next line");
    }

    #[test]
    fn word_backward_lands_on_word_start() {
        let l = lines(&["alpha", "foo  bar"]);
        let mut c = Cursor::at(1, 8);
        c.move_word_backward(&l);
        assert_eq!(c.position(), (1, 5));
        c.move_word_backward(&l);
        assert_eq!(c.position(), (1, 0));
        c.move_word_backward(&l);
        assert_eq!(c.position(), (0, 5));
    }

    #[test]
    fn page_moves_clamp_to_document() {
        let l = lines(&["a", "bb", "ccc", "d"]);
        let mut c = Cursor::at(2, 3);
        c.move_page_down(&l, 10);
        assert_eq!(c.position(), (3, 1));
        c.move_page_up(&l, 10);
        assert_eq!(c.position(), (0, 1));
    }

    #[test]
    fn buffer_end_and_start() {
        let l = lines(&["a", "last"]);
        let mut c = Cursor::new();
        c.move_to_buffer_end(&l);
        assert_eq!(c.position(), (1, 4));
        c.move_to_line_start();
        assert_eq!(c.col(), 0);
        c.move_to_line_end(&l);
        assert_eq!(c.col(), 4);
        c.move_to_buffer_start();
        assert_eq!(c.position(), (0, 0));
    }

    #[test]
    fn columns_count_chars_not_bytes() {
        let l = lines(&["héllo"]);
        let mut c = Cursor::new();
        c.move_to_line_end(&l);
        assert_eq!(c.col(), 5);
    }

    #[test]
    fn clamp_recovers_from_unchecked_position() {
        let l = lines(&["ab"]);
        let mut c = Cursor::new();
        c.set_position(7, 9);
        c.clamp(&l);
        assert_eq!(c.position(), (0, 2));
    }
}
