//! Viewport scroll state.
//!
//! A `Viewport` is the rectangular window onto one buffer. It stores the
//! attached buffer's id, not a reference; the buffer is passed in for every
//! call that needs it.
//!
//! Invariants:
//! * `scroll_y <= max(0, line_count - height)` after `scroll_up` /
//!   `scroll_down`; `adjust_scroll` may go further so the cursor line is the
//!   last visible row.
//! * After `adjust_scroll` the cursor's line lies in
//!   `[scroll_y, scroll_y + height)` and its display column in
//!   `[scroll_x, scroll_x + text_width)`.
//! * `height` counts text rows only; the status and message lines are laid
//!   out by the caller.

use core_text::{Buffer, BufferId, Cursor, DEFAULT_TAB_WIDTH, tabs::display_col};
use tracing::trace;

/// Cells used by the `"{:>4} "` line-number gutter.
pub const GUTTER_WIDTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    buffer: Option<BufferId>,
    pub scroll_y: usize,
    pub scroll_x: usize,
    width: usize,
    height: usize,
    tab_width: usize,
    show_line_numbers: bool,
    binary: bool,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: None,
            scroll_y: 0,
            scroll_x: 0,
            width,
            height,
            tab_width: DEFAULT_TAB_WIDTH,
            show_line_numbers: true,
            binary: false,
        }
    }

    /// Point the viewport at `buffer`: scroll resets, tab width and binary
    /// flag are adopted from it.
    pub fn attach(&mut self, buffer: &Buffer) {
        self.buffer = buffer.id();
        self.scroll_y = 0;
        self.scroll_x = 0;
        self.tab_width = buffer.tab_width();
        self.binary = !buffer.is_modifiable();
        trace!(target: "render", buffer = ?self.buffer, tab_width = self.tab_width, "viewport_attach");
    }

    pub fn buffer(&self) -> Option<BufferId> {
        self.buffer
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }
    pub fn set_tab_width(&mut self, width: usize) {
        self.tab_width = width.max(1);
    }

    pub fn is_binary(&self) -> bool {
        self.binary
    }

    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }
    pub fn set_show_line_numbers(&mut self, on: bool) {
        self.show_line_numbers = on;
    }

    pub fn gutter_width(&self) -> usize {
        if self.show_line_numbers { GUTTER_WIDTH } else { 0 }
    }

    /// Columns available for text after the gutter.
    pub fn text_width(&self) -> usize {
        self.width.saturating_sub(self.gutter_width())
    }

    /// Scroll the minimum amount that brings the cursor into view.
    pub fn adjust_scroll(&mut self, buffer: &Buffer) {
        let cursor = buffer.cursor();
        let height = self.height.max(1);
        if cursor.line() < self.scroll_y {
            self.scroll_y = cursor.line();
        } else if cursor.line() >= self.scroll_y + height {
            self.scroll_y = cursor.line() + 1 - height;
        }

        let width = self.text_width().max(1);
        let col = display_col(buffer.line(cursor.line()), cursor.col(), self.tab_width);
        if col < self.scroll_x {
            self.scroll_x = col;
        } else if col >= self.scroll_x + width {
            self.scroll_x = col + 1 - width;
        }
    }

    fn max_scroll(&self, line_count: usize) -> usize {
        line_count.saturating_sub(self.height)
    }

    pub fn scroll_up(&mut self, lines: usize, line_count: usize) {
        self.scroll_y = self
            .scroll_y
            .saturating_sub(lines)
            .min(self.max_scroll(line_count));
    }

    pub fn scroll_down(&mut self, lines: usize, line_count: usize) {
        self.scroll_y = self
            .scroll_y
            .saturating_add(lines)
            .min(self.max_scroll(line_count));
    }

    /// Put the cursor line at the vertical midpoint (clamped at the top).
    pub fn center_cursor(&mut self, cursor: &Cursor) {
        self.scroll_y = cursor.line().saturating_sub(self.height / 2);
    }

    /// Buffer lines `[scroll_y, scroll_y + height)` clamped to `line_count`.
    pub fn visible_range(&self, line_count: usize) -> std::ops::Range<usize> {
        let start = self.scroll_y.min(line_count);
        start..(self.scroll_y + self.height).min(line_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with_lines(n: usize) -> Buffer {
        let content: Vec<String> = (0..n).map(|i| format!("line {i}")).collect();
        Buffer::from_content(&content.join("\n"), None)
    }

    #[test]
    fn adjust_scroll_follows_cursor_down_and_up() {
        let mut b = buffer_with_lines(50);
        let mut vp = Viewport::new(80, 10);
        b.move_cursor(|c, l| c.move_page_down(l, 25));
        vp.adjust_scroll(&b);
        assert_eq!(vp.scroll_y, 16);
        b.move_cursor(|c, l| c.move_page_up(l, 20));
        vp.adjust_scroll(&b);
        assert_eq!(vp.scroll_y, 5);
    }

    #[test]
    fn adjust_scroll_uses_display_column() {
        let mut b = Buffer::from_content("\t\t\tx", None);
        let mut vp = Viewport::new(15, 5);
        vp.attach(&b);
        vp.set_tab_width(4);
        b.move_cursor(|c, l| c.move_to_line_end(l));
        vp.adjust_scroll(&b);
        // display col 13, text width 10
        assert_eq!(vp.scroll_x, 4);
    }

    #[test]
    fn explicit_scroll_is_clamped() {
        let mut vp = Viewport::new(80, 10);
        vp.scroll_down(100, 25);
        assert_eq!(vp.scroll_y, 15);
        vp.scroll_up(3, 25);
        assert_eq!(vp.scroll_y, 12);
        vp.scroll_up(100, 25);
        assert_eq!(vp.scroll_y, 0);
        vp.scroll_down(5, 4);
        assert_eq!(vp.scroll_y, 0, "short documents never scroll");
    }

    #[test]
    fn center_cursor_clamps_at_zero() {
        let mut vp = Viewport::new(80, 10);
        vp.center_cursor(&Cursor::at(30, 0));
        assert_eq!(vp.scroll_y, 25);
        vp.center_cursor(&Cursor::at(2, 0));
        assert_eq!(vp.scroll_y, 0);
    }

    #[test]
    fn attach_resets_scroll_and_adopts_buffer_settings() {
        let mut b = Buffer::from_content("x", None);
        b.set_id(BufferId(7));
        b.set_tab_width(8);
        let mut vp = Viewport::new(80, 10);
        vp.scroll_y = 9;
        vp.scroll_x = 3;
        vp.attach(&b);
        assert_eq!(vp.buffer(), Some(BufferId(7)));
        assert_eq!((vp.scroll_y, vp.scroll_x), (0, 0));
        assert_eq!(vp.tab_width(), 8);
        assert!(!vp.is_binary());
    }

    #[test]
    fn visible_range_clamps_to_document() {
        let mut vp = Viewport::new(80, 10);
        vp.scroll_y = 3;
        assert_eq!(vp.visible_range(8), 3..8);
        assert_eq!(vp.visible_range(100), 3..13);
    }
}
