//! Per-frame text area rendering.
//!
//! Each visible row is produced in a fixed order: gutter, tab expansion,
//! bracket lookup on the raw line, syntax highlighting, bracket styling,
//! horizontal slicing, cursor overlay, then padding to the text width. All
//! work after highlighting goes through `ansi` so escapes are never split.
//! Rows past the end of the document render as `~`.

use core_state::Mode;
use core_syntax::{Highlighter, find_matching_bracket, is_bracket};
use core_text::{BINARY_PLACEHOLDER, Buffer, tabs};
use tracing::trace;

use crate::ansi::{fit_width, restyle_at, safe_slice};
use crate::{Theme, Viewport};

/// Everything one frame of the text area depends on.
pub struct RenderContext<'a> {
    pub buffer: &'a Buffer,
    pub viewport: &'a Viewport,
    pub highlighter: &'a Highlighter,
    pub theme: &'a Theme,
    pub mode: Mode,
}

/// Raw char indices of the bracket under the cursor and its partner.
pub fn bracket_pair(line: &str, col: usize) -> Option<(usize, usize)> {
    let c = line.chars().nth(col)?;
    if !is_bracket(c) {
        return None;
    }
    find_matching_bracket(line, col).map(|m| (col, m))
}

impl RenderContext<'_> {
    /// Exactly `viewport.height()` rows, each `viewport.width()` visible cells.
    pub fn render_rows(&self) -> Vec<String> {
        let height = self.viewport.height();
        if self.viewport.is_binary() || !self.buffer.is_modifiable() {
            return self.render_binary_notice();
        }
        let count = self.buffer.line_count();
        let mut rows = Vec::with_capacity(height);
        for row in 0..height {
            let idx = self.viewport.scroll_y + row;
            if idx < count {
                rows.push(self.render_line(idx));
            } else {
                rows.push(self.filler_row());
            }
        }
        trace!(target: "render", scroll_y = self.viewport.scroll_y, rows = rows.len(), "render_rows");
        rows
    }

    fn filler_row(&self) -> String {
        let width = self.viewport.width();
        if width == 0 {
            return String::new();
        }
        fit_width(&self.theme.filler.apply('~').to_string(), width)
    }

    fn render_binary_notice(&self) -> Vec<String> {
        let (width, height) = (self.viewport.width(), self.viewport.height());
        let notice_len = BINARY_PLACEHOLDER.chars().count();
        let pad = width.saturating_sub(notice_len) / 2;
        (0..height)
            .map(|row| {
                if row == height / 2 {
                    let text = format!("{}{}", " ".repeat(pad), self.theme.notice.apply(BINARY_PLACEHOLDER));
                    fit_width(&text, width)
                } else {
                    " ".repeat(width)
                }
            })
            .collect()
    }

    fn render_line(&self, idx: usize) -> String {
        let vp = self.viewport;
        let cursor = self.buffer.cursor();
        let on_cursor_line = idx == cursor.line();
        let raw = self.buffer.line(idx);
        let tab = vp.tab_width();

        let mut row = String::new();
        if vp.show_line_numbers() {
            let style = if on_cursor_line { self.theme.gutter_active } else { self.theme.gutter };
            row.push_str(&style.apply(format!("{:>4} ", idx + 1)).to_string());
        }

        let display = tabs::expand_tabs(raw, tab);
        let brackets = if on_cursor_line && self.mode.is_editing() {
            bracket_pair(raw, cursor.col())
        } else {
            None
        };

        let mut text = self.highlighter.highlight(&display);
        if let Some((a, b)) = brackets {
            for raw_idx in [a, b] {
                let at = tabs::display_col(raw, raw_idx, tab);
                text = restyle_at(&text, at, self.theme.bracket_match);
            }
        }

        let width = vp.text_width();
        let mut text = safe_slice(&text, vp.scroll_x, vp.scroll_x + width);

        if on_cursor_line {
            let at = tabs::display_col(raw, cursor.col(), tab);
            if at >= vp.scroll_x && at < vp.scroll_x + width {
                let style = if self.mode == Mode::Insert {
                    self.theme.cursor_insert
                } else {
                    self.theme.cursor_normal
                };
                text = restyle_at(&text, at - vp.scroll_x, style);
            }
        }

        row.push_str(&fit_width(&text, width));
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{strip_ansi, visible_width};
    use core_syntax::SyntaxTheme;
    use pretty_assertions::assert_eq;

    fn render(buffer: &Buffer, vp: &Viewport, mode: Mode) -> Vec<String> {
        let highlighter = Highlighter::new(SyntaxTheme::default());
        let theme = Theme::default();
        RenderContext {
            buffer,
            viewport: vp,
            highlighter: &highlighter,
            theme: &theme,
            mode,
        }
        .render_rows()
    }

    #[test]
    fn rows_have_gutter_and_filler() {
        let b = Buffer::from_content("ab\ncd", None);
        let vp = Viewport::new(12, 4);
        let rows: Vec<String> = render(&b, &vp, Mode::Normal).iter().map(|r| strip_ansi(r)).collect();
        assert_eq!(
            rows,
            vec![
                "   1 ab     ".to_string(),
                "   2 cd     ".to_string(),
                "~           ".to_string(),
                "~           ".to_string(),
            ]
        );
    }

    #[test]
    fn every_row_is_exactly_viewport_width() {
        let b = Buffer::from_content("\tfn main() { let x = \"long string here\"; }", None);
        let mut vp = Viewport::new(20, 3);
        vp.attach(&b);
        for row in render(&b, &vp, Mode::Insert) {
            assert_eq!(visible_width(&row), 20);
        }
    }

    #[test]
    fn cursor_at_line_end_appends_a_cell() {
        let mut b = Buffer::from_content("abc", None);
        b.move_cursor(|c, l| c.move_to_line_end(l));
        let mut vp = Viewport::new(10, 1);
        vp.set_show_line_numbers(false);
        let row = &render(&b, &vp, Mode::Insert)[0];
        assert_eq!(strip_ansi(row), "abc       ");
        assert!(row.contains(&Theme::default().cursor_insert.apply(' ').to_string()));
    }

    #[test]
    fn horizontal_scroll_slices_display_line() {
        let b = Buffer::from_content("\tabcdef", None);
        let mut vp = Viewport::new(4, 1);
        vp.set_show_line_numbers(false);
        vp.scroll_x = 5;
        let row = &render(&b, &vp, Mode::Normal)[0];
        assert_eq!(strip_ansi(row), "bcde");
    }

    #[test]
    fn bracket_pair_only_on_brackets() {
        assert_eq!(bracket_pair("f(x)", 1), Some((1, 3)));
        assert_eq!(bracket_pair("f(x)", 0), None);
        assert_eq!(bracket_pair("f(x", 1), None);
    }

    #[test]
    fn matching_bracket_is_styled_at_display_column() {
        let mut b = Buffer::from_content("\t(x)", None);
        b.move_cursor(|c, _| c.set_position(0, 1));
        let mut vp = Viewport::new(10, 1);
        vp.set_show_line_numbers(false);
        let row = &render(&b, &vp, Mode::Normal)[0];
        let bracket = Theme::default().bracket_match.apply(')').to_string();
        assert!(row.contains(&bracket), "{row:?}");
        assert_eq!(strip_ansi(row), "    (x)   ");
    }

    #[test]
    fn binary_buffer_shows_notice() {
        let b = Buffer::binary("x.bin".into());
        let mut vp = Viewport::new(40, 3);
        vp.attach(&b);
        let rows = render(&b, &vp, Mode::Normal);
        assert_eq!(rows.len(), 3);
        assert!(strip_ansi(&rows[1]).contains(BINARY_PLACEHOLDER));
        assert_eq!(strip_ansi(&rows[0]).trim(), "");
    }
}
