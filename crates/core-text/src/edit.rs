//! Edit operations layered on `Buffer` + its embedded `Cursor`.
//!
//! Every mutator takes explicit `(line, col)` coordinates, absorbs invalid
//! ones, and leaves the cursor at the landing position of the edit. All of
//! them funnel through `record_edit`, which snapshots the affected line range
//! so `undo` / `redo` can splice it back.
//!
//! Typing rules applied by `insert_rune`, in priority order:
//! 1. `>` in a markup file (`TAG_CLOSE_EXTENSIONS`) completing an opening tag
//!    inserts `>` plus `</name>`; the cursor stops right after `>`.
//! 2. An opener from `{ [ ( ' " `` ` ``` inserts the pair; the cursor stops
//!    between them.
//! 3. A closer typed directly in front of a closer that rule 2 inserted steps
//!    over it. Any other edit or cursor move forgets that closer.
//! 4. Anything else is inserted as-is.

use tracing::{debug, trace};

use crate::history::History;
use crate::{Buffer, Change, Cursor, byte_index};

/// Extensions whose buffers get `>` tag auto-closing.
pub const TAG_CLOSE_EXTENSIONS: &[&str] = &[".jsx", ".tsx", ".xml", ".html"];

/// Trailing characters that open an indented block on newline.
const INDENT_TRIGGERS: &[char] = &['{', '[', '(', ':'];

/// Columns a leading tab contributes when measuring indentation.
const TAB_INDENT_COLUMNS: usize = 4;

/// Closer inserted alongside an auto-paired opener.
pub fn closing_pair(c: char) -> Option<char> {
    match c {
        '{' => Some('}'),
        '[' => Some(']'),
        '(' => Some(')'),
        '\'' | '"' | '`' => Some(c),
        _ => None,
    }
}

fn is_closer(c: char) -> bool {
    matches!(c, '}' | ']' | ')' | '\'' | '"' | '`')
}

/// Width of the leading whitespace of `line`; tabs count as four.
pub fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { TAB_INDENT_COLUMNS } else { 1 })
        .sum()
}

/// Tag name to close when `>` is typed at char index `col`, if the text
/// before `col` ends inside an opening tag.
pub fn tag_to_close(line: &str, col: usize) -> Option<String> {
    let before: Vec<char> = line.chars().take(col).collect();
    if before.last() == Some(&'/') {
        return None;
    }
    let open = before.iter().rposition(|c| *c == '<' || *c == '>')?;
    if before[open] == '>' {
        return None;
    }
    let name: String = before[open + 1..]
        .iter()
        .take_while(|c| !matches!(c, ' ' | '\t' | '>' | '/'))
        .collect();
    if name.is_empty() || name.starts_with(['!', '?']) {
        None
    } else {
        Some(name)
    }
}

impl Buffer {
    /// Apply `apply` to the lines, recording `start..start + old_len` before
    /// and the corresponding range after. Returns whether anything changed.
    pub(crate) fn record_edit<F>(&mut self, start: usize, old_len: usize, apply: F) -> bool
    where
        F: FnOnce(&mut Vec<String>) -> Option<Cursor>,
    {
        self.pending_closer = None;
        let cursor_before = self.cursor;
        let count_before = self.lines.len();
        let before = self.lines[start..start + old_len].to_vec();
        let landing = apply(&mut self.lines);
        let new_len = (old_len + self.lines.len()).saturating_sub(count_before);
        let after = self.lines[start..start + new_len].to_vec();
        if let Some(c) = landing {
            self.cursor = c;
        }
        if before == after {
            return false;
        }
        self.modified = true;
        self.history.record(Change {
            start,
            before,
            after,
            cursor_before,
            cursor_after: self.cursor,
        });
        true
    }

    fn editable_line(&self, line: usize) -> bool {
        self.is_modifiable() && line < self.lines.len()
    }

    /// Insert one char at `(line, col)`, applying tag-closing and auto-pairing.
    /// `col` is clamped into the line.
    pub fn insert_rune(&mut self, line: usize, col: usize, ch: char) {
        if !self.editable_line(line) {
            return;
        }
        let col = col.min(self.line_len(line));

        let tag = if ch == '>'
            && self.auto_close_tags
            && TAG_CLOSE_EXTENSIONS.contains(&self.extension().as_str())
        {
            tag_to_close(&self.lines[line], col)
        } else {
            None
        };

        let pending = self.pending_closer.take();
        if tag.is_none()
            && is_closer(ch)
            && pending == Some((line, col))
            && self.lines[line].chars().nth(col) == Some(ch)
        {
            trace!(target: "text.edit", line, col, "type_over_closer");
            self.cursor = Cursor::at(line, col + 1);
            return;
        }

        let mut text = String::from(ch);
        let mut paired = false;
        if let Some(name) = &tag {
            text.push_str(&format!("</{name}>"));
        } else if self.auto_pair
            && let Some(close) = closing_pair(ch)
        {
            text.push(close);
            paired = true;
        }
        debug!(target: "text.edit", line, col, inserted = text.as_str(), "insert_rune");
        let inserted = text.chars().count();
        self.record_edit(line, 1, |lines| {
            let at = byte_index(&lines[line], col);
            lines[line].insert_str(at, &text);
            Some(Cursor::at(line, col + 1))
        });
        self.pending_closer = if paired {
            Some((line, col + 1))
        } else {
            pending
                .filter(|&(l, c)| l == line && c >= col)
                .map(|(l, c)| (l, c + inserted))
        };
    }

    /// Backspace at `(line, col)`. Column 0 joins the line onto the previous
    /// one; `(0, 0)` and columns past the end are no-ops.
    pub fn delete_rune(&mut self, line: usize, col: usize) {
        if !self.editable_line(line) || col > self.line_len(line) {
            return;
        }
        if col == 0 {
            if line == 0 {
                return;
            }
            let prev_len = self.line_len(line - 1);
            debug!(target: "text.edit", line, "join_previous_line");
            self.record_edit(line - 1, 2, |lines| {
                let current = lines.remove(line);
                lines[line - 1].push_str(&current);
                Some(Cursor::at(line - 1, prev_len))
            });
            return;
        }
        self.record_edit(line, 1, |lines| {
            let s = &mut lines[line];
            let start = byte_index(s, col - 1);
            let end = byte_index(s, col);
            s.replace_range(start..end, "");
            Some(Cursor::at(line, col - 1))
        });
    }

    /// Split the line at `col` with auto-indent. After an indent trigger the
    /// split yields two lines: the increased indent (cursor lands here) and
    /// the remainder back at the base indent.
    pub fn insert_newline(&mut self, line: usize, col: usize) {
        if !self.editable_line(line) {
            return;
        }
        let col = col.min(self.line_len(line));
        let tab = self.tab_width();
        self.record_edit(line, 1, |lines| {
            let current = std::mem::take(&mut lines[line]);
            let indent = indent_width(&current);
            let (left, right) = current.split_at(byte_index(&current, col));
            let remainder = right.trim_start();
            let increase = left.trim_end().ends_with(INDENT_TRIGGERS);
            debug!(target: "text.edit", line, col, indent, increase, "insert_newline");

            let carried = format!("{}{}", " ".repeat(indent), remainder);
            lines[line] = left.to_owned();
            if increase {
                let inner = " ".repeat(indent + tab);
                lines.splice(line + 1..line + 1, [inner, carried]);
                Some(Cursor::at(line + 1, indent + tab))
            } else {
                lines.insert(line + 1, carried);
                Some(Cursor::at(line + 1, indent))
            }
        });
    }

    /// Remove a whole line. The sole line is replaced by an empty one.
    pub fn delete_line(&mut self, line: usize) {
        if !self.editable_line(line) {
            return;
        }
        let col = self.cursor.col();
        debug!(target: "text.edit", line, "delete_line");
        self.record_edit(line, 1, |lines| {
            lines.remove(line);
            if lines.is_empty() {
                lines.push(String::new());
            }
            let target = line.min(lines.len() - 1);
            let len = lines[target].chars().count();
            Some(Cursor::at(target, col.min(len)))
        });
    }

    /// Insert possibly multi-line text. Single-line text goes through
    /// `insert_rune` one char at a time so typing rules apply to pastes too;
    /// the whole insert is recorded as one change either way.
    pub fn insert_text(&mut self, line: usize, col: usize, text: &str) {
        if !self.editable_line(line) || text.is_empty() {
            return;
        }
        let normalized = text.replace("\r\n", "\n");
        let segments: Vec<&str> = normalized.split('\n').collect();
        let col = col.min(self.line_len(line));

        if segments.len() == 1 {
            let cursor_before = self.cursor;
            let before = self.lines[line].clone();
            let history = std::mem::replace(&mut self.history, History::new(1));
            let (mut l, mut c) = (line, col);
            for ch in normalized.chars() {
                self.insert_rune(l, c, ch);
                (l, c) = self.cursor.position();
            }
            self.history = history;
            let after = self.lines[line].clone();
            if before != after {
                self.history.record(Change {
                    start: line,
                    before: vec![before],
                    after: vec![after],
                    cursor_before,
                    cursor_after: self.cursor,
                });
            }
            return;
        }

        debug!(target: "text.edit", line, col, segments = segments.len(), "insert_text_multiline");
        self.record_edit(line, 1, |lines| {
            let current = std::mem::take(&mut lines[line]);
            let (head, tail) = current.split_at(byte_index(&current, col));
            let last = segments.len() - 1;
            let mut spliced = Vec::with_capacity(segments.len());
            spliced.push(format!("{head}{}", segments[0]));
            spliced.extend(segments[1..last].iter().map(|s| s.to_string()));
            spliced.push(format!("{}{tail}", segments[last]));
            lines.splice(line..=line, spliced);
            Some(Cursor::at(line + last, segments[last].chars().count()))
        });
    }

    /// Revert the most recent change. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.is_modifiable() {
            return false;
        }
        let Some(change) = self.history.pop_undo() else {
            return false;
        };
        self.pending_closer = None;
        if change.start > self.lines.len() {
            return false;
        }
        let end = (change.start + change.after.len()).min(self.lines.len());
        self.lines
            .splice(change.start..end, change.before.iter().cloned());
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor = change.cursor_before;
        self.cursor.clamp(&self.lines);
        self.modified = true;
        debug!(target: "text.history", start = change.start, "undo");
        self.history.push_redo(change);
        true
    }

    /// Re-apply the most recently undone change.
    pub fn redo(&mut self) -> bool {
        if !self.is_modifiable() {
            return false;
        }
        let Some(change) = self.history.pop_redo() else {
            return false;
        };
        self.pending_closer = None;
        if change.start > self.lines.len() {
            return false;
        }
        let end = (change.start + change.before.len()).min(self.lines.len());
        self.lines
            .splice(change.start..end, change.after.iter().cloned());
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor = change.cursor_after;
        self.cursor.clamp(&self.lines);
        self.modified = true;
        debug!(target: "text.history", start = change.start, "redo");
        self.history.push_undo_keep_redo(change);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn buf(content: &str) -> Buffer {
        Buffer::from_content(content, None)
    }

    #[test]
    fn insert_rune_clamps_column() {
        let mut b = buf("ab");
        b.insert_rune(0, 99, 'c');
        assert_eq!(b.line(0), "abc");
        assert_eq!(b.cursor().position(), (0, 3));
        assert!(b.is_modified());
    }

    #[test]
    fn insert_rune_out_of_range_line_is_noop() {
        let mut b = buf("ab");
        b.insert_rune(3, 0, 'x');
        assert_eq!(b.content(), "ab");
        assert!(!b.is_modified());
    }

    #[test]
    fn opener_inserts_pair_and_cursor_between() {
        let mut b = buf("");
        b.insert_rune(0, 0, '(');
        assert_eq!(b.line(0), "()");
        assert_eq!(b.cursor().position(), (0, 1));
        b.insert_rune(0, 1, '"');
        assert_eq!(b.line(0), "(\"\")");
    }

    #[test]
    fn closer_steps_over_matching_closer() {
        let mut b = buf("");
        b.insert_rune(0, 0, '[');
        b.insert_rune(0, 1, ']');
        assert_eq!(b.line(0), "[]");
        assert_eq!(b.cursor().position(), (0, 2));
    }

    #[test]
    fn closer_typed_before_existing_closer_is_inserted() {
        let mut b = buf("f(x)");
        b.insert_rune(0, 3, ')');
        assert_eq!(b.line(0), "f(x))");
        assert_eq!(b.cursor().position(), (0, 4));
        assert!(b.is_modified());
        b.delete_rune(0, 4);
        assert_eq!(b.line(0), "f(x)");
    }

    #[test]
    fn typing_inside_pair_keeps_type_over() {
        let mut b = buf("");
        for ch in "call(arg)".chars() {
            let (l, c) = b.cursor().position();
            b.insert_rune(l, c, ch);
        }
        assert_eq!(b.line(0), "call(arg)");
        assert_eq!(b.cursor().position(), (0, 9));
    }

    #[test]
    fn moving_away_forgets_auto_inserted_closer() {
        let mut b = buf("");
        b.insert_rune(0, 0, '[');
        b.move_cursor(|c, l| c.move_to_line_end(l));
        b.move_cursor(|c, _| c.set_position(0, 1));
        b.insert_rune(0, 1, ']');
        assert_eq!(b.line(0), "[]]");
    }

    #[test]
    fn auto_pair_can_be_disabled() {
        let mut b = buf("");
        b.set_auto_pair(false);
        b.insert_rune(0, 0, '{');
        b.insert_rune(0, 1, '}');
        assert_eq!(b.line(0), "{}");
        b.insert_rune(0, 2, '}');
        assert_eq!(b.line(0), "{}}");
    }

    #[test]
    fn tag_auto_close_in_markup_files() {
        let mut b = Buffer::from_content("<div class=\"x\"", Some(PathBuf::from("a.html")));
        let end = b.line_len(0);
        b.insert_rune(0, end, '>');
        assert_eq!(b.line(0), "<div class=\"x\"></div>");
        assert_eq!(b.cursor().col(), end + 1);
    }

    #[test]
    fn tag_auto_close_skips_closing_and_self_closing_tags() {
        let mut b = Buffer::from_content("</div", Some(PathBuf::from("a.xml")));
        b.insert_rune(0, 5, '>');
        assert_eq!(b.line(0), "</div>");

        let mut b = Buffer::from_content("<br/", Some(PathBuf::from("a.jsx")));
        b.insert_rune(0, 4, '>');
        assert_eq!(b.line(0), "<br/>");
    }

    #[test]
    fn tag_auto_close_ignored_outside_markup() {
        let mut b = Buffer::from_content("<div", Some(PathBuf::from("a.rs")));
        b.insert_rune(0, 4, '>');
        assert_eq!(b.line(0), "<div>");
    }

    #[test]
    fn tag_to_close_requires_unclosed_open_bracket() {
        assert_eq!(tag_to_close("<a href='x'", 11).as_deref(), Some("a"));
        assert_eq!(tag_to_close("<a>text", 7), None);
        assert_eq!(tag_to_close("plain", 5), None);
        assert_eq!(tag_to_close("<!DOCTYPE html", 14), None);
    }

    #[test]
    fn delete_rune_removes_char_before_column() {
        let mut b = buf("héllo");
        b.delete_rune(0, 2);
        assert_eq!(b.line(0), "hllo");
        assert_eq!(b.cursor().position(), (0, 1));
    }

    #[test]
    fn delete_rune_at_line_start_joins_lines() {
        let mut b = buf("ab\ncd");
        b.delete_rune(1, 0);
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0), "abcd");
        assert_eq!(b.cursor().position(), (0, 2));
    }

    #[test]
    fn delete_rune_at_origin_is_noop() {
        let mut b = buf("x");
        b.delete_rune(0, 0);
        assert_eq!(b.content(), "x");
        assert!(!b.is_modified());
    }

    #[test]
    fn newline_carries_base_indent() {
        let mut b = buf("    let x = 1;");
        b.insert_newline(0, 8);
        assert_eq!(b.line(0), "    let ");
        assert_eq!(b.line(1), "    x = 1;");
        assert_eq!(b.cursor().position(), (1, 4));
    }

    #[test]
    fn newline_after_brace_opens_block() {
        let mut b = buf("  if x {}");
        b.set_tab_width(4);
        b.insert_newline(0, 8);
        assert_eq!(b.lines(), &["  if x {", "      ", "  }"]);
        assert_eq!(b.cursor().position(), (1, 6));
    }

    #[test]
    fn newline_counts_tabs_as_four() {
        let mut b = buf("\tdef f():");
        b.set_tab_width(2);
        let end = b.line_len(0);
        b.insert_newline(0, end);
        assert_eq!(b.line(1), "      ");
        assert_eq!(b.line(2), "    ");
    }

    #[test]
    fn delete_only_line_leaves_empty_line() {
        let mut b = buf("only");
        b.delete_line(0);
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0), "");
        b.delete_line(0);
        assert_eq!(b.line_count(), 1);
    }

    #[test]
    fn delete_last_line_moves_cursor_up() {
        let mut b = buf("a\nbbb\ncc");
        b.move_cursor(|c, _| c.set_position(2, 2));
        b.delete_line(2);
        assert_eq!(b.line_count(), 2);
        assert_eq!(b.cursor().position(), (1, 2));
    }

    #[test]
    fn insert_text_multiline_splices_around_cursor() {
        let mut b = buf("head|tail");
        b.insert_text(0, 5, "one\ntwo\nthree");
        assert_eq!(b.lines(), &["head|one", "two", "threetail"]);
        assert_eq!(b.cursor().position(), (2, 5));
    }

    #[test]
    fn insert_text_single_line_applies_typing_rules() {
        let mut b = buf("");
        b.insert_text(0, 0, "f(x");
        assert_eq!(b.line(0), "f(x)");
        assert_eq!(b.cursor().position(), (0, 3));
    }

    #[test]
    fn insert_text_normalizes_crlf() {
        let mut b = buf("");
        b.insert_text(0, 0, "a\r\nb");
        assert_eq!(b.lines(), &["a", "b"]);
    }

    #[test]
    fn insert_text_is_one_undo_step() {
        let mut b = buf("x");
        b.insert_text(0, 1, "abc");
        assert_eq!(b.line(0), "xabc");
        assert!(b.undo());
        assert_eq!(b.line(0), "x");
        assert!(!b.undo());
    }

    #[test]
    fn undo_redo_restore_lines_and_cursor() {
        let mut b = buf("fn main() {}");
        b.insert_newline(0, 11);
        let after = b.content();
        let cursor_after = b.cursor().position();
        assert!(b.undo());
        assert_eq!(b.content(), "fn main() {}");
        assert_eq!(b.cursor().position(), (0, 0));
        assert!(b.redo());
        assert_eq!(b.content(), after);
        assert_eq!(b.cursor().position(), cursor_after);
        assert!(!b.redo());
    }

    #[test]
    fn new_edit_after_undo_discards_redo() {
        let mut b = buf("a");
        b.insert_rune(0, 1, 'b');
        b.undo();
        b.insert_rune(0, 1, 'c');
        assert!(!b.redo());
        assert_eq!(b.line(0), "ac");
    }

    #[test]
    fn history_depth_caps_undo() {
        let mut b = buf("");
        b.set_history_depth(3);
        for (i, ch) in "abcde".chars().enumerate() {
            b.insert_rune(0, i, ch);
        }
        let mut undone = 0;
        while b.undo() {
            undone += 1;
        }
        assert_eq!(undone, 3);
        assert_eq!(b.line(0), "ab");
    }

    #[test]
    fn indent_width_counts_spaces_and_tabs() {
        assert_eq!(indent_width("  \tx"), 6);
        assert_eq!(indent_width("x  "), 0);
    }
}
