//! Status line composition.
//!
//! `compose_status` produces ordered `StatusSegment`s; `format_status` lays
//! them out as `left … right` within a fixed width:
//!
//! ` NORMAL  main.go [+] +2 ` … ` go  UTF-8  12:5  40% `
//!
//! * The file name is the base name or `untitled`.
//! * `[+]` appears only for modified buffers.
//! * The line-change indicator is shown in Normal mode, or whenever the
//!   buffer is unmodified.
//! * Progress is `Top` on the first line, `Bottom` on the last, otherwise the
//!   cursor line as a truncated percentage of the line count.
//!
//! Widths are measured with `unicode-width` so wide file names do not push
//! the right-hand side off screen.

use core_state::Mode;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// What the status line needs to know about the active buffer.
pub struct StatusContext<'a> {
    pub mode: Mode,
    pub file_name: &'a str,
    pub modified: bool,
    pub change_indicator: &'a str,
    pub language: &'a str,
    pub encoding: &'a str,
    /// 0-based cursor line and raw column.
    pub line: usize,
    pub col: usize,
    pub line_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Mode(&'static str),
    FileName(&'a str),
    Modified,
    LineChanges(&'a str),
    Language(&'a str),
    Encoding(&'a str),
    /// 1-based for display.
    Position { line_1: usize, col_1: usize },
    Progress(String),
}

impl StatusSegment<'_> {
    fn is_right(&self) -> bool {
        matches!(
            self,
            StatusSegment::Language(_)
                | StatusSegment::Encoding(_)
                | StatusSegment::Position { .. }
                | StatusSegment::Progress(_)
        )
    }

    fn text(&self) -> String {
        match self {
            StatusSegment::Mode(m) => format!(" {m} "),
            StatusSegment::FileName(n) => n.to_string(),
            StatusSegment::Modified => "[+]".to_string(),
            StatusSegment::LineChanges(c) => c.to_string(),
            StatusSegment::Language(l) => l.to_string(),
            StatusSegment::Encoding(e) => e.to_string(),
            StatusSegment::Position { line_1, col_1 } => format!("{line_1}:{col_1}"),
            StatusSegment::Progress(p) => p.clone(),
        }
    }
}

/// `Top`, `Bottom`, or `N%` for a 0-based cursor line.
pub fn cursor_progress(line: usize, line_count: usize) -> String {
    let line_1 = line + 1;
    if line_1 == 1 {
        "Top".to_string()
    } else if line_1 >= line_count {
        "Bottom".to_string()
    } else {
        format!("{}%", line_1 * 100 / line_count.max(1))
    }
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let mut out = Vec::with_capacity(8);
    out.push(StatusSegment::Mode(ctx.mode.label()));
    out.push(StatusSegment::FileName(ctx.file_name));
    if ctx.modified {
        out.push(StatusSegment::Modified);
    }
    if ctx.mode == Mode::Normal || !ctx.modified {
        out.push(StatusSegment::LineChanges(ctx.change_indicator));
    }
    if !ctx.language.is_empty() {
        out.push(StatusSegment::Language(ctx.language));
    }
    out.push(StatusSegment::Encoding(ctx.encoding));
    out.push(StatusSegment::Position {
        line_1: ctx.line + 1,
        col_1: ctx.col + 1,
    });
    out.push(StatusSegment::Progress(cursor_progress(ctx.line, ctx.line_count)));
    out
}

/// Truncate `s` to at most `width` terminal cells.
fn truncate_cells(s: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Lay segments out as `left <gap> right`, exactly `width` cells wide. When
/// space runs out the right side wins and the left is truncated.
pub fn format_status(segments: &[StatusSegment<'_>], width: usize) -> String {
    let join = |right: bool| {
        segments
            .iter()
            .filter(|s| s.is_right() == right)
            .map(StatusSegment::text)
            .collect::<Vec<_>>()
            .join(" ")
    };
    let left = join(false);
    let right = format!("{} ", join(true));

    let right_w = right.width();
    if right_w >= width {
        return truncate_cells(&right, width);
    }
    let left = truncate_cells(&left, width - right_w);
    let gap = width - right_w - left.width();
    format!("{left}{}{right}", " ".repeat(gap))
}

pub fn build_status(ctx: &StatusContext<'_>, width: usize) -> String {
    format_status(&compose_status(ctx), width)
}
