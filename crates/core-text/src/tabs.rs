//! Tab expansion and raw → display column mapping.
//!
//! A tab advances to the next multiple of `tab_width` measured from the
//! current display column, so the same tab character can occupy between 1 and
//! `tab_width` cells. Every other char occupies one display column.

/// Replace each tab with the spaces needed to reach the next tab stop.
pub fn expand_tabs(line: &str, tab_width: usize) -> String {
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(line.len());
    let mut col = 0usize;
    for ch in line.chars() {
        if ch == '\t' {
            let pad = tab_width - (col % tab_width);
            out.extend(std::iter::repeat_n(' ', pad));
            col += pad;
        } else {
            out.push(ch);
            col += 1;
        }
    }
    out
}

/// Display column of raw char index `col` (tabs expanded before it).
/// Indices past the end of the line are clamped to the line length.
pub fn display_col(line: &str, col: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let mut display = 0usize;
    for ch in line.chars().take(col) {
        if ch == '\t' {
            display += tab_width - (display % tab_width);
        } else {
            display += 1;
        }
    }
    display
}
