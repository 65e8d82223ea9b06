//! Buffer-wide search and replace.
//!
//! `SearchEngine` holds the active query, its flags, and the last result set
//! with a cursor into it. A search scans every line; after each hit the scan
//! resumes one char past the hit's start, so overlapping occurrences are all
//! reported (`"aaa"` contains `"aa"` at columns 0 and 1).
//!
//! All positions and lengths are char indices, matching `core_text` columns.
//! Case-insensitive literal search folds char by char, which keeps folded
//! columns aligned with the raw line even where a full lowercase mapping
//! would change the string length.

use core_text::{Buffer, LineSource};
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

/// One hit: `len` chars starting at `(line, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub line: usize,
    pub col: usize,
    pub len: usize,
}

#[derive(Debug, Default)]
pub struct SearchEngine {
    query: String,
    case_sensitive: bool,
    regex: bool,
    results: Vec<SearchResult>,
    current: Option<usize>,
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn chars_eq(a: char, b: char, case_sensitive: bool) -> bool {
    if case_sensitive { a == b } else { fold(a) == fold(b) }
}

/// Char columns where `needle` occurs in `hay`. With `overlapping` the scan
/// steps one char past each hit, otherwise past the whole hit.
fn literal_hits(hay: &[char], needle: &[char], case_sensitive: bool, overlapping: bool) -> Vec<usize> {
    let mut hits = Vec::new();
    if needle.is_empty() || needle.len() > hay.len() {
        return hits;
    }
    let mut start = 0;
    while start + needle.len() <= hay.len() {
        let window = &hay[start..start + needle.len()];
        if window.iter().zip(needle).all(|(a, b)| chars_eq(*a, *b, case_sensitive)) {
            hits.push(start);
            start += if overlapping { 1 } else { needle.len() };
        } else {
            start += 1;
        }
    }
    hits
}

/// Non-empty regex hits as `(col, len)` in chars, overlapping.
fn regex_hits(re: &Regex, line: &str) -> Vec<(usize, usize)> {
    let mut hits = Vec::new();
    let mut at = 0;
    while at <= line.len() {
        let Some(m) = re.find_at(line, at) else { break };
        let next_char = line[m.start()..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);
        if !m.is_empty() {
            let col = line[..m.start()].chars().count();
            hits.push((col, m.as_str().chars().count()));
        }
        at = m.start() + next_char;
    }
    hits
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query. Previous results stay until the next `search`.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_case_sensitive(&mut self, on: bool) {
        self.case_sensitive = on;
    }
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Treat the query as a regular expression.
    pub fn set_regex(&mut self, on: bool) {
        self.regex = on;
    }
    pub fn is_regex(&self) -> bool {
        self.regex
    }

    /// Scan all of `src` and store the hits. The result cursor is reset to the
    /// first hit, or cleared when there are none. Returns the hit count.
    pub fn search<S: LineSource + ?Sized>(&mut self, src: &S) -> usize {
        self.results.clear();
        self.current = None;
        if self.query.is_empty() {
            return 0;
        }

        if self.regex {
            let re = match RegexBuilder::new(&self.query)
                .case_insensitive(!self.case_sensitive)
                .build()
            {
                Ok(re) => re,
                Err(err) => {
                    warn!(target: "search", query = self.query.as_str(), error = %err, "invalid_pattern");
                    return 0;
                }
            };
            for idx in 0..src.line_count() {
                let line = src.line(idx).unwrap_or("");
                self.results.extend(
                    regex_hits(&re, line)
                        .into_iter()
                        .map(|(col, len)| SearchResult { line: idx, col, len }),
                );
            }
        } else {
            let needle: Vec<char> = self.query.chars().collect();
            for idx in 0..src.line_count() {
                let hay: Vec<char> = src.line(idx).unwrap_or("").chars().collect();
                self.results.extend(
                    literal_hits(&hay, &needle, self.case_sensitive, true)
                        .into_iter()
                        .map(|col| SearchResult { line: idx, col, len: needle.len() }),
                );
            }
        }

        if !self.results.is_empty() {
            self.current = Some(0);
        }
        debug!(target: "search", query = self.query.as_str(), regex = self.regex, hits = self.results.len(), "search");
        self.results.len()
    }

    /// Advance cyclically. `None` when there are no results.
    pub fn next(&mut self) -> Option<SearchResult> {
        let n = self.results.len();
        let idx = self.current.map(|i| (i + 1) % n.max(1))?;
        self.current = Some(idx);
        self.results.get(idx).copied()
    }

    /// Step back cyclically. `None` when there are no results.
    pub fn previous(&mut self) -> Option<SearchResult> {
        let n = self.results.len();
        let idx = self.current.map(|i| if i == 0 { n.saturating_sub(1) } else { i - 1 })?;
        self.current = Some(idx);
        self.results.get(idx).copied()
    }

    pub fn current(&self) -> Option<SearchResult> {
        self.current.and_then(|i| self.results.get(i).copied())
    }

    /// 1-based position of the current hit, for "n/m" displays.
    pub fn current_index(&self) -> Option<usize> {
        self.current.map(|i| i + 1)
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn count(&self) -> usize {
        self.results.len()
    }

    pub fn clear(&mut self) {
        self.results.clear();
        self.current = None;
    }
}

/// Replace every non-overlapping literal occurrence of `pattern`. Lines are
/// rewritten through `Buffer::set_line`, so each changed line is one undo
/// step. Returns the number of lines changed.
pub fn replace_all(buffer: &mut Buffer, pattern: &str, replacement: &str, case_sensitive: bool) -> usize {
    if pattern.is_empty() || !buffer.is_modifiable() {
        return 0;
    }
    let needle: Vec<char> = pattern.chars().collect();
    let mut changed = 0;
    for idx in 0..buffer.line_count() {
        let hay: Vec<char> = buffer.line(idx).chars().collect();
        let hits = literal_hits(&hay, &needle, case_sensitive, false);
        if hits.is_empty() {
            continue;
        }
        let mut out = String::with_capacity(hay.len());
        let mut pos = 0;
        for start in hits {
            out.extend(&hay[pos..start]);
            out.push_str(replacement);
            pos = start + needle.len();
        }
        out.extend(&hay[pos..]);
        if out != buffer.line(idx) {
            buffer.set_line(idx, &out);
            changed += 1;
        }
    }
    debug!(target: "search", pattern, changed, "replace_all");
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    fn positions(e: &SearchEngine) -> Vec<(usize, usize)> {
        e.results().iter().map(|r| (r.line, r.col)).collect()
    }

    #[test]
    fn case_insensitive_overlapping_hits() {
        let mut e = SearchEngine::new();
        e.set_query("foo");
        assert_eq!(e.search(&lines(&["FOO bar", "foofoo"])), 3);
        assert_eq!(positions(&e), vec![(0, 0), (1, 0), (1, 3)]);
        assert_eq!(e.current().map(|r| (r.line, r.col)), Some((0, 0)));
    }

    #[test]
    fn advancing_by_one_reports_overlaps() {
        let mut e = SearchEngine::new();
        e.set_query("aa");
        e.search(&lines(&["aaaa"]));
        assert_eq!(positions(&e), vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn case_sensitive_skips_other_case() {
        let mut e = SearchEngine::new();
        e.set_query("Foo");
        e.set_case_sensitive(true);
        e.search(&lines(&["foo Foo FOO"]));
        assert_eq!(positions(&e), vec![(0, 4)]);
    }

    #[test]
    fn columns_are_chars() {
        let mut e = SearchEngine::new();
        e.set_query("b");
        e.search(&lines(&["ééb"]));
        assert_eq!(positions(&e), vec![(0, 2)]);
    }

    #[test]
    fn next_and_previous_cycle() {
        let mut e = SearchEngine::new();
        e.set_query("x");
        e.search(&lines(&["x", "x", "x"]));
        assert_eq!(e.next().map(|r| r.line), Some(1));
        assert_eq!(e.next().map(|r| r.line), Some(2));
        assert_eq!(e.next().map(|r| r.line), Some(0));
        assert_eq!(e.previous().map(|r| r.line), Some(2));
        assert_eq!(e.current_index(), Some(3));
    }

    #[test]
    fn empty_results_navigation_is_none() {
        let mut e = SearchEngine::new();
        e.set_query("zzz");
        assert_eq!(e.search(&lines(&["abc"])), 0);
        assert_eq!(e.next(), None);
        assert_eq!(e.previous(), None);
        assert_eq!(e.current(), None);
    }

    #[test]
    fn empty_query_finds_nothing() {
        let mut e = SearchEngine::new();
        assert_eq!(e.search(&lines(&["abc"])), 0);
    }

    #[test]
    fn regex_mode_reports_char_lengths() {
        let mut e = SearchEngine::new();
        e.set_regex(true);
        e.set_query(r"b+");
        e.search(&lines(&["é bbb"]));
        let r = e.results();
        assert_eq!(r[0], SearchResult { line: 0, col: 2, len: 3 });
        assert_eq!(r.len(), 3, "overlapping starts at each b");
    }

    #[test]
    fn regex_skips_zero_width_matches() {
        let mut e = SearchEngine::new();
        e.set_regex(true);
        e.set_query("x*");
        e.search(&lines(&["axa"]));
        assert_eq!(e.results(), &[SearchResult { line: 0, col: 1, len: 1 }]);
    }

    #[test]
    fn regex_respects_case_flag() {
        let mut e = SearchEngine::new();
        e.set_regex(true);
        e.set_query("fn");
        e.search(&lines(&["FN fn"]));
        assert_eq!(e.count(), 2);
        e.set_case_sensitive(true);
        e.search(&lines(&["FN fn"]));
        assert_eq!(e.count(), 1);
    }

    #[test]
    fn invalid_regex_yields_no_results() {
        let mut e = SearchEngine::new();
        e.set_regex(true);
        e.set_query("(unclosed");
        assert_eq!(e.search(&lines(&["(unclosed"])), 0);
    }

    #[test]
    fn replace_all_counts_changed_lines_and_is_undoable() {
        let mut b = Buffer::from_content("cat cat\ndog\nCAT", None);
        assert_eq!(replace_all(&mut b, "cat", "cow", false), 2);
        assert_eq!(b.content(), "cow cow\ndog\ncow");
        assert!(b.is_modified());
        assert!(b.undo());
        assert_eq!(b.line(2), "CAT");
    }

    #[test]
    fn replace_all_is_non_overlapping() {
        let mut b = Buffer::from_content("aaaa", None);
        assert_eq!(replace_all(&mut b, "aa", "b", true), 1);
        assert_eq!(b.line(0), "bb");
    }

    #[test]
    fn replace_with_same_text_changes_nothing() {
        let mut b = Buffer::from_content("same", None);
        assert_eq!(replace_all(&mut b, "same", "same", true), 0);
        assert!(!b.is_modified());
    }
}
