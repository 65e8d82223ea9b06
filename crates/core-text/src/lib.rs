//! Line-oriented document buffer, cursor, and edit operations.
//!
//! A `Buffer` owns an ordered `Vec<String>` of lines with the newline implied
//! between elements. The sequence is never empty: an empty document is a single
//! empty line, and every operation that would remove the last line substitutes
//! an empty one instead.
//!
//! Columns are char indices into the stored line (not bytes, not display
//! cells). Conversion to byte offsets happens at the slicing boundary via
//! [`byte_index`]; conversion to display columns via [`tabs::display_col`].
//!
//! Invariants (hold after every public call):
//! * `lines.len() >= 1`.
//! * The embedded cursor satisfies `line < line_count()` and
//!   `col <= line_len(line)` unless a caller used `Cursor::set_position`
//!   with unchecked coordinates.
//! * Mutations are no-ops while `modifiable == false` (binary placeholders).
//! * Out-of-range coordinates passed to mutators are absorbed, never signaled.

use std::path::{Path, PathBuf};

pub mod cursor;
pub mod edit;
pub mod history;
pub mod tabs;

pub use cursor::Cursor;
pub use history::{Change, History, DEFAULT_HISTORY_DEPTH};

/// Text shown in place of the content of a binary file.
pub const BINARY_PLACEHOLDER: &str = "[binary file contents hidden]";

/// Default display tab width for buffers without a better hint.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Opaque identifier handed out by the owning buffer manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u64);

impl std::fmt::Display for BufferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Line terminator style of the file a buffer was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Read-only view of a line sequence. The cursor clamps against this instead
/// of holding a reference to its buffer.
pub trait LineSource {
    fn line_count(&self) -> usize;
    fn line(&self, idx: usize) -> Option<&str>;

    /// Length of a line in chars; 0 for out-of-range indices.
    fn line_len(&self, idx: usize) -> usize {
        self.line(idx).map(|l| l.chars().count()).unwrap_or(0)
    }
}

impl LineSource for Vec<String> {
    fn line_count(&self) -> usize {
        self.len()
    }
    fn line(&self, idx: usize) -> Option<&str> {
        self.get(idx).map(String::as_str)
    }
}

/// Byte offset of char index `col` within `s` (clamped to `s.len()`).
pub fn byte_index(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map(|(b, _)| b).unwrap_or(s.len())
}

/// One open document.
#[derive(Debug, Clone)]
pub struct Buffer {
    id: Option<BufferId>,
    pub(crate) lines: Vec<String>,
    pub(crate) cursor: Cursor,
    pub(crate) history: History,
    path: Option<PathBuf>,
    pub(crate) modified: bool,
    modifiable: bool,
    tab_width: usize,
    language: String,
    previous_line_count: usize,
    line_ending: LineEnding,
    pub(crate) auto_pair: bool,
    pub(crate) auto_close_tags: bool,
    /// Position of a closer inserted by auto-pairing, eligible for type-over.
    pub(crate) pending_closer: Option<(usize, usize)>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Empty, untitled buffer.
    pub fn new() -> Self {
        Self {
            id: None,
            lines: vec![String::new()],
            cursor: Cursor::new(),
            history: History::new(DEFAULT_HISTORY_DEPTH),
            path: None,
            modified: false,
            modifiable: true,
            tab_width: DEFAULT_TAB_WIDTH,
            language: String::new(),
            previous_line_count: 1,
            line_ending: LineEnding::Lf,
            auto_pair: true,
            auto_close_tags: true,
            pending_closer: None,
        }
    }

    /// Buffer holding `content` split on `\n`. A trailing newline yields a
    /// trailing empty line so `content()` round-trips exactly.
    pub fn from_content(content: &str, path: Option<PathBuf>) -> Self {
        let lines: Vec<String> = content.split('\n').map(str::to_owned).collect();
        let count = lines.len();
        Self {
            lines,
            path,
            previous_line_count: count,
            ..Self::new()
        }
    }

    /// Non-modifiable single-line placeholder for a binary file.
    pub fn binary(path: PathBuf) -> Self {
        Self {
            lines: vec![BINARY_PLACEHOLDER.to_owned()],
            path: Some(path),
            modifiable: false,
            ..Self::new()
        }
    }

    pub fn id(&self) -> Option<BufferId> {
        self.id
    }
    pub fn set_id(&mut self, id: BufferId) {
        self.id = Some(id);
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line content, or `""` for an out-of-range index.
    pub fn line(&self, idx: usize) -> &str {
        self.lines.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Length of a line in chars.
    pub fn line_len(&self, idx: usize) -> usize {
        self.line(idx).chars().count()
    }

    /// Whole document joined with `\n`.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace one line. Recorded in history like any other edit.
    pub fn set_line(&mut self, idx: usize, text: &str) {
        if !self.modifiable || idx >= self.lines.len() {
            return;
        }
        let text = text.to_owned();
        self.record_edit(idx, 1, |lines| {
            lines[idx] = text;
            None
        });
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Apply a cursor movement against this buffer's lines. Moving away
    /// forgets any auto-inserted closer.
    pub fn move_cursor<F>(&mut self, motion: F)
    where
        F: FnOnce(&mut Cursor, &Vec<String>),
    {
        let before = self.cursor;
        motion(&mut self.cursor, &self.lines);
        if self.cursor != before {
            self.pending_closer = None;
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
    pub fn set_path(&mut self, path: Option<PathBuf>) {
        self.path = path;
    }

    /// Lowercased extension including the leading dot (`".rs"`), or `""`.
    pub fn extension(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::extension)
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default()
    }

    /// Base file name or `"untitled"`.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .unwrap_or("untitled")
            .to_owned()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }
    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    pub fn is_modifiable(&self) -> bool {
        self.modifiable
    }
    /// Read-only buffers ignore every mutation and refuse to save.
    pub fn set_modifiable(&mut self, modifiable: bool) {
        self.modifiable = modifiable;
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }
    /// Display-only; zero is coerced to 1.
    pub fn set_tab_width(&mut self, width: usize) {
        self.tab_width = width.max(1);
    }

    pub fn language(&self) -> &str {
        &self.language
    }
    pub fn set_language(&mut self, tag: impl Into<String>) {
        self.language = tag.into();
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
    pub fn set_line_ending(&mut self, ending: LineEnding) {
        self.line_ending = ending;
    }

    /// Content serialized with the original line ending restored.
    pub fn serialize(&self) -> String {
        self.lines.join(self.line_ending.as_str())
    }

    pub fn set_auto_pair(&mut self, enabled: bool) {
        self.auto_pair = enabled;
    }
    pub fn set_auto_close_tags(&mut self, enabled: bool) {
        self.auto_close_tags = enabled;
    }

    pub fn set_history_depth(&mut self, depth: usize) {
        self.history.set_depth(depth);
    }
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn previous_line_count(&self) -> usize {
        self.previous_line_count
    }

    /// Record the current line count as the baseline for the change indicator.
    /// Called on open and save.
    pub fn snapshot_line_count(&mut self) {
        self.previous_line_count = self.lines.len();
    }

    /// Signed difference between the current and snapshotted line counts.
    pub fn line_delta(&self) -> isize {
        self.lines.len() as isize - self.previous_line_count as isize
    }

    /// `"+N"` or `"-N"` lines relative to the last snapshot.
    pub fn line_change_indicator(&self) -> String {
        let delta = self.line_delta();
        if delta < 0 {
            format!("-{}", -delta)
        } else {
            format!("+{delta}")
        }
    }

    /// Replace the whole content (external reload). Clears history and the
    /// modified flag; the cursor is clamped into the new content.
    pub fn replace_content(&mut self, content: &str) {
        self.lines = content.split('\n').map(str::to_owned).collect();
        self.history.clear();
        self.modified = false;
        self.pending_closer = None;
        self.cursor.clamp(&self.lines);
        self.snapshot_line_count();
    }
}

impl LineSource for Buffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }
    fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }
}
