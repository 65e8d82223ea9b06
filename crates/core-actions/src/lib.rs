//! Editor controller: key translation, the `Action` vocabulary, and the
//! dispatcher that applies actions to an [`Editor`].
//!
//! Flow per input event:
//!
//! ```text
//! crossterm KeyEvent ──translate_key(mode)──▶ Action ──Editor::dispatch──▶ DispatchResult
//!                                                         │
//!                                                         └─▶ Viewport::adjust_scroll
//! ```
//!
//! Translation is stateless: each key maps to at most one action given the
//! current mode. All state lives in the `Editor`.

pub mod dispatcher;
pub mod editor;
pub mod io_ops;
pub mod key_translator;

pub use dispatcher::DispatchResult;
pub use editor::Editor;
pub use key_translator::translate_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    WordForward,
    WordBackward,
    BufferStart,
    BufferEnd,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(char),
    InsertNewline,
    /// Spaces up to the buffer's tab width.
    InsertTab,
    InsertText(String),
    Backspace,
    /// Delete the char under the cursor (`x`).
    DeleteUnder,
    DeleteLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    EnterInsert,
    /// Insert after the cursor (`a`).
    Append,
    /// Open an auto-indented line below (`o`).
    OpenLineBelow,
    LeaveInsert,
}

/// Which bottom prompt is being typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Search,
    Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    ModeChange(ModeChange),
    PromptStart(PromptKind),
    PromptChar(char),
    PromptBackspace,
    PromptCancel,
    PromptExecute,
    SearchNext,
    SearchPrevious,
    Undo,
    Redo,
    YankLine,
    PasteAfter,
    PasteBefore,
    /// Insert-mode paste at the cursor.
    PasteInline,
    NextBuffer,
    PreviousBuffer,
    MoveBufferLeft,
    MoveBufferRight,
    NewBuffer,
    CloseBuffer,
    Save,
    ScrollUp(usize),
    ScrollDown(usize),
    CenterCursor,
    ToggleLineNumbers,
    Quit,
    ForceQuit,
}
