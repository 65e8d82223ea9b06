//! Dispatcher applying `Action` to an [`Editor`].
//!
//! * `motion`  - cursor movement and explicit scrolling
//! * `mode`    - Normal <-> Insert transitions
//! * `edit`    - text mutation, undo/redo, yank/paste
//! * `prompt`  - the `/` and `:` prompt line
//! * `search`  - running queries and stepping through matches
//! * `command` - executing parsed `:` commands
//! * `buffers` - switching, creating, closing and saving buffers

use crate::{Action, Editor};
use tracing::trace;

mod buffers;
mod command;
pub mod command_parser;
mod edit;
mod mode;
mod motion;
mod prompt;
mod search;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

pub(crate) fn dispatch(editor: &mut Editor, action: Action) -> DispatchResult {
    trace!(target: "actions", ?action, mode = ?editor.state.mode, "dispatch");
    match action {
        Action::Motion(kind) => motion::handle_motion(kind, editor),
        Action::ScrollUp(n) => motion::scroll(editor, -(n as isize)),
        Action::ScrollDown(n) => motion::scroll(editor, n as isize),
        Action::CenterCursor => motion::center(editor),
        Action::ModeChange(mc) => mode::handle_mode_change(mc, editor),
        Action::Edit(kind) => edit::handle_edit(kind, editor),
        Action::Undo => edit::handle_undo(editor, false),
        Action::Redo => edit::handle_undo(editor, true),
        Action::YankLine => edit::yank_line(editor),
        Action::PasteAfter => edit::paste(editor, edit::PastePlacement::After),
        Action::PasteBefore => edit::paste(editor, edit::PastePlacement::Before),
        Action::PasteInline => edit::paste(editor, edit::PastePlacement::Inline),
        Action::PromptStart(_)
        | Action::PromptChar(_)
        | Action::PromptBackspace
        | Action::PromptCancel
        | Action::PromptExecute => prompt::handle_prompt_action(action, editor),
        Action::SearchNext => search::step(editor, true),
        Action::SearchPrevious => search::step(editor, false),
        Action::NextBuffer => buffers::cycle(editor, true),
        Action::PreviousBuffer => buffers::cycle(editor, false),
        Action::MoveBufferLeft => buffers::reorder(editor, true),
        Action::MoveBufferRight => buffers::reorder(editor, false),
        Action::NewBuffer => buffers::new_buffer(editor),
        Action::CloseBuffer => buffers::close_active(editor),
        Action::Save => buffers::save(editor, None),
        Action::ToggleLineNumbers => {
            let on = !editor.viewport.show_line_numbers();
            editor.viewport.set_show_line_numbers(on);
            DispatchResult::dirty()
        }
        Action::Quit => quit_checked(editor),
        Action::ForceQuit => DispatchResult::quit(),
    }
}

/// Quit unless some buffer has unsaved changes.
pub(crate) fn quit_checked(editor: &mut Editor) -> DispatchResult {
    let unsaved = editor
        .state
        .buffers
        .buffers()
        .iter()
        .filter(|b| b.is_modified())
        .count();
    if unsaved > 0 {
        editor.set_message(format!(
            "{unsaved} buffer(s) with unsaved changes (:q! to discard)"
        ));
        DispatchResult::dirty()
    } else {
        DispatchResult::quit()
    }
}
