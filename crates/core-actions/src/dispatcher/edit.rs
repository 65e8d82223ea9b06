//! Text mutation, undo/redo, and the yank register.
//!
//! Typing actions only apply in Insert mode; `x`, line deletion and pastes
//! work from Normal mode too. Read-only buffers reject all of them with a
//! message.

use super::DispatchResult;
use crate::{EditKind, Editor};
use core_state::Mode;
use tracing::trace;

pub(crate) fn handle_edit(kind: EditKind, editor: &mut Editor) -> DispatchResult {
    let typing = matches!(
        kind,
        EditKind::InsertChar(_) | EditKind::InsertNewline | EditKind::InsertTab | EditKind::Backspace
    );
    if typing && editor.state.mode != Mode::Insert {
        return DispatchResult::clean();
    }
    let Some(buf) = editor.state.buffers.active_mut() else {
        return DispatchResult::clean();
    };
    if !buf.is_modifiable() {
        editor.set_message("Buffer is read-only");
        return DispatchResult::dirty();
    }
    let (line, col) = buf.cursor().position();
    trace!(target: "actions", ?kind, line, col, "edit");
    match kind {
        EditKind::InsertChar(ch) => buf.insert_rune(line, col, ch),
        EditKind::InsertNewline => buf.insert_newline(line, col),
        EditKind::InsertTab => {
            let spaces = " ".repeat(buf.tab_width());
            buf.insert_text(line, col, &spaces);
        }
        EditKind::InsertText(text) => buf.insert_text(line, col, &text),
        EditKind::Backspace => buf.delete_rune(line, col),
        EditKind::DeleteUnder => {
            if col < buf.line_len(line) {
                buf.delete_rune(line, col + 1);
            }
        }
        EditKind::DeleteLine => buf.delete_line(line),
    }
    DispatchResult::dirty()
}

pub(crate) fn handle_undo(editor: &mut Editor, redo: bool) -> DispatchResult {
    let Some(buf) = editor.state.buffers.active_mut() else {
        return DispatchResult::clean();
    };
    let applied = if redo { buf.redo() } else { buf.undo() };
    if !applied {
        editor.set_message(if redo {
            "Already at newest change"
        } else {
            "Already at oldest change"
        });
    }
    DispatchResult::dirty()
}

pub(crate) fn yank_line(editor: &mut Editor) -> DispatchResult {
    let Some(buf) = editor.state.buffers.active() else {
        return DispatchResult::clean();
    };
    let text = buf.line(buf.cursor().line()).to_owned();
    editor.state.clipboard.set(text, true);
    editor.set_message("Copied line");
    DispatchResult::dirty()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PastePlacement {
    /// Below the cursor line (linewise) or after the cursor char.
    After,
    /// Above the cursor line (linewise) or at the cursor.
    Before,
    /// At the cursor regardless of register kind.
    Inline,
}

pub(crate) fn paste(editor: &mut Editor, placement: PastePlacement) -> DispatchResult {
    if editor.state.clipboard.is_empty() {
        editor.set_message("Nothing to paste");
        return DispatchResult::dirty();
    }
    let register = editor.state.clipboard.clone();
    let Some(buf) = editor.state.buffers.active_mut() else {
        return DispatchResult::clean();
    };
    if !buf.is_modifiable() {
        editor.set_message("Buffer is read-only");
        return DispatchResult::dirty();
    }
    let (line, col) = buf.cursor().position();
    let len = buf.line_len(line);
    let text = register.text();
    match (placement, register.is_linewise()) {
        (PastePlacement::After, true) => {
            buf.insert_text(line, len, &format!("\n{text}"));
            buf.move_cursor(|c, _| c.set_position(line + 1, 0));
        }
        (PastePlacement::Before, true) => {
            buf.insert_text(line, 0, &format!("{text}\n"));
            buf.move_cursor(|c, _| c.set_position(line, 0));
        }
        (PastePlacement::After, false) => buf.insert_text(line, (col + 1).min(len), text),
        (PastePlacement::Before, false) | (PastePlacement::Inline, _) => {
            buf.insert_text(line, col, text)
        }
    }
    trace!(target: "actions", ?placement, linewise = register.is_linewise(), bytes = text.len(), "paste");
    editor.set_message("Pasted");
    DispatchResult::dirty()
}
