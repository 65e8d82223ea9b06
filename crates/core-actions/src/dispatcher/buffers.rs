//! Buffer list operations: cycling, reordering, creating, closing, saving.

use std::path::PathBuf;

use super::DispatchResult;
use crate::Editor;
use crate::io_ops::{self, WriteFileResult};
use tracing::{debug, info};

pub(crate) fn cycle(editor: &mut Editor, forward: bool) -> DispatchResult {
    let id = if forward {
        editor.state.buffers.next()
    } else {
        editor.state.buffers.previous()
    };
    debug!(target: "actions", ?id, forward, "buffer_cycle");
    DispatchResult::dirty()
}

pub(crate) fn reorder(editor: &mut Editor, left: bool) -> DispatchResult {
    if left {
        editor.state.buffers.move_left();
    } else {
        editor.state.buffers.move_right();
    }
    DispatchResult::dirty()
}

pub(crate) fn new_buffer(editor: &mut Editor) -> DispatchResult {
    editor.new_buffer();
    editor.set_message("New file");
    DispatchResult::dirty()
}

/// Close the active buffer unless it has unsaved changes. Closing the last
/// buffer leaves a fresh empty one in its place.
pub(crate) fn close_active(editor: &mut Editor) -> DispatchResult {
    let Some(buf) = editor.state.buffers.active() else {
        return DispatchResult::clean();
    };
    if buf.is_modified() {
        editor.set_message("File has unsaved changes");
        return DispatchResult::dirty();
    }
    let Some(id) = buf.id() else {
        return DispatchResult::clean();
    };
    editor.state.buffers.close(id);
    editor.encodings.remove(&id);
    if editor.state.buffers.is_empty() {
        editor.new_buffer();
    }
    debug!(target: "actions", %id, "buffer_closed");
    editor.set_message("File closed");
    DispatchResult::dirty()
}

/// Save the active buffer, optionally under a new path.
pub(crate) fn save(editor: &mut Editor, target: Option<PathBuf>) -> DispatchResult {
    let retarget = target.is_some();
    let Some(id) = editor.state.buffers.active_id() else {
        return DispatchResult::clean();
    };
    let encoding = editor.encoding_of(id);
    let Some(buf) = editor.state.buffers.active_mut() else {
        return DispatchResult::clean();
    };
    let result = io_ops::write_buffer(buf, target.as_deref(), encoding);
    let name = buf.display_name();
    match result {
        WriteFileResult::Success => {
            if retarget {
                let language = core_syntax::Language::from_extension(&buf.extension());
                buf.set_language(language.name());
            }
            info!(target: "actions", file = %name, "buffer_saved");
            editor.set_message(format!("Saved: {name}"));
        }
        WriteFileResult::NoFilename => editor.set_message("No file path set"),
        WriteFileResult::ReadOnly => editor.set_message("Buffer is read-only"),
        WriteFileResult::Error(err) => editor.set_message(format!("Error saving: {err}")),
    }
    DispatchResult::dirty()
}

/// True if the active buffer was written successfully (used by `:wq`).
pub(crate) fn active_is_clean(editor: &Editor) -> bool {
    editor
        .state
        .buffers
        .active()
        .is_some_and(|b| !b.is_modified())
}
