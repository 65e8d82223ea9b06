//! Mode transitions between Normal and Insert.

use super::DispatchResult;
use crate::{Editor, ModeChange};
use core_state::Mode;
use tracing::debug;

pub(crate) fn handle_mode_change(mc: ModeChange, editor: &mut Editor) -> DispatchResult {
    if mc == ModeChange::LeaveInsert {
        editor.state.mode = Mode::Normal;
        return DispatchResult::dirty();
    }
    let Some(buf) = editor.state.buffers.active_mut() else {
        return DispatchResult::clean();
    };
    if !buf.is_modifiable() {
        editor.set_message("Buffer is read-only");
        return DispatchResult::dirty();
    }
    let (line, col) = buf.cursor().position();
    match mc {
        ModeChange::Append => {
            if col < buf.line_len(line) {
                buf.move_cursor(|c, _| c.set_position(line, col + 1));
            }
        }
        ModeChange::OpenLineBelow => {
            let end = buf.line_len(line);
            buf.insert_newline(line, end);
        }
        ModeChange::EnterInsert | ModeChange::LeaveInsert => {}
    }
    editor.state.mode = Mode::Insert;
    debug!(target: "actions", ?mc, "enter_insert");
    DispatchResult::dirty()
}
