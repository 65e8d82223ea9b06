//! Cursor motions and explicit viewport scrolling.

use super::DispatchResult;
use crate::{Editor, MotionKind};
use tracing::trace;

pub(crate) fn handle_motion(kind: MotionKind, editor: &mut Editor) -> DispatchResult {
    let page = editor.viewport.height().max(1);
    let Some(buf) = editor.state.buffers.active_mut() else {
        return DispatchResult::clean();
    };
    let before = buf.cursor().position();
    buf.move_cursor(|c, lines| match kind {
        MotionKind::Left => c.move_left(lines),
        MotionKind::Right => c.move_right(lines),
        MotionKind::Up => c.move_up(lines),
        MotionKind::Down => c.move_down(lines),
        MotionKind::LineStart => c.move_to_line_start(),
        MotionKind::LineEnd => c.move_to_line_end(lines),
        MotionKind::WordForward => c.move_word_forward(lines),
        MotionKind::WordBackward => c.move_word_backward(lines),
        MotionKind::BufferStart => c.move_to_buffer_start(),
        MotionKind::BufferEnd => c.move_to_buffer_end(lines),
        MotionKind::PageUp => c.move_page_up(lines, page),
        MotionKind::PageDown => c.move_page_down(lines, page),
    });
    let after = buf.cursor().position();
    trace!(target: "actions", ?kind, from = ?before, to = ?after, "motion");
    if before == after {
        DispatchResult::clean()
    } else {
        DispatchResult::dirty()
    }
}

/// Scroll by `delta` lines, then pull the cursor back inside the window so
/// the post-dispatch `adjust_scroll` does not undo the scroll.
pub(crate) fn scroll(editor: &mut Editor, delta: isize) -> DispatchResult {
    let Some(buf) = editor.state.buffers.active_mut() else {
        return DispatchResult::clean();
    };
    let vp = &mut editor.viewport;
    let count = buf.line_count();
    if delta < 0 {
        vp.scroll_up(delta.unsigned_abs(), count);
    } else {
        vp.scroll_down(delta.unsigned_abs(), count);
    }
    let range = vp.visible_range(count);
    if !range.is_empty() {
        let line = buf.cursor().line().clamp(range.start, range.end - 1);
        buf.move_cursor(|c, lines| {
            let col = c.col();
            c.set_position(line, col);
            c.clamp(lines);
        });
    }
    DispatchResult::dirty()
}

pub(crate) fn center(editor: &mut Editor) -> DispatchResult {
    let Some(buf) = editor.state.buffers.active() else {
        return DispatchResult::clean();
    };
    editor.viewport.center_cursor(buf.cursor());
    DispatchResult::dirty()
}
