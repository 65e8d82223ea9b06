//! Search queries and match navigation.
//!
//! Results are not invalidated by later edits; stepping re-clamps the cursor
//! in case a stale match now lies past the end of its line.

use super::DispatchResult;
use crate::Editor;
use core_search::SearchResult;
use core_text::Buffer;
use tracing::debug;

fn jump(buf: &mut Buffer, r: SearchResult) {
    buf.move_cursor(|c, lines| {
        c.set_position(r.line, r.col);
        c.clamp(lines);
    });
}

/// Run `query` against the active buffer and jump to the first match. An
/// empty query repeats the previous one.
pub(crate) fn run_query(editor: &mut Editor, query: &str) -> DispatchResult {
    if !query.is_empty() {
        editor.search.set_query(query);
    }
    if editor.search.query().is_empty() {
        editor.set_message("No previous search");
        return DispatchResult::dirty();
    }
    let Some(buf) = editor.state.buffers.active_mut() else {
        return DispatchResult::clean();
    };
    let count = editor.search.search(&*buf);
    debug!(target: "actions", query = editor.search.query(), count, "search");
    match editor.search.current() {
        Some(first) => {
            jump(buf, first);
            editor.set_message(format!("Found {count} matches"));
        }
        None => editor.set_message("No matches found"),
    }
    DispatchResult::dirty()
}

pub(crate) fn step(editor: &mut Editor, forward: bool) -> DispatchResult {
    let next = if forward {
        editor.search.next()
    } else {
        editor.search.previous()
    };
    let Some(r) = next else {
        editor.set_message("No search results");
        return DispatchResult::dirty();
    };
    if let Some(buf) = editor.state.buffers.active_mut() {
        jump(buf, r);
    }
    let index = editor.search.current_index().unwrap_or(0);
    let msg = format!("[{index}/{}] {}", editor.search.count(), editor.search.query());
    editor.set_message(msg);
    DispatchResult::dirty()
}
