//! Execution of `:` commands.

use std::path::{Path, PathBuf};

use super::command_parser::{CommandParser, ParsedCommand, SetOption};
use super::{DispatchResult, buffers, quit_checked};
use crate::Editor;
use tracing::{debug, info};

pub(crate) fn execute(editor: &mut Editor, input: &str) -> DispatchResult {
    let cmd = CommandParser::parse(input);
    debug!(target: "actions", ?cmd, "command");
    match cmd {
        ParsedCommand::Quit => quit_checked(editor),
        ParsedCommand::ForceQuit => DispatchResult::quit(),
        ParsedCommand::Write(target) => buffers::save(editor, target),
        ParsedCommand::WriteQuit => {
            let res = buffers::save(editor, None);
            if buffers::active_is_clean(editor) {
                quit_checked(editor)
            } else {
                res
            }
        }
        ParsedCommand::Edit(path) => {
            editor.open(&path);
            DispatchResult::dirty()
        }
        ParsedCommand::New => buffers::new_buffer(editor),
        ParsedCommand::BufferNext => buffers::cycle(editor, true),
        ParsedCommand::BufferPrevious => buffers::cycle(editor, false),
        ParsedCommand::BufferClose => buffers::close_active(editor),
        ParsedCommand::Goto(n) => goto_line(editor, n),
        ParsedCommand::Substitute {
            pattern,
            replacement,
            case_sensitive,
        } => substitute(editor, &pattern, &replacement, case_sensitive),
        ParsedCommand::Set(opt) => set_option(editor, opt),
        ParsedCommand::Rename(name) => rename(editor, &name),
        ParsedCommand::Unknown(raw) => {
            editor.set_message(format!("Unknown command: {raw}"));
            DispatchResult::dirty()
        }
    }
}

/// Go to 1-based line `n`, clamped to the buffer.
fn goto_line(editor: &mut Editor, n: usize) -> DispatchResult {
    let Some(buf) = editor.state.buffers.active_mut() else {
        return DispatchResult::clean();
    };
    buf.move_cursor(|c, lines| {
        c.set_position(n.saturating_sub(1), 0);
        c.clamp(lines);
    });
    DispatchResult::dirty()
}

fn substitute(editor: &mut Editor, pattern: &str, replacement: &str, case_sensitive: bool) -> DispatchResult {
    let Some(buf) = editor.state.buffers.active_mut() else {
        return DispatchResult::clean();
    };
    if !buf.is_modifiable() {
        editor.set_message("Buffer is read-only");
        return DispatchResult::dirty();
    }
    let changed = core_search::replace_all(buf, pattern, replacement, case_sensitive);
    buf.move_cursor(|c, lines| c.clamp(lines));
    editor.search.clear();
    editor.set_message(if changed == 0 {
        format!("Pattern not found: {pattern}")
    } else {
        format!("Replaced in {changed} lines")
    });
    DispatchResult::dirty()
}

fn set_option(editor: &mut Editor, opt: SetOption) -> DispatchResult {
    match opt {
        SetOption::LineNumbers(on) => editor.viewport.set_show_line_numbers(on),
        SetOption::IgnoreCase(on) => {
            editor.search.set_case_sensitive(!on);
            editor.search.clear();
        }
        SetOption::Regex(on) => {
            editor.search.set_regex(on);
            editor.search.clear();
        }
        SetOption::Syntax(on) => editor.highlighter.set_enabled(on),
    }
    DispatchResult::dirty()
}

/// Rename the active buffer's file. A bare name stays in the file's
/// directory; the target must not already exist.
fn rename(editor: &mut Editor, name: &Path) -> DispatchResult {
    let Some(buf) = editor.state.buffers.active_mut() else {
        return DispatchResult::clean();
    };
    if !buf.is_modifiable() {
        editor.set_message("Buffer is read-only");
        return DispatchResult::dirty();
    }
    let old = buf.path().map(Path::to_path_buf);
    let new_path: PathBuf = match old.as_deref().and_then(Path::parent) {
        Some(dir) if name.is_relative() => dir.join(name),
        _ => name.to_path_buf(),
    };
    let shown = name.display().to_string();
    if old.as_deref() != Some(new_path.as_path()) && core_fs::file_exists(&new_path) {
        editor.set_message(format!("File '{shown}' already exists"));
        return DispatchResult::dirty();
    }
    if let Some(old) = old.as_deref()
        && core_fs::file_exists(old)
        && let Err(err) = core_fs::rename_file(old, &new_path)
    {
        editor.set_message(format!("Error renaming: {err}"));
        return DispatchResult::dirty();
    }
    buf.set_path(Some(new_path.clone()));
    let language = core_syntax::Language::from_extension(&buf.extension());
    buf.set_language(language.name());
    info!(target: "actions", to = %new_path.display(), "buffer_renamed");
    editor.set_message(format!("Renamed to {shown}"));
    DispatchResult::dirty()
}
