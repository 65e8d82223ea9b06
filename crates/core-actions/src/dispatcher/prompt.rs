//! The bottom prompt line shared by search (`/`) and commands (`:`).

use super::{DispatchResult, command, search};
use crate::{Action, Editor, PromptKind};
use core_state::Mode;

pub(crate) fn handle_prompt_action(action: Action, editor: &mut Editor) -> DispatchResult {
    let state = &mut editor.state;
    match action {
        Action::PromptStart(kind) => {
            let (sigil, mode) = match kind {
                PromptKind::Search => ('/', Mode::Search),
                PromptKind::Command => (':', Mode::Command),
            };
            state.command_line.begin(sigil);
            state.mode = mode;
            DispatchResult::dirty()
        }
        Action::PromptChar(ch) => {
            state.command_line.push_char(ch);
            DispatchResult::dirty()
        }
        Action::PromptBackspace => {
            state.command_line.backspace();
            if !state.command_line.is_active() {
                state.mode = Mode::Normal;
            }
            DispatchResult::dirty()
        }
        Action::PromptCancel => {
            state.command_line.clear();
            state.mode = Mode::Normal;
            DispatchResult::dirty()
        }
        Action::PromptExecute => {
            let input = state.command_line.input().to_owned();
            let mode = state.mode;
            state.command_line.clear();
            state.mode = Mode::Normal;
            match mode {
                Mode::Search => search::run_query(editor, &input),
                Mode::Command => command::execute(editor, &input),
                Mode::Normal | Mode::Insert => DispatchResult::dirty(),
            }
        }
        _ => DispatchResult::clean(),
    }
}
