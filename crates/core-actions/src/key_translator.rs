//! Key → `Action` mapping.
//!
//! Global chords are checked first and apply in every mode except where a
//! prompt needs the key itself. Everything else is mode specific:
//!
//! | mode    | keys                                                              |
//! |---------|-------------------------------------------------------------------|
//! | Normal  | `h j k l` / arrows, `0 $ w b g G`, `i a o`, `x`, `u`, `y p P`, `/ n N`, `:` |
//! | Insert  | printable chars, Enter, Tab, Backspace, Delete (line), arrows, Esc |
//! | Search  | printable chars, Backspace, Enter, Esc                            |
//! | Command | same as Search                                                    |
//!
//! Only key presses are translated; repeats count as presses and releases are
//! ignored.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use core_state::Mode;
use tracing::trace;

use crate::{Action, EditKind, ModeChange, MotionKind, PromptKind};

/// Lines moved by Ctrl-E / Ctrl-Y.
const SCROLL_STEP: usize = 1;

pub fn translate_key(mode: Mode, key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let action = global(mode, key).or_else(|| match mode {
        Mode::Normal => normal(key),
        Mode::Insert => insert(key),
        Mode::Search | Mode::Command => prompt(key),
    });
    trace!(target: "actions", ?mode, code = ?key.code, ?action, "translate_key");
    action
}

fn ctrl(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
}

fn alt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT)
}

fn global(mode: Mode, key: &KeyEvent) -> Option<Action> {
    if ctrl(key) {
        return match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('c') if mode.is_editing() => Some(Action::Quit),
            KeyCode::Char('c') => Some(Action::PromptCancel),
            KeyCode::Char('s') => Some(Action::Save),
            KeyCode::Char('n') => Some(Action::NewBuffer),
            KeyCode::Char('w') => Some(Action::CloseBuffer),
            KeyCode::Char('l') => Some(Action::ToggleLineNumbers),
            _ => None,
        };
    }
    if alt(key) {
        return match key.code {
            KeyCode::Char('.') | KeyCode::Char('>') => Some(Action::NextBuffer),
            KeyCode::Char(',') | KeyCode::Char('<') => Some(Action::PreviousBuffer),
            KeyCode::Left => Some(Action::MoveBufferLeft),
            KeyCode::Right => Some(Action::MoveBufferRight),
            _ => None,
        };
    }
    None
}

/// Navigation keys shared by Normal and Insert mode.
fn navigation(key: &KeyEvent) -> Option<Action> {
    let motion = match key.code {
        KeyCode::Left => MotionKind::Left,
        KeyCode::Right => MotionKind::Right,
        KeyCode::Up => MotionKind::Up,
        KeyCode::Down => MotionKind::Down,
        KeyCode::Home => MotionKind::LineStart,
        KeyCode::End => MotionKind::LineEnd,
        KeyCode::PageUp => MotionKind::PageUp,
        KeyCode::PageDown => MotionKind::PageDown,
        _ => return None,
    };
    Some(Action::Motion(motion))
}

fn normal(key: &KeyEvent) -> Option<Action> {
    if let Some(a) = navigation(key) {
        return Some(a);
    }
    match key.code {
        KeyCode::Char('r') if ctrl(key) => Some(Action::Redo),
        KeyCode::Char('e') if ctrl(key) => Some(Action::ScrollDown(SCROLL_STEP)),
        KeyCode::Char('y') if ctrl(key) => Some(Action::ScrollUp(SCROLL_STEP)),
        KeyCode::Char(_) if ctrl(key) => None,
        KeyCode::Char(c) => match c {
            'h' => Some(Action::Motion(MotionKind::Left)),
            'l' => Some(Action::Motion(MotionKind::Right)),
            'j' => Some(Action::Motion(MotionKind::Down)),
            'k' => Some(Action::Motion(MotionKind::Up)),
            '0' => Some(Action::Motion(MotionKind::LineStart)),
            '$' => Some(Action::Motion(MotionKind::LineEnd)),
            'w' => Some(Action::Motion(MotionKind::WordForward)),
            'b' => Some(Action::Motion(MotionKind::WordBackward)),
            'g' => Some(Action::Motion(MotionKind::BufferStart)),
            'G' => Some(Action::Motion(MotionKind::BufferEnd)),
            'i' => Some(Action::ModeChange(ModeChange::EnterInsert)),
            'a' => Some(Action::ModeChange(ModeChange::Append)),
            'o' => Some(Action::ModeChange(ModeChange::OpenLineBelow)),
            'x' => Some(Action::Edit(EditKind::DeleteUnder)),
            'u' => Some(Action::Undo),
            'y' => Some(Action::YankLine),
            'p' => Some(Action::PasteAfter),
            'P' => Some(Action::PasteBefore),
            'n' => Some(Action::SearchNext),
            'N' => Some(Action::SearchPrevious),
            'z' => Some(Action::CenterCursor),
            '/' => Some(Action::PromptStart(PromptKind::Search)),
            ':' => Some(Action::PromptStart(PromptKind::Command)),
            _ => None,
        },
        KeyCode::Backspace => Some(Action::Motion(MotionKind::Left)),
        KeyCode::Delete => Some(Action::Edit(EditKind::DeleteLine)),
        _ => None,
    }
}

fn insert(key: &KeyEvent) -> Option<Action> {
    if let Some(a) = navigation(key) {
        return Some(a);
    }
    match key.code {
        KeyCode::Esc => Some(Action::ModeChange(ModeChange::LeaveInsert)),
        KeyCode::Enter => Some(Action::Edit(EditKind::InsertNewline)),
        KeyCode::Tab => Some(Action::Edit(EditKind::InsertTab)),
        KeyCode::Backspace => Some(Action::Edit(EditKind::Backspace)),
        KeyCode::Delete => Some(Action::Edit(EditKind::DeleteLine)),
        KeyCode::Char('v') if ctrl(key) => Some(Action::PasteInline),
        KeyCode::Char(_) if ctrl(key) => None,
        KeyCode::Char(c) if !c.is_control() => Some(Action::Edit(EditKind::InsertChar(c))),
        _ => None,
    }
}

fn prompt(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::PromptCancel),
        KeyCode::Enter => Some(Action::PromptExecute),
        KeyCode::Backspace => Some(Action::PromptBackspace),
        KeyCode::Char(_) if ctrl(key) => None,
        KeyCode::Char(c) if !c.is_control() => Some(Action::PromptChar(c)),
        _ => None,
    }
}
