//! Main event loop.
//!
//! One thread owns the `Editor`. It waits on three sources at once:
//!
//! * terminal events from the input thread,
//! * changed paths from the directory watcher (if enabled),
//! * the debounce deadline and a periodic tick for message expiry.
//!
//! Watcher paths are coalesced by a trailing-edge `Debouncer`; when a batch
//! is released each path is offered to `Editor::reload_if_clean`. A frame is
//! painted after any event that left the editor dirty.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use core_actions::{Action, EditKind, Editor, translate_key};
use core_fs::{Debouncer, DirWatcher};
use core_render::Writer;
use core_state::Mode;
use crossbeam_channel::{Receiver, at, never, select, tick};
use crossterm::event::Event;
use tracing::{debug, info, trace};

/// Interval of the housekeeping tick (message expiry).
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue { dirty: bool },
    Break,
}

/// Apply one terminal event to the editor.
pub fn handle_terminal_event(editor: &mut Editor, event: Event) -> LoopControl {
    match event {
        Event::Key(key) => {
            let Some(action) = translate_key(editor.mode(), &key) else {
                return LoopControl::Continue { dirty: false };
            };
            let result = editor.dispatch(action);
            if result.quit {
                LoopControl::Break
            } else {
                LoopControl::Continue {
                    dirty: result.dirty,
                }
            }
        }
        Event::Resize(width, height) => {
            editor.resize(width, height);
            LoopControl::Continue { dirty: true }
        }
        Event::Paste(text) => paste(editor, text),
        _ => LoopControl::Continue { dirty: false },
    }
}

/// Bracketed paste: one undo step in Insert mode, prompt chars in a prompt,
/// ignored in Normal mode.
fn paste(editor: &mut Editor, text: String) -> LoopControl {
    let dirty = match editor.mode() {
        Mode::Insert => editor.dispatch(Action::Edit(EditKind::InsertText(text))).dirty,
        Mode::Search | Mode::Command => {
            for ch in text.chars().filter(|c| !c.is_control()) {
                editor.dispatch(Action::PromptChar(ch));
            }
            true
        }
        Mode::Normal => false,
    };
    LoopControl::Continue { dirty }
}

/// Offer every debounced path to the editor. Returns true if any buffer
/// was reloaded.
pub fn apply_file_changes(editor: &mut Editor, paths: &[PathBuf]) -> bool {
    let mut reloaded = false;
    for path in paths {
        reloaded |= editor.reload_if_clean(path);
    }
    trace!(target: "runtime.watch", batch = paths.len(), reloaded, "file_changes");
    reloaded
}

pub struct Runtime {
    editor: Editor,
    input: Receiver<Event>,
    watcher: Option<DirWatcher>,
    debouncer: Debouncer,
}

impl Runtime {
    pub fn new(editor: Editor, input: Receiver<Event>, watcher: Option<DirWatcher>, debounce: Duration) -> Self {
        Self {
            editor,
            input,
            watcher,
            debouncer: Debouncer::new(debounce),
        }
    }

    fn paint(&self) -> Result<()> {
        let frame = self.editor.render_frame();
        let mut writer = Writer::new();
        writer.paint(&frame, self.editor.theme());
        writer.flush()
    }

    pub fn run(&mut self) -> Result<()> {
        self.paint()?;
        let span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter = span.enter();

        let ticker = tick(TICK_INTERVAL);
        let watch_rx = self
            .watcher
            .as_ref()
            .map(|w| w.events().clone())
            .unwrap_or_else(never);

        loop {
            let deadline = self.debouncer.deadline().map(at).unwrap_or_else(never);
            let control = select! {
                recv(self.input) -> msg => match msg {
                    Ok(event) => handle_terminal_event(&mut self.editor, event),
                    Err(_) => {
                        info!(target: "runtime.shutdown", reason = "input_closed", "shutdown");
                        LoopControl::Break
                    }
                },
                recv(watch_rx) -> msg => {
                    if let Ok(path) = msg {
                        self.debouncer.note(path, Instant::now());
                    }
                    LoopControl::Continue { dirty: false }
                },
                recv(deadline) -> _ => {
                    let dirty = match self.debouncer.take_ready(Instant::now()) {
                        Some(batch) => apply_file_changes(&mut self.editor, &batch),
                        None => false,
                    };
                    LoopControl::Continue { dirty }
                },
                recv(ticker) -> _ => LoopControl::Continue { dirty: self.editor.tick() },
            };
            match control {
                LoopControl::Break => break,
                LoopControl::Continue { dirty: true } => self.paint()?,
                LoopControl::Continue { dirty: false } => {}
            }
        }
        info!(target: "runtime.shutdown", "event_loop_exit");

        if let Some(mut watcher) = self.watcher.take() {
            let dropped = watcher.dropped();
            watcher.close();
            debug!(target: "runtime.shutdown", dropped, "watcher_closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Config;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn editor() -> Editor {
        Editor::new(Config::default(), 80, 24)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn ctrl_q_on_clean_editor_breaks_the_loop() {
        let mut ed = editor();
        let quit = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert_eq!(handle_terminal_event(&mut ed, quit), LoopControl::Break);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut ed = editor();
        let mut release = KeyEvent::new(KeyCode::Char('i'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(
            handle_terminal_event(&mut ed, Event::Key(release)),
            LoopControl::Continue { dirty: false }
        );
        assert_eq!(ed.mode(), Mode::Normal);
    }

    #[test]
    fn resize_marks_dirty_and_shrinks_viewport() {
        let mut ed = editor();
        assert_eq!(
            handle_terminal_event(&mut ed, Event::Resize(40, 12)),
            LoopControl::Continue { dirty: true }
        );
        assert_eq!(ed.viewport().height(), 10);
        assert_eq!(ed.render_frame().rows.len(), 10);
    }

    #[test]
    fn paste_in_insert_mode_is_one_undo_step() {
        let mut ed = editor();
        handle_terminal_event(&mut ed, key(KeyCode::Char('i')));
        handle_terminal_event(&mut ed, Event::Paste("one\ntwo".into()));
        assert_eq!(ed.active_buffer().unwrap().lines(), ["one", "two"]);
        handle_terminal_event(&mut ed, key(KeyCode::Esc));
        handle_terminal_event(&mut ed, key(KeyCode::Char('u')));
        assert_eq!(ed.active_buffer().unwrap().lines(), [""]);
    }

    #[test]
    fn paste_in_normal_mode_is_ignored() {
        let mut ed = editor();
        assert_eq!(
            handle_terminal_event(&mut ed, Event::Paste("text".into())),
            LoopControl::Continue { dirty: false }
        );
        assert_eq!(ed.active_buffer().unwrap().lines(), [""]);
    }

    #[test]
    fn paste_into_command_prompt_types_chars() {
        let mut ed = editor();
        handle_terminal_event(&mut ed, key(KeyCode::Char(':')));
        handle_terminal_event(&mut ed, Event::Paste("set nonu\n".into()));
        handle_terminal_event(&mut ed, key(KeyCode::Enter));
        assert!(!ed.viewport().show_line_numbers());
    }

    #[test]
    fn file_change_batch_reloads_clean_buffers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.txt");
        std::fs::write(&path, "before").unwrap();
        let mut ed = editor();
        ed.open(&path);
        std::fs::write(&path, "after").unwrap();
        let other = dir.path().join("unrelated.txt");
        assert!(apply_file_changes(&mut ed, &[other, path.clone()]));
        assert_eq!(ed.active_buffer().unwrap().lines(), ["after"]);
        assert!(!apply_file_changes(&mut ed, &[path]));
    }
}
