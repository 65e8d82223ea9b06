//! The editor controller: owns all editing state plus the objects that
//! render it, and applies actions through the dispatcher.
//!
//! The viewport tracks the active buffer by id. Whenever the active buffer
//! changes (open, switch, close) the viewport is re-attached, which resets
//! scroll and adopts the buffer's tab width; every dispatch ends with
//! `adjust_scroll` so the cursor is always on screen.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use core_config::Config;
use core_fs::{Encoding, lookup_tab_width};
use core_render::{Frame, RenderContext, StatusContext, Theme, Viewport, build_status};
use core_search::SearchEngine;
use core_state::{EditorState, Mode};
use core_syntax::{Highlighter, SyntaxTheme};
use core_text::{Buffer, BufferId};
use tracing::{debug, info, warn};

use crate::dispatcher::{self, DispatchResult};
use crate::io_ops::{self, OpenFileResult};
use crate::Action;

/// Rows below the text area: status line and message line.
pub const CHROME_ROWS: u16 = 2;

pub(crate) const MESSAGE_TTL: Duration = Duration::from_secs(3);

pub struct Editor {
    pub(crate) state: EditorState,
    pub(crate) viewport: Viewport,
    pub(crate) highlighter: Highlighter,
    pub(crate) search: SearchEngine,
    pub(crate) theme: Theme,
    pub(crate) config: Config,
    pub(crate) encodings: HashMap<BufferId, Encoding>,
}

impl Editor {
    /// Editor with one empty buffer for a `width` x `height` terminal.
    pub fn new(config: Config, width: u16, height: u16) -> Self {
        let mut viewport = Viewport::new(width as usize, height.saturating_sub(CHROME_ROWS) as usize);
        viewport.set_show_line_numbers(config.editor().line_numbers);
        let mut highlighter = Highlighter::new(SyntaxTheme::default());
        highlighter.set_enabled(config.editor().syntax_highlight);
        let mut search = SearchEngine::new();
        search.set_case_sensitive(config.search().case_sensitive);
        search.set_regex(config.search().regex);

        let mut editor = Self {
            state: EditorState::new(),
            viewport,
            highlighter,
            search,
            theme: Theme::default(),
            config,
            encodings: HashMap::new(),
        };
        editor.new_buffer();
        editor
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
    pub fn search(&self) -> &SearchEngine {
        &self.search
    }
    pub fn theme(&self) -> &Theme {
        &self.theme
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn active_buffer(&self) -> Option<&Buffer> {
        self.state.buffers.active()
    }

    pub fn active_buffer_mut(&mut self) -> Option<&mut Buffer> {
        self.state.buffers.active_mut()
    }

    pub fn encoding_of(&self, id: BufferId) -> Encoding {
        self.encodings.get(&id).copied().unwrap_or(Encoding::Utf8)
    }

    /// Apply editor settings from the config to a buffer about to be registered.
    pub(crate) fn configure_buffer(&self, buffer: &mut Buffer) {
        let editor = self.config.editor();
        let tab_width = buffer
            .path()
            .and_then(|p| lookup_tab_width(p, self.config.tab_width_overrides()))
            .unwrap_or(editor.tab_width);
        buffer.set_tab_width(tab_width);
        buffer.set_auto_pair(editor.auto_pair);
        buffer.set_auto_close_tags(editor.auto_close_tags);
        buffer.set_history_depth(editor.history_depth);
        if buffer.path().is_some() {
            let language = core_syntax::Language::from_extension(&buffer.extension());
            buffer.set_language(language.name());
        }
    }

    pub(crate) fn new_buffer(&mut self) -> BufferId {
        let mut buffer = Buffer::new();
        self.configure_buffer(&mut buffer);
        let id = self.state.buffers.insert(buffer);
        debug!(target: "actions", %id, "new_buffer");
        self.sync_view();
        id
    }

    pub(crate) fn set_message(&mut self, msg: impl Into<String>) {
        self.state.set_ephemeral(msg, MESSAGE_TTL);
    }

    /// Open `path` into a buffer (or activate it if already open) and report
    /// the outcome on the message line.
    pub fn open(&mut self, path: &Path) -> OpenFileResult {
        let result = io_ops::open_path(self, path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match &result {
            OpenFileResult::Opened(_) | OpenFileResult::Reactivated(_) => {
                self.set_message(format!("Opened: {name}"))
            }
            OpenFileResult::Created(_) => self.set_message(format!("New file: {name}")),
            OpenFileResult::Binary(_) => self.set_message(format!("Opened binary file: {name}")),
            OpenFileResult::Error(err) => self.set_message(format!("Error opening: {err}")),
        }
        self.sync_view();
        result
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport
            .resize(width as usize, height.saturating_sub(CHROME_ROWS) as usize);
        if let Some(buf) = self.state.buffers.active() {
            self.viewport.adjust_scroll(buf);
        }
        debug!(target: "actions", width, height, "resize");
    }

    /// Apply one action, then keep the viewport on the active buffer's cursor.
    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let result = dispatcher::dispatch(self, action);
        self.sync_view();
        result
    }

    /// Re-attach the viewport if the active buffer changed, refresh the
    /// highlighter language, and scroll the cursor into view.
    pub(crate) fn sync_view(&mut self) {
        let Some(buf) = self.state.buffers.active() else {
            return;
        };
        if self.viewport.buffer() != buf.id() {
            self.viewport.attach(buf);
        }
        self.viewport.set_tab_width(buf.tab_width());
        self.highlighter.for_extension(&buf.extension());
        self.viewport.adjust_scroll(buf);
    }

    /// Expire the message line. Returns true if a redraw is needed.
    pub fn tick(&mut self) -> bool {
        self.state.tick_ephemeral()
    }

    /// Reload the buffer for `path` from disk if it has no unsaved changes.
    /// Returns true if the buffer content changed.
    pub fn reload_if_clean(&mut self, path: &Path) -> bool {
        let target = canonical(path);
        let Some(id) = self
            .state
            .buffers
            .buffers()
            .iter()
            .find(|b| b.path().map(canonical).as_deref() == Some(target.as_path()))
            .and_then(Buffer::id)
        else {
            return false;
        };
        let Some(buf) = self.state.buffers.get(id) else {
            return false;
        };
        if buf.is_modified() || !buf.is_modifiable() {
            debug!(target: "actions", path = %path.display(), "reload_skipped_dirty");
            return false;
        }
        let loaded = match core_fs::load(path) {
            Ok(loaded) if !loaded.binary => loaded,
            Ok(_) => return false,
            Err(err) => {
                warn!(target: "actions", error = %err, "reload_failed");
                return false;
            }
        };
        if buf.content() == loaded.content {
            return false;
        }
        let name = buf.display_name();
        if let Some(buf) = self.state.buffers.get_mut(id) {
            buf.replace_content(&loaded.content);
            buf.set_line_ending(loaded.line_ending);
            buf.set_modifiable(!loaded.lossy);
        }
        self.encodings.insert(id, loaded.encoding);
        info!(target: "actions", path = %path.display(), %id, "buffer_reloaded");
        self.set_message(format!("Reloaded: {name}"));
        self.sync_view();
        true
    }

    /// Paths of open buffers backed by files.
    pub fn open_paths(&self) -> Vec<PathBuf> {
        self.state
            .buffers
            .buffers()
            .iter()
            .filter_map(|b| b.path().map(Path::to_path_buf))
            .collect()
    }

    pub fn render_frame(&self) -> Frame {
        let width = self.viewport.width();
        let message: String = self.state.message_line().chars().take(width).collect();
        let Some(buffer) = self.state.buffers.active() else {
            return Frame {
                rows: vec![" ".repeat(width); self.viewport.height()],
                status: " ".repeat(width),
                message,
            };
        };
        let rows = RenderContext {
            buffer,
            viewport: &self.viewport,
            highlighter: &self.highlighter,
            theme: &self.theme,
            mode: self.state.mode,
        }
        .render_rows();

        let file_name = buffer.display_name();
        let change_indicator = buffer.line_change_indicator();
        let encoding = buffer
            .id()
            .map(|id| self.encoding_of(id))
            .unwrap_or(Encoding::Utf8);
        let (line, col) = buffer.cursor().position();
        let status = build_status(
            &StatusContext {
                mode: self.state.mode,
                file_name: &file_name,
                modified: buffer.is_modified(),
                change_indicator: &change_indicator,
                language: buffer.language(),
                encoding: encoding.label(),
                line,
                col,
                line_count: buffer.line_count(),
            },
            width,
        );
        Frame {
            rows,
            status,
            message,
        }
    }
}

fn canonical(p: &Path) -> PathBuf {
    std::fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf())
}
