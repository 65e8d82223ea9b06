//! Editor state: open buffers, input mode, the prompt line, transient
//! messages and the yank register.
//!
//! Everything here is owned by the controller thread; there is no interior
//! mutability and no global state.

use std::time::{Duration, Instant};

pub mod manager;

pub use manager::BufferManager;

/// Input mode. Determines key translation, cursor styling and whether
/// bracket matching is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Search,
    Command,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Search => "SEARCH",
            Mode::Command => "COMMAND",
        }
    }

    /// Navigation or text entry, as opposed to typing into the prompt.
    pub fn is_editing(self) -> bool {
        matches!(self, Mode::Normal | Mode::Insert)
    }
}

/// Text being typed at the bottom prompt, with its leading sigil
/// (`/` for search, `:` for commands).
#[derive(Debug, Default, Clone)]
pub struct CommandLineState {
    buf: String,
}

impl CommandLineState {
    pub fn is_active(&self) -> bool {
        !self.buf.is_empty()
    }
    /// Raw buffer including the sigil, for display.
    pub fn buffer(&self) -> &str {
        &self.buf
    }
    /// Buffer without the sigil.
    pub fn input(&self) -> &str {
        self.buf.get(1..).unwrap_or("")
    }
    pub fn clear(&mut self) {
        self.buf.clear();
    }
    /// Start a fresh prompt with `sigil`.
    pub fn begin(&mut self, sigil: char) {
        self.buf.clear();
        self.buf.push(sigil);
    }
    pub fn push_char(&mut self, ch: char) {
        self.buf.push(ch);
    }
    /// Removing the sigil itself deactivates the prompt.
    pub fn backspace(&mut self) {
        self.buf.pop();
    }
}

/// Status message that disappears after a fixed time.
#[derive(Debug, Clone)]
pub struct EphemeralMessage {
    pub text: String,
    pub expires_at: Instant,
}

/// Single in-process yank register. Linewise payloads paste as whole lines,
/// so a yanked empty line still counts as content.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Register {
    text: String,
    linewise: bool,
    filled: bool,
}

impl Register {
    pub fn set(&mut self, text: impl Into<String>, linewise: bool) {
        self.text = text.into();
        self.linewise = linewise;
        self.filled = linewise || !self.text.is_empty();
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn is_linewise(&self) -> bool {
        self.linewise
    }
    pub fn is_empty(&self) -> bool {
        !self.filled
    }
}

#[derive(Debug, Default)]
pub struct EditorState {
    pub buffers: BufferManager,
    pub mode: Mode,
    pub command_line: CommandLineState,
    pub ephemeral_status: Option<EphemeralMessage>,
    pub clipboard: Register,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `msg` for `ttl`.
    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S, ttl: Duration) {
        self.ephemeral_status = Some(EphemeralMessage {
            text: msg.into(),
            expires_at: Instant::now() + ttl,
        });
    }

    /// Drop an expired message. Returns true if one was cleared.
    pub fn tick_ephemeral(&mut self) -> bool {
        if let Some(m) = &self.ephemeral_status
            && Instant::now() >= m.expires_at
        {
            self.ephemeral_status = None;
            return true;
        }
        false
    }

    /// Text for the bottom line: the prompt while one is open, else the
    /// current message.
    pub fn message_line(&self) -> &str {
        if self.command_line.is_active() {
            self.command_line.buffer()
        } else {
            self.ephemeral_status
                .as_ref()
                .map(|m| m.text.as_str())
                .unwrap_or("")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_labels_and_editing_flag() {
        assert_eq!(Mode::Insert.label(), "INSERT");
        assert!(Mode::Normal.is_editing());
        assert!(!Mode::Search.is_editing());
    }

    #[test]
    fn command_line_sigil_handling() {
        let mut c = CommandLineState::default();
        c.begin('/');
        c.push_char('f');
        assert_eq!(c.buffer(), "/f");
        assert_eq!(c.input(), "f");
        c.backspace();
        assert!(c.is_active());
        c.backspace();
        assert!(!c.is_active());
        assert_eq!(c.input(), "");
    }

    #[test]
    fn ephemeral_expires() {
        let mut st = EditorState::new();
        st.set_ephemeral("saved", Duration::from_secs(5));
        assert!(!st.tick_ephemeral());
        assert_eq!(st.message_line(), "saved");
        if let Some(m) = &mut st.ephemeral_status {
            m.expires_at = Instant::now() - Duration::from_millis(1);
        }
        assert!(st.tick_ephemeral());
        assert_eq!(st.message_line(), "");
    }

    #[test]
    fn prompt_shadows_message() {
        let mut st = EditorState::new();
        st.set_ephemeral("saved", Duration::from_secs(5));
        st.command_line.begin(':');
        st.command_line.push_char('w');
        assert_eq!(st.message_line(), ":w");
    }

    #[test]
    fn yanked_empty_line_is_pasteable() {
        let mut r = Register::default();
        assert!(r.is_empty());
        r.set("", true);
        assert!(!r.is_empty());
        assert_eq!(r.text(), "");
        r.set("", false);
        assert!(r.is_empty());
    }
}
