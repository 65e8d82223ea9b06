//! Terminal session management over crossterm.
//!
//! The editor draws its own cursor cell, so the hardware cursor stays hidden
//! for the whole session. `TerminalSession` restores the terminal when it is
//! dropped, including during unwinding; the binary's panic hook additionally
//! calls `restore_terminal` so the panic message lands on a usable screen.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{Write, stdout};
use tracing::{debug, warn};

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// `(columns, rows)`.
    fn size(&self) -> Result<(u16, u16)>;
}

#[derive(Debug, Default)]
pub struct CrosstermBackend {
    entered: bool,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
            self.entered = true;
            debug!(target: "runtime", "terminal_enter");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            debug!(target: "runtime", "terminal_leave");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }
}

/// Owns an entered backend and leaves it on drop.
pub struct TerminalSession<B: TerminalBackend = CrosstermBackend> {
    backend: B,
}

impl TerminalSession<CrosstermBackend> {
    pub fn start(title: &str) -> Result<Self> {
        Self::with_backend(CrosstermBackend::new(), title)
    }
}

impl<B: TerminalBackend> TerminalSession<B> {
    pub fn with_backend(mut backend: B, title: &str) -> Result<Self> {
        backend.enter()?;
        if let Err(err) = backend.set_title(title) {
            warn!(target: "runtime", error = %err, "terminal_title_failed");
        }
        Ok(Self { backend })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        self.backend.size()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: TerminalBackend> Drop for TerminalSession<B> {
    fn drop(&mut self) {
        if let Err(err) = self.backend.leave() {
            warn!(target: "runtime", error = %err, "terminal_restore_failed");
        }
    }
}

/// Unconditional best-effort restore for use from a panic hook, where the
/// session value may be unreachable.
pub fn restore_terminal() {
    let mut out = stdout();
    let _ = execute!(out, LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
    let _ = out.flush();
}
