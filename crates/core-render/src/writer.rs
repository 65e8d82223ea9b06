//! Batched terminal output.
//!
//! Commands are collected for one frame and queued to the output in order;
//! the output is flushed exactly once per frame. Positions are absolute with a
//! (0,0) origin and the caller keeps them in bounds.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};

use crate::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    ClearLine,
    Print(String),
}

/// One frame's worth of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<String>,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }
    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    /// Text rows, then the status line (styled), then the message line.
    pub fn paint(&mut self, frame: &Frame, theme: &Theme) {
        let mut y: u16 = 0;
        for row in &frame.rows {
            self.move_to(0, y);
            self.print(row.as_str());
            y = y.saturating_add(1);
        }
        self.move_to(0, y);
        self.print(theme.status.apply(frame.status.as_str()).to_string());
        self.move_to(0, y.saturating_add(1));
        self.clear_line();
        self.print(theme.message.apply(frame.message.as_str()).to_string());
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
                Command::Print(s) => queue!(out, Print(s))?,
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn flush(self) -> Result<()> {
        self.flush_to(&mut stdout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_orders_rows_status_message() {
        let frame = Frame {
            rows: vec!["a".into(), "b".into()],
            status: "st".into(),
            message: String::new(),
        };
        let mut w = Writer::new();
        w.paint(&frame, &Theme::default());
        let cmds = w.commands();
        assert_eq!(cmds[0], Command::MoveTo(0, 0));
        assert_eq!(cmds[1], Command::Print("a".into()));
        assert_eq!(cmds[2], Command::MoveTo(0, 1));
        assert_eq!(cmds[4], Command::MoveTo(0, 2));
        assert_eq!(cmds[6], Command::MoveTo(0, 3));
        assert_eq!(cmds[7], Command::ClearLine);
    }

    #[test]
    fn flush_writes_escape_stream() {
        let mut w = Writer::new();
        w.move_to(2, 1);
        w.print("hi");
        let mut out: Vec<u8> = Vec::new();
        w.flush_to(&mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert_eq!(s, "\u{1b}[2;3Hhi");
    }
}
