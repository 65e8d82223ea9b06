//! Structured `:` command parsing.
//!
//! Converts the prompt text (with or without the leading `:`) into a
//! `ParsedCommand`. Pure classification, no side effects; unknown input is
//! kept verbatim so the caller can echo it back.
//!
//! | input                     | command                          |
//! |---------------------------|----------------------------------|
//! | `q`, `q!`                 | quit, force quit                 |
//! | `w [path]`, `wq`, `x`     | write, write and quit            |
//! | `e <path>`                | open                             |
//! | `new`, `bn`, `bp`, `bd`   | new / next / previous / close    |
//! | `<n>`                     | go to line `n` (1-based)         |
//! | `s/pat/rep/[i]`, `%s/...` | replace all (literal)            |
//! | `set <opt>`               | `nu` `nonu` `ic` `noic` `regex` `noregex` `syntax` `nosyntax` |
//! | `rename <name>`           | rename the file on disk          |

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOption {
    LineNumbers(bool),
    IgnoreCase(bool),
    Regex(bool),
    Syntax(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Quit,
    ForceQuit,
    Write(Option<PathBuf>),
    WriteQuit,
    Edit(PathBuf),
    New,
    BufferNext,
    BufferPrevious,
    BufferClose,
    Goto(usize),
    Substitute {
        pattern: String,
        replacement: String,
        case_sensitive: bool,
    },
    Set(SetOption),
    Rename(PathBuf),
    Unknown(String),
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> ParsedCommand {
        let s = raw.trim();
        let body = s.strip_prefix(':').unwrap_or(s).trim();
        if body.is_empty() {
            return ParsedCommand::Unknown(String::new());
        }
        match body {
            "q" | "quit" => return ParsedCommand::Quit,
            "q!" | "quit!" => return ParsedCommand::ForceQuit,
            "w" | "write" => return ParsedCommand::Write(None),
            "wq" | "x" => return ParsedCommand::WriteQuit,
            "new" | "enew" => return ParsedCommand::New,
            "bn" | "bnext" => return ParsedCommand::BufferNext,
            "bp" | "bprevious" => return ParsedCommand::BufferPrevious,
            "bd" | "bdelete" => return ParsedCommand::BufferClose,
            _ => {}
        }
        if let Ok(n) = body.parse::<usize>() {
            return ParsedCommand::Goto(n);
        }
        if let Some(sub) = body.strip_prefix("%s").or_else(|| body.strip_prefix('s'))
            && let Some(cmd) = parse_substitute(sub)
        {
            return cmd;
        }
        let (head, arg) = match body.split_once(char::is_whitespace) {
            Some((h, a)) => (h, a.trim()),
            None => (body, ""),
        };
        match (head, arg) {
            ("w" | "write", path) if !path.is_empty() => ParsedCommand::Write(Some(PathBuf::from(path))),
            ("e" | "edit", path) if !path.is_empty() => ParsedCommand::Edit(PathBuf::from(path)),
            ("rename", name) if !name.is_empty() => ParsedCommand::Rename(PathBuf::from(name)),
            ("set", opt) => parse_set(opt).unwrap_or_else(|| ParsedCommand::Unknown(body.to_string())),
            _ => ParsedCommand::Unknown(body.to_string()),
        }
    }
}

fn parse_set(opt: &str) -> Option<ParsedCommand> {
    let option = match opt {
        "nu" | "number" => SetOption::LineNumbers(true),
        "nonu" | "nonumber" => SetOption::LineNumbers(false),
        "ic" | "ignorecase" => SetOption::IgnoreCase(true),
        "noic" | "noignorecase" => SetOption::IgnoreCase(false),
        "regex" => SetOption::Regex(true),
        "noregex" => SetOption::Regex(false),
        "syntax" => SetOption::Syntax(true),
        "nosyntax" => SetOption::Syntax(false),
        _ => return None,
    };
    Some(ParsedCommand::Set(option))
}

/// `/pat/rep/flags` with any non-alphanumeric delimiter. The trailing
/// delimiter is optional; `i` in the flags makes matching case-insensitive.
fn parse_substitute(rest: &str) -> Option<ParsedCommand> {
    let delim = rest.chars().next()?;
    if delim.is_alphanumeric() || delim.is_whitespace() {
        return None;
    }
    let mut parts = rest[delim.len_utf8()..].splitn(3, delim);
    let pattern = parts.next()?;
    let replacement = parts.next()?;
    let flags = parts.next().unwrap_or("");
    if pattern.is_empty() {
        return None;
    }
    Some(ParsedCommand::Substitute {
        pattern: pattern.to_string(),
        replacement: replacement.to_string(),
        case_sensitive: !flags.contains('i'),
    })
}
