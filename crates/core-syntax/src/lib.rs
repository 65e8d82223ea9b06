//! Line-local syntax highlighting and bracket matching.
//!
//! Languages are a closed enum dispatched through a static table of
//! `LanguageRules`; one generic tokenizer consumes whichever rule set is
//! active. Each token is classified exactly once and styled as a whole, so the
//! output never contains an escape sequence nested inside another token.
//!
//! Highlighting is per line with no state carried between lines: a block
//! comment or multi-line string is only recognized on the line it starts.

pub mod brackets;
pub mod highlight;
pub mod language;
pub mod theme;

pub use brackets::{find_matching_bracket, is_bracket};
pub use highlight::{Highlighter, Token, TokenKind, tokenize};
pub use language::{Language, LanguageRules};
pub use theme::SyntaxTheme;
