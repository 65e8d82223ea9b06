use crossterm::style::{Color, ContentStyle};

use crate::TokenKind;

/// Style per token class. Constructed explicitly and handed to the
/// highlighter; there is no process-wide palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTheme {
    pub keyword: ContentStyle,
    pub type_name: ContentStyle,
    pub constant: ContentStyle,
    pub string: ContentStyle,
    pub comment: ContentStyle,
    pub number: ContentStyle,
    pub function: ContentStyle,
}

fn fg(code: u8) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(Color::AnsiValue(code)),
        ..ContentStyle::default()
    }
}

impl Default for SyntaxTheme {
    /// 256-color palette.
    fn default() -> Self {
        Self {
            keyword: fg(205),
            type_name: fg(117),
            constant: fg(141),
            string: fg(150),
            comment: fg(243),
            number: fg(174),
            function: fg(220),
        }
    }
}

impl SyntaxTheme {
    /// `None` for text that is emitted unstyled.
    pub fn style_for(&self, kind: TokenKind) -> Option<ContentStyle> {
        match kind {
            TokenKind::Plain => None,
            TokenKind::Keyword => Some(self.keyword),
            TokenKind::Type => Some(self.type_name),
            TokenKind::Constant => Some(self.constant),
            TokenKind::String => Some(self.string),
            TokenKind::Comment => Some(self.comment),
            TokenKind::Number => Some(self.number),
            TokenKind::Function => Some(self.function),
        }
    }
}
