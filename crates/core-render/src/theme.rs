use crossterm::style::{Attribute, Attributes, Color, ContentStyle};

/// UI colors for everything that is not syntax. Passed to the renderer
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub gutter: ContentStyle,
    pub gutter_active: ContentStyle,
    pub filler: ContentStyle,
    pub cursor_normal: ContentStyle,
    pub cursor_insert: ContentStyle,
    pub bracket_match: ContentStyle,
    pub status: ContentStyle,
    pub message: ContentStyle,
    pub notice: ContentStyle,
}

fn style(fg: Option<Color>, bg: Option<Color>, attrs: &[Attribute]) -> ContentStyle {
    let mut attributes = Attributes::default();
    for a in attrs {
        attributes.set(*a);
    }
    ContentStyle {
        foreground_color: fg,
        background_color: bg,
        attributes,
        ..ContentStyle::default()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            gutter: style(Some(Color::AnsiValue(240)), None, &[]),
            gutter_active: style(Some(Color::AnsiValue(220)), None, &[Attribute::Bold]),
            filler: style(Some(Color::AnsiValue(60)), None, &[]),
            cursor_normal: style(None, None, &[Attribute::Reverse]),
            cursor_insert: style(Some(Color::Black), Some(Color::AnsiValue(45)), &[]),
            bracket_match: style(None, Some(Color::AnsiValue(238)), &[Attribute::Bold]),
            status: style(Some(Color::AnsiValue(230)), Some(Color::AnsiValue(240)), &[]),
            message: style(Some(Color::AnsiValue(250)), None, &[]),
            notice: style(Some(Color::AnsiValue(244)), None, &[Attribute::Italic]),
        }
    }
}
