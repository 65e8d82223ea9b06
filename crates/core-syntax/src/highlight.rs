//! Generic tokenizer + highlighter driven by `LanguageRules`.

use tracing::trace;

use crate::{Language, LanguageRules, SyntaxTheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plain,
    Keyword,
    Type,
    Constant,
    String,
    Comment,
    Number,
    Function,
}

/// Half-open char range `[start, end)` of one classified run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn starts_with_at(chars: &[char], at: usize, prefix: &str) -> bool {
    let mut i = at;
    for p in prefix.chars() {
        if chars.get(i) != Some(&p) {
            return false;
        }
        i += 1;
    }
    true
}

/// Split `line` into classified tokens covering it completely. Adjacent
/// plain chars are merged into one token.
pub fn tokenize(line: &str, rules: &LanguageRules) -> Vec<Token> {
    let chars: Vec<char> = line.chars().collect();
    let n = chars.len();
    let mut tokens: Vec<Token> = Vec::new();
    let mut push = |kind: TokenKind, start: usize, end: usize| {
        if let Some(last) = tokens.last_mut()
            && kind == TokenKind::Plain
            && last.kind == TokenKind::Plain
            && last.end == start
        {
            last.end = end;
            return;
        }
        tokens.push(Token { kind, start, end });
    };

    let mut i = 0;
    while i < n {
        let c = chars[i];
        if let Some(prefix) = rules.line_comment
            && starts_with_at(&chars, i, prefix)
        {
            push(TokenKind::Comment, i, n);
            break;
        }
        if rules.string_delims.contains(&c) {
            let mut j = i + 1;
            while j < n && chars[j] != c {
                j += if chars[j] == '\\' { 2 } else { 1 };
            }
            let end = (j + 1).min(n);
            push(TokenKind::String, i, end);
            i = end;
            continue;
        }
        if c.is_ascii_digit() {
            let mut j = i + 1;
            while j < n && (is_ident_char(chars[j]) || chars[j] == '.') {
                j += 1;
            }
            push(TokenKind::Number, i, j);
            i = j;
            continue;
        }
        if is_ident_start(c) {
            let mut j = i + 1;
            while j < n && is_ident_char(chars[j]) {
                j += 1;
            }
            let word: String = chars[i..j].iter().collect();
            let kind = rules.classify_word(&word).unwrap_or_else(|| {
                let next = chars[j..].iter().find(|c| !c.is_whitespace());
                if next == Some(&'(') {
                    TokenKind::Function
                } else {
                    TokenKind::Plain
                }
            });
            push(kind, i, j);
            i = j;
            continue;
        }
        push(TokenKind::Plain, i, i + 1);
        i += 1;
    }
    tokens
}

/// Applies one language's rules with an explicit theme.
#[derive(Debug, Clone)]
pub struct Highlighter {
    language: Language,
    theme: SyntaxTheme,
    enabled: bool,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(SyntaxTheme::default())
    }
}

impl Highlighter {
    pub fn new(theme: SyntaxTheme) -> Self {
        Self {
            language: Language::Plain,
            theme,
            enabled: true,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            trace!(target: "syntax", language = language.name(), "set_language");
        }
        self.language = language;
    }

    /// Select the language for a lowercased extension (`".go"`).
    pub fn for_extension(&mut self, ext: &str) -> &mut Self {
        self.set_language(Language::from_extension(ext));
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn theme(&self) -> &SyntaxTheme {
        &self.theme
    }

    /// Styled copy of `line`. Plain text, or a disabled highlighter, returns
    /// the input unchanged.
    pub fn highlight(&self, line: &str) -> String {
        let Some(rules) = self.language.rules().filter(|_| self.enabled) else {
            return line.to_owned();
        };
        let chars: Vec<char> = line.chars().collect();
        let mut out = String::with_capacity(line.len() * 2);
        for token in tokenize(line, rules) {
            let text: String = chars[token.start..token.end].iter().collect();
            match self.theme.style_for(token.kind) {
                Some(style) => out.push_str(&style.apply(text).to_string()),
                None => out.push_str(&text),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(line: &str, lang: Language) -> Vec<(TokenKind, String)> {
        let chars: Vec<char> = line.chars().collect();
        tokenize(line, lang.rules().unwrap())
            .into_iter()
            .map(|t| (t.kind, chars[t.start..t.end].iter().collect()))
            .collect()
    }

    #[test]
    fn go_function_header() {
        use TokenKind::*;
        assert_eq!(
            kinds("func main() {", Language::Go),
            vec![
                (Keyword, "func".into()),
                (Plain, " ".into()),
                (Function, "main".into()),
                (Plain, "() {".into()),
            ]
        );
    }

    #[test]
    fn keywords_inside_strings_and_comments_are_not_split_out() {
        use TokenKind::*;
        assert_eq!(
            kinds("x = \"if else\" # return", Language::Python),
            vec![
                (Plain, "x = ".into()),
                (String, "\"if else\"".into()),
                (Plain, " ".into()),
                (Comment, "# return".into()),
            ]
        );
    }

    #[test]
    fn escaped_quote_stays_in_string() {
        let toks = kinds(r#"s := "a\"b" + c"#, Language::Go);
        assert!(toks.contains(&(TokenKind::String, r#""a\"b""#.to_string())));
    }

    #[test]
    fn unterminated_string_runs_to_line_end() {
        let toks = kinds("let s = \"open", Language::Rust);
        assert_eq!(toks.last().unwrap(), &(TokenKind::String, "\"open".to_string()));
    }

    #[test]
    fn words_containing_keywords_are_plain() {
        let toks = kinds("format iffy", Language::Go);
        assert!(toks.iter().all(|(k, _)| *k == TokenKind::Plain));
    }

    #[test]
    fn numbers_types_constants() {
        use TokenKind::*;
        assert_eq!(
            kinds("let x: u8 = 0x1f; None", Language::Rust)
                .into_iter()
                .filter(|(k, _)| *k != Plain)
                .collect::<Vec<_>>(),
            vec![
                (Keyword, "let".into()),
                (Type, "u8".into()),
                (Number, "0x1f".into()),
                (Constant, "None".into()),
            ]
        );
    }

    #[test]
    fn tokens_cover_line_without_gaps() {
        let line = "if (a < 10) { return \"x\"; } // done";
        let toks = tokenize(line, Language::JavaScript.rules().unwrap());
        let mut at = 0;
        for t in &toks {
            assert_eq!(t.start, at);
            assert!(t.end > t.start);
            at = t.end;
        }
        assert_eq!(at, line.chars().count());
    }

    #[test]
    fn highlight_wraps_keyword_in_foreground_color() {
        let mut h = Highlighter::new(SyntaxTheme::default());
        h.for_extension(".go");
        let out = h.highlight("func f");
        assert!(out.starts_with("\u{1b}[38;5;205mfunc\u{1b}[39m"), "{out:?}");
    }

    #[test]
    fn plain_or_disabled_returns_input() {
        let mut h = Highlighter::new(SyntaxTheme::default());
        assert_eq!(h.highlight("func f"), "func f");
        h.for_extension(".go");
        h.set_enabled(false);
        assert_eq!(h.highlight("func f"), "func f");
    }
}
