/// Supported highlight languages. `Plain` passes text through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Plain,
    Go,
    Python,
    JavaScript,
    TypeScript,
    Rust,
}

/// Word lists and lexical markers for one language.
#[derive(Debug)]
pub struct LanguageRules {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub types: &'static [&'static str],
    pub constants: &'static [&'static str],
    pub line_comment: Option<&'static str>,
    pub string_delims: &'static [char],
}

impl LanguageRules {
    pub fn classify_word(&self, word: &str) -> Option<crate::TokenKind> {
        use crate::TokenKind;
        if self.keywords.contains(&word) {
            Some(TokenKind::Keyword)
        } else if self.types.contains(&word) {
            Some(TokenKind::Type)
        } else if self.constants.contains(&word) {
            Some(TokenKind::Constant)
        } else {
            None
        }
    }
}

const JS_KEYWORDS: &[&str] = &[
    "function", "const", "let", "var", "if", "else", "for", "while", "do", "return", "class",
    "extends", "import", "export", "from", "async", "await", "try", "catch", "finally", "throw",
    "switch", "case", "default", "break", "continue", "new", "this", "typeof", "instanceof",
    "of", "in", "yield", "delete",
];

const JS_CONSTANTS: &[&str] = &["true", "false", "null", "undefined", "NaN", "Infinity"];

static GO: LanguageRules = LanguageRules {
    name: "go",
    keywords: &[
        "package", "import", "func", "type", "struct", "interface", "var", "const", "if", "else",
        "for", "range", "return", "switch", "case", "default", "break", "continue", "go",
        "defer", "select", "chan", "map", "goto", "fallthrough",
    ],
    types: &[
        "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
        "uintptr", "string", "bool", "float32", "float64", "complex64", "complex128", "byte",
        "rune", "error", "any",
    ],
    constants: &["true", "false", "nil", "iota"],
    line_comment: Some("//"),
    string_delims: &['"', '`', '\''],
};

static PYTHON: LanguageRules = LanguageRules {
    name: "python",
    keywords: &[
        "def", "class", "if", "elif", "else", "for", "while", "return", "import", "from", "as",
        "try", "except", "finally", "with", "lambda", "yield", "pass", "break", "continue",
        "raise", "assert", "global", "nonlocal", "in", "is", "not", "and", "or", "del", "async",
        "await",
    ],
    types: &["int", "float", "str", "bool", "list", "dict", "set", "tuple", "bytes", "object"],
    constants: &["True", "False", "None"],
    line_comment: Some("#"),
    string_delims: &['"', '\''],
};

static JAVASCRIPT: LanguageRules = LanguageRules {
    name: "javascript",
    keywords: JS_KEYWORDS,
    types: &[],
    constants: JS_CONSTANTS,
    line_comment: Some("//"),
    string_delims: &['"', '\'', '`'],
};

static TYPESCRIPT: LanguageRules = LanguageRules {
    name: "typescript",
    keywords: &[
        "function", "const", "let", "var", "if", "else", "for", "while", "do", "return", "class",
        "extends", "import", "export", "from", "async", "await", "try", "catch", "finally", "throw",
        "switch", "case", "default", "break", "continue", "new", "this", "typeof", "instanceof",
        "of", "in", "yield", "delete", "interface", "type", "enum", "implements", "private",
        "public", "protected", "readonly", "namespace", "declare", "abstract", "as",
    ],
    types: &[
        "string", "number", "boolean", "any", "void", "never", "unknown", "object", "bigint",
        "symbol",
    ],
    constants: JS_CONSTANTS,
    line_comment: Some("//"),
    string_delims: &['"', '\'', '`'],
};

static RUST: LanguageRules = LanguageRules {
    name: "rust",
    keywords: &[
        "fn", "let", "mut", "pub", "struct", "enum", "impl", "trait", "use", "mod", "match", "if",
        "else", "for", "while", "loop", "return", "break", "continue", "const", "static", "where",
        "as", "in", "ref", "self", "Self", "crate", "super", "move", "async", "await", "dyn",
        "type", "unsafe", "extern",
    ],
    types: &[
        "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
        "f32", "f64", "bool", "char", "str", "String", "Vec", "Option", "Result", "Box",
    ],
    constants: &["true", "false", "None", "Some", "Ok", "Err"],
    line_comment: Some("//"),
    string_delims: &['"'],
};

impl Language {
    /// Language for a lowercased extension with leading dot (`".rs"`).
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            ".go" => Language::Go,
            ".py" => Language::Python,
            ".js" | ".jsx" | ".mjs" => Language::JavaScript,
            ".ts" | ".tsx" => Language::TypeScript,
            ".rs" => Language::Rust,
            _ => Language::Plain,
        }
    }

    /// Rule set, or `None` for plain text.
    pub fn rules(self) -> Option<&'static LanguageRules> {
        match self {
            Language::Plain => None,
            Language::Go => Some(&GO),
            Language::Python => Some(&PYTHON),
            Language::JavaScript => Some(&JAVASCRIPT),
            Language::TypeScript => Some(&TYPESCRIPT),
            Language::Rust => Some(&RUST),
        }
    }

    /// Short tag stored on buffers and shown in the status line.
    pub fn name(self) -> &'static str {
        self.rules().map(|r| r.name).unwrap_or("text")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenKind;

    #[test]
    fn extension_mapping() {
        assert_eq!(Language::from_extension(".jsx"), Language::JavaScript);
        assert_eq!(Language::from_extension(".tsx"), Language::TypeScript);
        assert_eq!(Language::from_extension(".md"), Language::Plain);
        assert_eq!(Language::Plain.name(), "text");
        assert_eq!(Language::Go.name(), "go");
    }

    #[test]
    fn keyword_wins_over_type_for_overlapping_words() {
        let ts = Language::TypeScript.rules().unwrap();
        assert_eq!(ts.classify_word("type"), Some(TokenKind::Keyword));
        assert_eq!(ts.classify_word("number"), Some(TokenKind::Type));
        assert_eq!(ts.classify_word("undefined"), Some(TokenKind::Constant));
        assert_eq!(ts.classify_word("foo"), None);
    }
}
