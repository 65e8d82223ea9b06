use std::collections::HashMap;
use std::path::Path;

use core_text::{DEFAULT_TAB_WIDTH, LineEnding};

/// Built-in display tab widths by lowercased extension.
const TAB_WIDTHS: &[(&str, usize)] = &[
    (".go", 8),
    (".c", 8),
    (".h", 8),
    (".cpp", 4),
    (".hpp", 4),
    (".java", 4),
    (".js", 2),
    (".ts", 2),
    (".jsx", 2),
    (".tsx", 2),
    (".py", 4),
    (".rs", 4),
    (".rb", 2),
    (".php", 4),
    (".html", 2),
    (".css", 2),
    (".scss", 2),
    (".json", 2),
    (".yaml", 2),
    (".yml", 2),
    (".xml", 2),
    (".swift", 4),
    (".kt", 4),
];

/// `\r\n` → `\n`, reporting which ending the text used. Mixed files count as
/// CRLF if any CRLF is present.
pub fn normalize_line_endings(text: &str) -> (String, LineEnding) {
    if text.contains("\r\n") {
        (text.replace("\r\n", "\n"), LineEnding::Crlf)
    } else {
        (text.to_owned(), LineEnding::Lf)
    }
}

/// Tab width for `path`: user overrides (keys with or without the leading
/// dot), then the built-in table. `None` for unknown or missing extensions.
pub fn lookup_tab_width(path: &Path, overrides: &HashMap<String, usize>) -> Option<usize> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let dotted = format!(".{ext}");
    if let Some(w) = overrides.get(&dotted).or_else(|| overrides.get(&ext)) {
        return Some((*w).max(1));
    }
    TAB_WIDTHS
        .iter()
        .find(|(e, _)| *e == dotted)
        .map(|(_, w)| *w)
}

/// [`lookup_tab_width`] falling back to the default width.
pub fn tab_width_for_path(path: &Path, overrides: &HashMap<String, usize>) -> usize {
    lookup_tab_width(path, overrides).unwrap_or(DEFAULT_TAB_WIDTH)
}
