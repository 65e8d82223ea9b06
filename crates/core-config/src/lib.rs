//! Configuration loading and parsing.
//!
//! `ferrite.toml` is looked up in the working directory first, then under the
//! platform config dir (`$XDG_CONFIG_HOME/ferrite/ferrite.toml`, AppData on
//! Windows). The binary may pass an explicit path instead. A missing file
//! yields defaults. A malformed file also yields defaults, with a warning on
//! the `config` target, so a typo never prevents the editor from starting.
//!
//! Every section and key is optional; unknown keys are ignored.
//!
//! ```toml
//! [editor]
//! tab_width = 4
//! line_numbers = true
//! syntax_highlight = true
//! auto_pair = true
//! auto_close_tags = true
//! history_depth = 100
//!
//! [tab_width]
//! go = 8
//! ".md" = 2
//!
//! [search]
//! case_sensitive = false
//! regex = false
//!
//! [watch]
//! enabled = true
//! debounce_ms = 300
//! channel_capacity = 32
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{debug, info, warn};

pub const CONFIG_FILE_NAME: &str = "ferrite.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    pub tab_width: usize,
    pub line_numbers: bool,
    pub syntax_highlight: bool,
    pub auto_pair: bool,
    pub auto_close_tags: bool,
    pub history_depth: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            line_numbers: true,
            syntax_highlight: true,
            auto_pair: true,
            auto_close_tags: true,
            history_depth: 100,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    pub case_sensitive: bool,
    pub regex: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WatchConfig {
    pub enabled: bool,
    pub debounce_ms: u64,
    pub channel_capacity: usize,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 300,
            channel_capacity: 32,
        }
    }
}

impl WatchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigFile {
    pub editor: EditorConfig,
    /// Extension → tab width, layered over the built-in table.
    pub tab_width: HashMap<String, usize>,
    pub search: SearchConfig,
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub path: Option<PathBuf>, // file the values came from, if any
    pub raw: Option<String>,
    pub file: ConfigFile,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("ferrite").join(CONFIG_FILE_NAME);
    }
    local
}

/// Parse config text. Errors are returned, not swallowed; `load_from` decides
/// what to do with them.
pub fn parse(content: &str) -> Result<ConfigFile> {
    let mut file: ConfigFile = toml::from_str(content)?;
    file.editor.tab_width = file.editor.tab_width.max(1);
    file.editor.history_depth = file.editor.history_depth.max(1);
    file.watch.channel_capacity = file.watch.channel_capacity.max(1);
    Ok(file)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", path = %path.display(), "config_missing");
        return Ok(Config::default());
    };
    match parse(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                path: Some(path),
                raw: Some(content),
                file,
            })
        }
        Err(err) => {
            warn!(target: "config", path = %path.display(), error = %err, "config_parse_error");
            Ok(Config::default())
        }
    }
}

impl Config {
    pub fn editor(&self) -> &EditorConfig {
        &self.file.editor
    }

    pub fn search(&self) -> &SearchConfig {
        &self.file.search
    }

    pub fn watch(&self) -> &WatchConfig {
        &self.file.watch
    }

    pub fn tab_width_overrides(&self) -> &HashMap<String, usize> {
        &self.file.tab_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl Write for LockedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn write_tmp(content: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), content).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert!(cfg.path.is_none());
        assert_eq!(cfg.file, ConfigFile::default());
        assert_eq!(cfg.editor().tab_width, 4);
        assert_eq!(cfg.editor().history_depth, 100);
        assert!(cfg.editor().auto_pair);
        assert!(!cfg.search().case_sensitive);
        assert!(cfg.watch().enabled);
        assert_eq!(cfg.watch().debounce(), Duration::from_millis(300));
        assert_eq!(cfg.watch().channel_capacity, 32);
    }

    #[test]
    fn parses_all_sections() {
        let tmp = write_tmp(
            "[editor]\ntab_width = 2\nline_numbers = false\nauto_close_tags = false\n\
             [tab_width]\ngo = 4\n\".md\" = 3\n\
             [search]\ncase_sensitive = true\nregex = true\n\
             [watch]\nenabled = false\ndebounce_ms = 50\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.path.as_deref(), Some(tmp.path()));
        assert_eq!(cfg.editor().tab_width, 2);
        assert!(!cfg.editor().line_numbers);
        assert!(cfg.editor().syntax_highlight, "unset keys keep defaults");
        assert!(!cfg.editor().auto_close_tags);
        assert_eq!(cfg.tab_width_overrides().get("go"), Some(&4));
        assert_eq!(cfg.tab_width_overrides().get(".md"), Some(&3));
        assert!(cfg.search().case_sensitive && cfg.search().regex);
        assert!(!cfg.watch().enabled);
        assert_eq!(cfg.watch().debounce_ms, 50);
        assert_eq!(cfg.watch().channel_capacity, 32);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let file = parse("[editor]\ntab_width = 8\nfancy = 1\n[future]\nx = true\n").unwrap();
        assert_eq!(file.editor.tab_width, 8);
    }

    #[test]
    fn zero_sizes_are_raised_to_one() {
        let file = parse("[editor]\ntab_width = 0\nhistory_depth = 0\n[watch]\nchannel_capacity = 0\n")
            .unwrap();
        assert_eq!(file.editor.tab_width, 1);
        assert_eq!(file.editor.history_depth, 1);
        assert_eq!(file.watch.channel_capacity, 1);
    }

    #[test]
    fn parse_error_falls_back_to_defaults_and_warns() {
        let tmp = write_tmp("[editor\ntab_width = ");
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf())).unwrap());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_parse_error"));
        assert_eq!(cfg.file, ConfigFile::default());
        assert!(cfg.raw.is_none());
    }

    #[test]
    fn wrong_value_type_is_a_parse_error() {
        assert!(parse("[editor]\ntab_width = \"wide\"\n").is_err());
    }
}
