//! File-system collaborators of the editor: file I/O, content sniffing
//! (binary / encoding / line endings), the tab-width table, and a debounced
//! directory watcher.
//!
//! Every fallible call returns [`FsError`], which carries the path involved.
//! Nothing in this crate panics on I/O failure.

pub mod detect;
pub mod error;
pub mod io;
pub mod text;
pub mod watch;

pub use detect::{
    BINARY_SAMPLE_LEN, Decoded, Encoding, decode, detect_encoding, encode, is_binary, is_binary_file,
};
pub use error::{FsError, Result};
pub use io::{LoadedFile, file_exists, load, read_file, rename_file, write_encoded, write_file};
pub use text::{lookup_tab_width, normalize_line_endings, tab_width_for_path};
pub use watch::{Debouncer, DirWatcher};
