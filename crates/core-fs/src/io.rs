use std::fs;
use std::path::{Path, PathBuf};

use core_text::LineEnding;
use tracing::debug;

use crate::detect::{Encoding, decode, detect_encoding, encode, is_binary};
use crate::text::normalize_line_endings;
use crate::{FsError, Result};

/// A file read from disk and sniffed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub path: PathBuf,
    /// Content with `\r\n` normalized to `\n`. Empty for binary files.
    pub content: String,
    pub line_ending: LineEnding,
    pub encoding: Encoding,
    pub binary: bool,
    /// The bytes could not be decoded exactly; saving would alter them.
    pub lossy: bool,
}

/// Read and sniff `path` in one pass.
pub fn load(path: &Path) -> Result<LoadedFile> {
    let bytes = fs::read(path).map_err(|source| FsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let encoding = detect_encoding(&bytes);
    if is_binary(&bytes) {
        debug!(target: "fs", path = %path.display(), len = bytes.len(), "load_binary");
        return Ok(LoadedFile {
            path: path.to_path_buf(),
            content: String::new(),
            line_ending: LineEnding::Lf,
            encoding,
            binary: true,
            lossy: false,
        });
    }
    let decoded = decode(&bytes, encoding);
    let (content, line_ending) = normalize_line_endings(&decoded.text);
    debug!(target: "fs", path = %path.display(), len = bytes.len(), encoding = encoding.label(), "load");
    Ok(LoadedFile {
        path: path.to_path_buf(),
        content,
        line_ending,
        encoding,
        binary: false,
        lossy: decoded.lossy,
    })
}

/// Whole file as (lossy) UTF-8 text.
pub fn read_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| FsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write `content` as UTF-8, creating missing parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    write_bytes(path, content.as_bytes())
}

/// Write `content` in `encoding`, creating missing parent directories.
pub fn write_encoded(path: &Path, content: &str, encoding: Encoding) -> Result<()> {
    let bytes = encode(content, encoding).map_err(|ch| FsError::Unencodable {
        path: path.to_path_buf(),
        encoding: encoding.label(),
        ch,
    })?;
    write_bytes(path, &bytes)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_err = |source| FsError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    fs::write(path, bytes).map_err(write_err)?;
    debug!(target: "fs", path = %path.display(), bytes = bytes.len(), "write_file");
    Ok(())
}

pub fn rename_file(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|source| FsError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}
