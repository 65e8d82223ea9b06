//! File IO helpers used by the dispatcher.
//!
//! Opening consults `core-fs` for binary detection, line endings, encoding
//! and tab width; saving writes the buffer back in its original encoding with
//! its original line ending restored. Content that could only be decoded
//! lossily opens read-only. Failures come back as values for the caller to
//! report.

use std::path::Path;

use core_fs::{Encoding, FsError};
use core_text::{Buffer, BufferId};
use tracing::{debug, error};

use crate::Editor;

/// Result of attempting to open a file.
#[derive(Debug)]
pub enum OpenFileResult {
    Opened(BufferId),
    /// The path was already open; its buffer is now active.
    Reactivated(BufferId),
    /// No such file yet: an empty buffer that will be written to `path`.
    Created(BufferId),
    Binary(BufferId),
    Error(FsError),
}

impl OpenFileResult {
    pub fn id(&self) -> Option<BufferId> {
        match self {
            OpenFileResult::Opened(id)
            | OpenFileResult::Reactivated(id)
            | OpenFileResult::Created(id)
            | OpenFileResult::Binary(id) => Some(*id),
            OpenFileResult::Error(_) => None,
        }
    }
}

pub fn open_path(editor: &mut Editor, path: &Path) -> OpenFileResult {
    if let Some(id) = editor.state.buffers.find_by_path(path) {
        editor.state.buffers.activate(id);
        return OpenFileResult::Reactivated(id);
    }
    if !core_fs::file_exists(path) {
        let mut buffer = Buffer::from_content("", Some(path.to_path_buf()));
        editor.configure_buffer(&mut buffer);
        let id = editor.state.buffers.insert(buffer);
        debug!(target: "actions", path = %path.display(), "open_new_file");
        return OpenFileResult::Created(id);
    }
    match core_fs::load(path) {
        Err(err) => {
            error!(target: "actions", error = %err, "file_open_error");
            OpenFileResult::Error(err)
        }
        Ok(loaded) if loaded.binary => {
            let id = editor.state.buffers.open_binary_buffer(path.to_path_buf());
            editor.encodings.insert(id, loaded.encoding);
            OpenFileResult::Binary(id)
        }
        Ok(loaded) => {
            let mut buffer = Buffer::from_content(&loaded.content, Some(path.to_path_buf()));
            buffer.set_line_ending(loaded.line_ending);
            editor.configure_buffer(&mut buffer);
            if loaded.lossy {
                buffer.set_modifiable(false);
            }
            let id = editor.state.buffers.insert(buffer);
            editor.encodings.insert(id, loaded.encoding);
            debug!(
                target: "actions",
                path = %path.display(),
                lines = loaded.content.split('\n').count(),
                encoding = loaded.encoding.label(),
                lossy = loaded.lossy,
                "file_opened"
            );
            OpenFileResult::Opened(id)
        }
    }
}

/// Result of a write attempt.
#[derive(Debug)]
pub enum WriteFileResult {
    Success,
    NoFilename,
    ReadOnly,
    Error(FsError),
}

/// Write `buffer` in `encoding` to `target` or to its own path. Success
/// adopts `target` as the buffer's path, clears the modified flag and
/// re-snapshots the line count; failure leaves the buffer untouched.
pub fn write_buffer(
    buffer: &mut Buffer,
    target: Option<&Path>,
    encoding: Encoding,
) -> WriteFileResult {
    if !buffer.is_modifiable() {
        return WriteFileResult::ReadOnly;
    }
    let Some(path) = target.or(buffer.path()).map(Path::to_path_buf) else {
        return WriteFileResult::NoFilename;
    };
    match core_fs::write_encoded(&path, &buffer.serialize(), encoding) {
        Ok(()) => {
            buffer.set_path(Some(path));
            buffer.set_modified(false);
            buffer.snapshot_line_count();
            WriteFileResult::Success
        }
        Err(err) => {
            error!(target: "actions", error = %err, "file_write_error");
            WriteFileResult::Error(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::LineEnding;

    #[test]
    fn write_restores_crlf_and_marks_clean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut buffer = Buffer::from_content("a\nb\n", None);
        buffer.set_line_ending(LineEnding::Crlf);
        buffer.insert_rune(0, 1, '!');
        assert!(buffer.is_modified());
        let res = write_buffer(&mut buffer, Some(&path), Encoding::Utf8);
        assert!(matches!(res, WriteFileResult::Success));
        assert!(!buffer.is_modified());
        assert_eq!(buffer.path(), Some(path.as_path()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a!\r\nb\r\n");
    }

    #[test]
    fn write_without_path_is_reported() {
        let mut buffer = Buffer::from_content("x", None);
        buffer.set_modified(true);
        assert!(matches!(write_buffer(&mut buffer, None, Encoding::Utf8), WriteFileResult::NoFilename));
        assert!(buffer.is_modified());
    }

    #[test]
    fn binary_placeholder_is_never_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        let mut buffer = Buffer::binary(path.clone());
        assert!(matches!(write_buffer(&mut buffer, None, Encoding::Utf8), WriteFileResult::ReadOnly));
        assert!(!path.exists());
    }

    #[test]
    fn write_failure_keeps_buffer_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let mut buffer = Buffer::from_content("x", None);
        buffer.set_modified(true);
        let res = write_buffer(&mut buffer, Some(&blocker.join("child.txt")), Encoding::Utf8);
        assert!(matches!(res, WriteFileResult::Error(FsError::Write { .. })));
        assert!(buffer.is_modified());
        assert_eq!(buffer.path(), None);
    }

    #[test]
    fn failed_write_to_new_path_keeps_old_path() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("keep.txt");
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let mut buffer = Buffer::from_content("x", Some(original.clone()));
        buffer.set_modified(true);
        let res = write_buffer(&mut buffer, Some(&blocker.join("child.txt")), Encoding::Utf8);
        assert!(matches!(res, WriteFileResult::Error(_)));
        assert_eq!(buffer.path(), Some(original.as_path()));
    }

    #[test]
    fn latin1_buffer_is_written_back_as_latin1() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.txt");
        let mut buffer = Buffer::from_content("café\n", Some(path.clone()));
        let res = write_buffer(&mut buffer, None, Encoding::Latin1);
        assert!(matches!(res, WriteFileResult::Success));
        assert_eq!(std::fs::read(&path).unwrap(), b"caf\xE9\n");
    }

    #[test]
    fn unencodable_char_fails_without_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.txt");
        let mut buffer = Buffer::from_content("5 €", Some(path.clone()));
        buffer.set_modified(true);
        let res = write_buffer(&mut buffer, None, Encoding::Latin1);
        assert!(matches!(res, WriteFileResult::Error(FsError::Unencodable { ch: '€', .. })));
        assert!(buffer.is_modified());
        assert!(!path.exists());
    }
}
