//! Content sniffing and the byte <-> text mapping for each detected encoding.
//!
//! Latin-1 maps bytes to the first 256 code points, so it round-trips
//! exactly. A UTF-8 byte-order mark is stripped on decode and restored on
//! encode. Anything else is decoded lossily and flagged so callers can keep
//! the buffer read-only.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{FsError, Result};

/// Bytes inspected by the binary heuristic.
pub const BINARY_SAMPLE_LEN: usize = 8000;

/// NUL or a control byte that is not common whitespace (`\t \n \v \f \r`).
fn is_binary_byte(b: u8) -> bool {
    b < 0x09 || (0x0E..=0x1F).contains(&b)
}

/// True when the first `BINARY_SAMPLE_LEN` bytes contain a binary byte.
pub fn is_binary(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .take(BINARY_SAMPLE_LEN)
        .copied()
        .any(is_binary_byte)
}

/// Sample only the head of the file.
pub fn is_binary_file(path: &Path) -> Result<bool> {
    let read_err = |source| FsError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;
    let mut sample = Vec::with_capacity(BINARY_SAMPLE_LEN);
    file.take(BINARY_SAMPLE_LEN as u64)
        .read_to_end(&mut sample)
        .map_err(read_err)?;
    Ok(is_binary(&sample))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    Latin1,
    Unknown,
}

impl Encoding {
    pub fn label(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf8Bom => "UTF-8 BOM",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf16Be => "UTF-16BE",
            Encoding::Latin1 => "ISO-8859-1",
            Encoding::Unknown => "unknown",
        }
    }
}

/// Byte-order mark first, then UTF-8 validity, then single-byte
/// feasibility (no byte in the C1 range `0x80..=0x9F`).
pub fn detect_encoding(bytes: &[u8]) -> Encoding {
    if bytes.starts_with(UTF8_BOM) {
        return Encoding::Utf8Bom;
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Encoding::Utf16Le;
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Encoding::Utf16Be;
    }
    if std::str::from_utf8(bytes).is_ok() {
        return Encoding::Utf8;
    }
    if !bytes.iter().any(|b| (0x80..=0x9F).contains(b)) {
        return Encoding::Latin1;
    }
    Encoding::Unknown
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Text decoded from raw file bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Re-encoding `text` would not reproduce the original bytes.
    pub lossy: bool,
}

pub fn decode(bytes: &[u8], encoding: Encoding) -> Decoded {
    match encoding {
        Encoding::Utf8 => match std::str::from_utf8(bytes) {
            Ok(text) => Decoded {
                text: text.to_owned(),
                lossy: false,
            },
            Err(_) => lossy_utf8(bytes),
        },
        Encoding::Utf8Bom => {
            let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            match std::str::from_utf8(body) {
                Ok(text) => Decoded {
                    text: text.to_owned(),
                    lossy: false,
                },
                Err(_) => lossy_utf8(bytes),
            }
        }
        Encoding::Latin1 => Decoded {
            text: bytes.iter().map(|&b| char::from(b)).collect(),
            lossy: false,
        },
        Encoding::Utf16Le | Encoding::Utf16Be | Encoding::Unknown => lossy_utf8(bytes),
    }
}

fn lossy_utf8(bytes: &[u8]) -> Decoded {
    Decoded {
        text: String::from_utf8_lossy(bytes).into_owned(),
        lossy: true,
    }
}

/// Bytes for `text` in `encoding`. For Latin-1, returns the first char that
/// has no single-byte form as the error. Encodings that only decode lossily
/// are written as UTF-8.
pub fn encode(text: &str, encoding: Encoding) -> std::result::Result<Vec<u8>, char> {
    match encoding {
        Encoding::Latin1 => text
            .chars()
            .map(|c| u8::try_from(u32::from(c)).map_err(|_| c))
            .collect(),
        Encoding::Utf8Bom => {
            let mut out = Vec::with_capacity(UTF8_BOM.len() + text.len());
            out.extend_from_slice(UTF8_BOM);
            out.extend_from_slice(text.as_bytes());
            Ok(out)
        }
        _ => Ok(text.as_bytes().to_vec()),
    }
}
