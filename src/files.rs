//! File collaborators: loading decoded text, writing it back, and expanding
//! file patterns.
//!
//! Every input is read before anything is written. Writes are not atomic
//! across files: if one write fails, files already written stay rewritten and
//! the rest stay original.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Byte-order mark written at the start of every output file.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// A file's decoded text, owned by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBuffer {
    pub path: PathBuf,
    pub content: String,
}

impl FileBuffer {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Reads and decodes a file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        let content = decode(&bytes).ok_or_else(|| Error::Decode {
            path: path.to_path_buf(),
        })?;
        Ok(Self::new(path, content))
    }

    /// Writes the buffer as UTF-8 with a byte-order mark, replacing the file.
    pub fn write(&self) -> Result<()> {
        std::fs::write(&self.path, encode(&self.content)).map_err(|e| Error::io(&self.path, e))
    }
}

/// Decodes UTF-8 (with or without BOM) or BOM-marked UTF-16.
pub fn decode(bytes: &[u8]) -> Option<String> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return String::from_utf8(rest.to_vec()).ok();
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        return decode_utf16(rest, u16::from_be_bytes);
    }
    String::from_utf8(bytes.to_vec()).ok()
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

/// Encodes text as UTF-8 with a leading BOM.
pub fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(UTF8_BOM.len() + text.len());
    out.extend_from_slice(UTF8_BOM);
    out.extend_from_slice(text.as_bytes());
    out
}

fn contains_glob_chars(s: &str) -> bool {
    s.contains(['*', '?', '[', ']'])
}

/// Expands file patterns into a list of files.
///
/// Patterns without glob characters are taken as literal paths. Directories
/// matched by a glob are skipped. Each file appears once, in first-seen order.
pub fn expand_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if !contains_glob_chars(pattern) {
            push_unique(&mut files, PathBuf::from(pattern));
            continue;
        }

        let entries = glob::glob(pattern).map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        for path in entries.filter_map(|entry| entry.ok()).filter(|p| p.is_file()) {
            push_unique(&mut files, path);
        }
    }

    if files.is_empty() {
        return Err(Error::NoInputFiles);
    }
    Ok(files)
}

fn push_unique(files: &mut Vec<PathBuf>, path: PathBuf) {
    if !files.contains(&path) {
        files.push(path);
    }
}

/// Reads every path; fails on the first unreadable file.
pub fn read_all(paths: &[PathBuf]) -> Result<Vec<FileBuffer>> {
    paths.iter().map(FileBuffer::read).collect()
}

/// Writes every buffer, stopping at the first failure.
pub fn write_all(files: &[FileBuffer]) -> Result<()> {
    files.iter().try_for_each(FileBuffer::write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_decode_variants() {
        assert_eq!(decode(b"plain").as_deref(), Some("plain"));
        assert_eq!(decode(b"\xEF\xBB\xBFbom").as_deref(), Some("bom"));
        assert_eq!(decode(b"\xFF\xFEh\x00i\x00").as_deref(), Some("hi"));
        assert_eq!(decode(b"\xFE\xFF\x00h\x00i").as_deref(), Some("hi"));
        assert_eq!(decode(b"\xFF\xFEh").as_deref(), None);
        assert_eq!(decode(b"bad \xC3\x28").as_deref(), None);
    }

    #[test]
    fn test_encode_prepends_bom() {
        assert_eq!(encode("ok"), b"\xEF\xBB\xBFok".to_vec());
        assert_eq!(encode(""), UTF8_BOM.to_vec());
    }

    #[test]
    fn test_read_write_roundtrip_adds_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.js");
        std::fs::write(&path, "var x_ = 1;").unwrap();

        let mut buffer = FileBuffer::read(&path).unwrap();
        assert_eq!(buffer.content, "var x_ = 1;");
        buffer.content = "var a = 1;".to_string();
        buffer.write().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"\xEF\xBB\xBFvar a = 1;".to_vec());
        assert_eq!(FileBuffer::read(&path).unwrap().content, "var a = 1;");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = FileBuffer::read(dir.path().join("missing.js")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_read_undecodable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bin.dat");
        std::fs::write(&path, [0xC3, 0x28]).unwrap();
        assert!(matches!(FileBuffer::read(&path), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_expand_globs_and_literals() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("one.js"), "").unwrap();
        std::fs::write(dir.path().join("two.js"), "").unwrap();
        std::fs::write(dir.path().join("skip.css"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub.js")).unwrap();

        let glob = format!("{}/*.js", dir.path().display());
        let literal = dir.path().join("one.js").display().to_string();
        let files = expand_patterns(&[literal, glob]).unwrap();

        assert_eq!(
            files,
            vec![dir.path().join("one.js"), dir.path().join("two.js")]
        );
    }

    #[test]
    fn test_expand_nothing_matched() {
        let dir = tempdir().unwrap();
        let glob = format!("{}/*.js", dir.path().display());
        assert!(matches!(expand_patterns(&[glob]), Err(Error::NoInputFiles)));
    }

    #[test]
    fn test_expand_bad_pattern() {
        assert!(matches!(
            expand_patterns(&["[*.js"]),
            Err(Error::Pattern { .. })
        ));
    }
}
