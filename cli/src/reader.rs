//! Session log reading.

use std::fs::File;
use std::path::Path;

use encoding_rs::UTF_8;
use kolstat_core::{Error, Result};
use memchr::memchr_iter;
use memmap2::Mmap;

/// Read a transcript into lines.
///
/// Blank lines are kept: they end encounters. Line endings may be `\n` or
/// `\r\n`; invalid UTF-8 is replaced rather than rejected.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let io_err = |source: std::io::Error| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    if file.metadata().map_err(io_err)?.len() == 0 {
        return Ok(Vec::new());
    }
    // SAFETY: the map is read-only and dropped before returning.
    let mmap = unsafe { Mmap::map(&file).map_err(io_err)? };
    Ok(split_lines(path, mmap.as_ref()))
}

/// Split raw bytes on `\n` and decode each line.
pub fn split_lines(path: &Path, bytes: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut malformed = 0usize;
    let mut decode = |raw: &[u8]| {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let (line, _, had_errors) = UTF_8.decode(raw);
        if had_errors {
            malformed += 1;
        }
        lines.push(line.into_owned());
    };

    let mut start = 0;
    for end in memchr_iter(b'\n', bytes) {
        decode(&bytes[start..end]);
        start = end + 1;
    }
    if start < bytes.len() {
        decode(&bytes[start..]);
    }

    if malformed > 0 {
        tracing::warn!(path = %path.display(), lines = malformed, "Replaced invalid UTF-8");
    }
    tracing::debug!(path = %path.display(), lines = lines.len(), "Read transcript");
    lines
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_split_keeps_blank_lines_and_strips_cr() {
        let lines = split_lines(Path::new("x"), b"[1] Zone\r\nEncounter: Goblin\r\n\r\nlast");
        assert_eq!(lines, vec!["[1] Zone", "Encounter: Goblin", "", "last"]);
    }

    #[test]
    fn test_split_replaces_invalid_utf8() {
        let lines = split_lines(Path::new("x"), b"caf\xe9\n");
        assert_eq!(lines, vec!["caf\u{FFFD}"]);
    }

    #[test]
    fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("[1] Zone\nEncounter: caf\u{e9} goblin\n".as_bytes())
            .unwrap();
        let lines = read_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["[1] Zone", "Encounter: café goblin"]);
    }

    #[test]
    fn test_read_empty_and_missing() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(read_lines(file.path()).unwrap().is_empty());

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        assert!(matches!(read_lines(&missing), Err(Error::Io { .. })));
    }
}
