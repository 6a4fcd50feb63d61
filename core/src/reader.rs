//! Locating the input log and reading it into lines.

use std::borrow::Cow;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use encoding_rs::WINDOWS_1252;
use memmap2::Mmap;
use thiserror::Error;

/// Extensions tried, in order, when the name itself is not a file.
const FALLBACK_EXTENSIONS: [&str; 2] = ["txt", "log"];

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("input log not found (tried {tried:?})")]
    InputNotFound { tried: Vec<PathBuf> },

    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Find `name` under `data_dir`, trying `name`, then `name.txt`, then `name.log`.
pub fn resolve_input_path(data_dir: &Path, name: &str) -> Result<PathBuf, ReadError> {
    let exact = data_dir.join(name);
    let mut tried = vec![exact.clone()];
    if exact.is_file() {
        return Ok(exact);
    }

    for ext in FALLBACK_EXTENSIONS {
        let candidate = data_dir.join(format!("{name}.{ext}"));
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "Resolved input log");
            return Ok(candidate);
        }
        tried.push(candidate);
    }

    Err(ReadError::InputNotFound { tried })
}

/// Decoded file contents and whether the fallback encoding was needed.
///
/// Windows-1252 maps every byte value, so the fallback cannot fail. Bytes
/// 0x80-0x9F become its printable characters (`0x80` is `€`), not C1 controls.
pub fn decode_log(bytes: &[u8]) -> (Cow<'_, str>, bool) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), false),
        Err(_) => (WINDOWS_1252.decode_without_bom_handling(bytes).0, true),
    }
}

/// Read a whole log into lines. Tries UTF-8 first and falls back to
/// Windows-1252 for the entire file.
pub fn read_lines(path: &Path) -> Result<Vec<String>, ReadError> {
    let io_err = |source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    if fs::metadata(path).map_err(io_err)?.len() == 0 {
        return Ok(Vec::new());
    }
    let mmap = unsafe { Mmap::map(&file).map_err(io_err)? };

    let (text, used_fallback) = decode_log(&mmap);
    if used_fallback {
        tracing::warn!(path = %path.display(), "Log is not valid UTF-8, decoded as Windows-1252");
    }

    Ok(text.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_exact_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Quake 1"), "").unwrap();
        fs::write(dir.path().join("Quake 1.txt"), "").unwrap();

        let path = resolve_input_path(dir.path(), "Quake 1").unwrap();
        assert_eq!(path, dir.path().join("Quake 1"));
    }

    #[test]
    fn test_resolve_falls_back_to_txt_then_log() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("games.log"), "").unwrap();
        assert_eq!(
            resolve_input_path(dir.path(), "games").unwrap(),
            dir.path().join("games.log")
        );

        fs::write(dir.path().join("games.txt"), "").unwrap();
        assert_eq!(
            resolve_input_path(dir.path(), "games").unwrap(),
            dir.path().join("games.txt")
        );
    }

    #[test]
    fn test_resolve_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("games")).unwrap();
        let err = resolve_input_path(dir.path(), "games").unwrap_err();
        let ReadError::InputNotFound { tried } = err else {
            panic!("expected InputNotFound, got {err:?}");
        };
        assert_eq!(
            tried,
            vec![
                dir.path().join("games"),
                dir.path().join("games.txt"),
                dir.path().join("games.log"),
            ]
        );
    }

    #[test]
    fn test_reads_utf8_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "  0:00 InitGame: \\mapname\\q3dm17\r\n  0:01 Item: 2 Café\n\n").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(
            lines,
            vec!["  0:00 InitGame: \\mapname\\q3dm17", "  0:01 Item: 2 Café", ""]
        );
    }

    #[test]
    fn test_latin1_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        // "Jogador Ñ" with Ñ encoded as a single Latin-1 byte
        fs::write(&path, b"ClientUserinfoChanged: 2 n\\Jogador \xD1\\t\\0\n").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["ClientUserinfoChanged: 2 n\\Jogador Ñ\\t\\0"]);
    }

    #[test]
    fn test_empty_file_has_no_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.log");
        fs::write(&path, "").unwrap();
        assert!(read_lines(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_lines(&dir.path().join("absent.log")).unwrap_err();
        assert!(matches!(err, ReadError::Io { .. }));
    }

    #[test]
    fn test_decode_reports_fallback() {
        assert_eq!(decode_log(b"abc"), (Cow::Borrowed("abc"), false));
        let (text, fallback) = decode_log(b"\xE9");
        assert_eq!(text, "é");
        assert!(fallback);
    }

    #[test]
    fn test_fallback_decodes_every_byte() {
        let (text, fallback) = decode_log(b"Item: 2 x\x80y");
        assert!(fallback);
        assert_eq!(text, "Item: 2 x€y");

        let all: Vec<u8> = (0..=255).collect();
        let (text, _) = decode_log(&all);
        assert_eq!(text.chars().count(), 256);
        assert!(!text.contains('\u{FFFD}'));
    }
}
