//! Unguarded I/O on the fixed-name text file.
//!
//! # Invariants
//! - Append writes the text verbatim; no separator is inserted.
//! - Clear truncates; the file is never deleted.
//! - Reads never fail: an unreadable or missing file reads as `""`.

use super::StoreResult;
use crate::storage::medium::StorageMedium;
use log::{debug, info, warn};
use std::io::ErrorKind;

/// The single text file on a storage medium.
pub struct TextFile<M: StorageMedium> {
    medium: M,
    name: String,
}

impl<M: StorageMedium> TextFile<M> {
    pub fn new(medium: M, name: impl Into<String>) -> Self {
        Self {
            medium,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> String {
        self.medium.describe(&self.name)
    }

    pub fn append(&self, text: &str) -> StoreResult<()> {
        match self.medium.append(&self.name, text.as_bytes()) {
            Ok(()) => {
                info!(
                    "event=text_append module=store status=ok bytes={}",
                    text.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=text_append module=store status=error bytes={} error={}",
                    text.len(),
                    err
                );
                Err(err.into())
            }
        }
    }

    pub fn clear(&self) -> StoreResult<()> {
        match self.medium.truncate(&self.name) {
            Ok(()) => {
                info!("event=text_clear module=store status=ok");
                Ok(())
            }
            Err(err) => {
                warn!("event=text_clear module=store status=error error={}", err);
                Err(err.into())
            }
        }
    }

    /// Reads every line, each followed by exactly one `\n`.
    pub fn read_all(&self) -> String {
        match self.medium.read(&self.name) {
            Ok(bytes) => {
                let text = terminate_lines(&String::from_utf8_lossy(&bytes));
                debug!(
                    "event=text_read module=store status=ok bytes={}",
                    text.len()
                );
                text
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("event=text_read module=store status=skipped reason=missing_file");
                String::new()
            }
            Err(err) => {
                warn!("event=text_read module=store status=error error={}", err);
                String::new()
            }
        }
    }
}

/// Splits on `\r\n`, `\n`, or `\r` and re-terminates every line with `\n`.
///
/// A trailing fragment without a terminator still counts as a line.
pub fn terminate_lines(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 1);
    let mut line_open = false;
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
                line_open = false;
            }
            '\n' => {
                out.push('\n');
                line_open = false;
            }
            other => {
                out.push(other);
                line_open = true;
            }
        }
    }
    if line_open {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{terminate_lines, TextFile};
    use crate::storage::memory_medium::MemoryStorageMedium;
    use crate::store::StoreError;

    #[test]
    fn terminate_lines_normalizes_every_terminator() {
        assert_eq!(terminate_lines(""), "");
        assert_eq!(terminate_lines("a"), "a\n");
        assert_eq!(terminate_lines("a\n"), "a\n");
        assert_eq!(terminate_lines("a\r\nb\rc\n"), "a\nb\nc\n");
        assert_eq!(terminate_lines("\n\n"), "\n\n");
        assert_eq!(terminate_lines("\r\n\r"), "\n\n");
    }

    #[test]
    fn append_is_verbatim() {
        let medium = MemoryStorageMedium::new();
        let file = TextFile::new(&medium, "t.txt");
        file.append("t1").expect("append t1");
        file.append("t2").expect("append t2");
        assert_eq!(medium.contents("t.txt").expect("exists"), b"t1t2");
        assert_eq!(file.read_all(), "t1t2\n");
    }

    #[test]
    fn read_all_swallows_read_errors() {
        let medium = MemoryStorageMedium::new();
        medium.seed("t.txt", b"data");
        medium.fail_reads(true);
        let file = TextFile::new(&medium, "t.txt");
        assert_eq!(file.read_all(), "");
    }

    #[test]
    fn read_all_replaces_invalid_utf8() {
        let medium = MemoryStorageMedium::new();
        medium.seed("t.txt", &[b'o', b'k', 0xff, b'\n']);
        let file = TextFile::new(&medium, "t.txt");
        assert_eq!(file.read_all(), "ok\u{fffd}\n");
    }

    #[test]
    fn write_errors_surface_as_io() {
        let medium = MemoryStorageMedium::new();
        medium.fail_writes(true);
        let file = TextFile::new(&medium, "t.txt");
        assert!(matches!(file.append("x"), Err(StoreError::Io(_))));
        assert!(matches!(file.clear(), Err(StoreError::Io(_))));
    }
}
