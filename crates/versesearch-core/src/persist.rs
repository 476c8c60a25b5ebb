use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::session::{HistoryEntry, SEPARATOR_LINE};

pub const DEFAULT_HISTORY_FILE: &str = "verse_search_history.txt";

/// Plain-text, append-only log of search history.
///
/// Each save writes every in-memory entry followed by a dashed separator
/// line. A failure halfway through leaves whatever was already written.
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append all entries, returning how many were written
    pub fn append(&self, entries: &[HistoryEntry]) -> Result<usize> {
        debug!(path = %self.path.display(), count = entries.len(), "saving history");

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);

        for entry in entries {
            writeln!(writer, "{}", entry)?;
            writeln!(writer, "{}", SEPARATOR_LINE)?;
        }
        writer.flush()?;

        info!(path = %self.path.display(), count = entries.len(), "history saved");
        Ok(entries.len())
    }

    pub fn saved_message(&self) -> String {
        format!("Search history saved to {}", self.path.display())
    }
}

impl Default for HistoryFile {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::translation::Translation;
    use tempfile::TempDir;

    fn entries(k: usize) -> Vec<HistoryEntry> {
        (1..=k)
            .map(|i| HistoryEntry {
                reference: format!("Psalms 23:{}", i),
                translation: Translation::Kjv,
                result: format!("Psalms 23:{} - verse {}\n\n", i, i),
            })
            .collect()
    }

    fn separator_count(contents: &str) -> usize {
        contents.lines().filter(|l| *l == SEPARATOR_LINE).count()
    }

    #[test]
    fn test_append_writes_one_block_per_entry() {
        let dir = TempDir::new().unwrap();
        let file = HistoryFile::new(dir.path().join("history.txt"));

        assert_eq!(file.append(&entries(3)).unwrap(), 3);

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(separator_count(&contents), 3);
        assert!(contents.starts_with("Psalms 23:1 [KJV]:\nPsalms 23:1 - verse 1\n\n\n"));
        assert!(contents.ends_with(&format!("{}\n", SEPARATOR_LINE)));
    }

    #[test]
    fn test_second_save_appends() {
        let dir = TempDir::new().unwrap();
        let file = HistoryFile::new(dir.path().join("history.txt"));

        file.append(&entries(2)).unwrap();
        file.append(&entries(2)).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(separator_count(&contents), 4);
    }

    #[test]
    fn test_empty_history_creates_empty_file() {
        let dir = TempDir::new().unwrap();
        let file = HistoryFile::new(dir.path().join("history.txt"));

        assert_eq!(file.append(&[]).unwrap(), 0);
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "");
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        let file = HistoryFile::new(dir.path().join("missing").join("history.txt"));

        match file.append(&entries(1)) {
            Err(Error::Io(message)) => assert!(!message.is_empty()),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_saved_message_names_path() {
        assert_eq!(
            HistoryFile::default().saved_message(),
            "Search history saved to verse_search_history.txt"
        );
    }
}
