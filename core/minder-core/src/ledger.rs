//! File-backed attendance ledger.
//!
//! One JSON object per installation, mapping a calendar day to the duration
//! the target process was resident that day:
//!
//! ```json
//! {
//!   "21-08-2026": "7:25:05",
//!   "22-08-2026": "0:05:00"
//! }
//! ```
//!
//! The whole mapping is read once at startup and rewritten on every flush.
//! Flushes are rate-limited by the accumulator (every 5 accumulated
//! seconds), so a full rewrite stays cheap at this size.
//!
//! # Atomic Writes
//!
//! Uses temp file + rename so a crash mid-flush never leaves a truncated
//! ledger behind.
//!
//! # Malformed Data
//!
//! Unlike scratch state, this file is the product the daemon exists to
//! produce. A ledger that exists but does not parse is an error for the
//! caller to treat as fatal, not something to silently replace.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::clock::{format_duration, parse_duration, DayKey};
use crate::error::{MinderError, Result};

/// Durable mapping from [`DayKey`] to an `H:MM:SS` duration string.
pub struct DayLedger {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl DayLedger {
    /// Loads the ledger at `path`, creating it (and its parent directories)
    /// as an empty mapping when it does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            fs_err::create_dir_all(parent_dir(path)).map_err(|err| MinderError::Io {
                context: format!("creating ledger directory for {}", path.display()),
                source: err,
            })?;
            let ledger = DayLedger {
                path: path.to_path_buf(),
                entries: BTreeMap::new(),
            };
            ledger.write_all()?;
            return Ok(ledger);
        }

        let content = fs_err::read_to_string(path).map_err(|err| MinderError::Io {
            context: format!("reading ledger {}", path.display()),
            source: err,
        })?;
        let entries = serde_json::from_str::<BTreeMap<String, String>>(&content).map_err(
            |err| MinderError::LedgerMalformed {
                path: path.to_path_buf(),
                details: err.to_string(),
            },
        )?;

        Ok(DayLedger {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored duration text for `day`, if any.
    pub fn get(&self, day: &DayKey) -> Option<&str> {
        self.entries.get(day.as_str()).map(String::as_str)
    }

    /// The stored duration for `day` parsed back into seconds.
    ///
    /// A present-but-unparseable value is an error; startup reconciliation
    /// must not guess at a seed.
    pub fn seconds_for(&self, day: &DayKey) -> Result<Option<u64>> {
        match self.get(day) {
            Some(text) => Ok(Some(parse_duration(text)?)),
            None => Ok(None),
        }
    }

    /// Inserts or overwrites the entry for `day` and synchronously rewrites
    /// the backing file.
    pub fn put(&mut self, day: &DayKey, total_secs: u64) -> Result<()> {
        self.entries
            .insert(day.as_str().to_string(), format_duration(total_secs));
        self.write_all()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn write_all(&self) -> Result<()> {
        let content =
            serde_json::to_string_pretty(&self.entries).map_err(|err| MinderError::Json {
                context: format!("serializing ledger {}", self.path.display()),
                source: err,
            })?;

        let mut temp_file =
            NamedTempFile::new_in(parent_dir(&self.path)).map_err(|err| MinderError::Io {
                context: "creating ledger temp file".to_string(),
                source: err,
            })?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|err| MinderError::Io {
                context: "writing ledger temp file".to_string(),
                source: err,
            })?;
        temp_file.flush().map_err(|err| MinderError::Io {
            context: "flushing ledger temp file".to_string(),
            source: err,
        })?;
        temp_file
            .persist(&self.path)
            .map_err(|err| MinderError::Io {
                context: format!("replacing ledger {}", self.path.display()),
                source: err.error,
            })?;

        Ok(())
    }
}

// Relative single-component paths have an empty parent; treat that as cwd.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn day(d: u32) -> DayKey {
        DayKey::from_date(NaiveDate::from_ymd_opt(2026, 8, d).unwrap())
    }

    #[test]
    fn test_load_missing_file_creates_empty_ledger() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("attendance.json");

        let ledger = DayLedger::load(&path).unwrap();
        assert!(ledger.is_empty());
        assert!(path.exists());
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_load_creates_parent_directories() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("dir").join("attendance.json");

        let ledger = DayLedger::load(&path).unwrap();
        assert!(ledger.is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_put_then_reload_round_trips() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("attendance.json");

        {
            let mut ledger = DayLedger::load(&path).unwrap();
            ledger.put(&day(22), 300).unwrap();
            assert_eq!(ledger.get(&day(22)), Some("0:05:00"));
        }

        let ledger = DayLedger::load(&path).unwrap();
        assert_eq!(ledger.seconds_for(&day(22)).unwrap(), Some(300));
    }

    #[test]
    fn test_put_overwrites_entry_for_same_day() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("attendance.json");

        let mut ledger = DayLedger::load(&path).unwrap();
        ledger.put(&day(22), 5).unwrap();
        ledger.put(&day(22), 10).unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(&day(22)), Some("0:00:10"));
    }

    #[test]
    fn test_days_accumulate_separate_entries() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("attendance.json");

        let mut ledger = DayLedger::load(&path).unwrap();
        ledger.put(&day(21), 3600).unwrap();
        ledger.put(&day(22), 5).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(&day(21)), Some("1:00:00"));
        assert_eq!(ledger.get(&day(22)), Some("0:00:05"));
    }

    #[test]
    fn test_get_absent_day_returns_none() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("attendance.json");

        let ledger = DayLedger::load(&path).unwrap();
        assert_eq!(ledger.get(&day(22)), None);
        assert_eq!(ledger.seconds_for(&day(22)).unwrap(), None);
    }

    #[test]
    fn test_load_corrupt_json_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("attendance.json");
        fs_err::write(&path, "{not json").unwrap();

        let err = DayLedger::load(&path).unwrap_err();
        assert!(matches!(err, MinderError::LedgerMalformed { .. }));
    }

    #[test]
    fn test_load_empty_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("attendance.json");
        fs_err::write(&path, "").unwrap();

        let err = DayLedger::load(&path).unwrap_err();
        assert!(matches!(err, MinderError::LedgerMalformed { .. }));
    }

    #[test]
    fn test_seconds_for_rejects_unparseable_duration() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("attendance.json");
        fs_err::write(&path, format!(r#"{{"{}": "junk"}}"#, day(22))).unwrap();

        let ledger = DayLedger::load(&path).unwrap();
        let err = ledger.seconds_for(&day(22)).unwrap_err();
        assert!(matches!(err, MinderError::InvalidDuration { .. }));
    }
}
