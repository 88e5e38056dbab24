use crate::dates::{week_id_of, week_start_of};
use crate::week::{Anchor, Week};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::Date;

/// Namespace tag prefixed to every persisted key.  Bumping it is the only
/// supported migration mechanism; records under an older prefix are left
/// orphaned.
pub(crate) const STORAGE_PREFIX: &str = "kiyo_week_v2_";

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("failed to access week storage")]
    Io(#[from] io::Error),
    #[error("failed to decode stored week record")]
    Corrupt(#[from] serde_json::Error),
}

/// Minimal persistent key-value capability the week store is built on.
/// Tests substitute an in-memory mapping for the on-disk implementation.
pub(crate) trait KeyValue {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One file per key under a local data directory.
#[derive(Debug)]
pub(crate) struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub(crate) fn open(dir: &Path) -> Result<FileStore, StoreError> {
        fs::create_dir_all(dir)?;
        Ok(FileStore {
            dir: dir.to_owned(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValue for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(fs::write(self.path_for(key), value)?)
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryStore(std::collections::HashMap<String, String>);

#[cfg(test)]
impl KeyValue for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.0.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Reads and writes whole-week records keyed by the canonical week id.
#[derive(Debug)]
pub(crate) struct WeekStore<S> {
    kv: S,
}

impl<S: KeyValue> WeekStore<S> {
    pub(crate) fn new(kv: S) -> WeekStore<S> {
        WeekStore { kv }
    }

    fn key_for(date: Date) -> String {
        format!("{STORAGE_PREFIX}{}", week_id_of(date))
    }

    /// Returns the stored week for `date`'s Monday-to-Sunday span, or a
    /// freshly synthesized empty week when nothing is stored yet.  Stored
    /// records are deserialized verbatim; a malformed record propagates as
    /// [`StoreError::Corrupt`].
    pub(crate) fn load(&self, date: Date) -> Result<Week, StoreError> {
        let key = Self::key_for(date);
        if let Some(raw) = self.kv.get(&key)? {
            log::debug!("loaded stored week {key}");
            Ok(serde_json::from_str(&raw)?)
        } else {
            log::debug!("synthesized empty week {key}");
            Ok(Week::fresh(week_start_of(date)))
        }
    }

    /// Serializes `week` in full and overwrites the record for `date`'s
    /// week.  Last write wins; there is no partial merge.
    pub(crate) fn save(&mut self, date: Date, week: &Week) -> Result<(), StoreError> {
        let key = Self::key_for(date);
        let raw = serde_json::to_string(week)?;
        log::debug!("saving week {key}");
        self.kv.set(&key, &raw)
    }

    /// True iff a record exists for `date`'s week and any anchor on
    /// `date`'s day carries the golden color.  Never synthesizes and never
    /// writes.
    pub(crate) fn is_golden(&self, date: Date) -> Result<bool, StoreError> {
        let Some(raw) = self.kv.get(&Self::key_for(date))? else {
            return Ok(false);
        };
        let week: Week = serde_json::from_str(&raw)?;
        let name = date.weekday().to_string();
        Ok(week
            .day_named(&name)
            .is_some_and(|day| day.anchors.iter().any(Anchor::is_golden)))
    }
}
