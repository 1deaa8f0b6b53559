// File-backed session store
//
// The four session slots live in one small JSON object on disk. Every
// write rewrites the whole file through a temp file and a rename, so a
// reader never sees a half-written session.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{trace, warn};

use campus_api::{SessionStore, StorageError};

type Entries = BTreeMap<String, String>;

/// [`SessionStore`] persisted as a JSON object file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Entries, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Entries::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        // A leftover temp file would keep whatever mode it was created with.
        match fs::remove_file(&tmp) {
            Err(e) if e.kind() != ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }
        let mut file = private_file_options().open(&tmp)?;
        file.write_all(&serde_json::to_vec_pretty(entries)?)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)?;
        trace!(path = %self.path.display(), "session file written");
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut Entries)) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("session store lock poisoned".into()))?;
        let mut entries = match self.read() {
            Err(StorageError::Corrupt(e)) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "session file is corrupt, starting a fresh session"
                );
                Entries::new()
            }
            other => other?,
        };
        f(&mut entries);
        self.write(&entries)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

/// Options for a new file readable only by its owner.
#[cfg(unix)]
fn private_file_options() -> OpenOptions {
    use std::os::unix::fs::OpenOptionsExt;
    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true).mode(0o600);
    opts
}

#[cfg(not(unix))]
fn private_file_options() -> OpenOptions {
    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);
    opts
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use campus_api::storage::{TOKEN_KEY, USER_KEY};

    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));

        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        store.remove(TOKEN_KEY).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn values_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("session.json");

        let store = FileStore::new(&path);
        store.set(TOKEN_KEY, "tok").unwrap();
        store.set(USER_KEY, "{\"id\":\"u1\"}").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("tok"));

        reopened.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_KEY).unwrap().as_deref(), Some("{\"id\":\"u1\"}"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let err = FileStore::new(&path).get(TOKEN_KEY).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn writes_replace_a_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);

        store.remove(USER_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);

        store.set(TOKEN_KEY, "fresh").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("fresh"));
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private_even_over_a_stale_temp_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, "{}").unwrap();
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o644)).unwrap();

        FileStore::new(&path).set(TOKEN_KEY, "tok").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        assert!(!tmp.exists());
    }
}
