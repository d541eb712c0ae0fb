//! Contact store persisted as a single JSON array file.
//!
//! Every call re-reads the whole file and every mutation rewrites it. There is
//! no cache and no locking: two concurrent writers race and the last rename
//! wins. File I/O runs on Tokio's blocking pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::{debug, info};

use super::atomic_write::{is_plain_file_name, sync_directory, write_atomic};
use crate::domain::Contact;
use crate::domain::ports::{ContactStore, ContactStoreError};

/// Default directory holding the store file.
pub const DEFAULT_DATA_DIR: &str = "data";
/// Default store file name inside the data directory.
pub const DEFAULT_DATA_FILE: &str = "contacts.json";

const EMPTY_COLLECTION: &str = "[]";

/// JSON file backed implementation of [`ContactStore`].
///
/// # Examples
/// ```no_run
/// use contact_book::outbound::persistence::JsonFileContactStore;
///
/// let store = JsonFileContactStore::open("data", "contacts.json").expect("open store");
/// println!("{}", store.file_path().display());
/// store.close();
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileContactStore {
    dir: Arc<Dir>,
    dir_path: PathBuf,
    file_name: String,
}

impl JsonFileContactStore {
    /// Open the store, creating the data directory and an empty array file
    /// when they are missing. Calling it again on an existing store leaves
    /// the file untouched.
    ///
    /// # Errors
    /// Returns [`ContactStoreError::Io`] when `file_name` is not a plain file
    /// name or the directory or file cannot be created.
    pub fn open(
        data_dir: impl AsRef<Path>,
        file_name: impl Into<String>,
    ) -> Result<Self, ContactStoreError> {
        let dir_path = data_dir.as_ref().to_path_buf();
        let file_name = file_name.into();
        let display_path = dir_path.join(&file_name).display().to_string();
        if !is_plain_file_name(&file_name) {
            return Err(ContactStoreError::io(
                display_path,
                "contact store path must be a plain file name",
            ));
        }

        Dir::create_ambient_dir_all(&dir_path, ambient_authority())
            .map_err(|err| ContactStoreError::io(dir_path.display().to_string(), err.to_string()))?;
        let dir = Dir::open_ambient_dir(&dir_path, ambient_authority())
            .map_err(|err| ContactStoreError::io(dir_path.display().to_string(), err.to_string()))?;

        if !dir.exists(&file_name) {
            dir.write(&file_name, EMPTY_COLLECTION)
                .map_err(|err| ContactStoreError::io(display_path.as_str(), err.to_string()))?;
            info!(path = %display_path, "created empty contact store");
        }

        Ok(Self {
            dir: Arc::new(dir),
            dir_path,
            file_name,
        })
    }

    /// Location of the store file.
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.dir_path.join(&self.file_name)
    }

    /// Flush directory metadata and release the directory handle.
    pub fn close(self) {
        sync_directory(&self.dir);
        debug!(path = %self.file_path().display(), "closed contact store");
    }

    fn read_blocking(dir: &Dir, file_name: &str, path: &Path) -> Result<Vec<Contact>, ContactStoreError> {
        let raw = dir
            .read_to_string(file_name)
            .map_err(|err| ContactStoreError::io(path.display().to_string(), err.to_string()))?;
        serde_json::from_str(&raw).map_err(|err| ContactStoreError::parse(err.to_string()))
    }

    fn write_blocking(
        dir: &Dir,
        file_name: &str,
        path: &Path,
        contacts: &[Contact],
    ) -> Result<(), ContactStoreError> {
        let json =
            serde_json::to_string(contacts).map_err(|err| ContactStoreError::parse(err.to_string()))?;
        write_atomic(dir, file_name, path, &json)
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T, ContactStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir, &str, &Path) -> Result<T, ContactStoreError> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        let path = self.file_path();
        tokio::task::spawn_blocking(move || op(&dir, &file_name, &path))
            .await
            .map_err(|err| ContactStoreError::task(err.to_string()))?
    }
}

#[async_trait]
impl ContactStore for JsonFileContactStore {
    async fn load_all(&self) -> Result<Vec<Contact>, ContactStoreError> {
        let contacts = self.run_blocking(Self::read_blocking).await?;
        debug!(count = contacts.len(), "loaded contacts");
        Ok(contacts)
    }

    async fn save_all(&self, contacts: Vec<Contact>) -> Result<(), ContactStoreError> {
        let count = contacts.len();
        self.run_blocking(move |dir, file_name, path| {
            Self::write_blocking(dir, file_name, path, &contacts)
        })
        .await?;
        debug!(count, "saved contacts");
        Ok(())
    }
}
