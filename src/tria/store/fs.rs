use std::fs;
use std::path::PathBuf;

use super::{seed_contacts, ContactStore};
use crate::error::Result;
use crate::model::Contact;

/// Name of the single file holding the serialized contact list.
const STORE_FILE: &str = "tria-contacts.json";

/// File-backed contact storage: one JSON array, one file, whole-list writes.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Platform data directory for the default store location
    /// (`~/.local/share/tria` on Linux).
    pub fn default_root() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "tria").map(|dirs| dirs.data_dir().to_path_buf())
    }

    pub fn store_path(&self) -> PathBuf {
        self.root.join(STORE_FILE)
    }

    fn try_load(&self) -> Result<Option<Vec<Contact>>> {
        let path = self.store_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let contacts = serde_json::from_str(&content)?;
        Ok(Some(contacts))
    }

    fn try_save(&self, contacts: &[Contact]) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        let content = serde_json::to_string_pretty(contacts)?;
        fs::write(self.store_path(), content)?;
        Ok(())
    }
}

impl ContactStore for FileStore {
    fn load(&self) -> Vec<Contact> {
        match self.try_load() {
            Ok(Some(contacts)) => contacts,
            Ok(None) => seed_contacts(),
            Err(err) => {
                log::warn!("unreadable contact store, falling back to seed data: {err}");
                seed_contacts()
            }
        }
    }

    fn save(&mut self, contacts: &[Contact]) {
        if let Err(err) = self.try_save(contacts) {
            log::warn!("failed to persist contact list: {err}");
        }
    }
}
