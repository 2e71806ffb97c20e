use std::fs;
use std::path::PathBuf;

use super::data::Record;

/// Errors from the durable (on-disk) copy of the dataset
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("durable store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize dataset: {0}")]
    Serialize(serde_json::Error),

    #[error("durable store content is not a valid dataset: {0}")]
    Malformed(serde_json::Error),
}

/// The DurableStore manages the local save file for the table.
///
/// It holds a single value (the JSON-serialized dataset) under a fixed
/// path, written on save and deleted on reset. The file lives in the
/// user's data directory:
/// - Linux: ~/.local/share/price-table/table_data.json
/// - macOS: ~/Library/Application Support/price-table/table_data.json
/// - Windows: %APPDATA%\price-table\table_data.json
#[derive(Debug, Clone)]
pub struct DurableStore {
    file_path: PathBuf,
}

const SAVE_FILE: &str = "table_data.json";

impl DurableStore {
    pub fn new() -> Self {
        Self {
            file_path: Self::default_path(),
        }
    }

    /// Create a store backed by an explicit file path (used by tests)
    pub fn with_path(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    fn default_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user data directory");

        path.push("price-table");
        path.push(SAVE_FILE);
        path
    }

    pub fn path(&self) -> &PathBuf {
        &self.file_path
    }

    /// Read the saved dataset.
    ///
    /// A missing file is not an error, it just means nothing was saved
    /// yet; content that does not parse as a Record array is Malformed.
    pub fn read(&self) -> Result<Vec<Record>, PersistenceError> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.file_path)?;
        serde_json::from_str(&raw).map_err(PersistenceError::Malformed)
    }

    /// Write the dataset, replacing any previous save
    pub fn write(&self, rows: &[Record]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(rows).map_err(PersistenceError::Serialize)?;

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.file_path, json)?;

        Ok(())
    }

    /// Delete the save file; clearing an empty store is fine
    pub fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for DurableStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<Record> {
        vec![Record {
            id: 1,
            name: "Sourdough".into(),
            image: "https://cdn.example/bread.png".into(),
            category: "Bakery".into(),
            label: None,
            price: 9.99,
            description: "Fresh loaf".into(),
        }]
    }

    fn temp_store(dir: &tempfile::TempDir) -> DurableStore {
        DurableStore::with_path(dir.path().join("table_data.json"))
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        let rows = sample_rows();
        store.write(&rows).unwrap();

        assert_eq!(store.read().unwrap(), rows);
    }

    #[test]
    fn test_clear_removes_save_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        store.write(&sample_rows()).unwrap();
        store.clear().unwrap();
        assert!(store.read().unwrap().is_empty());

        // Clearing again must not fail
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_content_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(
            store.read(),
            Err(PersistenceError::Malformed(_))
        ));
    }
}
