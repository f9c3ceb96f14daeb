//! Customer persistence.
//!
//! The whole customer list is one JSON array, read at startup and rewritten
//! on every change.

use crate::StoreError;
use chrono::NaiveDate;
use gate_core::customer::Customer;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default data file name.
pub const DEFAULT_DATA_FILE: &str = "gatequote-data.json";

/// Backend holding the serialized customer list.
pub trait CustomerStore {
    /// Read all customers. A missing store reads as empty.
    fn load(&self) -> Result<Vec<Customer>, StoreError>;

    /// Replace the stored list.
    fn save(&mut self, customers: &[Customer]) -> Result<(), StoreError>;

    /// Remove all stored data.
    fn clear(&mut self) -> Result<(), StoreError>;

    /// Size of the stored blob in bytes, 0 when empty.
    fn size_bytes(&self) -> u64;

    /// Whether the backend can currently be written.
    fn is_available(&self) -> bool;

    /// Human-readable location, for status output.
    fn location(&self) -> String;

    /// Keep a copy of the stored blob aside before it is overwritten.
    ///
    /// Returns where the copy went, or `None` if the backend keeps none.
    fn preserve(&mut self) -> Result<Option<String>, StoreError> {
        Ok(None)
    }
}

/// Stores customers in a JSON file, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.into());
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    /// Where [`CustomerStore::preserve`] copies an unreadable data file.
    pub fn backup_path(&self) -> PathBuf {
        self.sibling(".bak")
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

impl CustomerStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Customer>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no data file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let customers = parse_customers(&text)?;
        debug!(path = %self.path.display(), count = customers.len(), "loaded customers");
        Ok(customers)
    }

    fn save(&mut self, customers: &[Customer]) -> Result<(), StoreError> {
        fs::create_dir_all(self.parent_dir())?;
        let bytes = serde_json::to_vec(customers)?;
        let temp = self.temp_path();
        fs::write(&temp, &bytes)?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        debug!(path = %self.path.display(), bytes = bytes.len(), "saved customers");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "cleared data file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn size_bytes(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    fn is_available(&self) -> bool {
        let dir = self.parent_dir();
        if fs::create_dir_all(dir).is_err() {
            return false;
        }
        let marker = dir.join(".gatequote_write_check");
        let ok = fs::write(&marker, b"ok").is_ok();
        let _ = fs::remove_file(&marker);
        ok
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn preserve(&mut self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let backup = self.backup_path();
        fs::copy(&self.path, &backup)?;
        Ok(Some(backup.display().to_string()))
    }
}

/// Keeps the serialized list in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Option<String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw JSON, as if it had been written earlier.
    pub fn with_data(json: impl Into<String>) -> Self {
        Self {
            data: Some(json.into()),
            read_only: false,
        }
    }

    /// A store that rejects every write.
    pub fn read_only() -> Self {
        Self {
            data: None,
            read_only: true,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.data.as_deref()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.read_only {
            Err(StoreError::Io(std::io::Error::new(
                ErrorKind::PermissionDenied,
                "store is read-only",
            )))
        } else {
            Ok(())
        }
    }
}

impl CustomerStore for MemoryStore {
    fn load(&self) -> Result<Vec<Customer>, StoreError> {
        match &self.data {
            Some(text) => parse_customers(text),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, customers: &[Customer]) -> Result<(), StoreError> {
        self.check_writable()?;
        self.data = Some(serde_json::to_string(customers)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.check_writable()?;
        self.data = None;
        Ok(())
    }

    fn size_bytes(&self) -> u64 {
        self.data.as_ref().map_or(0, |d| d.len() as u64)
    }

    fn is_available(&self) -> bool {
        !self.read_only
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// Parse a customer list. The top level must be a JSON array.
pub fn parse_customers(text: &str) -> Result<Vec<Customer>, StoreError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_array() {
        return Err(StoreError::InvalidFormat(
            "expected a JSON array of customers".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// Pretty-printed backup of a customer list.
pub fn export_json(customers: &[Customer]) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(customers)?)
}

/// File name for a backup taken on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("gatequote-backup-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_core::customer::CustomerDetails;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.size_bytes(), 0);

        let customers = vec![Customer::new(CustomerDetails::new("Hofer"))];
        store.save(&customers).unwrap();
        assert!(store.size_bytes() > 0);
        assert_eq!(store.load().unwrap(), customers);

        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_read_only_store_rejects_writes() {
        let mut store = MemoryStore::read_only();
        assert!(!store.is_available());
        assert!(matches!(store.save(&[]), Err(StoreError::Io(_))));
    }

    #[test]
    fn test_parse_requires_array() {
        assert!(matches!(
            parse_customers(r#"{"name": "Hofer"}"#),
            Err(StoreError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_customers("not json"),
            Err(StoreError::Serialization(_))
        ));
        assert!(parse_customers("[]").unwrap().is_empty());
    }

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(backup_file_name(date), "gatequote-backup-2024-03-07.json");
    }

    #[test]
    fn test_temp_path_sits_next_to_data_file() {
        let store = JsonFileStore::new("/data/customers.json");
        assert_eq!(store.temp_path(), PathBuf::from("/data/customers.json.tmp"));
        assert_eq!(store.backup_path(), PathBuf::from("/data/customers.json.bak"));
    }
}
