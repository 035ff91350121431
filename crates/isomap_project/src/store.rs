//! Project blob stores: list, load and save projects by id

use crate::error::StoreError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const MIN_ID_LEN: usize = 3;
const MAX_ID_LEN: usize = 64;

/// Check a project id: 3 to 64 ASCII letters, digits, `_` or `-`
pub fn validate_project_id(id: &str) -> Result<(), StoreError> {
    let valid = (MIN_ID_LEN..=MAX_ID_LEN).contains(&id.len())
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidId(id.to_string()))
    }
}

/// A string-keyed store of project payloads.
///
/// Saving overwrites any existing project with the same id.
pub trait ProjectStore {
    /// All stored ids, sorted
    fn list_ids(&self) -> Result<Vec<String>, StoreError>;

    fn load(&self, id: &str) -> Result<Value, StoreError>;

    fn save(&mut self, id: &str, payload: &Value) -> Result<(), StoreError>;
}

fn check_payload(payload: &Value) -> Result<(), StoreError> {
    if payload.is_object() {
        Ok(())
    } else {
        Err(StoreError::InvalidPayload)
    }
}

/// In-memory store, mainly for tests and previews
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    projects: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryStore {
    fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.projects.keys().cloned().collect())
    }

    fn load(&self, id: &str) -> Result<Value, StoreError> {
        validate_project_id(id)?;
        let raw = self
            .projects
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(serde_json::from_str(raw)?)
    }

    fn save(&mut self, id: &str, payload: &Value) -> Result<(), StoreError> {
        validate_project_id(id)?;
        check_payload(payload)?;
        self.projects
            .insert(id.to_string(), serde_json::to_string(payload)?);
        Ok(())
    }
}

/// Directory-backed store: one `<id>.json` file per project
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn project_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

impl ProjectStore for FileStore {
    fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_project_id(id).is_ok() {
                    ids.push(id.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn load(&self, id: &str) -> Result<Value, StoreError> {
        validate_project_id(id)?;
        let path = self.project_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        log::info!("Loaded project '{}' from {:?}", id, path);
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&mut self, id: &str, payload: &Value) -> Result<(), StoreError> {
        validate_project_id(id)?;
        check_payload(payload)?;
        fs::create_dir_all(&self.root)?;
        let path = self.project_path(id);
        fs::write(&path, serde_json::to_string(payload)?)?;
        log::info!("Saved project '{}' to {:?}", id, path);
        Ok(())
    }
}
