use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{VahanError, VahanResult};

/// String-keyed store of JSON values.
pub trait KvStore {
    fn get(&self, key: &str) -> VahanResult<Option<serde_json::Value>>;
    fn set(&mut self, key: &str, value: serde_json::Value) -> VahanResult<()>;
    fn remove(&mut self, key: &str) -> VahanResult<()>;
}

/// Process-local store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, serde_json::Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> VahanResult<Option<serde_json::Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> VahanResult<()> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> VahanResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by one JSON object file, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, serde_json::Value>,
}

impl JsonFileStore {
    /// Open `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> VahanResult<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                VahanError::persistence(format!("parse store '{}': {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read store '{}'", path.display()))
                    .into());
            }
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> VahanResult<()> {
        let json = serde_json::to_vec_pretty(&self.values)
            .map_err(|e| VahanError::persistence(format!("serialize store: {e}")))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .with_context(|| format!("write store '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace store '{}'", self.path.display()))?;
        Ok(())
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> VahanResult<Option<serde_json::Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> VahanResult<()> {
        self.values.insert(key.to_owned(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> VahanResult<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/store.rs"]
mod tests;
