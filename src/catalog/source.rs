use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::catalog::model::Bike;
use crate::foundation::error::{VahanError, VahanResult};

const BUILTIN_BIKES_JSON: &str = include_str!("data/bikes.json");

/// Where catalog records come from.
///
/// Callers treat `fetch` as a potentially slow call (a real deployment backs it with a network
/// request); nothing in the pipeline assumes the catalog is already in memory.
pub trait CatalogSource {
    /// Return every bike record.
    fn fetch(&self) -> VahanResult<Vec<Bike>>;
}

/// The ten hand-authored sample bikes.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn fetch(&self) -> VahanResult<Vec<Bike>> {
        parse_bikes_json(BUILTIN_BIKES_JSON.as_bytes())
    }
}

/// Bike records stored as a JSON array on disk.
#[derive(Clone, Debug)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    /// Point at a JSON file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for JsonFileCatalog {
    fn fetch(&self) -> VahanResult<Vec<Bike>> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read catalog '{}'", self.path.display()))?;
        parse_bikes_json(&bytes)
    }
}

fn parse_bikes_json(bytes: &[u8]) -> VahanResult<Vec<Bike>> {
    serde_json::from_slice(bytes).map_err(|e| VahanError::validation(format!("catalog json: {e}")))
}
