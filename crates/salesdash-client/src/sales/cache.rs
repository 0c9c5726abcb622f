use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::DataSourceError;
use crate::sales::types::LoadedSales;

/// Loaded sales keyed by source identifier. Entries live until the caller
/// invalidates them.
#[derive(Debug, Default)]
pub struct SalesCache {
    entries: RwLock<HashMap<String, Arc<LoadedSales>>>,
}

impl SalesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source_id: &str) -> Option<Arc<LoadedSales>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(source_id).cloned()
    }

    pub fn get_or_load<F>(
        &self,
        source_id: &str,
        loader: F,
    ) -> Result<Arc<LoadedSales>, DataSourceError>
    where
        F: FnOnce() -> Result<LoadedSales, DataSourceError>,
    {
        if let Some(hit) = self.get(source_id) {
            debug!(source = source_id, "sales cache hit");
            return Ok(hit);
        }

        debug!(source = source_id, "sales cache miss");
        let loaded = Arc::new(loader()?);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let stored = entries
            .entry(source_id.to_string())
            .or_insert_with(|| Arc::clone(&loaded));
        Ok(Arc::clone(stored))
    }

    pub fn invalidate(&self, source_id: &str) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(source_id).is_some()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
