use std::collections::HashMap;
use std::sync::Arc;

use super::dataset::Dataset;
use super::error::DatasetError;
use super::provider::DatasetProvider;

/// Loaded datasets keyed by provider source id. A source is loaded at most
/// once; later requests share the same immutable handle.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<String, Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(
        &mut self,
        provider: &dyn DatasetProvider,
    ) -> Result<Arc<Dataset>, DatasetError> {
        let source_id = provider.source_id();
        if let Some(dataset) = self.entries.get(&source_id) {
            tracing::debug!("Dataset cache hit: {}", source_id);
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(Dataset::new(provider.load()?));
        self.entries.insert(source_id, Arc::clone(&dataset));
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
