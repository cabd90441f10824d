use std::sync::Arc;
use crate::manager_db::errors::DBError;
use crate::manager_db::WeatherStore;
use crate::models::WeatherInformation;

/// Snapshot cache on top of a weather store, every save replaces the whole snapshot
pub struct WeatherCache {
    store: Arc<dyn WeatherStore>,
}

impl WeatherCache {
    pub fn new(store: Arc<dyn WeatherStore>) -> Self {
        Self { store }
    }

    /// Replaces the cached snapshot
    ///
    /// # Arguments
    ///
    /// * 'items' - the new snapshot
    pub fn save(&self, items: &[WeatherInformation]) -> Result<(), DBError> {
        self.store.replace_all(items)
    }

    pub fn load(&self) -> Result<Vec<WeatherInformation>, DBError> {
        self.store.load()
    }
}
