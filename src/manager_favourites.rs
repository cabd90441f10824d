use std::sync::Arc;
use log::info;
use crate::cache::WeatherCache;
use crate::errors::WeatherError;
use crate::manager_openweather::WeatherFetcher;
use crate::models::{Coordinates, WeatherInformation};

/// Adding and removing favourite locations in the cached snapshot
pub struct FavouritesManager {
    fetcher: Arc<dyn WeatherFetcher>,
    cache: Arc<WeatherCache>,
}

impl FavouritesManager {
    pub fn new(fetcher: Arc<dyn WeatherFetcher>, cache: Arc<WeatherCache>) -> Self {
        Self { fetcher, cache }
    }

    /// Fetches weather for the coordinates and appends it to the cache as a favourite.
    ///
    /// Locations are deduplicated by resolved place name, so a new coordinate resolving to
    /// a name already in the cache is rejected even if the coordinates differ.
    ///
    /// # Arguments
    ///
    /// * 'coordinates' - location to add
    pub async fn add_favourite_location(&self, coordinates: Coordinates) -> Result<WeatherInformation, WeatherError> {
        let new_item = self.fetcher.fetch(coordinates, false).await?;

        let mut items = self.cache.load()?;
        if items.iter().any(|i| i.location.name == new_item.location.name) {
            return Err(WeatherError::LocationAlreadyExists);
        }

        items.push(new_item.clone());
        self.cache.save(&items)?;

        info!("added favourite location {}", new_item.location.name);
        Ok(new_item)
    }

    /// Removes the first cached entry structurally equal to the item
    ///
    /// # Arguments
    ///
    /// * 'item' - entry to remove
    pub fn remove_favourite_location(&self, item: &WeatherInformation) -> Result<(), WeatherError> {
        let mut items = self.cache.load()?;
        let index = items
            .iter()
            .position(|i| i == item)
            .ok_or(WeatherError::LocationDoesNotExist)?;

        items.remove(index);
        self.cache.save(&items)?;

        info!("removed favourite location {}", item.location.name);
        Ok(())
    }
}
