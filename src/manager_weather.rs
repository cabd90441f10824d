use std::sync::{Arc, Mutex, PoisonError};
use log::{error, info, warn};
use tokio::task::JoinSet;
use crate::cache::WeatherCache;
use crate::errors::WeatherError;
use crate::manager_openweather::errors::FetchError;
use crate::manager_openweather::WeatherFetcher;
use crate::models::{Coordinates, WeatherInformation};

/// Weather retrieval for the current location and all favourites
pub struct WeatherManager {
    fetcher: Arc<dyn WeatherFetcher>,
    cache: Arc<WeatherCache>,
    refreshing: Mutex<bool>,
}

/// Clears the refreshing flag when dropped, whether the refresh succeeded, failed or was cancelled
struct RefreshGuard<'a> {
    refreshing: &'a Mutex<bool>,
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        *self.refreshing.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }
}

impl WeatherManager {
    pub fn new(fetcher: Arc<dyn WeatherFetcher>, cache: Arc<WeatherCache>) -> Self {
        Self {
            fetcher,
            cache,
            refreshing: Mutex::new(false),
        }
    }

    /// Returns the cached snapshot without refreshing
    pub fn cached(&self) -> Result<Vec<WeatherInformation>, WeatherError> {
        Ok(self.cache.load()?)
    }

    /// Loads the cache, hands it to `cache_handler` and then refreshes weather for the
    /// current location and every favourite, persisting the result.
    ///
    /// If a refresh is already in flight the cached snapshot is returned as is.
    /// Any failed fetch aborts the refresh and leaves the cache untouched.
    ///
    /// # Arguments
    ///
    /// * 'current_location' - device location, if known
    /// * 'cache_handler' - called with the cached snapshot before refreshing
    pub async fn get_weather<F>(&self, current_location: Option<Coordinates>, cache_handler: F)
        -> Result<Vec<WeatherInformation>, WeatherError>
    where
        F: FnOnce(&[WeatherInformation]),
    {
        let cached = self.cache.load()?;
        cache_handler(&cached);

        let Some(_guard) = self.try_begin_refresh() else {
            warn!("refresh already in flight, returning cached snapshot");
            return Ok(cached);
        };

        let mut requests: Vec<(Coordinates, bool)> = Vec::new();
        if let Some(coordinates) = current_location {
            requests.push((coordinates, true));
        }
        requests.extend(cached
            .iter()
            .filter(|i| !i.is_current_location)
            .map(|i| (i.location.coordinates, false)));

        info!("refreshing weather for {} locations", requests.len());

        let result = match self.fetch_all(&requests).await {
            Ok(result) => result,
            Err(e) => {
                error!("weather refresh failed: {}", e);
                return Err(e);
            }
        };

        if let Err(e) = self.cache.save(&result) {
            error!("failed to save refreshed weather: {}", e);
            return Err(e.into());
        }

        info!("refreshed weather for {} locations", result.len());
        Ok(result)
    }

    fn try_begin_refresh(&self) -> Option<RefreshGuard<'_>> {
        let mut refreshing = self.refreshing.lock().unwrap_or_else(PoisonError::into_inner);
        if *refreshing {
            return None;
        }
        *refreshing = true;

        Some(RefreshGuard { refreshing: &self.refreshing })
    }

    /// Fetches all requests concurrently, results are in request order.
    /// The first failure aborts the remaining fetches.
    ///
    /// # Arguments
    ///
    /// * 'requests' - coordinates and current location flag per fetch
    async fn fetch_all(&self, requests: &[(Coordinates, bool)]) -> Result<Vec<WeatherInformation>, WeatherError> {
        let mut set: JoinSet<(usize, Result<WeatherInformation, FetchError>)> = JoinSet::new();

        for (index, &(coordinates, is_current_location)) in requests.iter().enumerate() {
            let fetcher = self.fetcher.clone();
            set.spawn(async move { (index, fetcher.fetch(coordinates, is_current_location).await) });
        }

        let mut result: Vec<Option<WeatherInformation>> = vec![None; requests.len()];
        while let Some(joined) = set.join_next().await {
            let (index, fetched) = joined?;
            result[index] = Some(fetched?);
        }

        Ok(result.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use crate::test_support::{coordinates, info, seeded_cache, FakeFetcher, FRESH_TEMP};

    fn snapshot() -> Vec<WeatherInformation> {
        vec![
            info("Home", coordinates(10.0, 10.0), true, 280.0),
            info("1,1", coordinates(1.0, 1.0), false, 281.0),
            info("2,2", coordinates(2.0, 2.0), false, 282.0),
        ]
    }

    #[tokio::test]
    async fn test_refresh_current_and_favourites() {
        let fetcher = FakeFetcher::new();
        let (cache, store) = seeded_cache(&snapshot());
        let manager = WeatherManager::new(fetcher.clone(), cache.clone());

        let mut handed = Vec::new();
        let result = manager
            .get_weather(Some(coordinates(9.0, 9.0)), |items| handed = items.to_vec())
            .await
            .unwrap();

        assert_eq!(handed, snapshot());
        assert_eq!(fetcher.calls(), 3);
        assert_eq!(result, vec![
            info("9,9", coordinates(9.0, 9.0), true, FRESH_TEMP),
            info("1,1", coordinates(1.0, 1.0), false, FRESH_TEMP),
            info("2,2", coordinates(2.0, 2.0), false, FRESH_TEMP),
        ]);
        assert_eq!(cache.load().unwrap(), result);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn test_no_current_location_skips_its_fetch() {
        let fetcher = FakeFetcher::new();
        let (cache, _) = seeded_cache(&snapshot());
        let manager = WeatherManager::new(fetcher.clone(), cache.clone());

        let result = manager.get_weather(None, |_| {}).await.unwrap();

        assert_eq!(fetcher.calls(), 2);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|i| !i.is_current_location));
        assert_eq!(cache.load().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_cache_without_location() {
        let fetcher = FakeFetcher::new();
        let (cache, _) = seeded_cache(&[]);
        let manager = WeatherManager::new(fetcher.clone(), cache);

        assert!(manager.get_weather(None, |_| {}).await.unwrap().is_empty());
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_call_returns_cached_snapshot() {
        let fetcher = FakeFetcher::gated();
        let (cache, store) = seeded_cache(&snapshot());
        let manager = Arc::new(WeatherManager::new(fetcher.clone(), cache));

        let first = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.get_weather(Some(coordinates(9.0, 9.0)), |_| {}).await })
        };
        while fetcher.calls() < 3 {
            tokio::task::yield_now().await;
        }

        let second = manager.get_weather(Some(coordinates(9.0, 9.0)), |_| {}).await.unwrap();
        assert_eq!(second, snapshot());
        assert_eq!(fetcher.calls(), 3);

        if let Some(gate) = &fetcher.gate {
            gate.add_permits(1);
        }
        let first = first.await.unwrap().unwrap();
        assert!(first.iter().all(|i| i.temperature.current == FRESH_TEMP));
        assert_eq!(fetcher.calls(), 3);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_cache_and_releases_guard() {
        let fetcher = FakeFetcher::new();
        fetcher.failing.store(true, Ordering::SeqCst);
        let (cache, store) = seeded_cache(&snapshot());
        let manager = WeatherManager::new(fetcher.clone(), cache.clone());

        let res = manager.get_weather(Some(coordinates(9.0, 9.0)), |_| {}).await;
        assert!(matches!(res, Err(WeatherError::InvalidData)));
        assert_eq!(cache.load().unwrap(), snapshot());
        assert_eq!(store.writes(), 0);

        fetcher.failing.store(false, Ordering::SeqCst);
        let result = manager.get_weather(Some(coordinates(9.0, 9.0)), |_| {}).await.unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(store.writes(), 1);
    }
}
