use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::Semaphore;
use crate::cache::WeatherCache;
use crate::manager_db::errors::DBError;
use crate::manager_db::{WeatherStore, DB};
use crate::manager_openweather::errors::FetchError;
use crate::manager_openweather::WeatherFetcher;
use crate::models::{Coordinates, Forecast, Location, Temperature, WeatherInformation, WeatherType};

pub fn coordinates(latitude: f64, longitude: f64) -> Coordinates {
    Coordinates { latitude, longitude }
}

pub fn info(name: &str, coordinates: Coordinates, is_current_location: bool, temp: f64) -> WeatherInformation {
    WeatherInformation {
        is_current_location,
        location: Location { name: name.to_string(), coordinates },
        temperature: Temperature { current: temp, min: temp - 2.0, max: temp + 2.0 },
        weather_type: WeatherType::Cloudy,
        forecast: vec![Forecast { current_temp: temp, weather_type: WeatherType::Rainy }; 5],
    }
}

/// Temperature reported by FakeFetcher, distinct from anything seeded in caches
pub const FRESH_TEMP: f64 = 300.0;

/// Fetcher resolving coordinates to the place name "lat,lon"
pub struct FakeFetcher {
    pub calls: AtomicUsize,
    pub failing: AtomicBool,
    /// When set every fetch waits for a permit before answering
    pub gate: Option<Semaphore>,
    /// Overrides the resolved place name
    pub name: Option<String>,
}

impl FakeFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { calls: AtomicUsize::new(0), failing: AtomicBool::new(false), gate: None, name: None })
    }

    pub fn gated() -> Arc<Self> {
        Arc::new(Self { calls: AtomicUsize::new(0), failing: AtomicBool::new(false), gate: Some(Semaphore::new(0)), name: None })
    }

    pub fn resolving_to(name: &str) -> Arc<Self> {
        Arc::new(Self { calls: AtomicUsize::new(0), failing: AtomicBool::new(false), gate: None, name: Some(name.to_string()) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn resolved_name(coordinates: Coordinates) -> String {
        format!("{},{}", coordinates.latitude, coordinates.longitude)
    }
}

#[async_trait]
impl WeatherFetcher for FakeFetcher {
    async fn fetch(&self, coordinates: Coordinates, is_current_location: bool) -> Result<WeatherInformation, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await.unwrap();
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::InvalidData);
        }

        let name = self.name.clone().unwrap_or_else(|| Self::resolved_name(coordinates));
        Ok(info(&name, coordinates, is_current_location, FRESH_TEMP))
    }
}

/// In-memory database store counting write operations
pub struct CountingStore {
    db: DB,
    pub writes: AtomicUsize,
}

impl CountingStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl WeatherStore for CountingStore {
    fn save(&self, items: &[WeatherInformation]) -> Result<(), DBError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.db.save(items)
    }

    fn load(&self) -> Result<Vec<WeatherInformation>, DBError> {
        self.db.load()
    }

    fn delete_all_items(&self) -> Result<(), DBError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.db.delete_all_items()
    }

    fn replace_all(&self, items: &[WeatherInformation]) -> Result<(), DBError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.db.replace_all(items)
    }
}

/// Returns a cache seeded with the given items and its store, with the write count reset
pub fn seeded_cache(items: &[WeatherInformation]) -> (Arc<WeatherCache>, Arc<CountingStore>) {
    let store = Arc::new(CountingStore { db: DB::new(":memory:").unwrap(), writes: AtomicUsize::new(0) });
    store.db.replace_all(items).unwrap();
    (Arc::new(WeatherCache::new(store.clone())), store)
}
