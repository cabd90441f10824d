pub mod errors;
pub mod transport;
mod models;

use std::sync::Arc;
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use crate::daily_forecast::daily_forecast;
use crate::manager_openweather::errors::FetchError;
use crate::manager_openweather::models::{condition_code, CurrentWeather, FullForecast};
use crate::manager_openweather::transport::HttpClient;
use crate::models::{Coordinates, Forecast, Location, Temperature, WeatherInformation, WeatherType};

/// Source of weather information for a coordinate
#[async_trait]
pub trait WeatherFetcher: Send + Sync {
    /// Fetches current weather and daily forecast for the given coordinates
    ///
    /// # Arguments
    ///
    /// * 'coordinates' - location to fetch weather for
    /// * 'is_current_location' - whether the result represents the device location
    async fn fetch(&self, coordinates: Coordinates, is_current_location: bool) -> Result<WeatherInformation, FetchError>;
}

/// Struct for fetching weather from the OpenWeather current and forecast endpoints
pub struct OpenWeather {
    client: Arc<dyn HttpClient>,
    base_url: String,
    api_key: String,
}

impl OpenWeather {
    /// Returns an OpenWeather fetcher
    ///
    /// # Arguments
    ///
    /// * 'client' - transport to issue requests with
    /// * 'base_url' - api base url without trailing slash
    /// * 'api_key' - application key appended to every request
    pub fn new(client: Arc<dyn HttpClient>, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn url(&self, endpoint: &str, coordinates: Coordinates) -> String {
        format!("{}/{}?lat={:0.5}&lon={:0.5}&appid={}",
                self.base_url, endpoint, coordinates.latitude, coordinates.longitude, self.api_key)
    }

    /// Requests the url and decodes the body, anything but a 200 with a valid body is invalid data
    ///
    /// # Arguments
    ///
    /// * 'url' - full request url
    async fn request<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let (body, status) = self.client.load(url).await?;
        if status != 200 {
            debug!("unexpected status {} from {}", status, url);
            return Err(FetchError::InvalidData);
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeather {
    async fn fetch(&self, coordinates: Coordinates, is_current_location: bool) -> Result<WeatherInformation, FetchError> {
        let current: CurrentWeather = self.request(&self.url("weather", coordinates)).await?;
        let forecast: FullForecast = self.request(&self.url("forecast", coordinates)).await?;

        let samples: Vec<Forecast> = forecast.list
            .iter()
            .map(|s| Forecast {
                current_temp: s.main.temp,
                weather_type: WeatherType::from_code(condition_code(&s.weather)),
            })
            .collect();

        Ok(WeatherInformation {
            is_current_location,
            location: Location {
                name: current.name,
                coordinates: Coordinates {
                    latitude: current.coord.lat,
                    longitude: current.coord.lon,
                },
            },
            temperature: Temperature {
                current: current.main.temp,
                min: current.main.temp_min,
                max: current.main.temp_max,
            },
            weather_type: WeatherType::from_code(condition_code(&current.weather)),
            forecast: daily_forecast(&samples),
        })
    }
}
