use crate::manager_db::errors::DBError;
use crate::models::{Coordinates, Forecast, Location, Temperature, WeatherInformation, WeatherType};

/// One persisted row of the weather_information table
pub struct WeatherRow {
    pub is_current_location: bool,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temp_current: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub weather_type: u8,
    pub forecast: String,
}

impl WeatherRow {
    pub fn from_info(info: &WeatherInformation) -> Result<Self, DBError> {
        Ok(WeatherRow {
            is_current_location: info.is_current_location,
            name: info.location.name.clone(),
            latitude: info.location.coordinates.latitude,
            longitude: info.location.coordinates.longitude,
            temp_current: info.temperature.current,
            temp_min: info.temperature.min,
            temp_max: info.temperature.max,
            weather_type: info.weather_type.ordinal(),
            forecast: serde_json::to_string(&info.forecast)?,
        })
    }

    pub fn into_info(self) -> Result<WeatherInformation, DBError> {
        let weather_type = WeatherType::from_ordinal(self.weather_type)
            .ok_or_else(|| DBError(format!("unknown weather type {}", self.weather_type)))?;
        let forecast: Vec<Forecast> = serde_json::from_str(&self.forecast)?;

        Ok(WeatherInformation {
            is_current_location: self.is_current_location,
            location: Location {
                name: self.name,
                coordinates: Coordinates {
                    latitude: self.latitude,
                    longitude: self.longitude,
                },
            },
            temperature: Temperature {
                current: self.temp_current,
                min: self.temp_min,
                max: self.temp_max,
            },
            weather_type,
            forecast,
        })
    }
}
