use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub coordinates: Coordinates,
}

/// Temperatures in Kelvin
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherType {
    Sunny,
    Cloudy,
    Rainy,
}

impl WeatherType {
    /// Maps a weather condition code from the remote API
    ///
    /// # Arguments
    ///
    /// * 'code' - condition code, None if the response carried no condition
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            None => WeatherType::Sunny,
            Some(c) if c < 800 => WeatherType::Rainy,
            Some(800) => WeatherType::Sunny,
            Some(_) => WeatherType::Cloudy,
        }
    }

    pub fn ordinal(&self) -> u8 {
        match self {
            WeatherType::Sunny => 0,
            WeatherType::Cloudy => 1,
            WeatherType::Rainy => 2,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(WeatherType::Sunny),
            1 => Some(WeatherType::Cloudy),
            2 => Some(WeatherType::Rainy),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub current_temp: f64,
    pub weather_type: WeatherType,
}

/// Weather for one location, either the device location or a favourite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherInformation {
    pub is_current_location: bool,
    pub location: Location,
    pub temperature: Temperature,
    pub weather_type: WeatherType,
    pub forecast: Vec<Forecast>,
}
