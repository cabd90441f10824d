use serde::Deserialize;

#[derive(Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
pub struct Condition {
    pub id: Option<i64>,
}

#[derive(Deserialize)]
pub struct Main {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

#[derive(Deserialize)]
pub struct CurrentWeather {
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub main: Main,
    pub name: String,
}

#[derive(Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
}

#[derive(Deserialize)]
pub struct ForecastSample {
    pub main: ForecastMain,
    pub weather: Vec<Condition>,
}

#[derive(Deserialize)]
pub struct FullForecast {
    pub list: Vec<ForecastSample>,
}

/// Returns the condition code of the first weather entry, if any
///
/// # Arguments
///
/// * 'weather' - weather entries from a response
pub fn condition_code(weather: &[Condition]) -> Option<i64> {
    weather.first().and_then(|c| c.id)
}
