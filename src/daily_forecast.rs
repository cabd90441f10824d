use crate::models::{Forecast, WeatherType};

/// Number of three hour samples making up one day
const SAMPLES_PER_DAY: usize = 8;

/// Collapses three hour forecast samples into one forecast per day.
///
/// Samples are taken in consecutive chunks of eight, the last chunk may be shorter.
/// Temperature is the mean of the chunk and weather type is the truncated integer
/// average of the weather type ordinals, falling back to sunny if out of range.
///
/// # Arguments
///
/// * 'samples' - forecast samples in chronological order
pub fn daily_forecast(samples: &[Forecast]) -> Vec<Forecast> {
    samples
        .chunks(SAMPLES_PER_DAY)
        .map(|chunk| {
            let len = chunk.len();
            let temp_sum: f64 = chunk.iter().map(|f| f.current_temp).sum();
            let ordinal_sum: usize = chunk.iter().map(|f| f.weather_type.ordinal() as usize).sum();

            let weather_type = u8::try_from(ordinal_sum / len)
                .ok()
                .and_then(WeatherType::from_ordinal)
                .unwrap_or(WeatherType::Sunny);

            Forecast {
                current_temp: temp_sum / len as f64,
                weather_type,
            }
        })
        .collect()
}
