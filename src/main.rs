mod errors;
mod logging;
mod initialization;
mod models;
mod daily_forecast;
mod cache;
mod handlers;
mod manager_db;
mod manager_openweather;
mod manager_weather;
mod manager_favourites;
mod manager_refresh;
#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;
use actix_web::{web, App, HttpServer};
use log::{info, warn};
use tokio::sync::watch;
use crate::cache::WeatherCache;
use crate::errors::UnrecoverableError;
use crate::initialization::config;
use crate::manager_db::{NullStore, WeatherStore, DB};
use crate::manager_favourites::FavouritesManager;
use crate::manager_openweather::transport::ReqwestClient;
use crate::manager_openweather::{OpenWeather, WeatherFetcher};
use crate::manager_refresh::run_refresh;
use crate::manager_weather::WeatherManager;
use crate::models::Coordinates;

struct AppState {
    weather: Arc<WeatherManager>,
    favourites: Arc<FavouritesManager>,
    location: Arc<watch::Sender<Option<Coordinates>>>,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;

    let store: Arc<dyn WeatherStore> = match DB::new(&config.db.db_path) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            warn!("failed to open database, weather will not be persisted: {}", e);
            Arc::new(NullStore)
        }
    };
    let cache = Arc::new(WeatherCache::new(store));

    let client = ReqwestClient::new(Duration::from_secs(config.open_weather.timeout_secs))?;
    let fetcher: Arc<dyn WeatherFetcher> = Arc::new(OpenWeather::new(
        Arc::new(client),
        &config.open_weather.base_url,
        &config.open_weather.api_key,
    ));

    let weather = Arc::new(WeatherManager::new(fetcher.clone(), cache.clone()));
    let favourites = Arc::new(FavouritesManager::new(fetcher, cache));

    let (location_tx, location_rx) = watch::channel(config.current_location());
    let location = Arc::new(location_tx);
    tokio::spawn(run_refresh(weather.clone(), location_rx, Duration::from_secs(config.refresh.interval_secs)));

    info!("listening on {}:{}", config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(AppState {
                weather: weather.clone(),
                favourites: favourites.clone(),
                location: location.clone(),
            }))
            .service(handlers::weather)
            .service(handlers::refresh)
            .service(handlers::add_favourite)
            .service(handlers::remove_favourite)
            .service(handlers::location)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
