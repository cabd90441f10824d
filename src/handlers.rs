use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use log::{error, info};
use crate::errors::WeatherError;
use crate::models::{Coordinates, WeatherInformation};
use crate::AppState;

fn error_response(e: WeatherError) -> HttpResponse {
    match e {
        WeatherError::LocationAlreadyExists => HttpResponse::Conflict().finish(),
        WeatherError::LocationDoesNotExist => HttpResponse::NotFound().finish(),
        WeatherError::Transport(_) | WeatherError::InvalidData => {
            error!("weather api request failed: {}", e);
            HttpResponse::BadGateway().finish()
        },
        WeatherError::Persistence(_) | WeatherError::Task(_) => {
            error!("request failed: {}", e);
            HttpResponse::InternalServerError().finish()
        },
    }
}

#[get("/weather")]
pub async fn weather(data: web::Data<AppState>) -> impl Responder {
    match data.weather.cached() {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => error_response(e),
    }
}

#[post("/weather/refresh")]
pub async fn refresh(data: web::Data<AppState>) -> impl Responder {
    let current = *data.location.borrow();

    match data.weather.get_weather(current, |_| {}).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => error_response(e),
    }
}

#[post("/favourites")]
pub async fn add_favourite(params: web::Json<Coordinates>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    match data.favourites.add_favourite_location(params.into_inner()).await {
        Ok(item) => HttpResponse::Created().json(item),
        Err(e) => error_response(e),
    }
}

#[delete("/favourites")]
pub async fn remove_favourite(params: web::Json<WeatherInformation>, data: web::Data<AppState>) -> impl Responder {
    match data.favourites.remove_favourite_location(&params) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

#[put("/location")]
pub async fn location(params: web::Json<Option<Coordinates>>, data: web::Data<AppState>) -> impl Responder {
    info!("current location: {:?}", params);

    data.location.send_replace(params.into_inner());
    HttpResponse::NoContent().finish()
}
