use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use wgc_core::{category::Category, sensor::SensorSnapshot};

use crate::route::AppState;

/// List all sensors with their current state.
pub async fn list(State(state): State<AppState>) -> Json<Vec<SensorSnapshot>> {
    let sensors = state.sensors.lock().await;
    Json(sensors.iter().map(|sensor| sensor.snapshot()).collect())
}

/// Show the sensor of a single waste category.
pub async fn show(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SensorSnapshot>, (StatusCode, String)> {
    let category = Category::from_key(&key);
    let sensors = state.sensors.lock().await;
    sensors
        .iter()
        .find(|sensor| *sensor.category() == category)
        .map(|sensor| Json(sensor.snapshot()))
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("no sensor for {category}")))
}
