//! Set up the shared calendar and one sensor per requested waste category.

use std::sync::Arc;

use log::{debug, error};
use tokio::sync::Mutex;

use crate::{
    calendar::WasteCalendar,
    category::Category,
    config::CalendarConfig,
    error::Result,
    sensor::{Locale, SharedCalendar, WasteSensor},
};

/// Set up sensors for the given category keys against the configured calendar.
///
/// The calendar is fetched once. If it cannot be reached, no sensor is created.
pub async fn setup(config: &CalendarConfig, resources: &[String]) -> Result<Vec<WasteSensor>> {
    let calendar = Arc::new(Mutex::new(WasteCalendar::new(config)?));
    setup_with(calendar, config.locale, resources).await
}

/// Set up sensors sharing the given calendar.
pub async fn setup_with(
    calendar: SharedCalendar,
    locale: Locale,
    resources: &[String],
) -> Result<Vec<WasteSensor>> {
    debug!("Setting up waste calendar retriever");
    if let Err(err) = calendar.lock().await.refresh().await {
        error!("Setup of the waste calendar failed: {err}");
        return Err(err);
    }
    let sensors = resources
        .iter()
        .map(|resource| WasteSensor::new(calendar.clone(), Category::from_key(resource), locale))
        .collect();
    Ok(sensors)
}
