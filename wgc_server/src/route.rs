use std::sync::Arc;

use tokio::sync::Mutex;
use wgc_core::sensor::{SharedCalendar, WasteSensor};

pub mod calendar;
pub mod sensors;

pub type Sensors = Arc<Mutex<Vec<WasteSensor>>>;

#[derive(Clone)]
pub struct AppState {
    pub calendar: SharedCalendar,
    pub sensors: Sensors,
    /// The source of the collection dates, linked from calendar events.
    pub url: Arc<str>,
}
