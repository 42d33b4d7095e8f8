use std::time::Duration;

use crate::sensor::Locale;

/// The event list of the official calendar for the configured address.
pub static DEFAULT_URL: &str = "https://www.wuerzburg.de/themen/umwelt-verkehr/vorsorge-entsorgung/abfallkalender/index.html?_func=evList&_mod=events&ev[start]=2018-12-24&ev[end]=2019-12-31&ev[cat]=&ev[subcat]=&ev[addr]=19943&ev[search]=&_y=2019&_m=01&recon=3vh5q416tm9ich27uec858i6ge&_dc=1546356725630";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings shared by the calendar and its sensors.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarConfig {
    pub url: String,
    /// Bound for a single request to the calendar.
    pub timeout: Duration,
    /// Minimum time between two fetches of the calendar.
    pub min_time_between_updates: chrono::Duration,
    pub locale: Locale,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_URL),
            timeout: DEFAULT_TIMEOUT,
            min_time_between_updates: chrono::Duration::days(1),
            locale: Locale::default(),
        }
    }
}
