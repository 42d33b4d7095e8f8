//! This crate turns Würzburg's waste collection calendar into sensors holding the next pickup date
//! per waste category.
//!
//! The dates are read from the event list of <https://www.wuerzburg.de/themen/umwelt-verkehr/vorsorge-entsorgung/abfallkalender/index.html>.
//! The remote calendar is fetched at most once per day and shared by all sensors.

pub use ical;

pub mod calendar;
pub mod calendar_client;
pub mod category;
pub mod clock;
pub mod config;
pub mod error;
pub mod ical_export;
pub mod sensor;
pub mod setup;

#[cfg(test)]
pub(crate) mod testing;
