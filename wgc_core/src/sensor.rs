//! Sensors exposing the next collection date of a single waste category.

use std::{str::FromStr, sync::Arc};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::debug;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    calendar::WasteCalendar,
    category::Category,
    error::{CalendarError, Result},
};

pub static SENSOR_PREFIX: &str = "Waste ";

/// The calendar shared by all sensors.
pub type SharedCalendar = Arc<Mutex<WasteCalendar>>;

/// Refresh the shared calendar, subject to its throttle.
///
/// Transport failures are already logged and reflected by the calendar, so only malformed
/// responses are returned.
pub async fn refresh_calendar(calendar: &SharedCalendar) -> Result<()> {
    match calendar.lock().await.refresh().await {
        Ok(_) => Ok(()),
        Err(err) if err.is_transport() => Ok(()),
        Err(err) => Err(err),
    }
}

/// The language of the display text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    German,
    English,
}

impl Locale {
    fn weekday(self, date: NaiveDate) -> &'static str {
        let index = date.weekday().num_days_from_monday() as usize;
        match self {
            Locale::German => ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"][index],
            Locale::English => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"][index],
        }
    }

    fn relative(self, days: i64) -> String {
        match (self, days) {
            (Locale::German, 0) => String::from("heute"),
            (Locale::German, 1) => String::from("morgen"),
            (Locale::German, -1) => String::from("gestern"),
            (Locale::German, days) if days < 0 => format!("vor {} Tagen", -days),
            (Locale::German, days) => format!("in {days} Tagen"),
            (Locale::English, 0) => String::from("today"),
            (Locale::English, 1) => String::from("tomorrow"),
            (Locale::English, -1) => String::from("yesterday"),
            (Locale::English, days) if days < 0 => format!("{} days ago", -days),
            (Locale::English, days) => format!("in {days} days"),
        }
    }
}

impl FromStr for Locale {
    type Err = CalendarError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "de" | "german" => Ok(Locale::German),
            "en" | "english" => Ok(Locale::English),
            _ => Err(CalendarError::UnknownLocale(String::from(value))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorAttributes {
    /// Calendar days from today until the collection.
    pub days: i64,
    pub display_text: String,
}

impl SensorAttributes {
    /// Describe a collection relative to `today`, e.g. `Do, 10.01.2019 (in 4 Tagen)`.
    pub fn describe(date: NaiveDateTime, today: NaiveDate, locale: Locale) -> Self {
        let days = (date.date() - today).num_days();
        let display_text = format!(
            "{}, {} ({})",
            locale.weekday(date.date()),
            date.format("%d.%m.%Y"),
            locale.relative(days)
        );
        Self { days, display_text }
    }
}

/// Everything a sensor exposes, at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSnapshot {
    pub key: String,
    pub name: String,
    pub icon: String,
    pub unit_of_measurement: String,
    pub state: Option<NaiveDateTime>,
    pub attributes: Option<SensorAttributes>,
}

pub struct WasteSensor {
    calendar: SharedCalendar,
    category: Category,
    name: String,
    unit: &'static str,
    icon: &'static str,
    locale: Locale,
    state: Option<NaiveDateTime>,
    attributes: Option<SensorAttributes>,
}

impl WasteSensor {
    pub fn new(calendar: SharedCalendar, category: Category, locale: Locale) -> Self {
        let meta = category.meta();
        Self {
            calendar,
            category,
            name: format!("{SENSOR_PREFIX}{}", meta.label),
            unit: meta.unit,
            icon: meta.icon,
            locale,
            state: None,
            attributes: None,
        }
    }

    /// Refresh the shared calendar and take over its next date for this category.
    ///
    /// Transport failures are logged by the calendar and leave the sensor without a state.
    /// Malformed responses are returned and leave the sensor as it was.
    pub async fn update(&mut self) -> Result<()> {
        refresh_calendar(&self.calendar).await?;
        self.sync().await;
        Ok(())
    }

    /// Take over the calendar's current next date for this category without refreshing it.
    pub async fn sync(&mut self) {
        let (next_date, today) = {
            let calendar = self.calendar.lock().await;
            (calendar.next_date(&self.category), calendar.now().date())
        };
        match next_date {
            Some(date) => {
                self.state = Some(date);
                self.attributes = Some(SensorAttributes::describe(date, today, self.locale));
            }
            None => {
                debug!("No upcoming collection for {}", self.category);
                self.state = None;
                self.attributes = None;
            }
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &str {
        self.icon
    }

    pub fn unit_of_measurement(&self) -> &str {
        self.unit
    }

    pub fn state(&self) -> Option<NaiveDateTime> {
        self.state
    }

    pub fn attributes(&self) -> Option<&SensorAttributes> {
        self.attributes.as_ref()
    }

    pub fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot {
            key: self.category.key().to_string(),
            name: self.name.clone(),
            icon: self.icon.to_string(),
            unit_of_measurement: self.unit.to_string(),
            state: self.state,
            attributes: self.attributes.clone(),
        }
    }
}
