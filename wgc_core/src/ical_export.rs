//! Render the next collection dates as an iCalendar.

use std::sync::OnceLock;

use ical::{
    generator::{IcalCalendar, IcalCalendarBuilder, IcalEvent, IcalEventBuilder, Property},
    ical_property,
};
use regex::Regex;

use crate::{calendar_client::NextDates, category::Category};

static PROD_ID: &str = "-//Abfuhrkalender//wuerzburg.de";
static TIMEZONE: &str = "Europe/Berlin";
static FORMAT: &str = "%Y%m%d";

/// Build a calendar with one all-day event per category which has an upcoming collection.
pub fn get_calendar(next_dates: &NextDates, url: &str) -> IcalCalendar {
    let changed = chrono::Local::now().format("%Y%m%dT%H%M%S").to_string();
    let mut calendar = IcalCalendarBuilder::version("2.0")
        .gregorian()
        .prodid(PROD_ID)
        .build();
    for (category, date) in next_dates {
        calendar
            .events
            .push(get_event(category, date.format(FORMAT).to_string(), url, &changed));
    }
    calendar
}

fn get_event(category: &Category, date: String, url: &str, changed: &str) -> IcalEvent {
    let summary = category
        .title()
        .map(String::from)
        .unwrap_or_else(|| category.meta().label);
    IcalEventBuilder::tzid(TIMEZONE)
        .uid(uid(&summary))
        .changed(changed)
        .one_day(date)
        .set(ical_property!("SUMMARY", &summary))
        .set(ical_property!("DESCRIPTION", url))
        .set(ical_property!("TRANSP", "TRANSPARENT"))
        .build()
}

/// Get a unique id for the next collection of a waste category.
///
/// Changing this function is a breaking change!
fn uid(summary: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace_regex = WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap());
    let summary = whitespace_regex.replace_all(summary, "-");
    format!("Abfuhrkalender_{summary}@wuerzburg.de")
}
