//! This client fetches the waste calendar and parses it into the next collection dates.

use std::{collections::BTreeMap, collections::HashMap, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::debug;
use serde::Deserialize;

use crate::{
    category::Category,
    error::{CalendarError, Result, TransportError},
};

static USER_AGENT: &str = concat!("wgc/", env!("CARGO_PKG_VERSION"));
static FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fetches the raw calendar body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> std::result::Result<String, TransportError>;
}

/// The transport used against the official server.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> std::result::Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> std::result::Result<String, TransportError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// A single collection as listed by the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub title: String,
    pub start: NaiveDateTime,
}

/// The soonest future collection per category.
pub type NextDates = BTreeMap<Category, NaiveDateTime>;

/// All collection dates of the known categories, sorted ascending.
#[derive(Debug, Default, PartialEq)]
pub struct CategoryBuckets {
    dates: BTreeMap<Category, Vec<NaiveDateTime>>,
    dropped: usize,
}

impl CategoryBuckets {
    pub fn dates(&self, category: &Category) -> &[NaiveDateTime] {
        self.dates.get(category).map(Vec::as_slice).unwrap_or_default()
    }

    /// The number of entries whose title did not belong to a known category.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

#[derive(Debug, Deserialize)]
struct CalendarResponse {
    contents: Contents,
}

/// The backend sends an empty list instead of an empty object if there are no events.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Contents {
    Events(HashMap<String, Record>),
    List(Vec<Record>),
}

#[derive(Debug, Deserialize)]
struct Record {
    title: String,
    start: String,
}

/// Parse the calendar response into schedule entries.
pub fn parse(json: &str) -> Result<Vec<ScheduleEntry>> {
    let response: CalendarResponse = serde_json::from_str(json)?;
    let records: Vec<Record> = match response.contents {
        Contents::Events(events) => events.into_values().collect(),
        Contents::List(records) => records,
    };
    records
        .into_iter()
        .map(|record| {
            let start = NaiveDateTime::parse_from_str(&record.start, FORMAT).map_err(|source| {
                CalendarError::InvalidTimestamp {
                    value: record.start.clone(),
                    source,
                }
            })?;
            Ok(ScheduleEntry {
                title: record.title,
                start,
            })
        })
        .collect()
}

/// Sort the entries into the known categories.
///
/// Entries with any other title are ignored, but counted.
pub fn bucket(entries: Vec<ScheduleEntry>) -> CategoryBuckets {
    let mut buckets = CategoryBuckets::default();
    for entry in entries {
        let Some(category) = Category::from_title(&entry.title) else {
            debug!("Ignoring calendar entry {:?}", entry.title);
            buckets.dropped += 1;
            continue;
        };
        buckets.dates.entry(category).or_default().push(entry.start);
    }
    for dates in buckets.dates.values_mut() {
        dates.sort();
    }
    buckets
}

/// Select the first collection strictly after `now` for every category.
pub fn next_dates(buckets: &CategoryBuckets, now: NaiveDateTime) -> NextDates {
    buckets
        .dates
        .iter()
        .filter_map(|(category, dates)| {
            dates
                .iter()
                .find(|date| **date > now)
                .map(|date| (category.clone(), *date))
        })
        .collect()
}
