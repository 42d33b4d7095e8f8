//! The cache of the next collection dates, refreshed from the remote calendar at most once per
//! throttle window.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use log::{debug, error};

use crate::{
    calendar_client::{bucket, next_dates, parse, HttpTransport, NextDates, Transport},
    category::Category,
    clock::{Clock, SystemClock},
    config::CalendarConfig,
    error::Result,
};

/// What a call to [`WasteCalendar::refresh`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The remote calendar was fetched and the next dates were replaced.
    Updated,
    /// The last fetch is too recent, the cached dates were kept.
    Throttled,
}

pub struct WasteCalendar {
    url: String,
    min_time_between_updates: Duration,
    transport: Box<dyn Transport>,
    clock: Arc<dyn Clock>,
    data: Option<NextDates>,
    last_update: Option<NaiveDateTime>,
    dropped_titles: usize,
}

impl WasteCalendar {
    /// Create a calendar which talks to the configured URL over HTTP.
    pub fn new(config: &CalendarConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(
            config,
            Box::new(transport),
            Arc::new(SystemClock),
        ))
    }

    pub fn with_transport(
        config: &CalendarConfig,
        transport: Box<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            url: config.url.clone(),
            min_time_between_updates: config.min_time_between_updates,
            transport,
            clock,
            data: None,
            last_update: None,
            dropped_titles: 0,
        }
    }

    /// Fetch the remote calendar unless it was fetched within the throttle window.
    ///
    /// A transport failure clears the cached dates and still starts a new window. A malformed
    /// response leaves the dates and the window untouched.
    pub async fn refresh(&mut self) -> Result<Refresh> {
        let now = self.clock.now();
        if let Some(last_update) = self.last_update {
            if now - last_update < self.min_time_between_updates {
                debug!("Skipping waste calendar update, last update was at {last_update}");
                return Ok(Refresh::Throttled);
            }
        }
        debug!("Updating waste dates using remote API");
        let body = match self.transport.get(&self.url).await {
            Ok(body) => body,
            Err(err) => {
                error!("Error occurred while fetching data: {err}");
                self.data = None;
                self.last_update = Some(now);
                return Err(err.into());
            }
        };
        let buckets = bucket(parse(&body)?);
        if buckets.dropped() > 0 {
            debug!("Ignored {} entries of unknown categories", buckets.dropped());
        }
        self.dropped_titles += buckets.dropped();
        self.data = Some(next_dates(&buckets, now));
        self.last_update = Some(now);
        Ok(Refresh::Updated)
    }

    /// The next dates of the last successful fetch.
    pub fn data(&self) -> Option<&NextDates> {
        self.data.as_ref()
    }

    pub fn next_date(&self, category: &Category) -> Option<NaiveDateTime> {
        self.data.as_ref()?.get(category).copied()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// The total number of entries ignored for having an unknown title.
    pub fn dropped_titles(&self) -> usize {
        self.dropped_titles
    }
}
