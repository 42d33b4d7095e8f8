//! Periodically update all sensors, like a home automation host would.

use std::time::Duration;

use log::error;
use wgc_core::sensor::{refresh_calendar, SharedCalendar};

use crate::route::Sensors;

pub async fn run(calendar: SharedCalendar, sensors: Sensors, scan_interval: Duration) {
    let mut interval = tokio::time::interval(scan_interval);
    loop {
        interval.tick().await;
        update_all(&calendar, &sensors).await;
    }
}

/// Refresh the shared calendar once, then take its dates over into every sensor.
///
/// The sensors are only locked after the fetch, so readers never wait for the remote calendar.
pub async fn update_all(calendar: &SharedCalendar, sensors: &Sensors) {
    if let Err(err) = refresh_calendar(calendar).await {
        error!("Updating the waste calendar failed: {err}");
        return;
    }
    for sensor in sensors.lock().await.iter_mut() {
        sensor.sync().await;
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use async_trait::async_trait;
    use axum::extract::State;
    use tokio::sync::{Mutex, Notify};
    use wgc_core::{
        calendar::WasteCalendar,
        calendar_client::Transport,
        category::Category,
        clock::SystemClock,
        config::CalendarConfig,
        error::TransportError,
        sensor::{Locale, WasteSensor},
    };

    use crate::{route::sensors::list, route::AppState, scheduler::update_all};

    /// Fails once the test lets it.
    struct StalledTransport {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl Transport for StalledTransport {
        async fn get(&self, _url: &str) -> Result<String, TransportError> {
            self.started.notify_one();
            self.release.notified().await;
            Err(TransportError::Other(String::from("down")))
        }
    }

    #[tokio::test]
    async fn test_update_all_does_not_block_readers() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let transport = StalledTransport {
            started: started.clone(),
            release: release.clone(),
        };
        let calendar = Arc::new(Mutex::new(WasteCalendar::with_transport(
            &CalendarConfig::default(),
            Box::new(transport),
            Arc::new(SystemClock),
        )));
        let sensors: Vec<WasteSensor> = [Category::GelberSack, Category::Papiertonne]
            .into_iter()
            .map(|category| WasteSensor::new(calendar.clone(), category, Locale::German))
            .collect();
        let state = AppState {
            calendar: calendar.clone(),
            sensors: Arc::new(Mutex::new(sensors)),
            url: Arc::from("https://example.org/calendar"),
        };

        let update = tokio::spawn({
            let state = state.clone();
            async move { update_all(&state.calendar, &state.sensors).await }
        });
        started.notified().await;
        let snapshots = tokio::time::timeout(Duration::from_millis(500), list(State(state.clone())))
            .await
            .expect("listing sensors waited for the remote calendar")
            .0;
        assert_eq!(snapshots.len(), 2);

        release.notify_one();
        update.await.unwrap();
        let snapshots = list(State(state)).await.0;
        assert!(snapshots.iter().all(|snapshot| snapshot.state.is_none()));
    }
}
