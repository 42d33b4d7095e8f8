use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use wgc_core::{calendar_client::NextDates, ical::generator::Emitter, ical_export};

use crate::route::AppState;

/// Handle calendar requests.
///
/// The calendar contains the next collection of every sensor which has one.
pub async fn handler(State(state): State<AppState>) -> Response {
    let next_dates: NextDates = state
        .sensors
        .lock()
        .await
        .iter()
        .filter_map(|sensor| Some((sensor.category().clone(), sensor.state()?)))
        .collect();
    let ical_calendar = ical_export::get_calendar(&next_dates, &state.url);
    ([(CONTENT_TYPE, "text/calendar")], ical_calendar.generate()).into_response()
}
