use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{routing::get, Router};
use clap::Parser;
use log::info;
use tokio::sync::Mutex;
use wgc_core::{
    calendar::WasteCalendar,
    category::Category,
    config::{CalendarConfig, DEFAULT_URL},
    sensor::Locale,
    setup::setup_with,
};

mod route;
mod scheduler;

#[derive(Debug, Parser)]
pub struct Arguments {
    /// the waste categories to expose, unknown ones never get a date
    #[arg(default_values_t = Category::KNOWN.map(|category| category.key().to_string()))]
    pub resources: Vec<String>,
    /// the event list of the waste calendar
    #[arg(long, env = "WGC_URL", default_value = DEFAULT_URL)]
    pub url: String,
    /// request timeout in seconds
    #[arg(long, env = "WGC_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,
    /// language of the display text, `de` or `en`
    #[arg(long, env = "WGC_LOCALE", default_value = "de")]
    pub locale: Locale,
    /// the port to listen on
    #[arg(long, env = "WGC_PORT", default_value_t = 8008)]
    pub port: u16,
    /// seconds between two sensor updates
    #[arg(long, env = "WGC_SCAN_INTERVAL", default_value_t = 30)]
    pub scan_interval: u64,
}

impl From<&Arguments> for CalendarConfig {
    fn from(value: &Arguments) -> Self {
        CalendarConfig {
            url: value.url.clone(),
            timeout: Duration::from_secs(value.timeout),
            locale: value.locale,
            ..CalendarConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Arguments::parse();
    let config = CalendarConfig::from(&args);
    let calendar = Arc::new(Mutex::new(WasteCalendar::new(&config)?));
    let sensors = setup_with(calendar.clone(), config.locale, &args.resources).await?;
    let state = route::AppState {
        calendar,
        sensors: Arc::new(Mutex::new(sensors)),
        url: Arc::from(config.url.as_str()),
    };
    tokio::spawn(scheduler::run(
        state.calendar.clone(),
        state.sensors.clone(),
        Duration::from_secs(args.scan_interval),
    ));
    let app = Router::new()
        .route("/sensors", get(route::sensors::list))
        .route("/sensors/:key", get(route::sensors::show))
        .route("/calendar", get(route::calendar::handler))
        .with_state(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Listening on {addr}");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
