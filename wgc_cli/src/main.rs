use std::{env::current_dir, fs::write, sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use log::info;
use tokio::sync::Mutex;
use wgc_core::{
    calendar::WasteCalendar,
    calendar_client::{HttpTransport, NextDates},
    category::Category,
    clock::{Clock, FixedClock, SystemClock},
    config::{CalendarConfig, DEFAULT_URL},
    ical::generator::Emitter,
    ical_export,
    sensor::{Locale, WasteSensor},
    setup::setup_with,
};

#[derive(Debug, Parser)]
pub struct Arguments {
    /// the waste categories to show, unknown ones are shown without a date
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
    /// evaluate the calendar at this local time instead of now, e.g. `2019-01-06T08:00:00`
    #[arg(long)]
    pub now: Option<chrono::NaiveDateTime>,
    /// print the sensors as JSON
    #[arg(long)]
    pub json: bool,
    /// also write the next collections to `calendar.ics`
    #[arg(long)]
    pub ics: bool,
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

fn print(sensors: &[WasteSensor], json: bool) -> Result<()> {
    if json {
        let snapshots: Vec<_> = sensors.iter().map(WasteSensor::snapshot).collect();
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
        return Ok(());
    }
    for sensor in sensors {
        let display_text = sensor
            .attributes()
            .map(|attributes| attributes.display_text.as_str())
            .unwrap_or("-");
        println!("{}: {}", sensor.name(), display_text);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Arguments::parse();
    let config = CalendarConfig::from(&args);
    let clock: Arc<dyn Clock> = match args.now {
        Some(now) => Arc::new(FixedClock(now)),
        None => Arc::new(SystemClock),
    };
    let transport = HttpTransport::new(config.timeout)?;
    let calendar = WasteCalendar::with_transport(&config, Box::new(transport), clock);
    let calendar = Arc::new(Mutex::new(calendar));
    let mut sensors = setup_with(calendar, config.locale, &args.resources).await?;
    for sensor in &mut sensors {
        sensor.update().await?;
    }
    print(&sensors, args.json)?;
    if args.ics {
        let next_dates: NextDates = sensors
            .iter()
            .filter_map(|sensor| Some((sensor.category().clone(), sensor.state()?)))
            .collect();
        let calendar = ical_export::get_calendar(&next_dates, &config.url);
        let mut path = current_dir()?;
        path.push("calendar.ics");
        write(&path, calendar.generate())?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use wgc_core::{config::CalendarConfig, sensor::Locale};

    use crate::Arguments;

    #[test]
    fn test_arguments_defaults() {
        let args = Arguments::try_parse_from(["wgc_cli"]).unwrap();
        assert_eq!(
            args.resources,
            ["gelbersack", "restabfall", "papiertonne", "biotonne"]
        );
        let config = CalendarConfig::from(&args);
        assert_eq!(config.locale, Locale::German);
        assert_eq!(config.min_time_between_updates, chrono::Duration::days(1));
    }

    #[test]
    fn test_arguments() {
        let args = Arguments::try_parse_from([
            "wgc_cli",
            "biotonne",
            "glass",
            "--locale",
            "en",
            "--timeout",
            "5",
            "--now",
            "2019-01-06T08:00:00",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.resources, ["biotonne", "glass"]);
        assert_eq!(args.locale, Locale::English);
        assert!(args.json);
        assert!(args.now.is_some());
        let config = CalendarConfig::from(&args);
        assert_eq!(config.timeout, std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_arguments_unknown_locale() {
        assert!(Arguments::try_parse_from(["wgc_cli", "--locale", "fr"]).is_err());
    }
}
