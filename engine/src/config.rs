use anyhow::{anyhow, Context};
use chrono::Local;
use datepicker_engine::{CalendarDate, DateBounds, DatePickerOptions};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub options: DatePickerOptions,
    pub today: CalendarDate,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = DatePickerOptions::default();

        let today = match optional_date("DATEPICKER_TODAY")? {
            Some(date) => date,
            None => CalendarDate::try_from(Local::now().date_naive())
                .context("Local date is outside the supported range")?,
        };

        let bounds = DateBounds {
            min: optional_date("DATEPICKER_MIN")?,
            max: optional_date("DATEPICKER_MAX")?,
        };

        let week_start = match env::var("DATEPICKER_WEEK_START") {
            Ok(raw) => raw
                .trim()
                .parse::<u8>()
                .with_context(|| format!("Invalid DATEPICKER_WEEK_START value: {raw}"))?,
            Err(_) => defaults.week_start,
        };

        let options = DatePickerOptions {
            value: optional_date("DATEPICKER_VALUE")?,
            bounds,
            enable_clear: flag("DATEPICKER_ENABLE_CLEAR", true)?,
            enable_year_navigation: flag("DATEPICKER_ENABLE_YEAR_NAVIGATION", true)?,
            week_start,
            display_format: env::var("DATEPICKER_FORMAT").unwrap_or(defaults.display_format),
            anchor_label_format: env::var("DATEPICKER_LABEL_FORMAT")
                .unwrap_or(defaults.anchor_label_format),
            required: flag("DATEPICKER_REQUIRED", false)?,
            disabled: false,
            placeholder: env::var("DATEPICKER_PLACEHOLDER").ok(),
            label: env::var("DATEPICKER_LABEL").ok(),
        };

        Ok(Config { options, today })
    }
}

fn optional_date(name: &str) -> anyhow::Result<Option<CalendarDate>> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .parse::<CalendarDate>()
            .map(Some)
            .map_err(|_| anyhow!("Invalid {} value (expected YYYY-MM-DD): {}", name, raw)),
        Err(_) => Ok(None),
    }
}

fn flag(name: &str, default: bool) -> anyhow::Result<bool> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(anyhow!("Invalid {} value: {}", name, raw)),
        },
        Err(_) => Ok(default),
    }
}
