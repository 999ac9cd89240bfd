use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::bounds::DateBounds;
use crate::date::{CalendarDate, ISO_FORMAT};

pub const DEFAULT_ANCHOR_LABEL_FORMAT: &str = "%B %Y";

/// Everything a host passes when it mounts a picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DatePickerOptions {
    pub value: Option<CalendarDate>,
    pub bounds: DateBounds,
    pub enable_clear: bool,
    pub enable_year_navigation: bool,
    /// 0 = Sunday .. 6 = Saturday.
    #[validate(range(max = 6))]
    pub week_start: u8,
    /// strftime pattern for the input box; must round-trip.
    #[validate(length(min = 1))]
    pub display_format: String,
    #[validate(length(min = 1))]
    pub anchor_label_format: String,
    pub required: bool,
    pub disabled: bool,
    pub placeholder: Option<String>,
    pub label: Option<String>,
}

impl Default for DatePickerOptions {
    fn default() -> Self {
        Self {
            value: None,
            bounds: DateBounds::unbounded(),
            enable_clear: false,
            enable_year_navigation: false,
            week_start: 0,
            display_format: ISO_FORMAT.to_string(),
            anchor_label_format: DEFAULT_ANCHOR_LABEL_FORMAT.to_string(),
            required: false,
            disabled: false,
            placeholder: None,
            label: None,
        }
    }
}
