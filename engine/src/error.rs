use thiserror::Error;

use crate::bounds::DateBounds;
use crate::date::CalendarDate;

/// Recoverable input errors. The engine never returns these; it settles into
/// an `Invalid` (or `Empty`) state and reports them through
/// [`DatePickerEvents::on_validation_error`](crate::events::DatePickerEvents::on_validation_error).
/// `Display` is the message meant for the end user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("\"{text}\" is not a valid date. Use a date like {expected}.")]
    Parse { text: String, expected: String },

    #[error("{}", describe_out_of_range(.date, .bounds))]
    OutOfRange {
        date: CalendarDate,
        bounds: DateBounds,
    },

    #[error("A date is required.")]
    Required,
}

impl InputError {
    pub fn code(&self) -> &'static str {
        match self {
            InputError::Parse { .. } => "PARSE_ERROR",
            InputError::OutOfRange { .. } => "OUT_OF_RANGE",
            InputError::Required => "REQUIRED",
        }
    }
}

fn describe_out_of_range(date: &CalendarDate, bounds: &DateBounds) -> String {
    match (bounds.min, bounds.max) {
        (Some(min), _) if *date < min => {
            format!("{date} is before the earliest allowed date ({min}).")
        }
        (_, Some(max)) if *date > max => {
            format!("{date} is after the latest allowed date ({max}).")
        }
        _ => format!("{date} is outside the allowed range."),
    }
}

/// Text or a `NaiveDate` that cannot become a [`CalendarDate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("not a YYYY-MM-DD date: {0}")]
    Parse(#[from] chrono::ParseError),

    #[error("year {0} is outside the supported range 1..=9999")]
    YearOutOfRange(i32),
}

/// Bounds whose minimum lies after their maximum. Nothing is selectable, which
/// is a host misconfiguration rather than a user error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("minimum {min} is after maximum {max}; no date is selectable")]
pub struct DegenerateBounds {
    pub min: CalendarDate,
    pub max: CalendarDate,
}

/// Options rejected when a picker is created.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid display format `{pattern}`: {reason}")]
    DisplayFormat { pattern: String, reason: String },

    #[error("invalid anchor label format `{0}`")]
    LabelFormat(String),

    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),
}
