//! Constraint evaluation: which calendar dates a picker may select.

use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::DegenerateBounds;

/// Inclusive minimum and/or maximum selectable date.
///
/// A `min` after `max` is accepted and makes every date unselectable; use
/// [`DateBounds::check`] to detect it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateBounds {
    pub min: Option<CalendarDate>,
    pub max: Option<CalendarDate>,
}

impl DateBounds {
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub const fn between(min: CalendarDate, max: CalendarDate) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn at_least(min: CalendarDate) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub const fn at_most(max: CalendarDate) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Only dates strictly after `today` ("must be in the future").
    pub fn after_today(today: CalendarDate) -> Self {
        match today.succ() {
            Some(tomorrow) => Self::at_least(tomorrow),
            None => Self::between(today, today),
        }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        is_selectable(date, self)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn check(&self) -> Result<(), DegenerateBounds> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => Err(DegenerateBounds { min, max }),
            _ => Ok(()),
        }
    }
}

pub fn is_selectable(date: CalendarDate, bounds: &DateBounds) -> bool {
    if !date.is_supported() {
        return false;
    }
    if bounds.min.is_some_and(|min| date < min) {
        return false;
    }
    if bounds.max.is_some_and(|max| date > max) {
        return false;
    }
    true
}
