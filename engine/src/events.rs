//! Outputs a picker reports to its host.

use serde::Serialize;

use crate::date::CalendarDate;
use crate::error::InputError;

/// Receives picker output in the order transitions happen.
///
/// `on_change` carries only the `Valid`/`Empty` projection; rejected input is
/// reported through `on_validation_error` and leaves the last value in place.
pub trait DatePickerEvents {
    fn on_change(&mut self, value: Option<CalendarDate>);

    fn on_validation_error(&mut self, error: &InputError);

    /// The user picked a day; the overlay that shows the grid should close.
    fn on_request_close(&mut self);
}

impl DatePickerEvents for () {
    fn on_change(&mut self, _value: Option<CalendarDate>) {}

    fn on_validation_error(&mut self, _error: &InputError) {}

    fn on_request_close(&mut self) {}
}

impl<T: DatePickerEvents + ?Sized> DatePickerEvents for &mut T {
    fn on_change(&mut self, value: Option<CalendarDate>) {
        (**self).on_change(value)
    }

    fn on_validation_error(&mut self, error: &InputError) {
        (**self).on_validation_error(error)
    }

    fn on_request_close(&mut self) {
        (**self).on_request_close()
    }
}

impl<T: DatePickerEvents + ?Sized> DatePickerEvents for Box<T> {
    fn on_change(&mut self, value: Option<CalendarDate>) {
        (**self).on_change(value)
    }

    fn on_validation_error(&mut self, error: &InputError) {
        (**self).on_validation_error(error)
    }

    fn on_request_close(&mut self) {
        (**self).on_request_close()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum PickerEvent {
    Change(Option<CalendarDate>),
    ValidationError { code: String, message: String },
    RequestClose,
}

/// Records every event; drained by hosts that poll instead of reacting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<PickerEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PickerEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn take(&mut self) -> Vec<PickerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn changes(&self) -> Vec<Option<CalendarDate>> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PickerEvent::Change(value) => Some(*value),
                _ => None,
            })
            .collect()
    }

    pub fn validation_errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PickerEvent::ValidationError { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn validation_codes(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PickerEvent::ValidationError { code, .. } => Some(code.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn close_requests(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, PickerEvent::RequestClose))
            .count()
    }
}

impl DatePickerEvents for EventLog {
    fn on_change(&mut self, value: Option<CalendarDate>) {
        self.events.push(PickerEvent::Change(value));
    }

    fn on_validation_error(&mut self, error: &InputError) {
        self.events.push(PickerEvent::ValidationError {
            code: error.code().to_string(),
            message: error.to_string(),
        });
    }

    fn on_request_close(&mut self) {
        self.events.push(PickerEvent::RequestClose);
    }
}
