//! The date picker: owns the selection, reconciles typed text and grid picks
//! into one value, and reports changes to the host.

use serde::Serialize;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::bounds::{is_selectable, DateBounds};
use crate::date::{CalendarDate, DateFormat};
use crate::error::{ConfigError, DegenerateBounds, InputError};
use crate::events::DatePickerEvents;
use crate::navigation::{build_grid, weekday_label, CalendarCell, ViewAnchor, WeekStart};
use crate::options::DatePickerOptions;
use crate::selection::SelectionState;

pub struct DatePicker<E> {
    bounds: DateBounds,
    enable_clear: bool,
    enable_year_navigation: bool,
    week_start: WeekStart,
    display_format: DateFormat,
    label_format: DateFormat,
    required: bool,
    disabled: bool,
    placeholder: Option<String>,
    label: Option<String>,
    today: CalendarDate,
    anchor: ViewAnchor,
    state: SelectionState,
    /// Last value reported to the host through `on_change`.
    committed: Option<CalendarDate>,
    touched: bool,
    external_error: Option<String>,
    events: E,
}

/// One serializable view of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatePickerSnapshot {
    pub value: Option<CalendarDate>,
    pub display_text: String,
    pub anchor_year: i32,
    pub anchor_month: u32,
    pub anchor_label: String,
    pub weekday_labels: Vec<&'static str>,
    pub grid: Vec<CalendarCell>,
    pub validation_message: Option<String>,
    pub placeholder: Option<String>,
    pub label: Option<String>,
    pub enable_clear: bool,
    pub enable_year_navigation: bool,
    pub disabled: bool,
    pub required: bool,
}

impl<E: DatePickerEvents> DatePicker<E> {
    /// `today` is read once here and never refreshed, so a long-lived picker
    /// does not change behavior at midnight.
    pub fn new(
        options: DatePickerOptions,
        today: CalendarDate,
        events: E,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let display_format = DateFormat::new(&options.display_format)?;
        let label_format = DateFormat::for_labels(&options.anchor_label_format)?;
        // `validate` has already bounded `week_start` to 0..=6.
        let week_start = WeekStart::from_index(options.week_start).unwrap_or_default();

        if let Err(warning) = options.bounds.check() {
            warn!(%warning, "date picker created with degenerate bounds");
        }

        let state = match options.value {
            None => SelectionState::Empty,
            Some(date) if is_selectable(date, &options.bounds) => SelectionState::Valid(date),
            Some(date) => SelectionState::Invalid {
                text: display_format.format(date),
                error: InputError::OutOfRange {
                    date,
                    bounds: options.bounds,
                },
            },
        };

        info!(
            value = ?options.value,
            today = %today,
            display_format = display_format.pattern(),
            state = state.kind(),
            "date picker initialized"
        );

        Ok(Self {
            bounds: options.bounds,
            enable_clear: options.enable_clear,
            enable_year_navigation: options.enable_year_navigation,
            week_start,
            display_format,
            label_format,
            required: options.required,
            disabled: options.disabled,
            placeholder: options.placeholder,
            label: options.label,
            today,
            anchor: ViewAnchor::init(options.value, today),
            state,
            committed: options.value,
            touched: false,
            external_error: None,
            events,
        })
    }

    /// Reconciles the input box text. Runs on every keystroke; a partial
    /// entry is just another parse failure.
    pub fn on_text_changed(&mut self, text: &str) {
        if self.disabled {
            return;
        }
        self.touched = true;

        if text.trim().is_empty() {
            self.transition(SelectionState::Empty);
            self.commit(None);
            if self.required {
                self.events.on_validation_error(&InputError::Required);
            }
            return;
        }

        match self.display_format.parse(text) {
            None => {
                let error = InputError::Parse {
                    text: text.to_string(),
                    expected: self.display_format.example(),
                };
                self.reject(text.to_string(), error);
            }
            Some(date) if !is_selectable(date, &self.bounds) => {
                let error = InputError::OutOfRange {
                    date,
                    bounds: self.bounds,
                };
                self.reject(text.to_string(), error);
            }
            Some(date) => self.accept(date),
        }
    }

    /// A click on a grid cell. Bounds are checked again since a click can
    /// race a bounds update; a stale click is reported and otherwise ignored.
    pub fn on_cell_picked(&mut self, date: CalendarDate) {
        if self.disabled {
            return;
        }
        if !is_selectable(date, &self.bounds) {
            warn!(%date, "pick of a date outside the selectable range ignored");
            self.events.on_validation_error(&InputError::OutOfRange {
                date,
                bounds: self.bounds,
            });
            return;
        }
        self.touched = true;
        self.accept(date);
        self.events.on_request_close();
    }

    /// Returns `false` (and does nothing) unless clearing is enabled.
    pub fn on_clear(&mut self) -> bool {
        if !self.enable_clear || self.disabled {
            return false;
        }
        self.touched = true;
        self.transition(SelectionState::Empty);
        self.commit(None);
        if self.required {
            self.events.on_validation_error(&InputError::Required);
        }
        true
    }

    /// Installs new bounds and re-validates the current selection against them.
    pub fn on_bounds_changed(&mut self, bounds: DateBounds) {
        if let Err(warning) = bounds.check() {
            warn!(%warning, "degenerate bounds installed");
        }
        debug!(min = ?bounds.min, max = ?bounds.max, "bounds changed");
        self.bounds = bounds;

        match self.state.clone() {
            SelectionState::Valid(date) if !is_selectable(date, &bounds) => {
                let text = self.display_format.format(date);
                self.reject(text, InputError::OutOfRange { date, bounds });
            }
            SelectionState::Invalid {
                text,
                error: previous @ InputError::OutOfRange { .. },
            } => match self.display_format.parse(&text) {
                Some(date) if is_selectable(date, &bounds) => self.accept(date),
                Some(date) => {
                    let error = InputError::OutOfRange { date, bounds };
                    if error != previous {
                        self.reject(text, error);
                    }
                }
                None => {}
            },
            _ => {}
        }
    }

    /// Replaces the value from the host side (e.g. a form reset). The host
    /// already knows the value, so nothing is emitted.
    pub fn reset(&mut self, value: Option<CalendarDate>) {
        let state = match value {
            None => SelectionState::Empty,
            Some(date) if is_selectable(date, &self.bounds) => SelectionState::Valid(date),
            Some(date) => SelectionState::Invalid {
                text: self.display_format.format(date),
                error: InputError::OutOfRange {
                    date,
                    bounds: self.bounds,
                },
            },
        };
        self.transition(state);
        self.committed = value;
        self.touched = false;
        if let Some(date) = value {
            self.anchor = ViewAnchor::of(date);
        }
    }

    pub fn next_month(&mut self) -> bool {
        self.navigate(ViewAnchor::next_month)
    }

    pub fn previous_month(&mut self) -> bool {
        self.navigate(ViewAnchor::previous_month)
    }

    pub fn next_year(&mut self) -> bool {
        self.enable_year_navigation && self.navigate(ViewAnchor::next_year)
    }

    pub fn previous_year(&mut self) -> bool {
        self.enable_year_navigation && self.navigate(ViewAnchor::previous_year)
    }

    pub fn jump_to_year(&mut self, year: i32) -> bool {
        self.enable_year_navigation && self.navigate(|anchor| anchor.jump_to_year(year))
    }

    pub fn go_to_today(&mut self) -> bool {
        let today = self.today;
        self.navigate(|_| ViewAnchor::of(today))
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// A message supplied by the host form, shown when the picker has no
    /// error of its own.
    pub fn set_external_error(&mut self, message: Option<String>) {
        self.external_error = message;
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The value last reported to the host.
    pub fn value(&self) -> Option<CalendarDate> {
        self.committed
    }

    pub fn anchor(&self) -> ViewAnchor {
        self.anchor
    }

    pub fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn grid(&self) -> Vec<CalendarCell> {
        build_grid(
            self.anchor,
            self.week_start,
            &self.bounds,
            self.state.selected(),
            self.today,
        )
    }

    pub fn anchor_label(&self) -> String {
        self.anchor.label(&self.label_format)
    }

    pub fn display_text(&self) -> String {
        self.state.display_text(&self.display_format)
    }

    pub fn weekday_labels(&self) -> Vec<&'static str> {
        self.week_start
            .columns()
            .into_iter()
            .map(weekday_label)
            .collect()
    }

    pub fn validation_error(&self) -> Option<InputError> {
        if let Some(error) = self.state.error() {
            return Some(error.clone());
        }
        if self.required && self.touched && self.state.is_empty() {
            return Some(InputError::Required);
        }
        None
    }

    pub fn validation_message(&self) -> Option<String> {
        self.validation_error()
            .map(|error| error.to_string())
            .or_else(|| self.external_error.clone())
    }

    /// Host misconfiguration check; never surfaced to the end user.
    pub fn diagnostics(&self) -> Option<DegenerateBounds> {
        self.bounds.check().err()
    }

    pub fn snapshot(&self) -> DatePickerSnapshot {
        DatePickerSnapshot {
            value: self.committed,
            display_text: self.display_text(),
            anchor_year: self.anchor.year(),
            anchor_month: self.anchor.month(),
            anchor_label: self.anchor_label(),
            weekday_labels: self.weekday_labels(),
            grid: self.grid(),
            validation_message: self.validation_message(),
            placeholder: self.placeholder.clone(),
            label: self.label.clone(),
            enable_clear: self.enable_clear,
            enable_year_navigation: self.enable_year_navigation,
            disabled: self.disabled,
            required: self.required,
        }
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn into_events(self) -> E {
        self.events
    }

    fn accept(&mut self, date: CalendarDate) {
        self.transition(SelectionState::Valid(date));
        if !self.anchor.contains(date) {
            self.anchor = ViewAnchor::of(date);
            debug!(
                year = self.anchor.year(),
                month = self.anchor.month(),
                "anchor snapped to selection"
            );
        }
        self.commit(Some(date));
    }

    fn reject(&mut self, text: String, error: InputError) {
        debug!(code = error.code(), %error, "input rejected");
        self.transition(SelectionState::Invalid {
            text,
            error: error.clone(),
        });
        self.events.on_validation_error(&error);
    }

    fn transition(&mut self, next: SelectionState) {
        if self.state != next {
            debug!(from = self.state.kind(), to = next.kind(), "selection transition");
            self.state = next;
        }
    }

    fn commit(&mut self, value: Option<CalendarDate>) {
        if self.committed != value {
            self.committed = value;
            self.events.on_change(value);
        }
    }

    fn navigate(&mut self, step: impl FnOnce(ViewAnchor) -> ViewAnchor) -> bool {
        if self.disabled {
            return false;
        }
        let next = step(self.anchor);
        if next != self.anchor {
            debug!(year = next.year(), month = next.month(), "calendar navigated");
            self.anchor = next;
        }
        true
    }
}
