//! Date-selection engine behind the date picker field.
//!
//! Decides which dates are selectable, drives calendar navigation, and
//! reconciles typed text and grid picks into a single value reported to the
//! host form. Rendering, overlays and form state live with the host; the
//! engine only exposes queries ([`DatePicker::grid`],
//! [`DatePicker::anchor_label`], [`DatePicker::display_text`]) and events
//! ([`DatePickerEvents`]).

pub mod bounds;
pub mod date;
pub mod error;
pub mod events;
pub mod navigation;
pub mod options;
pub mod picker;
pub mod selection;

pub use bounds::{is_selectable, DateBounds};
pub use date::{CalendarDate, DateFormat, MAX_YEAR, MIN_YEAR};
pub use error::{ConfigError, DateError, DegenerateBounds, InputError};
pub use events::{DatePickerEvents, EventLog, PickerEvent};
pub use navigation::{build_grid, CalendarCell, ViewAnchor, WeekStart, GRID_CELLS};
pub use options::DatePickerOptions;
pub use picker::{DatePicker, DatePickerSnapshot};
pub use selection::SelectionState;
