use crate::date::{CalendarDate, DateFormat};
use crate::error::InputError;

/// What the picker currently holds.
///
/// `Invalid` keeps the raw text so the input box can show it back unchanged,
/// together with the reason it was rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Empty,
    Valid(CalendarDate),
    Invalid {
        text: String,
        error: InputError,
    },
}

impl SelectionState {
    pub fn selected(&self) -> Option<CalendarDate> {
        match self {
            SelectionState::Valid(date) => Some(*date),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SelectionState::Empty)
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, SelectionState::Valid(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, SelectionState::Invalid { .. })
    }

    pub fn error(&self) -> Option<&InputError> {
        match self {
            SelectionState::Invalid { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Text for the input box.
    pub fn display_text(&self, format: &DateFormat) -> String {
        match self {
            SelectionState::Empty => String::new(),
            SelectionState::Valid(date) => format.format(*date),
            SelectionState::Invalid { text, .. } => text.clone(),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            SelectionState::Empty => "empty",
            SelectionState::Valid(_) => "valid",
            SelectionState::Invalid { .. } => "invalid",
        }
    }
}
