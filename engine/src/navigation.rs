//! The displayed month and the day grid derived from it.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::Serialize;

use crate::bounds::{is_selectable, DateBounds};
use crate::date::{supports_year, CalendarDate, DateFormat, MAX_YEAR, MIN_YEAR};

pub const DAYS_PER_WEEK: usize = 7;
/// Six weeks, so the grid keeps its height from month to month.
pub const GRID_CELLS: usize = 6 * DAYS_PER_WEEK;

/// The month whose grid is on screen. Independent of the selected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewAnchor {
    first: NaiveDate,
}

impl ViewAnchor {
    /// `None` for a month outside 1..=12 or a year outside the navigable range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !supports_year(year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month containing `date`.
    pub fn of(date: CalendarDate) -> Self {
        let naive = date.as_naive();
        Self {
            first: naive.with_day(1).unwrap_or(naive),
        }
    }

    /// Month of the selected date when there is one, otherwise of today.
    pub fn init(selected: Option<CalendarDate>, today: CalendarDate) -> Self {
        Self::of(selected.unwrap_or(today))
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> CalendarDate {
        CalendarDate::from_naive_unchecked(self.first)
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn next_month(self) -> Self {
        self.shifted(|first| first.checked_add_months(Months::new(1)))
    }

    pub fn previous_month(self) -> Self {
        self.shifted(|first| first.checked_sub_months(Months::new(1)))
    }

    pub fn next_year(self) -> Self {
        self.shifted(|first| first.checked_add_months(Months::new(12)))
    }

    pub fn previous_year(self) -> Self {
        self.shifted(|first| first.checked_sub_months(Months::new(12)))
    }

    /// Keeps the month, replaces the year (clamped into the navigable range).
    pub fn jump_to_year(self, year: i32) -> Self {
        let year = year.clamp(MIN_YEAR, MAX_YEAR);
        Self::new(year, self.month()).unwrap_or(self)
    }

    pub fn label(&self, format: &DateFormat) -> String {
        format.format(self.first_day())
    }

    fn shifted(self, step: impl FnOnce(NaiveDate) -> Option<NaiveDate>) -> Self {
        match step(self.first) {
            Some(first) if supports_year(first.year()) => Self { first },
            _ => self,
        }
    }
}

/// First column of the grid. Index 0 is Sunday through 6 for Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekStart(Weekday);

impl WeekStart {
    pub const SUNDAY: WeekStart = WeekStart(Weekday::Sun);
    pub const MONDAY: WeekStart = WeekStart(Weekday::Mon);

    pub fn from_index(index: u8) -> Option<Self> {
        let weekday = match index {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => return None,
        };
        Some(Self(weekday))
    }

    pub fn index(&self) -> u8 {
        self.0.num_days_from_sunday() as u8
    }

    pub fn weekday(&self) -> Weekday {
        self.0
    }

    /// Weekdays in grid column order.
    pub fn columns(&self) -> [Weekday; DAYS_PER_WEEK] {
        let mut columns = [self.0; DAYS_PER_WEEK];
        for i in 1..DAYS_PER_WEEK {
            columns[i] = columns[i - 1].succ();
        }
        columns
    }

    /// Days from the start of the week back to `weekday`.
    fn offset_of(&self, weekday: Weekday) -> u32 {
        (weekday.num_days_from_sunday() + 7 - self.0.num_days_from_sunday()) % 7
    }
}

impl Default for WeekStart {
    fn default() -> Self {
        Self::SUNDAY
    }
}

pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Su",
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: CalendarDate,
    pub in_current_month: bool,
    pub selectable: bool,
    pub is_selected: bool,
    pub is_today: bool,
}

/// Materializes the 42 days shown for `anchor`, starting on the last
/// `week_start` on or before the 1st of the month.
pub fn build_grid(
    anchor: ViewAnchor,
    week_start: WeekStart,
    bounds: &DateBounds,
    selected: Option<CalendarDate>,
    today: CalendarDate,
) -> Vec<CalendarCell> {
    let lead = week_start.offset_of(anchor.first.weekday());
    let start = anchor
        .first
        .checked_sub_days(chrono::Days::new(u64::from(lead)))
        .unwrap_or(anchor.first);

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(CalendarDate::from_naive_unchecked)
        .map(|date| CalendarCell {
            date,
            in_current_month: anchor.contains(date),
            selectable: is_selectable(date, bounds),
            is_selected: selected == Some(date),
            is_today: date == today,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn anchor(y: i32, m: u32) -> ViewAnchor {
        ViewAnchor::new(y, m).unwrap()
    }

    #[test]
    fn init_prefers_selected_over_today() {
        let today = date(2024, 3, 15);
        assert_eq!(ViewAnchor::init(None, today), anchor(2024, 3));
        assert_eq!(
            ViewAnchor::init(Some(date(2021, 11, 2)), today),
            anchor(2021, 11)
        );
    }

    #[test]
    fn month_navigation_rolls_the_year() {
        assert_eq!(anchor(2024, 12).next_month(), anchor(2025, 1));
        assert_eq!(anchor(2025, 1).previous_month(), anchor(2024, 12));
        assert_eq!(anchor(2024, 6).next_month(), anchor(2024, 7));
    }

    #[test]
    fn year_navigation_keeps_the_month() {
        assert_eq!(anchor(2024, 2).next_year(), anchor(2025, 2));
        assert_eq!(anchor(2024, 2).previous_year(), anchor(2023, 2));
        assert_eq!(anchor(2024, 3).jump_to_year(2030), anchor(2030, 3));
    }

    #[test]
    fn navigation_saturates_at_the_supported_range() {
        assert_eq!(anchor(MAX_YEAR, 12).next_month(), anchor(MAX_YEAR, 12));
        assert_eq!(anchor(MIN_YEAR, 1).previous_month(), anchor(MIN_YEAR, 1));
        assert_eq!(anchor(MAX_YEAR, 5).next_year(), anchor(MAX_YEAR, 5));
        assert_eq!(anchor(2024, 5).jump_to_year(120_000), anchor(MAX_YEAR, 5));
        assert_eq!(anchor(2024, 5).jump_to_year(-3), anchor(MIN_YEAR, 5));
    }

    #[test]
    fn edge_dates_appear_in_their_own_month() {
        for d in [date(MIN_YEAR, 1, 1), date(MAX_YEAR, 12, 31)] {
            let anchor = ViewAnchor::of(d);
            assert!(anchor.contains(d));
            let grid = build_grid(anchor, WeekStart::SUNDAY, &DateBounds::unbounded(), Some(d), d);
            let cell = grid.iter().find(|c| c.date == d).unwrap();
            assert!(cell.in_current_month);
            assert!(cell.is_selected);
            assert!(cell.selectable);
        }
    }

    #[test]
    fn padding_outside_the_supported_years_is_not_selectable() {
        let today = date(2024, 3, 15);
        // January 1st of year 1 is a Monday; December 31st 9999 is a Friday.
        let first = build_grid(
            anchor(MIN_YEAR, 1),
            WeekStart::SUNDAY,
            &DateBounds::unbounded(),
            None,
            today,
        );
        assert_eq!(first.len(), GRID_CELLS);
        assert!(!first[0].date.is_supported());
        assert!(!first[0].selectable);
        assert_eq!(first[1].date, date(MIN_YEAR, 1, 1));

        let last = build_grid(
            anchor(MAX_YEAR, 12),
            WeekStart::SUNDAY,
            &DateBounds::unbounded(),
            None,
            today,
        );
        assert_eq!(last.len(), GRID_CELLS);
        let spill: Vec<_> = last.iter().filter(|c| !c.date.is_supported()).collect();
        assert!(!spill.is_empty());
        assert!(spill.iter().all(|c| !c.selectable && !c.in_current_month));
        assert!(last.iter().filter(|c| c.in_current_month).all(|c| c.selectable));
    }

    #[test]
    fn new_rejects_bad_months_and_years() {
        assert!(ViewAnchor::new(2024, 0).is_none());
        assert!(ViewAnchor::new(2024, 13).is_none());
        assert!(ViewAnchor::new(0, 1).is_none());
        assert!(ViewAnchor::new(MAX_YEAR + 1, 1).is_none());
    }

    #[test]
    fn label_uses_format() {
        let format = DateFormat::for_labels("%B %Y").unwrap();
        assert_eq!(anchor(2024, 3).label(&format), "March 2024");
    }

    #[test]
    fn grid_starts_on_week_start_and_has_42_cells() {
        // March 1st 2024 is a Friday.
        let grid = build_grid(
            anchor(2024, 3),
            WeekStart::SUNDAY,
            &DateBounds::unbounded(),
            None,
            date(2024, 3, 15),
        );
        assert_eq!(grid.len(), GRID_CELLS);
        assert_eq!(grid[0].date, date(2024, 2, 25));
        assert!(!grid[0].in_current_month);
        assert_eq!(grid[5].date, date(2024, 3, 1));
        assert!(grid[5].in_current_month);
        assert_eq!(grid[41].date, date(2024, 4, 6));

        let monday_grid = build_grid(
            anchor(2024, 3),
            WeekStart::MONDAY,
            &DateBounds::unbounded(),
            None,
            date(2024, 3, 15),
        );
        assert_eq!(monday_grid[0].date, date(2024, 2, 26));
        assert_eq!(monday_grid[4].date, date(2024, 3, 1));
    }

    #[test]
    fn grid_begins_on_the_first_when_it_matches_week_start() {
        // September 1st 2024 is a Sunday.
        let grid = build_grid(
            anchor(2024, 9),
            WeekStart::SUNDAY,
            &DateBounds::unbounded(),
            None,
            date(2024, 9, 1),
        );
        assert_eq!(grid[0].date, date(2024, 9, 1));
        assert!(grid[0].is_today);
    }

    #[test]
    fn grid_flags_selection_today_and_bounds() {
        let bounds = DateBounds::between(date(2024, 3, 10), date(2024, 3, 20));
        let grid = build_grid(
            anchor(2024, 3),
            WeekStart::SUNDAY,
            &bounds,
            Some(date(2024, 3, 12)),
            date(2024, 3, 15),
        );
        let cell = |d: CalendarDate| grid.iter().find(|c| c.date == d).copied().unwrap();

        assert!(cell(date(2024, 3, 12)).is_selected);
        assert_eq!(grid.iter().filter(|c| c.is_selected).count(), 1);
        assert!(cell(date(2024, 3, 15)).is_today);
        assert!(!cell(date(2024, 3, 9)).selectable);
        assert!(cell(date(2024, 3, 10)).selectable);
        assert!(cell(date(2024, 3, 20)).selectable);
        assert!(!cell(date(2024, 3, 21)).selectable);
    }

    #[test]
    fn columns_follow_week_start() {
        let columns = WeekStart::from_index(6).unwrap().columns();
        assert_eq!(columns[0], Weekday::Sat);
        assert_eq!(columns[1], Weekday::Sun);
        assert_eq!(columns[6], Weekday::Fri);
        assert!(WeekStart::from_index(7).is_none());
        assert_eq!(WeekStart::MONDAY.index(), 1);
    }
}
