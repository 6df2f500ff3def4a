//! Month-grid date picker.
//!
//! Always a 6x7 grid starting on Sunday. Leading and trailing cells belong to
//! the neighboring months and are visible but not selectable.

use chrono::{Datelike, Duration, NaiveDate};

use viewer_common::{next_month, prev_month, ViewerError, ViewerResult};

pub const GRID_CELLS: usize = 42;

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for leading/trailing cells from the neighboring months.
    pub in_month: bool,
    pub selected: bool,
    pub today: bool,
}

/// A rendered month of the date picker.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Build the grid for one month.
    pub fn build(
        year: i32,
        month: u32,
        selected: Option<NaiveDate>,
        today: NaiveDate,
    ) -> ViewerResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            ViewerError::Domain(format!("Invalid calendar month: {}-{}", year, month))
        })?;

        let lead = first.weekday().num_days_from_sunday() as i64;
        let start = first - Duration::days(lead);

        let cells = (0..GRID_CELLS as i64)
            .map(|offset| {
                let date = start + Duration::days(offset);
                DayCell {
                    date,
                    in_month: date.year() == year && date.month() == month,
                    selected: selected == Some(date),
                    today: date == today,
                }
            })
            .collect();

        Ok(Self { year, month, cells })
    }

    /// Header title, e.g. "August 2025".
    pub fn title(&self) -> String {
        const MONTHS: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        format!("{} {}", MONTHS[(self.month - 1) as usize], self.year)
    }

    /// Handle a click on cell `index`: other-month cells do nothing.
    pub fn click(&self, index: usize) -> Option<NaiveDate> {
        let cell = self.cells.get(index)?;
        cell.in_month.then_some(cell.date)
    }

    /// The grid for the previous month, selection and today carried over.
    pub fn prev(&self, selected: Option<NaiveDate>, today: NaiveDate) -> ViewerResult<Self> {
        let (year, month) = prev_month(self.year, self.month);
        Self::build(year, month, selected, today)
    }

    /// The grid for the next month, selection and today carried over.
    pub fn next(&self, selected: Option<NaiveDate>, today: NaiveDate) -> ViewerResult<Self> {
        let (year, month) = next_month(self.year, self.month);
        Self::build(year, month, selected, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_grid_is_always_42_cells() {
        // February of a non-leap year starting on a Sunday is the minimal case.
        let grid = MonthGrid::build(2026, 2, None, d(2026, 2, 10)).unwrap();
        assert_eq!(grid.cells.len(), GRID_CELLS);
        assert_eq!(grid.cells[0].date, d(2026, 2, 1));
        assert!(grid.cells[0].in_month);
    }

    #[test]
    fn test_leading_cells_from_previous_month() {
        // August 2025 starts on a Friday: five leading July cells.
        let grid = MonthGrid::build(2025, 8, None, d(2025, 8, 15)).unwrap();
        assert_eq!(grid.cells[0].date, d(2025, 7, 27));
        assert!(!grid.cells[0].in_month);
        assert_eq!(grid.cells[5].date, d(2025, 8, 1));
        assert!(grid.cells[5].in_month);
    }

    #[test]
    fn test_click_other_month_cell_is_inert() {
        let grid = MonthGrid::build(2025, 8, None, d(2025, 8, 15)).unwrap();
        assert_eq!(grid.click(0), None);
        assert_eq!(grid.click(5), Some(d(2025, 8, 1)));
        assert_eq!(grid.click(GRID_CELLS), None);
    }

    #[test]
    fn test_selected_and_today_flags() {
        let grid = MonthGrid::build(2025, 8, Some(d(2025, 8, 15)), d(2025, 8, 20)).unwrap();
        let selected: Vec<_> = grid.cells.iter().filter(|c| c.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, d(2025, 8, 15));
        assert!(grid.cells.iter().any(|c| c.today && c.date == d(2025, 8, 20)));
    }

    #[test]
    fn test_title() {
        let grid = MonthGrid::build(2025, 8, None, d(2025, 8, 15)).unwrap();
        assert_eq!(grid.title(), "August 2025");
    }

    #[test]
    fn test_month_navigation_wraps_year() {
        let grid = MonthGrid::build(2025, 12, None, d(2025, 12, 1)).unwrap();
        let next = grid.next(None, d(2025, 12, 1)).unwrap();
        assert_eq!((next.year, next.month), (2026, 1));
        let back = next.prev(None, d(2025, 12, 1)).unwrap();
        assert_eq!((back.year, back.month), (2025, 12));
    }
}
