//! Search, sort and pagination shared by every report shape.
//!
//! Stages always run in the order search -> sort -> paginate. Exports use
//! [`arrange`] (search and sort only) so they include every matching row.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::daily::DisplayRow;
use crate::range::EmployeeTotal;
use crate::report::ReportMode;
use crate::types::DeviceId;

/// Fields searched by default: employee name and PIN.
pub const SEARCH_FIELDS: [Column; 2] = [Column::Name, Column::Pin];

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(9);

/// A report column that can be searched or sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Column {
    Pin,
    Name,
    CheckIn,
    CheckOut,
    Duration,
    Total,
}

/// Unknown column name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column: {0}")]
pub struct UnknownColumn(pub String);

impl Column {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pin => "pin",
            Self::Name => "name",
            Self::CheckIn => "check-in",
            Self::CheckOut => "check-out",
            Self::Duration => "duration",
            Self::Total => "total",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pin" => Ok(Self::Pin),
            "name" => Ok(Self::Name),
            "check-in" => Ok(Self::CheckIn),
            "check-out" => Ok(Self::CheckOut),
            "duration" => Ok(Self::Duration),
            "total" => Ok(Self::Total),
            other => Err(UnknownColumn(other.to_string())),
        }
    }
}

/// A row the view pipeline can search and sort.
pub trait ViewRow {
    /// Display text for `column`, or `None` if this row shape lacks it.
    fn text(&self, column: Column) -> Option<Cow<'_, str>>;

    /// Value compared when sorting by `column`.
    ///
    /// Values that parse as numbers on both sides compare numerically.
    fn sort_value(&self, column: Column) -> Option<Cow<'_, str>> {
        self.text(column)
    }
}

impl ViewRow for DisplayRow {
    fn text(&self, column: Column) -> Option<Cow<'_, str>> {
        match column {
            Column::Pin => Some(Cow::Borrowed(self.pin.as_str())),
            Column::Name => Some(Cow::Borrowed(&self.name)),
            Column::CheckIn => Some(Cow::Borrowed(&self.check_in_display)),
            Column::CheckOut => Some(Cow::Borrowed(&self.check_out_display)),
            Column::Duration => Some(Cow::Borrowed(&self.duration_display)),
            Column::Total => None,
        }
    }

    fn sort_value(&self, column: Column) -> Option<Cow<'_, str>> {
        match column {
            Column::CheckIn => Some(Cow::Owned(self.check_in.timestamp().to_string())),
            Column::CheckOut => self
                .check_out
                .map(|out| Cow::Owned(out.timestamp().to_string())),
            Column::Duration => self.worked_minutes.map(|m| Cow::Owned(m.to_string())),
            other => self.text(other),
        }
    }
}

impl ViewRow for EmployeeTotal {
    fn text(&self, column: Column) -> Option<Cow<'_, str>> {
        match column {
            Column::Pin => Some(Cow::Borrowed(self.pin.as_str())),
            Column::Name => Some(Cow::Borrowed(&self.name)),
            Column::Total => Some(Cow::Borrowed(&self.total_display)),
            Column::CheckIn | Column::CheckOut | Column::Duration => None,
        }
    }

    fn sort_value(&self, column: Column) -> Option<Cow<'_, str>> {
        match column {
            Column::Total => Some(Cow::Owned(self.total_minutes.to_string())),
            other => self.text(other),
        }
    }
}

/// Case-insensitive substring search over `fields`.
///
/// A blank query matches every row. The input is left untouched.
pub fn search<T: ViewRow + Clone>(rows: &[T], query: &str, fields: &[Column]) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }

    rows.iter()
        .filter(|row| {
            fields.iter().any(|&field| {
                row.text(field)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect()
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortState {
    #[must_use]
    pub const fn ascending(column: Column) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    /// Applies a click on `column`: the same column flips direction, a new
    /// column starts ascending.
    #[must_use]
    pub fn select(self, column: Column) -> Self {
        if self.column == column {
            Self {
                column,
                direction: self.direction.reversed(),
            }
        } else {
            Self::ascending(column)
        }
    }
}

/// Comparable form of one row's sort value.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
    Missing,
}

impl SortKey {
    /// Missing values go last in ascending order; numbers before text.
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Missing, Self::Missing) => Ordering::Equal,
            (Self::Number(_), _) | (Self::Text(_), Self::Missing) => Ordering::Less,
            (Self::Missing, _) | (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

fn parse_finite(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Builds one key per value. The column compares numerically only when
/// every present value is a finite number; otherwise all of it compares as
/// case-insensitive text.
fn sort_keys(values: Vec<Option<String>>) -> Vec<SortKey> {
    let numeric = values
        .iter()
        .flatten()
        .all(|v| parse_finite(v).is_some());
    values
        .into_iter()
        .map(|value| match value {
            None => SortKey::Missing,
            Some(v) => match parse_finite(&v) {
                Some(n) if numeric => SortKey::Number(n),
                _ => SortKey::Text(v.to_lowercase()),
            },
        })
        .collect()
}

/// Stable sort: rows with equal keys keep their relative order in both
/// directions. The result does not depend on input order beyond ties.
pub fn sort<T: ViewRow>(rows: Vec<T>, state: SortState) -> Vec<T> {
    let values = rows
        .iter()
        .map(|r| r.sort_value(state.column).map(Cow::into_owned))
        .collect();
    let mut keyed: Vec<(SortKey, T)> = sort_keys(values).into_iter().zip(rows).collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.compare(b);
        match state.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// One page of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    /// 1-indexed page number that was requested.
    pub page: usize,
    /// Zero when there are no rows at all.
    pub total_pages: usize,
    pub total_rows: usize,
}

/// Slices out a 1-indexed page. Page 0 is read as page 1; pages past the
/// end come back empty.
pub fn paginate<T: Clone>(rows: &[T], page: usize, page_size: NonZeroUsize) -> Page<T> {
    let page = page.max(1);
    let size = page_size.get();
    let start = (page - 1).saturating_mul(size);

    let page_rows = rows.iter().skip(start).take(size).cloned().collect();

    Page {
        rows: page_rows,
        page,
        total_pages: rows.len().div_ceil(size),
        total_rows: rows.len(),
    }
}

/// Screen state driving the pipeline.
///
/// Changing the search text, report mode or device selection returns to
/// page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    search: String,
    sort: Option<SortState>,
    page: usize,
    page_size: NonZeroUsize,
    mode: ReportMode,
    device: Option<DeviceId>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
            page_size,
            mode: ReportMode::Today,
            device: None,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub const fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub const fn page(&self) -> usize {
        self.page
    }

    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub const fn mode(&self) -> ReportMode {
        self.mode
    }

    pub const fn device(&self) -> Option<&DeviceId> {
        self.device.as_ref()
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.search {
            self.search = query;
            self.page = 1;
        }
    }

    pub fn set_mode(&mut self, mode: ReportMode) {
        if mode != self.mode {
            self.mode = mode;
            self.page = 1;
        }
    }

    pub fn set_device(&mut self, device: Option<DeviceId>) {
        if device != self.device {
            self.device = device;
            self.page = 1;
        }
    }

    /// Clicks a column header.
    pub fn select_sort(&mut self, column: Column) {
        self.sort = Some(match self.sort {
            Some(current) => current.select(column),
            None => SortState::ascending(column),
        });
    }

    /// Sets an explicit sort, bypassing the toggle behaviour.
    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        if page_size != self.page_size {
            self.page_size = page_size;
            self.page = 1;
        }
    }
}

/// Search then sort, without paging.
pub fn arrange<T: ViewRow + Clone>(rows: &[T], state: &ViewState) -> Vec<T> {
    let found = search(rows, &state.search, &SEARCH_FIELDS);
    match state.sort {
        Some(sort_state) => sort(found, sort_state),
        None => found,
    }
}

/// Runs the full pipeline: search, sort, paginate.
pub fn apply_view<T: ViewRow + Clone>(rows: &[T], state: &ViewState) -> Page<T> {
    let arranged = arrange(rows, state);
    let page = paginate(&arranged, state.page, state.page_size);
    tracing::debug!(
        input = rows.len(),
        matched = page.total_rows,
        page = page.page,
        total_pages = page.total_pages,
        "applied view"
    );
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_format::format_minutes;
    use crate::types::EmployeePin;

    fn total(pin: &str, name: &str, minutes: i64) -> EmployeeTotal {
        EmployeeTotal {
            pin: EmployeePin::new(pin).unwrap(),
            name: name.to_string(),
            total_minutes: minutes,
            total_display: format_minutes(minutes),
            closed_shifts: 1,
            open_shifts: 0,
            rejected_events: 0,
        }
    }

    fn names(rows: &[EmployeeTotal]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    fn roster() -> Vec<EmployeeTotal> {
        vec![
            total("10", "bob", 120),
            total("9", "Alice", 600),
            total("11", "carol", 120),
            total("2", "Dave", 45),
        ]
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_pin() {
        let rows = roster();
        assert_eq!(names(&search(&rows, "ALI", &SEARCH_FIELDS)), ["Alice"]);
        assert_eq!(names(&search(&rows, "1", &SEARCH_FIELDS)), ["bob", "carol"]);
        assert!(search(&rows, "zed", &SEARCH_FIELDS).is_empty());
    }

    #[test]
    fn empty_search_is_a_no_op() {
        let rows = roster();
        assert_eq!(search(&rows, "", &SEARCH_FIELDS), rows);
        assert_eq!(search(&rows, "   ", &SEARCH_FIELDS), rows);
    }

    #[test]
    fn search_ignores_fields_not_listed() {
        let rows = roster();
        // "10:00" is Alice's total, but only the name is searched here.
        assert!(search(&rows, "10:00", &[Column::Name]).is_empty());
        assert_eq!(names(&search(&rows, "10:00", &[Column::Total])), ["Alice"]);
    }

    #[test]
    fn numeric_values_sort_numerically() {
        let sorted = sort(roster(), SortState::ascending(Column::Pin));
        let pins: Vec<_> = sorted.iter().map(|r| r.pin.as_str()).collect();
        assert_eq!(pins, ["2", "9", "10", "11"]);
    }

    #[test]
    fn text_sorts_case_insensitively() {
        let sorted = sort(roster(), SortState::ascending(Column::Name));
        assert_eq!(names(&sorted), ["Alice", "bob", "carol", "Dave"]);
    }

    #[test]
    fn totals_sort_by_minutes_not_display() {
        // "10:00" < "2:00" as text; by minutes it is the largest.
        let sorted = sort(
            roster(),
            SortState {
                column: Column::Total,
                direction: SortDirection::Descending,
            },
        );
        assert_eq!(names(&sorted), ["Alice", "bob", "carol", "Dave"]);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        // bob and carol tie on 120 minutes; bob comes first in the input.
        let asc = sort(roster(), SortState::ascending(Column::Total));
        assert_eq!(names(&asc), ["Dave", "bob", "carol", "Alice"]);

        let desc = sort(
            roster(),
            SortState {
                column: Column::Total,
                direction: SortDirection::Descending,
            },
        );
        assert_eq!(names(&desc), ["Alice", "bob", "carol", "Dave"]);
    }

    #[test]
    fn mixed_column_sorts_the_same_from_any_input_order() {
        let orders = [["10", "9", "1a"], ["1a", "9", "10"], ["9", "1a", "10"]];
        for order in orders {
            let rows: Vec<_> = order.iter().map(|pin| total(pin, "x", 0)).collect();
            let sorted = sort(rows, SortState::ascending(Column::Pin));
            let pins: Vec<_> = sorted.iter().map(|r| r.pin.as_str()).collect();
            // One non-number makes the whole column compare as text.
            assert_eq!(pins, ["10", "1a", "9"], "input order {order:?}");
        }
    }

    #[test]
    fn non_finite_parses_sort_as_text() {
        let rows = vec![total("5", "Nan", 0), total("6", "inf", 0), total("7", "Bea", 0)];
        let sorted = sort(rows, SortState::ascending(Column::Name));
        assert_eq!(names(&sorted), ["Bea", "inf", "Nan"]);
    }

    #[test]
    fn missing_values_go_last_then_first_when_descending() {
        let rows = vec![total("1", "a", 0), total("2", "b", 0)];
        let asc = sort(rows.clone(), SortState::ascending(Column::CheckIn));
        assert_eq!(names(&asc), ["a", "b"]);

        let keys = sort_keys(vec![None, Some("3".to_string()), Some("1".to_string())]);
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| keys[a].compare(&keys[b]));
        assert_eq!(order, [2, 1, 0]);
        order.sort_by(|&a, &b| keys[a].compare(&keys[b]).reverse());
        assert_eq!(order, [0, 1, 2]);
    }

    #[test]
    fn sorting_twice_matches_sorting_once() {
        let state = SortState::ascending(Column::Total);
        let once = sort(roster(), state);
        let twice = sort(once.clone(), state);
        assert_eq!(once, twice);
    }

    #[test]
    fn select_toggles_then_resets() {
        let state = SortState::ascending(Column::Name);
        let toggled = state.select(Column::Name);
        assert_eq!(toggled.direction, SortDirection::Descending);
        assert_eq!(toggled.select(Column::Name).direction, SortDirection::Ascending);

        let other = toggled.select(Column::Pin);
        assert_eq!(other, SortState::ascending(Column::Pin));
    }

    #[test]
    fn paginate_twenty_three_rows() {
        let rows: Vec<u32> = (0..23).collect();
        let size = NonZeroUsize::new(10).unwrap();

        let first = paginate(&rows, 1, size);
        assert_eq!(first.rows.len(), 10);
        assert_eq!(first.total_pages, 3);

        let third = paginate(&rows, 3, size);
        assert_eq!(third.rows, vec![20, 21, 22]);

        assert!(paginate(&rows, 4, size).rows.is_empty());
    }

    #[test]
    fn pages_cover_every_row_once() {
        for len in [0_usize, 1, 9, 10, 11, 57] {
            for size in [1_usize, 3, 10, 100] {
                let rows: Vec<usize> = (0..len).collect();
                let size = NonZeroUsize::new(size).unwrap();
                let first = paginate(&rows, 1, size);
                assert_eq!(first.total_pages, len.div_ceil(size.get()));

                let collected: Vec<usize> = (1..=first.total_pages)
                    .flat_map(|p| paginate(&rows, p, size).rows)
                    .collect();
                assert_eq!(collected, rows);
            }
        }
    }

    #[test]
    fn empty_rows_have_zero_pages() {
        let page = paginate::<u32>(&[], 1, DEFAULT_PAGE_SIZE);
        assert_eq!(page.total_pages, 0);
        assert!(page.rows.is_empty());
        assert_eq!(page.total_rows, 0);
    }

    #[test]
    fn page_zero_reads_as_first_page() {
        let rows = [1, 2, 3];
        let page = paginate(&rows, 0, NonZeroUsize::new(2).unwrap());
        assert_eq!(page.page, 1);
        assert_eq!(page.rows, vec![1, 2]);
    }

    #[test]
    fn filter_changes_reset_page() {
        let mut state = ViewState::default();
        state.go_to_page(3);
        state.set_search("ali");
        assert_eq!(state.page(), 1);

        state.go_to_page(2);
        state.set_mode(ReportMode::Range);
        assert_eq!(state.page(), 1);

        state.go_to_page(2);
        state.set_device(Some(DeviceId::new("front-door").unwrap()));
        assert_eq!(state.page(), 1);

        state.go_to_page(2);
        state.set_page_size(NonZeroUsize::new(25).unwrap());
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size().get(), 25);
    }

    #[test]
    fn unchanged_filters_keep_page() {
        let mut state = ViewState::default();
        state.set_search("ali");
        state.go_to_page(2);
        state.set_search("ali");
        state.set_mode(ReportMode::Today);
        state.set_device(None);
        state.set_page_size(DEFAULT_PAGE_SIZE);
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn apply_view_composes_stages() {
        let mut state = ViewState::new(NonZeroUsize::new(1).unwrap());
        state.set_search("o");
        state.select_sort(Column::Name);
        state.select_sort(Column::Name);
        state.go_to_page(2);

        let page = apply_view(&roster(), &state);
        // "o" matches bob and carol; descending by name puts carol first.
        assert_eq!(page.total_rows, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(names(&page.rows), ["bob"]);
    }
}
