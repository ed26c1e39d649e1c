//! Report modes and the dispatch from a request to the matching builder.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::daily::{DisplayRow, build_day_report, build_today_view};
use crate::event::ClockEvent;
use crate::range::{EmployeeTotal, build_range_report};
use crate::scope::Scope;
use crate::types::DateRange;
use crate::view::{ViewState, apply_view, arrange};

/// Which kind of report a request represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Live roster for the current date.
    #[default]
    Today,
    /// Finalized report for one date.
    Day,
    /// Per-employee totals over a date range.
    Range,
}

impl ReportMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Day => "day",
            Self::Range => "range",
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A report request: the mode plus the dates it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ReportRequest {
    Today { date: NaiveDate },
    Day { date: NaiveDate },
    Range { range: DateRange },
}

impl ReportRequest {
    pub const fn mode(&self) -> ReportMode {
        match self {
            Self::Today { .. } => ReportMode::Today,
            Self::Day { .. } => ReportMode::Day,
            Self::Range { .. } => ReportMode::Range,
        }
    }

    /// The dates whose events the report needs.
    pub const fn dates(&self) -> DateRange {
        match self {
            Self::Today { date } | Self::Day { date } => DateRange::single(*date),
            Self::Range { range } => *range,
        }
    }
}

/// A computed report, carrying the rows and the parameters that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Report {
    Today {
        date: NaiveDate,
        rows: Vec<DisplayRow>,
    },
    Day {
        date: NaiveDate,
        rows: Vec<DisplayRow>,
    },
    Range {
        range: DateRange,
        totals: Vec<EmployeeTotal>,
    },
}

/// One page of a report plus the totals needed to render a pager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPage {
    pub report: Report,
    pub page: usize,
    /// Zero when nothing matched.
    pub total_pages: usize,
    pub total_rows: usize,
}

impl ReportPage {
    /// True when nothing matched at all, as opposed to a page past the end.
    pub const fn is_empty_result(&self) -> bool {
        self.total_rows == 0
    }
}

impl Report {
    /// Runs the builder matching the request's mode.
    ///
    /// `events` must be the complete set for the request's dates.
    pub fn build(request: ReportRequest, events: &[ClockEvent], scope: &Scope) -> Self {
        tracing::debug!(mode = %request.mode(), events = events.len(), "building report");
        match request {
            ReportRequest::Today { date } => Self::Today {
                date,
                rows: build_today_view(events, scope),
            },
            ReportRequest::Day { date } => Self::Day {
                date,
                rows: build_day_report(events, scope),
            },
            ReportRequest::Range { range } => Self::Range {
                range,
                totals: build_range_report(events, scope),
            },
        }
    }

    pub const fn mode(&self) -> ReportMode {
        match self {
            Self::Today { .. } => ReportMode::Today,
            Self::Day { .. } => ReportMode::Day,
            Self::Range { .. } => ReportMode::Range,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Today { rows, .. } | Self::Day { rows, .. } => rows.len(),
            Self::Range { totals, .. } => totals.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows whose timestamps were rejected: flagged day rows, or excluded
    /// events summed over range totals.
    pub fn malformed_count(&self) -> usize {
        match self {
            Self::Today { rows, .. } | Self::Day { rows, .. } => {
                rows.iter().filter(|r| r.malformed).count()
            }
            Self::Range { totals, .. } => totals.iter().map(|t| t.rejected_events).sum(),
        }
    }

    /// Runs the full view pipeline and keeps only the requested page.
    pub fn page(&self, state: &ViewState) -> ReportPage {
        let (report, page, total_pages, total_rows) = match self {
            Self::Today { date, rows } => {
                let p = apply_view(rows, state);
                let report = Self::Today {
                    date: *date,
                    rows: p.rows,
                };
                (report, p.page, p.total_pages, p.total_rows)
            }
            Self::Day { date, rows } => {
                let p = apply_view(rows, state);
                let report = Self::Day {
                    date: *date,
                    rows: p.rows,
                };
                (report, p.page, p.total_pages, p.total_rows)
            }
            Self::Range { range, totals } => {
                let p = apply_view(totals, state);
                let report = Self::Range {
                    range: *range,
                    totals: p.rows,
                };
                (report, p.page, p.total_pages, p.total_rows)
            }
        };
        ReportPage {
            report,
            page,
            total_pages,
            total_rows,
        }
    }

    /// Returns the report with search and sort from `state` applied.
    ///
    /// Paging is left out, so the result is suitable for export.
    #[must_use]
    pub fn arranged(&self, state: &ViewState) -> Self {
        match self {
            Self::Today { date, rows } => Self::Today {
                date: *date,
                rows: arrange(rows, state),
            },
            Self::Day { date, rows } => Self::Day {
                date: *date,
                rows: arrange(rows, state),
            },
            Self::Range { range, totals } => Self::Range {
                range: *range,
                totals: arrange(totals, state),
            },
        }
    }
}
