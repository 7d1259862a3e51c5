//! Statistics types.

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{EspError, EspResult};

/// Bucket size for time series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// One bucket per day.
    #[default]
    Day,
    /// One bucket per week.
    Week,
    /// One bucket per month.
    Month,
}

impl Aggregation {
    /// Query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Day => "day",
            Aggregation::Week => "week",
            Aggregation::Month => "month",
        }
    }
}

/// Date window for a statistics request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsQuery {
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive).
    pub end_date: NaiveDate,
    /// Bucket size.
    pub aggregated_by: Aggregation,
}

impl StatsQuery {
    /// Creates a query, rejecting windows that end before they start.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EspResult<Self> {
        if start_date > end_date {
            return Err(EspError::validation(format!(
                "Stats window start {} is after end {}",
                start_date, end_date
            )));
        }

        Ok(Self {
            start_date,
            end_date,
            aggregated_by: Aggregation::Day,
        })
    }

    /// The `days` days ending at `end_date`, inclusive.
    ///
    /// Fails if the window would start before the earliest representable date.
    pub fn days_ending(end_date: NaiveDate, days: u32) -> EspResult<Self> {
        let span = u64::from(days.max(1)) - 1;
        let start_date = end_date.checked_sub_days(Days::new(span)).ok_or_else(|| {
            EspError::validation(format!(
                "Stats window of {} days ending {} is out of range",
                days, end_date
            ))
        })?;

        Self::new(start_date, end_date)
    }

    /// The last `days` days, ending today (UTC).
    pub fn last_days(days: u32) -> EspResult<Self> {
        Self::days_ending(Utc::now().date_naive(), days)
    }

    /// Sets the bucket size.
    pub fn aggregated_by(mut self, aggregation: Aggregation) -> Self {
        self.aggregated_by = aggregation;
        self
    }

    /// Returns the query as query-string parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            (
                "start_date".to_string(),
                self.start_date.format("%Y-%m-%d").to_string(),
            ),
            (
                "end_date".to_string(),
                self.end_date.format("%Y-%m-%d").to_string(),
            ),
            (
                "aggregated_by".to_string(),
                self.aggregated_by.as_str().to_string(),
            ),
        ]
    }
}

/// Delivery counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatsCounters {
    /// Messages accepted for sending.
    pub requests: u64,
    /// Messages delivered.
    pub delivered: u64,
    /// Messages bounced.
    pub bounced: u64,
    /// Unique opens.
    pub opened: u64,
    /// Unique clicks.
    pub clicked: u64,
    /// Unsubscribes.
    pub unsubscribed: u64,
    /// Spam complaints.
    pub spam_reports: u64,
}

impl StatsCounters {
    /// Delivered / requested, or 0.0 when nothing was requested.
    pub fn delivery_rate(&self) -> f64 {
        ratio(self.delivered, self.requests)
    }

    /// Opened / delivered, or 0.0 when nothing was delivered.
    pub fn open_rate(&self) -> f64 {
        ratio(self.opened, self.delivered)
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// One bucket of a time series.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsEntry {
    /// Bucket start date.
    pub date: NaiveDate,
    /// Counters for the bucket.
    #[serde(flatten)]
    pub counters: StatsCounters,
}

/// Statistics for a date window.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsReport {
    /// First day of the window.
    pub start_date: NaiveDate,
    /// Last day of the window.
    pub end_date: NaiveDate,
    /// Totals over the window.
    #[serde(default)]
    pub totals: StatsCounters,
    /// Per-bucket breakdown.
    #[serde(default)]
    pub series: Vec<StatsEntry>,
}
