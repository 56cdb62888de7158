//! Historical occupancy trends for a single area.
//!
//! [`build_trend`] turns a series of `(timestamp, percent)` samples into the
//! four views the history page renders: the most recent points, today's
//! points, an hour-of-day baseline and a weekday × hour heatmap.
//!
//! The reference date is always passed in. Nothing here reads the clock, so
//! the same input always produces the same output.

use chrono::{Datelike, Days, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::percent::round1;
use crate::types::Timestamp;

/// Trailing window, in days, used for the baseline and heatmap.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 14;

/// Number of most recent points returned in [`TrendResult::recent_points`].
pub const DEFAULT_MAX_RECENT: usize = 300;

pub const HOURS_PER_DAY: usize = 24;
pub const DAYS_PER_WEEK: usize = 7;

/// One stored reading for an area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp: Timestamp,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendOptions {
    /// Days before the reference date still counted in baseline and heatmap.
    pub lookback_days: u32,
    /// Cap on `recent_points`; the newest points are kept.
    pub max_recent: usize,
}

impl Default for TrendOptions {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            max_recent: DEFAULT_MAX_RECENT,
        }
    }
}

/// Average occupancy for one hour of the day. `None` when no samples fell
/// in that hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyAverage {
    pub hour: u32,
    pub avg_percent: Option<f64>,
}

/// Derived trend views. Never persisted.
///
/// `baseline_hourly` always has 24 entries and `heatmap` is always 7 rows
/// (Monday first) of 24 columns, whatever the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendResult {
    pub recent_points: Vec<TrendPoint>,
    pub today_points: Vec<TrendPoint>,
    pub baseline_hourly: Vec<HourlyAverage>,
    pub heatmap: Vec<Vec<Option<f64>>>,
}

impl TrendResult {
    /// The "no data" shape: empty point lists, null-filled grids.
    pub fn empty() -> Self {
        Self {
            recent_points: Vec::new(),
            today_points: Vec::new(),
            baseline_hourly: (0..HOURS_PER_DAY as u32)
                .map(|hour| HourlyAverage {
                    hour,
                    avg_percent: None,
                })
                .collect(),
            heatmap: vec![vec![None; HOURS_PER_DAY]; DAYS_PER_WEEK],
        }
    }
}

/// Running mean.
#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    n: u32,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.n += 1;
    }

    fn value(&self) -> Option<f64> {
        (self.n > 0).then(|| round1(self.sum / f64::from(self.n)))
    }
}

/// First calendar date counted in the baseline and heatmap window.
pub fn window_start_date(today: NaiveDate, lookback_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Build trend views for one area relative to the UTC date `today`.
///
/// Points are sorted by timestamp first (stable, so equal timestamps keep
/// their input order). Baseline and heatmap only count points dated within
/// `[today - lookback_days, today]`; `recent_points` is taken from the full
/// series regardless of that window.
pub fn build_trend(points: &[TrendPoint], today: NaiveDate, options: TrendOptions) -> TrendResult {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.timestamp);

    let window_start = window_start_date(today, options.lookback_days);

    let mut hourly = [Mean::default(); HOURS_PER_DAY];
    let mut cells = [[Mean::default(); HOURS_PER_DAY]; DAYS_PER_WEEK];
    let mut today_points = Vec::new();

    for point in &sorted {
        let date = point.timestamp.date_naive();
        if date == today {
            today_points.push(*point);
        }
        if date < window_start || date > today || !point.percent.is_finite() {
            continue;
        }
        let hour = point.timestamp.hour() as usize;
        let dow = point.timestamp.weekday().num_days_from_monday() as usize;
        hourly[hour].push(point.percent);
        cells[dow][hour].push(point.percent);
    }

    let skip = sorted.len().saturating_sub(options.max_recent);
    let recent_points = sorted.split_off(skip);

    TrendResult {
        recent_points,
        today_points,
        baseline_hourly: hourly
            .iter()
            .enumerate()
            .map(|(hour, mean)| HourlyAverage {
                hour: hour as u32,
                avg_percent: mean.value(),
            })
            .collect(),
        heatmap: cells
            .iter()
            .map(|row| row.iter().map(Mean::value).collect())
            .collect(),
    }
}
