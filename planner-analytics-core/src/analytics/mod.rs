//! Date-bucketed task analytics.
//!
//! Records are grouped by the calendar day they were created on, every day is
//! summarised into completed/todo/all counts and execution times, and the
//! resulting series can be narrowed to the current week, month or year.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Records that carry a creation timestamp.
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}

/// Task-like records that can be summarised per day.
pub trait TaskRecord: Timestamped {
    fn is_completed(&self) -> bool;

    /// Time spent on the task. `None` counts as zero.
    fn execution_time(&self) -> Option<f64>;
}

impl<T: Timestamped + ?Sized> Timestamped for &T {
    fn created_at(&self) -> DateTime<Utc> {
        (**self).created_at()
    }
}

impl<T: TaskRecord + ?Sized> TaskRecord for &T {
    fn is_completed(&self) -> bool {
        (**self).is_completed()
    }

    fn execution_time(&self) -> Option<f64> {
        (**self).execution_time()
    }
}

/// Count and total execution time of a set of tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksInfo {
    pub count: usize,
    pub execution_time: f64,
}

impl Add for TasksInfo {
    type Output = TasksInfo;

    fn add(self, rhs: TasksInfo) -> TasksInfo {
        TasksInfo {
            count: self.count + rhs.count,
            execution_time: self.execution_time + rhs.execution_time,
        }
    }
}

/// Per-day task figures split by completion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TasksInfoByGroups {
    pub completed: TasksInfo,
    pub todo: TasksInfo,
    pub all: TasksInfo,
}

/// One day of the analytics series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskGroup {
    /// Calendar day, serialised as `DD.MM.YYYY`.
    #[serde(with = "day::serde_day")]
    pub date: NaiveDate,
    pub tasks: TasksInfoByGroups,
}

/// Records that fell on the same calendar day, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct DateBucket<R> {
    pub date: NaiveDate,
    pub records: Vec<R>,
}

/// Time range an analytics series is narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Period {
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            _ => Err(ParseEnumError::new("period", s, "week, month, year, all")),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = ParseEnumError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// First day of a calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

impl FromStr for WeekStart {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monday" => Ok(WeekStart::Monday),
            "sunday" => Ok(WeekStart::Sunday),
            _ => Err(ParseEnumError::new("week start", s, "monday, sunday")),
        }
    }
}

impl TryFrom<String> for WeekStart {
    type Error = ParseEnumError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Error for an unknown name of a [`Period`] or [`WeekStart`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// Error for a day key that is not a valid `DD.MM.YYYY` date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateKeyError {
    #[error("invalid day key '{0}', expected DD.MM.YYYY")]
    Invalid(String),
}

mod day;
mod grouping;
mod period;

pub use day::{day_to_instant, format_day, parse_day, DAY_FORMAT};
pub use grouping::{group_by_date, grouped_tasks_info, summarize_group};
pub use period::{filter_by_period, is_within_period};
