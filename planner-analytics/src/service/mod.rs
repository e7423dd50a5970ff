//! Query services over a [`RecordStore`](crate::store::RecordStore).
//!
//! The services never read the wall clock. Everything time-dependent comes in
//! through a [`QueryContext`], so the same inputs always give the same answer.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use planner_analytics_core::WeekStart;
use thiserror::Error;

use crate::store::StoreError;

/// Errors returned by the analytics and insights services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No transaction with this id belongs to the user.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// No tag with this id belongs to the user.
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Clock and calendar settings a query is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryContext {
    /// The current calendar day.
    pub today: NaiveDate,
    /// Time zone that record timestamps are bucketed in.
    pub offset: FixedOffset,
    pub week_start: WeekStart,
    /// Decimal places averages and deviations are rounded to.
    pub decimal_places: u32,
}

impl QueryContext {
    pub fn new(today: NaiveDate, offset: FixedOffset) -> Self {
        Self {
            today,
            offset,
            week_start: WeekStart::default(),
            decimal_places: 2,
        }
    }

    /// The calendar day `now` falls on in `offset`.
    ///
    /// Pass the offset records are bucketed in.
    pub fn today_in(offset: FixedOffset, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&offset).date_naive()
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }
}

mod analytics;
mod insights;
pub use analytics::AnalyticsService;
pub use insights::InsightsService;
