//! Command-line interface for planner-analytics.

use crate::config::Config;
use crate::service::{AnalyticsService, InsightsService, QueryContext, ServiceError};
use crate::store::RecordStore;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use planner_analytics_core::{Period, Report};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "planner-analytics")]
#[command(about = "Task analytics and transaction insights over a planner snapshot")]
#[command(version)]
pub struct Cli {
    /// Path to config file (defaults to .planner-analytics.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON snapshot of planner records
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// User whose records are analysed (overrides data.user)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Reference day (YYYY-MM-DD) for period filters and the current month
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Offset of the local time zone in minutes
    #[arg(long, allow_negative_numbers = true, global = true)]
    pub utc_offset_minutes: Option<i32>,

    /// Deviation in percent above which a transaction is flagged
    #[arg(long, global = true)]
    pub anomaly_threshold: Option<f64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// The JSON response bodies
    Json,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Per-day counts and execution times of all tasks
    Tasks {
        /// week, month, year or all
        #[arg(short, long)]
        period: Option<Period>,
    },
    /// Per-day series for every tag
    Tags {
        /// week, month, year or all
        #[arg(short, long)]
        period: Option<Period>,
    },
    /// Per-day series for one tag
    Tag {
        tag_id: String,
        /// week, month, year or all
        #[arg(short, long)]
        period: Option<Period>,
    },
    /// Compare a transaction against similar ones
    Transaction { transaction_id: String },
}

impl Cli {
    /// Apply CLI overrides to the configuration.
    ///
    /// CLI arguments take precedence over config file values.
    /// Only non-None optional values will override the config.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(data) = &self.data {
            config.data.snapshot = data.clone();
        }

        if let Some(user) = &self.user {
            config.data.user = Some(user.clone());
        }

        if let Some(minutes) = self.utc_offset_minutes {
            config.analytics.utc_offset_minutes = Some(minutes);
        }

        if let Some(threshold) = self.anomaly_threshold {
            config.statistics.anomaly_threshold_percent = threshold;
        }
    }
}

impl Command {
    /// Run the query against `store`.
    ///
    /// Commands without an explicit period use `default_period`.
    pub fn execute<S: RecordStore + ?Sized>(
        &self,
        store: &S,
        user_id: &str,
        context: QueryContext,
        default_period: Period,
    ) -> Result<Report, ServiceError> {
        let analytics = AnalyticsService::new(store, context);

        match self {
            Command::Tasks { period } => analytics
                .tasks_analytics(user_id, Some(period.unwrap_or(default_period)))
                .map(Report::Tasks),
            Command::Tags { period } => analytics
                .tags_analytics(user_id, Some(period.unwrap_or(default_period)))
                .map(Report::Tags),
            Command::Tag { tag_id, period } => analytics
                .tag_analytics(user_id, tag_id, Some(period.unwrap_or(default_period)))
                .map(Report::Tags),
            Command::Transaction { transaction_id } => InsightsService::new(store, context)
                .transaction_insights(user_id, transaction_id)
                .map(|insights| Report::Transaction(Box::new(insights))),
        }
    }
}
