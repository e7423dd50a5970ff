use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use planner_analytics::{
    Cli, Config, JsonReporter, OutputFormat, QueryContext, Reporter, SnapshotStore,
    TerminalReporter,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    // Load config and apply CLI overrides
    let mut config = Config::load_from(cli.config.as_deref())?;
    cli.apply_to_config(&mut config);
    debug!(?config, "configuration loaded");

    let user_id = config
        .data
        .user
        .as_deref()
        .context("No user given: pass --user or set data.user in the config file")?;

    let store = SnapshotStore::load(&config.data.snapshot).with_context(|| {
        format!(
            "Failed to load records from {}",
            config.data.snapshot.display()
        )
    })?;

    let offset = config.analytics.utc_offset()?;
    let today = cli
        .today
        .unwrap_or_else(|| QueryContext::today_in(offset, Utc::now()));
    let context = QueryContext::new(today, offset)
        .with_week_start(config.analytics.week_start)
        .with_decimal_places(config.statistics.decimal_places);

    let report = cli
        .command
        .execute(&store, user_id, context, config.analytics.default_period)
        .context("Query failed")?;

    let reporter: Box<dyn Reporter> = match cli.format {
        OutputFormat::Json => Box::new(JsonReporter::new()),
        OutputFormat::Table => {
            let reporter = if cli.no_color {
                TerminalReporter::without_colors()
            } else {
                TerminalReporter::new()
            };
            Box::new(reporter.with_anomaly_threshold(config.statistics.anomaly_threshold_percent))
        }
    };
    reporter.report(&report)?;

    Ok(())
}
