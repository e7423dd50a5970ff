use std::io::{self, Write};

use colored::{Color, Colorize};

use super::{Report, ReportError, Reporter};
use crate::analytics::{format_day, TaskGroup};
use crate::protocol::{StatsSummary, TagAnalytics, TransactionInsights};

/// Deviation, in percent, above which a transaction is reported as anomalous.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 50.0;

const RULE_WIDTH: usize = 96;

/// A reporter that renders analytics as plain-text tables on the terminal.
#[derive(Debug, Clone)]
pub struct TerminalReporter {
    /// Whether to use colors in output (defaults to true).
    use_colors: bool,
    /// Deviation percent above which a comparison is flagged.
    anomaly_threshold: f64,
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalReporter {
    /// Create a new terminal reporter with default settings.
    pub fn new() -> Self {
        Self {
            use_colors: true,
            anomaly_threshold: DEFAULT_ANOMALY_THRESHOLD,
        }
    }

    /// Create a terminal reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self {
            use_colors: false,
            ..Self::new()
        }
    }

    /// Set the deviation percent above which transactions are flagged.
    pub fn with_anomaly_threshold(mut self, threshold_percent: f64) -> Self {
        self.anomaly_threshold = threshold_percent;
        self
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Format an execution time given in minutes.
    fn format_minutes(minutes: f64) -> String {
        if minutes >= 60.0 {
            format!("{:.1} h", minutes / 60.0)
        } else {
            format!("{:.0} min", minutes)
        }
    }

    fn format_optional(value: Option<f64>, suffix: &str) -> String {
        match value {
            Some(v) => format!("{:.2}{}", v, suffix),
            None => "-".to_string(),
        }
    }

    /// Format the size and spread of the trimmed window.
    fn format_window(summary: &StatsSummary) -> String {
        match &summary.window {
            Some(w) if w.std_dev.is_finite() => {
                format!("n={} trim={} sd={:.2}", w.sample_count, w.trim_count, w.std_dev)
            }
            Some(w) => format!("n={} trim={}", w.sample_count, w.trim_count),
            None => "-".to_string(),
        }
    }

    fn print_rule(&self, writer: &mut impl Write) -> io::Result<()> {
        writeln!(writer, "{}", "-".repeat(RULE_WIDTH))
    }

    /// Print the header of a day series table.
    fn print_task_header(&self, writer: &mut impl Write) -> io::Result<()> {
        let header = format!(
            "{:<12} {:>8} {:>10} {:>8} {:>14} {:>14}",
            "Date", "Tasks", "Completed", "Todo", "Time done", "Time total"
        );
        writeln!(writer, "{}", self.bold(&header))?;
        self.print_rule(writer)
    }

    /// Print a single day.
    fn print_task_row(&self, writer: &mut impl Write, group: &TaskGroup) -> io::Result<()> {
        let tasks = &group.tasks;
        let completed = self.paint(&format!("{:>10}", tasks.completed.count), Color::Green);
        let todo = self.paint(&format!("{:>8}", tasks.todo.count), Color::Yellow);

        writeln!(
            writer,
            "{:<12} {:>8} {} {} {:>14} {:>14}",
            format_day(group.date),
            tasks.all.count,
            completed,
            todo,
            Self::format_minutes(tasks.completed.execution_time),
            Self::format_minutes(tasks.all.execution_time),
        )
    }

    /// Print the totals of a day series.
    fn print_task_summary(&self, writer: &mut impl Write, groups: &[TaskGroup]) -> io::Result<()> {
        let days = groups.len();
        let total = groups.iter().map(|g| g.tasks.all.count).sum::<usize>();
        let completed = groups.iter().map(|g| g.tasks.completed.count).sum::<usize>();
        let minutes = groups.iter().map(|g| g.tasks.all.execution_time).sum::<f64>();

        self.print_rule(writer)?;
        write!(writer, "{} ", self.bold("Summary:"))?;
        writeln!(
            writer,
            "{} day(s), {} task(s), {}, {} tracked",
            days,
            total,
            self.paint(&format!("{} completed", completed), Color::Green),
            Self::format_minutes(minutes),
        )
    }

    fn print_task_table(&self, writer: &mut impl Write, groups: &[TaskGroup]) -> io::Result<()> {
        if groups.is_empty() {
            writeln!(writer, "No tasks in the selected period.")?;
            return Ok(());
        }

        self.print_task_header(writer)?;
        for group in groups {
            self.print_task_row(writer, group)?;
        }
        self.print_task_summary(writer, groups)
    }

    fn print_tag(&self, writer: &mut impl Write, tag: &TagAnalytics) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(
            writer,
            "{} {} [{}] ({})",
            self.bold("Tag"),
            self.bold(&tag.title),
            tag.color,
            tag.id
        )?;
        self.print_task_table(writer, &tag.tasks)
    }

    /// Format the result column of one comparison.
    fn format_result(&self, summary: &StatsSummary) -> String {
        if summary.deviation_percent.is_none() {
            self.paint(&format!("{:>10}", "n/a"), Color::Yellow)
        } else if summary.is_anomalous(self.anomaly_threshold) {
            let text = format!("{:>10}", "anomalous");
            if self.use_colors {
                text.red().bold().to_string()
            } else {
                text
            }
        } else {
            self.paint(&format!("{:>10}", "typical"), Color::Green)
        }
    }

    fn print_comparison(
        &self,
        writer: &mut impl Write,
        scope: &str,
        against: &str,
        summary: Option<&StatsSummary>,
    ) -> io::Result<()> {
        let Some(summary) = summary else {
            return writeln!(
                writer,
                "{:<10} {:<14} {:>12} {:>12} {:<24} {:>10}",
                scope, against, "-", "-", "no category", "-"
            );
        };

        writeln!(
            writer,
            "{:<10} {:<14} {:>12} {:>12} {:<24} {}",
            scope,
            against,
            Self::format_optional(summary.mean, ""),
            Self::format_optional(summary.deviation_percent, "%"),
            Self::format_window(summary),
            self.format_result(summary),
        )
    }

    fn print_insights(
        &self,
        writer: &mut impl Write,
        insights: &TransactionInsights,
    ) -> io::Result<()> {
        let transaction = &insights.transaction;
        let category = transaction
            .category
            .as_ref()
            .map(|c| c.title.as_str())
            .unwrap_or("uncategorised");

        writeln!(writer)?;
        writeln!(
            writer,
            "{} {} \"{}\": {:.2} ({}, {}) on {}",
            self.bold("Transaction"),
            transaction.id,
            transaction.label.as_deref().unwrap_or(""),
            transaction.value,
            transaction.kind,
            category,
            format_day(transaction.created_at.date_naive()),
        )?;

        let header = format!(
            "{:<10} {:<14} {:>12} {:>12} {:<24} {:>10}",
            "Scope", "Compared to", "Mean", "Deviation", "Window", "Result"
        );
        writeln!(writer, "{}", self.bold(&header))?;
        self.print_rule(writer)?;

        let values = &insights.average_values;
        let rows = [
            ("all time", "same type", Some(&values.all_time.same_type)),
            ("all time", "same category", values.all_time.same_category.as_ref()),
            ("month", "same type", Some(&values.month.same_type)),
            ("month", "same category", values.month.same_category.as_ref()),
        ];

        let mut anomalous = 0;
        let mut compared = 0;
        for (scope, against, summary) in rows {
            self.print_comparison(writer, scope, against, summary)?;
            if let Some(summary) = summary {
                compared += 1;
                if summary.is_anomalous(self.anomaly_threshold) {
                    anomalous += 1;
                }
            }
        }

        self.print_rule(writer)?;
        write!(writer, "{} ", self.bold("Summary:"))?;
        let flagged = format!("{} of {} comparison(s) anomalous", anomalous, compared);
        let flagged = if anomalous > 0 {
            self.paint(&flagged, Color::Red)
        } else {
            self.paint(&flagged, Color::Green)
        };
        writeln!(
            writer,
            "{} (threshold {:.2}%)",
            flagged, self.anomaly_threshold
        )
    }

    fn write_report(&self, writer: &mut impl Write, report: &Report) -> io::Result<()> {
        match report {
            Report::Tasks(groups) => {
                writeln!(writer)?;
                self.print_task_table(writer, groups)?;
            }
            Report::Tags(tags) => {
                if tags.is_empty() {
                    writeln!(writer, "No tags.")?;
                }
                for tag in tags {
                    self.print_tag(writer, tag)?;
                }
            }
            Report::Transaction(insights) => self.print_insights(writer, insights)?,
        }
        writeln!(writer)
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, report: &Report) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();

        self.write_report(&mut writer, report)?;

        Ok(())
    }
}
