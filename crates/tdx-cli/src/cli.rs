//! CLI argument definitions for tdxplot.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tdx_model::{Palette, QueryType};

#[derive(Parser)]
#[command(
    name = "tdxplot",
    version,
    about = "Count help-desk tickets per week, building or room",
    long_about = "Count help-desk tickets from a CSV report export.\n\n\
                  Tickets can be counted per calendar week of an academic term,\n\
                  per building, or per room within one building.",
    group(
        ArgGroup::new("query")
            .required(true)
            .args(["per_week", "per_building", "per_room"])
    )
)]
pub struct Cli {
    /// Path to the CSV report export.
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    /// Show tickets per week.
    #[arg(long = "perweek")]
    pub per_week: bool,

    /// Show tickets per building.
    #[arg(long = "perbuilding")]
    pub per_building: bool,

    /// Show tickets per room in a specified building.
    #[arg(long = "perroom")]
    pub per_room: bool,

    /// Set the name of the plot.
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,

    /// Set the color of the plot.
    #[arg(short = 'c', long = "plot-color", value_enum)]
    pub plot_color: Option<PlotColorArg>,

    /// Exclude tickets before this date (first calendar week for --perweek).
    #[arg(short = 't', long = "termstart", value_parser = parse_term_date)]
    pub term_start: Option<NaiveDate>,

    /// Exclude tickets after this date.
    #[arg(short = 'e', long = "termend", value_parser = parse_term_date)]
    pub term_end: Option<NaiveDate>,

    /// Set number of weeks in the term for --perweek.
    #[arg(short = 'w', long = "weeks", value_parser = clap::value_parser!(u32).range(1..))]
    pub weeks: Option<u32>,

    /// Specify building filter.
    #[arg(short = 'b', long = "building")]
    pub building: Option<String>,

    /// Output format for the result.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn query_type(&self) -> QueryType {
        if self.per_room {
            QueryType::PerRoom
        } else if self.per_building {
            QueryType::PerBuilding
        } else {
            QueryType::PerWeek
        }
    }
}

fn parse_term_date(value: &str) -> Result<NaiveDate, String> {
    tdx_ingest::parse_date(value)
        .ok_or_else(|| format!("date {value} not recognized, try yyyy-mm-dd"))
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PlotColorArg {
    White,
    Black,
    Gray,
    Yellow,
    Red,
    Blue,
    Green,
    Brown,
    Pink,
    Orange,
    Purple,
}

impl From<PlotColorArg> for Palette {
    fn from(value: PlotColorArg) -> Self {
        match value {
            PlotColorArg::White => Palette::White,
            PlotColorArg::Black => Palette::Black,
            PlotColorArg::Gray => Palette::Gray,
            PlotColorArg::Yellow => Palette::Yellow,
            PlotColorArg::Red => Palette::Red,
            PlotColorArg::Blue => Palette::Blue,
            PlotColorArg::Green => Palette::Green,
            PlotColorArg::Brown => Palette::Brown,
            PlotColorArg::Pink => Palette::Pink,
            PlotColorArg::Orange => Palette::Orange,
            PlotColorArg::Purple => Palette::Purple,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_perweek_invocation() {
        let cli = Cli::try_parse_from([
            "tdxplot",
            "--perweek",
            "-t",
            "2023-01-10",
            "-w",
            "12",
            "-c",
            "orange",
            "tickets.csv",
        ])
        .unwrap();
        assert_eq!(cli.query_type(), QueryType::PerWeek);
        assert_eq!(cli.term_start, NaiveDate::from_ymd_opt(2023, 1, 10));
        assert_eq!(cli.weeks, Some(12));
        assert!(matches!(cli.plot_color, Some(PlotColorArg::Orange)));
    }

    #[test]
    fn query_flag_is_required_and_exclusive() {
        assert!(Cli::try_parse_from(["tdxplot", "tickets.csv"]).is_err());
        assert!(
            Cli::try_parse_from(["tdxplot", "--perweek", "--perroom", "tickets.csv"]).is_err()
        );
    }

    #[test]
    fn rejects_unrecognized_dates_and_zero_weeks() {
        assert!(
            Cli::try_parse_from(["tdxplot", "--perweek", "-t", "next week", "tickets.csv"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["tdxplot", "--perweek", "-w", "0", "tickets.csv"]).is_err());
    }

    #[test]
    fn accepts_us_style_term_dates() {
        let cli =
            Cli::try_parse_from(["tdxplot", "--perbuilding", "-e", "5/1/2023", "tickets.csv"])
                .unwrap();
        assert_eq!(cli.term_end, NaiveDate::from_ymd_opt(2023, 5, 1));
    }
}
