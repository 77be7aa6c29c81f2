use anyhow::Result;
use tdx_cli::pipeline::{RunOutput, run};
use tdx_model::QueryOptions;
use tracing::info_span;

use crate::cli::Cli;

/// Builds query options from the parsed command line.
pub fn options_from_cli(cli: &Cli) -> QueryOptions<String> {
    let mut options = QueryOptions::new(cli.query_type());
    options.name = cli.name.clone();
    if let Some(color) = cli.plot_color {
        options.color = color.into();
    }
    options.term_start = cli.term_start;
    options.term_end = cli.term_end;
    options.weeks = cli.weeks;
    options.building = cli.building.clone();
    options
}

pub fn run_report(cli: &Cli) -> Result<RunOutput> {
    let span = info_span!("report", path = %cli.report.display());
    let _guard = span.enter();
    run(&cli.report, options_from_cli(cli))
}
