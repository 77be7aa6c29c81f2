//! Run stages: input checks, report loading, field checks, building
//! resolution and the query itself.
//!
//! Every stage fails fast; nothing is printed until the query succeeded.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tdx_ingest::{Report, load_report};
use tdx_model::{Organization, QueryOptions, QueryType};
use tdx_query::{QueryError, QueryResult, check_fields, run_query, validate_options};
use tracing::debug;

/// Everything the display layer needs after a successful run.
#[derive(Debug)]
pub struct RunOutput {
    pub options: QueryOptions,
    /// Display name of the building filter, if any.
    pub building_name: Option<String>,
    pub result: QueryResult,
}

impl RunOutput {
    /// Plot title: the `--name` option or a default per query.
    pub fn title(&self) -> String {
        if let Some(name) = &self.options.name {
            return name.clone();
        }
        match (self.options.query_type, &self.building_name) {
            (QueryType::PerWeek, _) => "Tickets per week".to_string(),
            (QueryType::PerBuilding, _) => "Tickets per building".to_string(),
            (QueryType::PerRoom, Some(building)) => format!("Tickets in {building} per room"),
            (QueryType::PerRoom, None) => "Tickets per room".to_string(),
        }
    }
}

/// Checks that the report path exists and names a CSV file.
pub fn check_report_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("no report file provided");
    }
    if !path.exists() {
        bail!("file {} not found", path.display());
    }
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        bail!("file {} is not a CSV file", path.display());
    }
    Ok(())
}

/// Resolves the building name given on the command line.
pub fn resolve_options(
    organization: &Organization,
    options: QueryOptions<String>,
) -> Result<QueryOptions, QueryError> {
    options.try_map_building(|name| {
        organization
            .find_building(&name)
            .map(|building| building.id())
            .ok_or(QueryError::UnknownBuilding(name))
    })
}

/// Runs one query against one report file.
pub fn run(report_path: &Path, options: QueryOptions<String>) -> Result<RunOutput> {
    check_report_path(report_path)?;
    validate_options(&options)?;

    let report: Report = load_report(report_path)?;
    check_fields(options.query_type, report.fields_present())?;

    let organization = report.organization();
    let options = resolve_options(organization, options)?;
    let building_name = options
        .building
        .and_then(|id| organization.building(id))
        .map(|building| building.name().to_string());
    debug!(building = building_name.as_deref(), "resolved query options");

    let result = run_query(organization, &options)
        .with_context(|| format!("{} query failed", options.query_type))?;

    Ok(RunOutput {
        options,
        building_name,
        result,
    })
}
