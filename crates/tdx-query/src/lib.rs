//! Aggregate queries over an ingested ticket report.
//!
//! Three queries are supported, each a pure function of the
//! [`Organization`] and the [`QueryOptions`]:
//!
//! - [`per_week`]: tickets per calendar week of the term, no gaps
//! - [`per_building`]: tickets per building
//! - [`per_room`]: tickets per room of one building
//!
//! Option conflicts and missing report fields are rejected up front by
//! [`validate_options`] and [`check_fields`]; a query never returns a
//! partial result.

mod counts;
mod error;
mod group;
mod validate;
mod week;

pub use counts::GroupCounts;
pub use error::{QueryError, Result};
pub use group::{per_building, per_room};
pub use validate::{check_fields, required_fields, validate_options};
pub use week::{MAX_WEEKS, Term, WeekCount, WeeklyCounts, per_week, resolve_term};

use tdx_model::{Organization, QueryOptions, QueryType};
use tracing::info_span;

/// Output of one query run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    Weekly(WeeklyCounts),
    Grouped(GroupCounts),
}

/// Runs the query selected by `options.query_type`.
pub fn run_query(organization: &Organization, options: &QueryOptions) -> Result<QueryResult> {
    let span = info_span!("query", query = %options.query_type);
    let _guard = span.enter();
    match options.query_type {
        QueryType::PerWeek => per_week(organization, options).map(QueryResult::Weekly),
        QueryType::PerBuilding => per_building(organization, options).map(QueryResult::Grouped),
        QueryType::PerRoom => per_room(organization, options).map(QueryResult::Grouped),
    }
}
