//! Up-front checks that reject a query before it runs.

use tdx_model::{Field, FieldSet, QueryOptions, QueryType};
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::week::MAX_WEEKS;

/// Report fields a query cannot run without.
pub fn required_fields(query: QueryType) -> &'static [Field] {
    match query {
        QueryType::PerWeek => &[Field::Created],
        QueryType::PerBuilding => &[Field::Building],
        QueryType::PerRoom => &[Field::Building, Field::Room],
    }
}

/// Rejects conflicting or missing options.
///
/// Works on unresolved options so it can run before the report is loaded.
pub fn validate_options<B>(options: &QueryOptions<B>) -> Result<()> {
    let query = options.query_type;
    match query {
        QueryType::PerRoom if options.building.is_none() => {
            return Err(QueryError::BuildingRequired);
        }
        QueryType::PerBuilding if options.building.is_some() => {
            return Err(QueryError::BuildingFilterNotAllowed);
        }
        _ => {}
    }
    if let Some(weeks) = options.weeks {
        if query != QueryType::PerWeek {
            return Err(QueryError::WeeksRequiresPerWeek);
        }
        if options.term_end.is_some() {
            return Err(QueryError::WeeksWithTermEnd);
        }
        if weeks == 0 {
            return Err(QueryError::InvalidWeeks);
        }
        if weeks > MAX_WEEKS {
            return Err(QueryError::TermTooLong {
                weeks: u64::from(weeks),
            });
        }
    }
    if let (Some(start), Some(end)) = (options.term_start, options.term_end)
        && end < start
    {
        return Err(QueryError::InvalidTermRange { start, end });
    }
    Ok(())
}

/// Rejects a query whose required columns are missing from the report.
pub fn check_fields(query: QueryType, fields_present: &FieldSet) -> Result<()> {
    let missing: Vec<Field> = required_fields(query)
        .iter()
        .copied()
        .filter(|field| !fields_present.contains(field))
        .collect();
    if missing.is_empty() {
        debug!(query = %query, "report provides all required fields");
        Ok(())
    } else {
        Err(QueryError::MissingFields { query, missing })
    }
}
