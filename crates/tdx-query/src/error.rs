use chrono::NaiveDate;
use thiserror::Error;

use tdx_model::{Field, QueryType};

use crate::week::MAX_WEEKS;

/// Query preconditions that were not met. Reported before any aggregation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("cannot run a {query} query without {} field(s) present in report", join_fields(.missing))]
    MissingFields { query: QueryType, missing: Vec<Field> },

    #[error("no building specified, a perroom query needs a building filter")]
    BuildingRequired,

    #[error("cannot filter to a single building in a perbuilding query")]
    BuildingFilterNotAllowed,

    #[error("a week count can only be given for a perweek query")]
    WeeksRequiresPerWeek,

    #[error("a week count and a term end cannot be given together")]
    WeeksWithTermEnd,

    #[error("the week count must be at least 1")]
    InvalidWeeks,

    #[error("a term of {weeks} weeks is longer than the {max}-week limit", max = MAX_WEEKS)]
    TermTooLong { weeks: u64 },

    #[error("a term starting {start} runs past the last representable date")]
    TermOutOfRange { start: NaiveDate },

    #[error("term end {end} is before term start {start}")]
    InvalidTermRange { start: NaiveDate, end: NaiveDate },

    #[error("no ticket in the report has a usable Created date")]
    NoDatedTickets,

    #[error("building {0} is not part of this report")]
    UnknownBuilding(String),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.canonical_name())
        .collect::<Vec<_>>()
        .join(" and ")
}

pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_names_canonical_columns() {
        let err = QueryError::MissingFields {
            query: QueryType::PerRoom,
            missing: vec![Field::Building, Field::Room],
        };
        assert_eq!(
            err.to_string(),
            "cannot run a perroom query without Class Support Building and Room number field(s) present in report"
        );
    }

    #[test]
    fn term_too_long_message_names_the_limit() {
        let err = QueryError::TermTooLong { weeks: 20_000_000 };
        assert_eq!(
            err.to_string(),
            format!("a term of 20000000 weeks is longer than the {MAX_WEEKS}-week limit")
        );
    }
}
