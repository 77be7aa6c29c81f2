//! Canonical report fields.
//!
//! Help-desk exports name their columns differently depending on the report
//! template. Each column we understand is identified by one canonical
//! [`Field`]; the header spellings accepted for it live in the ingest crate.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// A semantically recognized report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Ticket identifier, used for diagnostics only.
    #[serde(rename = "ID")]
    Id,
    /// Ticket creation date.
    #[serde(rename = "Created")]
    Created,
    /// Building the ticket was raised for.
    #[serde(rename = "Class Support Building")]
    Building,
    /// Room within the building.
    #[serde(rename = "Room number")]
    Room,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Id, Field::Created, Field::Building, Field::Room];

    /// The canonical column name as it appears in the reference export.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Created => "Created",
            Field::Building => "Class Support Building",
            Field::Room => "Room number",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for Field {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.canonical_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

/// The set of canonical fields found in a report header.
pub type FieldSet = BTreeSet<Field>;
