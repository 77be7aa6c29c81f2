//! Header recognition for report exports.

use std::collections::BTreeMap;

use csv::StringRecord;
use tdx_model::{Field, FieldSet};

/// Header spellings accepted for each canonical field.
///
/// Comparison is case-insensitive on trimmed text.
pub fn header_synonyms(field: Field) -> &'static [&'static str] {
    match field {
        Field::Id => &["ID", "Ticket ID", "TicketID"],
        Field::Created => &[
            "Created",
            "Created Date",
            "Date Created",
            "Created On",
            "Creation Date",
        ],
        Field::Building => &["Class Support Building", "Building", "Support Building"],
        Field::Room => &["Room number", "Room", "Room No", "Room #"],
    }
}

fn normalize_header(value: &str) -> &str {
    value.trim_matches('\u{feff}').trim()
}

/// Column positions of the canonical fields found in a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    columns: BTreeMap<Field, usize>,
}

impl FieldMapping {
    /// Maps each recognized field to the first column carrying one of its
    /// spellings. Unrecognized columns are ignored and missing fields are
    /// simply absent.
    pub fn from_headers<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut columns = BTreeMap::new();
        for (index, header) in headers.into_iter().enumerate() {
            let header = normalize_header(header);
            let matched = Field::ALL.into_iter().find(|field| {
                header_synonyms(*field)
                    .iter()
                    .any(|synonym| synonym.eq_ignore_ascii_case(header))
            });
            if let Some(field) = matched {
                columns.entry(field).or_insert(index);
            }
        }
        Self { columns }
    }

    pub fn column(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.columns.contains_key(&field)
    }

    /// The canonical fields present in the header.
    pub fn fields(&self) -> FieldSet {
        self.columns.keys().copied().collect()
    }

    /// Trimmed cell value for `field`, or `None` when the column is missing
    /// or the cell is empty.
    pub fn value<'r>(&self, field: Field, record: &'r StringRecord) -> Option<&'r str> {
        self.column(field)
            .and_then(|index| record.get(index))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}
