//! Streaming CSV report loader.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord, Trim};
use tdx_model::{Field, FieldSet, Organization, TicketRecord};
use tracing::{debug, info, info_span, trace, warn};

use crate::dates::parse_date;
use crate::error::{IngestError, Result};
use crate::fields::FieldMapping;
use crate::quotes::QuoteTracker;

/// Row counters gathered while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows read (header excluded).
    pub rows: usize,
    /// Rows whose `Created` cell parsed to a date.
    pub dated: usize,
    /// Rows with a non-empty `Created` cell that matched no date format.
    pub unparseable_dates: usize,
}

/// A loaded report: the populated organization and the fields its header
/// provided.
#[derive(Debug, Clone)]
pub struct Report {
    organization: Organization,
    fields_present: FieldSet,
    stats: LoadStats,
}

impl Report {
    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    /// Canonical fields found in the header, fixed at load time.
    pub fn fields_present(&self) -> &FieldSet {
        &self.fields_present
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields_present.contains(&field)
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn into_organization(self) -> Organization {
        self.organization
    }
}

/// Loads a CSV ticket export.
///
/// Rows with missing or unparseable cells are kept with those values absent.
/// Structural CSV problems (bad quoting, inconsistent row width, no header)
/// fail the whole load with [`IngestError::MalformedReport`].
pub fn load_report(path: &Path) -> Result<Report> {
    let span = info_span!("load_report", path = %path.display());
    let _guard = span.enter();
    let started = Instant::now();

    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let report = read_report(file, path)?;

    info!(
        tickets = report.organization.ticket_count(),
        buildings = report.organization.buildings().len(),
        dated = report.stats.dated,
        duration_ms = started.elapsed().as_millis(),
        "report loaded"
    );
    Ok(report)
}

fn read_report<R: Read>(input: R, path: &Path) -> Result<Report> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(QuoteTracker::new(input));

    let headers = reader
        .headers()
        .map_err(|e| IngestError::from_csv(path, e))?
        .clone();
    if headers.iter().all(|h| h.trim_matches('\u{feff}').trim().is_empty()) {
        return Err(IngestError::MalformedReport {
            path: path.to_path_buf(),
            line: Some(1),
            message: "missing header row".to_string(),
        });
    }

    let mapping = FieldMapping::from_headers(headers.iter());
    let fields_present = mapping.fields();
    debug!(
        fields = ?fields_present.iter().map(|f| f.canonical_name()).collect::<Vec<_>>(),
        columns = headers.len(),
        "mapped report header"
    );

    let mut organization = Organization::new();
    let mut stats = LoadStats::default();
    let mut record = StringRecord::new();
    while reader
        .read_record(&mut record)
        .map_err(|e| IngestError::from_csv(path, e))?
    {
        stats.rows += 1;
        let ticket = ticket_from_record(&mapping, &record, &mut stats);
        organization.register_ticket(ticket);
    }

    if let Some(line) = reader.get_ref().unterminated_since() {
        return Err(IngestError::MalformedReport {
            path: path.to_path_buf(),
            line: Some(line),
            message: "unterminated quoted field".to_string(),
        });
    }

    if mapping.contains(Field::Created) && stats.rows > 0 && stats.dated == 0 {
        warn!(
            rows = stats.rows,
            "no Created value in the report could be parsed as a date"
        );
    }

    Ok(Report {
        organization,
        fields_present,
        stats,
    })
}

fn ticket_from_record(
    mapping: &FieldMapping,
    record: &StringRecord,
    stats: &mut LoadStats,
) -> TicketRecord {
    let id = mapping.value(Field::Id, record);
    let created = mapping.value(Field::Created, record).and_then(|value| {
        let parsed = parse_date(value);
        if parsed.is_none() {
            stats.unparseable_dates += 1;
            trace!(
                line = record.position().map(csv::Position::line),
                ticket = id.unwrap_or("-"),
                value,
                "unrecognized Created date, treating as absent"
            );
        }
        parsed
    });
    if created.is_some() {
        stats.dated += 1;
    }

    TicketRecord {
        id: id.map(str::to_string),
        created,
        building: mapping.value(Field::Building, record).map(str::to_string),
        room: mapping.value(Field::Room, record).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn read(content: &str) -> Result<Report> {
        read_report(content.as_bytes(), Path::new("memory.csv"))
    }

    #[test]
    fn test_reads_canonical_report() {
        let report = read(
            "Created,Class Support Building,Room number\n\
             2023-01-10,Hall A,101\n\
             2023-01-17,Hall A,102\n",
        )
        .unwrap();
        let org = report.organization();
        assert_eq!(org.ticket_count(), 2);
        assert_eq!(org.buildings().len(), 1);
        assert_eq!(
            org.tickets()[1].created(),
            NaiveDate::from_ymd_opt(2023, 1, 17)
        );
        assert_eq!(report.stats().dated, 2);
    }

    #[test]
    fn test_unparseable_date_is_row_level() {
        let report = read("Created,Building\nsoon,Hall A\n2023-01-10,Hall A\n").unwrap();
        let stats = report.stats();
        assert_eq!(stats.rows, 2);
        assert_eq!(stats.dated, 1);
        assert_eq!(stats.unparseable_dates, 1);
        assert!(report.organization().tickets()[0].created().is_none());
    }

    #[test]
    fn test_header_only_report_has_fields_but_no_tickets() {
        let report = read("Created,Room number\n").unwrap();
        assert!(report.has_field(Field::Created));
        assert!(report.has_field(Field::Room));
        assert_eq!(report.organization().ticket_count(), 0);
    }

    #[test]
    fn test_empty_input_is_malformed() {
        let result = read("");
        assert!(matches!(result, Err(IngestError::MalformedReport { .. })));
    }

    #[test]
    fn test_inconsistent_row_width_is_malformed() {
        let result = read("Created,Building\n2023-01-10,Hall A\n2023-01-11\n");
        match result {
            Err(IngestError::MalformedReport { line, .. }) => assert_eq!(line, Some(3)),
            other => panic!("expected malformed report, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_quote_is_malformed() {
        let result = read(
            "Created,Class Support Building,Room number\n\
             2023-01-10,Hall A,\"101\n\
             2023-01-17,Hall A,102\n",
        );
        match result {
            Err(IngestError::MalformedReport { line, message, .. }) => {
                assert_eq!(line, Some(2));
                assert_eq!(message, "unterminated quoted field");
            }
            other => panic!("expected malformed report, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_quote_in_header_is_malformed() {
        let result = read("Created,\"Building\n");
        assert!(matches!(
            result,
            Err(IngestError::MalformedReport { line: Some(1), .. })
        ));
    }

    #[test]
    fn test_quoted_cells() {
        let report = read("Building,Room\n\"Hall, East\",\"1,01\"\n").unwrap();
        let org = report.organization();
        assert_eq!(org.buildings()[0].name(), "Hall, East");
        assert_eq!(org.tickets()[0].room(), Some("1,01"));
    }
}
