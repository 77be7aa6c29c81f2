//! Help-desk report ingestion.
//!
//! This crate reads a CSV ticket export into a [`tdx_model::Organization`].
//!
//! # Features
//!
//! - **Field Mapping**: Recognize canonical columns under their export-specific spellings
//! - **Date Parsing**: Probe an ordered list of date formats, first match wins
//! - **Report Loading**: Stream rows into tickets, buildings and rooms
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tdx_ingest::load_report;
//! use tdx_model::Field;
//!
//! let report = load_report(Path::new("tickets.csv"))?;
//! if report.fields_present().contains(&Field::Created) {
//!     println!("{} tickets", report.organization().ticket_count());
//! }
//! ```

mod dates;
mod error;
mod fields;
mod quotes;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Date Parsing ===
pub use dates::{DATE_FORMATS, parse_date};

// === Field Mapping ===
pub use fields::{FieldMapping, header_synonyms};

// === Report Loading ===
pub use reader::{LoadStats, Report, load_report};
