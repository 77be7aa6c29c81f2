//! Support ticket organization model.
//!
//! Tickets from a help-desk export are attributed to buildings and rooms.
//! The [`Organization`] owns every building and ticket ingested from one
//! report and answers building lookups by normalized name.

pub mod error;
pub mod field;
pub mod options;
pub mod organization;
pub mod ticket;

pub use error::{ModelError, Result};
pub use field::{Field, FieldSet};
pub use options::{Palette, QueryOptions, QueryType};
pub use organization::{Building, BuildingId, Organization, Room, normalize_name};
pub use ticket::{Ticket, TicketRecord};
