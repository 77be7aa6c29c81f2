//! Per-building and per-room counts.

use tdx_model::{Organization, QueryOptions, Ticket};
use tracing::info;

use crate::counts::GroupCounts;
use crate::error::{QueryError, Result};

/// Date restriction for grouped queries. With neither bound given every
/// ticket matches, dated or not.
fn in_range(ticket: &Ticket, options: &QueryOptions) -> bool {
    if options.term_start.is_none() && options.term_end.is_none() {
        return true;
    }
    ticket.created_within(options.term_start, options.term_end)
}

/// Counts tickets per building, keyed by display name.
///
/// Only buildings with at least one matching ticket appear.
pub fn per_building(organization: &Organization, options: &QueryOptions) -> Result<GroupCounts> {
    if options.building.is_some() {
        return Err(QueryError::BuildingFilterNotAllowed);
    }
    let mut counts = GroupCounts::new();
    for ticket in organization.tickets() {
        if !in_range(ticket, options) {
            continue;
        }
        if let Some(building) = ticket.building().and_then(|id| organization.building(id)) {
            counts.increment(building.name());
        }
    }
    info!(
        buildings = counts.len(),
        counted = counts.total(),
        "building counts computed"
    );
    Ok(counts)
}

/// Counts tickets per room of the building named in the options.
///
/// Tickets of that building without a room are not counted anywhere.
pub fn per_room(organization: &Organization, options: &QueryOptions) -> Result<GroupCounts> {
    let id = options.building.ok_or(QueryError::BuildingRequired)?;
    let building = organization
        .building(id)
        .ok_or_else(|| QueryError::UnknownBuilding(id.to_string()))?;

    let mut counts = GroupCounts::new();
    let mut without_room = 0usize;
    for ticket in organization.tickets() {
        if ticket.building() != Some(id) || !in_range(ticket, options) {
            continue;
        }
        match ticket.room() {
            Some(room) => counts.increment(room),
            None => without_room += 1,
        }
    }
    info!(
        building = building.name(),
        rooms = counts.len(),
        counted = counts.total(),
        without_room,
        "room counts computed"
    );
    Ok(counts)
}
