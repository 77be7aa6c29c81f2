use chrono::NaiveDate;

use crate::BuildingId;

/// A ticket as read from one report row, before building resolution.
///
/// Empty cells are represented as `None`; the loader never stores empty
/// strings here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketRecord {
    pub id: Option<String>,
    pub created: Option<NaiveDate>,
    pub building: Option<String>,
    pub room: Option<String>,
}

impl TicketRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_created(mut self, created: NaiveDate) -> Self {
        self.created = Some(created);
        self
    }

    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.building = Some(building.into());
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// One support request registered in an [`Organization`](crate::Organization).
///
/// Tickets are immutable once registered. The room number is only meaningful
/// together with a building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub(crate) id: Option<String>,
    pub(crate) created: Option<NaiveDate>,
    pub(crate) building: Option<BuildingId>,
    pub(crate) room: Option<String>,
}

impl Ticket {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn created(&self) -> Option<NaiveDate> {
        self.created
    }

    pub fn building(&self) -> Option<BuildingId> {
        self.building
    }

    /// Room number, present only when the ticket also names a building.
    pub fn room(&self) -> Option<&str> {
        self.building.and(self.room.as_deref())
    }

    /// True when the creation date falls within `[start, end]`.
    ///
    /// Undated tickets never match.
    pub fn created_within(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        let Some(created) = self.created else {
            return false;
        };
        start.is_none_or(|start| created >= start) && end.is_none_or(|end| created <= end)
    }
}
