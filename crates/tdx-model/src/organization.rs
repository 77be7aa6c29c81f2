//! Building and room registry for one ingested report.

use std::collections::HashMap;
use std::fmt;

use crate::{Ticket, TicketRecord};

/// Normalizes a building name for identity comparison.
///
/// Lookups are case-insensitive and ignore leading, trailing and repeated
/// inner whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Index of a [`Building`] within its [`Organization`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildingId(usize);

impl BuildingId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A room within a building, identified by its number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    number: String,
}

impl Room {
    pub fn number(&self) -> &str {
        &self.number
    }
}

#[derive(Debug, Clone)]
pub struct Building {
    id: BuildingId,
    name: String,
    rooms: Vec<Room>,
}

impl Building {
    pub fn id(&self) -> BuildingId {
        self.id
    }

    /// Display name, fixed to the first spelling seen in the report.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rooms in the order they were first encountered.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn find_room(&self, number: &str) -> Option<&Room> {
        let number = number.trim();
        self.rooms.iter().find(|room| room.number == number)
    }

    fn add_room(&mut self, number: &str) {
        if self.find_room(number).is_none() {
            self.rooms.push(Room {
                number: number.trim().to_string(),
            });
        }
    }
}

/// Registry of buildings and the ordered sequence of tickets.
///
/// Populated once by the report loader and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Organization {
    buildings: Vec<Building>,
    by_name: HashMap<String, BuildingId>,
    tickets: Vec<Ticket>,
}

impl Organization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a building by name, ignoring case and surrounding whitespace.
    pub fn find_building(&self, name: &str) -> Option<&Building> {
        self.by_name
            .get(&normalize_name(name))
            .map(|id| &self.buildings[id.0])
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id.0)
    }

    /// Buildings in first-encountered order.
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Tickets in ingestion order.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn ticket_count(&self) -> usize {
        self.tickets.len()
    }

    /// Registers one ticket, creating its building and room on first sight.
    ///
    /// Room numbers are stored trimmed of surrounding whitespace but
    /// otherwise verbatim, so `" 101 "` and `"101"` are the same room while
    /// `"1a"` and `"1A"` are not. Blank building names and room numbers
    /// count as absent.
    pub fn register_ticket(&mut self, record: TicketRecord) -> &Ticket {
        let building = record
            .building
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map(|name| self.ensure_building(name));
        let room = record
            .room
            .map(|room| room.trim().to_string())
            .filter(|room| !room.is_empty());
        if let (Some(id), Some(number)) = (building, room.as_deref()) {
            self.buildings[id.0].add_room(number);
        }
        self.tickets.push(Ticket {
            id: record.id,
            created: record.created,
            building,
            room,
        });
        &self.tickets[self.tickets.len() - 1]
    }

    fn ensure_building(&mut self, name: &str) -> BuildingId {
        let key = normalize_name(name);
        if let Some(id) = self.by_name.get(&key) {
            return *id;
        }
        let id = BuildingId(self.buildings.len());
        self.buildings.push(Building {
            id,
            name: name.trim().to_string(),
            rooms: Vec::new(),
        });
        self.by_name.insert(key, id);
        id
    }
}
