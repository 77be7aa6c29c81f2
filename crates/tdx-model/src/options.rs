//! Query options handed to the aggregation engine.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{BuildingId, ModelError};

/// The aggregate a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// Tickets per calendar week of the term.
    PerWeek,
    /// Tickets per building.
    PerBuilding,
    /// Tickets per room within one building.
    PerRoom,
}

impl QueryType {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryType::PerWeek => "perweek",
            QueryType::PerBuilding => "perbuilding",
            QueryType::PerRoom => "perroom",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "perweek" => Ok(QueryType::PerWeek),
            "perbuilding" => Ok(QueryType::PerBuilding),
            "perroom" => Ok(QueryType::PerRoom),
            _ => Err(ModelError::UnknownQueryType(s.to_string())),
        }
    }
}

/// Plot palette choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    White,
    Black,
    Gray,
    Yellow,
    Red,
    #[default]
    Blue,
    Green,
    Brown,
    Pink,
    Orange,
    Purple,
}

impl Palette {
    pub const ALL: [Palette; 11] = [
        Palette::White,
        Palette::Black,
        Palette::Gray,
        Palette::Yellow,
        Palette::Red,
        Palette::Blue,
        Palette::Green,
        Palette::Brown,
        Palette::Pink,
        Palette::Orange,
        Palette::Purple,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Palette::White => "white",
            Palette::Black => "black",
            Palette::Gray => "gray",
            Palette::Yellow => "yellow",
            Palette::Red => "red",
            Palette::Blue => "blue",
            Palette::Green => "green",
            Palette::Brown => "brown",
            Palette::Pink => "pink",
            Palette::Orange => "orange",
            Palette::Purple => "purple",
        }
    }

    /// sRGB value matching the named web color.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Palette::White => (255, 255, 255),
            Palette::Black => (0, 0, 0),
            Palette::Gray => (128, 128, 128),
            Palette::Yellow => (255, 255, 0),
            Palette::Red => (255, 0, 0),
            Palette::Blue => (0, 0, 255),
            Palette::Green => (0, 128, 0),
            Palette::Brown => (165, 42, 42),
            Palette::Pink => (255, 192, 203),
            Palette::Orange => (255, 165, 0),
            Palette::Purple => (128, 0, 128),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Palette {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Palette::ALL
            .into_iter()
            .find(|color| color.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModelError::UnknownColor(s.to_string()))
    }
}

/// Options for one query run.
///
/// Values arrive already typed from the front end. `B` is the building
/// reference: the raw name as given on the command line until the report is
/// loaded, then the resolved [`BuildingId`]. Semantic checks (option
/// conflicts, field presence) are done by the query crate before any
/// aggregation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions<B = BuildingId> {
    pub query_type: QueryType,
    /// Plot title.
    pub name: Option<String>,
    pub color: Palette,
    /// Exclude tickets before this date; first day of week 0 for `PerWeek`.
    pub term_start: Option<NaiveDate>,
    /// Exclude tickets after this date.
    pub term_end: Option<NaiveDate>,
    /// Number of weeks in the term (`PerWeek` only).
    pub weeks: Option<u32>,
    pub building: Option<B>,
}

impl<B> QueryOptions<B> {
    pub fn new(query_type: QueryType) -> Self {
        Self {
            query_type,
            name: None,
            color: Palette::default(),
            term_start: None,
            term_end: None,
            weeks: None,
            building: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Palette) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_term_start(mut self, date: NaiveDate) -> Self {
        self.term_start = Some(date);
        self
    }

    #[must_use]
    pub fn with_term_end(mut self, date: NaiveDate) -> Self {
        self.term_end = Some(date);
        self
    }

    #[must_use]
    pub fn with_weeks(mut self, weeks: u32) -> Self {
        self.weeks = Some(weeks);
        self
    }

    #[must_use]
    pub fn with_building(mut self, building: B) -> Self {
        self.building = Some(building);
        self
    }

    /// Replaces the building reference, e.g. resolving a name to an id.
    pub fn try_map_building<C, E>(
        self,
        resolve: impl FnOnce(B) -> Result<C, E>,
    ) -> Result<QueryOptions<C>, E> {
        let building = self.building.map(resolve).transpose()?;
        Ok(QueryOptions {
            query_type: self.query_type,
            name: self.name,
            color: self.color,
            term_start: self.term_start,
            term_end: self.term_end,
            weeks: self.weeks,
            building,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_parses_every_name() {
        for color in Palette::ALL {
            assert_eq!(color.as_str().parse::<Palette>(), Ok(color));
        }
        assert_eq!("Purple".parse::<Palette>(), Ok(Palette::Purple));
        assert!("teal".parse::<Palette>().is_err());
    }

    #[test]
    fn try_map_building_resolves_names() {
        let options: QueryOptions<String> =
            QueryOptions::new(QueryType::PerRoom).with_building("Hall A".to_string());
        let resolved: Result<QueryOptions<usize>, String> =
            options.try_map_building(|name| Ok(name.len()));
        assert_eq!(resolved.unwrap().building, Some(6));

        let missing: Result<QueryOptions<usize>, String> =
            QueryOptions::<String>::new(QueryType::PerRoom)
                .with_building("Nowhere".to_string())
                .try_map_building(|name| Err(name));
        assert_eq!(missing.unwrap_err(), "Nowhere");
    }

    #[test]
    fn query_type_round_trips_through_str() {
        assert_eq!("perroom".parse::<QueryType>(), Ok(QueryType::PerRoom));
        assert_eq!(QueryType::PerWeek.to_string(), "perweek");
        assert!("perday".parse::<QueryType>().is_err());
    }
}
