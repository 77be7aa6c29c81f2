//! Conservation properties of the aggregate queries.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use tdx_model::{Organization, QueryOptions, QueryType, TicketRecord};
use tdx_query::{per_building, per_room, per_week};

const BUILDINGS: [&str; 4] = ["Hall A", "hall a ", "Hall B", "Science Center"];

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

fn arb_ticket() -> impl Strategy<Value = TicketRecord> {
    (
        proptest::option::of(0u64..120),
        proptest::option::of(0usize..BUILDINGS.len()),
        proptest::option::of(100u32..106),
    )
        .prop_map(|(offset, building, room)| TicketRecord {
            id: None,
            created: offset.map(|days| base() + Days::new(days)),
            building: building.map(|index| BUILDINGS[index].to_string()),
            room: room.map(|number| number.to_string()),
        })
}

fn build(records: &[TicketRecord]) -> Organization {
    let mut org = Organization::new();
    for record in records {
        org.register_ticket(record.clone());
    }
    org
}

proptest! {
    #[test]
    fn per_building_counts_every_ticket_with_a_building(
        records in proptest::collection::vec(arb_ticket(), 0..80)
    ) {
        let org = build(&records);
        let counts = per_building(&org, &QueryOptions::new(QueryType::PerBuilding)).unwrap();
        let expected = records.iter().filter(|r| r.building.is_some()).count();
        prop_assert_eq!(counts.total(), expected);
    }

    #[test]
    fn per_week_counts_every_ticket_within_the_term(
        records in proptest::collection::vec(arb_ticket(), 0..80),
        start_offset in 0u64..60,
        weeks in 1u32..12,
    ) {
        let org = build(&records);
        let start = base() + Days::new(start_offset);
        let options = QueryOptions::new(QueryType::PerWeek)
            .with_term_start(start)
            .with_weeks(weeks);
        let weekly = per_week(&org, &options).unwrap();
        let end = start + Days::new(u64::from(weeks) * 7);

        let expected = records
            .iter()
            .filter_map(|r| r.created)
            .filter(|d| *d >= start && *d <= end)
            .count();
        prop_assert_eq!(weekly.total(), expected);
        prop_assert_eq!(weekly.weeks.len(), weeks as usize);
        let indices: Vec<u32> = weekly.weeks.iter().map(|w| w.week).collect();
        prop_assert_eq!(indices, (0..weeks).collect::<Vec<_>>());
    }

    #[test]
    fn per_room_never_counts_tickets_without_a_room(
        records in proptest::collection::vec(arb_ticket(), 1..80)
    ) {
        let mut org = build(&records);
        org.register_ticket(TicketRecord::new().with_building("Hall A"));
        let id = org.find_building("Hall A").unwrap().id();
        let options = QueryOptions::new(QueryType::PerRoom).with_building(id);
        let counts = per_room(&org, &options).unwrap();

        let expected = org
            .tickets()
            .iter()
            .filter(|t| t.building() == Some(id) && t.room().is_some())
            .count();
        prop_assert_eq!(counts.total(), expected);
    }

    #[test]
    fn identical_input_gives_identical_results(
        records in proptest::collection::vec(arb_ticket(), 0..40)
    ) {
        let first = build(&records);
        let second = build(&records);
        let options = QueryOptions::new(QueryType::PerBuilding);
        prop_assert_eq!(
            per_building(&first, &options).unwrap(),
            per_building(&second, &options).unwrap()
        );
    }
}
