//! Weekly bucketing over the academic term.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tdx_model::{Organization, QueryOptions};
use tracing::{debug, info};

use crate::error::{QueryError, Result};

/// Longest term a weekly query accepts, about a century.
pub const MAX_WEEKS: u32 = 5_200;

/// Resolved term bounds and week count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Term {
    pub start: NaiveDate,
    /// Inclusive.
    pub end: NaiveDate,
    pub weeks: u32,
}

impl Term {
    /// Week index of `date`, or `None` when it falls outside the term.
    ///
    /// Dates past the last full week (the term end itself when the term is
    /// an exact number of weeks long) fold into the last week.
    pub fn week_of(&self, date: NaiveDate) -> Option<u32> {
        if date < self.start || date > self.end {
            return None;
        }
        let days = (date - self.start).num_days();
        let week = u32::try_from(days / 7).unwrap_or(u32::MAX);
        Some(week.min(self.weeks.saturating_sub(1)))
    }

    /// First day of `week`, or `None` past the end of the calendar.
    pub fn week_start(&self, week: u32) -> Option<NaiveDate> {
        self.start.checked_add_days(Days::new(u64::from(week) * 7))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekCount {
    pub week: u32,
    /// First day of the week.
    pub start: NaiveDate,
    pub count: usize,
}

/// Per-week ticket counts covering every week of the term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyCounts {
    pub term_start: NaiveDate,
    pub term_end: NaiveDate,
    pub weeks: Vec<WeekCount>,
}

impl WeeklyCounts {
    /// `(week, count)` pairs in week order.
    pub fn pairs(&self) -> Vec<(u32, usize)> {
        self.weeks.iter().map(|w| (w.week, w.count)).collect()
    }

    pub fn total(&self) -> usize {
        self.weeks.iter().map(|w| w.count).sum()
    }
}

/// Works out the term from explicit options, falling back to the dates of
/// the tickets themselves.
///
/// - start: `term_start`, else the earliest `Created` date
/// - end: `term_end`, else `start + weeks * 7` days, else the latest date
/// - weeks: `weeks`, else enough whole or partial weeks to reach the end
///
/// An explicit `term_start` later than every ticket, with neither `term_end`
/// nor `weeks` given, leaves nothing to end the term on and fails with
/// [`QueryError::InvalidTermRange`] rather than yielding an empty week.
/// Terms longer than [`MAX_WEEKS`] fail with [`QueryError::TermTooLong`].
pub fn resolve_term<B>(organization: &Organization, options: &QueryOptions<B>) -> Result<Term> {
    match options.weeks {
        Some(0) => return Err(QueryError::InvalidWeeks),
        Some(weeks) if weeks > MAX_WEEKS => {
            return Err(QueryError::TermTooLong {
                weeks: u64::from(weeks),
            });
        }
        _ => {}
    }
    let dates = || organization.tickets().iter().filter_map(|t| t.created());

    let start = options
        .term_start
        .or_else(|| dates().min())
        .ok_or(QueryError::NoDatedTickets)?;
    let end = match (options.term_end, options.weeks) {
        (Some(end), _) => end,
        (None, Some(weeks)) => start
            .checked_add_days(Days::new(u64::from(weeks) * 7))
            .ok_or(QueryError::TermOutOfRange { start })?,
        (None, None) => dates().max().ok_or(QueryError::NoDatedTickets)?,
    };
    if end < start {
        return Err(QueryError::InvalidTermRange { start, end });
    }
    let weeks = match options.weeks {
        Some(weeks) => weeks,
        None => {
            let span = (end - start).num_days().unsigned_abs() / 7 + 1;
            u32::try_from(span)
                .ok()
                .filter(|weeks| *weeks <= MAX_WEEKS)
                .ok_or(QueryError::TermTooLong { weeks: span })?
        }
    };
    debug!(%start, %end, weeks, "resolved term");
    Ok(Term { start, end, weeks })
}

/// Counts tickets per calendar week of the term.
///
/// Tickets without a date or dated outside the term are left out. Every
/// week of the term appears in the result, including empty ones.
pub fn per_week(organization: &Organization, options: &QueryOptions) -> Result<WeeklyCounts> {
    let term = resolve_term(organization, options)?;
    let mut buckets = vec![0usize; term.weeks as usize];
    let mut excluded = 0usize;
    for ticket in organization.tickets() {
        match ticket.created().and_then(|date| term.week_of(date)) {
            Some(week) => buckets[week as usize] += 1,
            None => excluded += 1,
        }
    }

    let weeks = buckets
        .into_iter()
        .zip(0u32..)
        .map(|(count, week)| {
            term.week_start(week)
                .map(|start| WeekCount { week, start, count })
        })
        .collect::<Option<Vec<_>>>()
        .ok_or(QueryError::TermOutOfRange { start: term.start })?;
    let result = WeeklyCounts {
        term_start: term.start,
        term_end: term.end,
        weeks,
    };
    info!(
        weeks = term.weeks,
        counted = result.total(),
        excluded,
        "weekly counts computed"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdx_model::{QueryType, TicketRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_of_clamps_to_last_week() {
        let term = Term {
            start: date(2023, 1, 10),
            end: date(2023, 1, 24),
            weeks: 2,
        };
        assert_eq!(term.week_of(date(2023, 1, 10)), Some(0));
        assert_eq!(term.week_of(date(2023, 1, 16)), Some(0));
        assert_eq!(term.week_of(date(2023, 1, 17)), Some(1));
        assert_eq!(term.week_of(date(2023, 1, 24)), Some(1));
        assert_eq!(term.week_of(date(2023, 1, 25)), None);
        assert_eq!(term.week_of(date(2023, 1, 9)), None);
    }

    #[test]
    fn week_start_steps_by_seven_days() {
        let term = Term {
            start: date(2023, 1, 10),
            end: date(2023, 2, 10),
            weeks: 5,
        };
        assert_eq!(term.week_start(0), Some(date(2023, 1, 10)));
        assert_eq!(term.week_start(3), Some(date(2023, 1, 31)));
    }

    #[test]
    fn week_start_past_the_calendar_is_none() {
        let term = Term {
            start: NaiveDate::MAX,
            end: NaiveDate::MAX,
            weeks: 1,
        };
        assert_eq!(term.week_start(1), None);
    }

    #[test]
    fn week_count_above_limit_is_rejected() {
        let organization = Organization::new();
        let options: QueryOptions = QueryOptions::new(QueryType::PerWeek)
            .with_term_start(date(2023, 1, 10))
            .with_weeks(20_000_000);
        assert_eq!(
            per_week(&organization, &options),
            Err(QueryError::TermTooLong { weeks: 20_000_000 })
        );
    }

    #[test]
    fn term_running_off_the_calendar_is_an_error() {
        let organization = Organization::new();
        let start = NaiveDate::MAX - Days::new(7);
        let options: QueryOptions = QueryOptions::new(QueryType::PerWeek)
            .with_term_start(start)
            .with_weeks(2);
        assert_eq!(
            resolve_term(&organization, &options),
            Err(QueryError::TermOutOfRange { start })
        );
    }

    #[test]
    fn derived_term_longer_than_limit_is_rejected() {
        let organization = Organization::new();
        let options: QueryOptions = QueryOptions::new(QueryType::PerWeek)
            .with_term_start(date(1900, 1, 1))
            .with_term_end(date(2023, 1, 1));
        assert!(matches!(
            resolve_term(&organization, &options),
            Err(QueryError::TermTooLong { .. })
        ));
    }

    #[test]
    fn explicit_start_after_every_ticket_is_an_invalid_range() {
        let mut organization = Organization::new();
        organization.register_ticket(TicketRecord::new().with_created(date(2023, 1, 10)));
        let options: QueryOptions =
            QueryOptions::new(QueryType::PerWeek).with_term_start(date(2023, 2, 1));
        assert!(matches!(
            resolve_term(&organization, &options),
            Err(QueryError::InvalidTermRange { .. })
        ));
    }
}
