//! Pagination and date layout for the printable journal.
//!
//! A journal is a flat run of daily slots laid out on A4 sheets. The first
//! sheet carries the covers in its top half, so it only has room for two
//! slots; every following sheet holds four slots in a 2x2 grid. Everything in
//! here is pure arithmetic over `u32` counts and chrono dates.

use chrono::{Days, NaiveDate};
use serde::Serialize;

// ============================================================================
// Constants
// ============================================================================

/// Slots available on the title sheet (bottom half, below the covers)
pub const TITLE_SLOTS: u32 = 2;

/// Slots on every regular sheet
pub const REGULAR_SLOTS: u32 = 4;

// ============================================================================
// Data Structures
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetKind {
    Title,
    Regular,
}

impl SheetKind {
    pub fn capacity(self) -> usize {
        match self {
            SheetKind::Title => TITLE_SLOTS as usize,
            SheetKind::Regular => REGULAR_SLOTS as usize,
        }
    }
}

/// One printable cell. `Empty` is a placeholder used to pad the last sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Slot<T> {
    Filled(T),
    Empty,
}

impl<T> Slot<T> {
    pub fn as_filled(&self) -> Option<&T> {
        match self {
            Slot::Filled(item) => Some(item),
            Slot::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sheet<T> {
    pub kind: SheetKind,
    pub slots: Vec<Slot<T>>,
}

impl<T> Sheet<T> {
    fn padded(kind: SheetKind, items: Vec<T>) -> Self {
        let slots = items
            .into_iter()
            .map(Slot::Filled)
            .chain(std::iter::repeat_with(|| Slot::Empty))
            .take(kind.capacity())
            .collect();
        Sheet { kind, slots }
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }
}

/// A single journal day: its running number and, in date-range mode, the
/// calendar date it is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JournalDay {
    pub number: u32,
    pub date: Option<NaiveDate>,
}

// ============================================================================
// Day / Page Arithmetic
// ============================================================================

/// Inclusive number of days covered by `start..=end`.
///
/// The difference is taken as an absolute value, so a reversed pair still
/// counts the days between them. Callers that want to reject reversed ranges
/// must check the order themselves.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = end.signed_duration_since(start).num_days().unsigned_abs();
    u32::try_from(span.saturating_add(1)).unwrap_or(u32::MAX)
}

/// Regular sheets needed after the title sheet to hold `days` slots.
pub fn pages_for_days(days: u32) -> u32 {
    if days <= TITLE_SLOTS {
        return 0;
    }
    (days - TITLE_SLOTS).div_ceil(REGULAR_SLOTS)
}

/// Slots provided by the title sheet plus `pages` regular sheets.
pub const fn days_for_pages(pages: u32) -> u32 {
    TITLE_SLOTS.saturating_add(REGULAR_SLOTS.saturating_mul(pages))
}

/// Consecutive calendar dates starting at `start` (inclusive).
///
/// The iterator is lazy and can be cloned to restart it. It ends early rather
/// than overflowing if the run would pass chrono's last representable date.
pub fn generate_date_sequence(
    start: NaiveDate,
    total_days: u32,
) -> impl Iterator<Item = NaiveDate> + Clone {
    (0..u64::from(total_days)).map_while(move |offset| start.checked_add_days(Days::new(offset)))
}

/// Builds the numbered day list for either mode. With a start date every day
/// is bound to a calendar date; without one the days are unbound.
pub fn journal_days(start: Option<NaiveDate>, total_days: u32) -> Vec<JournalDay> {
    match start {
        Some(start) => generate_date_sequence(start, total_days)
            .zip(1..)
            .map(|(date, number)| JournalDay {
                number,
                date: Some(date),
            })
            .collect(),
        None => (1..=total_days)
            .map(|number| JournalDay { number, date: None })
            .collect(),
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Splits a flat list of slots into sheets.
///
/// The first two items go on the title sheet, the rest in chunks of four.
/// The last sheet is padded with [`Slot::Empty`] up to its capacity, never
/// dropped. An empty input yields no sheets.
pub fn paginate<T, I>(items: I) -> Vec<Sheet<T>>
where
    I: IntoIterator<Item = T>,
{
    let mut items = items.into_iter();
    let mut sheets = Vec::new();

    let title: Vec<T> = items.by_ref().take(SheetKind::Title.capacity()).collect();
    if title.is_empty() {
        return sheets;
    }
    sheets.push(Sheet::padded(SheetKind::Title, title));

    loop {
        let chunk: Vec<T> = items
            .by_ref()
            .take(SheetKind::Regular.capacity())
            .collect();
        if chunk.is_empty() {
            break;
        }
        sheets.push(Sheet::padded(SheetKind::Regular, chunk));
    }

    sheets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn pages_round_trip_through_days() {
        for pages in 0..=100 {
            assert_eq!(pages_for_days(days_for_pages(pages)), pages);
        }
    }

    #[test]
    fn days_round_trip_rounds_up_to_whole_sheets() {
        assert_eq!(days_for_pages(pages_for_days(0)), 2);
        assert_eq!(days_for_pages(pages_for_days(1)), 2);
        assert_eq!(days_for_pages(pages_for_days(2)), 2);
        for days in 3..=402 {
            let rounded = days_for_pages(pages_for_days(days));
            assert!(rounded >= days, "{days} rounded down to {rounded}");
            assert!(rounded - days < REGULAR_SLOTS);
        }
    }

    #[test]
    fn pages_for_days_matches_sheet_capacity() {
        assert_eq!(pages_for_days(3), 1);
        assert_eq!(pages_for_days(6), 1);
        assert_eq!(pages_for_days(7), 2);
        assert_eq!(pages_for_days(22), 5);
        assert_eq!(days_for_pages(5), 22);
    }

    #[test]
    fn days_for_pages_saturates() {
        assert_eq!(days_for_pages(u32::MAX), u32::MAX);
    }

    #[test]
    fn same_day_range_is_one_day() {
        let day = date("2024-07-14");
        assert_eq!(days_between(day, day), 1);
    }

    #[test]
    fn january_is_thirty_one_days() {
        assert_eq!(days_between(date("2024-01-01"), date("2024-01-31")), 31);
    }

    #[test]
    fn reversed_range_counts_the_same_span() {
        assert_eq!(days_between(date("2024-01-31"), date("2024-01-01")), 31);
    }

    #[test]
    fn range_across_year_end() {
        assert_eq!(days_between(date("2023-12-30"), date("2024-01-02")), 4);
    }

    #[test]
    fn date_sequence_crosses_leap_day() {
        let dates: Vec<NaiveDate> = generate_date_sequence(date("2024-02-28"), 3).collect();
        assert_eq!(
            dates,
            vec![date("2024-02-28"), date("2024-02-29"), date("2024-03-01")]
        );
    }

    #[test]
    fn date_sequence_is_restartable() {
        let seq = generate_date_sequence(date("2023-12-31"), 2);
        let first: Vec<NaiveDate> = seq.clone().collect();
        let second: Vec<NaiveDate> = seq.collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![date("2023-12-31"), date("2024-01-01")]);
    }

    #[test]
    fn date_sequence_stops_at_max_date() {
        let dates: Vec<NaiveDate> = generate_date_sequence(NaiveDate::MAX, 5).collect();
        assert_eq!(dates, vec![NaiveDate::MAX]);
    }

    #[test]
    fn empty_input_has_no_sheets() {
        let sheets: Vec<Sheet<JournalDay>> = paginate(Vec::new());
        assert!(sheets.is_empty());
    }

    #[test]
    fn single_day_pads_title_sheet() {
        let sheets = paginate(journal_days(None, 1));
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].kind, SheetKind::Title);
        assert_eq!(sheets[0].slots.len(), 2);
        assert!(!sheets[0].slots[0].is_empty());
        assert!(sheets[0].slots[1].is_empty());
    }

    #[test]
    fn four_days_leave_two_placeholders() {
        let sheets = paginate(journal_days(None, 4));
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].filled_count(), 2);
        assert_eq!(sheets[1].kind, SheetKind::Regular);
        assert_eq!(sheets[1].slots.len(), 4);
        assert!(!sheets[1].slots[1].is_empty());
        assert!(sheets[1].slots[2].is_empty());
        assert!(sheets[1].slots[3].is_empty());
    }

    #[test]
    fn six_days_fill_title_and_one_sheet() {
        let sheets = paginate(journal_days(None, 6));
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].filled_count(), 2);
        assert_eq!(sheets[1].filled_count(), 4);
    }

    #[test]
    fn sheet_count_matches_page_formula() {
        for days in 1..=60 {
            let sheets = paginate(journal_days(None, days));
            assert_eq!(sheets.len() as u32, 1 + pages_for_days(days), "days={days}");
            let filled: usize = sheets.iter().map(Sheet::filled_count).sum();
            assert_eq!(filled as u32, days);
        }
    }

    #[test]
    fn dated_and_unbound_runs_have_same_shape() {
        let dated = paginate(journal_days(Some(date("2024-01-01")), 9));
        let unbound = paginate(journal_days(None, 9));
        assert_eq!(dated.len(), unbound.len());
        for (a, b) in dated.iter().zip(&unbound) {
            assert_eq!(a.kind, b.kind);
            let a_shape: Vec<bool> = a.slots.iter().map(Slot::is_empty).collect();
            let b_shape: Vec<bool> = b.slots.iter().map(Slot::is_empty).collect();
            assert_eq!(a_shape, b_shape);
        }
    }

    #[test]
    fn journal_days_are_numbered_from_one() {
        let days = journal_days(Some(date("2024-03-30")), 3);
        assert_eq!(days[0], JournalDay { number: 1, date: Some(date("2024-03-30")) });
        assert_eq!(days[2], JournalDay { number: 3, date: Some(date("2024-04-01")) });
    }

    #[test]
    fn paginate_is_idempotent() {
        let days = journal_days(Some(date("2024-05-01")), 11);
        assert_eq!(paginate(days.clone()), paginate(days));
    }

    #[test]
    fn layout_serializes_placeholders_as_null() {
        let sheets = paginate(journal_days(Some(date("2024-01-01")), 1));
        let json = serde_json::to_value(&sheets).unwrap();
        assert_eq!(json[0]["kind"], "title");
        assert_eq!(json[0]["slots"][0]["number"], 1);
        assert_eq!(json[0]["slots"][0]["date"], "2024-01-01");
        assert!(json[0]["slots"][1].is_null());
    }
}
