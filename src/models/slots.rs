//! Booking slot data structures
//!
//! Wire types for the calendar endpoints plus the week-window math the
//! slot list renders through. Dates travel as `YYYY-MM-DD` strings;
//! anything unparseable is simply filtered out of the week view.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An available booking slot from `GET /api/slots`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Slot {
    pub id: String,
    pub date: String,
    pub time: String,
}

impl Slot {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Body for `POST /api/book`.
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    pub slot_id: String,
    pub name: String,
    pub email: String,
}

/// Response body for `POST /api/book`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// The [start, end) window for a week at `offset` weeks from today.
pub fn week_bounds(today: NaiveDate, offset: i64) -> (NaiveDate, NaiveDate) {
    let start = today + chrono::Duration::days(offset * 7);
    (start, start + chrono::Duration::days(7))
}

/// Slots falling inside the given week, in input order.
pub fn week_slots<'a>(slots: &'a [Slot], today: NaiveDate, offset: i64) -> Vec<&'a Slot> {
    let (start, end) = week_bounds(today, offset);
    slots
        .iter()
        .filter(|slot| {
            slot.parsed_date()
                .map(|d| d >= start && d < end)
                .unwrap_or(false)
        })
        .collect()
}

/// Group a week's slots by date, ordered by date.
pub fn slots_by_date<'a>(slots: &[&'a Slot]) -> BTreeMap<NaiveDate, Vec<&'a Slot>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&Slot>> = BTreeMap::new();
    for slot in slots {
        if let Some(date) = slot.parsed_date() {
            grouped.entry(date).or_default().push(slot);
        }
    }
    grouped
}

/// Short day/month header, e.g. `("Mon", "Aug 10")`.
pub fn short_date_parts(date: NaiveDate) -> (String, String) {
    (date.format("%a").to_string(), date.format("%b %-d").to_string())
}

/// Long booking-confirmation date, e.g. `Monday, August 10`.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: &str, date: &str, time: &str) -> Slot {
        Slot {
            id: id.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_slot_deserialize() {
        let json = r#"[{"id": "s1", "date": "2026-08-10", "time": "10:00"}]"#;
        let slots: Vec<Slot> = serde_json::from_str(json).unwrap();
        assert_eq!(slots[0].id, "s1");
        assert_eq!(
            slots[0].parsed_date(),
            Some(NaiveDate::from_ymd_opt(2026, 8, 10).unwrap())
        );
    }

    #[test]
    fn test_week_slots_filters_window() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let slots = vec![
            slot("s1", "2026-08-07", "10:00"),
            slot("s2", "2026-08-13", "11:00"),
            slot("s3", "2026-08-14", "09:00"), // next week
            slot("s4", "2026-08-01", "09:00"), // past
            slot("s5", "not-a-date", "09:00"),
        ];
        let this_week = week_slots(&slots, today, 0);
        assert_eq!(
            this_week.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            vec!["s1", "s2"]
        );
        let next_week = week_slots(&slots, today, 1);
        assert_eq!(next_week.len(), 1);
        assert_eq!(next_week[0].id, "s3");
    }

    #[test]
    fn test_slots_by_date_groups_and_orders() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let slots = vec![
            slot("s2", "2026-08-09", "14:00"),
            slot("s1", "2026-08-08", "10:00"),
            slot("s3", "2026-08-09", "15:00"),
        ];
        let week = week_slots(&slots, today, 0);
        let grouped = slots_by_date(&week);
        let dates: Vec<NaiveDate> = grouped.keys().copied().collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2026, 8, 8).unwrap(),
                NaiveDate::from_ymd_opt(2026, 8, 9).unwrap(),
            ]
        );
        assert_eq!(grouped[&dates[1]].len(), 2);
    }

    #[test]
    fn test_date_formatting() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        assert_eq!(short_date_parts(date), ("Mon".to_string(), "Aug 10".to_string()));
        assert_eq!(long_date(date), "Monday, August 10");
    }
}
