//! Booking calendar widget
//!
//! Fetches available slots from the API, shows them a week at a time,
//! and walks the slot -> booking form -> confirmation flow. Network
//! failures render as static inline errors; there is no retry.

use chrono::NaiveDate;

use crate::api::ApiError;
use crate::models::slots::{long_date, week_bounds, Slot};

/// Which pane of the calendar screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarView {
    #[default]
    Slots,
    BookingForm,
    Confirmation,
}

#[derive(Debug, Clone, Default)]
pub struct CalendarWidget {
    pub view: CalendarView,
    pub week_offset: i64,
    pub slots: Vec<Slot>,
    pub loading: bool,
    /// Inline error in the slot list.
    pub error: Option<String>,
    pub selected: Option<Slot>,
    // Booking form fields.
    pub name: String,
    pub email: String,
    pub booking_error: Option<String>,
    pub submitting: bool,
    pub confirmation: Option<String>,
}

impl CalendarWidget {
    /// Reset for a fresh visit to the calendar screen; the caller kicks
    /// off the slot fetch.
    pub fn begin_loading(&mut self) {
        self.view = CalendarView::Slots;
        self.loading = true;
        self.error = None;
        self.booking_error = None;
        self.confirmation = None;
        self.selected = None;
    }

    pub fn on_slots(&mut self, result: Result<Vec<Slot>, ApiError>) {
        self.loading = false;
        match result {
            Ok(slots) => {
                self.slots = slots;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("slot fetch failed: {}", err);
                self.error =
                    Some("Error loading available times. Please try again.".to_string());
            }
        }
    }

    pub fn prev_week(&mut self) {
        self.week_offset -= 1;
    }

    pub fn next_week(&mut self) {
        self.week_offset += 1;
    }

    /// Header label for the visible week, e.g. `Aug 7 - Aug 14`.
    pub fn week_label(&self, today: NaiveDate) -> String {
        let (start, end) = week_bounds(today, self.week_offset);
        format!("{} - {}", start.format("%b %-d"), end.format("%b %-d"))
    }

    /// Select a slot by id and move to the booking form.
    pub fn select_slot(&mut self, slot_id: &str) -> bool {
        let Some(slot) = self.slots.iter().find(|s| s.id == slot_id).cloned() else {
            return false;
        };
        self.selected = Some(slot);
        self.view = CalendarView::BookingForm;
        self.booking_error = None;
        true
    }

    /// Human-readable selected time, e.g.
    /// `Monday, August 10 at 10:00 MT`.
    pub fn selected_time_label(&self) -> Option<String> {
        let slot = self.selected.as_ref()?;
        let date = slot.parsed_date()?;
        Some(format!("{} at {} MT", long_date(date), slot.time))
    }

    /// Back from the booking form to the slot list.
    pub fn cancel_booking(&mut self) {
        self.view = CalendarView::Slots;
        self.selected = None;
        self.booking_error = None;
    }

    pub fn on_booked(&mut self, result: Result<(), String>) {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.confirmation = self.selected_time_label();
                self.view = CalendarView::Confirmation;
            }
            Err(message) => {
                self.booking_error = Some(message);
            }
        }
    }
}
