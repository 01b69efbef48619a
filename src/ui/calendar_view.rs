//! Calendar screen: slot picker, booking form, and confirmation.

use chrono::NaiveDate;
use ratatui::prelude::*;

use crate::app::{App, HitTarget};
use crate::models::slots::{short_date_parts, slots_by_date, week_slots};
use crate::models::Focus;
use crate::theme::{
    BG_SECONDARY, BG_TERTIARY, GREEN_SUCCESS, GREEN_TERMINAL, RED_ERROR, TEXT_MUTED,
    TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::widgets::CalendarView;

use super::helpers::{heading, LineCanvas, Segment};

pub fn build(app: &App, width: u16, today: NaiveDate) -> LineCanvas {
    match app.calendar.view {
        CalendarView::Slots => build_slots(app, width, today),
        CalendarView::BookingForm => build_booking_form(app, width),
        CalendarView::Confirmation => build_confirmation(app, width),
    }
}

fn build_slots(app: &App, width: u16, today: NaiveDate) -> LineCanvas {
    let mut canvas = LineCanvas::new();
    canvas.push(heading("BOOK A CALL"));
    canvas.blank();

    canvas.push_segments(vec![
        (
            "[< prev]".to_string(),
            Style::default().fg(TEXT_SECONDARY).bg(BG_SECONDARY),
            Some(HitTarget::PrevWeek),
        ),
        (
            format!("  {}  ", app.calendar.week_label(today)),
            Style::default().fg(TEXT_PRIMARY),
            None,
        ),
        (
            "[next >]".to_string(),
            Style::default().fg(TEXT_SECONDARY).bg(BG_SECONDARY),
            Some(HitTarget::NextWeek),
        ),
    ]);
    canvas.blank();

    if app.calendar.loading {
        canvas.push(Line::from(Span::styled(
            "Loading available times...",
            Style::default().fg(TEXT_MUTED),
        )));
        return canvas;
    }
    if let Some(error) = &app.calendar.error {
        canvas.push_wrapped(error, width, Style::default().fg(RED_ERROR));
        return canvas;
    }

    let week = week_slots(&app.calendar.slots, today, app.calendar.week_offset);
    if week.is_empty() {
        canvas.push(Line::from(Span::styled(
            "No available times this week. Try another week.",
            Style::default().fg(TEXT_MUTED),
        )));
        return canvas;
    }

    for (date, slots) in slots_by_date(&week) {
        let (day, month_day) = short_date_parts(date);
        canvas.push(Line::from(Span::styled(
            format!("{} {}", day, month_day),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )));

        let mut segments: Vec<Segment> = vec![("  ".to_string(), Style::default(), None)];
        for slot in slots {
            let selected = app
                .calendar
                .selected
                .as_ref()
                .is_some_and(|s| s.id == slot.id);
            let style = if selected {
                Style::default()
                    .fg(GREEN_TERMINAL)
                    .bg(BG_TERTIARY)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT_SECONDARY).bg(BG_SECONDARY)
            };
            segments.push((
                format!("[{}]", slot.time),
                style,
                Some(HitTarget::SlotButton(slot.id.clone())),
            ));
            segments.push((" ".to_string(), Style::default(), None));
        }
        canvas.push_segments(segments);
        canvas.blank();
    }
    canvas
}

fn build_booking_form(app: &App, width: u16) -> LineCanvas {
    let mut canvas = LineCanvas::new();
    canvas.push(heading("CONFIRM YOUR TIME"));
    canvas.blank();

    if let Some(label) = app.calendar.selected_time_label() {
        canvas.push_wrapped(&label, width, Style::default().fg(GREEN_TERMINAL));
        canvas.blank();
    }

    for (label, value, focus) in [
        ("Name  ", &app.calendar.name, Focus::BookingName),
        ("Email ", &app.calendar.email, Focus::BookingEmail),
    ] {
        let mut value = value.clone();
        if app.focus == focus {
            value.push('█');
        }
        canvas.push_segments(vec![
            (format!("  {}", label), Style::default().fg(TEXT_MUTED), None),
            (
                format!("{:<32}", value),
                Style::default().fg(TEXT_PRIMARY).bg(BG_SECONDARY),
                Some(HitTarget::Field(focus)),
            ),
        ]);
    }
    canvas.blank();
    canvas.push_segments(vec![
        ("  ".to_string(), Style::default(), None),
        (
            "[ Confirm Booking ]".to_string(),
            Style::default()
                .fg(GREEN_TERMINAL)
                .bg(BG_SECONDARY)
                .add_modifier(Modifier::BOLD),
            Some(HitTarget::SubmitBooking),
        ),
        ("  ".to_string(), Style::default(), None),
        (
            "[ Cancel ]".to_string(),
            Style::default().fg(TEXT_MUTED).bg(BG_SECONDARY),
            Some(HitTarget::CancelBooking),
        ),
    ]);

    if let Some(error) = &app.calendar.booking_error {
        canvas.blank();
        canvas.push_wrapped(error, width, Style::default().fg(RED_ERROR));
    }
    canvas
}

fn build_confirmation(app: &App, width: u16) -> LineCanvas {
    let mut canvas = LineCanvas::new();
    canvas.push(heading("BOOKED"));
    canvas.blank();
    canvas.push(Line::from(Span::styled(
        "Booking confirmed!",
        Style::default()
            .fg(GREEN_SUCCESS)
            .add_modifier(Modifier::BOLD),
    )));
    if let Some(details) = &app.calendar.confirmation {
        canvas.push_wrapped(details, width, Style::default().fg(TEXT_PRIMARY));
    }
    canvas.blank();
    canvas.push_wrapped(
        "A calendar invite is on its way to your inbox.",
        width,
        Style::default().fg(TEXT_SECONDARY),
    );
    canvas
}
