//! Home screen: hero region, services, expertise, and the contact form.

use std::time::Instant;

use ratatui::prelude::*;

use crate::app::{App, HitTarget};
use crate::boot::BootFrame;
use crate::models::Focus;
use crate::theme::{
    faded, AMBER_WARNING, BG_SECONDARY, BOOT_GRAY, GREEN_DIM, GREEN_SUCCESS, GREEN_TERMINAL,
    RED_ERROR, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::widgets::contact::{FieldVisual, FIELD_EMAIL, FIELD_MESSAGE, FIELD_NAME};
use crate::widgets::AlertKind;

use super::helpers::{heading, LineCanvas};

/// Build the home screen. Returns the canvas and the virtual line of
/// the services section for the smooth-scroll binder.
pub fn build(app: &App, width: u16, now: Instant) -> (LineCanvas, u16) {
    let mut canvas = LineCanvas::new();
    let profile = app.config.hero_profile(&app.config.hero_style);

    canvas.blank();

    // Screen-effect scanline above the hero while the CRT look is on.
    let crt_on = app.hero.crt_active && !app.hero.crt_faded;
    if crt_on {
        canvas.push(Line::from(Span::styled(
            "░".repeat(width as usize),
            Style::default().fg(crate::theme::BG_TERTIARY),
        )));
    }

    // Hero title with optional caret.
    let visible: String = profile.text.chars().take(app.hero.visible_chars).collect();
    let blink_on =
        (now.saturating_duration_since(app.session_start).as_millis() / 500) % 2 == 0;
    let mut spans = vec![Span::styled(
        visible,
        Style::default()
            .fg(GREEN_TERMINAL)
            .add_modifier(Modifier::BOLD),
    )];
    if app.hero.caret_visible && (!app.hero.caret_blinking || blink_on) {
        spans.push(Span::styled("█", Style::default().fg(GREEN_TERMINAL)));
    }
    canvas.push(Line::from(spans).alignment(Alignment::Center));

    // Boot status line overlaying the spot under the title.
    match app.boot.as_ref() {
        Some(boot) => {
            let frame = boot.frame(now);
            match boot.line(frame) {
                Some(text) => {
                    let opacity = match frame {
                        BootFrame::FadeOut { opacity } => opacity,
                        _ => 1.0,
                    };
                    canvas.push(
                        Line::from(Span::styled(
                            text,
                            Style::default().fg(faded(BOOT_GRAY, opacity)),
                        ))
                        .alignment(Alignment::Center),
                    );
                }
                None => canvas.blank(),
            }
        }
        None => canvas.blank(),
    }

    // Subtitle; opacity carries both the fade-in and the hidden state.
    let opacity = app.hero.subtitle_opacity(now);
    canvas.push(
        Line::from(Span::styled(
            app.content.hero_subtitle.to_string(),
            Style::default().fg(faded(TEXT_SECONDARY, opacity)),
        ))
        .alignment(Alignment::Center),
    );
    if crt_on {
        canvas.push(Line::from(Span::styled(
            "░".repeat(width as usize),
            Style::default().fg(crate::theme::BG_TERTIARY),
        )));
    }
    canvas.blank();
    canvas.blank();

    // Services
    let services_line = canvas.cursor() as u16;
    canvas.push(heading("SERVICES"));
    canvas.push_wrapped(
        app.content.services_intro,
        width,
        Style::default().fg(TEXT_SECONDARY),
    );
    canvas.blank();
    for (i, card) in app.content.packages.iter().enumerate() {
        canvas.push_hit(interactive_card(card.title, card.summary), HitTarget::PackageCard(i));
    }
    canvas.blank();

    // Expertise
    canvas.push(heading("EXPERTISE"));
    for (i, card) in app.content.expertise.iter().enumerate() {
        canvas.push_hit(
            interactive_card(card.title, card.summary),
            HitTarget::ExpertiseCard(i),
        );
    }
    canvas.blank();

    // Contact form
    canvas.push(heading("CONTACT"));
    push_contact_form(&mut canvas, app, width);

    (canvas, services_line)
}

fn interactive_card(title: &str, summary: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("▸ ", Style::default().fg(GREEN_DIM)),
        Span::styled(
            title.to_string(),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", summary), Style::default().fg(TEXT_MUTED)),
    ])
}

fn push_contact_form(canvas: &mut LineCanvas, app: &App, width: u16) {
    let value_style = match app.contact.visual {
        FieldVisual::Normal => Style::default().fg(TEXT_PRIMARY).bg(BG_SECONDARY),
        FieldVisual::Scrambling => Style::default().fg(AMBER_WARNING).bg(BG_SECONDARY),
        FieldVisual::Glitching => Style::default().fg(RED_ERROR).bg(BG_SECONDARY),
        FieldVisual::EncryptingText => Style::default().fg(GREEN_TERMINAL).bg(BG_SECONDARY),
    };

    let fields = [
        ("Name    ", FIELD_NAME, Focus::ContactName),
        ("Email   ", FIELD_EMAIL, Focus::ContactEmail),
        ("Message ", FIELD_MESSAGE, Focus::ContactMessage),
    ];
    for (label, index, focus) in fields {
        let focused = app.focus == focus;
        let mut value = app.contact.fields[index].clone();
        if focused {
            value.push('█');
        }
        canvas.push_segments(vec![
            (format!("  {}", label), Style::default().fg(TEXT_MUTED), None),
            (
                format!("{:<width$}", value, width = 40.min(width as usize)),
                value_style,
                Some(HitTarget::Field(focus)),
            ),
        ]);
    }
    canvas.blank();
    canvas.push_segments(vec![
        ("  ".to_string(), Style::default(), None),
        (
            "[ Send Encrypted Message ]".to_string(),
            Style::default()
                .fg(GREEN_TERMINAL)
                .bg(BG_SECONDARY)
                .add_modifier(Modifier::BOLD),
            Some(HitTarget::SubmitContact),
        ),
    ]);

    if let Some(alert) = &app.contact.alert {
        canvas.blank();
        let color = match alert.kind {
            AlertKind::Error => RED_ERROR,
            AlertKind::Success => GREEN_SUCCESS,
        };
        let color = if alert.fading { faded(color, 0.4) } else { color };
        for line in alert.text.lines() {
            canvas.push_wrapped(line, width, Style::default().fg(color));
        }
    }
}
