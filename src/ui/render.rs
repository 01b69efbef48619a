//! Top-level frame rendering.

use std::time::Instant;

use ratatui::prelude::*;
use ratatui::widgets::{Block as UiBlock, Borders, Clear, Paragraph};

use crate::app::{App, HitTarget};
use crate::models::Route;
use crate::theme::{
    BG_PRIMARY, BG_SECONDARY, BORDER_SUBTLE, GREEN_DIM, GREEN_TERMINAL, ROUNDED_BORDERS,
    TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY,
};

use super::helpers::wrap_text;
use super::{about, blog, calendar_view, home, work};

pub fn render(frame: &mut Frame<'_>, app: &mut App, now: Instant) {
    app.hits.clear();
    let area = frame.area();
    app.viewport = (area.width, area.height);

    frame.render_widget(
        UiBlock::default().style(Style::default().bg(BG_PRIMARY)),
        area,
    );

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1], now);
    render_footer(frame, app, chunks[2]);

    if app.narrow() && app.menu.open {
        render_menu_panel(frame, app, chunks[1]);
    }
    render_popup(frame, app, area);
}

fn render_header(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut col: u16 = 0;
    let mut put = |spans: &mut Vec<Span<'static>>,
                   col: &mut u16,
                   text: String,
                   style: Style,
                   target: Option<HitTarget>,
                   app: &mut App| {
        let width = text.chars().count() as u16;
        if let Some(target) = target {
            if *col < area.width {
                app.register_hit(
                    Rect::new(area.x + *col, area.y, width.min(area.width - *col), 1),
                    target,
                );
            }
        }
        *col += width;
        spans.push(Span::styled(text, style));
    };

    let brand_style = Style::default()
        .fg(GREEN_TERMINAL)
        .add_modifier(Modifier::BOLD);

    if app.narrow() {
        let toggle = if app.menu.open { "[≡]" } else { " ≡ " };
        put(
            &mut spans,
            &mut col,
            toggle.to_string(),
            Style::default().fg(GREEN_TERMINAL),
            Some(HitTarget::MenuToggle),
            app,
        );
        put(
            &mut spans,
            &mut col,
            " BLOCKHEAD".to_string(),
            brand_style,
            None,
            app,
        );
    } else {
        put(
            &mut spans,
            &mut col,
            " BLOCKHEAD ".to_string(),
            brand_style,
            None,
            app,
        );
        for item in app.content.nav.clone() {
            if item.route == Route::Home && app.hide_home_link {
                continue;
            }
            let active = app.route == item.route;
            let style = if active {
                Style::default()
                    .fg(GREEN_TERMINAL)
                    .add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default().fg(TEXT_SECONDARY)
            };
            put(
                &mut spans,
                &mut col,
                format!("  {}", item.label),
                style,
                Some(HitTarget::NavItem(item.route)),
                app,
            );
        }
        put(
            &mut spans,
            &mut col,
            "  Services".to_string(),
            Style::default().fg(TEXT_SECONDARY),
            Some(HitTarget::ServicesLink),
            app,
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(BG_SECONDARY)),
        area,
    );
}

fn render_content(frame: &mut Frame<'_>, app: &mut App, area: Rect, now: Instant) {
    let content_area = area.inner(Margin::new(2, 1));
    let width = content_area.width;

    let canvas = match app.route {
        Route::Home => {
            let (canvas, services_line) = home::build(app, width, now);
            app.services_line = services_line;
            canvas
        }
        Route::About => about::build(app, width),
        Route::Blog => blog::build(app, width),
        Route::Work => work::build(app, width),
        Route::Calendar => {
            let today = chrono::Local::now().date_naive();
            calendar_view::build(app, width, today)
        }
    };

    let max_scroll = canvas.height().saturating_sub(content_area.height as usize) as u16;
    if app.scroll > max_scroll {
        app.scroll = max_scroll;
    }
    let scroll = app.scroll;
    canvas.render(frame, content_area, scroll, app);
}

fn render_menu_panel(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let items: Vec<_> = app
        .content
        .nav
        .clone()
        .into_iter()
        .filter(|item| !(item.route == Route::Home && app.hide_home_link))
        .collect();
    let height = (items.len() as u16 + 2).min(area.height);
    let panel = Rect::new(area.x, area.y, 20.min(area.width), height);

    frame.render_widget(Clear, panel);
    let block = UiBlock::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .style(Style::default().bg(BG_SECONDARY));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);
    app.register_hit(panel, HitTarget::MenuPanel);

    for (i, item) in items.iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.y + inner.height {
            break;
        }
        let active = app.route == item.route;
        let style = if active {
            Style::default().fg(GREEN_TERMINAL)
        } else {
            Style::default().fg(TEXT_PRIMARY)
        };
        let line_area = Rect::new(inner.x, y, inner.width, 1);
        app.register_hit(line_area, HitTarget::MenuLink(item.route));
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(format!(" {}", item.label), style))),
            line_area,
        );
    }
}

fn render_popup(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let Some((group, id)) = app.popups.visible() else {
        return;
    };
    let Some(card) = app.content.popup_card(group, id).cloned() else {
        return;
    };

    let width = 56.min(area.width.saturating_sub(4)).max(20);
    let text_width = width.saturating_sub(4) as usize;
    let mut body: Vec<Line<'static>> = Vec::new();
    for chunk in wrap_text(card.summary, text_width) {
        body.push(Line::from(Span::styled(
            chunk,
            Style::default().fg(TEXT_SECONDARY),
        )));
    }
    body.push(Line::default());
    for detail in &card.details {
        for (i, chunk) in wrap_text(detail, text_width.saturating_sub(2)).into_iter().enumerate() {
            let prefix = if i == 0 { "• " } else { "  " };
            body.push(Line::from(Span::styled(
                format!("{}{}", prefix, chunk),
                Style::default().fg(TEXT_PRIMARY),
            )));
        }
    }

    let height = (body.len() as u16 + 4).min(area.height.saturating_sub(2)).max(5);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup);
    let block = UiBlock::default()
        .title(format!(" {} ", card.title))
        .title_style(
            Style::default()
                .fg(GREEN_TERMINAL)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(GREEN_DIM))
        .style(Style::default().bg(BG_SECONDARY));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    frame.render_widget(
        Paragraph::new(body).style(Style::default().bg(BG_SECONDARY)),
        inner.inner(Margin::new(1, 1)),
    );

    // Content region first, close control on top of it.
    app.register_hit(popup, HitTarget::PopupContent(group));
    let close = Rect::new(popup.x + popup.width.saturating_sub(5), popup.y, 4, 1);
    app.register_hit(close, HitTarget::PopupClose(group));
    frame.render_widget(
        Paragraph::new(Span::styled("[x]", Style::default().fg(TEXT_MUTED))),
        close,
    );
}

fn render_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let hints = match app.route {
        Route::Blog if app.open_post.is_none() => {
            " q: Quit | 1-5: Navigate | /: Search | Click a tag to filter "
        }
        Route::Calendar => " q: Quit | 1-5: Navigate | p/n: Week | Click a time to book ",
        _ if app.narrow() => " q: Quit | 1-5: Navigate | m: Menu | Esc: Close ",
        _ => " q: Quit | 1-5: Navigate | Esc: Close ",
    };
    let location = format!("{} ", app.location.to_url());
    let hint_width = area.width.saturating_sub(location.chars().count() as u16);
    let line = Line::from(vec![
        Span::raw(format!("{:<width$}", hints, width = hint_width as usize)),
        Span::raw(location),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(BG_PRIMARY).bg(GREEN_DIM)),
        area,
    );
}
