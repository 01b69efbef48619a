//! Input dispatch for blockhead-tui
//!
//! Central key and mouse handling. Clicks are resolved against the hit
//! regions registered during render and delivered through the binding
//! registry: a handler only fires as many times as it is bound, which
//! is exactly once when the coordinator has done its job.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use crate::api::ContactPayload;
use crate::app::{App, HitTarget};
use crate::coordinator::BindingKind;
use crate::models::{BookingRequest, Focus, PopupGroup, Route};
use crate::widgets::contact::{FIELD_EMAIL, FIELD_MESSAGE, FIELD_NAME};

pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Global escape handler: closes every popup group unconditionally.
    if key.code == KeyCode::Esc {
        if app.bindings.is_bound(BindingKind::EscapeClose) {
            app.popups.close_all();
        }
        app.focus = Focus::None;
        return;
    }

    if app.focus.captures_text() {
        handle_text_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            app.navigate(Route::ALL[index], now);
        }
        KeyCode::Char('m') if app.narrow() => {
            click_menu_toggle(app);
        }
        KeyCode::Char('/') if app.route == Route::Blog && app.open_post.is_none() => {
            app.focus = Focus::BlogSearch;
        }
        KeyCode::Char('n') if app.route == Route::Calendar => {
            if app.bindings.is_bound(BindingKind::CalendarControls) {
                app.calendar.next_week();
            }
        }
        KeyCode::Char('p') if app.route == Route::Calendar => {
            if app.bindings.is_bound(BindingKind::CalendarControls) {
                app.calendar.prev_week();
            }
        }
        KeyCode::Backspace => {
            app.go_back(now);
        }
        KeyCode::Up => app.scroll_by(-1),
        KeyCode::Down => app.scroll_by(1),
        KeyCode::PageUp => app.scroll_by(-10),
        KeyCode::PageDown => app.scroll_by(10),
        _ => {}
    }
}

fn handle_text_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::ContactName => Focus::ContactEmail,
                Focus::ContactEmail => Focus::ContactMessage,
                Focus::ContactMessage => Focus::ContactName,
                Focus::BookingName => Focus::BookingEmail,
                Focus::BookingEmail => Focus::BookingName,
                other => other,
            };
        }
        KeyCode::Enter => match app.focus {
            Focus::BlogSearch => app.focus = Focus::None,
            Focus::ContactName | Focus::ContactEmail | Focus::ContactMessage => {
                submit_contact(app);
            }
            Focus::BookingName | Focus::BookingEmail => submit_booking(app),
            Focus::None => {}
        },
        KeyCode::Backspace => edit_focused_field(app, None),
        KeyCode::Char(c) => edit_focused_field(app, Some(c)),
        _ => {}
    }
}

/// Apply one edit to whichever field has focus. `None` is a backspace.
fn edit_focused_field(app: &mut App, ch: Option<char>) {
    match app.focus {
        Focus::BlogSearch => {
            let mut query = app.blog_filter.query.clone();
            match ch {
                Some(c) => query.push(c),
                None => {
                    query.pop();
                }
            }
            // Live filtering on every keystroke.
            app.blog_filter.apply_search(&query, &app.content.posts);
        }
        Focus::ContactName | Focus::ContactEmail | Focus::ContactMessage => {
            // Fields are read-only while the encryption animation owns them.
            if app.contact.is_running() {
                return;
            }
            let index = match app.focus {
                Focus::ContactName => FIELD_NAME,
                Focus::ContactEmail => FIELD_EMAIL,
                _ => FIELD_MESSAGE,
            };
            match ch {
                Some(c) => app.contact.fields[index].push(c),
                None => {
                    app.contact.fields[index].pop();
                }
            }
        }
        Focus::BookingName => match ch {
            Some(c) => app.calendar.name.push(c),
            None => {
                app.calendar.name.pop();
            }
        },
        Focus::BookingEmail => match ch {
            Some(c) => app.calendar.email.push(c),
            None => {
                app.calendar.email.pop();
            }
        },
        Focus::None => {}
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent, now: Instant) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            handle_click(app, mouse.column, mouse.row, now);
        }
        MouseEventKind::ScrollUp => app.scroll_by(-2),
        MouseEventKind::ScrollDown => app.scroll_by(2),
        _ => {}
    }
}

pub fn handle_click(app: &mut App, col: u16, row: u16, now: Instant) {
    let target = app.hit_at(col, row).cloned();

    // Popup layer sits on top: clicks inside the content are inert,
    // the close control closes its group, anything else is the scrim.
    if let Some((open_group, _)) = app.popups.visible() {
        match target {
            Some(HitTarget::PopupContent(_)) => return,
            Some(HitTarget::PopupClose(group)) => {
                app.popups.close_group(group);
                return;
            }
            _ => {
                app.popups.close_group(open_group);
                return;
            }
        }
    }

    // App-level outside-click closer for the menu. The click still
    // reaches its own target afterwards.
    if app.global_menu_close_attached {
        let inside_toggle = matches!(target, Some(HitTarget::MenuToggle));
        let inside_panel = matches!(
            target,
            Some(HitTarget::MenuPanel) | Some(HitTarget::MenuLink(_))
        );
        if app.menu.outside_click_closes(inside_toggle, inside_panel) {
            app.menu.close();
        }
    }

    let Some(target) = target else { return };
    dispatch_target(app, target, now);
}

fn click_menu_toggle(app: &mut App) {
    if !app.menu_initialized {
        return;
    }
    // One toggle per attached handler; the registry guarantees one.
    for _ in 0..app.bindings.count(BindingKind::MenuToggle) {
        app.menu.toggle();
    }
}

fn open_popup(app: &mut App, group: PopupGroup, id: usize) {
    let binding = match group {
        PopupGroup::Package | PopupGroup::Expertise => BindingKind::PackagePopups,
        PopupGroup::Work => BindingKind::WorkPopups,
    };
    if !app.bindings.is_bound(binding) {
        return;
    }
    if app.popups.show(group, id) {
        if let Some(card) = app.content.popup_card(group, id) {
            tracing::debug!("popup opened: {}", card.id);
        }
    }
}

fn dispatch_target(app: &mut App, target: HitTarget, now: Instant) {
    match target {
        HitTarget::NavItem(route) => app.navigate(route, now),
        HitTarget::MenuToggle => click_menu_toggle(app),
        HitTarget::MenuPanel => {}
        HitTarget::MenuLink(route) => {
            // A tap on any menu link also closes the panel.
            app.menu.close();
            app.navigate(route, now);
        }
        HitTarget::ServicesLink => {
            if app.route == Route::Home {
                if app.bindings.is_bound(BindingKind::SmoothScroll) {
                    app.scroll_to_services();
                }
            } else {
                // Load home first; the scroll runs after the swap.
                app.services_scroll_pending = true;
                app.navigate(Route::Home, now);
            }
        }
        HitTarget::PackageCard(id) => open_popup(app, PopupGroup::Package, id),
        HitTarget::ExpertiseCard(id) => open_popup(app, PopupGroup::Expertise, id),
        HitTarget::WorkCard(id) => open_popup(app, PopupGroup::Work, id),
        // Handled by the popup layer above; inert without one.
        HitTarget::PopupContent(_) | HitTarget::PopupClose(_) => {}
        HitTarget::FilterTag(tag) => {
            if app.bindings.is_bound(BindingKind::BlogFilters) {
                app.apply_blog_tag(&tag);
            }
        }
        HitTarget::SearchBox => app.focus = Focus::BlogSearch,
        HitTarget::SearchClear => {
            app.blog_filter.clear_search(&app.content.posts);
        }
        HitTarget::PostCard(index) => open_post(app, index),
        HitTarget::BackToBlog => {
            app.open_post = None;
            app.project_cards = None;
            app.scroll = 0;
        }
        HitTarget::ProjectRow { row, name } => {
            if app.bindings.is_bound(BindingKind::ProjectCards) {
                if let (Some(post_index), Some(cards)) =
                    (app.open_post, app.project_cards.as_mut())
                {
                    if let Some(post) = app.content.post(post_index) {
                        cards.reveal(row, &name, &post.content);
                    }
                }
            }
        }
        HitTarget::ProjectCardClose => {
            if let Some(cards) = app.project_cards.as_mut() {
                cards.close();
            }
        }
        HitTarget::SlotButton(id) => {
            if app.bindings.is_bound(BindingKind::CalendarControls) {
                app.calendar.select_slot(&id);
            }
        }
        HitTarget::PrevWeek => app.calendar.prev_week(),
        HitTarget::NextWeek => app.calendar.next_week(),
        HitTarget::CancelBooking => app.calendar.cancel_booking(),
        HitTarget::Field(focus) => app.focus = focus,
        HitTarget::SubmitContact => submit_contact(app),
        HitTarget::SubmitBooking => submit_booking(app),
    }
}

fn open_post(app: &mut App, index: usize) {
    let Some(post) = app.content.post(index) else {
        return;
    };
    app.open_post = Some(index);
    app.scroll = 0;
    app.project_cards = if app.bindings.is_bound(BindingKind::ProjectCards) {
        crate::models::parse_project_tables(&post.content).into_iter().next()
    } else {
        None
    };
}

fn submit_contact(app: &mut App) {
    // A submission during the animation is dropped entirely.
    if app.contact.is_running() || app.contact.submitting {
        return;
    }
    let errors = app.contact.validate();
    if !errors.is_empty() {
        app.contact.show_error(errors.join("\n"));
        return;
    }
    app.contact.submitting = true;
    app.api.send_contact(ContactPayload {
        name: app.contact.fields[FIELD_NAME].clone(),
        email: app.contact.fields[FIELD_EMAIL].clone(),
        message: app.contact.fields[FIELD_MESSAGE].clone(),
    });
}

fn submit_booking(app: &mut App) {
    if app.calendar.submitting {
        return;
    }
    let Some(slot) = app.calendar.selected.clone() else {
        return;
    };
    if app.calendar.name.trim().is_empty() || app.calendar.email.trim().is_empty() {
        app.calendar.booking_error = Some("Please fill in your name and email.".to_string());
        return;
    }
    app.calendar.submitting = true;
    app.calendar.booking_error = None;
    app.api.book(BookingRequest {
        slot_id: slot.id,
        name: app.calendar.name.clone(),
        email: app.calendar.email.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;
    use ratatui::layout::Rect;

    fn started_app() -> App {
        let mut app = test_app();
        app.start(Instant::now());
        app
    }

    #[test]
    fn test_repeated_menu_init_toggles_exactly_once_per_click() {
        let mut app = started_app();
        for _ in 0..5 {
            app.initialize_menu();
        }
        app.register_hit(Rect::new(0, 0, 3, 1), HitTarget::MenuToggle);
        handle_click(&mut app, 1, 0, Instant::now());
        assert!(app.menu.open, "one click must toggle exactly once");
        handle_click(&mut app, 1, 0, Instant::now());
        assert!(!app.menu.open);
    }

    #[test]
    fn test_outside_click_closes_menu_but_still_dispatches() {
        let mut app = started_app();
        app.menu.open = true;
        app.register_hit(Rect::new(10, 10, 5, 1), HitTarget::SearchBox);
        handle_click(&mut app, 12, 10, Instant::now());
        assert!(!app.menu.open);
        assert_eq!(app.focus, Focus::BlogSearch);
    }

    #[test]
    fn test_scrim_click_closes_popup() {
        let mut app = started_app();
        app.register_hit(Rect::new(0, 0, 40, 20), HitTarget::PackageCard(0));
        handle_click(&mut app, 5, 5, Instant::now());
        assert!(app.popups.is_open(PopupGroup::Package));

        // Popup content region on top; a click outside it is the scrim.
        app.hits.clear();
        app.register_hit(Rect::new(10, 5, 20, 10), HitTarget::PopupContent(PopupGroup::Package));
        handle_click(&mut app, 2, 2, Instant::now());
        assert!(!app.popups.any_open());
    }

    #[test]
    fn test_click_inside_popup_content_is_inert() {
        let mut app = started_app();
        app.popups.show(PopupGroup::Work, 1);
        app.register_hit(Rect::new(10, 5, 20, 10), HitTarget::PopupContent(PopupGroup::Work));
        handle_click(&mut app, 15, 8, Instant::now());
        assert!(app.popups.is_open(PopupGroup::Work));
    }

    #[test]
    fn test_escape_closes_all_popups() {
        let mut app = started_app();
        app.popups.show(PopupGroup::Expertise, 0);
        let esc = KeyEvent::new(KeyCode::Esc, crossterm::event::KeyModifiers::NONE);
        handle_key(&mut app, esc, Instant::now());
        assert!(!app.popups.any_open());
    }

    #[test]
    fn test_services_link_from_another_screen_defers_scroll() {
        let mut app = started_app();
        let now = Instant::now();
        app.navigate(Route::About, now);
        app.services_line = 20;
        dispatch_target(&mut app, HitTarget::ServicesLink, now);
        assert_eq!(app.route, Route::Home);
        assert_eq!(app.scroll_target, Some(20));
    }

    #[test]
    fn test_blog_search_filters_per_keystroke() {
        let mut app = started_app();
        let now = Instant::now();
        app.navigate(Route::Blog, now);
        app.focus = Focus::BlogSearch;
        for c in "payout".chars() {
            let key = KeyEvent::new(KeyCode::Char(c), crossterm::event::KeyModifiers::NONE);
            handle_key(&mut app, key, now);
        }
        assert_eq!(app.blog_filter.query, "payout");
        assert_eq!(app.blog_filter.visible_count(), 1);
    }

    #[test]
    fn test_project_row_click_reveals_card() {
        let mut app = started_app();
        let now = Instant::now();
        app.navigate(Route::Blog, now);
        let post_index = app
            .content
            .posts
            .iter()
            .position(|p| p.slug == "past-projects")
            .unwrap();
        open_post(&mut app, post_index);
        assert!(app.project_cards.is_some());

        dispatch_target(
            &mut app,
            HitTarget::ProjectRow {
                row: 0,
                name: "Guild Framework".to_string(),
            },
            now,
        );
        let cards = app.project_cards.as_ref().unwrap();
        assert_eq!(cards.active_row, Some(0));
        let card = cards.revealed.as_ref().unwrap();
        assert!(card.header.text.contains("Guild Framework"));
        assert!(card.metadata.iter().any(|m| m.text.starts_with("Tech:")));
        assert!(card.metadata.iter().any(|m| m.text.starts_with("Purpose:")));
    }

    #[test]
    fn test_contact_validation_blocks_submit() {
        let mut app = started_app();
        app.contact.fields[FIELD_NAME] = "A".to_string();
        app.contact.fields[FIELD_EMAIL] = "bad".to_string();
        app.contact.fields[FIELD_MESSAGE] = "short".to_string();
        submit_contact(&mut app);
        assert!(!app.contact.submitting);
        let alert = app.contact.alert.as_ref().unwrap();
        assert!(alert.text.contains("Name must be at least 2 characters"));
        assert!(alert.text.contains("valid email"));
        assert!(alert.text.contains("Message must be at least 10 characters"));
    }

    #[test]
    fn test_booking_requires_selection_and_fields() {
        let mut app = started_app();
        submit_booking(&mut app);
        assert!(!app.calendar.submitting);

        app.calendar.on_slots(Ok(vec![crate::models::Slot {
            id: "s1".to_string(),
            date: "2026-08-10".to_string(),
            time: "10:00".to_string(),
        }]));
        app.calendar.select_slot("s1");
        submit_booking(&mut app);
        assert_eq!(
            app.calendar.booking_error.as_deref(),
            Some("Please fill in your name and email.")
        );

        app.calendar.name = "Ada".to_string();
        app.calendar.email = "ada@example.com".to_string();
        submit_booking(&mut app);
        assert!(app.calendar.submitting);
        assert!(app.calendar.booking_error.is_none());
    }

    #[test]
    fn test_number_keys_navigate() {
        let mut app = started_app();
        let key = KeyEvent::new(KeyCode::Char('3'), crossterm::event::KeyModifiers::NONE);
        handle_key(&mut app, key, Instant::now());
        assert_eq!(app.route, Route::Blog);
    }
}
