//! Application state for blockhead-tui.
//!
//! The `App` struct is the page session: every flag the site kept as a
//! module-global lives here with an explicit lifecycle — created on
//! launch, reset only by process restart. Lifecycle decisions (page
//! ready, content swaps, re-initialization) are implemented in
//! `coordinator.rs`; this module owns the state and the per-tick pump.

use std::sync::mpsc::Receiver;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::{Position, Rect};

use crate::api::{ApiEvent, ApiHandle};
use crate::boot::{BootFrame, BootSequence};
use crate::config::SiteConfig;
use crate::content::SiteContent;
use crate::coordinator::Bindings;
use crate::hero::HeroState;
use crate::models::{BlogFilterState, Focus, HeroPhase, Location, PopupGroup, ProjectCards, Route};
use crate::widgets::{CalendarWidget, ContactForm, MobileMenu, PopupManager};

/// Clickable regions registered during render; later registrations sit
/// on top for hit-testing.
#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    NavItem(Route),
    MenuToggle,
    MenuPanel,
    MenuLink(Route),
    ServicesLink,
    PackageCard(usize),
    ExpertiseCard(usize),
    WorkCard(usize),
    PopupContent(PopupGroup),
    PopupClose(PopupGroup),
    FilterTag(String),
    SearchBox,
    SearchClear,
    PostCard(usize),
    BackToBlog,
    ProjectRow { row: usize, name: String },
    ProjectCardClose,
    SlotButton(String),
    PrevWeek,
    NextWeek,
    CancelBooking,
    Field(Focus),
    SubmitContact,
    SubmitBooking,
}

/// Application state
pub struct App {
    pub config: SiteConfig,
    pub content: SiteContent,
    pub api: ApiHandle,
    pub api_events: Receiver<ApiEvent>,
    pub rng: StdRng,

    // Page-session flags
    pub intro_played: bool,
    pub intro_arm_due: Option<Instant>,
    pub hero_animation_running: bool,
    pub menu_initialized: bool,
    pub global_menu_close_attached: bool,
    pub fallback_due: Option<Instant>,
    pub fallback_fired: bool,
    pub bindings: Bindings,

    // Navigation
    pub route: Route,
    pub location: Location,
    pub history: Vec<Location>,
    pub hide_home_link: bool,
    pub services_scroll_pending: bool,

    // Hero region
    pub hero: HeroState,
    pub boot: Option<BootSequence>,

    // Widgets
    pub menu: MobileMenu,
    pub popups: PopupManager,
    pub contact: ContactForm,
    pub calendar: CalendarWidget,

    // Blog screen
    pub blog_filter: BlogFilterState,
    pub open_post: Option<usize>,
    pub project_cards: Option<ProjectCards>,

    // View state
    pub session_start: Instant,
    pub focus: Focus,
    pub scroll: u16,
    pub scroll_target: Option<u16>,
    /// Virtual line of the services section, recorded during render so
    /// the smooth-scroll binder has a destination.
    pub services_line: u16,
    pub viewport: (u16, u16),
    pub hits: Vec<(Rect, HitTarget)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: SiteConfig,
        content: SiteContent,
        api: ApiHandle,
        api_events: Receiver<ApiEvent>,
        cols: u16,
        rows: u16,
    ) -> Self {
        let post_count = content.posts.len();
        Self {
            config,
            content,
            api,
            api_events,
            rng: StdRng::from_entropy(),
            intro_played: false,
            intro_arm_due: None,
            hero_animation_running: false,
            menu_initialized: false,
            global_menu_close_attached: false,
            fallback_due: None,
            fallback_fired: false,
            bindings: Bindings::default(),
            route: Route::Home,
            location: Location::for_route(Route::Home),
            history: Vec::new(),
            hide_home_link: true,
            services_scroll_pending: false,
            hero: HeroState::default(),
            boot: None,
            menu: MobileMenu::default(),
            popups: PopupManager::default(),
            contact: ContactForm::default(),
            calendar: CalendarWidget::default(),
            blog_filter: BlogFilterState::new(post_count),
            open_post: None,
            project_cards: None,
            session_start: Instant::now(),
            focus: Focus::None,
            scroll: 0,
            scroll_target: None,
            services_line: 0,
            viewport: (cols, rows),
            hits: Vec::new(),
            should_quit: false,
        }
    }

    /// Whether the narrow (hamburger) layout applies.
    pub fn narrow(&self) -> bool {
        self.viewport.0 <= crate::theme::NARROW_VIEWPORT_COLS
    }

    /// Advance every time-driven piece of state. Runs once per frame.
    pub fn tick(&mut self, now: Instant) {
        self.drain_api_events(now);

        // Arm the run flag only after entrance setup had time to settle.
        if let Some(due) = self.intro_arm_due {
            if now >= due {
                self.intro_arm_due = None;
                self.intro_played = true;
            }
        }

        // Self-healing fallback: force the subtitle visible if any
        // animation path failed to get there. Fires once.
        if !self.fallback_fired {
            if let Some(due) = self.fallback_due {
                if now >= due {
                    self.fallback_due = None;
                    self.fallback_fired = true;
                    if self.route == Route::Home && !self.hero.subtitle_visible {
                        self.hero.fade_in_subtitle(now);
                    }
                }
            }
        }

        if self.route == Route::Home {
            let profile = self.config.hero_profile(&self.config.hero_style).clone();
            self.hero.tick(now, &profile, &mut self.rng);
            if self.hero.phase == HeroPhase::Complete {
                self.hero_animation_running = false;
            }
            if let Some(boot) = &self.boot {
                if boot.frame(now) == BootFrame::Done {
                    self.boot = None;
                }
            }
        } else {
            // The hero anchor left the screen: the typing loop and the
            // boot overlay self-terminate. Dropping an already-removed
            // overlay is tolerated silently.
            if self.hero.animating() {
                self.hero.cancel();
            }
            self.hero_animation_running = false;
            self.boot = None;
        }

        self.contact.tick(now, &mut self.rng);
        self.step_smooth_scroll();
    }

    fn drain_api_events(&mut self, now: Instant) {
        while let Ok(event) = self.api_events.try_recv() {
            match event {
                ApiEvent::Slots(result) => self.calendar.on_slots(result),
                ApiEvent::Booked(result) => self.calendar.on_booked(result),
                ApiEvent::ContactSent(Ok(())) => {
                    self.contact.on_submit_success(now, &mut self.rng);
                }
                ApiEvent::ContactSent(Err(err)) => {
                    tracing::warn!("contact submit failed: {}", err);
                    self.contact
                        .on_submit_error("Failed to send message. Please try again.", now);
                }
            }
        }
    }

    fn step_smooth_scroll(&mut self) {
        if let Some(target) = self.scroll_target {
            if self.scroll < target {
                self.scroll = (self.scroll + 2).min(target);
            } else if self.scroll > target {
                self.scroll = self.scroll.saturating_sub(2).max(target);
            }
            if self.scroll == target {
                self.scroll_target = None;
            }
        }
    }

    /// Scroll the current screen, unless a popup holds the scroll lock.
    pub fn scroll_by(&mut self, delta: i32) {
        if self.popups.scroll_locked() {
            return;
        }
        self.scroll_target = None;
        if delta < 0 {
            self.scroll = self.scroll.saturating_sub(delta.unsigned_abs() as u16);
        } else {
            self.scroll = self.scroll.saturating_add(delta as u16);
        }
    }

    pub fn register_hit(&mut self, area: Rect, target: HitTarget) {
        self.hits.push((area, target));
    }

    /// Topmost hit target at a position.
    pub fn hit_at(&self, col: u16, row: u16) -> Option<&HitTarget> {
        self.hits
            .iter()
            .rev()
            .find(|(area, _)| area.contains(Position::new(col, row)))
            .map(|(_, target)| target)
    }
}

#[cfg(test)]
pub(crate) fn test_app() -> App {
    let (api, api_events) = ApiHandle::disconnected();
    let mut app = App::new(
        SiteConfig::default(),
        crate::content::default_content(),
        api,
        api_events,
        120,
        40,
    );
    app.rng = StdRng::seed_from_u64(99);
    app
}
