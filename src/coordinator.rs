//! Animation/lifecycle coordinator
//!
//! Decides, on each page-ready or content-swap signal, whether to play
//! the full entrance sequence or the abbreviated returning-visitor
//! path, and guarantees idempotent handler attachment for the widgets
//! that must survive content replacement.
//!
//! Handler attachment is an explicit subscribe/unsubscribe registry:
//! re-initialization removes any previously attached binding of the
//! same kind before attaching exactly one fresh one, so repeated swaps
//! can never compound handlers.

use std::time::{Duration, Instant};

use crate::app::App;
use crate::boot;
use crate::config::HeroProfile;
use crate::models::{Focus, Route, SwapTarget};

/// Delay before the run flag is armed after entrance setup. Arming
/// immediately would let a second trigger during setup short-circuit
/// onto the abbreviated path.
pub const INTRO_ARM_DELAY_MS: u64 = 100;

/// Buffer between the boot sequence's advertised end and the subtitle
/// fade-in.
pub const SUBTITLE_BUFFER_MS: u64 = 100;

/// Buffer added to the returned delay for boot-only styles.
pub const ENHANCE_RETURN_BUFFER_MS: u64 = 200;

/// Buffer between the boot sequence's advertised end and the first
/// typed character.
pub const TYPING_BUFFER_MS: u64 = 300;

/// Delay returned when no boot sequence plays.
pub const DEFAULT_ENHANCE_DELAY_MS: u64 = 500;

/// The fallback timer forcing subtitle visibility fires once, this long
/// after initial load.
pub const FALLBACK_DELAY_MS: u64 = 8000;

/// Kinds of handler that can be bound exactly once per root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    MenuToggle,
    OutsideMenuClose,
    EscapeClose,
    SmoothScroll,
    PackagePopups,
    WorkPopups,
    FormEncryption,
    BlogFilters,
    ProjectCards,
    CalendarControls,
}

/// Subscribe/unsubscribe registry. Input dispatch consults the entry
/// count for a kind, so a duplicate binding would visibly compound —
/// `rebind` is what prevents that.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: Vec<BindingKind>,
}

impl Bindings {
    /// Unsubscribe-then-subscribe: afterwards exactly one binding of
    /// `kind` exists.
    pub fn rebind(&mut self, kind: BindingKind) {
        self.unbind(kind);
        self.entries.push(kind);
    }

    pub fn unbind(&mut self, kind: BindingKind) {
        self.entries.retain(|k| *k != kind);
    }

    /// Attach only if absent. Returns whether a binding was added.
    pub fn attach_once(&mut self, kind: BindingKind) -> bool {
        if self.is_bound(kind) {
            return false;
        }
        self.entries.push(kind);
        true
    }

    pub fn is_bound(&self, kind: BindingKind) -> bool {
        self.entries.contains(&kind)
    }

    pub fn count(&self, kind: BindingKind) -> usize {
        self.entries.iter().filter(|k| **k == kind).count()
    }
}

/// Partial-navigation event fired after a content region is replaced.
#[derive(Debug, Clone)]
pub struct SwapEvent {
    pub target: SwapTarget,
    pub response_url: String,
}

impl App {
    /// Initial wiring on launch: menu, global handlers, binders, the
    /// entrance animation, and the self-healing fallback timer.
    pub fn start(&mut self, now: Instant) {
        self.initialize_menu();
        self.attach_global_menu_handler();
        self.bindings.attach_once(BindingKind::EscapeClose);
        self.bind_smooth_scroll();
        self.bind_popups();
        self.bind_form_encryption();
        self.update_navigation();
        self.on_page_ready(true, now);
        self.fallback_due = Some(now + Duration::from_millis(FALLBACK_DELAY_MS));
        if self.route == Route::Calendar {
            self.init_calendar();
        }
    }

    /// Page-ready signal. Full entrance only on a first load with the
    /// run flag unset; everything else takes the static path.
    pub fn on_page_ready(&mut self, first_load: bool, now: Instant) {
        if self.route != Route::Home {
            return;
        }
        if first_load && !self.intro_played {
            // Re-entrancy check before any state mutation: a second
            // trigger while the sequence is being set up is dropped
            // entirely.
            if self.hero_animation_running {
                tracing::debug!("entrance already in progress, dropping page-ready signal");
                return;
            }
            self.init_hero_animation(true, now);
            // Armed after setup completes, not immediately.
            self.intro_arm_due = Some(now + Duration::from_millis(INTRO_ARM_DELAY_MS));
        } else {
            self.init_hero_animation(false, now);
        }
    }

    /// Re-initialize everything that must survive a content swap, then
    /// run the route-specific work the response URL selects.
    pub fn on_content_swapped(&mut self, event: &SwapEvent, now: Instant) {
        self.update_navigation();
        self.bind_smooth_scroll();
        self.bind_popups();
        self.bind_form_encryption();

        if event.target != SwapTarget::MainContent {
            return;
        }
        let url = event.response_url.as_str();

        if url.contains("/content/about")
            || url.contains("/content/work")
            || url.contains("/content/blog")
        {
            self.scroll_to_top();
        }
        if url.contains("/content/blog") {
            self.init_blog();
        }
        if url.contains("/content/calendar") {
            self.init_calendar();
        }
        if url.contains("/content/home") {
            // Navigating back to home never replays the entrance.
            self.init_hero_animation(false, now);
            if self.services_scroll_pending {
                self.scroll_to_services();
                self.services_scroll_pending = false;
            }
        }
    }

    /// Switch screens: push history, swap content, fire the swap event.
    pub fn navigate(&mut self, route: Route, now: Instant) {
        self.history.push(self.location.clone());
        self.location = crate::models::Location::for_route(route);
        self.route = route;
        self.open_post = None;
        self.project_cards = None;
        self.focus = Focus::None;
        self.menu.close();

        let event = SwapEvent {
            target: SwapTarget::MainContent,
            response_url: route.content_url().to_string(),
        };
        self.on_content_swapped(&event, now);
    }

    /// Pop the history stack and restore that location, replaying its
    /// query state through the normal swap path. Returns false when
    /// there is nowhere to go back to.
    pub fn go_back(&mut self, now: Instant) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        let route = crate::models::Route::from_path(&previous.path).unwrap_or(Route::Home);
        self.route = route;
        self.location = previous;
        self.open_post = None;
        self.project_cards = None;
        self.focus = Focus::None;
        self.menu.close();

        let event = SwapEvent {
            target: SwapTarget::MainContent,
            response_url: route.content_url().to_string(),
        };
        self.on_content_swapped(&event, now);
        true
    }

    /// Update which nav item is highlighted and hide the home link on
    /// the home screen.
    pub fn update_navigation(&mut self) {
        self.hide_home_link = self.route == Route::Home;
    }

    // ------------------------------------------------------------------
    // Hero entrance
    // ------------------------------------------------------------------

    pub(crate) fn init_hero_animation(&mut self, should_type: bool, now: Instant) {
        if self.hero_animation_running && should_type {
            tracing::debug!("hero animation already running, skipping");
            return;
        }
        // Missing anchor: the hero only exists on the home screen.
        if self.route != Route::Home {
            return;
        }

        let style = self.config.hero_style.clone();
        let profile = self.config.hero_profile(&style).clone();
        let text_len = profile.text.chars().count();

        if should_type && !self.intro_played {
            self.hero.reset_for_entrance();
        }
        self.hero_animation_running = true;

        let delay = self.apply_hero_enhancements(&profile, &style, should_type, now);

        if !should_type {
            self.hero.show_static(text_len);
            self.hero_animation_running = false;
            return;
        }

        if !profile.typewriter {
            // Boot overlay and subtitle fade are already scheduled; the
            // timing completes on its own.
            self.hero_animation_running = false;
            return;
        }

        self.hero.begin_typing(now + delay, self.boot.is_some());
    }

    /// Style-specific setup. Returns the delay before dependent
    /// animation (the typewriter) may start, derived from the boot
    /// engine's returned duration — never from overlay state.
    fn apply_hero_enhancements(
        &mut self,
        profile: &HeroProfile,
        style: &str,
        should_type: bool,
        now: Instant,
    ) -> Duration {
        if profile.crt_fade {
            self.hero.crt_active = true;
        }

        if !profile.typewriter {
            // Title renders immediately; the boot sequence overlays it.
            if should_type && !self.intro_played {
                self.hero.show_immediate(profile.text.chars().count());
                let boot_duration = self.start_boot(style, now);
                if boot_duration > Duration::ZERO {
                    self.hero.schedule_subtitle(
                        now + boot_duration + Duration::from_millis(SUBTITLE_BUFFER_MS),
                    );
                }
                return boot_duration + Duration::from_millis(ENHANCE_RETURN_BUFFER_MS);
            }
            return Duration::from_millis(DEFAULT_ENHANCE_DELAY_MS);
        }

        if should_type && !self.intro_played && profile.boot {
            let boot_duration = self.start_boot(style, now);
            return boot_duration + Duration::from_millis(TYPING_BUFFER_MS);
        }
        Duration::from_millis(DEFAULT_ENHANCE_DELAY_MS)
    }

    fn start_boot(&mut self, style: &str, now: Instant) -> Duration {
        let anchor_present = self.route == Route::Home;
        boot::play(
            &mut self.boot,
            &self.config,
            style,
            anchor_present,
            self.viewport.0,
            now,
        )
    }

    // ------------------------------------------------------------------
    // Widget binders
    // ------------------------------------------------------------------

    pub fn bind_smooth_scroll(&mut self) {
        self.bindings.rebind(BindingKind::SmoothScroll);
    }

    pub fn bind_popups(&mut self) {
        self.bindings.rebind(BindingKind::PackagePopups);
        self.bindings.rebind(BindingKind::WorkPopups);
    }

    pub fn bind_form_encryption(&mut self) {
        self.bindings.rebind(BindingKind::FormEncryption);
    }

    /// Idempotent menu initialization: clear open state, then replace
    /// the toggle binding so exactly one click handler survives.
    pub fn initialize_menu(&mut self) {
        self.menu.close();
        self.bindings.rebind(BindingKind::MenuToggle);
        self.menu_initialized = true;
    }

    /// The outside-click closer attaches once for the process lifetime.
    pub fn attach_global_menu_handler(&mut self) {
        if !self.global_menu_close_attached {
            self.bindings.attach_once(BindingKind::OutsideMenuClose);
            self.global_menu_close_attached = true;
        }
    }

    // ------------------------------------------------------------------
    // Route-specific initializers
    // ------------------------------------------------------------------

    pub fn init_blog(&mut self) {
        self.blog_filter = crate::models::BlogFilterState::new(self.content.posts.len());
        self.bindings.rebind(BindingKind::BlogFilters);
        self.bindings.rebind(BindingKind::ProjectCards);

        // Replay a tag carried in the query string by invoking the
        // matching filter control.
        if let Some(tag) = self.location.query_param("tag").map(str::to_string) {
            if self.filter_tags().iter().any(|t| *t == tag) {
                self.apply_blog_tag(&tag);
            }
        }
    }

    pub fn init_calendar(&mut self) {
        self.bindings.rebind(BindingKind::CalendarControls);
        self.calendar.begin_loading();
        self.api.fetch_slots();
    }

    /// Filter controls shown above the post list: "all" plus the
    /// configured alias keys.
    pub fn filter_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.config.blog_filters.keys().cloned().collect();
        tags.sort();
        tags.insert(0, crate::models::TAG_ALL.to_string());
        tags
    }

    /// Apply a tag filter, recording the previous location so the
    /// filter state is a history entry of its own (push, not reload).
    pub fn apply_blog_tag(&mut self, tag: &str) {
        let aliases = crate::models::TagAliases(self.config.blog_filters.clone());
        self.history.push(self.location.clone());
        self.blog_filter
            .apply_tag(tag, &self.content.posts, &aliases, &mut self.location);
    }

    // ------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------

    pub fn scroll_to_top(&mut self) {
        self.scroll_target = Some(0);
    }

    pub fn scroll_to_services(&mut self) {
        self.scroll_target = Some(self.services_line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;
    use crate::models::HeroPhase;

    fn ms(base: Instant, millis: u64) -> Instant {
        base + Duration::from_millis(millis)
    }

    #[test]
    fn test_bindings_rebind_keeps_exactly_one() {
        let mut bindings = Bindings::default();
        for _ in 0..5 {
            bindings.rebind(BindingKind::FormEncryption);
        }
        assert_eq!(bindings.count(BindingKind::FormEncryption), 1);
        bindings.unbind(BindingKind::FormEncryption);
        assert_eq!(bindings.count(BindingKind::FormEncryption), 0);
    }

    #[test]
    fn test_menu_initializer_is_idempotent() {
        let mut app = test_app();
        for _ in 0..4 {
            app.initialize_menu();
            app.attach_global_menu_handler();
        }
        assert_eq!(app.bindings.count(BindingKind::MenuToggle), 1);
        assert_eq!(app.bindings.count(BindingKind::OutsideMenuClose), 1);
        assert!(app.menu_initialized);
    }

    #[test]
    fn test_run_flag_arms_after_delay_not_immediately() {
        let mut app = test_app();
        let start = Instant::now();
        app.start(start);
        assert!(!app.intro_played);
        app.tick(ms(start, 50));
        assert!(!app.intro_played);
        app.tick(ms(start, INTRO_ARM_DELAY_MS));
        assert!(app.intro_played);
    }

    #[test]
    fn test_first_load_plays_boot_and_schedules_subtitle() {
        let mut app = test_app();
        let start = Instant::now();
        app.start(start);
        // Default style shows the title immediately and overlays boot.
        assert!(app.boot.is_some());
        assert_eq!(app.hero.phase, HeroPhase::Booting);
        assert!(!app.hero.subtitle_visible);

        // Professional profile, wide viewport: 8100ms advertised, then
        // the subtitle buffer.
        let total = app.boot.as_ref().unwrap().total_duration();
        assert_eq!(total, Duration::from_millis(8100));
        app.tick(ms(start, 8100 + SUBTITLE_BUFFER_MS));
        assert!(app.hero.subtitle_visible);
        assert!(!app.hero.subtitle_instant);
        assert!(app.boot.is_none());
    }

    #[test]
    fn test_second_page_ready_during_setup_is_dropped() {
        let mut app = test_app();
        app.config.hero_style = "cyberpunk".to_string();
        let start = Instant::now();
        app.start(start);
        assert!(app.hero_animation_running);
        let boot_before = app.boot.clone();

        // A second full-sequence trigger while running mutates nothing.
        app.on_page_ready(true, ms(start, 10));
        assert_eq!(
            app.boot.as_ref().map(|b| b.total_duration()),
            boot_before.as_ref().map(|b| b.total_duration())
        );
        assert_eq!(app.hero.visible_chars, 0);
    }

    #[test]
    fn test_return_visit_takes_static_path() {
        let mut app = test_app();
        let start = Instant::now();
        app.start(start);
        app.tick(ms(start, INTRO_ARM_DELAY_MS));
        assert!(app.intro_played);

        app.navigate(Route::About, ms(start, 200));
        app.tick(ms(start, 250));
        assert!(app.boot.is_none());

        app.navigate(Route::Home, ms(start, 300));
        assert_eq!(app.hero.phase, HeroPhase::Static);
        assert!(app.hero.subtitle_visible);
        assert!(app.hero.subtitle_instant);
        assert!(!app.hero.caret_visible);
        // No boot sequence on a return visit.
        assert!(app.boot.is_none());
    }

    #[test]
    fn test_swap_rebinds_without_compounding() {
        let mut app = test_app();
        let start = Instant::now();
        app.start(start);
        for route in [Route::About, Route::Home, Route::Work, Route::Home] {
            app.navigate(route, start);
        }
        for kind in [
            BindingKind::SmoothScroll,
            BindingKind::PackagePopups,
            BindingKind::WorkPopups,
            BindingKind::FormEncryption,
        ] {
            assert_eq!(app.bindings.count(kind), 1, "{:?} compounded", kind);
        }
    }

    #[test]
    fn test_fallback_timer_forces_subtitle() {
        let mut app = test_app();
        let start = Instant::now();
        app.start(start);
        // Break the scheduled path deliberately.
        app.hero = crate::hero::HeroState::default();
        app.boot = None;

        app.tick(ms(start, FALLBACK_DELAY_MS));
        assert!(app.fallback_fired);
        assert!(app.hero.subtitle_visible);

        // Fires once.
        app.hero = crate::hero::HeroState::default();
        app.tick(ms(start, FALLBACK_DELAY_MS + 1000));
        assert!(!app.hero.subtitle_visible);
    }

    #[test]
    fn test_navigation_away_cancels_hero_loop() {
        let mut app = test_app();
        app.config.hero_style = "cyberpunk".to_string();
        let start = Instant::now();
        app.start(start);
        assert!(app.hero_animation_running);

        app.navigate(Route::Blog, ms(start, 50));
        app.tick(ms(start, 60));
        assert_eq!(app.hero.phase, HeroPhase::Idle);
        assert!(!app.hero_animation_running);
        assert!(app.boot.is_none());
    }

    #[test]
    fn test_blog_init_replays_tag_param() {
        let mut app = test_app();
        let start = Instant::now();
        app.start(start);
        app.navigate(Route::Blog, start);
        app.location.set_query_param("tag", "ai");
        app.init_blog();
        assert_eq!(app.blog_filter.active_tag, "ai");
        // Only the AI-tagged post is visible.
        assert_eq!(app.blog_filter.visible_count(), 1);
    }

    #[test]
    fn test_blog_init_ignores_unknown_tag_param() {
        let mut app = test_app();
        let start = Instant::now();
        app.start(start);
        app.navigate(Route::Blog, start);
        app.location.set_query_param("tag", "definitely-not-a-filter");
        app.init_blog();
        assert_eq!(app.blog_filter.active_tag, crate::models::TAG_ALL);
    }

    #[test]
    fn test_calendar_swap_starts_loading() {
        let mut app = test_app();
        let start = Instant::now();
        app.start(start);
        app.navigate(Route::Calendar, start);
        assert!(app.calendar.loading);
        assert_eq!(app.bindings.count(BindingKind::CalendarControls), 1);
    }

    #[test]
    fn test_services_scroll_runs_after_home_swap() {
        let mut app = test_app();
        let start = Instant::now();
        app.start(start);
        app.services_line = 14;
        app.navigate(Route::About, start);
        app.services_scroll_pending = true;
        app.navigate(Route::Home, start);
        assert_eq!(app.scroll_target, Some(14));
        assert!(!app.services_scroll_pending);
    }

    #[test]
    fn test_go_back_restores_location_with_query_state() {
        let mut app = test_app();
        let start = Instant::now();
        app.start(start);
        app.navigate(Route::Blog, start);
        app.apply_blog_tag("payments");
        app.navigate(Route::Work, start);

        assert!(app.go_back(start));
        assert_eq!(app.route, Route::Blog);
        // The tag filter rides back in on the query string.
        assert_eq!(app.blog_filter.active_tag, "payments");
        assert_eq!(app.location.to_url(), "/blog?tag=payments");
    }

    #[test]
    fn test_go_back_with_empty_history() {
        let mut app = test_app();
        app.start(Instant::now());
        assert!(!app.go_back(Instant::now()));
        assert_eq!(app.route, Route::Home);
    }

    #[test]
    fn test_update_navigation_hides_home_link_on_home() {
        let mut app = test_app();
        let start = Instant::now();
        app.start(start);
        assert!(app.hide_home_link);
        app.navigate(Route::Work, start);
        assert!(!app.hide_home_link);
    }
}
