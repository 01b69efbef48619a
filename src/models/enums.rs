//! Enums used throughout blockhead-tui
//!
//! This module contains the enum types used for navigation, hero
//! animation state, popup grouping, and input focus.

/// Top-level screens, mirroring the site's routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    About,
    Blog,
    Work,
    Calendar,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::About,
        Route::Blog,
        Route::Work,
        Route::Calendar,
    ];

    /// Location path for this route.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Blog => "/blog",
            Route::Work => "/work",
            Route::Calendar => "/calendar",
        }
    }

    /// URL of the partial-content endpoint the swap event reports.
    pub fn content_url(&self) -> &'static str {
        match self {
            Route::Home => "/content/home",
            Route::About => "/content/about",
            Route::Blog => "/content/blog",
            Route::Work => "/content/work",
            Route::Calendar => "/content/calendar",
        }
    }

    /// Route whose path matches, for history restoration.
    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.iter().copied().find(|r| r.path() == path)
    }
}

/// Hero text region state machine.
///
/// First load runs `Idle -> Booting -> Typing -> Complete` (or skips
/// `Booting` when the style has no boot sequence); navigating back to
/// home takes the `Static` path with no animation at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeroPhase {
    #[default]
    Idle,
    Booting,
    Typing,
    Complete,
    Static,
}

/// Popup groups, lowest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupGroup {
    Package,
    Expertise,
    Work,
}

impl PopupGroup {
    pub const ALL: [PopupGroup; 3] = [PopupGroup::Package, PopupGroup::Expertise, PopupGroup::Work];

    /// Priority ordering: work > expertise > package.
    pub fn priority(&self) -> u8 {
        match self {
            PopupGroup::Package => 0,
            PopupGroup::Expertise => 1,
            PopupGroup::Work => 2,
        }
    }

    pub fn index(&self) -> usize {
        self.priority() as usize
    }
}

/// Region a swap event replaced. Only `MainContent` swaps trigger
/// route-specific re-initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapTarget {
    MainContent,
    Other,
}

/// Which text input currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    BlogSearch,
    ContactName,
    ContactEmail,
    ContactMessage,
    BookingName,
    BookingEmail,
}

impl Focus {
    /// Whether plain character keys should be captured as text input.
    pub fn captures_text(&self) -> bool {
        !matches!(self, Focus::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_content_urls() {
        assert_eq!(Route::Home.content_url(), "/content/home");
        assert_eq!(Route::Calendar.content_url(), "/content/calendar");
    }

    #[test]
    fn test_route_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path("/work"), Some(Route::Work));
        assert_eq!(Route::from_path("/nowhere"), None);
    }

    #[test]
    fn test_popup_priority_ordering() {
        assert!(PopupGroup::Work.priority() > PopupGroup::Expertise.priority());
        assert!(PopupGroup::Expertise.priority() > PopupGroup::Package.priority());
    }

    #[test]
    fn test_focus_captures_text() {
        assert!(!Focus::None.captures_text());
        assert!(Focus::BlogSearch.captures_text());
        assert!(Focus::ContactMessage.captures_text());
    }
}
