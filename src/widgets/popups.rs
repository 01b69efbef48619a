//! Popup widgets: package, expertise, and work groups
//!
//! Three structurally identical `Closed -> Open -> Closed` machines with
//! a system-wide exclusivity rule. Opening a popup first force-closes
//! the other groups; a show request is rejected outright when the same
//! group is already open or, for the expertise and work groups, when a
//! higher-priority group is open (priority: work > expertise > package).
//! Page scroll is suspended while any popup is open and restored exactly
//! when the last one closes.

use crate::models::PopupGroup;

/// Open popup per group, indexed by [`PopupGroup::index`].
#[derive(Debug, Clone, Default)]
pub struct PopupManager {
    open: [Option<usize>; 3],
    scroll_locked: bool,
}

impl PopupManager {
    /// Try to open popup `id` in `group`. Returns whether it opened.
    pub fn show(&mut self, group: PopupGroup, id: usize) -> bool {
        if self.open[group.index()].is_some() {
            return false;
        }
        let blocked = PopupGroup::ALL
            .iter()
            .any(|g| g.priority() > group.priority() && self.open[g.index()].is_some());
        if blocked {
            return false;
        }

        // Force-close the other groups before opening.
        for g in PopupGroup::ALL {
            if g != group {
                self.open[g.index()] = None;
            }
        }
        self.open[group.index()] = Some(id);
        self.scroll_locked = true;
        true
    }

    /// Close every popup in one group.
    pub fn close_group(&mut self, group: PopupGroup) {
        self.open[group.index()] = None;
        self.update_scroll_lock();
    }

    /// Escape: close all three groups unconditionally.
    pub fn close_all(&mut self) {
        self.open = [None, None, None];
        self.update_scroll_lock();
    }

    fn update_scroll_lock(&mut self) {
        self.scroll_locked = self.any_open();
    }

    pub fn any_open(&self) -> bool {
        self.open.iter().any(Option::is_some)
    }

    /// The single visible popup, if any.
    pub fn visible(&self) -> Option<(PopupGroup, usize)> {
        PopupGroup::ALL
            .iter()
            .find_map(|g| self.open[g.index()].map(|id| (*g, id)))
    }

    pub fn is_open(&self, group: PopupGroup) -> bool {
        self.open[group.index()].is_some()
    }

    /// Whether page scroll is currently suspended.
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}
