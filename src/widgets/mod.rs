//! Stateful widgets re-initialized by the coordinator on content swaps.

pub mod calendar;
pub mod contact;
pub mod menu;
pub mod popups;

pub use calendar::{CalendarView, CalendarWidget};
pub use contact::{Alert, AlertKind, ContactForm, FieldVisual};
pub use menu::MobileMenu;
pub use popups::PopupManager;
