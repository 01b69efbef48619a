//! UI module for blockhead-tui
//!
//! Screen builders produce a virtual line canvas with registered click
//! targets; `render` composes them with the header, footer, menu panel
//! overlay, and popup layer.

mod about;
mod blog;
mod calendar_view;
mod helpers;
mod home;
mod render;
mod work;

pub use helpers::wrap_text;
pub use render::render;
