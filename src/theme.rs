//! Theme module for blockhead-tui
//!
//! Centralized color palette and styling constants for the terminal
//! rendering of the site. Visual state is entirely style-driven: the
//! render layer picks entries from here based on widget state (active,
//! fading, scrambling, ...) the same way the stylesheet classes did.

use ratatui::style::Color;
use ratatui::symbols::border;

/// Viewport width (in columns) at or below which the narrow layout
/// applies: hamburger menu instead of the nav bar, and the shorter
/// boot-sequence message lists.
pub const NARROW_VIEWPORT_COLS: u16 = 80;

/// Rounded border set used by cards and popups.
pub const ROUNDED_BORDERS: border::Set = border::ROUNDED;

// ============================================================================
// Background Colors
// ============================================================================

/// Primary background color - near black (#0a0e14)
pub const BG_PRIMARY: Color = Color::Rgb(10, 14, 20);

/// Secondary background color - cards and form fields (#12161c)
pub const BG_SECONDARY: Color = Color::Rgb(18, 22, 28);

/// Tertiary background color - highlighted/active areas (#1a1f26)
pub const BG_TERTIARY: Color = Color::Rgb(26, 31, 38);

/// Subtle border color (#1e2530)
pub const BORDER_SUBTLE: Color = Color::Rgb(30, 37, 48);

// ============================================================================
// Accent Colors
// ============================================================================

/// Terminal green accent used by the hero title and caret (#00ff88)
pub const GREEN_TERMINAL: Color = Color::Rgb(0, 255, 136);

/// Dimmed green for secondary accents (#0a8a6e)
pub const GREEN_DIM: Color = Color::Rgb(10, 138, 110);

/// Boot-sequence status line gray (#888888)
pub const BOOT_GRAY: Color = Color::Rgb(136, 136, 136);

// ============================================================================
// Status Colors
// ============================================================================

/// Success alert color (#4ade80)
pub const GREEN_SUCCESS: Color = Color::Rgb(74, 222, 128);

/// Amber warning color (#fbbf24)
pub const AMBER_WARNING: Color = Color::Rgb(251, 191, 36);

/// Error alert color (#f87171)
pub const RED_ERROR: Color = Color::Rgb(248, 113, 113);

// ============================================================================
// Text Colors
// ============================================================================

/// Primary text color (#e2e8f0)
pub const TEXT_PRIMARY: Color = Color::Rgb(226, 232, 240);

/// Secondary text color - summaries, metadata (#94a3b8)
pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184);

/// Muted text color - labels and hints (#64748b)
pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);

/// Linearly blend a color toward the primary background.
///
/// `t` is the remaining opacity: 1.0 renders the color untouched, 0.0
/// renders pure background. Used for the boot-sequence fade-out and the
/// subtitle fade-in, which the terminal approximates with staged dimming.
pub fn faded(color: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let (r, g, b) = match color {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => return color,
    };
    let (br, bg, bb) = match BG_PRIMARY {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => (0, 0, 0),
    };
    let mix = |c: u8, base: u8| -> u8 {
        (f32::from(base) + (f32::from(c) - f32::from(base)) * t).round() as u8
    };
    Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
}
