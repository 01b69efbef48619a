//! Hero typewriter state machine
//!
//! Drives the hero title through `Idle -> Booting -> Typing -> Complete`
//! on a first load, or straight to `Static` when the visitor navigates
//! back. Transitions are purely time-driven once started; the only
//! external interrupt is the coordinator cancelling the loop when the
//! hero is no longer on screen.
//!
//! Per-character pacing follows the scripted schedule: a base keystroke
//! delay with occasional hesitation, a longer gap between words, and
//! explicit pause points carried on the profile as timing metadata
//! rather than string matching against the title.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::config::HeroProfile;
use crate::models::HeroPhase;

/// Base keystroke delay.
pub const BASE_DELAY_MS: u64 = 120;

/// Subtitle fade-in starts this long after typing completes.
pub const SUBTITLE_DELAY_MS: u64 = 800;

/// Length of the subtitle fade-in ramp.
pub const SUBTITLE_FADE_MS: u64 = 600;

/// Screen-effect fade starts this long after typing completes.
pub const CRT_FADE_DELAY_MS: u64 = 2000;

/// Hero text region state.
#[derive(Debug, Clone)]
pub struct HeroState {
    pub phase: HeroPhase,
    pub visible_chars: usize,
    pub caret_visible: bool,
    pub caret_blinking: bool,
    pub subtitle_visible: bool,
    /// Subtitle rendered at full opacity with no transition (the
    /// returning-visitor path).
    pub subtitle_instant: bool,
    subtitle_fading_since: Option<Instant>,
    pub crt_active: bool,
    pub crt_faded: bool,
    subtitle_due: Option<Instant>,
    crt_fade_due: Option<Instant>,
    next_char_due: Option<Instant>,
    typing_started: bool,
}

impl Default for HeroState {
    fn default() -> Self {
        Self {
            phase: HeroPhase::Idle,
            visible_chars: 0,
            caret_visible: false,
            caret_blinking: false,
            subtitle_visible: false,
            subtitle_instant: false,
            subtitle_fading_since: None,
            crt_active: false,
            crt_faded: false,
            subtitle_due: None,
            crt_fade_due: None,
            next_char_due: None,
            typing_started: false,
        }
    }
}

impl HeroState {
    /// Reset visibility for a fresh full entrance.
    pub fn reset_for_entrance(&mut self) {
        *self = Self::default();
    }

    /// Show the title fully typed, overlaid by a running boot sequence.
    /// Used by styles that do not typewrite.
    pub fn show_immediate(&mut self, text_len: usize) {
        self.visible_chars = text_len;
        self.caret_visible = false;
        self.phase = HeroPhase::Booting;
    }

    /// Returning-visitor path: final text, no caret, subtitle visible
    /// immediately with no transition.
    pub fn show_static(&mut self, text_len: usize) {
        self.phase = HeroPhase::Static;
        self.visible_chars = text_len;
        self.caret_visible = false;
        self.caret_blinking = false;
        self.subtitle_visible = true;
        self.subtitle_instant = true;
        self.subtitle_fading_since = None;
        self.subtitle_due = None;
        self.crt_fade_due = None;
        self.next_char_due = None;
    }

    /// Queue the typewriter to begin at `at` (after the boot sequence
    /// and its buffer, or the default delay when there is no boot).
    /// While a boot sequence is still playing the region reports
    /// `Booting` and flips to `Typing` when the first keystroke lands.
    pub fn begin_typing(&mut self, at: Instant, booting: bool) {
        self.phase = if booting {
            HeroPhase::Booting
        } else {
            HeroPhase::Typing
        };
        self.visible_chars = 0;
        self.caret_visible = false;
        self.typing_started = false;
        self.next_char_due = Some(at);
    }

    /// Abort any running animation. Called when the hero anchor left the
    /// screen or the location no longer matches the home route.
    pub fn cancel(&mut self) {
        self.phase = HeroPhase::Idle;
        self.next_char_due = None;
        self.subtitle_due = None;
        self.crt_fade_due = None;
    }

    /// Schedule the subtitle fade-in at an absolute instant. Used by the
    /// coordinator for boot-only styles, where the deadline derives from
    /// the boot engine's returned duration.
    pub fn schedule_subtitle(&mut self, at: Instant) {
        self.subtitle_due = Some(at);
    }

    /// Make the subtitle visible with an animated fade starting now.
    pub fn fade_in_subtitle(&mut self, now: Instant) {
        if self.subtitle_visible {
            return;
        }
        self.subtitle_visible = true;
        self.subtitle_instant = false;
        self.subtitle_fading_since = Some(now);
        // For boot-only styles the subtitle fade is the last step of
        // the entrance.
        if self.phase == HeroPhase::Booting {
            self.phase = HeroPhase::Complete;
        }
    }

    /// Current subtitle opacity.
    pub fn subtitle_opacity(&self, now: Instant) -> f32 {
        if !self.subtitle_visible {
            return 0.0;
        }
        match self.subtitle_fading_since {
            Some(since) => {
                let elapsed = now.saturating_duration_since(since).as_millis() as u64;
                (elapsed as f32 / SUBTITLE_FADE_MS as f32).min(1.0)
            }
            None => 1.0,
        }
    }

    /// Whether the typewriter (or its follow-up schedule) is live.
    pub fn animating(&self) -> bool {
        matches!(self.phase, HeroPhase::Booting | HeroPhase::Typing)
            || self.subtitle_due.is_some()
            || self.crt_fade_due.is_some()
    }

    /// Advance time-driven state.
    pub fn tick(&mut self, now: Instant, profile: &HeroProfile, rng: &mut impl Rng) {
        let text_len = profile.text.chars().count();

        // Boot overlay finished and the first keystroke is due.
        if self.phase == HeroPhase::Booting
            && self.next_char_due.is_some_and(|due| now >= due)
        {
            self.phase = HeroPhase::Typing;
        }

        if self.phase == HeroPhase::Typing {
            if let Some(due) = self.next_char_due {
                if now >= due {
                    if !self.typing_started {
                        self.caret_visible = true;
                        self.caret_blinking = true;
                        self.typing_started = true;
                    }
                    if self.visible_chars < text_len {
                        self.visible_chars += 1;
                        if self.visible_chars < text_len {
                            let delay = typing_delay(profile, self.visible_chars, rng);
                            self.next_char_due = Some(now + delay);
                        } else {
                            self.complete_typing(now, profile);
                        }
                    } else {
                        self.complete_typing(now, profile);
                    }
                }
            }
        }

        if let Some(due) = self.subtitle_due {
            if now >= due {
                self.subtitle_due = None;
                self.fade_in_subtitle(now);
            }
        }

        if let Some(due) = self.crt_fade_due {
            if now >= due {
                self.crt_fade_due = None;
                self.crt_faded = true;
            }
        }
    }

    fn complete_typing(&mut self, now: Instant, profile: &HeroProfile) {
        self.phase = HeroPhase::Complete;
        self.caret_visible = false;
        self.caret_blinking = false;
        self.next_char_due = None;
        self.subtitle_due = Some(now + Duration::from_millis(SUBTITLE_DELAY_MS));
        if profile.crt_fade {
            self.crt_fade_due = Some(now + Duration::from_millis(CRT_FADE_DELAY_MS));
        }
    }
}

/// Delay before revealing the character at `next_index`.
fn typing_delay(profile: &HeroProfile, next_index: usize, rng: &mut impl Rng) -> Duration {
    let ch = profile.text.chars().nth(next_index);

    let ms = if ch == Some(' ') {
        // Gap between words.
        300 + rng.gen_range(0..100)
    } else if let Some(pause) = profile
        .pause_points
        .iter()
        .find(|p| p.prefix_len == next_index + 1)
    {
        pause.min_ms + rng.gen_range(0..pause.max_ms.saturating_sub(pause.min_ms).max(1))
    } else {
        let roll: f32 = rng.gen_range(0.0..1.0);
        if roll < 0.1 {
            // Occasional longer think.
            160 + rng.gen_range(0..80)
        } else if roll < 0.3 {
            // Brief hesitation.
            130 + rng.gen_range(0..30)
        } else {
            BASE_DELAY_MS
        }
    };
    Duration::from_millis(ms)
}
