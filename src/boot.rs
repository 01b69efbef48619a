//! Boot sequence engine
//!
//! Plays a scripted list of status lines over the hero title: each line
//! grows a trailing ellipsis one dot at a time, the next line follows
//! after the configured delay, and the whole overlay fades out and
//! removes itself after a final pause.
//!
//! The engine is an explicit timeline: every frame is derived from
//! elapsed time against the start instant, so cancellation is dropping
//! the sequence and the total duration is computed up front.
//! [`play`] returns that total so dependent animations can be scheduled
//! without ever inspecting the overlay's state.

use std::time::{Duration, Instant};

use crate::config::SiteConfig;
use crate::theme::NARROW_VIEWPORT_COLS;

/// Delay before the first status line appears.
pub const START_DELAY_MS: u64 = 300;

/// Fixed interval between trailing dots.
pub const DOT_INTERVAL_MS: u64 = 200;

/// Dots appended to each status line.
pub const DOT_COUNT: u64 = 3;

/// Time one line spends growing its dots.
const DOT_TIME_MS: u64 = DOT_INTERVAL_MS * DOT_COUNT;

/// Current frame of a running sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BootFrame {
    /// Start delay; nothing rendered yet.
    Pending,
    /// Status line `index` with `dots` trailing dots so far.
    Message { index: usize, dots: usize },
    /// Last line holds at full dots before the fade.
    FinalPause,
    /// Fading out; `opacity` is the remaining visibility.
    FadeOut { opacity: f32 },
    /// Finished; the overlay should be removed.
    Done,
}

/// A live boot sequence. At most one exists at a time.
#[derive(Debug, Clone)]
pub struct BootSequence {
    messages: Vec<String>,
    message_delay: Duration,
    final_pause: Duration,
    fade_out: Duration,
    started: Instant,
}

impl BootSequence {
    /// Advertised total duration:
    /// `start_delay + messages * message_delay + final_pause + fade_out`.
    ///
    /// This is the scheduling contract callers rely on.
    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(
            START_DELAY_MS
                + self.messages.len() as u64 * self.message_delay.as_millis() as u64
                + self.final_pause.as_millis() as u64
                + self.fade_out.as_millis() as u64,
        )
    }

    /// Wall time one message occupies. The configured delay, minus the
    /// time already spent on dots, never goes negative: a delay shorter
    /// than the dot animation just advances as soon as the dots finish.
    fn message_span_ms(&self) -> u64 {
        (self.message_delay.as_millis() as u64).max(DOT_TIME_MS)
    }

    /// Frame for the given instant.
    pub fn frame(&self, now: Instant) -> BootFrame {
        let elapsed = now.saturating_duration_since(self.started).as_millis() as u64;
        if elapsed < START_DELAY_MS {
            return BootFrame::Pending;
        }

        let span = self.message_span_ms();
        let mut t = START_DELAY_MS;
        for index in 0..self.messages.len() {
            if elapsed < t + span {
                let offset = elapsed - t;
                let dots = ((offset / DOT_INTERVAL_MS) as usize).min(DOT_COUNT as usize);
                return BootFrame::Message { index, dots };
            }
            t += span;
        }

        let final_pause = self.final_pause.as_millis() as u64;
        if elapsed < t + final_pause {
            return BootFrame::FinalPause;
        }
        t += final_pause;

        let fade = self.fade_out.as_millis() as u64;
        if fade > 0 && elapsed < t + fade {
            let opacity = 1.0 - (elapsed - t) as f32 / fade as f32;
            return BootFrame::FadeOut { opacity };
        }

        BootFrame::Done
    }

    /// Text to display for a frame, dots included.
    pub fn line(&self, frame: BootFrame) -> Option<String> {
        match frame {
            BootFrame::Pending | BootFrame::Done => None,
            BootFrame::Message { index, dots } => self
                .messages
                .get(index)
                .map(|m| format!("{}{}", m, ".".repeat(dots))),
            BootFrame::FinalPause | BootFrame::FadeOut { .. } => self
                .messages
                .last()
                .map(|m| format!("{}{}", m, ".".repeat(DOT_COUNT as usize))),
        }
    }
}

/// Start a boot sequence for the named profile.
///
/// Returns the advertised total duration, or zero without touching
/// `slot` when a sequence already exists or the hero anchor is missing —
/// both are defined no-ops, not errors.
pub fn play(
    slot: &mut Option<BootSequence>,
    config: &SiteConfig,
    profile_name: &str,
    anchor_present: bool,
    viewport_cols: u16,
    now: Instant,
) -> Duration {
    if slot.is_some() {
        tracing::debug!("boot sequence already exists, skipping");
        return Duration::ZERO;
    }
    if !anchor_present {
        tracing::warn!("boot sequence: hero anchor not found");
        return Duration::ZERO;
    }

    let profile = config.boot_profile(profile_name);
    let narrow = viewport_cols <= NARROW_VIEWPORT_COLS;
    let messages = match (&profile.narrow_messages, narrow) {
        (Some(narrow_list), true) => narrow_list.clone(),
        _ => profile.messages.clone(),
    };

    let sequence = BootSequence {
        messages,
        message_delay: Duration::from_millis(profile.message_delay_ms),
        final_pause: Duration::from_millis(profile.final_pause_ms),
        fade_out: Duration::from_millis(profile.fade_out_ms),
        started: now,
    };
    let total = sequence.total_duration();
    *slot = Some(sequence);
    total
}
