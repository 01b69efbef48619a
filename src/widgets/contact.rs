//! Contact form and its encryption animation
//!
//! A purely decorative three-phase cycle — scramble, glitch, then an
//! "Encrypting..." ticker — repeated a fixed number of times after a
//! successful submission, ending by clearing the fields and showing a
//! success alert that dismisses itself. A running flag stops a second
//! submission from starting a concurrent cycle, and every interval
//! handle from a prior cycle is cleared before a new cycle or
//! finalization begins so a leaked timer can never write into the
//! fields after completion.

use std::time::{Duration, Instant};

use rand::Rng;

pub const SCRAMBLE_MS: u64 = 500;
pub const GLITCH_MS: u64 = 400;
pub const ENCRYPTING_MS: u64 = 700;
pub const DOT_FRAME_MS: u64 = 120;
pub const MAX_CYCLES: u32 = 3;
pub const SUCCESS_DISMISS_MS: u64 = 4000;
pub const SUCCESS_FADE_MS: u64 = 1000;

const SCRAMBLE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()";
const CORRUPTION_CHARS: [char; 10] = ['█', '▓', '▒', '░', '▄', '▀', '■', '□', '▪', '▫'];
const ENCRYPTING_FRAMES: [&str; 3] = ["Encrypting.", "Encrypting..", "Encrypting..."];
const ENCRYPTING_FRAME_COUNT: u32 = ENCRYPTING_FRAMES.len() as u32 * 2;

pub const FIELD_NAME: usize = 0;
pub const FIELD_EMAIL: usize = 1;
pub const FIELD_MESSAGE: usize = 2;
pub const FIELD_COUNT: usize = 3;

/// Styling state shared by all three fields during the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldVisual {
    #[default]
    Normal,
    Scrambling,
    Glitching,
    EncryptingText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
}

/// Inline alert under the form.
#[derive(Debug, Clone)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
    pub fading: bool,
}

#[derive(Debug, Clone, Copy)]
enum EncPhase {
    Scramble { until: Instant },
    Glitch { until: Instant },
    Encrypting { until: Instant },
}

/// A tracked repeating timer writing ticker frames into one field.
#[derive(Debug, Clone)]
struct IntervalHandle {
    field: usize,
    next_due: Instant,
    frames_left: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub fields: [String; FIELD_COUNT],
    pub visual: FieldVisual,
    pub alert: Option<Alert>,
    pub submitting: bool,
    running: bool,
    cycle: u32,
    phase: Option<EncPhase>,
    intervals: Vec<IntervalHandle>,
    originals: Option<[String; FIELD_COUNT]>,
    success_dismiss_due: Option<Instant>,
    success_remove_due: Option<Instant>,
}

impl ContactForm {
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Live interval handles. Zero after finalization.
    pub fn live_interval_count(&self) -> usize {
        self.intervals.len()
    }

    /// Client-side validation, mirroring the server's rules so a bad
    /// submit never leaves the terminal.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.fields[FIELD_NAME].trim().chars().count() < 2 {
            errors.push("Name must be at least 2 characters long".to_string());
        }
        let email = &self.fields[FIELD_EMAIL];
        if !email.contains('@') || !email.contains('.') {
            errors.push("Please enter a valid email address".to_string());
        }
        if self.fields[FIELD_MESSAGE].trim().chars().count() < 10 {
            errors.push("Message must be at least 10 characters long".to_string());
        }
        errors
    }

    pub fn show_error(&mut self, text: impl Into<String>) {
        self.alert = Some(Alert {
            kind: AlertKind::Error,
            text: text.into(),
            fading: false,
        });
    }

    /// Successful submission signal: start the animation unless one is
    /// already running.
    pub fn on_submit_success(&mut self, now: Instant, rng: &mut impl Rng) {
        self.submitting = false;
        if self.running {
            return;
        }
        self.alert = None;
        self.start_animation(now, rng);
    }

    pub fn on_submit_error(&mut self, message: impl Into<String>, _now: Instant) {
        self.submitting = false;
        self.show_error(message);
    }

    fn start_animation(&mut self, now: Instant, rng: &mut impl Rng) {
        if self.running {
            return;
        }
        if self.live_interval_count() > 0 {
            tracing::debug!(
                "clearing {} stale encryption intervals",
                self.live_interval_count()
            );
        }
        self.clear_intervals();
        self.originals = Some(self.fields.clone());
        self.running = true;
        self.cycle = 1;
        self.enter_scramble(now, rng);
    }

    fn enter_scramble(&mut self, now: Instant, rng: &mut impl Rng) {
        self.scramble_fields(rng);
        self.visual = FieldVisual::Scrambling;
        self.phase = Some(EncPhase::Scramble {
            until: now + Duration::from_millis(SCRAMBLE_MS),
        });
    }

    fn scramble_fields(&mut self, rng: &mut impl Rng) {
        let originals = self.originals.clone().unwrap_or_default();
        for (field, original) in self.fields.iter_mut().zip(originals.iter()) {
            *field = original
                .chars()
                .map(|c| {
                    if c == ' ' {
                        ' '
                    } else {
                        SCRAMBLE_CHARS[rng.gen_range(0..SCRAMBLE_CHARS.len())] as char
                    }
                })
                .collect();
        }
    }

    fn glitch_fields(&mut self, rng: &mut impl Rng) {
        for field in self.fields.iter_mut() {
            *field = field
                .chars()
                .map(|c| {
                    if rng.gen_range(0.0..1.0f32) < 0.3 {
                        CORRUPTION_CHARS[rng.gen_range(0..CORRUPTION_CHARS.len())]
                    } else {
                        c
                    }
                })
                .collect();
        }
        self.visual = FieldVisual::Glitching;
    }

    fn enter_encrypting(&mut self, now: Instant) {
        self.visual = FieldVisual::EncryptingText;
        for i in 0..FIELD_COUNT {
            self.intervals.push(IntervalHandle {
                field: i,
                next_due: now + Duration::from_millis(DOT_FRAME_MS),
                frames_left: ENCRYPTING_FRAME_COUNT,
            });
        }
        self.phase = Some(EncPhase::Encrypting {
            until: now + Duration::from_millis(ENCRYPTING_MS),
        });
    }

    fn clear_intervals(&mut self) {
        self.intervals.clear();
    }

    fn finish(&mut self, now: Instant) {
        self.clear_intervals();
        for field in self.fields.iter_mut() {
            field.clear();
        }
        self.visual = FieldVisual::Normal;
        self.running = false;
        self.originals = None;
        self.phase = None;
        self.alert = Some(Alert {
            kind: AlertKind::Success,
            text: "Encrypted message sent successfully! I'll get back to you within 24 hours."
                .to_string(),
            fading: false,
        });
        self.success_dismiss_due = Some(now + Duration::from_millis(SUCCESS_DISMISS_MS));
        self.success_remove_due = None;
    }

    /// Advance the animation and alert timers.
    pub fn tick(&mut self, now: Instant, rng: &mut impl Rng) {
        // Ticker frames first; a phase change below may clear them.
        for handle in self.intervals.iter_mut() {
            while handle.frames_left > 0 && now >= handle.next_due {
                let shown = ENCRYPTING_FRAME_COUNT - handle.frames_left;
                self.fields[handle.field] =
                    ENCRYPTING_FRAMES[shown as usize % ENCRYPTING_FRAMES.len()].to_string();
                handle.frames_left -= 1;
                handle.next_due += Duration::from_millis(DOT_FRAME_MS);
            }
        }
        self.intervals.retain(|h| h.frames_left > 0);

        match self.phase {
            Some(EncPhase::Scramble { until }) if now >= until => {
                self.glitch_fields(rng);
                self.phase = Some(EncPhase::Glitch {
                    until: now + Duration::from_millis(GLITCH_MS),
                });
            }
            Some(EncPhase::Glitch { until }) if now >= until => {
                self.enter_encrypting(now);
            }
            Some(EncPhase::Encrypting { until }) if now >= until => {
                // Prior cycle's timers never outlive the phase.
                self.clear_intervals();
                if self.cycle < MAX_CYCLES {
                    self.cycle += 1;
                    self.enter_scramble(now, rng);
                } else {
                    self.finish(now);
                }
            }
            _ => {}
        }

        if let Some(due) = self.success_dismiss_due {
            if now >= due {
                self.success_dismiss_due = None;
                if let Some(alert) = self.alert.as_mut() {
                    if alert.kind == AlertKind::Success {
                        alert.fading = true;
                        self.success_remove_due =
                            Some(now + Duration::from_millis(SUCCESS_FADE_MS));
                    }
                }
            }
        }
        if let Some(due) = self.success_remove_due {
            if now >= due {
                self.success_remove_due = None;
                if matches!(self.alert, Some(Alert { kind: AlertKind::Success, .. })) {
                    self.alert = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::default();
        form.fields[FIELD_NAME] = "Ada Lovelace".to_string();
        form.fields[FIELD_EMAIL] = "ada@example.com".to_string();
        form.fields[FIELD_MESSAGE] = "I would like to talk about an engagement.".to_string();
        form
    }

    #[test]
    fn test_validation_rules() {
        let mut form = ContactForm::default();
        assert_eq!(form.validate().len(), 3);

        form.fields[FIELD_NAME] = "Al".to_string();
        form.fields[FIELD_EMAIL] = "al@example.com".to_string();
        form.fields[FIELD_MESSAGE] = "A long enough message.".to_string();
        assert!(form.validate().is_empty());

        form.fields[FIELD_EMAIL] = "not-an-email".to_string();
        assert_eq!(form.validate(), vec!["Please enter a valid email address"]);
    }

    #[test]
    fn test_cycle_never_shows_original_values() {
        let mut form = filled_form();
        let originals = form.fields.clone();
        let mut rng = StdRng::seed_from_u64(11);
        let start = Instant::now();
        form.on_submit_success(start, &mut rng);

        let total = (SCRAMBLE_MS + GLITCH_MS + ENCRYPTING_MS) * MAX_CYCLES as u64;
        let mut t = 0;
        while t < total {
            form.tick(start + Duration::from_millis(t), &mut rng);
            if form.is_running() {
                for (value, original) in form.fields.iter().zip(originals.iter()) {
                    assert_ne!(value, original, "original value leaked mid-animation");
                }
            }
            t += 40;
        }
    }

    #[test]
    fn test_finish_clears_fields_and_intervals() {
        let mut form = filled_form();
        let mut rng = StdRng::seed_from_u64(5);
        let start = Instant::now();
        form.on_submit_success(start, &mut rng);

        let mut t = 0;
        while form.is_running() {
            form.tick(start + Duration::from_millis(t), &mut rng);
            t += 40;
            assert!(t < 20_000, "animation never finished");
        }
        assert_eq!(form.live_interval_count(), 0);
        for field in &form.fields {
            assert_eq!(field, "");
        }
        assert!(matches!(
            form.alert,
            Some(Alert { kind: AlertKind::Success, .. })
        ));
    }

    #[test]
    fn test_encrypting_frames_tick_through_dots() {
        let mut form = filled_form();
        let mut rng = StdRng::seed_from_u64(2);
        let start = Instant::now();
        form.on_submit_success(start, &mut rng);

        form.tick(start + Duration::from_millis(SCRAMBLE_MS), &mut rng);
        let enc_start = SCRAMBLE_MS + GLITCH_MS;
        form.tick(start + Duration::from_millis(enc_start), &mut rng);
        assert_eq!(form.visual, FieldVisual::EncryptingText);
        assert_eq!(form.live_interval_count(), FIELD_COUNT);

        form.tick(
            start + Duration::from_millis(enc_start + DOT_FRAME_MS),
            &mut rng,
        );
        assert_eq!(form.fields[FIELD_NAME], "Encrypting.");
        form.tick(
            start + Duration::from_millis(enc_start + 2 * DOT_FRAME_MS),
            &mut rng,
        );
        assert_eq!(form.fields[FIELD_NAME], "Encrypting..");
        form.tick(
            start + Duration::from_millis(enc_start + 3 * DOT_FRAME_MS),
            &mut rng,
        );
        assert_eq!(form.fields[FIELD_NAME], "Encrypting...");
    }

    #[test]
    fn test_second_submission_cannot_start_concurrent_cycle() {
        let mut form = filled_form();
        let mut rng = StdRng::seed_from_u64(9);
        let start = Instant::now();
        form.on_submit_success(start, &mut rng);
        let fields_after_first = form.fields.clone();

        // A second success signal while running is dropped entirely.
        form.on_submit_success(start + Duration::from_millis(100), &mut rng);
        assert_eq!(form.fields, fields_after_first);
        assert!(form.is_running());
    }

    #[test]
    fn test_success_alert_fades_then_disappears() {
        let mut form = filled_form();
        let mut rng = StdRng::seed_from_u64(4);
        let start = Instant::now();
        form.on_submit_success(start, &mut rng);

        let mut t = 0;
        while form.is_running() {
            form.tick(start + Duration::from_millis(t), &mut rng);
            t += 40;
            assert!(t < 20_000, "animation never finished");
        }
        assert!(form.alert.is_some());
        let finished_at = t;

        let dismiss_at = finished_at + SUCCESS_DISMISS_MS;
        form.tick(start + Duration::from_millis(dismiss_at), &mut rng);
        assert!(form.alert.as_ref().unwrap().fading);

        form.tick(
            start + Duration::from_millis(dismiss_at + SUCCESS_FADE_MS),
            &mut rng,
        );
        assert!(form.alert.is_none());
    }

    #[test]
    fn test_scramble_preserves_spaces() {
        let mut form = filled_form();
        let mut rng = StdRng::seed_from_u64(1);
        form.on_submit_success(Instant::now(), &mut rng);
        let scrambled = &form.fields[FIELD_NAME];
        assert_eq!(scrambled.chars().count(), "Ada Lovelace".chars().count());
        assert_eq!(scrambled.chars().nth(3), Some(' '));
    }
}
