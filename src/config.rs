//! Site configuration
//!
//! The server used to inject boot sequences and blog filter aliases into
//! the page before the scripts ran; here the same data comes from a JSON
//! config file resolved in priority order:
//!
//! 1. An explicit `--config` path (errors are fatal)
//! 2. `./blockhead.json` (local project customization)
//! 3. `<user config dir>/blockhead-tui/config.json`
//! 4. Embedded defaults
//!
//! Configuration is loaded once at startup and immutable thereafter.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Profile used when an unknown name is requested.
pub const DEFAULT_PROFILE: &str = "professional";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Boot sequence profile: scripted status lines plus timing.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BootProfile {
    pub messages: Vec<String>,
    pub message_delay_ms: u64,
    pub final_pause_ms: u64,
    pub fade_out_ms: u64,
    /// Shorter list used at or below the narrow-viewport breakpoint.
    #[serde(default)]
    pub narrow_messages: Option<Vec<String>>,
}

/// Word-level typing pause: after `prefix_len` characters are shown,
/// the next keystroke waits `min_ms..max_ms`.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PausePoint {
    pub prefix_len: usize,
    pub min_ms: u64,
    pub max_ms: u64,
}

fn default_true() -> bool {
    true
}

/// Hero animation profile for a named style.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeroProfile {
    pub text: String,
    /// Whether the title is typed character by character. When false the
    /// title renders immediately and only the boot overlay animates.
    #[serde(default)]
    pub typewriter: bool,
    /// Whether the style plays a boot sequence on first load.
    #[serde(default = "default_true")]
    pub boot: bool,
    /// Whether the screen effect fades out after typing completes.
    #[serde(default)]
    pub crt_fade: bool,
    #[serde(default)]
    pub pause_points: Vec<PausePoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub debug_logging: bool,
    pub hero_style: String,
    pub api_base_url: String,
    pub boot_sequences: HashMap<String, BootProfile>,
    pub hero_profiles: HashMap<String, HeroProfile>,
    /// Blog tag -> alias list.
    pub blog_filters: HashMap<String, Vec<String>>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut boot_sequences = HashMap::new();
        boot_sequences.insert(
            "professional".to_string(),
            BootProfile {
                messages: vec![
                    "Initializing secure blockchain infrastructure.".to_string(),
                    "Loading enterprise AI integration systems.".to_string(),
                    "Connecting to production-grade payment rails.".to_string(),
                    "Strategic consulting protocols online.".to_string(),
                    "Ready for high-impact collaboration.".to_string(),
                ],
                message_delay_ms: 1200,
                final_pause_ms: 1000,
                fade_out_ms: 800,
                narrow_messages: Some(vec![
                    "Integrating AI".to_string(),
                    "Analyzing Chain Data".to_string(),
                    "Maximizing Engineering Spend".to_string(),
                    "Ready to help you win".to_string(),
                ]),
            },
        );
        boot_sequences.insert(
            "cyberpunk".to_string(),
            BootProfile {
                messages: vec![
                    "System initializing...".to_string(),
                    "Loading neural networks...".to_string(),
                    "Establishing secure connection...".to_string(),
                    "Ready.".to_string(),
                ],
                message_delay_ms: 800,
                final_pause_ms: 600,
                fade_out_ms: 800,
                narrow_messages: Some(vec![
                    "Booting...".to_string(),
                    "Neural link active".to_string(),
                    "Chain sync complete".to_string(),
                    "Ready.".to_string(),
                ]),
            },
        );

        // Pause points for the stock title: after "BLOCK" and after
        // "HEAD" the typist hesitates, exactly as scripted.
        let pause_points = vec![
            PausePoint {
                prefix_len: 5,
                min_ms: 420,
                max_ms: 520,
            },
            PausePoint {
                prefix_len: 9,
                min_ms: 620,
                max_ms: 820,
            },
        ];

        let mut hero_profiles = HashMap::new();
        hero_profiles.insert(
            "professional".to_string(),
            HeroProfile {
                text: "BLOCKHEAD CONSULTING".to_string(),
                typewriter: false,
                boot: true,
                crt_fade: false,
                pause_points: pause_points.clone(),
            },
        );
        hero_profiles.insert(
            "cyberpunk".to_string(),
            HeroProfile {
                text: "BLOCKHEAD CONSULTING".to_string(),
                typewriter: true,
                boot: true,
                crt_fade: true,
                pause_points,
            },
        );

        let mut blog_filters = HashMap::new();
        blog_filters.insert(
            "ai".to_string(),
            vec![
                "ai".to_string(),
                "machine learning".to_string(),
                "llm".to_string(),
            ],
        );
        blog_filters.insert(
            "blockchain".to_string(),
            vec![
                "blockchain".to_string(),
                "ethereum".to_string(),
                "solana".to_string(),
                "crypto".to_string(),
            ],
        );
        blog_filters.insert(
            "payments".to_string(),
            vec![
                "payments".to_string(),
                "stripe".to_string(),
                "fintech".to_string(),
            ],
        );
        blog_filters.insert(
            "engineering".to_string(),
            vec!["engineering".to_string(), "rust".to_string(), "go".to_string()],
        );

        Self {
            debug_logging: false,
            hero_style: "professional".to_string(),
            api_base_url: "http://localhost:8080".to_string(),
            boot_sequences,
            hero_profiles,
            blog_filters,
        }
    }
}

impl SiteConfig {
    /// Boot profile by name, falling back to the default profile.
    /// `ensure_profile_defaults` guarantees the default exists.
    pub fn boot_profile(&self, name: &str) -> &BootProfile {
        self.boot_sequences
            .get(name)
            .or_else(|| self.boot_sequences.get(DEFAULT_PROFILE))
            .expect("default boot profile always present")
    }

    /// Hero profile by name, falling back to the default profile.
    pub fn hero_profile(&self, name: &str) -> &HeroProfile {
        self.hero_profiles
            .get(name)
            .or_else(|| self.hero_profiles.get(DEFAULT_PROFILE))
            .expect("default hero profile always present")
    }

    /// Backfill embedded profiles a user config left out, so the
    /// default-profile fallback always has somewhere to land.
    fn ensure_profile_defaults(&mut self) {
        let defaults = Self::default();
        for (name, profile) in defaults.boot_sequences {
            self.boot_sequences.entry(name).or_insert(profile);
        }
        for (name, profile) in defaults.hero_profiles {
            self.hero_profiles.entry(name).or_insert(profile);
        }
    }
}

fn load_file(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: SiteConfig =
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.ensure_profile_defaults();
    Ok(config)
}

/// Resolve configuration through the lookup chain. Returns the config
/// and the path it came from, if any. Only an explicit path is fatal on
/// failure; the other layers fall through to the next candidate.
pub fn load(explicit: Option<&Path>) -> Result<(SiteConfig, Option<PathBuf>), ConfigError> {
    if let Some(path) = explicit {
        let config = load_file(path)?;
        return Ok((config, Some(path.to_path_buf())));
    }

    let mut candidates = vec![PathBuf::from("blockhead.json")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("blockhead-tui").join("config.json"));
    }

    for candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        match load_file(&candidate) {
            Ok(config) => return Ok((config, Some(candidate))),
            Err(err) => {
                tracing::warn!("ignoring unreadable config {}: {}", candidate.display(), err);
            }
        }
    }

    Ok((SiteConfig::default(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_profiles_match_shipped_timings() {
        let config = SiteConfig::default();
        let pro = config.boot_profile("professional");
        assert_eq!(pro.messages.len(), 5);
        assert_eq!(pro.message_delay_ms, 1200);
        assert_eq!(pro.final_pause_ms, 1000);
        assert_eq!(pro.fade_out_ms, 800);
        assert_eq!(pro.narrow_messages.as_ref().unwrap().len(), 4);

        let cyber = config.boot_profile("cyberpunk");
        assert_eq!(cyber.messages.len(), 4);
        assert_eq!(cyber.message_delay_ms, 800);
    }

    #[test]
    fn test_unknown_profile_falls_back_to_default() {
        let config = SiteConfig::default();
        assert_eq!(
            config.boot_profile("neon"),
            config.boot_profile(DEFAULT_PROFILE)
        );
        assert_eq!(
            config.hero_profile("neon"),
            config.hero_profile(DEFAULT_PROFILE)
        );
    }

    #[test]
    fn test_default_pause_points_cover_stock_title() {
        let config = SiteConfig::default();
        let profile = config.hero_profile("cyberpunk");
        assert_eq!(profile.pause_points.len(), 2);
        assert_eq!(profile.pause_points[0].prefix_len, 5);
        assert_eq!(profile.pause_points[1].prefix_len, 9);
        assert!(profile.typewriter);
        assert!(!config.hero_profile("professional").typewriter);
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "debugLogging": true,
                "heroStyle": "cyberpunk",
                "apiBaseUrl": "http://example.test",
                "bootSequences": {{
                    "cyberpunk": {{
                        "messages": ["One.", "Two."],
                        "messageDelayMs": 500,
                        "finalPauseMs": 250,
                        "fadeOutMs": 400
                    }}
                }}
            }}"#
        )
        .unwrap();

        let (config, source) = load(Some(file.path())).unwrap();
        assert!(config.debug_logging);
        assert_eq!(config.hero_style, "cyberpunk");
        assert_eq!(config.api_base_url, "http://example.test");
        let profile = config.boot_profile("cyberpunk");
        assert_eq!(profile.messages.len(), 2);
        assert_eq!(profile.narrow_messages, None);
        assert_eq!(source.as_deref(), Some(file.path()));
        // Profiles the file left out are backfilled from the defaults.
        assert_eq!(config.boot_profile("professional").messages.len(), 5);
    }

    #[test]
    fn test_load_explicit_missing_file_is_fatal() {
        let result = load(Some(Path::new("/nonexistent/blockhead.json")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_explicit_invalid_json_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let result = load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
