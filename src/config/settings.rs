//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and snapshotted by the
//! session at submission time.

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// Specialty
// ---------------------------------------------------------------------------

/// Medical specialty focus used to narrow response content.
///
/// Serialised as a lowercase string.  Unknown names parse to
/// [`Specialty::General`] so a stale or hand-edited settings file never
/// prevents the bot from answering.
///
/// ```
/// use medical_bot::config::Specialty;
///
/// assert_eq!(Specialty::from_name("Neurology"), Specialty::Neurology);
/// assert_eq!(Specialty::from_name("astrology"), Specialty::General);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Specialty {
    General,
    Cardiology,
    Neurology,
    Pediatrics,
    Dermatology,
    Emergency,
    Orthopedics,
    Psychiatry,
}

impl Specialty {
    /// Every specialty, in the order the settings surface lists them.
    pub const ALL: [Specialty; 8] = [
        Specialty::General,
        Specialty::Cardiology,
        Specialty::Neurology,
        Specialty::Pediatrics,
        Specialty::Dermatology,
        Specialty::Emergency,
        Specialty::Orthopedics,
        Specialty::Psychiatry,
    ];

    /// Parse a specialty name case-insensitively, defaulting to `General`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "cardiology" => Self::Cardiology,
            "neurology" => Self::Neurology,
            "pediatrics" => Self::Pediatrics,
            "dermatology" => Self::Dermatology,
            "emergency" => Self::Emergency,
            "orthopedics" => Self::Orthopedics,
            "psychiatry" => Self::Psychiatry,
            _ => Self::General,
        }
    }

    /// The lowercase identifier used in settings files and commands.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Cardiology => "cardiology",
            Self::Neurology => "neurology",
            Self::Pediatrics => "pediatrics",
            Self::Dermatology => "dermatology",
            Self::Emergency => "emergency",
            Self::Orthopedics => "orthopedics",
            Self::Psychiatry => "psychiatry",
        }
    }
}

impl Default for Specialty {
    fn default() -> Self {
        Self::General
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Specialty {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Specialty> for String {
    fn from(specialty: Specialty) -> Self {
        specialty.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// AssistantConfig
// ---------------------------------------------------------------------------

/// Default accuracy level used when the configured value is missing or not a
/// finite number.
pub const DEFAULT_ACCURACY_LEVEL: f32 = 0.9;

/// Settings that shape the synthesized replies.
///
/// `provider`, `model` and `temperature` are selection metadata only; the
/// rule-based synthesizer passes them through without interpreting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Specialty focus for treatment add-ons and general summaries.
    pub specialty: Specialty,
    /// Response granularity in `[0, 1]`.  Higher means more clinical detail.
    pub accuracy_level: f32,
    /// Provider identifier (e.g. `"openai"`).
    pub provider: String,
    /// Model identifier (e.g. `"gpt-4o"`, `"gpt-4o-mini"`).
    pub model: String,
    /// Sampling temperature in `[0, 1]`.
    pub temperature: f32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            specialty: Specialty::General,
            accuracy_level: DEFAULT_ACCURACY_LEVEL,
            provider: "openai".into(),
            model: "gpt-4o".into(),
            temperature: 0.7,
        }
    }
}

impl AssistantConfig {
    /// Return a copy with numeric fields forced into their valid ranges.
    ///
    /// A non-finite accuracy level falls back to [`DEFAULT_ACCURACY_LEVEL`];
    /// finite values are clamped to `[0, 1]`.  Temperature is clamped the
    /// same way (non-finite becomes the default `0.7`).
    pub fn sanitized(&self) -> Self {
        let accuracy_level = if self.accuracy_level.is_finite() {
            self.accuracy_level.clamp(0.0, 1.0)
        } else {
            DEFAULT_ACCURACY_LEVEL
        };
        let temperature = if self.temperature.is_finite() {
            self.temperature.clamp(0.0, 1.0)
        } else {
            AssistantConfig::default().temperature
        };
        Self {
            accuracy_level,
            temperature,
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// LatencyConfig
// ---------------------------------------------------------------------------

/// Minimum perceived latency before an assistant entry is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    /// Delay before the out-of-domain refusal is appended.
    pub refusal_delay_ms: u64,
    /// Delay before the synthesizer is invoked for in-domain messages.
    pub response_delay_ms: u64,
}

impl LatencyConfig {
    /// No delays at all — used by tests and scripted sessions.
    pub fn immediate() -> Self {
        Self {
            refusal_delay_ms: 0,
            response_delay_ms: 0,
        }
    }

    pub fn refusal_delay(&self) -> Duration {
        Duration::from_millis(self.refusal_delay_ms)
    }

    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            refusal_delay_ms: 1_000,
            response_delay_ms: 1_500,
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Terminal front-end behaviour settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Print the medical disclaimer banner on startup.
    pub show_disclaimer: bool,
    /// Print the "thinking" indicator while a reply is pending.
    pub show_thinking: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_disclaimer: true,
            show_thinking: true,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use medical_bot::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Reply shaping settings.
    pub assistant: AssistantConfig,
    /// Simulated processing latency.
    pub latency: LatencyConfig,
    /// Terminal front-end settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_missing_file_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nope.toml");
        let config = AppConfig::load_from(&path).expect("load");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.assistant.specialty, Specialty::General);
        assert!((cfg.assistant.accuracy_level - 0.9).abs() < f32::EPSILON);
        assert_eq!(cfg.assistant.model, "gpt-4o");
        assert!((cfg.assistant.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(cfg.latency.refusal_delay_ms, 1_000);
        assert_eq!(cfg.latency.response_delay_ms, 1_500);
        assert!(cfg.ui.show_disclaimer);
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.assistant.specialty = Specialty::Emergency;
        cfg.assistant.accuracy_level = 0.5;
        cfg.assistant.model = "gpt-4o-mini".into();
        cfg.latency = LatencyConfig::immediate();
        cfg.ui.show_disclaimer = false;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_missing_keys_with_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[assistant]\nspecialty = \"neurology\"\n").expect("write");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(loaded.assistant.specialty, Specialty::Neurology);
        assert!((loaded.assistant.accuracy_level - DEFAULT_ACCURACY_LEVEL).abs() < f32::EPSILON);
        assert_eq!(loaded.latency, LatencyConfig::default());
    }

    #[test]
    fn unknown_specialty_in_file_becomes_general() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("unknown.toml");
        std::fs::write(&path, "[assistant]\nspecialty = \"veterinary\"\n").expect("write");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(loaded.assistant.specialty, Specialty::General);
    }

    #[test]
    fn specialty_names_round_trip() {
        for specialty in Specialty::ALL {
            assert_eq!(Specialty::from_name(specialty.as_str()), specialty);
        }
    }

    #[test]
    fn sanitized_clamps_and_defaults() {
        let mut cfg = AssistantConfig::default();
        cfg.accuracy_level = 1.7;
        cfg.temperature = -0.2;
        let clean = cfg.sanitized();
        assert!((clean.accuracy_level - 1.0).abs() < f32::EPSILON);
        assert!(clean.temperature.abs() < f32::EPSILON);

        cfg.accuracy_level = f32::NAN;
        assert!((cfg.sanitized().accuracy_level - DEFAULT_ACCURACY_LEVEL).abs() < f32::EPSILON);
    }

    #[test]
    fn latency_durations() {
        let latency = LatencyConfig::default();
        assert_eq!(latency.refusal_delay(), Duration::from_millis(1_000));
        assert_eq!(latency.response_delay(), Duration::from_millis(1_500));
        assert_eq!(LatencyConfig::immediate().response_delay(), Duration::ZERO);
    }
}
