//! Configuration module for MedicalBot.
//!
//! Provides `AppConfig` (top-level settings), the assistant/latency/UI
//! sub-configs, `AppPaths` for the cross-platform config directory, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, AssistantConfig, LatencyConfig, Specialty, UiConfig, DEFAULT_ACCURACY_LEVEL,
};
