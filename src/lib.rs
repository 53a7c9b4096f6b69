//! MedicalBot conversation core.
//!
//! * [`bot`] — domain classification and rule-based reply synthesis.
//! * [`session`] — the transcript and the one-at-a-time submission cycle.
//! * [`config`] — persisted assistant, latency and UI settings.
//! * [`app`] — the terminal front-end.

pub mod app;
pub mod bot;
pub mod config;
pub mod session;
