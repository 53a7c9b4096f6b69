//! Message understanding and reply synthesis for MedicalBot.
//!
//! This module provides:
//! * [`DomainClassifier`] — decides whether an utterance is medical.
//! * [`Synthesizer`] — async trait implemented by all reply backends.
//! * [`RuleSynthesizer`] — ordered topic table, shaped by specialty and
//!   accuracy level.
//! * [`Phrasing`] — strategy for picking among equivalent lead-ins.
//! * [`ResponseBody`] — the structured reply payload.
//! * [`replies`] — fixed assistant texts (greeting, refusal, fallbacks).
//!
//! # Quick start
//!
//! ```rust,no_run
//! use medical_bot::bot::{DomainClassifier, RuleSynthesizer, Synthesizer};
//! use medical_bot::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let classifier = DomainClassifier::new();
//!     let synth = RuleSynthesizer::new();
//!
//!     let text = "tell me about the flu";
//!     if classifier.is_in_domain(text) {
//!         let body = synth.synthesize(text, &config.assistant).await.unwrap();
//!         println!("{}", body.content);
//!     }
//! }
//! ```

pub mod domain;
pub mod phrasing;
pub mod replies;
pub mod response;
pub mod synthesizer;
pub mod topics;
pub mod vocabulary;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use domain::{Classification, DomainClassifier};
pub use phrasing::{FixedPhrasing, Phrasing, RandomPhrasing};
pub use response::ResponseBody;
pub use synthesizer::{RuleSynthesizer, SynthesisError, Synthesizer};
