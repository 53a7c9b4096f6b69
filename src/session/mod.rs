//! Conversation session module for MedicalBot.
//!
//! This module owns the ordered transcript and the single in-flight
//! submission, and exposes the shared state that the front-end reads.
//!
//! # Architecture
//!
//! ```text
//! front-end text (typed, transcribed, or file description)
//!        │
//!        ▼
//! ConversationSession::submit()  ── Busy while Pending
//!        │
//!        ├─ append user entry, Pending
//!        └─ tokio task: DomainClassifier → (delay) → Synthesizer
//!                 └─ append assistant entry, Idle
//!
//! SharedState (Arc<Mutex<SessionState>>) ←── read by the front-end
//! SessionEvent (mpsc)                    ──▶ optional push notifications
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use medical_bot::bot::RuleSynthesizer;
//! use medical_bot::config::AppConfig;
//! use medical_bot::session::ConversationSession;
//!
//! #[tokio::main]
//! async fn main() {
//!     let session = ConversationSession::new(AppConfig::default(), Arc::new(RuleSynthesizer::new()));
//!
//!     let handle = session.submit("tell me about the flu").unwrap();
//!     handle.wait().await;
//!
//!     for entry in session.transcript() {
//!         println!("{:?}: {}", entry.role(), entry.content());
//!     }
//! }
//! ```

pub mod runner;
pub mod state;
pub mod transcript;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{ConversationSession, Outcome, SessionEvent, SubmissionHandle, SubmitError};
pub use state::{lock_state, new_shared_state, SessionPhase, SessionState, SharedState};
pub use transcript::{Role, TranscriptEntry};
