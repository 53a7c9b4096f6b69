//! Session state machine and shared conversation state.
//!
//! [`SessionPhase`] tracks the single in-flight submission.  The front-end
//! reads it via [`SharedState`] to gate input.
//!
//! [`SessionState`] is the single source of truth for the conversation:
//! the append-only transcript, the current phase, the live configuration and
//! the last transient notice.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<SessionState>>` — cheap to
//! clone and safe to share across threads.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::bot::replies;
use crate::config::AppConfig;

use super::transcript::TranscriptEntry;

// ---------------------------------------------------------------------------
// SessionPhase
// ---------------------------------------------------------------------------

/// Phases of one submission cycle.
///
/// ```text
/// Idle ──submit──▶ Pending ──assistant entry appended──▶ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Ready to accept a submission.
    Idle,
    /// A submitted utterance is waiting for its assistant entry.
    Pending,
}

impl SessionPhase {
    /// Returns `true` while a reply is outstanding.
    ///
    /// ```
    /// use medical_bot::session::SessionPhase;
    ///
    /// assert!(!SessionPhase::Idle.is_busy());
    /// assert!(SessionPhase::Pending.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionPhase::Pending)
    }

    /// A short human-readable label for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Pending => "Thinking",
        }
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Idle
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Shared conversation state.
///
/// Held behind [`SharedState`].  The session mutates the transcript and
/// phase; the settings surface writes `config`; the front-end reads
/// everything.
#[derive(Debug)]
pub struct SessionState {
    transcript: Vec<TranscriptEntry>,
    phase: SessionPhase,

    /// Live configuration.  Snapshotted at each submission.
    pub config: AppConfig,

    /// Last transient notice for the error channel (e.g. a synthesis
    /// failure).  Cleared when the next submission is accepted.
    pub notice: Option<String>,
}

impl SessionState {
    /// New state seeded with the assistant greeting.
    pub fn new(config: AppConfig) -> Self {
        Self {
            transcript: vec![TranscriptEntry::assistant_text(replies::GREETING)],
            phase: SessionPhase::Idle,
            config,
            notice: None,
        }
    }

    /// The transcript, oldest entry first.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// `true` exactly while a submission awaits its assistant entry.
    pub fn pending(&self) -> bool {
        self.phase.is_busy()
    }

    pub(crate) fn append(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry);
    }

    pub(crate) fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`SessionState`].
///
/// Cheap to clone (`Arc` clone).  Lock for a short critical section; do
/// **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<SessionState>>;

/// Construct a new [`SharedState`] with a seeded transcript.
pub fn new_shared_state(config: AppConfig) -> SharedState {
    Arc::new(Mutex::new(SessionState::new(config)))
}

/// Lock `state`, recovering the guard if a previous holder panicked.
///
/// Every mutation is a single push or assignment, so a poisoned lock never
/// guards a half-written transcript.
pub fn lock_state(state: &SharedState) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
