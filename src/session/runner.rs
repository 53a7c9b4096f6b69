//! Conversation session — drives the classify → synthesize → append cycle.
//!
//! [`ConversationSession`] owns a [`SharedState`] and accepts one submission
//! at a time.
//!
//! # Submission flow
//!
//! ```text
//! submit(text)
//!   ├─ pending?            → Err(SubmitError::Busy), nothing appended
//!   └─ append user entry, phase = Pending, snapshot config
//!        └─ tokio task
//!             ├─ out-of-domain → sleep(refusal_delay) → refusal          [Refused]
//!             └─ in-domain     → sleep(response_delay) → synthesize
//!                   ├─ Ok  → structured assistant entry                  [Answered]
//!                   └─ Err → fallback entry + notice                     [Failed]
//!             (cancel at any point before the append              →      [Cancelled])
//!        append assistant entry, phase = Idle
//! ```
//!
//! Synthesis runs in its own task so a panicking backend is reported as a
//! failure instead of leaving the session stuck in `Pending`.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::bot::{replies, DomainClassifier, ResponseBody, Synthesizer};
use crate::config::{AppConfig, AssistantConfig, LatencyConfig};

use super::state::{lock_state, new_shared_state, SessionPhase, SharedState};
use super::transcript::TranscriptEntry;

// ---------------------------------------------------------------------------
// SubmitError
// ---------------------------------------------------------------------------

/// Reasons a submission is not accepted.  None of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A previous submission is still waiting for its reply.
    #[error("a response is still pending; please wait")]
    Busy,
}

// ---------------------------------------------------------------------------
// Outcome / SessionEvent
// ---------------------------------------------------------------------------

/// How a submission cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A synthesized reply was appended.
    Answered,
    /// The utterance was out of domain; the refusal was appended.
    Refused,
    /// Synthesis failed; the fallback reply was appended and a notice raised.
    Failed,
    /// The submission was cancelled before its reply was appended.
    Cancelled,
}

/// Progress notifications for the front-end.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// An entry was appended to the transcript.
    EntryAppended(TranscriptEntry),
    /// The session moved to a new phase.
    PhaseChanged(SessionPhase),
    /// A transient user-visible notice (error channel).
    Notice(String),
}

// ---------------------------------------------------------------------------
// SubmissionHandle
// ---------------------------------------------------------------------------

/// Completion signal for one accepted submission.
///
/// Dropping the handle does not cancel the submission.
pub struct SubmissionHandle {
    task: JoinHandle<Outcome>,
    cancel: Option<oneshot::Sender<()>>,
}

impl SubmissionHandle {
    /// Request that the in-flight submission stop before appending its reply.
    ///
    /// Returns `true` when the request was delivered.  A request that races
    /// with a reply already being appended is ignored, so [`wait`](Self::wait)
    /// is the authority on how the cycle ended.  Returns `false` when
    /// cancellation was already requested or the reply has been composed.
    pub fn cancel(&mut self) -> bool {
        match self.cancel.take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    /// Wait for the assistant entry to be appended.
    pub async fn wait(self) -> Outcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("session: submission task failed: {e}");
                Outcome::Failed
            }
        }
    }

    /// `true` once the cycle has completed.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

// ---------------------------------------------------------------------------
// ConversationSession
// ---------------------------------------------------------------------------

/// Serializes submissions and appends one assistant entry per user entry.
///
/// Cheap to clone; clones share the same state.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use medical_bot::bot::RuleSynthesizer;
/// use medical_bot::config::AppConfig;
/// use medical_bot::session::ConversationSession;
///
/// # async fn example() {
/// let session = ConversationSession::new(AppConfig::default(), Arc::new(RuleSynthesizer::new()));
/// let handle = session.submit("I have a headache").unwrap();
/// handle.wait().await;
/// assert_eq!(session.transcript().len(), 3);
/// # }
/// ```
#[derive(Clone)]
pub struct ConversationSession {
    state: SharedState,
    classifier: DomainClassifier,
    synthesizer: Arc<dyn Synthesizer>,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl ConversationSession {
    /// Create a session with a freshly seeded transcript.
    pub fn new(config: AppConfig, synthesizer: Arc<dyn Synthesizer>) -> Self {
        Self::with_state(new_shared_state(config), synthesizer)
    }

    /// Create a session over an existing shared state.
    pub fn with_state(state: SharedState, synthesizer: Arc<dyn Synthesizer>) -> Self {
        Self {
            state,
            classifier: DomainClassifier::new(),
            synthesizer,
            events: None,
        }
    }

    /// Publish [`SessionEvent`]s on `tx`.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    // -----------------------------------------------------------------------
    // Read model
    // -----------------------------------------------------------------------

    /// Handle to the shared state.
    pub fn state(&self) -> SharedState {
        Arc::clone(&self.state)
    }

    /// Snapshot of the transcript.
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        lock_state(&self.state).transcript().to_vec()
    }

    pub fn is_pending(&self) -> bool {
        lock_state(&self.state).pending()
    }

    /// Take the last notice, if any.
    pub fn take_notice(&self) -> Option<String> {
        lock_state(&self.state).notice.take()
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Current configuration.
    pub fn config(&self) -> AppConfig {
        lock_state(&self.state).config.clone()
    }

    /// Modify the live configuration.  Takes effect from the next submission.
    pub fn update_config(&self, update: impl FnOnce(&mut AppConfig)) {
        let mut st = lock_state(&self.state);
        update(&mut st.config);
        log::debug!(
            "session: config updated (specialty={}, accuracy={:.2})",
            st.config.assistant.specialty,
            st.config.assistant.accuracy_level
        );
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    /// Submit an utterance.
    ///
    /// The user entry is appended before this returns.  The assistant entry
    /// follows asynchronously; observe it through the transcript, the event
    /// channel, or the returned [`SubmissionHandle`].
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, text: impl Into<String>) -> Result<SubmissionHandle, SubmitError> {
        let text = text.into();
        let user_entry = TranscriptEntry::user(text.clone());

        let config = {
            let mut st = lock_state(&self.state);
            if st.pending() {
                log::warn!("session: submission rejected, reply still pending");
                return Err(SubmitError::Busy);
            }
            st.append(user_entry.clone());
            st.set_phase(SessionPhase::Pending);
            st.notice = None;
            st.config.clone()
        };

        log::debug!("session: accepted submission (len={})", text.len());
        self.emit(SessionEvent::EntryAppended(user_entry));
        self.emit(SessionEvent::PhaseChanged(SessionPhase::Pending));

        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let session = self.clone();

        let task = tokio::spawn(async move {
            let reply = tokio::select! {
                biased;
                Ok(()) = &mut cancel_rx => {
                    log::debug!("session: submission cancelled");
                    Reply::cancelled()
                }
                reply = session.compose(text, config.assistant.sanitized(), config.latency) => reply,
            };
            drop(cancel_rx);
            session.finish(reply)
        });

        Ok(SubmissionHandle {
            task,
            cancel: Some(cancel_tx),
        })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn compose(
        &self,
        text: String,
        assistant: AssistantConfig,
        latency: LatencyConfig,
    ) -> Reply {
        let classification = self.classifier.classify(&text);
        log::debug!(
            "session: classified in_domain={} keyword={} question={} words={}",
            classification.in_domain,
            classification.has_keyword,
            classification.is_question,
            classification.word_count
        );

        if !classification.in_domain {
            tokio::time::sleep(latency.refusal_delay()).await;
            return Reply::refused();
        }

        tokio::time::sleep(latency.response_delay()).await;

        let synthesizer = Arc::clone(&self.synthesizer);
        let mut synthesis = AbortOnDrop(tokio::spawn(async move {
            synthesizer.synthesize(&text, &assistant).await
        }));
        let result = (&mut synthesis.0).await;

        match result {
            Ok(Ok(body)) => Reply::answered(body),
            Ok(Err(e)) => {
                log::warn!("session: synthesis failed: {e}");
                Reply::failed()
            }
            Err(e) => {
                log::warn!("session: synthesis task panicked: {e}");
                Reply::failed()
            }
        }
    }

    fn finish(&self, reply: Reply) -> Outcome {
        {
            let mut st = lock_state(&self.state);
            st.append(reply.entry.clone());
            if let Some(notice) = &reply.notice {
                st.notice = Some(notice.clone());
            }
            st.set_phase(SessionPhase::Idle);
        }

        log::debug!("session: {:?} → Idle", reply.outcome);
        self.emit(SessionEvent::EntryAppended(reply.entry));
        if let Some(notice) = reply.notice {
            self.emit(SessionEvent::Notice(notice));
        }
        self.emit(SessionEvent::PhaseChanged(SessionPhase::Idle));
        reply.outcome
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(tx) = &self.events {
            // A closed receiver only means nobody is listening.
            let _ = tx.send(event);
        }
    }
}

// ---------------------------------------------------------------------------
// AbortOnDrop
// ---------------------------------------------------------------------------

/// Aborts the wrapped task when dropped, so a cancelled `compose` takes its
/// synthesis task down with it.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

// ---------------------------------------------------------------------------
// Reply
// ---------------------------------------------------------------------------

/// The assistant side of one cycle, ready to append.
struct Reply {
    entry: TranscriptEntry,
    outcome: Outcome,
    notice: Option<String>,
}

impl Reply {
    fn answered(body: ResponseBody) -> Self {
        Self {
            entry: TranscriptEntry::assistant(body),
            outcome: Outcome::Answered,
            notice: None,
        }
    }

    fn refused() -> Self {
        Self {
            entry: TranscriptEntry::assistant_text(replies::REFUSAL),
            outcome: Outcome::Refused,
            notice: None,
        }
    }

    fn failed() -> Self {
        Self {
            entry: TranscriptEntry::assistant_text(replies::FAILURE_REPLY),
            outcome: Outcome::Failed,
            notice: Some(replies::FAILURE_NOTICE.to_string()),
        }
    }

    fn cancelled() -> Self {
        Self {
            entry: TranscriptEntry::assistant_text(replies::CANCELLED_REPLY),
            outcome: Outcome::Cancelled,
            notice: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
