//! Transcript entries.
//!
//! A [`TranscriptEntry`] is immutable once built: fields are private and only
//! readable through getters.  User entries never carry structured fields;
//! the only way to build one is [`TranscriptEntry::user`], which takes plain
//! text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bot::ResponseBody;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Who authored an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

// ---------------------------------------------------------------------------
// TranscriptEntry
// ---------------------------------------------------------------------------

/// One message in the conversation.
///
/// ```
/// use medical_bot::session::{Role, TranscriptEntry};
///
/// let entry = TranscriptEntry::user("I have a headache");
/// assert_eq!(entry.role(), Role::User);
/// assert!(entry.causes().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    id: Uuid,
    role: Role,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    body: ResponseBody,
}

impl TranscriptEntry {
    fn new(role: Role, body: ResponseBody) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            timestamp: Utc::now(),
            body,
        }
    }

    /// A user utterance.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, ResponseBody::text(text))
    }

    /// A structured assistant reply.
    pub fn assistant(body: ResponseBody) -> Self {
        Self::new(Role::Assistant, body)
    }

    /// A plain-text assistant reply.
    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, ResponseBody::text(text))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn content(&self) -> &str {
        &self.body.content
    }

    pub fn causes(&self) -> Option<&[String]> {
        self.body.causes.as_deref()
    }

    pub fn treatments(&self) -> Option<&[String]> {
        self.body.treatments.as_deref()
    }

    pub fn cautions(&self) -> Option<&[String]> {
        self.body.cautions.as_deref()
    }

    pub fn recommendations(&self) -> Option<&[String]> {
        self.body.recommendations.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.body.summary.as_deref()
    }

    /// The full reply payload.
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
