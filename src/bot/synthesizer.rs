//! Core `Synthesizer` trait and the rule-based `RuleSynthesizer`.
//!
//! A synthesizer turns an in-domain utterance plus the current
//! [`AssistantConfig`] into a [`ResponseBody`].  The configuration is always
//! passed in; implementations never read settings on their own.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::bot::phrasing::{Phrasing, RandomPhrasing};
use crate::bot::response::ResponseBody;
use crate::bot::topics::{self, RuleContext};
use crate::config::AssistantConfig;

// ---------------------------------------------------------------------------
// SynthesisError
// ---------------------------------------------------------------------------

/// Errors that can occur while building a reply.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// A non-rule backend failed.
    #[error("response backend failed: {0}")]
    Backend(String),
}

// ---------------------------------------------------------------------------
// Synthesizer trait
// ---------------------------------------------------------------------------

/// Async trait for reply synthesis.
///
/// Implementors must be `Send + Sync` so they can be shared with the
/// session's background tasks as `Arc<dyn Synthesizer>`.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        config: &AssistantConfig,
    ) -> Result<ResponseBody, SynthesisError>;
}

// ---------------------------------------------------------------------------
// RuleSynthesizer
// ---------------------------------------------------------------------------

/// Answers from the static topic table in [`topics`].
///
/// Output is deterministic except for the video lead-in, which comes from the
/// injected [`Phrasing`].
///
/// # Example
/// ```rust
/// use medical_bot::bot::{FixedPhrasing, RuleSynthesizer, Synthesizer};
/// use medical_bot::config::AssistantConfig;
///
/// # #[tokio::main]
/// # async fn main() {
/// let synth = RuleSynthesizer::with_phrasing(FixedPhrasing(0));
/// let mut config = AssistantConfig::default();
/// config.accuracy_level = 0.5;
///
/// let body = synth.synthesize("I have a headache", &config).await.unwrap();
/// assert_eq!(body.causes.unwrap().len(), 5);
/// # }
/// ```
pub struct RuleSynthesizer {
    phrasing: Arc<dyn Phrasing>,
}

impl RuleSynthesizer {
    /// Synthesizer with random lead-in phrasing.
    pub fn new() -> Self {
        Self::with_phrasing(RandomPhrasing)
    }

    /// Synthesizer with an explicit phrasing strategy.
    pub fn with_phrasing(phrasing: impl Phrasing + 'static) -> Self {
        Self {
            phrasing: Arc::new(phrasing),
        }
    }

    /// Build a reply synchronously.
    pub fn respond(
        &self,
        text: &str,
        config: &AssistantConfig,
    ) -> ResponseBody {
        let lowered = text.to_lowercase();
        let rule = topics::route(&lowered);
        log::debug!(
            "synthesizer: topic={} specialty={} accuracy={:.2}",
            rule.name,
            config.specialty,
            config.accuracy_level
        );

        let ctx = RuleContext {
            lowered: &lowered,
            config,
            phrasing: self.phrasing.as_ref(),
        };
        (rule.respond)(&ctx)
    }
}

impl Default for RuleSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Synthesizer for RuleSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        config: &AssistantConfig,
    ) -> Result<ResponseBody, SynthesisError> {
        Ok(self.respond(text, config))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::phrasing::FixedPhrasing;
    use crate::bot::topics::VIDEO_LEAD_INS;
    use crate::config::Specialty;

    fn synth() -> RuleSynthesizer {
        RuleSynthesizer::with_phrasing(FixedPhrasing(1))
    }

    #[tokio::test]
    async fn headache_scenario() {
        let mut config = AssistantConfig::default();
        config.accuracy_level = 0.5;
        let basic = synth().synthesize("I have a headache", &config).await.unwrap();
        assert_eq!(
            basic.causes.unwrap(),
            vec![
                "Tension or stress",
                "Dehydration",
                "Lack of sleep",
                "Eye strain",
                "Sinus congestion"
            ]
        );

        config.accuracy_level = 0.9;
        let detailed = synth().synthesize("I have a headache", &config).await.unwrap();
        assert_eq!(detailed.causes.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn flu_emergency_scenario() {
        let config = AssistantConfig {
            specialty: Specialty::Emergency,
            accuracy_level: 0.85,
            ..AssistantConfig::default()
        };
        let body = synth()
            .synthesize("tell me about the flu", &config)
            .await
            .unwrap();
        assert_eq!(body.treatments.unwrap().len(), 8);
        assert_eq!(body.causes.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn video_lead_in_is_stubbed() {
        let body = synth()
            .synthesize("I uploaded a video of my cough", &AssistantConfig::default())
            .await
            .unwrap();
        assert_eq!(body.content, VIDEO_LEAD_INS[1]);
    }

    #[tokio::test]
    async fn random_phrasing_picks_a_known_lead_in() {
        let body = RuleSynthesizer::new()
            .synthesize("video", &AssistantConfig::default())
            .await
            .unwrap();
        assert!(VIDEO_LEAD_INS.contains(&body.content.as_str()));
    }

    #[tokio::test]
    async fn punctuation_only_input_gets_general_reply() {
        let body = synth()
            .synthesize("?", &AssistantConfig::default())
            .await
            .unwrap();
        assert!(body.content.contains(topics::PLACEHOLDER_TOPIC));
        assert!(body.recommendations.is_some());
    }

    #[test]
    fn synthesizer_is_object_safe() {
        let synth: Box<dyn Synthesizer> = Box::new(RuleSynthesizer::new());
        drop(synth);
    }

    #[test]
    fn error_message() {
        assert_eq!(
            SynthesisError::Backend("down".into()).to_string(),
            "response backend failed: down"
        );
    }
}
