//! Structured reply body produced by a [`Synthesizer`](crate::bot::Synthesizer).

use serde::{Deserialize, Serialize};

/// The payload of an assistant reply, without identity or timing.
///
/// Every list keeps insertion order, which is also display order.  Items are
/// never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    /// Narrative text; always present.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub causes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cautions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl ResponseBody {
    /// A reply that carries narrative text only.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// `true` when any structured field is present.
    pub fn is_structured(&self) -> bool {
        self.causes.is_some()
            || self.treatments.is_some()
            || self.cautions.is_some()
            || self.recommendations.is_some()
            || self.summary.is_some()
    }
}

/// Copy a static list into owned strings.
pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_body_is_not_structured() {
        let body = ResponseBody::text("hello");
        assert_eq!(body.content, "hello");
        assert!(!body.is_structured());
    }

    #[test]
    fn summary_alone_makes_body_structured() {
        let body = ResponseBody {
            summary: Some("short".into()),
            ..ResponseBody::text("hello")
        };
        assert!(body.is_structured());
    }

    #[test]
    fn absent_fields_are_skipped_in_json() {
        let json = serde_json::to_value(ResponseBody::text("hi")).expect("serialize");
        assert_eq!(json, serde_json::json!({ "content": "hi" }));
    }
}
