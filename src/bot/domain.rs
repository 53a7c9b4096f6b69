//! Keyword- and shape-based medical domain classification.
//!
//! [`DomainClassifier`] decides whether an utterance is something the bot
//! should answer.  It accepts anything that mentions a medical vocabulary
//! term, any short question (so follow-ups like "Is this normal?" are not
//! refused), and any media-derived query.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::bot::vocabulary;

// ---------------------------------------------------------------------------
// Static patterns
// ---------------------------------------------------------------------------

/// Question openers, matched as a prefix without a word boundary.
static QUESTION_OPENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(what|how|why|can|where|when|is|are|do|does|should|could|would|will|has|have)")
        .expect("question opener pattern is valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Substring marking a query derived from an uploaded video.
pub const MEDIA_MARKER: &str = "video";

/// Questions with this many words or more must carry a vocabulary term.
const SHORT_QUESTION_WORDS: usize = 15;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Result of classifying one utterance, with the signals that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Whether the bot should answer the utterance.
    pub in_domain: bool,
    /// A vocabulary term occurs somewhere in the text.
    pub has_keyword: bool,
    /// The text contains `?` or starts with a question opener.
    pub is_question: bool,
    /// Number of whitespace-delimited tokens.
    pub word_count: usize,
}

// ---------------------------------------------------------------------------
// DomainClassifier
// ---------------------------------------------------------------------------

/// Decides whether an utterance is within the medical domain.
///
/// The classifier is stateless; classifying the same text twice always gives
/// the same answer.
///
/// # Example
/// ```rust
/// use medical_bot::bot::DomainClassifier;
///
/// let classifier = DomainClassifier::new();
/// assert!(classifier.classify("I have a headache").in_domain);
/// assert!(classifier.classify("Is this normal?").in_domain);
/// assert!(!classifier.classify("Tell me a joke about pirates").in_domain);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainClassifier;

impl DomainClassifier {
    /// Create a classifier over the built-in medical vocabulary.
    pub fn new() -> Self {
        Self
    }

    /// Classify `text`.
    pub fn classify(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();

        let has_keyword = vocabulary::contains_term(&lowered);
        let is_question = lowered.contains('?') || QUESTION_OPENER.is_match(&lowered);
        // Splitting "" yields one empty token, as does any leading run of
        // whitespace.
        let word_count = WHITESPACE.split(&lowered).count();
        let is_short_question = is_question && word_count < SHORT_QUESTION_WORDS;

        Classification {
            in_domain: has_keyword || is_short_question || lowered.contains(MEDIA_MARKER),
            has_keyword,
            is_question,
            word_count,
        }
    }

    /// Shorthand for `classify(text).in_domain`.
    pub fn is_in_domain(&self, text: &str) -> bool {
        self.classify(text).in_domain
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_makes_text_in_domain() {
        let c = DomainClassifier::new();
        for text in [
            "I have a headache",
            "my knee joint is swollen",
            "Feeling DIZZY after lunch",
            "recommend a vitamin supplement",
        ] {
            assert!(c.is_in_domain(text), "{text:?} should be in-domain");
        }
    }

    #[test]
    fn keyword_inside_long_statement_is_in_domain() {
        let c = DomainClassifier::new();
        let text = "after running for a very long time yesterday evening near the river \
                    my left ankle started to hurt quite a lot";
        let result = c.classify(text);
        assert!(result.word_count >= SHORT_QUESTION_WORDS);
        assert!(result.in_domain);
    }

    #[test]
    fn short_question_without_keyword_is_in_domain() {
        let c = DomainClassifier::new();
        let result = c.classify("Is this normal?");
        assert!(!result.has_keyword);
        assert!(result.is_question);
        assert!(result.in_domain);
    }

    #[test]
    fn opener_without_question_mark_is_a_question() {
        let c = DomainClassifier::new();
        let result = c.classify("Should I be worried");
        assert!(result.is_question);
        assert!(result.in_domain);
    }

    #[test]
    fn opener_is_a_prefix_match() {
        // "issue" starts with "is".
        let c = DomainClassifier::new();
        assert!(c.classify("issue with my phone").is_question);
    }

    #[test]
    fn long_question_without_keyword_is_out_of_domain() {
        let c = DomainClassifier::new();
        let text = "what do you think about the new stadium they are building downtown \
                    next to the old train station?";
        let result = c.classify(text);
        assert!(result.is_question);
        assert!(result.word_count >= SHORT_QUESTION_WORDS);
        assert!(!result.in_domain);
    }

    #[test]
    fn plain_statement_without_keyword_is_out_of_domain() {
        let c = DomainClassifier::new();
        assert!(!c.is_in_domain("Tell me a joke about pirates"));
        assert!(!c.is_in_domain("Tell me the weather today"));
    }

    #[test]
    fn weather_question_counts_as_short_question() {
        let c = DomainClassifier::new();
        let result = c.classify("What's the weather today?");
        assert!(!result.has_keyword);
        assert!(result.is_question);
        assert!(result.in_domain);
    }

    #[test]
    fn media_marker_is_in_domain() {
        let c = DomainClassifier::new();
        let result = c.classify("Please summarise the VIDEO I sent you, thanks a lot");
        assert!(!result.has_keyword);
        assert!(result.in_domain);
    }

    #[test]
    fn empty_text_has_one_word_and_is_out_of_domain() {
        let c = DomainClassifier::new();
        let result = c.classify("");
        assert_eq!(result.word_count, 1);
        assert!(!result.is_question);
        assert!(!result.in_domain);
    }

    #[test]
    fn leading_whitespace_counts_as_empty_token() {
        let c = DomainClassifier::new();
        assert_eq!(c.classify("  two words").word_count, 3);
        assert_eq!(c.classify("two words").word_count, 2);
    }

    #[test]
    fn classification_is_idempotent() {
        let c = DomainClassifier::new();
        for text in ["", "Is this normal?", "hello there", "my back hurts"] {
            assert_eq!(c.classify(text), c.classify(text));
        }
    }
}
