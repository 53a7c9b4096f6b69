//! End-to-end conversation scenarios through the public API.

use std::sync::Arc;

use medical_bot::bot::{replies, DomainClassifier, FixedPhrasing, RuleSynthesizer};
use medical_bot::config::{AppConfig, LatencyConfig, Specialty};
use medical_bot::session::{ConversationSession, Outcome, Role, SubmitError};

fn session() -> ConversationSession {
    let mut config = AppConfig::default();
    config.latency = LatencyConfig::immediate();
    ConversationSession::new(
        config,
        Arc::new(RuleSynthesizer::with_phrasing(FixedPhrasing(0))),
    )
}

#[tokio::test]
async fn headache_conversation_at_default_accuracy() {
    let session = session();
    let outcome = session.submit("I have a headache").unwrap().wait().await;
    assert_eq!(outcome, Outcome::Answered);

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[0].content(), replies::GREETING);

    let reply = &transcript[2];
    assert_eq!(reply.role(), Role::Assistant);
    assert_eq!(reply.causes().map(|c| c.len()), Some(7));
    assert_eq!(reply.treatments().map(|t| t.len()), Some(5));
    assert_eq!(reply.cautions().map(|c| c.len()), Some(4));
    assert!(reply.summary().is_some());
    assert!(reply.recommendations().is_none());
}

#[tokio::test]
async fn lower_accuracy_gives_basic_causes() {
    let session = session();
    session.update_config(|c| c.assistant.accuracy_level = 0.5);
    session.submit("I have a headache").unwrap().wait().await;

    let transcript = session.transcript();
    assert_eq!(
        transcript[2].causes().map(|c| c.to_vec()),
        Some(vec![
            "Tension or stress".to_string(),
            "Dehydration".into(),
            "Lack of sleep".into(),
            "Eye strain".into(),
            "Sinus congestion".into(),
        ])
    );
}

#[tokio::test]
async fn emergency_flu_at_high_accuracy_has_eight_treatments() {
    let session = session();
    session.update_config(|c| {
        c.assistant.specialty = Specialty::Emergency;
        c.assistant.accuracy_level = 0.85;
    });
    session.submit("Tell me about the flu").unwrap().wait().await;

    let transcript = session.transcript();
    assert_eq!(transcript[2].treatments().map(|t| t.len()), Some(8));
}

#[tokio::test]
async fn short_follow_up_question_is_answered() {
    let session = session();
    session.submit("I have a headache").unwrap().wait().await;
    let outcome = session.submit("Is this normal?").unwrap().wait().await;

    assert_eq!(outcome, Outcome::Answered);
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 5);
    assert!(transcript[4].content().contains("your health concern"));
}

#[tokio::test]
async fn bare_question_mark_gets_general_reply() {
    let session = session();
    let outcome = session.submit("?").unwrap().wait().await;

    assert_eq!(outcome, Outcome::Answered);
    assert!(session.take_notice().is_none());
    let transcript = session.transcript();
    let reply = &transcript[2];
    assert!(reply.content().contains("your health concern"));
    assert_ne!(reply.content(), replies::FAILURE_REPLY);
}

#[tokio::test]
async fn short_weather_question_passes_the_question_rule() {
    // Any question under fifteen words is in domain, even off-topic ones.
    let session = session();
    let outcome = session.submit("What's the weather today?").unwrap().wait().await;

    assert_eq!(outcome, Outcome::Answered);
    assert!(session.transcript()[2].recommendations().is_some());
}

#[tokio::test]
async fn off_topic_statements_are_refused_verbatim() {
    let session = session();
    let long_question = "What do you think about the stock market and whether investors \
                         should buy more shares this coming year?";

    for text in ["Tell me the weather today", long_question] {
        let outcome = session.submit(text).unwrap().wait().await;
        assert_eq!(outcome, Outcome::Refused, "{text:?}");
        let transcript = session.transcript();
        let reply = transcript.last().unwrap();
        assert_eq!(
            reply.content(),
            "I am a Medical Bot. I cannot process this request as it is outside my healthcare knowledge base. Please ask me a medical-related question."
        );
        assert!(reply.causes().is_none());
        assert!(reply.summary().is_none());
    }
}

#[tokio::test]
async fn serialized_submissions_keep_user_assistant_pairs() {
    let session = session();
    let first = session.submit("my cut looks infected").unwrap();
    assert_eq!(session.submit("and it hurts").err(), Some(SubmitError::Busy));
    first.wait().await;
    session.submit("and it hurts").unwrap().wait().await;

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 5);
    let roles: Vec<Role> = transcript.iter().map(|e| e.role()).collect();
    assert_eq!(
        roles,
        [Role::Assistant, Role::User, Role::Assistant, Role::User, Role::Assistant]
    );
    assert_eq!(transcript[1].content(), "my cut looks infected");
    assert_eq!(transcript[3].content(), "and it hurts");
}

#[tokio::test]
async fn video_query_gets_media_reply() {
    let session = session();
    session
        .submit("Here is a video of my symptoms")
        .unwrap()
        .wait()
        .await;

    let transcript = session.transcript();
    let reply = &transcript[2];
    assert_eq!(
        reply.content(),
        "I've analyzed the video you've provided. Here's what I can tell:"
    );
    assert_eq!(reply.recommendations().map(|r| r.len()), Some(3));
}

#[test]
fn classification_is_idempotent() {
    let classifier = DomainClassifier::new();
    for text in ["I have a headache", "Is this normal?", "Tell me a joke about pirates", ""] {
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }
}

#[tokio::test]
async fn transcript_exports_as_json() {
    let session = session();
    session.submit("I have a fever").unwrap().wait().await;

    let json = serde_json::to_value(session.transcript()).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1]["role"], "user");
    assert_eq!(entries[2]["role"], "assistant");
    assert!(entries[2]["recommendations"].is_array());
}
