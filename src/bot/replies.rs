//! Fixed assistant texts.

/// Seeded first entry of every transcript.
pub const GREETING: &str =
    "Hello, I'm MedicalBot! I can answer your health-related questions. How can I help you today?";

/// Reply to out-of-domain utterances.
pub const REFUSAL: &str = "I am a Medical Bot. I cannot process this request as it is outside my healthcare knowledge base. Please ask me a medical-related question.";

/// Reply appended when synthesis fails.
pub const FAILURE_REPLY: &str =
    "I'm sorry, I encountered an error processing your request. Please try again.";

/// Transient notice published alongside [`FAILURE_REPLY`].
pub const FAILURE_NOTICE: &str = "Failed to process your message";

/// Reply appended when an in-flight submission is cancelled.
pub const CANCELLED_REPLY: &str = "Request cancelled.";

/// Shown when a message is submitted while a reply is still pending.
pub const BUSY_NOTICE: &str = "Please wait for the current response before sending another message.";

/// Banner shown above the conversation.
pub const DISCLAIMER: &str = "Medical Disclaimer: Information provided by this bot is for educational purposes only and not a substitute for professional medical advice. For emergencies, contact a healthcare professional immediately.";
