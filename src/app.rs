//! MedicalBot terminal front-end.
//!
//! # Architecture
//!
//! [`ChatApp`] is the line-oriented stand-in for the chat page.  It owns a
//! [`ConversationSession`] and turns each input line into either a settings
//! change or a submission:
//!
//! | Input | Effect |
//! |-------|--------|
//! | plain text | submitted as a message |
//! | `/upload <file>` | submits "I've uploaded a file: <name>" |
//! | `/specialty <name>` | sets the specialty focus |
//! | `/accuracy <0..1>` | sets the accuracy level |
//! | `/provider`, `/model`, `/temperature` | selection metadata |
//! | `/save` | writes `settings.toml` |
//! | `/transcript` | prints the transcript as JSON |
//! | `/help`, `/quit` | |
//!
//! Rendering mirrors the web chat bubble: narrative text first, then the
//! "Possible Causes", "Treatments", "Cautions / Preventive Measures",
//! "Recommendations" and "Summary" sections when present.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::bot::replies;
use crate::config::{AppPaths, Specialty};
use crate::session::{ConversationSession, Role, SubmitError, TranscriptEntry};

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Specialty(String),
    Accuracy(f32),
    Provider(String),
    Model(String),
    Temperature(f32),
    Upload(String),
    Save,
    Transcript,
    /// Free text to submit.
    Message(String),
    /// A slash command that could not be parsed; carries the reason.
    Invalid(String),
}

impl Command {
    /// Parse `line`.  Returns `None` for blank input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Some(Command::Message(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match (name.to_lowercase().as_str(), arg) {
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            ("save", _) => Command::Save,
            ("transcript", _) => Command::Transcript,
            ("specialty" | "provider" | "model" | "upload" | "accuracy" | "temperature", "") => {
                Command::Invalid(format!("/{name} needs a value"))
            }
            ("specialty", arg) => Command::Specialty(arg.to_string()),
            ("provider", arg) => Command::Provider(arg.to_string()),
            ("model", arg) => Command::Model(arg.to_string()),
            ("upload", arg) => Command::Upload(arg.to_string()),
            ("accuracy", arg) => match parse_unit(arg) {
                Some(v) => Command::Accuracy(v),
                None => Command::Invalid(format!("accuracy must be between 0 and 1, got {arg:?}")),
            },
            ("temperature", arg) => match parse_unit(arg) {
                Some(v) => Command::Temperature(v),
                None => {
                    Command::Invalid(format!("temperature must be between 0 and 1, got {arg:?}"))
                }
            },
            _ => Command::Invalid(format!("unknown command /{name}; try /help")),
        };
        Some(command)
    }
}

/// Parse a number in `[0, 1]`.
fn parse_unit(arg: &str) -> Option<f32> {
    arg.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && (0.0..=1.0).contains(v))
}

/// The utterance submitted for an uploaded file.
pub fn upload_message(path: &str) -> String {
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    format!("I've uploaded a file: {name}")
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub const HELP: &str = "\
Commands:
  /specialty <name>     general, cardiology, neurology, pediatrics, dermatology, emergency, orthopedics, psychiatry
  /accuracy <0..1>      higher gives more clinical detail
  /provider <name>      provider selection
  /model <name>         model selection
  /temperature <0..1>   sampling temperature
  /upload <file>        describe an uploaded file to the bot
  /save                 save settings
  /transcript           print the conversation as JSON
  /quit                 leave";

pub const THINKING: &str = "MedicalBot is thinking...";

/// Render one entry as terminal text.
pub fn render_entry(entry: &TranscriptEntry) -> String {
    let speaker = match entry.role() {
        Role::User => "You",
        Role::Assistant => "MedicalBot",
    };
    let mut out = format!("{speaker}: {}\n", entry.content());

    let sections = [
        ("Possible Causes:", entry.causes()),
        ("Treatments:", entry.treatments()),
        ("Cautions / Preventive Measures:", entry.cautions()),
        ("Recommendations:", entry.recommendations()),
    ];
    for (heading, items) in sections {
        match items {
            Some(items) if !items.is_empty() => {
                out.push_str(&format!("\n  {heading}\n"));
                for item in items {
                    out.push_str(&format!("    - {item}\n"));
                }
            }
            _ => {}
        }
    }
    if let Some(summary) = entry.summary() {
        out.push_str(&format!("\n  Summary:\n    {summary}\n"));
    }
    out
}

// ---------------------------------------------------------------------------
// ChatApp
// ---------------------------------------------------------------------------

/// Whether the input loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal chat front-end over a [`ConversationSession`].
pub struct ChatApp {
    session: ConversationSession,
    settings_file: PathBuf,
}

impl ChatApp {
    /// Front-end saving settings to the platform `settings.toml`.
    pub fn new(session: ConversationSession) -> Self {
        Self::with_settings_file(session, AppPaths::new().settings_file)
    }

    /// Front-end saving settings to `settings_file` (useful for tests).
    pub fn with_settings_file(session: ConversationSession, settings_file: PathBuf) -> Self {
        Self {
            session,
            settings_file,
        }
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Startup text: disclaimer (if enabled) and the transcript so far.
    pub fn banner(&self, out: &mut impl Write) -> Result<()> {
        if self.session.config().ui.show_disclaimer {
            writeln!(out, "{}\n", replies::DISCLAIMER)?;
        }
        for entry in self.session.transcript() {
            writeln!(out, "{}", render_entry(&entry))?;
        }
        writeln!(out, "Type /help for commands.")?;
        Ok(())
    }

    /// Handle one input line, writing any output to `out`.
    pub async fn handle_line(&self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let Some(command) = Command::parse(line) else {
            return Ok(Flow::Continue);
        };

        match command {
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Invalid(reason) => writeln!(out, "{reason}")?,
            Command::Specialty(name) => {
                let specialty = Specialty::from_name(&name);
                if specialty == Specialty::General && !name.eq_ignore_ascii_case("general") {
                    writeln!(out, "Unknown specialty {name:?}; using general.")?;
                }
                self.session
                    .update_config(|c| c.assistant.specialty = specialty);
                writeln!(out, "Specialty set to {specialty}.")?;
            }
            Command::Accuracy(level) => {
                self.session
                    .update_config(|c| c.assistant.accuracy_level = level);
                writeln!(out, "Accuracy level set to {level:.2}.")?;
            }
            Command::Provider(provider) => {
                writeln!(out, "Provider set to {provider}.")?;
                self.session.update_config(|c| c.assistant.provider = provider);
            }
            Command::Model(model) => {
                writeln!(out, "Model set to {model}.")?;
                self.session.update_config(|c| c.assistant.model = model);
            }
            Command::Temperature(t) => {
                self.session.update_config(|c| c.assistant.temperature = t);
                writeln!(out, "Temperature set to {t:.1}.")?;
            }
            Command::Save => {
                self.session.config().save_to(&self.settings_file)?;
                log::info!("settings saved to {}", self.settings_file.display());
                writeln!(out, "Settings saved successfully!")?;
            }
            Command::Transcript => {
                let json = serde_json::to_string_pretty(&self.session.transcript())?;
                writeln!(out, "{json}")?;
            }
            Command::Upload(path) => self.send(&upload_message(&path), out).await?,
            Command::Message(text) => self.send(&text, out).await?,
        }
        Ok(Flow::Continue)
    }

    async fn send(&self, text: &str, out: &mut impl Write) -> Result<()> {
        let handle = match self.session.submit(text) {
            Ok(handle) => handle,
            Err(SubmitError::Busy) => {
                writeln!(out, "{}", replies::BUSY_NOTICE)?;
                return Ok(());
            }
        };

        if self.session.config().ui.show_thinking {
            writeln!(out, "{THINKING}")?;
            out.flush()?;
        }

        handle.wait().await;

        if let Some(entry) = self.session.transcript().last() {
            writeln!(out, "{}", render_entry(entry))?;
        }
        if let Some(notice) = self.session.take_notice() {
            writeln!(out, "[!] {notice}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
