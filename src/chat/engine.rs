//! Message assembly and transcript updates for a single chat turn.
//!
//! The shells (REPL and HTTP server) own the `Transcript` value and
//! drive these operations one request at a time. Nothing here retries
//! or runs concurrently.

use crate::core::config::{DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT};
use crate::openai::{CompletionError, completion};

use super::models::{Message, Role, Transcript};

/// Preamble for the system message that injects the user's working
/// notes as context.
pub const NOTES_CONTEXT_PREAMBLE: &str =
    "Current working meeting notes. Use as context but do not repeat verbatim unless asked:";

/// Per-request settings supplied by the shell. Not persisted between
/// calls.
#[derive(Clone, Debug)]
pub struct RequestConfig {
    pub model: String,
    pub system_prompt: String,
    pub include_notes: bool,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            include_notes: true,
        }
    }
}

/// Builds the ordered message list for a completion request: the
/// system prompt, then the notes context when enabled and non-empty,
/// then every transcript entry in original order. Pure function, no
/// side effects.
pub fn build_request_messages(
    config: &RequestConfig,
    note_text: &str,
    transcript: &Transcript,
) -> Vec<Message> {
    let system_prompt = if config.system_prompt.trim().is_empty() {
        DEFAULT_SYSTEM_PROMPT
    } else {
        config.system_prompt.as_str()
    };

    let mut messages = vec![Message::new(Role::System, system_prompt)];

    let notes = note_text.trim();
    if config.include_notes && !notes.is_empty() {
        messages.push(Message::new(
            Role::System,
            &format!("{}\n\n{}", NOTES_CONTEXT_PREAMBLE, notes),
        ));
    }

    messages.extend(transcript.iter().cloned());
    messages
}

/// Runs one chat turn: appends the user's message to the transcript,
/// sends the assembled request, and appends the trimmed assistant
/// reply on success.
///
/// On failure the appended `user` entry is kept so the prompt stays
/// visible and can be retried. Callers must not invoke this with
/// empty-after-trim text and must not issue a second call against the
/// same transcript while one is outstanding.
pub async fn send_user_message(
    user_text: &str,
    config: &RequestConfig,
    note_text: &str,
    transcript: &mut Transcript,
    api_hostname: &str,
    api_key: &str,
) -> Result<String, CompletionError> {
    transcript.push(Message::new(Role::User, user_text));

    let messages = build_request_messages(config, note_text, transcript);
    let reply = completion(&messages, api_hostname, api_key, &config.model).await?;

    transcript.push(Message::new(Role::Assistant, &reply));
    Ok(reply)
}

/// Formats an assistant reply as a block to append to the note:
/// separator, label, reply, trailing newline.
pub fn format_note_insertion(reply: &str) -> String {
    format!("\n\n---\nAgent suggestion:\n{}\n", reply)
}
