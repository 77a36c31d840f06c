//! Interactive shell pairing a file-backed note with a chat agent.
//!
//! The session owns the single `Transcript` value and sends at most
//! one request at a time, so a failed turn never corrupts history.

use std::path::PathBuf;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::{RequestConfig, Transcript, format_note_insertion, send_user_message};
use crate::core::AppConfig;
use crate::notes::{load_note, save_note};
use crate::openai::CompletionError;

const HELP: &str = "\
Commands:
  :open <path>     Load a note file
  :save [path]     Save the note (trailing newline normalized)
  :show            Print the current note
  :insert          Append the latest agent reply to the note
  :notes on|off    Toggle sending the note as context
  :model <name>    Set the completion model
  :system <text>   Set the agent instructions
  :reset           Clear the chat history
  :quit            Exit
Anything else is sent to the agent.";

struct Session {
    config: RequestConfig,
    transcript: Transcript,
    note_text: String,
    note_file: Option<PathBuf>,
}

impl Session {
    fn note_status(&self) -> String {
        match &self.note_file {
            Some(path) => format!("Note: {}", path.display()),
            None => "Unsaved note".to_string(),
        }
    }

    fn handle_command(&mut self, line: &str) -> Result<()> {
        let (command, arg) = match line.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            ":open" => {
                if arg.is_empty() {
                    println!("Usage: :open <path>");
                    return Ok(());
                }
                let path = PathBuf::from(arg);
                self.note_text = load_note(&path)?;
                self.note_file = Some(path);
                println!("{}", self.note_status());
            }
            ":save" => {
                if !arg.is_empty() {
                    self.note_file = Some(PathBuf::from(arg));
                }
                match &self.note_file {
                    Some(path) => {
                        save_note(path, &self.note_text)?;
                        println!("Saved: {}", path.display());
                    }
                    None => println!("Usage: :save <path>"),
                }
            }
            ":show" => println!("{}", self.note_text),
            ":insert" => match self.transcript.latest_assistant_reply() {
                Some(reply) => {
                    self.note_text.push_str(&format_note_insertion(reply));
                    println!("Agent reply inserted into the note");
                }
                None => println!("No assistant reply yet. Ask the agent first."),
            },
            ":notes" => match arg {
                "on" => {
                    self.config.include_notes = true;
                    println!("Note context on");
                }
                "off" => {
                    self.config.include_notes = false;
                    println!("Note context off");
                }
                _ => println!("Usage: :notes on|off"),
            },
            ":model" => {
                if arg.is_empty() {
                    println!("Model: {}", self.config.model);
                } else {
                    self.config.model = arg.to_string();
                }
            }
            ":system" => {
                if arg.is_empty() {
                    println!("Instructions: {}", self.config.system_prompt);
                } else {
                    self.config.system_prompt = arg.to_string();
                }
            }
            ":reset" => {
                self.transcript.clear();
                println!("Chat history cleared");
            }
            ":help" => println!("{}", HELP),
            other => println!("Unknown command: {}. Try :help", other),
        }

        Ok(())
    }
}

pub async fn run(note: Option<PathBuf>) -> Result<()> {
    let mut rl = DefaultEditor::new().expect("Editor failed");

    let app_config = AppConfig::default();
    let api_key = app_config.openai_api_key.clone();
    if api_key.is_none() {
        println!("Set OPENAI_API_KEY to enable the chat agent.");
    }

    let mut session = Session {
        config: RequestConfig {
            model: app_config.openai_model.clone(),
            system_prompt: app_config.system_prompt.clone(),
            include_notes: true,
        },
        transcript: Transcript::new(),
        note_text: String::new(),
        note_file: None,
    };

    if let Some(path) = note {
        session.note_text = load_note(&path)?;
        session.note_file = Some(path);
    }
    println!("{}. Type :help for commands.", session.note_status());

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                // Empty input is a silent no-op
                if line.is_empty() {
                    continue;
                }
                if line == ":quit" || line == ":q" {
                    break;
                }
                if line.starts_with(':') {
                    if let Err(err) = session.handle_command(&line) {
                        println!("Error: {}", err);
                    }
                    continue;
                }

                let Some(api_key) = &api_key else {
                    println!("{}", CompletionError::MissingCredential);
                    continue;
                };

                match send_user_message(
                    &line,
                    &session.config,
                    &session.note_text,
                    &mut session.transcript,
                    &app_config.openai_api_hostname,
                    api_key,
                )
                .await
                {
                    // Failed turns keep the user entry so a retry has
                    // the full prompt history
                    Ok(reply) => println!("{}", reply),
                    Err(err) => println!("Request failed: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
