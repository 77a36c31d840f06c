//! File-backed note storage for the interactive shell. Plain UTF-8
//! text or Markdown, normalized to a single trailing newline on save.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub fn load_note(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read note {}", path.display()))
}

pub fn save_note(path: &Path, text: &str) -> Result<()> {
    let normalized = format!("{}\n", text.trim_end());
    fs::write(path, normalized)
        .with_context(|| format!("Failed to write note {}", path.display()))
}
