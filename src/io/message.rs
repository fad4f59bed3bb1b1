//! Message text input for the encoder.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Read a message to hide from a text file.
pub fn read_message_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path)
        .with_context(|| format!("failed to read message file {}", path.display()))
}

/// Trim surrounding whitespace and reject messages that end up empty.
pub fn normalize_message(text: &str) -> Result<String> {
    let message = text.trim();
    if message.is_empty() {
        bail!("Please enter a message to hide");
    }
    Ok(message.to_string())
}
