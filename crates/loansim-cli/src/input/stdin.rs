use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Read piped JSON from stdin and deserialise it, if data is being piped.
/// Returns None when stdin is a TTY (interactive) or empty.
pub fn read_piped<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed: T = serde_json::from_str(trimmed)?;
    Ok(Some(parsed))
}
