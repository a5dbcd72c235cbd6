//! Parsing of location replies from a language model.
//!
//! Models are asked to answer with
//! `{"start": "Boston Logan Airport", "destination": "Northeastern University"}`
//! but tend to wrap it in prose, or ignore the format and write
//! `start: A; destination: B`. Both shapes are accepted.

use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct LocationReply {
    start: Option<String>,
    destination: Option<String>,
}

/// Extracts `(start, destination)` from a free-form reply.
///
/// The first `{...}` block is tried as JSON. If it is missing, malformed or
/// lacks either field, the reply is split on `;` and scanned for `start:`
/// and `destination:` parts.
pub fn parse_location_reply(text: &str) -> Option<(String, String)> {
    if let Some(pair) = first_json_block(text).and_then(parse_json) {
        return Some(pair);
    }
    debug!("no usable JSON object in reply, trying key/value fallback");
    parse_key_values(text)
}

/// Shortest `{...}` span starting at the first `{`.
fn first_json_block(text: &str) -> Option<&str> {
    let open = text.find('{')?;
    let close = open + text[open..].find('}')?;
    Some(&text[open..=close])
}

fn parse_json(block: &str) -> Option<(String, String)> {
    let reply: LocationReply = match serde_json::from_str(block) {
        Ok(reply) => reply,
        Err(err) => {
            debug!(error = %err, "reply JSON did not parse");
            return None;
        }
    };
    let start = reply.start.filter(|s| !s.is_empty())?;
    let destination = reply.destination.filter(|d| !d.is_empty())?;
    Some((start, destination))
}

fn parse_key_values(text: &str) -> Option<(String, String)> {
    let mut start = None;
    let mut destination = None;
    for part in text.split(';') {
        let lower = part.to_lowercase();
        let slot = if lower.contains("start:") {
            &mut start
        } else if lower.contains("destination:") {
            &mut destination
        } else {
            continue;
        };
        if let Some(value) = part.split(':').nth(1) {
            *slot = Some(value.trim().to_string());
        }
    }
    match (start, destination) {
        (Some(s), Some(d)) if !s.is_empty() && !d.is_empty() => Some((s, d)),
        _ => None,
    }
}
