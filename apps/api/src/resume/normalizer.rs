//! Response Normalizer — pulls the JSON payload out of a model reply.
//!
//! Accepted shapes, after trimming:
//! - bare JSON
//! - a single fenced block: ```` ```json ... ``` ```` or ```` ``` ... ``` ````
//!   (the tag may touch the payload, as in ```` ```json{ ````)
//! - bare JSON preceded by a lone `json` language tag
//!
//! Anything else (prose around the block, truncated JSON) is an error.

use serde_json::Value;
use thiserror::Error;

const FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum ResponseFormatError {
    #[error("Model reply was empty")]
    Empty,

    #[error("Model reply has an unterminated code fence")]
    UnterminatedFence,

    #[error("Model reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Returns the JSON text inside `reply`, with fences and language tag removed.
pub fn extract_json_payload(reply: &str) -> Result<&str, ResponseFormatError> {
    let text = reply.trim();
    if text.is_empty() {
        return Err(ResponseFormatError::Empty);
    }

    let payload = match text.strip_prefix(FENCE) {
        Some(rest) => {
            let body = rest
                .strip_suffix(FENCE)
                .ok_or(ResponseFormatError::UnterminatedFence)?;
            strip_language_tag(body, true)
        }
        None => strip_language_tag(text, false),
    };

    Ok(payload.trim())
}

/// Parses the payload of `reply` as JSON.
pub fn parse_reply(reply: &str) -> Result<Value, ResponseFormatError> {
    let payload = extract_json_payload(reply)?;
    Ok(serde_json::from_str(payload)?)
}

/// Drops a leading `json` tag when it stands on its own before the payload.
/// Inside a fence the tag may also sit directly against the opening `{` or `[`.
fn strip_language_tag(body: &str, fenced: bool) -> &str {
    let trimmed = body.trim_start();
    match trimmed.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => {
            let rest = &trimmed[4..];
            let glued = fenced && (rest.starts_with('{') || rest.starts_with('['));
            if rest.is_empty() || rest.starts_with(char::is_whitespace) || glued {
                rest
            } else {
                body
            }
        }
        _ => body,
    }
}
