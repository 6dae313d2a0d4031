//! Turn the model's raw reply into a structured directive
//!
//! A reply is either prose for the user or a kill directive. Anything that
//! looks like a directive but fails to parse degrades to a plain message:
//! a partial kill list is never guessed from broken JSON.

use serde::Deserialize;
use tracing::{debug, warn};

/// Shown when the model returned no text at all
pub const NO_RESPONSE_TEXT: &str = "No response text found.";

/// Shown when a directive-looking reply is not valid JSON
pub const PARSE_ERROR_TEXT: &str = "Error parsing response.";

/// Interpretation of one model reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpretedResult {
    /// Text to show the user as-is
    PlainMessage(String),
    /// Names the model wants terminated; never empty
    KillDirective(Vec<String>),
}

#[derive(Deserialize)]
struct KillPayload {
    kill: Vec<Option<String>>,
}

/// Parse a raw model reply
pub fn parse_reply(reply: &str) -> InterpretedResult {
    let text = reply.trim();
    if text.is_empty() {
        return InterpretedResult::PlainMessage(NO_RESPONSE_TEXT.into());
    }

    let candidate = strip_code_fence(text);
    if !(candidate.starts_with('{') && candidate.contains("\"kill\"")) {
        return InterpretedResult::PlainMessage(text.into());
    }

    match serde_json::from_str::<KillPayload>(candidate) {
        Ok(payload) => {
            let names: Vec<String> = payload
                .kill
                .into_iter()
                .flatten()
                .filter(|name| !name.trim().is_empty())
                .collect();

            if names.is_empty() {
                debug!("Kill directive with no names, treating as message");
                InterpretedResult::PlainMessage(text.into())
            } else {
                debug!(count = names.len(), "Parsed kill directive");
                InterpretedResult::KillDirective(names)
            }
        }
        Err(e) => {
            warn!(error = %e, "Malformed kill directive");
            InterpretedResult::PlainMessage(PARSE_ERROR_TEXT.into())
        }
    }
}

/// Remove a leading and/or trailing Markdown fence (```` ```json ```` ... ```` ``` ````)
///
/// Either marker is stripped on its own when the other is missing.
fn strip_code_fence(text: &str) -> &str {
    let body = match text.strip_prefix("```") {
        Some(rest) => {
            // Language tag, if any, runs up to the first line break or brace
            let body_start = rest
                .find(|c: char| c == '\n' || c == '{')
                .unwrap_or(rest.len());
            if rest[..body_start].trim().chars().all(|c| c.is_ascii_alphanumeric()) {
                &rest[body_start..]
            } else {
                rest
            }
        }
        None => text,
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}
