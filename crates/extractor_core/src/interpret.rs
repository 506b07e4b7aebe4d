//! Maps a raw reply from the decoding service onto a session result.

use serde_json::{Map, Value};

/// Shown when submit is pressed with nothing selected.
pub const NO_FILE_MESSAGE: &str = "Please select an image file";
/// Shown for a non-2xx reply that carries no usable `error` field.
pub const REMOTE_FAILURE_MESSAGE: &str = "Failed to process image";
/// Shown for connection errors, timeouts and unreadable replies.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "An error occurred while processing the image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Found { text: String },
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NoFileSelected,
    Transport,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureInfo {
    pub kind: FailureKind,
    pub message: String,
}

impl FailureInfo {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn no_file_selected() -> Self {
        Self::new(FailureKind::NoFileSelected, NO_FILE_MESSAGE)
    }

    pub fn transport() -> Self {
        Self::new(FailureKind::Transport, TRANSPORT_FAILURE_MESSAGE)
    }
}

/// HTTP status and undecoded body of a reply from `/getMessage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawReply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Total mapping from a reply to exactly one of Found, NotFound or a failure.
///
/// The body must be a JSON object whatever the status; anything else is an
/// unreadable reply and counts as a transport failure. Only the field the
/// status calls for is read, so an odd sibling field never changes the result.
pub fn interpret_reply(reply: &RawReply) -> Result<ExtractionOutcome, FailureInfo> {
    let body = match parse_body(&reply.body) {
        Ok(body) => body,
        Err(reason) => {
            extractor_logging::extractor_warn!(
                "Unreadable reply body (status {}, {} bytes): {}",
                reply.status,
                reply.body.len(),
                reason
            );
            return Err(FailureInfo::transport());
        }
    };

    if !reply.is_success() {
        let message = match body.get("error") {
            Some(Value::String(error)) if !error.is_empty() => error.clone(),
            _ => REMOTE_FAILURE_MESSAGE.to_string(),
        };
        return Err(FailureInfo::new(FailureKind::Remote, message));
    }

    match body.get("message") {
        Some(Value::String(text)) if !text.is_empty() => Ok(ExtractionOutcome::Found {
            text: text.clone(),
        }),
        None | Some(Value::Null) | Some(Value::String(_)) => Ok(ExtractionOutcome::NotFound),
        Some(other) => {
            extractor_logging::extractor_warn!(
                "Reply message has unexpected type (status {}): {}",
                reply.status,
                other
            );
            Err(FailureInfo::transport())
        }
    }
}

fn parse_body(body: &[u8]) -> Result<Map<String, Value>, String> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(format!("expected a JSON object, got {other}")),
        Err(err) => Err(err.to_string()),
    }
}
