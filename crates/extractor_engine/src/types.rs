use std::fmt;

use bytes::Bytes;

pub type FileId = u64;
pub type Generation = u64;

/// The file part of a `/getMessage` upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReply {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PreviewReady {
        file_id: FileId,
        data_uri: String,
    },
    SubmissionCompleted {
        generation: Generation,
        result: Result<SubmitReply, SubmitError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitError {
    pub kind: SubmitFailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: SubmitFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailureKind {
    InvalidRequest,
    Timeout,
    Network,
    ResponseTooLarge { max_bytes: u64, actual: Option<u64> },
}

impl fmt::Display for SubmitFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitFailureKind::InvalidRequest => write!(f, "invalid request"),
            SubmitFailureKind::Timeout => write!(f, "timeout"),
            SubmitFailureKind::Network => write!(f, "network error"),
            SubmitFailureKind::ResponseTooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
        }
    }
}
