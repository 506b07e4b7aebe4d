//! Extractor engine: preview derivation and uploads to the decoding service.
mod config;
mod engine;
mod preview;
mod submit;
mod types;

pub use config::{ClientConfig, ConfigError, API_BASE_URL_ENV, DEFAULT_API_BASE_URL, GET_MESSAGE_PATH};
pub use engine::EngineHandle;
pub use preview::{data_uri, describe_data_uri, FALLBACK_MEDIA_TYPE};
pub use submit::{ReqwestSubmitter, Submitter, IMAGE_FIELD};
pub use types::{
    EngineEvent, FileId, Generation, ImageUpload, SubmitError, SubmitFailureKind, SubmitReply,
};
