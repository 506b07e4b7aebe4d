//! Extractor core: pure upload-session state machine and view-model helpers.
mod effect;
mod interpret;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use interpret::{
    interpret_reply, ExtractionOutcome, FailureInfo, FailureKind, RawReply, NO_FILE_MESSAGE,
    REMOTE_FAILURE_MESSAGE, TRANSPORT_FAILURE_MESSAGE,
};
pub use msg::Msg;
pub use state::{AppState, FileId, Generation, SelectedFile, SessionResult, SessionStatus};
pub use update::update;
pub use view_model::{
    AppViewModel, FileView, ResultPanel, NOT_FOUND_TEXT, PLACEHOLDER_TEXT, SUBMIT_LABEL,
    SUBMIT_LABEL_BUSY,
};
