use crate::{FileId, Generation, RawReply, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file.
    FileSelected(SelectedFile),
    /// Engine finished deriving the preview for a selection.
    PreviewReady { file_id: FileId, preview: String },
    /// User clicked Extract.
    SubmitClicked,
    /// Engine received an HTTP reply for a submission.
    SubmissionCompleted {
        generation: Generation,
        reply: RawReply,
    },
    /// Engine could not obtain a reply (connect error, timeout, unreadable body).
    SubmissionFailed {
        generation: Generation,
        detail: String,
    },
    /// User clicked Reset.
    ResetClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
