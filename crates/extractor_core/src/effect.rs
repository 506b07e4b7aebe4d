use crate::{FileId, Generation, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Derive a renderable preview; the result comes back as `Msg::PreviewReady`.
    DerivePreview { file_id: FileId, file: SelectedFile },
    /// Upload the file; the result comes back tagged with `generation`.
    SubmitImage {
        generation: Generation,
        file: SelectedFile,
    },
}
