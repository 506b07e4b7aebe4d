use crate::SessionStatus;

pub const SUBMIT_LABEL: &str = "Extract Message";
pub const SUBMIT_LABEL_BUSY: &str = "Processing...";
pub const PLACEHOLDER_TEXT: &str = "Your message will appear here";
pub const NOT_FOUND_TEXT: &str = "No message was found for this image.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileView {
    pub name: String,
    pub media_type: String,
    pub size: u64,
}

/// What the result area shows. Each variant gets its own styling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultPanel {
    #[default]
    Placeholder,
    Found(String),
    NotFound,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: SessionStatus,
    pub file: Option<FileView>,
    pub preview: Option<String>,
    pub panel: ResultPanel,
    pub submit_enabled: bool,
    pub reset_visible: bool,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn submit_label(&self) -> &'static str {
        if self.status == SessionStatus::Submitting {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL
        }
    }
}
