use bytes::Bytes;

use crate::interpret::{ExtractionOutcome, FailureInfo};
use crate::view_model::{AppViewModel, FileView, ResultPanel};

/// Identifies one selection; every `FileSelected` gets a fresh id.
pub type FileId = u64;

/// Tags a selection/submission/reset cycle so late completions can be dropped.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// A user-chosen file: name, declared media type and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    media_type: String,
    bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// The result of the last completed attempt. Holding outcome and failure in
/// one enum keeps them mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResult {
    Outcome(ExtractionOutcome),
    Failure(FailureInfo),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CurrentFile {
    id: FileId,
    file: SelectedFile,
    preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    generation: Generation,
    last_file_id: FileId,
    current: Option<CurrentFile>,
    in_flight: Option<Generation>,
    result: Option<SessionResult>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        if self.in_flight.is_some() {
            return SessionStatus::Submitting;
        }
        match self.result {
            Some(SessionResult::Outcome(_)) => SessionStatus::Succeeded,
            Some(SessionResult::Failure(_)) => SessionStatus::Failed,
            None => SessionStatus::Idle,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.current.as_ref().map(|current| &current.file)
    }

    pub fn current_file_id(&self) -> Option<FileId> {
        self.current.as_ref().map(|current| current.id)
    }

    pub fn preview(&self) -> Option<&str> {
        self.current
            .as_ref()
            .and_then(|current| current.preview.as_deref())
    }

    pub fn outcome(&self) -> Option<&ExtractionOutcome> {
        match &self.result {
            Some(SessionResult::Outcome(outcome)) => Some(outcome),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureInfo> {
        match &self.result {
            Some(SessionResult::Failure(failure)) => Some(failure),
            _ => None,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let status = self.status();
        let file = self.current.as_ref().map(|current| FileView {
            name: current.file.name().to_string(),
            media_type: current.file.media_type().to_string(),
            size: current.file.size(),
        });
        let panel = match &self.result {
            None => ResultPanel::Placeholder,
            Some(SessionResult::Outcome(ExtractionOutcome::Found { text })) => {
                ResultPanel::Found(text.clone())
            }
            Some(SessionResult::Outcome(ExtractionOutcome::NotFound)) => ResultPanel::NotFound,
            Some(SessionResult::Failure(failure)) => ResultPanel::Error(failure.message.clone()),
        };
        let submitting = status == SessionStatus::Submitting;

        AppViewModel {
            status,
            submit_enabled: file.is_some() && !submitting,
            reset_visible: file.is_some() || self.result.is_some(),
            file,
            preview: self.preview().map(ToOwned::to_owned),
            panel,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn in_flight(&self) -> Option<Generation> {
        self.in_flight
    }

    fn next_generation(&mut self) -> Generation {
        self.generation += 1;
        self.generation
    }

    pub(crate) fn select_file(&mut self, file: SelectedFile) -> FileId {
        self.last_file_id += 1;
        let id = self.last_file_id;
        self.current = Some(CurrentFile {
            id,
            file,
            preview: None,
        });
        self.result = None;
        self.next_generation();
        self.mark_dirty();
        id
    }

    /// Stores the preview if it was derived from the current file.
    pub(crate) fn apply_preview(&mut self, file_id: FileId, preview: String) -> bool {
        match self.current.as_mut() {
            Some(current) if current.id == file_id => {
                current.preview = Some(preview);
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn begin_submission(&mut self) -> Generation {
        let generation = self.next_generation();
        self.in_flight = Some(generation);
        self.result = None;
        self.mark_dirty();
        generation
    }

    /// Applies a completion. Returns false when the completion belongs to an
    /// older generation; in that case only the in-flight marker is released.
    pub(crate) fn finish_submission(&mut self, generation: Generation, result: SessionResult) -> bool {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
            self.mark_dirty();
        }
        if generation != self.generation {
            return false;
        }
        self.result = Some(result);
        self.mark_dirty();
        true
    }

    pub(crate) fn fail_locally(&mut self, failure: FailureInfo) {
        self.result = Some(SessionResult::Failure(failure));
        self.mark_dirty();
    }

    pub(crate) fn reset(&mut self) {
        self.current = None;
        self.in_flight = None;
        self.result = None;
        self.next_generation();
        self.mark_dirty();
    }
}
