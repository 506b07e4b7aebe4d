use std::sync::{mpsc, Arc};
use std::thread;

use extractor_logging::{extractor_debug, extractor_warn};

use crate::preview::data_uri;
use crate::submit::{ReqwestSubmitter, Submitter};
use crate::{ClientConfig, EngineEvent, FileId, Generation, ImageUpload};

enum EngineCommand {
    Preview {
        file_id: FileId,
        media_type: String,
        bytes: bytes::Bytes,
    },
    Submit {
        generation: Generation,
        upload: ImageUpload,
    },
}

/// Runs previews and submissions on a background tokio runtime and reports
/// completions as [`EngineEvent`]s. Work is never aborted; callers drop
/// stale events by their tags.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_submitter(Arc::new(ReqwestSubmitter::new(config)))
    }

    pub fn with_submitter(submitter: Arc<dyn Submitter>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let submitter = submitter.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(submitter.as_ref(), command, event_tx).await;
                });
            }
            extractor_debug!("Engine command channel closed; shutting down runtime");
        });

        Self { cmd_tx, event_rx }
    }

    pub fn derive_preview(&self, file_id: FileId, media_type: impl Into<String>, bytes: bytes::Bytes) {
        let _ = self.cmd_tx.send(EngineCommand::Preview {
            file_id,
            media_type: media_type.into(),
            bytes,
        });
    }

    pub fn submit(&self, generation: Generation, upload: ImageUpload) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { generation, upload });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    submitter: &dyn Submitter,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Preview {
            file_id,
            media_type,
            bytes,
        } => {
            let encoded =
                tokio::task::spawn_blocking(move || data_uri(&media_type, &bytes)).await;
            match encoded {
                Ok(uri) => {
                    let _ = event_tx.send(EngineEvent::PreviewReady {
                        file_id,
                        data_uri: uri,
                    });
                }
                Err(err) => extractor_warn!("Preview task for file_id={} failed: {}", file_id, err),
            }
        }
        EngineCommand::Submit { generation, upload } => {
            let result = submitter.submit(&upload).await;
            if let Err(err) = &result {
                extractor_warn!("Submission generation={} failed: {}", generation, err);
            }
            let _ = event_tx.send(EngineEvent::SubmissionCompleted { generation, result });
        }
    }
}
