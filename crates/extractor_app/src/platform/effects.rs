use extractor_core::{Effect, Msg, RawReply};
use extractor_engine::{ClientConfig, EngineEvent, EngineHandle, ImageUpload};

/// Executes core effects and feeds their completions back as messages.
pub trait EffectSink {
    fn enqueue(&self, effects: Vec<Effect>);
    /// Completions that arrived since the last call.
    fn drain(&self) -> Vec<Msg>;
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            engine: EngineHandle::new(config),
        }
    }
}

impl EffectSink for EffectRunner {
    fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::DerivePreview { file_id, file } => {
                    self.engine
                        .derive_preview(file_id, file.media_type(), file.bytes().clone());
                }
                Effect::SubmitImage { generation, file } => {
                    self.engine.submit(
                        generation,
                        ImageUpload {
                            file_name: file.name().to_string(),
                            media_type: file.media_type().to_string(),
                            bytes: file.bytes().clone(),
                        },
                    );
                }
            }
        }
    }

    fn drain(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PreviewReady { file_id, data_uri } => Msg::PreviewReady {
            file_id,
            preview: data_uri,
        },
        EngineEvent::SubmissionCompleted { generation, result } => match result {
            Ok(reply) => Msg::SubmissionCompleted {
                generation,
                reply: RawReply::new(reply.status, reply.body),
            },
            Err(err) => Msg::SubmissionFailed {
                generation,
                detail: err.to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::map_event;
    use extractor_core::{Msg, RawReply};
    use extractor_engine::{EngineEvent, SubmitReply};

    #[test]
    fn reply_maps_to_completion_with_same_generation() {
        let msg = map_event(EngineEvent::SubmissionCompleted {
            generation: 9,
            result: Ok(SubmitReply {
                status: 404,
                body: b"{}".to_vec(),
            }),
        });
        assert_eq!(
            msg,
            Msg::SubmissionCompleted {
                generation: 9,
                reply: RawReply::new(404, b"{}".to_vec()),
            }
        );
    }

    #[test]
    fn preview_maps_to_preview_ready() {
        let msg = map_event(EngineEvent::PreviewReady {
            file_id: 3,
            data_uri: "data:image/png;base64,".to_string(),
        });
        assert_eq!(
            msg,
            Msg::PreviewReady {
                file_id: 3,
                preview: "data:image/png;base64,".to_string(),
            }
        );
    }
}
