use extractor_logging::{extractor_debug, extractor_info, extractor_warn};

use crate::{
    interpret_reply, AppState, Effect, FailureInfo, Generation, Msg, SessionResult, SessionStatus,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(file) => {
            extractor_info!(
                "File selected name={} media_type={} size={}",
                file.name(),
                file.media_type(),
                file.size()
            );
            // An in-flight request keeps running; its reply will be stale.
            let file_id = state.select_file(file.clone());
            vec![Effect::DerivePreview { file_id, file }]
        }
        Msg::PreviewReady { file_id, preview } => {
            if !state.apply_preview(file_id, preview) {
                extractor_debug!(
                    "Discarding preview for file_id={} (current {:?})",
                    file_id,
                    state.current_file_id()
                );
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.status() == SessionStatus::Submitting {
                extractor_debug!("Submit ignored while a request is in flight");
                return (state, Vec::new());
            }
            match state.selected_file().cloned() {
                None => {
                    state.fail_locally(FailureInfo::no_file_selected());
                    Vec::new()
                }
                Some(file) => {
                    let generation = state.begin_submission();
                    extractor_info!(
                        "Submitting generation={} name={} size={}",
                        generation,
                        file.name(),
                        file.size()
                    );
                    vec![Effect::SubmitImage { generation, file }]
                }
            }
        }
        Msg::SubmissionCompleted { generation, reply } => {
            extractor_info!(
                "Reply generation={} status={} body_len={}",
                generation,
                reply.status,
                reply.body.len()
            );
            let result = match interpret_reply(&reply) {
                Ok(outcome) => SessionResult::Outcome(outcome),
                Err(failure) => SessionResult::Failure(failure),
            };
            apply_completion(&mut state, generation, result);
            Vec::new()
        }
        Msg::SubmissionFailed { generation, detail } => {
            extractor_warn!("Submission generation={} failed: {}", generation, detail);
            apply_completion(
                &mut state,
                generation,
                SessionResult::Failure(FailureInfo::transport()),
            );
            Vec::new()
        }
        Msg::ResetClicked => {
            if let Some(in_flight) = state.in_flight() {
                extractor_debug!("Reset with generation={} still in flight", in_flight);
            }
            state.reset();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_completion(state: &mut AppState, generation: Generation, result: SessionResult) {
    if !state.finish_submission(generation, result) {
        extractor_debug!(
            "Discarding stale completion generation={} (current {})",
            generation,
            state.generation()
        );
    }
}
