use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use extractor_engine::{
    ClientConfig, EngineEvent, EngineHandle, ImageUpload, SubmitError, Submitter, SubmitReply,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

/// Replies with the file name as the message, after a delay read from the payload.
struct DelayingSubmitter;

#[async_trait::async_trait]
impl Submitter for DelayingSubmitter {
    async fn submit(&self, upload: &ImageUpload) -> Result<SubmitReply, SubmitError> {
        let millis: u64 = std::str::from_utf8(&upload.bytes)
            .ok()
            .and_then(|text| text.parse().ok())
            .unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(millis)).await;
        Ok(SubmitReply {
            status: 200,
            body: format!(r#"{{"message":"{}"}}"#, upload.file_name).into_bytes(),
        })
    }
}

fn upload(name: &str, delay_ms: u64) -> ImageUpload {
    ImageUpload {
        file_name: name.to_string(),
        media_type: "image/png".to_string(),
        bytes: Bytes::from(delay_ms.to_string()),
    }
}

#[test]
fn preview_event_carries_file_id_and_data_uri() {
    let engine = EngineHandle::with_submitter(Arc::new(DelayingSubmitter));
    engine.derive_preview(7, "image/gif", Bytes::from_static(b"GIF89a"));

    let event = engine.recv_timeout(WAIT).expect("preview event");
    assert_eq!(
        event,
        EngineEvent::PreviewReady {
            file_id: 7,
            data_uri: "data:image/gif;base64,R0lGODlh".to_string(),
        }
    );
}

#[test]
fn completions_are_tagged_with_their_generation() {
    let engine = EngineHandle::with_submitter(Arc::new(DelayingSubmitter));
    engine.submit(1, upload("slow.png", 300));
    engine.submit(2, upload("fast.png", 0));

    let first = engine.recv_timeout(WAIT).expect("first completion");
    let second = engine.recv_timeout(WAIT).expect("second completion");

    // The later submission finishes first; tags tell them apart.
    match (first, second) {
        (
            EngineEvent::SubmissionCompleted {
                generation: 2,
                result: Ok(fast),
            },
            EngineEvent::SubmissionCompleted {
                generation: 1,
                result: Ok(slow),
            },
        ) => {
            assert_eq!(fast.body, br#"{"message":"fast.png"}"#.to_vec());
            assert_eq!(slow.body, br#"{"message":"slow.png"}"#.to_vec());
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn submits_to_configured_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"message":"hi"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let engine = EngineHandle::new(ClientConfig::new(&server.uri()).unwrap());
    engine.submit(42, upload("cat.png", 0));

    let event = tokio::task::spawn_blocking(move || engine.recv_timeout(WAIT))
        .await
        .unwrap()
        .expect("completion event");

    assert_eq!(
        event,
        EngineEvent::SubmissionCompleted {
            generation: 42,
            result: Ok(SubmitReply {
                status: 200,
                body: br#"{"message":"hi"}"#.to_vec(),
            }),
        }
    );
}
