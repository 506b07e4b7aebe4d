use std::net::TcpListener;
use std::time::Duration;

use bytes::Bytes;
use extractor_engine::{
    ClientConfig, ImageUpload, ReqwestSubmitter, SubmitFailureKind, Submitter, SubmitReply,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn upload() -> ImageUpload {
    ImageUpload {
        file_name: "cat.png".to_string(),
        media_type: "image/png".to_string(),
        bytes: Bytes::from_static(b"fake-png-bytes"),
    }
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(&server.uri()).expect("mock server uri")
}

#[tokio::test]
async fn posts_multipart_image_field_to_get_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getMessage"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains(r#"name="image""#))
        .and(body_string_contains(r#"filename="cat.png""#))
        .and(body_string_contains("fake-png-bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"message":"hello world"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let submitter = ReqwestSubmitter::new(config_for(&server));
    let reply = submitter.submit(&upload()).await.expect("submit ok");

    assert_eq!(
        reply,
        SubmitReply {
            status: 200,
            body: br#"{"message":"hello world"}"#.to_vec(),
        }
    );

    let requests = server.received_requests().await.expect("recording enabled");
    let body = String::from_utf8_lossy(&requests[0].body).to_ascii_lowercase();
    assert!(body.contains("content-type: image/png"), "body: {body}");
}

#[tokio::test]
async fn base_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/getMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(&format!("{}/api/", server.uri())).unwrap();
    let reply = ReqwestSubmitter::new(config)
        .submit(&upload())
        .await
        .expect("submit ok");
    assert_eq!(reply.status, 200);
}

#[tokio::test]
async fn one_submitter_serves_consecutive_uploads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"message":"hi"}"#))
        .expect(2)
        .mount(&server)
        .await;

    let submitter = ReqwestSubmitter::new(config_for(&server));
    for _ in 0..2 {
        let reply = submitter.submit(&upload()).await.expect("submit ok");
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body, br#"{"message":"hi"}"#.to_vec());
    }
}

#[tokio::test]
async fn error_status_is_passed_through_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getMessage"))
        .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"error":"bad image"}"#))
        .mount(&server)
        .await;

    let reply = ReqwestSubmitter::new(config_for(&server))
        .submit(&upload())
        .await
        .expect("http errors are replies");

    assert_eq!(reply.status, 500);
    assert_eq!(reply.body, br#"{"error":"bad image"}"#.to_vec());
}

#[tokio::test]
async fn connection_refused_is_network_failure() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ClientConfig::new(&format!("http://127.0.0.1:{port}")).unwrap();

    let err = ReqwestSubmitter::new(config)
        .submit(&upload())
        .await
        .unwrap_err();
    assert_eq!(err.kind, SubmitFailureKind::Network);
}

#[tokio::test]
async fn slow_reply_times_out_when_deadline_is_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getMessage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("{}"),
        )
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.request_timeout = Some(Duration::from_millis(50));

    let err = ReqwestSubmitter::new(config)
        .submit(&upload())
        .await
        .unwrap_err();
    assert_eq!(err.kind, SubmitFailureKind::Timeout);
}

#[tokio::test]
async fn oversized_reply_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("01234567890"))
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.max_response_bytes = 10;

    let err = ReqwestSubmitter::new(config)
        .submit(&upload())
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        SubmitFailureKind::ResponseTooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}
