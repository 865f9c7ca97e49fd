//! End-to-end batch tests against a local mock API server.

use base64::Engine;
use img2txt_core::{BatchSummary, Img2Txt, Img2TxtError, ProviderKind, RunConfiguration};
use serde_json::{json, Value};
use std::path::Path;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROMPT: &str = "Describe this image.";
const OPENAI_PATH: &str = "/v1/chat/completions";
const GEMINI_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn openai(server: &MockServer) -> Img2Txt {
    Img2Txt::new(RunConfiguration {
        provider: ProviderKind::OpenAi,
        api_key: "sk-test".to_string(),
        prompt: PROMPT.to_string(),
        model_name: "gpt-4o".to_string(),
        endpoint: format!("{}{OPENAI_PATH}", server.uri()),
    })
    .expect("OpenAI provider should build")
}

fn gemini(server: &MockServer) -> Img2Txt {
    Img2Txt::new(RunConfiguration {
        provider: ProviderKind::Gemini,
        api_key: "g-test".to_string(),
        prompt: PROMPT.to_string(),
        model_name: "gemini-2.0-flash".to_string(),
        endpoint: format!("{}/v1beta", server.uri()),
    })
    .expect("Gemini provider should build")
}

fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    }))
}

fn b64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[tokio::test]
async fn test_openai_success_writes_trimmed_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OPENAI_PATH))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(chat_reply("\n  A cat.  \n"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("cat.jpg");
    std::fs::write(&image, b"jpeg-bytes").unwrap();

    let summary = openai(&server).describe_path(&image).await.unwrap();

    assert_eq!(summary.described, 1);
    assert_eq!(read(&dir.path().join("cat.txt")), "A cat.");
}

#[tokio::test]
async fn test_openai_request_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OPENAI_PATH))
        .respond_with(chat_reply("A bird."))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("bird.WEBP");
    std::fs::write(&image, b"webp-bytes").unwrap();

    openai(&server).describe_path(&image).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(
        body,
        json!({
            "model": "gpt-4o",
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": PROMPT},
                    {"type": "image_url", "image_url": {
                        "url": format!("data:image/webp;base64,{}", b64(b"webp-bytes"))
                    }}
                ]
            }],
            "max_tokens": 500
        })
    );
}

#[tokio::test]
async fn test_api_error_skips_file_and_batch_continues() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains(b64(b"first-image")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": {"message": "rate limited"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains(b64(b"second-image")))
        .respond_with(chat_reply("A dog."))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("first.jpg"), b"first-image").unwrap();
    std::fs::write(dir.path().join("second.png"), b"second-image").unwrap();

    let summary = openai(&server).describe_path(dir.path()).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.described, 1);
    assert!(!dir.path().join("first.txt").exists());
    assert_eq!(read(&dir.path().join("second.txt")), "A dog.");
}

#[tokio::test]
async fn test_http_error_status_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"error": {"message": "rate limited"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("cat.gif");
    std::fs::write(&image, b"gif-bytes").unwrap();

    let summary = openai(&server).describe_path(&image).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert!(!dir.path().join("cat.txt").exists());
}

#[tokio::test]
async fn test_empty_content_writes_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(chat_reply(""))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("blank.png");
    std::fs::write(&image, b"png-bytes").unwrap();

    let summary = openai(&server).describe_path(&image).await.unwrap();

    assert_eq!(summary.placeholders, 1);
    assert_eq!(
        read(&dir.path().join("blank.txt")),
        "Description not generated or found."
    );
}

#[tokio::test]
async fn test_directory_with_unsupported_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(chat_reply("A chart."))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("chart.png"), b"png-bytes").unwrap();
    std::fs::write(dir.path().join("readme.txt"), b"not an image").unwrap();

    let summary = openai(&server).describe_path(dir.path()).await.unwrap();

    assert_eq!(
        summary,
        BatchSummary {
            described: 1,
            placeholders: 0,
            skipped: 1,
            failed: 0,
        }
    );
    let mut outputs: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".txt"))
        .collect();
    outputs.sort();
    assert_eq!(outputs, vec!["chart.txt", "readme.txt"]);
    assert_eq!(read(&dir.path().join("readme.txt")), "not an image");
}

#[tokio::test]
async fn test_rerun_overwrites_with_identical_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(chat_reply("A tree."))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tree.jpeg"), b"jpeg-bytes").unwrap();

    let img2txt = openai(&server);
    let first = img2txt.describe_path(dir.path()).await.unwrap();
    let second = img2txt.describe_path(dir.path()).await.unwrap();

    assert_eq!(first.described, 1);
    // The generated tree.txt is a candidate on the second run, but is skipped.
    assert_eq!(second.described, 1);
    assert_eq!(second.skipped, 1);
    assert_eq!(read(&dir.path().join("tree.txt")), "A tree.");
}

#[tokio::test]
async fn test_invalid_path_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(chat_reply("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let err = openai(&server).describe_path(&missing).await.unwrap_err();

    assert!(matches!(err, Img2TxtError::InvalidPath(p) if p == missing));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_transport_error_is_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("cat.jpg");
    std::fs::write(&image, b"jpeg-bytes").unwrap();

    // Bind and drop a listener so nothing is accepting on the port.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let img2txt = Img2Txt::new(RunConfiguration {
        provider: ProviderKind::OpenAi,
        api_key: "sk-test".to_string(),
        prompt: PROMPT.to_string(),
        model_name: "gpt-4o".to_string(),
        endpoint: format!("http://127.0.0.1:{port}{OPENAI_PATH}"),
    })
    .unwrap();

    let summary = img2txt.describe_path(&image).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert!(!dir.path().join("cat.txt").exists());
}

#[tokio::test]
async fn test_gemini_success_uses_key_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(query_param("key", "g-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "A mountain lake.\n"}], "role": "model"},
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("lake.JPG"), b"jpeg-bytes").unwrap();
    // Gemini accepts JPEG and PNG only.
    std::fs::write(dir.path().join("anim.gif"), b"gif-bytes").unwrap();

    let summary = gemini(&server).describe_path(dir.path()).await.unwrap();

    assert_eq!(summary.described, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(read(&dir.path().join("lake.txt")), "A mountain lake.");
    assert!(!dir.path().join("anim.txt").exists());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(
        body,
        json!({
            "contents": [{
                "parts": [
                    {"text": PROMPT},
                    {"inlineData": {"mimeType": "image/jpeg", "data": b64(b"jpeg-bytes")}}
                ]
            }]
        })
    );
}

#[tokio::test]
async fn test_gemini_blocked_response_writes_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("x.png");
    std::fs::write(&image, b"png-bytes").unwrap();

    let summary = gemini(&server).describe_path(&image).await.unwrap();

    assert_eq!(summary.placeholders, 1);
    assert_eq!(
        read(&dir.path().join("x.txt")),
        img2txt_core::PLACEHOLDER_DESCRIPTION
    );
}

#[tokio::test]
async fn test_gemini_http_error_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("x.jpg");
    std::fs::write(&image, b"jpeg-bytes").unwrap();

    let summary = gemini(&server).describe_path(&image).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert!(!dir.path().join("x.txt").exists());
}
