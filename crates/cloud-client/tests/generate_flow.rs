//! Upload and generate against a local stand-in for the remote services.

use std::time::{Duration, Instant};

use studio_cloud_client::{LaunchParams, SubmitService, WebhookStatus};
use studio_common::AppConfig;
use studio_overlay_model::{MediaKind, OverlayDocument, OverlayPosition, TextLayer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

struct Captured {
    head: String,
    body: Vec<u8>,
}

/// Accept one request, answer it with `status` and `body`, and hand back
/// what was received.
async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        while buf.len() < header_end + length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status} Test\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        Captured {
            head,
            body: buf[header_end..].to_vec(),
        }
    });

    (addr, handle)
}

fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.cloud.cloud_name = "demo".to_string();
    config
}

#[tokio::test]
async fn generate_posts_payload_to_webhook() {
    let (addr, server) = serve_once(200, "{}").await;
    let mut config = config();
    config.webhook.url = format!("{addr}/hook");

    let service = SubmitService::from_config(&config).unwrap();
    let document = OverlayDocument::with_layer(
        studio_overlay_model::MediaRef::new("img123", MediaKind::Image),
        TextLayer::with_text("SALE 50%", OverlayPosition::new(10.0, 10.0)),
    );
    let launch = LaunchParams::new(Some("u-7".to_string()), Some("s3cret".to_string()));

    let outcome = service.generate(&document, &launch).await.unwrap();
    assert_eq!(outcome.webhook.finish().await, WebhookStatus::Delivered);

    let captured = server.await.unwrap();
    assert!(captured.head.starts_with("POST /hook "));
    let json: serde_json::Value = serde_json::from_slice(&captured.body).unwrap();
    assert_eq!(json["user_id"], "u-7");
    assert_eq!(json["security_code"], "s3cret");
    assert_eq!(json["transformed_url"], outcome.url.as_str());
    assert_eq!(json["text_layers"][0]["text"], "SALE 50%");
}

#[tokio::test]
async fn webhook_error_status_is_reported_not_raised() {
    let (addr, server) = serve_once(500, "{}").await;
    let mut config = config();
    config.webhook.url = format!("{addr}/hook");

    let service = SubmitService::from_config(&config).unwrap();
    let document = OverlayDocument::with_layer(
        studio_overlay_model::MediaRef::new("img123", MediaKind::Image),
        TextLayer::with_text("Hi", OverlayPosition::new(50.0, 50.0)),
    );
    let outcome = service
        .generate(&document, &LaunchParams::default())
        .await
        .unwrap();
    assert_eq!(outcome.webhook.finish().await, WebhookStatus::Failed);
    server.await.unwrap();
}

#[tokio::test]
async fn url_is_returned_before_a_silent_webhook_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());
    // Accept the connection and never answer.
    let silent = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(socket);
    });

    let mut config = config();
    config.webhook.url = format!("{addr}/hook");
    config.webhook.timeout_secs = 5;

    let service = SubmitService::from_config(&config).unwrap();
    let document = OverlayDocument::with_layer(
        studio_overlay_model::MediaRef::new("img123", MediaKind::Image),
        TextLayer::with_text("Hi", OverlayPosition::new(50.0, 50.0)),
    );

    let started = Instant::now();
    let outcome = service
        .generate(&document, &LaunchParams::default())
        .await
        .unwrap();
    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(outcome.url.ends_with("/img123.jpg"));
    assert!(outcome.webhook.is_enabled());
    assert!(!service.busy().is_busy());

    assert_eq!(outcome.webhook.finish().await, WebhookStatus::Failed);
    assert!(started.elapsed() >= Duration::from_secs(4));
    silent.abort();
}

#[tokio::test]
async fn upload_sends_multipart_and_reads_response() {
    let (addr, server) = serve_once(
        200,
        r#"{"public_id":"text-overlay/abc","secure_url":"https://res.cloudinary.com/demo/image/upload/abc.png","width":640,"height":480}"#,
    )
    .await;
    let mut config = config();
    config.cloud.api_host = addr;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.png");
    std::fs::write(&path, b"\x89PNG fake bytes").unwrap();

    let service = SubmitService::from_config(&config).unwrap();
    let media = service.upload_media(&path).await.unwrap();
    assert_eq!(media.asset_id, "text-overlay/abc");
    assert_eq!(media.width, Some(640));
    assert_eq!(media.kind, MediaKind::Image);
    assert!(!service.busy().is_busy());

    let captured = server.await.unwrap();
    assert!(captured.head.starts_with("POST /v1_1/demo/image/upload "));
    let body = String::from_utf8_lossy(&captured.body);
    assert!(body.contains("name=\"upload_preset\""));
    assert!(body.contains("upload-image"));
    assert!(body.contains("name=\"folder\""));
    assert!(body.contains("text-overlay"));
    assert!(body.contains("filename=\"photo.png\""));
    assert!(!body.contains("name=\"resource_type\""));
}

#[tokio::test]
async fn rejected_upload_surfaces_api_body() {
    let (addr, server) = serve_once(400, r#"{"error":{"message":"Upload preset not found"}}"#).await;
    let mut config = config();
    config.cloud.api_host = addr;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.mp4");
    std::fs::write(&path, b"fake video").unwrap();

    let service = SubmitService::from_config(&config).unwrap();
    let err = service.upload_media(&path).await.unwrap_err();
    assert!(err.to_string().contains("Upload preset not found"));
    assert!(!err.is_validation());

    let captured = server.await.unwrap();
    assert!(captured.head.starts_with("POST /v1_1/demo/video/upload "));
    let body = String::from_utf8_lossy(&captured.body);
    assert!(body.contains("name=\"resource_type\""));
}
