// SPDX-License-Identifier: MPL-2.0
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;
use yearbook_gallery::error::UploadError;
use yearbook_gallery::upload::{submit, FieldNames, UploadRequest};

/// (part name, file name, byte count) of every part received.
type Seen = Arc<Mutex<Vec<(String, String, usize)>>>;

const PROCESSED: &[u8] = b"PK\x05\x06\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0";

async fn accept(State(seen): State<Seen>, mut multipart: Multipart) -> impl IntoResponse {
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let len = field.bytes().await.map(|b| b.len()).unwrap_or(0);
        seen.lock().unwrap().push((name, file_name, len));
    }
    ([(header::CONTENT_TYPE, "application/zip")], PROCESSED)
}

async fn reject() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "processing failed")
}

/// Serves `router` on an ephemeral port and returns its upload URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{addr}/upload")
}

fn request(endpoint: String, dir: &std::path::Path) -> UploadRequest {
    let portrait = dir.join("portraits.zip");
    let candid = dir.join("candids.zip");
    std::fs::write(&portrait, b"portrait bytes").unwrap();
    std::fs::write(&candid, b"candid archive bytes").unwrap();

    UploadRequest {
        endpoint,
        portrait,
        candid,
        fields: FieldNames::default(),
        timeout: Duration::from_secs(10),
    }
}

#[tokio::test]
async fn successful_upload_returns_response_body() {
    let seen: Seen = Arc::default();
    let endpoint = serve(
        Router::new()
            .route("/upload", post(accept))
            .with_state(seen.clone()),
    )
    .await;
    let dir = tempdir().unwrap();

    let mut progress = Vec::new();
    let payload = submit(request(endpoint, dir.path()), |p| progress.push(p))
        .await
        .expect("upload succeeds");

    assert_eq!(payload.as_bytes(), PROCESSED);
    assert_eq!(progress.last().copied(), Some(1.0));

    let seen = seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            ("portrait_zip".to_string(), "portraits.zip".to_string(), 14),
            ("candids_zip".to_string(), "candids.zip".to_string(), 20),
        ]
    );
}

#[tokio::test]
async fn custom_field_names_are_used() {
    let seen: Seen = Arc::default();
    let endpoint = serve(
        Router::new()
            .route("/upload", post(accept))
            .with_state(seen.clone()),
    )
    .await;
    let dir = tempdir().unwrap();
    let mut req = request(endpoint, dir.path());
    req.fields = FieldNames {
        portrait: "portraits".into(),
        candids: "candids".into(),
    };

    submit(req, |_| {}).await.expect("upload succeeds");

    let names: Vec<String> = seen.lock().unwrap().iter().map(|s| s.0.clone()).collect();
    assert_eq!(names, vec!["portraits", "candids"]);
}

#[tokio::test]
async fn server_error_status_is_reported() {
    let endpoint = serve(Router::new().route("/upload", post(reject))).await;
    let dir = tempdir().unwrap();

    let err = submit(request(endpoint, dir.path()), |_| {})
        .await
        .unwrap_err();

    assert_eq!(err, UploadError::Status(500));
    assert_eq!(err.i18n_key(), "error-upload-failed");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let dir = tempdir().unwrap();

    let err = submit(request(format!("http://{addr}/upload"), dir.path()), |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::Transport(_)), "got {err:?}");
}

/// Answers any request with `head` followed by `body`, then hangs up.
async fn serve_raw(head: &'static str, body: &'static [u8]) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        // Drain the multipart request up to its closing boundary.
        while !request.ends_with(b"--\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        socket.write_all(head.as_bytes()).await.expect("write head");
        socket.write_all(body).await.expect("write body");
        socket.shutdown().await.ok();
    });
    format!("http://{addr}/upload")
}

#[tokio::test]
async fn huge_announced_length_with_short_body_is_an_error() {
    let endpoint = serve_raw(
        "HTTP/1.1 200 OK\r\nContent-Type: application/zip\r\nContent-Length: 35184372088832\r\n\r\n",
        b"PK",
    )
    .await;
    let dir = tempdir().unwrap();

    let err = submit(request(endpoint, dir.path()), |_| {})
        .await
        .unwrap_err();

    assert!(
        matches!(err, UploadError::Body(_) | UploadError::Transport(_)),
        "got {err:?}"
    );
}
