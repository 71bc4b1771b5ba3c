use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const REPOSITORY_JSON: &str =
    r#"{"refs":[{"id":"master","ref":"canned-ref","label":"Master","isMasterRef":true}]}"#;

/// A one-repository CMS on an ephemeral port: serves the repository
/// document at the API root and `search_body` for every search or
/// next-page request. Returns the api_url to point a `Config` at.
pub(crate) async fn canned_cms(search_body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let search_body = search_body.clone();
            tokio::spawn(async move {
                let mut req = Vec::new();
                let mut buf = [0u8; 1024];
                loop {
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    req.extend_from_slice(&buf[..n]);
                    if req.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let head = String::from_utf8_lossy(&req);
                let body = if head.starts_with("GET /api/v2/documents/search") {
                    search_body.as_str()
                } else {
                    REPOSITORY_JSON
                };
                let resp = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(resp.as_bytes()).await;
            });
        }
    });
    format!("http://{}/api/v2", addr)
}
