use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use spacetraveling_api::client::{Client, QueryOptions};
use spacetraveling_feed::{detail::PostView, listing::Listing};
use tower_http::trace::TraceLayer;

use crate::render;

pub struct AppState {
    pub http: Arc<Client>,
    pub doc_type: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/post/:uid", get(post))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A gateway failure renders as a plain error page. No retry, no
/// fallback content.
pub struct SiteError(spacetraveling_feed::error::Error);

impl From<spacetraveling_feed::error::Error> for SiteError {
    fn from(e: spacetraveling_feed::error::Error) -> Self {
        SiteError(e)
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        tracing::error!("render failed: {}", self.0);
        (StatusCode::BAD_GATEWAY, Html(render::error_page())).into_response()
    }
}

#[derive(Deserialize, Default)]
pub struct HomeQuery {
    pages: Option<usize>,
}

/// The listing. `?pages=N` re-walks the first N pages sequentially,
/// which is what the "Carregar mais posts" control links to.
async fn home(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>, SiteError> {
    let mut listing =
        Listing::load(state.http.clone(), &state.doc_type, &QueryOptions::default()).await?;
    let pages = query.pages.unwrap_or(1).max(1);
    for _ in 1..pages {
        if !listing.has_more() {
            break;
        }
        listing.load_more().await?;
    }
    Ok(Html(render::home_page(&listing, pages)))
}

async fn post(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Response, SiteError> {
    let view = PostView::load(&state.http, &state.doc_type, &uid).await?;
    let status = if view.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    Ok((status, Html(render::post_page(&view))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use spacetraveling_api::client::Config;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    const REPOSITORY_JSON: &str =
        r#"{"refs":[{"id":"master","ref":"canned-ref","label":"Master","isMasterRef":true}]}"#;

    /// Minimal CMS double: repository document at the API root, the
    /// given body for every search request.
    async fn canned_cms(search_body: String) -> String {
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

    async fn app(search_body: serde_json::Value) -> Router {
        let api_url = canned_cms(search_body.to_string()).await;
        router(Arc::new(AppState {
            http: Arc::new(Client::new(Config::new(api_url))),
            doc_type: "posts".to_string(),
        }))
    }

    fn page_json(results: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "page": 1,
            "results_per_page": 20,
            "results_size": 1,
            "total_results_size": 1,
            "total_pages": 1,
            "next_page": null,
            "prev_page": null,
            "results": results
        })
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_post_renders_404() {
        let app = app(page_json(serde_json::json!([]))).await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/post/nao-existe")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.contains("Post não encontrado"));
    }

    #[tokio::test]
    async fn test_home_renders_first_page() {
        let app = app(page_json(serde_json::json!([{
            "id": "id-a",
            "uid": "a",
            "type": "posts",
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "data": {"title": "post a", "subtitle": "s", "author": "a"}
        }])))
        .await;
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains(r#"href="/post/a""#));
        assert!(!body.contains("Carregar mais posts"));
    }
}
