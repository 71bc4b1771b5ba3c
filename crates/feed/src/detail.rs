use spacetraveling_api::client::Client;
use spacetraveling_api::error::Error as ApiError;
use spacetraveling_types::post::PostDetail;
use tracing::debug;

use super::error::Error;

/// What the post page has to work with. `Loading` is the placeholder
/// shown while the content is not yet available; a missing uid becomes
/// `NotFound` instead of an error.
#[derive(Debug)]
pub enum PostView {
    Loading,
    Ready(Box<PostDetail>),
    NotFound,
}

impl PostView {
    pub async fn load(http: &Client, doc_type: &str, uid: &str) -> Result<Self, Error> {
        debug!("Loading post {}/{}", doc_type, uid);
        match http.get_by_uid(doc_type, uid).await {
            Ok(doc) => Ok(PostDetail::from_document(&doc)
                .map(|detail| PostView::Ready(Box::new(detail)))
                .unwrap_or(PostView::NotFound)),
            Err(ApiError::NotFound(_)) => Ok(PostView::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PostView::NotFound)
    }
}
