use std::sync::Arc;

use spacetraveling_api::client::{Client, QueryOptions};
use spacetraveling_types::document::QueryResponse;
use spacetraveling_types::post::PostSummary;
use tracing::debug;

use super::error::Error;

/// The listing state: an ordered sequence of post summaries plus the
/// cursor for the next page, if the server reported one. `load_more`
/// appends in arrival order; entries are never deduplicated, so a
/// server returning overlapping pages will repeat a uid.
pub struct Listing {
    http: Arc<Client>,
    results: Vec<PostSummary>,
    next_page: Option<String>,
}

impl Listing {
    pub fn empty(http: Arc<Client>) -> Self {
        Listing {
            http,
            results: vec![],
            next_page: None,
        }
    }

    /// The first page, fetched server-side before anything renders.
    pub async fn load(
        http: Arc<Client>,
        doc_type: &str,
        opts: &QueryOptions,
    ) -> Result<Self, Error> {
        let page = http.query_by_type(doc_type, opts).await?;
        let mut listing = Self::empty(http);
        listing.append_page(&page);
        Ok(listing)
    }

    /// Appends one page of results and takes over its cursor.
    pub fn append_page(&mut self, page: &QueryResponse) {
        self.results
            .extend(page.results.iter().filter_map(PostSummary::from_document));
        self.next_page = page.next_page.clone();
    }

    /// Follows the stored cursor and appends whatever comes back,
    /// returning how many entries arrived. Without a cursor this is a
    /// no-op: nothing is fetched.
    pub async fn load_more(&mut self) -> Result<usize, Error> {
        let Some(url) = self.next_page.clone() else {
            return Ok(0);
        };
        debug!("Loading more posts from {}", url);
        let page = self.http.next_page(&url).await?;
        let before = self.results.len();
        self.append_page(&page);
        Ok(self.results.len() - before)
    }

    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacetraveling_api::client::Config;

    fn client() -> Arc<Client> {
        Arc::new(Client::new(Config::new("http://127.0.0.1:9/api/v2")))
    }

    fn page(uids: &[&str], next_page: Option<&str>) -> QueryResponse {
        serde_json::from_value(serde_json::json!({
            "page": 1,
            "results_per_page": uids.len(),
            "results_size": uids.len(),
            "total_results_size": uids.len(),
            "total_pages": 1,
            "next_page": next_page,
            "prev_page": null,
            "results": uids
                .iter()
                .map(|uid| {
                    serde_json::json!({
                        "id": format!("id-{}", uid),
                        "uid": uid,
                        "type": "posts",
                        "first_publication_date": "2021-03-15T19:25:28+0000",
                        "data": {"title": format!("post {}", uid), "subtitle": "s", "author": "a"}
                    })
                })
                .collect::<Vec<_>>()
        }))
        .unwrap()
    }

    fn uids(listing: &Listing) -> Vec<&str> {
        listing.posts().iter().map(|p| p.uid.as_str()).collect()
    }

    #[test]
    fn test_append_preserves_original_then_arrival_order() {
        let mut listing = Listing::empty(client());
        listing.append_page(&page(&["a", "b", "c"], Some("/p2")));
        assert!(listing.has_more());
        listing.append_page(&page(&["d"], None));
        assert_eq!(uids(&listing), vec!["a", "b", "c", "d"]);
        assert!(!listing.has_more());
    }

    #[test]
    fn test_cursor_replaced_by_latest_page() {
        let mut listing = Listing::empty(client());
        listing.append_page(&page(&["a"], Some("/p2")));
        assert_eq!(listing.next_page(), Some("/p2"));
        listing.append_page(&page(&["b"], Some("/p3")));
        assert_eq!(listing.next_page(), Some("/p3"));
    }

    #[test]
    fn test_duplicates_are_kept() {
        // Overlapping pages are appended as-is; dedup by uid is a
        // server concern we do not paper over.
        let mut listing = Listing::empty(client());
        listing.append_page(&page(&["a", "b"], Some("/p2")));
        listing.append_page(&page(&["b", "c"], None));
        assert_eq!(uids(&listing), vec!["a", "b", "b", "c"]);
    }

    #[test]
    fn test_documents_without_uid_are_skipped() {
        let mut response = page(&["a", "b"], None);
        response.results[1].uid = None;
        let mut listing = Listing::empty(client());
        listing.append_page(&response);
        assert_eq!(uids(&listing), vec!["a"]);
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_load_more_without_cursor_fetches_nothing() {
        let mut listing = Listing::empty(client());
        listing.append_page(&page(&["a", "b", "c"], None));
        // The client points at a closed port, so any fetch would error.
        assert_eq!(listing.load_more().await.unwrap(), 0);
        assert_eq!(uids(&listing), vec!["a", "b", "c"]);
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_load_more_fetches_and_appends_next_page() {
        let second = serde_json::to_string(&page(&["d"], None)).unwrap();
        let api_url = crate::testutil::canned_cms(second).await;
        let cursor = format!("{}/documents/search?page=2", api_url);
        let mut listing = Listing::empty(Arc::new(Client::new(Config::new(api_url))));
        listing.append_page(&page(&["a", "b", "c"], Some(cursor.as_str())));
        assert_eq!(listing.load_more().await.unwrap(), 1);
        assert_eq!(uids(&listing), vec!["a", "b", "c", "d"]);
        assert!(!listing.has_more());
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_load_more_surfaces_gateway_failure() {
        let mut listing = Listing::empty(client());
        listing.append_page(&page(&["a"], Some("http://127.0.0.1:9/p2")));
        let err = listing.load_more().await.unwrap_err();
        assert!(matches!(err, Error::Api(_)));
        // State is untouched on failure.
        assert_eq!(uids(&listing), vec!["a"]);
        assert!(listing.has_more());
    }
}
