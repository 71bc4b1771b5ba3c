use serde::{Deserialize, Serialize};

use crate::richtext::Block;

/// A content release listed by the repository endpoint. Every search
/// request must carry the master ref as its `ref` parameter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ref {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub label: Option<String>,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Repository {
    pub refs: Vec<Ref>,
}

impl Repository {
    pub fn master_ref(&self) -> Option<&Ref> {
        self.refs.iter().find(|r| r.is_master_ref)
    }
}

/// One page of search results. `next_page` is an opaque URL; the server
/// either returns a full URL for the following page or null on the last
/// one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub page: i32,
    pub results_per_page: i32,
    pub results_size: i32,
    pub total_results_size: i32,
    pub total_pages: i32,
    pub next_page: Option<String>,
    pub prev_page: Option<String>,
    pub results: Vec<Document>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub lang: Option<String>,
    pub first_publication_date: Option<String>,
    pub last_publication_date: Option<String>,
    pub data: PostData,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PostData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub author: String,
    pub banner: Option<Banner>,
    #[serde(default)]
    pub content: Vec<ContentSlice>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Banner {
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContentSlice {
    pub heading: Option<String>,
    #[serde(default)]
    pub body: Vec<Block>,
}
