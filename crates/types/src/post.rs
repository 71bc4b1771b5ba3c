use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::richtext;
use crate::utils::format_date_pt;

const WORDS_PER_MINUTE: usize = 200;

/// What the listing shows for one post. Identity is the uid; the
/// publication date is already formatted for display.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: String,
    pub first_publication_date: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostSummary {
    /// Maps a raw document into a summary. Documents without a uid have
    /// no page to link to and are skipped.
    pub fn from_document(doc: &Document) -> Option<PostSummary> {
        Some(PostSummary {
            uid: doc.uid.clone()?,
            first_publication_date: doc
                .first_publication_date
                .as_deref()
                .and_then(format_date_pt),
            title: doc.data.title.clone(),
            subtitle: doc.data.subtitle.clone(),
            author: doc.data.author.clone(),
        })
    }
}

impl PartialEq for PostSummary {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
    }
}

impl Eq for PostSummary {}

/// One content slice of a post page: an optional heading followed by
/// the rich-text body already rendered to HTML.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentBlock {
    pub heading: Option<String>,
    pub body_html: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostDetail {
    pub uid: String,
    pub first_publication_date: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner_url: Option<String>,
    pub content: Vec<ContentBlock>,
    pub reading_minutes: u32,
}

impl PostDetail {
    pub fn from_document(doc: &Document) -> Option<PostDetail> {
        let content: Vec<ContentBlock> = doc
            .data
            .content
            .iter()
            .map(|slice| ContentBlock {
                heading: slice.heading.clone(),
                body_html: richtext::blocks_to_html(&slice.body),
            })
            .collect();
        let words: usize = doc
            .data
            .content
            .iter()
            .map(|slice| {
                slice.heading.as_deref().unwrap_or("").split_whitespace().count()
                    + richtext::blocks_to_text(&slice.body).split_whitespace().count()
            })
            .sum();
        Some(PostDetail {
            uid: doc.uid.clone()?,
            first_publication_date: doc
                .first_publication_date
                .as_deref()
                .and_then(format_date_pt),
            title: doc.data.title.clone(),
            subtitle: doc.data.subtitle.clone(),
            author: doc.data.author.clone(),
            banner_url: doc.data.banner.as_ref().and_then(|b| b.url.clone()),
            content,
            reading_minutes: words.div_ceil(WORDS_PER_MINUTE).max(1) as u32,
        })
    }
}
