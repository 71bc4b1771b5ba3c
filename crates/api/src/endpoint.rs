use std::fmt::{Display, Formatter};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

// What must be escaped inside a query-string value; predicates carry
// brackets, quotes and spaces.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b']')
    .add(b'&')
    .add(b'+')
    .add(b'%');

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// The three requests the gateway knows how to make. `Page` holds the
/// opaque `next_page` URL returned by a previous search and is used
/// verbatim.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Endpoint {
    Repository,
    Search {
        reference: String,
        q: String,
        lang: Option<String>,
        page_size: Option<i32>,
        page: Option<i32>,
    },
    Page(String),
}

impl Endpoint {
    /// Search for all documents of one type.
    pub fn by_type(
        reference: &str,
        doc_type: &str,
        lang: Option<String>,
        page_size: Option<i32>,
        page: Option<i32>,
    ) -> Self {
        Self::Search {
            reference: reference.to_string(),
            q: format!(r#"[[at(document.type,"{}")]]"#, doc_type),
            lang,
            page_size,
            page,
        }
    }

    /// Look up one document by uid.
    pub fn by_uid(reference: &str, doc_type: &str, uid: &str, lang: Option<String>) -> Self {
        Self::Search {
            reference: reference.to_string(),
            q: format!(r#"[[at(my.{}.uid,"{}")]]"#, doc_type, uid),
            lang,
            page_size: Some(1),
            page: None,
        }
    }

    pub fn url(&self, api_url: &str) -> String {
        let base = api_url.trim_end_matches('/');
        match self {
            Self::Repository => base.to_string(),
            Self::Search {
                reference,
                q,
                lang,
                page_size,
                page,
            } => {
                let mut url = format!(
                    "{}/documents/search?ref={}&q={}",
                    base,
                    encode(reference),
                    encode(q)
                );
                if let Some(lang) = lang {
                    url.push_str(&format!("&lang={}", encode(lang)));
                }
                if let Some(page_size) = page_size {
                    url.push_str(&format!("&pageSize={}", page_size));
                }
                if let Some(page) = page {
                    url.push_str(&format!("&page={}", page));
                }
                url
            }
            Self::Page(url) => url.clone(),
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repository => write!(f, "repository"),
            Self::Search { q, .. } => write!(f, "search {}", q),
            Self::Page(url) => write!(f, "page {}", url),
        }
    }
}
