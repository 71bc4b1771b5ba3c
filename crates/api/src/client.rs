use std::sync::Arc;

use spacetraveling_types::document::{Document, QueryResponse};
use tracing::{debug, error};

use super::{endpoint::Endpoint, error::Error, response::ClientResponse};

/// Configuration for the client.
/// api_url: The repository endpoint, e.g. https://repo.cdn.prismic.io/api/v2
/// lang: Locale sent with every query. (default: pt-BR)
/// page_size: Results per page for by-type queries. (default: 20)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub lang: Option<String>,
    pub page_size: Option<i32>,
}

impl Config {
    const DEFAULT_LANG: &'static str = "pt-BR";
    const DEFAULT_PAGE_SIZE: i32 = 20;

    pub fn new(api_url: impl Into<String>) -> Self {
        Config {
            api_url: api_url.into(),
            lang: None,
            page_size: None,
        }
    }

    pub fn lang(&self) -> &str {
        self.lang.as_deref().unwrap_or(Self::DEFAULT_LANG)
    }

    pub fn page_size(&self) -> i32 {
        self.page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE)
    }
}

/// Per-call overrides for a by-type query.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub lang: Option<String>,
    pub page_size: Option<i32>,
    pub page: Option<i32>,
}

/// A client for a Prismic-style content API. Requests are at-most-once:
/// there is no retry, no backoff, and failures surface to the caller as
/// they are.
///
/// The master ref is fetched lazily from the repository endpoint on the
/// first query and cached for the lifetime of the client.
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
    http: reqwest::Client,
    master_ref: Arc<tokio::sync::Mutex<Option<String>>>,
}

impl Client {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            http: reqwest::Client::new(),
            master_ref: Arc::new(tokio::sync::Mutex::new(None)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub async fn get(&self, endpoint: &Endpoint) -> Result<ClientResponse, Error> {
        let url = endpoint.url(&self.cfg.api_url);
        debug!("Sending request to {}", url);
        let resp = self.http.get(&url).send().await?;
        self.handle_response(endpoint, resp).await
    }

    async fn handle_response(
        &self,
        endpoint: &Endpoint,
        resp: reqwest::Response,
    ) -> Result<ClientResponse, Error> {
        match resp.status() {
            reqwest::StatusCode::OK => {
                debug!("request: {} status: OK", endpoint);
                Ok(ClientResponse::parse(endpoint, resp).await?)
            }
            reqwest::StatusCode::NOT_FOUND => {
                error!("request {} status: NOT_FOUND", endpoint);
                Err(Error::NotFound(endpoint.to_string()))
            }
            status => {
                error!("request {} status: {}", endpoint, status);
                Err(Error::StatusCode(status.as_u16()))
            }
        }
    }

    async fn master_ref(&self) -> Result<String, Error> {
        let mut cached = self.master_ref.lock().await;
        if let Some(reference) = cached.as_ref() {
            return Ok(reference.clone());
        }
        let repo = match self.get(&Endpoint::Repository).await? {
            ClientResponse::Repository(repo) => repo,
            _ => return Err(Error::InvalidResponse),
        };
        let reference = repo.master_ref().ok_or(Error::NoMasterRef)?.reference.clone();
        *cached = Some(reference.clone());
        Ok(reference)
    }

    /// One page of documents of the given type, with the pagination
    /// cursor the server returned.
    pub async fn query_by_type(
        &self,
        doc_type: &str,
        opts: &QueryOptions,
    ) -> Result<Arc<QueryResponse>, Error> {
        let reference = self.master_ref().await?;
        let endpoint = Endpoint::by_type(
            &reference,
            doc_type,
            Some(opts.lang.clone().unwrap_or_else(|| self.cfg.lang().to_string())),
            Some(opts.page_size.unwrap_or_else(|| self.cfg.page_size())),
            opts.page,
        );
        match self.get(&endpoint).await? {
            ClientResponse::Query(page) => Ok(page),
            _ => Err(Error::InvalidResponse),
        }
    }

    /// A single document by uid. An empty result set maps to NotFound,
    /// same as a 404 from the server.
    pub async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Arc<Document>, Error> {
        let reference = self.master_ref().await?;
        let endpoint = Endpoint::by_uid(&reference, doc_type, uid, None);
        let page = match self.get(&endpoint).await? {
            ClientResponse::Query(page) => page,
            _ => return Err(Error::InvalidResponse),
        };
        page.results
            .first()
            .map(|doc| Arc::new(doc.clone()))
            .ok_or_else(|| Error::NotFound(format!("{}/{}", doc_type, uid)))
    }

    /// Follows an opaque `next_page` URL from an earlier response.
    pub async fn next_page(&self, url: &str) -> Result<Arc<QueryResponse>, Error> {
        match self.get(&Endpoint::Page(url.to_string())).await? {
            ClientResponse::Query(page) => Ok(page),
            _ => Err(Error::InvalidResponse),
        }
    }
}
