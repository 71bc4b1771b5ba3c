use std::sync::Arc;

use spacetraveling_types::document::{QueryResponse, Repository};

use super::endpoint::Endpoint;

#[derive(Debug, Clone)]
pub enum ClientResponse {
    Repository(Arc<Repository>),
    Query(Arc<QueryResponse>),
}

impl ClientResponse {
    pub async fn parse(
        endpoint: &Endpoint,
        resp: reqwest::Response,
    ) -> Result<Self, reqwest::Error> {
        match endpoint {
            Endpoint::Repository => Ok(ClientResponse::Repository(Arc::new(resp.json().await?))),
            Endpoint::Search { .. } | Endpoint::Page(_) => {
                Ok(ClientResponse::Query(Arc::new(resp.json().await?)))
            }
        }
    }
}
