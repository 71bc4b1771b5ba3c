#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("status code: {0}")]
    StatusCode(u16),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid response")]
    InvalidResponse,

    #[error("repository response has no master ref")]
    NoMasterRef,
}
