#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("content gateway error: {0}")]
    Api(#[from] spacetraveling_api::error::Error),
}
