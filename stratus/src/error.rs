use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No search domain configured")]
    MissingSearchDomain,

    #[error("Invalid filter expression: {0}")]
    InvalidFilterExpression(String),

    #[error("Search request failed with status {status} ({url})")]
    Search { status: u16, url: String },

    #[error("Document batch rejected with status {status}: {body}")]
    DocumentUpdate { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
