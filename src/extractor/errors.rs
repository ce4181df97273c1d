use thiserror::Error;

use crate::fetcher::FetchError;

/// Fatal extraction failures. Anything not listed here is recovered from
/// field by field and never reaches the caller.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("structured data block (application/ld+json) not found")]
    StructuredDataMissing,

    #[error("structured data block is invalid: {0}")]
    StructuredDataInvalid(String),

    #[error("failed to fetch page: {0}")]
    Fetch(#[from] FetchError),

    #[error("failed to fetch season data: {0}")]
    SeasonData(#[source] FetchError),
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        Self::StructuredDataInvalid(err.to_string())
    }
}
