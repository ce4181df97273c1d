pub mod backoff;
pub mod client;
pub mod errors;
pub mod pipeline;
pub mod source;
pub mod types;

pub use client::fetch;
pub use errors::FetchError;
pub use source::{HttpPageSource, PageSource, UpstreamUrls};
pub use types::PageResponse;

#[cfg(test)]
pub use source::MockPageSource;
