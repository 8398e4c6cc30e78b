//! HTTP transport: client wrapper, failure normalization, response-shape
//! decoding and upload progress reporting.

pub mod client;
pub mod envelope;
pub mod error;
pub mod upload;

pub use client::{HttpClient, HttpClientBuilder};
pub use envelope::{decode_page, page_from_value, PageShape};
pub use error::{normalize, TransportError};
pub use upload::ProgressSink;
