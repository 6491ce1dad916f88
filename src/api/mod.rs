//! StudyHub REST API
//!
//! Typed client over a pluggable [`Transport`]:
//!
//! - `client`: endpoint calls, auth header, body parsing
//! - `error`: [`ClientError`] and the parsed [`ResponseBody`]
//! - `transport`: the request/response seam
//! - `http`: reqwest transport (native only)

mod client;
mod error;
#[cfg(feature = "native")]
mod http;
mod transport;

pub use client::{ApiClient, DEFAULT_API_BASE};
pub use error::{ClientError, ClientResult, ResponseBody};
#[cfg(feature = "native")]
pub use http::HttpTransport;
pub use transport::{ApiRequest, Method, RawResponse, Transport, TransportError};
