//! Transport layer: the `HttpClient` trait and its implementations.

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient, QueryPairs};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
