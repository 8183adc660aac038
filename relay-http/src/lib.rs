//! # Reqwest HTTP Adapter
//!
//! Concrete [`HttpClient`](relay_traits::http::HttpClient) backed by reqwest
//! with rustls TLS and connection pooling. One attempt per request; recovery
//! is the poll loop's job.

pub mod http;

pub use http::ReqwestHttpClient;
