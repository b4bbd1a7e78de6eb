//! HTTP client module
//!
//! Provides the transport used by the dispatcher.
//!
//! # Features
//!
//! - **Timeouts**: Per-client default with per-request override
//! - **Automatic Retries**: Bounded retries on transport failures only
//! - **Backoff Strategies**: Constant, linear, and exponential backoff

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
