// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # rtms-rent
//!
//! Client for the public data portal's apartment rent transaction API.
//!
//! The upstream service answers in JSON, XML or raw tab-delimited text
//! depending on its error state and backend, whatever content type it
//! declares. This crate dispatches the call with timeout and bounded retry,
//! detects the body's format, decodes it into one common envelope and
//! classifies the result code against the documented taxonomy.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rtms_rent::{ClientConfig, RentalQueryService, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::from_env()?;
//!     let service = RentalQueryService::from_config(&config)?;
//!
//!     // Region code or district name, contract year-month YYYYMM
//!     let records = service.query_rentals("강남구", "202401", 1, 10).await?;
//!     for record in &records {
//!         println!("{:?} {:?}", record.apartment_name, record.deposit);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ RentalQueryService   validate region + year-month            │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │ ApiDispatcher        HttpClient (timeout, retry, backoff)    │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ raw body
//! ┌──────────┬───────────────────┴──────────┬────────────────────┐
//! │  detect  │          envelope            │    result_code     │
//! ├──────────┼──────────────────────────────┼────────────────────┤
//! │ JSON     │ JsonEnvelopeDecoder          │ classify           │
//! │ XML      │ XmlEnvelopeDecoder           │  Success           │
//! │ Text     │ TextEnvelopeDecoder          │  Recoverable       │
//! │          │  └ decode_item / extract     │  Fatal             │
//! └──────────┴──────────────────────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Upstream result-code taxonomy and classification
pub mod result_code;

/// Administrative region table and lookups
pub mod region;

/// Response decoders (JSON, XML, delimited text)
pub mod decode;

/// HTTP client with timeout and retry
pub mod http;

/// Upstream call dispatch
pub mod dispatch;

/// Input validation and query orchestration
pub mod service;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{ApiError, Error, ErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ClientConfig;
pub use dispatch::{ApiDispatcher, APARTMENT_RENT_ENDPOINT};
pub use region::{Region, RegionLookup, StaticRegions};
pub use result_code::{classify, Classification, ResultCode};
pub use service::RentalQueryService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
