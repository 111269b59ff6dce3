//! # raddec-filter-core
//!
//! Core filter logic for the raddec-filter presence-detection stage.
//!
//! A raddec (RADio DECoding) is one observation of a wireless transmitter by
//! one or more receivers. This crate decides whether a raddec should be
//! accepted or rejected by a downstream processing stage.
//!
//! This crate provides:
//! - The raddec record shape consumed by the filter
//! - Filter configuration with boundary validation of loose-typed input
//! - The [`RaddecFilter`] predicate evaluator
//! - Loading of filter parameters from JSON or TOML files
//!
//! ## Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`raddec`] - Raddec and per-receiver RSSI observation types
//! - [`config`] - Filter configuration, validation, and file loading
//! - [`filter`] - The immutable filter and its decision operations
//! - [`decision`] - Criterion identifiers and evaluation results
//! - [`error`] - Error types for filter parameter loading
//!
//! ## Example
//!
//! ```rust
//! use raddec_filter_core::{RaddecFilter, Raddec};
//! use serde_json::json;
//!
//! let filter = RaddecFilter::from_parameters(&json!({ "minRSSI": -70 }));
//! let raddec: Raddec = serde_json::from_value(json!({
//!     "rssiSignature": [{ "receiverIdType": 1, "rssi": -65 }]
//! }))
//! .unwrap();
//!
//! assert!(filter.has_min_rssi());
//! assert!(filter.is_passing(&raddec));
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod config;
pub mod decision;
pub mod error;
pub mod filter;
pub mod raddec;

// Re-export primary types for convenience
pub use config::FilterConfig;
pub use decision::{Criterion, FilterDecision};
pub use error::{FilterError, Result};
pub use filter::RaddecFilter;
pub use raddec::{events, Raddec, RssiObservation};
