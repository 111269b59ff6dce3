//! # raddec-filter-server
//!
//! HTTP server library for the raddec-filter pipeline stage.
//!
//! This library provides the API handlers, settings, and state management
//! used by the `raddec-filter-server` binary.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod api;
pub mod logging;
pub mod settings;
pub mod state;
