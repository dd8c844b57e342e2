//! Reqwest client module.
//!
//! This module provides the client and configuration used to reach the
//! styling backend over HTTP.

mod client;
mod config;

pub use client::{ReqwestClient, TRACING_TARGET};
pub use config::{DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT, ReqwestConfig};
