//! Reqwest-based gateway for the gothyxan styling backend.
//!
//! This crate provides [`ReqwestClient`], the HTTP implementation of
//! [`BackendProvider`].
//!
//! # Example
//!
//! ```rust,ignore
//! use gothyxan_core::BackendService;
//! use gothyxan_reqwest::{ReqwestClient, ReqwestConfig};
//!
//! let client = ReqwestClient::new(ReqwestConfig::default())?;
//!
//! // Convert to a service for dependency injection
//! let service: BackendService = client.into_service();
//! let session = service.login("42", Some("neo")).await?;
//! ```
//!
//! [`BackendProvider`]: gothyxan_core::BackendProvider

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod connect;
mod error;
mod service;

pub use crate::connect::{
    DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT, ReqwestClient, ReqwestConfig, TRACING_TARGET,
};
pub use crate::error::{Error, Result};
