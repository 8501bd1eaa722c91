//! Backend interaction layer for Confab.
//!
//! Wraps the remote inference backend's JSON/HTTP contract in a typed
//! client, and loads the client configuration.

pub mod client;
pub mod config;

pub use client::{BackendClient, SummarizeOutcome};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
