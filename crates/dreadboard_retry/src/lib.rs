//! Retry policy and configuration for Dreadboard.
//!
//! This crate owns two ambient concerns shared by every other crate:
//!
//! - [`RetryPolicy`]: exponential backoff over typed transient errors
//!   ([`dreadboard_error::RetryableError`]), built on `tokio-retry2`.
//! - [`DreadboardConfig`]: layered TOML configuration (bundled defaults,
//!   then `~/.config/dreadboard/dreadboard.toml`, then `./dreadboard.toml`).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod policy;

pub use config::{DreadboardConfig, GeminiConfig, SegmentationConfig};
pub use policy::RetryPolicy;
