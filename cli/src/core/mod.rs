//! # Ketch Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by the library and the binary:
//! - `config`: configuration loading, merging and validation (binary defaults)
//! - `error`: `LaunchError`, `KetchError` and the `Result` alias
//!
//! ## Usage
//!
//! ```ignore
//! use ketch::core::config; // For loading configuration
//! use ketch::core::error::{KetchError, LaunchError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
