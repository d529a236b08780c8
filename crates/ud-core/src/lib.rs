//! # ud-core
//!
//! Core types and utilities for UserDir RS.
//!
//! This crate provides the foundational building blocks used across all other
//! crates:
//! - Validation error collection
//! - The contract (validator) seam
//! - Application configuration

pub mod config;
pub mod contract;
pub mod error;

pub use config::*;
pub use contract::*;
pub use error::*;

/// Primary key type for stored records.
pub type Id = i64;
