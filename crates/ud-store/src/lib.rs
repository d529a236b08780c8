//! # ud-store
//!
//! Persistence layer for UserDir RS.
//!
//! This crate provides:
//!
//! - The [`User`] model and its validated candidate state [`UserAttributes`]
//! - The [`UserStore`] seam with a typed conflict error
//! - A PostgreSQL implementation ([`PgUserStore`]) backed by SQLx
//! - An in-memory implementation ([`MemoryUserStore`]) used by tests and
//!   database-less runs
//! - The [`UserContract`] validator
//!
//! The PostgreSQL schema lives in `schema.sql` next to this crate.

pub mod contract;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;
pub mod user;

pub use contract::UserContract;
pub use memory::MemoryUserStore;
pub use pool::Database;
pub use postgres::PgUserStore;
pub use store::{StoreError, StoreResult, UserStore};
pub use user::{User, UserAttributes};
