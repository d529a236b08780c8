//! Request handlers

pub mod users;
