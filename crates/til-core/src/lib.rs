//! Core types and trait definitions for the Today I Learned fact board.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod category;
pub mod error;
pub mod fact;
pub mod list;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
