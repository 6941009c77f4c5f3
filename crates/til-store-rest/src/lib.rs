//! HTTP backend for the fact table.
//!
//! Talks to any PostgREST-compatible `/rest/v1/facts` endpoint: a hosted
//! Supabase project or a local `til-server`.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{RestConfig, RestStore};
