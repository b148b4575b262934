//! Search, filtering, review and recommendation logic for Nomad Korea,
//! a directory of Korean cities reviewed by remote workers.
//!
//! The pure modules (`search`, `filters`, `reviews`, `recommend`) work on
//! plain slices. `sources` fetches data from Supabase or a local snapshot,
//! and `storage` keeps per-user state such as search history.

pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod recommend;
pub mod reviews;
pub mod search;
pub mod sources;
pub mod storage;

#[cfg(test)]
mod fixtures;

pub use error::{Error, Result};
