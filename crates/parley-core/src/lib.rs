//! parley-core
//!
//! Pure domain types and environment-backed settings.
//! No AWS SDK dependency, this is the shared vocabulary of the Parley system.

pub mod error;
pub mod models;
pub mod settings;
