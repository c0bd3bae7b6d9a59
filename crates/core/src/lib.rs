//! Loretable domain core.
//!
//! Pure domain types and logic shared by the persistence and API layers:
//! campaign/membership/invite vocabulary, derived character statistics,
//! token visibility rules, and note scoping. No I/O happens here; everything
//! in this crate is deterministic and unit-testable.

pub mod campaign;
pub mod error;
pub mod invite;
pub mod membership;
pub mod note;
pub mod portrait;
pub mod stats;
pub mod token;
pub mod types;
