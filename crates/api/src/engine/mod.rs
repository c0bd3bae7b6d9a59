//! Core service engines.
//!
//! The engines are the single source of truth for campaign collaboration
//! rules; HTTP handlers are thin glue over them. Each operation is scoped to
//! one request and delegates all cross-request coordination to the
//! database's transactional guarantees -- there is no in-process shared
//! state to go stale.

pub mod aggregate;
pub mod invite;
pub mod membership;
