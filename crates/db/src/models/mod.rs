//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod campaign;
pub mod campaign_character;
pub mod character;
pub mod handout;
pub mod invite;
pub mod map;
pub mod membership;
pub mod note;
pub mod scene;
pub mod session;
pub mod token;
pub mod user;
