//! Map token entity model and DTOs.

use loretable_core::token::TokenLayer;
use loretable_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A token row from the `map_tokens` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MapToken {
    pub id: DbId,
    pub map_id: DbId,
    /// Absent for NPC tokens.
    pub character_id: Option<DbId>,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub layer: TokenLayer,
    pub audience: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new token.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateToken {
    pub character_id: Option<DbId>,
    pub name: String,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub layer: Option<TokenLayer>,
    pub audience: Option<Vec<String>>,
}

/// DTO for updating an existing token. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateToken {
    pub name: Option<String>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub layer: Option<TokenLayer>,
    pub audience: Option<Vec<String>>,
}
