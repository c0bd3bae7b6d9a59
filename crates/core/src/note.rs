//! Note scoping.
//!
//! A note is either standalone or attached to exactly one entity. The
//! database stores the pair (`entity_type` text, `entity_id` bigint), both
//! null for standalone notes; [`NoteScope`] is the typed view, and unknown
//! entity kinds are rejected here at the boundary rather than deeper in.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// What a note is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity_type", content = "entity_id", rename_all = "snake_case")]
pub enum NoteScope {
    Campaign(DbId),
    Character(DbId),
    Scene(DbId),
    Map(DbId),
    Standalone,
}

impl NoteScope {
    /// Build a scope from the stored column pair.
    ///
    /// Both columns null means standalone; a type with a null id (or an
    /// unknown type string) is malformed and rejected.
    pub fn from_columns(
        entity_type: Option<&str>,
        entity_id: Option<DbId>,
    ) -> Result<Self, CoreError> {
        match (entity_type, entity_id) {
            (None, None) => Ok(Self::Standalone),
            (Some("campaign"), Some(id)) => Ok(Self::Campaign(id)),
            (Some("character"), Some(id)) => Ok(Self::Character(id)),
            (Some("scene"), Some(id)) => Ok(Self::Scene(id)),
            (Some("map"), Some(id)) => Ok(Self::Map(id)),
            (Some(other), _) => Err(CoreError::Validation(format!(
                "unknown note entity type: {other}"
            ))),
            (None, Some(_)) => Err(CoreError::Validation(
                "note entity_id set without entity_type".into(),
            )),
            (Some(_), None) => Err(CoreError::Validation(
                "note entity_type set without entity_id".into(),
            )),
        }
    }

    /// Decompose into the stored column pair.
    pub fn to_columns(self) -> (Option<&'static str>, Option<DbId>) {
        match self {
            Self::Campaign(id) => (Some("campaign"), Some(id)),
            Self::Character(id) => (Some("character"), Some(id)),
            Self::Scene(id) => (Some("scene"), Some(id)),
            Self::Map(id) => (Some("map"), Some(id)),
            Self::Standalone => (None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_round_trips_through_columns() {
        let scopes = [
            NoteScope::Standalone,
            NoteScope::Campaign(7),
            NoteScope::Character(3),
            NoteScope::Scene(12),
            NoteScope::Map(4),
        ];
        for scope in scopes {
            let (ty, id) = scope.to_columns();
            assert_eq!(NoteScope::from_columns(ty, id).unwrap(), scope);
        }
    }

    #[test]
    fn unknown_entity_type_is_rejected() {
        let err = NoteScope::from_columns(Some("token"), Some(1)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn half_set_column_pair_is_rejected() {
        assert!(NoteScope::from_columns(Some("campaign"), None).is_err());
        assert!(NoteScope::from_columns(None, Some(9)).is_err());
    }
}
