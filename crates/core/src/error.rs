use crate::membership::CampaignRole;
use crate::types::DbId;

/// Domain-level errors.
///
/// Every precondition failure in the membership, invite, and aggregate
/// engines maps to its own variant so the HTTP layer can translate each one
/// to a distinct status code and error code string. Nothing here is ever
/// coalesced into a generic error.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Invite lookup is by opaque code, so there is no id to report.
    #[error("Invite code not found")]
    InviteNotFound,

    /// The user has no `accepted` membership on the campaign.
    #[error("Not a member of this campaign")]
    NotCampaignMember,

    /// The user is a member but their role is below the required threshold.
    #[error("Requires campaign role {required} or higher")]
    NotPermitted { required: CampaignRole },

    /// The character exists but is not owned by the requesting user.
    #[error("Character is not owned by the requesting user")]
    CharacterNotOwned,

    /// A uniqueness invariant would be violated (duplicate link or row).
    #[error("{entity} already exists")]
    AlreadyExists { entity: &'static str },

    /// The redeeming user already holds an accepted membership.
    #[error("User is already a member of this campaign")]
    AlreadyMember,

    /// A status value outside the enumerated set was supplied.
    #[error("Invalid status value: {0}")]
    InvalidStatus(String),

    #[error("Invite has expired")]
    InviteExpired,

    #[error("Invite has already been redeemed")]
    InviteRedeemed,

    #[error("Invite has been revoked")]
    InviteRevoked,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
