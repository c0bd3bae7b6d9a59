//! Map token vocabulary and visibility rules.

use serde::{Deserialize, Serialize};

use crate::membership::CampaignRole;

/// Visibility tier of a token on a map.
///
/// `gm` tokens are confidential: they are stripped from aggregate views for
/// `viewer`-role callers before the data leaves the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "token_layer", rename_all = "snake_case")]
pub enum TokenLayer {
    Map,
    Object,
    Token,
    Gm,
}

/// Whether a caller with `role` may see tokens on `layer`.
///
/// Owners and editors see everything including the `gm` layer; viewers
/// never see `gm` tokens.
pub fn layer_visible_to(layer: TokenLayer, role: CampaignRole) -> bool {
    match layer {
        TokenLayer::Gm => role >= CampaignRole::Editor,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gm_layer_is_hidden_from_viewers() {
        assert!(!layer_visible_to(TokenLayer::Gm, CampaignRole::Viewer));
        assert!(layer_visible_to(TokenLayer::Gm, CampaignRole::Editor));
        assert!(layer_visible_to(TokenLayer::Gm, CampaignRole::Owner));
    }

    #[test]
    fn non_gm_layers_are_visible_to_everyone() {
        for layer in [TokenLayer::Map, TokenLayer::Object, TokenLayer::Token] {
            assert!(layer_visible_to(layer, CampaignRole::Viewer));
            assert!(layer_visible_to(layer, CampaignRole::Owner));
        }
    }
}
