//! Character sheet entity model and DTOs.

use loretable_core::stats::{self, AbilityScores, DerivedStats};
use loretable_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A character row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub class: String,
    pub race: String,
    pub level: i16,
    pub strength: i16,
    pub dexterity: i16,
    pub constitution: i16,
    pub intelligence: i16,
    pub wisdom: i16,
    pub charisma: i16,
    pub max_hit_points: i32,
    pub current_hit_points: i32,
    pub armor_class: i16,
    pub speed: i16,
    pub proficiencies: Vec<String>,
    pub backstory: Option<String>,
    pub appearance: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Character {
    /// Recompute the derived stat block from the stored fields.
    pub fn derived(&self) -> DerivedStats {
        let scores = AbilityScores {
            strength: self.strength,
            dexterity: self.dexterity,
            constitution: self.constitution,
            intelligence: self.intelligence,
            wisdom: self.wisdom,
            charisma: self.charisma,
        };
        stats::derive(&scores, self.level, &self.proficiencies)
    }
}

/// Character plus its derived stat block, as returned by every read.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSheet {
    #[serde(flatten)]
    pub character: Character,
    pub derived: DerivedStats,
}

impl From<Character> for CharacterSheet {
    fn from(character: Character) -> Self {
        let derived = character.derived();
        Self { character, derived }
    }
}

/// DTO for creating a new character.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub name: String,
    pub class: String,
    pub race: String,
    pub level: Option<i16>,
    pub strength: Option<i16>,
    pub dexterity: Option<i16>,
    pub constitution: Option<i16>,
    pub intelligence: Option<i16>,
    pub wisdom: Option<i16>,
    pub charisma: Option<i16>,
    pub max_hit_points: Option<i32>,
    pub current_hit_points: Option<i32>,
    pub armor_class: Option<i16>,
    pub speed: Option<i16>,
    pub proficiencies: Option<Vec<String>>,
    pub backstory: Option<String>,
    pub appearance: Option<String>,
}

/// DTO for updating an existing character. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCharacter {
    pub name: Option<String>,
    pub class: Option<String>,
    pub race: Option<String>,
    pub level: Option<i16>,
    pub strength: Option<i16>,
    pub dexterity: Option<i16>,
    pub constitution: Option<i16>,
    pub intelligence: Option<i16>,
    pub wisdom: Option<i16>,
    pub charisma: Option<i16>,
    pub max_hit_points: Option<i32>,
    pub current_hit_points: Option<i32>,
    pub armor_class: Option<i16>,
    pub speed: Option<i16>,
    pub proficiencies: Option<Vec<String>>,
    pub backstory: Option<String>,
    pub appearance: Option<String>,
}
