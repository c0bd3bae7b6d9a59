//! Derived 5e character statistics.
//!
//! Everything here is recomputed from stored fields on every read and is
//! never persisted as independent truth. Rules follow the SRD 5.1 tables.

use serde::Serialize;

/// The six stored ability scores.
#[derive(Debug, Clone, Copy)]
pub struct AbilityScores {
    pub strength: i16,
    pub dexterity: i16,
    pub constitution: i16,
    pub intelligence: i16,
    pub wisdom: i16,
    pub charisma: i16,
}

/// Derived fields attached to every character read.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DerivedStats {
    pub strength_mod: i16,
    pub dexterity_mod: i16,
    pub constitution_mod: i16,
    pub intelligence_mod: i16,
    pub wisdom_mod: i16,
    pub charisma_mod: i16,
    pub proficiency_bonus: i16,
    pub initiative: i16,
    pub passive_perception: i16,
}

/// Ability modifier: `floor((score - 10) / 2)`.
///
/// Integer division in Rust truncates toward zero, so use `div_euclid` to
/// keep the floor behaviour for scores below 10 (score 8 -> -1, 7 -> -2).
pub fn ability_modifier(score: i16) -> i16 {
    (score - 10).div_euclid(2)
}

/// Proficiency bonus by character level: +2 at levels 1-4, +3 at 5-8, etc.
pub fn proficiency_bonus(level: i16) -> i16 {
    2 + (level - 1) / 4
}

/// Compute all derived fields from stored scores, level, and the skill
/// proficiency list.
pub fn derive(scores: &AbilityScores, level: i16, proficiencies: &[String]) -> DerivedStats {
    let wisdom_mod = ability_modifier(scores.wisdom);
    let dexterity_mod = ability_modifier(scores.dexterity);
    let bonus = proficiency_bonus(level);

    let perception_proficient = proficiencies.iter().any(|p| p == "perception");

    DerivedStats {
        strength_mod: ability_modifier(scores.strength),
        dexterity_mod,
        constitution_mod: ability_modifier(scores.constitution),
        intelligence_mod: ability_modifier(scores.intelligence),
        wisdom_mod,
        charisma_mod: ability_modifier(scores.charisma),
        proficiency_bonus: bonus,
        initiative: dexterity_mod,
        passive_perception: 10 + wisdom_mod + if perception_proficient { bonus } else { 0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(str_: i16, dex: i16, con: i16, int: i16, wis: i16, cha: i16) -> AbilityScores {
        AbilityScores {
            strength: str_,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    #[test]
    fn modifier_floors_below_ten() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(12), 1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(7), -2);
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(20), 5);
        assert_eq!(ability_modifier(30), 10);
    }

    #[test]
    fn proficiency_bonus_steps_every_four_levels() {
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(8), 3);
        assert_eq!(proficiency_bonus(9), 4);
        assert_eq!(proficiency_bonus(12), 4);
        assert_eq!(proficiency_bonus(13), 5);
        assert_eq!(proficiency_bonus(17), 6);
        assert_eq!(proficiency_bonus(20), 6);
    }

    #[test]
    fn initiative_equals_dexterity_modifier() {
        let derived = derive(&scores(10, 16, 10, 10, 10, 10), 1, &[]);
        assert_eq!(derived.initiative, 3);
    }

    #[test]
    fn passive_perception_adds_proficiency_only_when_proficient() {
        let s = scores(10, 10, 10, 10, 14, 10);

        let untrained = derive(&s, 5, &[]);
        assert_eq!(untrained.passive_perception, 12);

        let trained = derive(&s, 5, &["perception".to_string()]);
        assert_eq!(trained.passive_perception, 15);

        // Other proficiencies do not count.
        let other = derive(&s, 5, &["stealth".to_string(), "arcana".to_string()]);
        assert_eq!(other.passive_perception, 12);
    }
}
