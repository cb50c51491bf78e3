//! Target resolution for player commands.
//!
//! Resolves a free-form token against the living enemies of an actor:
//! - empty: the first enemy
//! - `"2"`: the second enemy
//! - `"gob"`: the first enemy whose name starts with the token (flagged as
//!   ambiguous when several match)
//! - `"goblin 2"`: the second enemy matching `goblin`
//!
//! Enemies are listed in the order they joined the encounter. A trailing
//! index always counts living matches, however much of the name is typed,
//! so `"goblin 2"` and `"gob 2"` name the same enemy even after earlier
//! goblins fall. Without an index, an exact case-insensitive display-name
//! match wins over prefix matches.

use crate::encounter::{CombatEncounter, Combatant};
use crate::error::{CombatError, ErrorSeverity};
use crate::state::EntityId;

// ============================================================================
// Errors
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("no enemies")]
    NoEnemies,

    #[error("no enemy #{index}")]
    NoEnemyAtIndex { index: usize, available: usize },

    #[error("no enemy matches `{name}`")]
    NoMatch { name: String },

    #[error("no enemy `{name}` #{index} ({matches} match)")]
    NoMatchAtIndex {
        name: String,
        index: usize,
        matches: usize,
    },
}

impl CombatError for TargetError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEnemies => "TARGET_NO_ENEMIES",
            Self::NoEnemyAtIndex { .. } => "TARGET_NO_ENEMY_AT_INDEX",
            Self::NoMatch { .. } => "TARGET_NO_MATCH",
            Self::NoMatchAtIndex { .. } => "TARGET_NAME_INDEX_OUT_OF_RANGE",
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// A resolved target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetResolution {
    pub id: EntityId,
    pub display_name: String,
    /// The token matched more than one enemy and the first was chosen.
    pub ambiguous: bool,
    /// Number of enemies the token matched.
    pub matches: usize,
}

impl TargetResolution {
    fn of(combatant: &Combatant, matches: usize) -> Self {
        Self {
            id: combatant.id(),
            display_name: combatant.display_name().to_string(),
            ambiguous: matches > 1,
            matches,
        }
    }
}

/// Living enemies of `actor` in join order.
fn targetable(encounter: &CombatEncounter, actor: EntityId) -> Vec<&Combatant> {
    let mut enemies = encounter.enemies_of(actor);
    enemies.sort_by_key(|c| c.order());
    enemies
}

fn parse_index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(token.parse::<usize>().unwrap_or(usize::MAX))
}

fn name_matches(combatant: &Combatant, name: &str) -> bool {
    let starts_with = |candidate: &str| {
        candidate
            .get(..name.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(name))
    };
    starts_with(combatant.name()) || starts_with(combatant.display_name())
}

/// Resolves `token` to one living enemy of `actor`.
pub fn resolve_target(
    encounter: &CombatEncounter,
    actor: EntityId,
    token: &str,
) -> Result<TargetResolution, TargetError> {
    let token = token.trim();
    let enemies = targetable(encounter, actor);
    if enemies.is_empty() {
        return Err(TargetError::NoEnemies);
    }

    if token.is_empty() {
        return Ok(TargetResolution::of(enemies[0], 1));
    }

    if let Some(index) = parse_index(token) {
        return index
            .checked_sub(1)
            .and_then(|slot| enemies.get(slot))
            .map(|combatant| TargetResolution::of(combatant, 1))
            .ok_or(TargetError::NoEnemyAtIndex {
                index,
                available: enemies.len(),
            });
    }

    if let Some((name, suffix)) = token.rsplit_once(char::is_whitespace) {
        if let Some(index) = parse_index(suffix) {
            let name = name.trim_end();
            let matches: Vec<_> = enemies.iter().filter(|c| name_matches(c, name)).collect();
            if matches.is_empty() {
                return Err(TargetError::NoMatch {
                    name: name.to_string(),
                });
            }
            return index
                .checked_sub(1)
                .and_then(|slot| matches.get(slot))
                .map(|combatant| TargetResolution::of(combatant, 1))
                .ok_or(TargetError::NoMatchAtIndex {
                    name: name.to_string(),
                    index,
                    matches: matches.len(),
                });
        }
    }

    if let Some(exact) = enemies
        .iter()
        .find(|c| c.display_name().eq_ignore_ascii_case(token))
    {
        return Ok(TargetResolution::of(exact, 1));
    }

    let matches: Vec<_> = enemies.iter().filter(|c| name_matches(c, token)).collect();
    match matches.first() {
        None => Err(TargetError::NoMatch {
            name: token.to_string(),
        }),
        Some(first) => {
            let resolution = TargetResolution::of(first, matches.len());
            if resolution.ambiguous {
                tracing::debug!(
                    token,
                    matches = matches.len(),
                    chosen = %resolution.display_name,
                    "ambiguous target token"
                );
            }
            Ok(resolution)
        }
    }
}

/// `"[index] name"` lines for every living enemy of `actor`.
pub fn target_list(encounter: &CombatEncounter, actor: EntityId) -> Vec<String> {
    targetable(encounter, actor)
        .iter()
        .enumerate()
        .map(|(index, combatant)| format!("[{}] {}", index + 1, combatant.display_name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiBehavior;
    use crate::config::CombatConfig;
    use crate::dice::DiceRoller;
    use crate::encounter::{Monster, Participant, Player};

    const HERO: EntityId = EntityId(0);

    fn monster(id: u32, name: &str) -> Participant {
        Monster::new(EntityId(id), name, 20, 0, AiBehavior::Aggressive).into()
    }

    fn encounter(monsters: Vec<Participant>) -> CombatEncounter {
        let mut roller = DiceRoller::seeded(77);
        let roster = std::iter::once(Participant::from(Player::new(HERO, "Hero", 30, 1))).chain(monsters);
        CombatEncounter::assemble(&CombatConfig::default(), roster, &mut roller).unwrap()
    }

    fn three_goblins() -> CombatEncounter {
        encounter(vec![
            monster(1, "Goblin"),
            monster(2, "Goblin"),
            monster(3, "Goblin"),
        ])
    }

    #[test]
    fn empty_token_picks_first_enemy() {
        let found = resolve_target(&three_goblins(), HERO, "  ").unwrap();
        assert_eq!(found.id, EntityId(1));
        assert!(!found.ambiguous);
    }

    #[test]
    fn numeric_token_selects_by_position() {
        let found = resolve_target(&three_goblins(), HERO, "2").unwrap();
        assert_eq!(found.id, EntityId(2));
        assert_eq!(found.display_name, "Goblin 2");
    }

    #[test]
    fn numeric_token_out_of_range() {
        let encounter = encounter(vec![monster(1, "Goblin"), monster(2, "Orc")]);
        let err = resolve_target(&encounter, HERO, "5").unwrap_err();
        assert!(err.to_string().contains("no enemy #5"));
        assert_eq!(err.error_code(), "TARGET_NO_ENEMY_AT_INDEX");
        assert!(matches!(
            resolve_target(&encounter, HERO, "0"),
            Err(TargetError::NoEnemyAtIndex { index: 0, .. })
        ));
    }

    #[test]
    fn shared_name_is_ambiguous_but_succeeds() {
        let found = resolve_target(&three_goblins(), HERO, "goblin").unwrap();
        assert_eq!(found.id, EntityId(1));
        assert!(found.ambiguous);
        assert_eq!(found.matches, 3);
    }

    #[test]
    fn name_and_index_disambiguates() {
        let found = resolve_target(&three_goblins(), HERO, "gob 3").unwrap();
        assert_eq!(found.id, EntityId(3));
        assert!(!found.ambiguous);

        let spelled_out = resolve_target(&three_goblins(), HERO, "GOBLIN 2").unwrap();
        assert_eq!(spelled_out.id, EntityId(2));

        assert!(matches!(
            resolve_target(&three_goblins(), HERO, "goblin 4"),
            Err(TargetError::NoMatchAtIndex { index: 4, matches: 3, .. })
        ));
    }

    #[test]
    fn name_index_counts_living_matches_for_any_spelling() {
        let mut encounter = three_goblins();
        encounter.apply_damage(EntityId(1), 20).unwrap();
        assert_eq!(target_list(&encounter, HERO), vec!["[1] Goblin 2", "[2] Goblin 3"]);

        let full = resolve_target(&encounter, HERO, "goblin 2").unwrap();
        let short = resolve_target(&encounter, HERO, "gob 2").unwrap();
        assert_eq!(full.id, EntityId(3));
        assert_eq!(full.id, short.id);

        assert!(matches!(
            resolve_target(&encounter, HERO, "goblin 3"),
            Err(TargetError::NoMatchAtIndex { index: 3, matches: 2, .. })
        ));
    }

    #[test]
    fn exact_display_name_beats_prefix() {
        let encounter = encounter(vec![monster(1, "Goblin Shaman"), monster(2, "Goblin")]);
        let found = resolve_target(&encounter, HERO, "goblin").unwrap();
        assert_eq!(found.id, EntityId(2));
        assert!(!found.ambiguous);
    }

    #[test]
    fn unique_prefix_match() {
        let encounter = encounter(vec![monster(1, "Goblin"), monster(2, "Orc")]);
        let found = resolve_target(&encounter, HERO, "or").unwrap();
        assert_eq!(found.id, EntityId(2));
        assert!(!found.ambiguous);
    }

    #[test]
    fn unknown_name_fails() {
        let err = resolve_target(&three_goblins(), HERO, "dragon").unwrap_err();
        assert_eq!(err.to_string(), "no enemy matches `dragon`");
        assert!(matches!(
            resolve_target(&three_goblins(), HERO, "dragon 2"),
            Err(TargetError::NoMatch { .. })
        ));
    }

    #[test]
    fn defeated_enemies_are_not_targetable() {
        let mut encounter = three_goblins();
        encounter.apply_damage(EntityId(1), 20).unwrap();
        let found = resolve_target(&encounter, HERO, "1").unwrap();
        assert_eq!(found.id, EntityId(2));

        encounter.apply_damage(EntityId(2), 20).unwrap();
        encounter.apply_damage(EntityId(3), 20).unwrap();
        assert_eq!(resolve_target(&encounter, HERO, ""), Err(TargetError::NoEnemies));
    }

    #[test]
    fn list_is_numbered_from_one() {
        let encounter = encounter(vec![monster(1, "Goblin"), monster(2, "Goblin"), monster(3, "Skeleton")]);
        assert_eq!(
            target_list(&encounter, HERO),
            vec!["[1] Goblin 1", "[2] Goblin 2", "[3] Skeleton"]
        );
    }
}
