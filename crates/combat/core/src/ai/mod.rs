//! AI decision engine for non-player combatants.
//!
//! [`decide`] is a pure function of an [`AiContext`] and an [`AiPolicy`]:
//! the same context always produces the same decision, so decisions can be
//! replayed from a recorded context.
//!
//! # Policies
//!
//! - **No enemies**: always Wait, whatever the behavior tag
//! - **Aggressive**: attack the living enemy with the lowest current health
//! - **Defensive**: aggressive until below the defensive threshold, then the
//!   configured fallback action
//! - **Support**: heal the most wounded of itself and its allies below the
//!   heal threshold, when able; otherwise aggressive
//! - **Cowardly**: flee below the flee threshold; otherwise aggressive
//! - **Chaotic**: attack the enemy picked by the injected roll; aggressive
//!   when no roll was injected
//!
//! Ties always go to the combatant listed first.

mod context;
mod policy;

use std::cmp::Ordering;

pub use context::AiContext;
pub use policy::{AiAction, AiBehavior, AiPolicy, is_below};

use crate::encounter::Combatant;
use crate::state::EntityId;

/// Action chosen for one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AiDecision {
    pub action: AiAction,
    pub target: Option<EntityId>,
    /// Short explanation for logs.
    pub reason: &'static str,
}

impl AiDecision {
    const fn new(action: AiAction, target: Option<EntityId>, reason: &'static str) -> Self {
        Self {
            action,
            target,
            reason,
        }
    }

    pub const fn wait(reason: &'static str) -> Self {
        Self::new(AiAction::Wait, None, reason)
    }
}

/// First enemy with the lowest current health.
fn weakest<'a>(enemies: &[&'a Combatant]) -> Option<&'a Combatant> {
    enemies.iter().copied().min_by_key(|c| c.health().current)
}

fn attack_weakest(ctx: &AiContext<'_>, reason: &'static str) -> AiDecision {
    match weakest(&ctx.enemies) {
        Some(target) => AiDecision::new(AiAction::Attack, Some(target.id()), reason),
        None => AiDecision::wait("no enemies visible"),
    }
}

/// Orders by remaining health fraction, lowest first, without floats.
fn by_fraction(a: &Combatant, b: &Combatant) -> Ordering {
    let (a, b) = (a.health(), b.health());
    (u64::from(a.current) * u64::from(b.maximum)).cmp(&(u64::from(b.current) * u64::from(a.maximum)))
}

fn most_wounded<'a>(candidates: impl Iterator<Item = &'a Combatant>, threshold: u32) -> Option<&'a Combatant> {
    candidates
        .filter(|c| is_below(c.health(), threshold))
        .reduce(|best, next| match by_fraction(next, best) {
            Ordering::Less => next,
            _ => best,
        })
}

/// Chooses an action for the actor in `ctx`.
pub fn decide(ctx: &AiContext<'_>, policy: &AiPolicy) -> AiDecision {
    let behavior = ctx.actor.behavior().unwrap_or_default();

    let decision = if !ctx.has_enemies() {
        AiDecision::wait("no enemies visible")
    } else {
        match behavior {
            AiBehavior::Aggressive => attack_weakest(ctx, "attacking weakest enemy"),

            AiBehavior::Defensive => {
                if is_below(ctx.actor.health(), policy.defensive_threshold_percent) {
                    match policy.defensive_fallback {
                        AiAction::Attack => attack_weakest(ctx, "defensive fallback is attack"),
                        action => AiDecision::new(action, None, "health below defensive threshold"),
                    }
                } else {
                    attack_weakest(ctx, "healthy enough to attack")
                }
            }

            AiBehavior::Support => {
                let patient = ctx.actor.heal_amount().and_then(|_| {
                    most_wounded(
                        std::iter::once(ctx.actor).chain(ctx.allies.iter().copied()),
                        policy.support_heal_threshold_percent,
                    )
                });
                match patient {
                    Some(patient) => {
                        AiDecision::new(AiAction::Heal, Some(patient.id()), "healing wounded ally")
                    }
                    None => attack_weakest(ctx, "no ally needs healing"),
                }
            }

            AiBehavior::Cowardly => {
                if is_below(ctx.actor.health(), policy.cowardly_flee_threshold_percent) {
                    AiDecision::new(AiAction::Flee, None, "health below flee threshold")
                } else {
                    attack_weakest(ctx, "attacking weakest enemy")
                }
            }

            AiBehavior::Chaotic => match ctx.roll {
                Some(roll) => {
                    let target = ctx.enemies[roll as usize % ctx.enemies.len()];
                    AiDecision::new(AiAction::Attack, Some(target.id()), "chaotic target pick")
                }
                None => attack_weakest(ctx, "no roll injected, attacking weakest"),
            },
        }
    };

    tracing::debug!(
        actor = %ctx.actor_id(),
        %behavior,
        round = ctx.round,
        action = %decision.action,
        target = ?decision.target,
        reason = decision.reason,
        "AI decision"
    );
    decision
}
