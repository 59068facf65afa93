// src/combat/src/lib.rs

use cards::{Card, CardId};
use std::fmt;

pub mod combatant;
pub mod effect;
pub mod enemy;
pub mod intent;
pub mod rng;
pub mod status_effect;

pub use crate::combatant::HasHealth;
pub use crate::effect::{StatusEffect, StatusKind};
pub use crate::enemy::{Enemy, EnemyKind, IntentKind};
pub use crate::intent::{IntentPlanner, PlannerConfig};
pub use crate::rng::{BattleRng, Dice, ScriptedDice};
pub use crate::status_effect::{StatusBearer, StatusEvent, StatusLedger, tick};

/// Shared combat formulas
pub struct Combat;

mod constants {
    pub const CRIT_MULTIPLIER: u32 = 2; // Critical damage multiplier
    pub const DODGE_PER_AGILITY: f64 = 0.5; // Dodge percentage per agility point
    pub const DODGE_CAP: f64 = 50.0; // Maximum dodge percentage
}

impl Combat {
    /// Crit chance in percentage points; one point per intelligence, uncapped
    pub fn crit_chance(intelligence: u32) -> f64 {
        intelligence as f64
    }

    /// Dodge chance in percentage points, capped at 50
    pub fn dodge_chance(agility: u32) -> f64 {
        (agility as f64 * constants::DODGE_PER_AGILITY).min(constants::DODGE_CAP)
    }

    /// Roll against a percentage chance; a chance of 0 never succeeds and
    /// 100 or more always does.
    pub fn roll_chance<D: Dice + ?Sized>(dice: &mut D, chance: f64) -> bool {
        (dice.roll_percent() as f64) < chance
    }

    pub fn apply_crit(damage: u32) -> u32 {
        damage.saturating_mul(constants::CRIT_MULTIPLIER)
    }

    /// Split `damage` against an armor pool.
    /// Returns `(armor_left, damage_through)`.
    pub fn absorb(damage: u32, armor: u32) -> (u32, u32) {
        if damage >= armor {
            (0, damage - armor)
        } else {
            (armor - damage, 0)
        }
    }
}

/// Why an action was refused; the battle state is untouched when one is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    InsufficientMana { needed: u32, available: u32 },
    OnCooldown { remaining: u32 },
    NotInDeck,
    /// Ready and in the deck, but not among the cards drawn this round
    NotInHand,
    BattleOver,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::InsufficientMana { needed, available } => write!(
                f,
                "Not enough mana ({} needed, {} available)",
                needed, available
            ),
            Rejection::OnCooldown { remaining } => {
                write!(f, "That card is on cooldown for {} more round(s)", remaining)
            }
            Rejection::NotInDeck => write!(f, "That card is not in your deck"),
            Rejection::NotInHand => write!(f, "That card is not in your hand"),
            Rejection::BattleOver => write!(f, "The battle is already over"),
        }
    }
}

/// Outcome of one resolution call, for the caller to narrate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatResult {
    pub message: String,
    pub damage_dealt: u32,
    pub healed: u32,
    pub armor_gained: u32,
    pub is_crit: bool,
    pub is_dodge: bool,
    pub is_stunned: bool,
    /// Narration of a Power card's secondary effect
    pub ability_message: Option<String>,
    /// Extra card granted to the hand by a Draw ability
    pub drawn: Option<Card>,
    pub rejection: Option<Rejection>,
}

impl CombatResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn rejected(rejection: Rejection) -> Self {
        Self {
            message: rejection.to_string(),
            rejection: Some(rejection),
            ..Self::default()
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    pub fn drawn_id(&self) -> Option<CardId> {
        self.drawn.as_ref().map(Card::id)
    }
}
