// src/combat/src/intent.rs

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combatant::HasHealth;
use crate::enemy::{Enemy, IntentKind};
use crate::rng::Dice;

/// Thresholds and magnitudes the planner works with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Rolls in `[1, attack_threshold]` become an attack
    pub attack_threshold: u32,
    /// Heal carried by a Defend intent
    pub defend_heal: u32,
    /// Bosses heal this percentage of max HP on Defend when that beats `defend_heal`
    pub boss_defend_percent: u32,
    /// Rolls above this become a Buff for enemies able to buff
    pub buff_threshold: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            attack_threshold: 60,
            defend_heal: 5,
            boss_defend_percent: 5,
            buff_threshold: 85,
        }
    }
}

/// Picks the enemy's next telegraphed action
#[derive(Debug, Clone, Default)]
pub struct IntentPlanner {
    config: PlannerConfig,
}

impl IntentPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Decide the next intent for `enemy` without touching it
    pub fn plan_for<D: Dice + ?Sized>(&self, enemy: &Enemy, dice: &mut D) -> (IntentKind, u32) {
        let roll = dice.roll_percent() + 1;

        let planned = if roll <= self.config.attack_threshold {
            let jitter = dice.roll_between(-1, 1);
            (
                IntentKind::Attack,
                enemy.base_damage().saturating_add_signed(jitter),
            )
        } else if enemy.can_buff() && roll > self.config.buff_threshold {
            (IntentKind::Buff, 2 + enemy.base_damage() / 4)
        } else {
            (IntentKind::Defend, self.defend_value(enemy))
        };

        debug!(enemy = enemy.name(), roll, intent = %planned.0, value = planned.1, "intent planned");
        planned
    }

    /// Roll and store the next intent on `enemy`
    pub fn plan<D: Dice + ?Sized>(&self, enemy: &mut Enemy, dice: &mut D) -> IntentKind {
        let (intent, value) = self.plan_for(enemy, dice);
        enemy.set_intent(intent, value);
        intent
    }

    fn defend_value(&self, enemy: &Enemy) -> u32 {
        if enemy.is_boss() {
            let scaled = enemy.max_hp().saturating_mul(self.config.boss_defend_percent) / 100;
            scaled.max(self.config.defend_heal)
        } else {
            self.config.defend_heal
        }
    }
}
