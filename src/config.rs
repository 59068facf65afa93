//src/config.rs
use combat::PlannerConfig;
use error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Every tunable constant of the battle engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Cards drawn at the start of each round
    pub hand_size: usize,
    /// Rounds a played card stays out of the draw pool
    pub card_cooldown: u32,
    pub weaken_magnitude: u32,
    pub weaken_rounds: u32,
    pub poison_rounds: u32,
    pub regeneration_rounds: u32,
    /// Duration of the enemy's self-buff
    pub enrage_rounds: u32,
    /// Whether ManaSurge stops at max mana
    pub mana_surge_capped: bool,
    pub planner: PlannerConfig,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            hand_size: 3,
            card_cooldown: 3,
            weaken_magnitude: 3,
            weaken_rounds: 2,
            poison_rounds: 3,
            regeneration_rounds: 3,
            enrage_rounds: 2,
            mana_surge_capped: true,
            planner: PlannerConfig::default(),
        }
    }
}

impl BattleConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.hand_size == 0 {
            return Err(GameError::Config("hand_size must be at least 1".into()));
        }
        let planner = &self.planner;
        for (name, value) in [
            ("attack_threshold", planner.attack_threshold),
            ("buff_threshold", planner.buff_threshold),
        ] {
            if !(1..=100).contains(&value) {
                return Err(GameError::Config(format!(
                    "{} must be within 1..=100, got {}",
                    name, value
                )));
            }
        }
        if planner.boss_defend_percent > 100 {
            return Err(GameError::Config(format!(
                "boss_defend_percent must be at most 100, got {}",
                planner.boss_defend_percent
            )));
        }
        if planner.attack_threshold > planner.buff_threshold {
            return Err(GameError::Config(format!(
                "attack_threshold ({}) exceeds buff_threshold ({})",
                planner.attack_threshold, planner.buff_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BattleConfig::from_json_str(r#"{ "hand_size": 5 }"#).unwrap();
        assert_eq!(config.hand_size, 5);
        assert_eq!(config.card_cooldown, 3);
        assert_eq!(config.planner.attack_threshold, 60);
    }

    #[test]
    fn test_nested_planner_override() {
        let json = r#"{ "planner": { "attack_threshold": 100, "buff_threshold": 100 } }"#;
        let config = BattleConfig::from_json_str(json).unwrap();
        assert_eq!(config.planner.attack_threshold, 100);
        assert_eq!(config.planner.defend_heal, 5);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(matches!(
            BattleConfig::from_json_str(r#"{ "hand_size": 0 }"#),
            Err(GameError::Config(_))
        ));
        assert!(matches!(
            BattleConfig::from_json_str(r#"{ "planner": { "attack_threshold": 0 } }"#),
            Err(GameError::Config(_))
        ));
        assert!(matches!(
            BattleConfig::from_json_str(r#"{ "planner": { "attack_threshold": 90 } }"#),
            Err(GameError::Config(_))
        ));
        assert!(matches!(
            BattleConfig::from_json_str(r#"{ "planner": { "boss_defend_percent": 4000000000 } }"#),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            BattleConfig::from_json_str("{ hand_size"),
            Err(GameError::Json(_))
        ));
    }
}
