// src/combat/src/enemy.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::combatant::{HasHealth, drain, restore};
use crate::effect::StatusKind;
use crate::status_effect::{StatusBearer, StatusLedger};

/// Boss 创建时的属性倍率，单位十分之一（生命 x1.8，伤害 x1.4）
const BOSS_HP_SCALE: u32 = 18;
const BOSS_DAMAGE_SCALE: u32 = 14;

/// 竞技场每5波出现一次 Boss
const ARENA_BOSS_EVERY: u32 = 5;

/// 敌人下回合的意图
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
pub enum IntentKind {
    Attack,
    Defend,
    Buff,
}

/// 敌人实体
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    name: String,
    hp: u32,
    max_hp: u32,
    base_damage: u32,
    is_boss: bool,
    can_buff: bool,
    intent: IntentKind,
    intent_value: u32,
    statuses: StatusLedger,
}

/// 旅程各阶段的敌人
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
pub enum EnemyKind {
    #[strum(to_string = "Green Slime")]
    GreenSlime,
    #[strum(to_string = "Goblin Scout")]
    GoblinScout,
    #[strum(to_string = "Orc Warlord")]
    OrcWarlord,
}

impl EnemyKind {
    /// (生命, 伤害, 是否Boss)，未计算 Boss 倍率
    fn stats(self) -> (u32, u32, bool) {
        match self {
            EnemyKind::GreenSlime => (30, 4, false),
            EnemyKind::GoblinScout => (50, 8, false),
            EnemyKind::OrcWarlord => (67, 9, true),
        }
    }
}

impl Enemy {
    /// 创建满血敌人
    ///
    /// Boss 在此放大生命和伤害，并可以使用增益意图。
    /// 初始意图为基础伤害的普通攻击。
    pub fn new(name: impl Into<String>, hp: u32, damage: u32, is_boss: bool) -> Self {
        let (max_hp, base_damage) = if is_boss {
            (
                hp.saturating_mul(BOSS_HP_SCALE) / 10,
                damage.saturating_mul(BOSS_DAMAGE_SCALE) / 10,
            )
        } else {
            (hp, damage)
        };
        Self {
            name: name.into(),
            hp: max_hp,
            max_hp,
            base_damage,
            is_boss,
            can_buff: is_boss,
            intent: IntentKind::Attack,
            intent_value: base_damage,
            statuses: StatusLedger::new(),
        }
    }

    pub fn from_kind(kind: EnemyKind) -> Self {
        let (hp, damage, is_boss) = kind.stats();
        Self::new(kind.to_string(), hp, damage, is_boss)
    }

    /// 竞技场第 `wave` 波的对手（从1开始）
    pub fn arena_wave(wave: u32) -> Self {
        let wave = wave.max(1);
        let hp = 25 + wave * 15 + wave * wave * 2;
        let damage = 3 + wave * 2;
        let is_boss = wave % ARENA_BOSS_EVERY == 0;
        let name = if is_boss {
            format!("Arena Champion Lv.{}", wave)
        } else {
            format!("Arena Fighter Lv.{}", wave)
        };
        Self::new(name, hp, damage, is_boss)
    }

    pub fn base_damage(&self) -> u32 {
        self.base_damage
    }

    pub fn is_boss(&self) -> bool {
        self.is_boss
    }

    pub fn can_buff(&self) -> bool {
        self.can_buff
    }

    pub fn intent(&self) -> IntentKind {
        self.intent
    }

    pub fn intent_value(&self) -> u32 {
        self.intent_value
    }

    pub fn set_intent(&mut self, intent: IntentKind, value: u32) {
        self.intent = intent;
        self.intent_value = value;
    }

    /// 计入狂怒和虚弱后的实际攻击伤害
    pub fn attack_damage(&self) -> u32 {
        self.intent_value
            .saturating_add(self.statuses.magnitude(StatusKind::Enraged))
            .saturating_sub(self.statuses.magnitude(StatusKind::Weaken))
    }

    /// 意图显示文本，如 `Attack (8)`
    pub fn intent_label(&self) -> String {
        format!("{} ({})", self.intent, self.intent_value)
    }
}

impl HasHealth for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn hp(&self) -> u32 {
        self.hp
    }

    fn max_hp(&self) -> u32 {
        self.max_hp
    }

    fn lose_health(&mut self, amount: u32) -> u32 {
        drain(&mut self.hp, amount)
    }

    fn heal(&mut self, amount: u32) -> u32 {
        restore(&mut self.hp, self.max_hp, amount)
    }
}

impl StatusBearer for Enemy {
    fn statuses(&self) -> &StatusLedger {
        &self.statuses
    }

    fn statuses_mut(&mut self) -> &mut StatusLedger {
        &mut self.statuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::StatusEffect;

    #[test]
    fn test_enemy_creation() {
        let slime = Enemy::from_kind(EnemyKind::GreenSlime);
        assert_eq!(slime.name(), "Green Slime");
        assert_eq!(slime.hp(), 30);
        assert_eq!(slime.base_damage(), 4);
        assert!(!slime.is_boss());
        assert_eq!(slime.intent(), IntentKind::Attack);
        assert_eq!(slime.intent_value(), 4);
    }

    #[test]
    fn test_boss_scaling_at_creation() {
        let orc = Enemy::from_kind(EnemyKind::OrcWarlord);
        assert!(orc.is_boss());
        assert!(orc.can_buff());
        assert_eq!(orc.max_hp(), 120);
        assert_eq!(orc.base_damage(), 12);
    }

    #[test]
    fn test_arena_waves() {
        let first = Enemy::arena_wave(1);
        assert_eq!(first.name(), "Arena Fighter Lv.1");
        assert_eq!(first.max_hp(), 42);
        assert_eq!(first.base_damage(), 5);

        let fifth = Enemy::arena_wave(5);
        assert!(fifth.is_boss());
        assert_eq!(fifth.name(), "Arena Champion Lv.5");
        // 25 + 75 + 50 = 150，x1.8；13 x1.4
        assert_eq!(fifth.max_hp(), 270);
        assert_eq!(fifth.base_damage(), 18);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut enemy = Enemy::new("Dummy", 40, 5, false);
        enemy.lose_health(3);
        assert_eq!(enemy.heal(10), 3);
        assert_eq!(enemy.hp(), 40);
    }

    #[test]
    fn test_damage_never_negative() {
        let mut enemy = Enemy::new("Dummy", 10, 5, false);
        assert_eq!(enemy.take_damage(25), 10);
        assert_eq!(enemy.hp(), 0);
        assert!(enemy.is_dead());
    }

    #[test]
    fn test_attack_damage_modifiers() {
        let mut enemy = Enemy::new("Dummy", 40, 8, false);
        assert_eq!(enemy.attack_damage(), 8);

        enemy.add_status(StatusEffect::new(StatusKind::Weaken, 3, 2));
        assert_eq!(enemy.attack_damage(), 5);

        enemy.add_status(StatusEffect::new(StatusKind::Enraged, 4, 2));
        assert_eq!(enemy.attack_damage(), 9);

        enemy.set_intent(IntentKind::Attack, 1);
        enemy.statuses_mut().remove(StatusKind::Enraged);
        assert_eq!(enemy.attack_damage(), 0);
    }

    #[test]
    fn test_intent_label() {
        let mut enemy = Enemy::from_kind(EnemyKind::GoblinScout);
        assert_eq!(enemy.intent_label(), "Attack (8)");
        enemy.set_intent(IntentKind::Defend, 5);
        assert_eq!(enemy.intent_label(), "Defend (5)");
    }
}
