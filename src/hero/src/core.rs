// src/hero/src/core.rs
use cards::{Card, CardId, CardLibrary};
use combat::{Combat, HasHealth, StatusLedger};
use items::{Item, Weapon};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// 每级增加的生命上限
const HP_PER_LEVEL: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeroError {
    #[error("invalid inventory index {0}")]
    InvalidIndex(usize),
    #[error("{0} cannot be used")]
    UnusableItem(String),
    #[error("not enough gold ({needed} needed, {available} available)")]
    NotEnoughGold { needed: u32, available: u32 },
}

/// 玩家角色，跨战斗保留
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,

    // 基础属性
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,

    // 资源池
    pub(crate) max_hp: u32,
    pub(crate) hp: u32,
    pub max_mana: u32,
    pub(crate) current_mana: u32,
    pub(crate) armor: u32,

    // 成长系统
    pub gold: u32,
    pub xp: u32,
    pub level: u32,

    pub equipped_weapon: Option<Weapon>,
    pub master_deck: Vec<Card>,
    pub inventory: Vec<Item>,
    pub(crate) statuses: StatusLedger,
}

impl Player {
    /// 创建1级角色，携带初始卡组
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strength: 10,
            agility: 10,
            intelligence: 10,
            max_hp: 100,
            hp: 100,
            max_mana: 3,
            current_mana: 3,
            armor: 0,
            gold: 0,
            xp: 0,
            level: 1,
            equipped_weapon: None,
            master_deck: CardLibrary::starter_deck(),
            inventory: Vec::new(),
            statuses: StatusLedger::new(),
        }
    }

    pub fn with_stats(mut self, strength: u32, agility: u32, intelligence: u32) -> Self {
        self.strength = strength;
        self.agility = agility;
        self.intelligence = intelligence;
        self
    }

    /// 设置生命上限并回满
    pub fn with_max_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp;
        self.hp = max_hp;
        self
    }

    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.master_deck = deck;
        self
    }

    pub fn with_max_mana(mut self, max_mana: u32) -> Self {
        self.max_mana = max_mana;
        self.current_mana = max_mana;
        self
    }

    /// 力量加武器加成
    pub fn total_damage(&self) -> u32 {
        self.strength
            .saturating_add(self.equipped_weapon.as_ref().map_or(0, Weapon::damage_bonus))
    }

    pub fn crit_chance(&self) -> f64 {
        Combat::crit_chance(self.intelligence)
    }

    pub fn dodge_chance(&self) -> f64 {
        Combat::dodge_chance(self.agility)
    }

    pub fn current_mana(&self) -> u32 {
        self.current_mana
    }

    /// 法力足够时扣除 `cost`，否则不变
    pub fn spend_mana(&mut self, cost: u32) -> bool {
        if cost > self.current_mana {
            return false;
        }
        self.current_mana -= cost;
        true
    }

    /// 返回实际获得的法力
    pub fn gain_mana(&mut self, amount: u32, capped: bool) -> u32 {
        let before = self.current_mana;
        self.current_mana = if capped {
            self.current_mana
                .saturating_add(amount)
                .min(self.max_mana.max(before))
        } else {
            self.current_mana.saturating_add(amount)
        };
        self.current_mana - before
    }

    pub fn refill_mana(&mut self) {
        self.current_mana = self.max_mana;
    }

    pub fn armor(&self) -> u32 {
        self.armor
    }

    pub fn add_armor(&mut self, amount: u32) {
        self.armor = self.armor.saturating_add(amount);
    }

    pub fn reset_armor(&mut self) {
        self.armor = 0;
    }

    /// 回满生命并清理战斗残留
    pub fn rest(&mut self) {
        self.hp = self.max_hp;
        self.armor = 0;
        self.current_mana = self.max_mana;
        self.statuses.clear();
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.master_deck.iter().find(|c| c.id() == id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.master_deck.iter_mut().find(|c| c.id() == id)
    }

    pub fn xp_for_next_level(&self) -> u32 {
        50 + 50 * self.level
    }

    /// 获取经验值，返回是否升级
    pub fn gain_xp(&mut self, amount: u32) -> bool {
        self.xp = self.xp.saturating_add(amount);
        let mut levelled = false;
        while self.xp >= self.xp_for_next_level() {
            self.xp -= self.xp_for_next_level();
            self.level_up();
            levelled = true;
        }
        levelled
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.max_hp += HP_PER_LEVEL;
        self.hp += HP_PER_LEVEL;
        info!(player = %self.name, level = self.level, "level up");
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn spend_gold(&mut self, amount: u32) -> Result<(), HeroError> {
        if self.gold < amount {
            return Err(HeroError::NotEnoughGold {
                needed: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }

    /// 使用背包中的消耗品，返回恢复的生命值
    pub fn use_consumable(&mut self, index: usize) -> Result<u32, HeroError> {
        let item = self
            .inventory
            .get(index)
            .ok_or(HeroError::InvalidIndex(index))?;
        let heal = match item {
            Item::Potion(potion) => potion.heal_amount,
            other => return Err(HeroError::UnusableItem(other.name().to_string())),
        };
        self.inventory.remove(index);
        Ok(self.heal(heal))
    }

    /// 装备武器，原武器放回背包
    pub fn equip_weapon(&mut self, index: usize) -> Result<(), HeroError> {
        match self.inventory.get(index) {
            Some(Item::Weapon(_)) => {}
            Some(other) => return Err(HeroError::UnusableItem(other.name().to_string())),
            None => return Err(HeroError::InvalidIndex(index)),
        }
        if let Item::Weapon(weapon) = self.inventory.remove(index) {
            if let Some(old) = self.equipped_weapon.replace(weapon) {
                self.inventory.push(Item::Weapon(old));
            }
        }
        Ok(())
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new("Adventurer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use items::Potion;

    #[test]
    fn test_default_stats() {
        let player = Player::new("Hero");
        assert_eq!(player.hp(), 100);
        assert_eq!(player.current_mana(), 3);
        assert_eq!(player.total_damage(), 10);
        assert_eq!(player.crit_chance(), 10.0);
        assert_eq!(player.dodge_chance(), 5.0);
        assert_eq!(player.master_deck.len(), 10);
    }

    #[test]
    fn test_weapon_adds_damage() {
        let mut player = Player::new("Hero");
        player.inventory.push(Item::Weapon(Weapon::new("Iron Sword", 3, 100)));
        player.equip_weapon(0).unwrap();
        assert_eq!(player.total_damage(), 13);
        assert!(player.inventory.is_empty());

        player.inventory.push(Item::Weapon(Weapon::new("Steel Blade", 8, 160)));
        player.equip_weapon(0).unwrap();
        assert_eq!(player.total_damage(), 18);
        assert_eq!(player.inventory.len(), 1);
    }

    #[test]
    fn test_mana_spending() {
        let mut player = Player::new("Hero");
        assert!(!player.spend_mana(4));
        assert_eq!(player.current_mana(), 3);
        assert!(player.spend_mana(2));
        assert_eq!(player.gain_mana(5, true), 2);
        assert_eq!(player.current_mana(), 3);
        assert_eq!(player.gain_mana(5, false), 5);
        assert_eq!(player.current_mana(), 8);
    }

    #[test]
    fn test_level_up() {
        let mut player = Player::new("Hero");
        assert_eq!(player.xp_for_next_level(), 100);
        assert!(!player.gain_xp(60));
        assert!(player.gain_xp(60));
        assert_eq!(player.level, 2);
        assert_eq!(player.xp, 20);
        assert_eq!(player.max_hp(), 105);
    }

    #[test]
    fn test_use_consumable() {
        let mut player = Player::new("Hero");
        player.take_damage(40);
        player.inventory.push(Item::Potion(Potion::new("Small Potion", 30, 15)));
        player.inventory.push(Item::Weapon(Weapon::new("Iron Sword", 3, 100)));

        assert_eq!(player.use_consumable(0), Ok(30));
        assert_eq!(player.hp(), 90);
        assert_eq!(
            player.use_consumable(0),
            Err(HeroError::UnusableItem("Iron Sword".into()))
        );
        assert_eq!(player.use_consumable(5), Err(HeroError::InvalidIndex(5)));
    }

    #[test]
    fn test_spend_gold() {
        let mut player = Player::new("Hero");
        player.add_gold(20);
        assert!(player.spend_gold(30).is_err());
        assert!(player.spend_gold(15).is_ok());
        assert_eq!(player.gold, 5);
    }
}
