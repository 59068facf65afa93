//! Shared builders for battle integration tests.
//!
//! Every scenario runs on `ScriptedDice` so crit, dodge and intent rolls are
//! pinned by the test itself.
#![allow(dead_code)]

use cards::{Ability, Card, CardType};
use combat::{Enemy, IntentKind};
use hero::Player;

/// 100 HP, 10/10/10, 3 mana, with the given deck
pub fn player_with(deck: Vec<Card>) -> Player {
    Player::new("Tester").with_deck(deck)
}

/// Non-boss enemy telegraphing an attack of `damage`
pub fn dummy(hp: u32, damage: u32) -> Enemy {
    let mut enemy = Enemy::new("Training Dummy", hp, damage, false);
    enemy.set_intent(IntentKind::Attack, damage);
    enemy
}

pub fn strike(value: u32) -> Card {
    Card::new("Strike", 1, CardType::Attack, value)
}

pub fn guard(value: u32) -> Card {
    Card::new("Defend", 1, CardType::Defense, value)
}

pub fn power(ability: Ability, value: u32) -> Card {
    Card::new(ability.to_string(), 1, CardType::Power, value).with_ability(ability)
}

/// `n` distinct strike cards
pub fn strikes(n: usize) -> Vec<Card> {
    (0..n).map(|_| strike(6)).collect()
}
