//src/cards/src/card.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use strum::{Display, EnumIter, EnumString};

static NEXT_CARD_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one card instance. Two deck entries never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(u64);

impl CardId {
    /// Allocate a fresh, process-unique id
    pub fn mint() -> Self {
        CardId(NEXT_CARD_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Move the allocator past an id that entered the process from outside
    /// (e.g. a decoded snapshot) so later mints cannot collide with it.
    pub fn observe(id: CardId) {
        NEXT_CARD_ID.fetch_max(id.0.saturating_add(1), Ordering::Relaxed);
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
pub enum CardType {
    Attack,
    Defense,
    Power,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// Secondary effect carried by a Power card
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum Ability {
    #[default]
    None,
    ManaSurge,
    Weaken,
    Draw,
    Stun,
    Fortify,
    Regenerate,
    Poison,
}

/// What playing a card does, as one closed union. The engine matches on this
/// exhaustively, so a new ability cannot slip through unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEffect {
    Attack(u32),
    Defense(u32),
    Power(Ability, u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    name: String,
    description: String,
    cost: u32,
    card_type: CardType,
    value: u32,
    rarity: Rarity,
    ability: Ability,
    cooldown_turns: u32,
}

impl Card {
    /// Create a common card with the default description for its type
    pub fn new(name: impl Into<String>, cost: u32, card_type: CardType, value: u32) -> Self {
        let description = match card_type {
            CardType::Attack => format!("Deal {} damage.", value),
            _ => format!("Earn {} armor.", value),
        };
        Self {
            id: CardId::mint(),
            name: name.into(),
            description,
            cost,
            card_type,
            value,
            rarity: Rarity::Common,
            ability: Ability::None,
            cooldown_turns: 0,
        }
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.ability = ability;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Copy of this card under a new identity with no cooldown.
    ///
    /// Plain `clone()` keeps the id and is only a snapshot of the same
    /// instance; anything granted into a deck must go through here.
    pub fn reissue(&self) -> Self {
        Self {
            id: CardId::mint(),
            cooldown_turns: 0,
            ..self.clone()
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn ability(&self) -> Ability {
        self.ability
    }

    pub fn effect(&self) -> CardEffect {
        match self.card_type {
            CardType::Attack => CardEffect::Attack(self.value),
            CardType::Defense => CardEffect::Defense(self.value),
            CardType::Power => CardEffect::Power(self.ability, self.value),
        }
    }

    /// Remaining rounds before the card can be drawn again
    pub fn cooldown(&self) -> u32 {
        self.cooldown_turns
    }

    pub fn set_cooldown(&mut self, turns: u32) {
        self.cooldown_turns = turns;
    }

    /// Decrement the cooldown by one round; returns true if the card just became ready
    pub fn tick_cooldown(&mut self) -> bool {
        if self.cooldown_turns > 0 {
            self.cooldown_turns -= 1;
            self.cooldown_turns == 0
        } else {
            false
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_turns == 0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] ({} mana) - {}", self.name, self.rarity, self.cost, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_descriptions() {
        let strike = Card::new("Strike", 1, CardType::Attack, 6);
        assert_eq!(strike.description(), "Deal 6 damage.");

        let defend = Card::new("Defend", 1, CardType::Defense, 5);
        assert_eq!(defend.description(), "Earn 5 armor.");
    }

    #[test]
    fn test_description_override() {
        let card = Card::new("Hex", 1, CardType::Power, 0)
            .with_ability(Ability::Weaken)
            .with_description("Weaken the enemy.");
        assert_eq!(card.description(), "Weaken the enemy.");
    }

    #[test]
    fn test_reissue_has_new_identity_and_no_cooldown() {
        let mut original = Card::new("Execute", 2, CardType::Attack, 25).with_rarity(Rarity::Legendary);
        original.set_cooldown(3);

        let copy = original.reissue();
        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.cooldown(), 0);
        assert_eq!(copy.name(), original.name());
        assert_eq!(copy.value(), original.value());
        assert_eq!(copy.rarity(), Rarity::Legendary);
    }

    #[test]
    fn test_clone_keeps_identity() {
        let card = Card::new("Strike", 1, CardType::Attack, 6);
        assert_eq!(card.clone().id(), card.id());
    }

    #[test]
    fn test_cooldown_ticks_to_zero() {
        let mut card = Card::new("Strike", 1, CardType::Attack, 6);
        card.set_cooldown(2);
        assert!(!card.is_ready());
        assert!(!card.tick_cooldown());
        assert!(card.tick_cooldown());
        assert!(card.is_ready());
        assert!(!card.tick_cooldown());
        assert_eq!(card.cooldown(), 0);
    }

    #[test]
    fn test_effect_union() {
        let surge = Card::new("Surge", 0, CardType::Power, 2).with_ability(Ability::ManaSurge);
        assert_eq!(surge.effect(), CardEffect::Power(Ability::ManaSurge, 2));
        assert_eq!(
            Card::new("Strike", 1, CardType::Attack, 6).effect(),
            CardEffect::Attack(6)
        );
    }

    #[test]
    fn test_observe_moves_allocator_forward() {
        let far = CardId(1_000_000);
        CardId::observe(far);
        assert!(CardId::mint() > far);
    }
}
