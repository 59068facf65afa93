//src/cards/src/library.rs
use error::{GameError, Result};
use rand::Rng;
use strum::IntoEnumIterator;

use crate::card::{Ability, Card, CardType, Rarity};

/// Static definition a card instance is minted from
#[derive(Debug, Clone, Copy)]
pub struct CardTemplate {
    pub name: &'static str,
    pub cost: u32,
    pub card_type: CardType,
    pub value: u32,
    pub rarity: Rarity,
    pub ability: Ability,
    pub description: Option<&'static str>,
}

impl CardTemplate {
    const fn plain(
        name: &'static str,
        cost: u32,
        card_type: CardType,
        value: u32,
        rarity: Rarity,
    ) -> Self {
        Self {
            name,
            cost,
            card_type,
            value,
            rarity,
            ability: Ability::None,
            description: None,
        }
    }

    const fn power(
        name: &'static str,
        cost: u32,
        value: u32,
        rarity: Rarity,
        ability: Ability,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            cost,
            card_type: CardType::Power,
            value,
            rarity,
            ability,
            description: Some(description),
        }
    }

    /// Mint a fresh card instance from this template
    pub fn mint(&self) -> Card {
        let card = Card::new(self.name, self.cost, self.card_type, self.value)
            .with_rarity(self.rarity)
            .with_ability(self.ability);
        match self.description {
            Some(text) => card.with_description(text),
            None => card,
        }
    }
}

const STRIKE: CardTemplate = CardTemplate::plain("Strike", 1, CardType::Attack, 6, Rarity::Common);
const DEFEND: CardTemplate = CardTemplate::plain("Defend", 1, CardType::Defense, 5, Rarity::Common);

const TEMPLATES: &[CardTemplate] = &[
    STRIKE,
    DEFEND,
    CardTemplate::plain("Quick Jab", 0, CardType::Attack, 3, Rarity::Common),
    CardTemplate::plain("Brace", 0, CardType::Defense, 3, Rarity::Common),
    CardTemplate::power(
        "Second Wind",
        1,
        8,
        Rarity::Common,
        Ability::None,
        "Recover 8 HP.",
    ),
    CardTemplate::plain("Heavy Blow", 2, CardType::Attack, 12, Rarity::Uncommon),
    CardTemplate::plain("Iron Wall", 2, CardType::Defense, 12, Rarity::Uncommon),
    CardTemplate::power(
        "Mana Surge",
        0,
        2,
        Rarity::Uncommon,
        Ability::ManaSurge,
        "Gain 2 mana.",
    ),
    CardTemplate::power(
        "Insight",
        1,
        0,
        Rarity::Uncommon,
        Ability::Draw,
        "Draw an extra card.",
    ),
    CardTemplate::power(
        "Hex",
        1,
        0,
        Rarity::Rare,
        Ability::Weaken,
        "Weaken the enemy's attacks.",
    ),
    CardTemplate::power(
        "Concussion",
        2,
        1,
        Rarity::Rare,
        Ability::Stun,
        "Stun the enemy for 1 round.",
    ),
    CardTemplate::power(
        "Bulwark",
        1,
        2,
        Rarity::Rare,
        Ability::Fortify,
        "Keep your armor for 2 rounds.",
    ),
    CardTemplate::plain("Execute", 2, CardType::Attack, 25, Rarity::Legendary),
    CardTemplate::power(
        "Venom",
        1,
        5,
        Rarity::Legendary,
        Ability::Poison,
        "Poison the enemy for 5 damage each round.",
    ),
    CardTemplate::power(
        "Renewal",
        2,
        6,
        Rarity::Legendary,
        Ability::Regenerate,
        "Regenerate 6 HP each round.",
    ),
];

/// Catalogue of every card the game can hand out
pub struct CardLibrary;

impl CardLibrary {
    /// Five Strikes and five Defends
    pub fn starter_deck() -> Vec<Card> {
        let mut deck = Vec::with_capacity(10);
        deck.extend((0..5).map(|_| STRIKE.mint()));
        deck.extend((0..5).map(|_| DEFEND.mint()));
        deck
    }

    pub fn by_name(name: &str) -> Result<Card> {
        TEMPLATES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .map(CardTemplate::mint)
            .ok_or_else(|| GameError::UnknownCard(name.to_string()))
    }

    pub fn of_rarity(rarity: Rarity) -> impl Iterator<Item = &'static CardTemplate> {
        TEMPLATES.iter().filter(move |t| t.rarity == rarity)
    }

    /// Drop weights per rarity; higher levels shift weight toward rare cards
    pub fn rarity_weight(rarity: Rarity, level: u32) -> u32 {
        let steps = level.saturating_sub(1);
        match rarity {
            Rarity::Common => 60u32.saturating_sub(steps * 5).max(20),
            Rarity::Uncommon => 25,
            Rarity::Rare => (10 + steps * 3).min(35),
            Rarity::Legendary => {
                if level >= 3 {
                    (level - 2).min(10)
                } else {
                    0
                }
            }
        }
    }

    /// Roll a rarity for `level`, then a template within it, and mint it
    pub fn random_card<R: Rng + ?Sized>(rng: &mut R, level: u32) -> Card {
        let total: u32 = Rarity::iter().map(|r| Self::rarity_weight(r, level)).sum();
        let mut roll = rng.random_range(0..total);

        let mut rarity = Rarity::Common;
        for candidate in Rarity::iter() {
            let weight = Self::rarity_weight(candidate, level);
            if roll < weight {
                rarity = candidate;
                break;
            }
            roll -= weight;
        }

        let pool: Vec<&CardTemplate> = Self::of_rarity(rarity).collect();
        pool[rng.random_range(0..pool.len())].mint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_starter_deck_composition() {
        let deck = CardLibrary::starter_deck();
        assert_eq!(deck.len(), 10);
        assert_eq!(deck.iter().filter(|c| c.name() == "Strike").count(), 5);
        assert_eq!(deck.iter().filter(|c| c.name() == "Defend").count(), 5);

        let ids: HashSet<_> = deck.iter().map(Card::id).collect();
        assert_eq!(ids.len(), 10, "starter cards must not share identity");
    }

    #[test]
    fn test_by_name_lookup() {
        let execute = CardLibrary::by_name("execute").unwrap();
        assert_eq!(execute.value(), 25);
        assert_eq!(execute.cost(), 2);
        assert_eq!(execute.rarity(), Rarity::Legendary);

        assert!(matches!(
            CardLibrary::by_name("Fireball"),
            Err(GameError::UnknownCard(_))
        ));
    }

    #[test]
    fn test_every_rarity_has_templates() {
        for rarity in Rarity::iter() {
            assert!(CardLibrary::of_rarity(rarity).next().is_some(), "{rarity}");
        }
    }

    #[test]
    fn test_legendary_locked_at_low_level() {
        assert_eq!(CardLibrary::rarity_weight(Rarity::Legendary, 1), 0);
        assert_eq!(CardLibrary::rarity_weight(Rarity::Legendary, 2), 0);
        assert!(CardLibrary::rarity_weight(Rarity::Legendary, 5) > 0);
        assert_eq!(CardLibrary::rarity_weight(Rarity::Common, 50), 20);
        assert_eq!(CardLibrary::rarity_weight(Rarity::Rare, 50), 35);
    }

    #[test]
    fn test_random_card_respects_level_gate() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let card = CardLibrary::random_card(&mut rng, 1);
            assert_ne!(card.rarity(), Rarity::Legendary);
            assert_eq!(card.cooldown(), 0);
        }
    }
}
