//src/autoplay.rs
use cards::{Ability, Card, CardEffect, CardId};
use combat::{Enemy, HasHealth, IntentKind};
use hero::Player;

/// Picks which card to play next; `None` ends the player's turn
pub trait CardChooser {
    fn choose(&mut self, hand: &[Card], player: &Player, enemy: &Enemy) -> Option<CardId>;
}

impl<F> CardChooser for F
where
    F: FnMut(&[Card], &Player, &Enemy) -> Option<CardId>,
{
    fn choose(&mut self, hand: &[Card], player: &Player, enemy: &Enemy) -> Option<CardId> {
        self(hand, player, enemy)
    }
}

/// Plays the affordable card with the best immediate payoff: a lethal
/// attack first, armor when an attack is telegraphed, then raw damage.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyChooser;

impl GreedyChooser {
    fn score(card: &Card, player: &Player, enemy: &Enemy) -> u32 {
        let threatened = enemy.intent() == IntentKind::Attack;
        match card.effect() {
            CardEffect::Attack(value) => {
                let damage = value + player.total_damage();
                if damage >= enemy.hp() {
                    u32::MAX
                } else {
                    damage * 2
                }
            }
            CardEffect::Defense(value) if threatened => {
                let armor = value + player.agility / 2;
                armor.min(enemy.attack_damage().saturating_sub(player.armor())) * 2 + 1
            }
            CardEffect::Defense(_) => 1,
            CardEffect::Power(Ability::None, value) => {
                value.min(player.max_hp() - player.hp()) * 2
            }
            CardEffect::Power(Ability::Stun, _) if threatened => enemy.attack_damage() * 3,
            CardEffect::Power(Ability::Weaken, _) if threatened => 6,
            CardEffect::Power(Ability::Poison, value) => value * 3,
            CardEffect::Power(_, value) => value + 2,
        }
    }
}

impl CardChooser for GreedyChooser {
    fn choose(&mut self, hand: &[Card], player: &Player, enemy: &Enemy) -> Option<CardId> {
        hand.iter()
            .filter(|card| card.is_ready() && card.cost() <= player.current_mana())
            .max_by_key(|card| Self::score(card, player, enemy))
            .map(Card::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards::CardType;

    #[test]
    fn test_prefers_lethal_attack() {
        let player = Player::new("Hero");
        let enemy = Enemy::new("Dummy", 15, 8, false);
        let strike = Card::new("Strike", 1, CardType::Attack, 6);
        let wall = Card::new("Iron Wall", 1, CardType::Defense, 20);

        let hand = vec![wall, strike.clone()];
        assert_eq!(GreedyChooser.choose(&hand, &player, &enemy), Some(strike.id()));
    }

    #[test]
    fn test_skips_unaffordable_cards() {
        let player = Player::new("Hero");
        let enemy = Enemy::new("Dummy", 40, 8, false);
        let hand = vec![Card::new("Execute", 4, CardType::Attack, 25)];
        assert_eq!(GreedyChooser.choose(&hand, &player, &enemy), None);
    }

    #[test]
    fn test_closure_chooser() {
        let player = Player::new("Hero");
        let enemy = Enemy::new("Dummy", 40, 8, false);
        let hand = vec![Card::new("Strike", 1, CardType::Attack, 6)];
        let mut pass = |_: &[Card], _: &Player, _: &Enemy| -> Option<CardId> { None };
        assert_eq!(pass.choose(&hand, &player, &enemy), None);
    }
}
