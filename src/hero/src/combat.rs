// src/hero/src/combat.rs
use super::core::Player;
use combat::combatant::{drain, restore};
use combat::{Combat, HasHealth, StatusBearer, StatusLedger};

impl HasHealth for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn hp(&self) -> u32 {
        self.hp
    }

    fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// 护甲优先吸收伤害，剩余部分扣除生命
    fn take_damage(&mut self, amount: u32) -> u32 {
        self.absorb_hit(amount).1
    }

    fn lose_health(&mut self, amount: u32) -> u32 {
        drain(&mut self.hp, amount)
    }

    fn heal(&mut self, amount: u32) -> u32 {
        restore(&mut self.hp, self.max_hp, amount)
    }
}

impl StatusBearer for Player {
    fn statuses(&self) -> &StatusLedger {
        &self.statuses
    }

    fn statuses_mut(&mut self) -> &mut StatusLedger {
        &mut self.statuses
    }
}

impl Player {
    /// 先扣护甲再扣生命，返回 `(护甲吸收, 生命损失)`
    pub fn absorb_hit(&mut self, damage: u32) -> (u32, u32) {
        let (armor_left, through) = Combat::absorb(damage, self.armor);
        let absorbed = self.armor - armor_left;
        self.armor = armor_left;
        (absorbed, self.lose_health(through))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat::{StatusEffect, StatusKind, tick};
    use proptest::prelude::*;

    #[test]
    fn test_armor_absorbs_partial_hit() {
        let mut player = Player::new("Hero");
        player.add_armor(5);
        assert_eq!(player.absorb_hit(8), (5, 3));
        assert_eq!(player.armor(), 0);
        assert_eq!(player.hp(), 97);
    }

    #[test]
    fn test_armor_absorbs_whole_hit() {
        let mut player = Player::new("Hero");
        player.add_armor(10);
        assert_eq!(player.take_damage(4), 0);
        assert_eq!(player.armor(), 6);
        assert_eq!(player.hp(), 100);
    }

    #[test]
    fn test_poison_ignores_armor() {
        let mut player = Player::new("Hero");
        player.add_armor(20);
        player.add_status(StatusEffect::new(StatusKind::Poison, 4, 2));
        tick(&mut player);
        assert_eq!(player.hp(), 96);
        assert_eq!(player.armor(), 20);
    }

    proptest! {
        #[test]
        fn armor_mitigation_holds(damage in 0u32..500, armor in 0u32..500, hp in 1u32..300) {
            let mut player = Player::new("Hero").with_max_hp(hp);
            player.add_armor(armor);

            player.take_damage(damage);

            prop_assert_eq!(player.armor(), armor.saturating_sub(damage));
            prop_assert_eq!(player.hp(), hp.saturating_sub(damage.saturating_sub(armor)));
        }
    }
}
