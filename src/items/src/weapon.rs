//src/items/src/weapon.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// 可装备武器，为攻击提供固定伤害加成
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub damage_bonus: u32,
    pub price: u32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, damage_bonus: u32, price: u32) -> Self {
        Self {
            name: name.into(),
            damage_bonus,
            price,
        }
    }

    pub fn damage_bonus(&self) -> u32 {
        self.damage_bonus
    }

    pub fn description(&self) -> String {
        format!("Adds +{} DMG", self.damage_bonus)
    }

    /// 铁匠铺常规库存
    pub fn shop_stock() -> Vec<Weapon> {
        vec![
            Weapon::new("Iron Sword", 3, 100),
            Weapon::new("Steel Blade", 8, 160),
            Weapon::new("Shadow Dagger", 14, 220),
        ]
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_stock_sorted_by_power() {
        let stock = Weapon::shop_stock();
        assert_eq!(stock.len(), 3);
        assert!(stock.windows(2).all(|w| w[0].damage_bonus < w[1].damage_bonus));
    }
}
