//src/items/src/potion.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// 一次性治疗药水
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct Potion {
    pub name: String,
    pub heal_amount: u32,
    pub price: u32,
}

impl Potion {
    pub fn new(name: impl Into<String>, heal_amount: u32, price: u32) -> Self {
        Self {
            name: name.into(),
            heal_amount,
            price,
        }
    }

    pub fn description(&self) -> String {
        format!("Heals {} HP", self.heal_amount)
    }

    pub fn shop_stock() -> Vec<Potion> {
        vec![
            Potion::new("Small Potion", 30, 15),
            Potion::new("Big Potion", 50, 40),
            Potion::new("Elixir", 100, 80),
        ]
    }
}

impl fmt::Display for Potion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
