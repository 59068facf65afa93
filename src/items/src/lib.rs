//src/items/src/lib.rs
use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::potion::Potion;
pub use crate::weapon::Weapon;

pub mod potion;
pub mod weapon;

/// Anything a player can carry in the inventory
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub enum Item {
    Weapon(Weapon),
    Potion(Potion),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Weapon(w) => &w.name,
            Item::Potion(p) => &p.name,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Item::Weapon(w) => w.description(),
            Item::Potion(p) => p.description(),
        }
    }

    /// Shop price in gold
    pub fn price(&self) -> u32 {
        match self {
            Item::Weapon(w) => w.price,
            Item::Potion(p) => p.price,
        }
    }

    pub fn is_consumable(&self) -> bool {
        matches!(self, Item::Potion(_))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Weapon> for Item {
    fn from(weapon: Weapon) -> Self {
        Item::Weapon(weapon)
    }
}

impl From<Potion> for Item {
    fn from(potion: Potion) -> Self {
        Item::Potion(potion)
    }
}
