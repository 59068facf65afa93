//! Card definitions and the card catalogue.

pub mod card;
pub mod library;

pub use crate::card::{Ability, Card, CardEffect, CardId, CardType, Rarity};
pub use crate::library::{CardLibrary, CardTemplate};
