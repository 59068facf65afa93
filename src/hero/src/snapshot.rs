// src/hero/src/snapshot.rs
//! Binary snapshot of a [`Player`] for the save layer.

use bincode::config;
use cards::CardId;
use combat::HasHealth;
use error::{GameError, Result};
use std::{fs, path::Path};
use tracing::debug;

use crate::core::Player;

pub fn encode(player: &Player) -> Result<Vec<u8>> {
    let bytes = bincode::serde::encode_to_vec(player, config::standard())?;
    Ok(bytes)
}

/// Decode and validate a snapshot. Every loaded card id is reported to the
/// id allocator so cards minted afterwards never collide with them.
pub fn decode(bytes: &[u8]) -> Result<Player> {
    let (player, read): (Player, usize) =
        bincode::serde::decode_from_slice(bytes, config::standard())?;
    if read != bytes.len() {
        return Err(GameError::Deserialization(format!(
            "{} trailing bytes after player data",
            bytes.len() - read
        )));
    }
    validate(&player)?;

    for card in &player.master_deck {
        CardId::observe(card.id());
    }
    debug!(player = %player.name, cards = player.master_deck.len(), "snapshot decoded");
    Ok(player)
}

pub fn save_to(path: impl AsRef<Path>, player: &Player) -> Result<()> {
    fs::write(path, encode(player)?)?;
    Ok(())
}

pub fn load_from(path: impl AsRef<Path>) -> Result<Player> {
    decode(&fs::read(path)?)
}

fn validate(player: &Player) -> Result<()> {
    if player.max_hp() == 0 {
        return Err(GameError::InvalidPlayerData("max HP is zero".into()));
    }
    if player.hp() > player.max_hp() {
        return Err(GameError::InvalidPlayerData(format!(
            "HP {} exceeds max HP {}",
            player.hp(),
            player.max_hp()
        )));
    }
    if player.current_mana() > player.max_mana {
        return Err(GameError::InvalidPlayerData(format!(
            "mana {} exceeds max mana {}",
            player.current_mana(),
            player.max_mana
        )));
    }
    Ok(())
}
