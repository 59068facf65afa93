// tests/config_tests.rs
//! Engine configuration loaded from disk

mod helpers;

use combat::ScriptedDice;
use deck_combat::{Battle, BattleConfig};
use error::GameError;
use helpers::{dummy, player_with, strikes};
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = config_file(r#"{ "card_cooldown": 1, "planner": { "defend_heal": 9 } }"#);
    let config = BattleConfig::load(file.path()).unwrap();

    assert_eq!(config.card_cooldown, 1);
    assert_eq!(config.planner.defend_heal, 9);
    assert_eq!(config.hand_size, 3);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = BattleConfig::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(GameError::Io(_))));
}

#[test]
fn test_invalid_file_is_config_error() {
    let file = config_file(r#"{ "hand_size": 0 }"#);
    assert!(matches!(
        BattleConfig::load(file.path()),
        Err(GameError::Config(_))
    ));
}

#[test]
fn test_short_cooldown_from_config() {
    let file = config_file(r#"{ "card_cooldown": 1 }"#);
    let config = BattleConfig::load(file.path()).unwrap();

    let deck = strikes(1);
    let id = deck[0].id();
    let mut player = player_with(deck);
    let mut enemy = dummy(100, 8);
    let mut battle = Battle::with_config(&mut player, &mut enemy, ScriptedDice::default(), config);

    let hand = battle.draw_hand();
    battle.play_card(&hand[0]);
    battle.end_round();

    let hand = battle.draw_hand();
    assert_eq!(hand.first().map(|c| c.id()), Some(id));
}

#[test]
fn test_uncapped_mana_surge() {
    let file = config_file(r#"{ "mana_surge_capped": false }"#);
    let config = BattleConfig::load(file.path()).unwrap();

    let surge = helpers::power(cards::Ability::ManaSurge, 2);
    let mut player = player_with(vec![surge.clone()]);
    let mut enemy = dummy(100, 8);
    let mut battle = Battle::with_config(&mut player, &mut enemy, ScriptedDice::default(), config);

    battle.play_card(&surge);
    assert_eq!(battle.player().current_mana(), 4);
}
