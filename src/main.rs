use anyhow::{Context, Result};
use clap::Parser;
use combat::{BattleRng, Enemy, HasHealth};
use deck_combat::{Battle, BattleConfig, BattleOutcome, GreedyChooser, victory_reward};
use hero::{Player, snapshot};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Headless arena run: a greedy player fights escalating waves until defeat.
#[derive(Parser, Debug)]
#[command(name = "deck-combat")]
#[command(about = "Simulate arena waves with the deck combat engine", long_about = None)]
struct Cli {
    /// Seed for every battle and reward roll; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Number of arena waves to attempt
    #[arg(long, default_value_t = 5)]
    waves: u32,

    /// Rounds per battle before it is abandoned
    #[arg(long, default_value_t = 50)]
    max_rounds: u32,

    /// JSON engine configuration; defaults apply when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Player snapshot to start from instead of a fresh hero
    #[arg(long, value_name = "FILE")]
    hero: Option<PathBuf>,

    /// Write the player snapshot here when the run ends
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, waves = cli.waves, "arena run");

    let config = match &cli.config {
        Some(path) => BattleConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => BattleConfig::default(),
    };
    let mut player = match &cli.hero {
        Some(path) => snapshot::load_from(path)
            .with_context(|| format!("Failed to load hero from {}", path.display()))?,
        None => Player::new("Arena Challenger"),
    };
    let mut reward_rng = BattleRng::new(seed);

    for wave in 1..=cli.waves {
        let mut enemy = Enemy::arena_wave(wave);
        println!(
            "Wave {}: {} ({} HP, {} DMG)",
            wave,
            enemy.name(),
            enemy.max_hp(),
            enemy.base_damage()
        );

        let dice = BattleRng::new(seed.wrapping_add(u64::from(wave)));
        let mut battle = Battle::with_config(&mut player, &mut enemy, dice, config.clone());
        battle.plan_enemy_intent();
        println!("  intent: {}", battle.enemy().intent_label());
        let outcome = battle.fight(&mut GreedyChooser, cli.max_rounds);
        let rounds = battle.round();
        drop(battle);

        println!(
            "  {} after {} round(s), HP {}/{}",
            outcome,
            rounds,
            player.hp(),
            player.max_hp()
        );

        match outcome {
            BattleOutcome::Victory => {
                let reward = victory_reward(&mut player, &enemy, wave, &mut reward_rng);
                println!(
                    "  +{} gold, +{} XP, +{} HP{}",
                    reward.gold,
                    reward.xp,
                    reward.healed,
                    reward
                        .card
                        .map(|card| format!(", new card: {}", card.name()))
                        .unwrap_or_default()
                );
            }
            _ => break,
        }
    }

    println!(
        "Run over: level {}, {} gold, {} cards in deck",
        player.level,
        player.gold,
        player.master_deck.len()
    );

    if let Some(path) = &cli.save {
        snapshot::save_to(path, &player)
            .with_context(|| format!("Failed to save hero to {}", path.display()))?;
    }
    Ok(())
}
