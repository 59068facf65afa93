//! Turn-based deck combat: one player against one enemy, resolved round by
//! round until either side falls.

pub mod autoplay;
pub mod battle;
pub mod config;
pub mod rewards;

pub use crate::autoplay::{CardChooser, GreedyChooser};
pub use crate::battle::{Battle, BattleOutcome, RoundReport};
pub use crate::config::BattleConfig;
pub use crate::rewards::{Reward, grant_card, victory_reward};
