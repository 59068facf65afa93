// src/hero/src/lib.rs

mod combat;
mod core;
pub mod snapshot;

pub use self::core::{HeroError, Player};
