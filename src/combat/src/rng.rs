//src/combat/src/rng.rs
use rand::{Rng, RngCore, SeedableRng, prelude::SliceRandom};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// 战斗中所有随机决策的来源
///
/// 由调用方注入，每场战斗可独立设定种子或使用脚本序列
pub trait Dice {
    /// `[0, 100)` 均匀整数
    fn roll_percent(&mut self) -> u32;

    /// `[low, high]` 均匀整数
    fn roll_between(&mut self, low: i32, high: i32) -> i32;

    /// `[0, len)` 均匀索引，`len` 不能为0
    fn pick_index(&mut self, len: usize) -> usize;

    /// 原地随机打乱
    fn shuffle_indices(&mut self, indices: &mut [usize]);
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn roll_percent(&mut self) -> u32 {
        (**self).roll_percent()
    }

    fn roll_between(&mut self, low: i32, high: i32) -> i32 {
        (**self).roll_between(low, high)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }

    fn shuffle_indices(&mut self, indices: &mut [usize]) {
        (**self).shuffle_indices(indices)
    }
}

/// 战斗专用的确定性RNG，序列化时只保存种子
#[derive(Debug, Clone)]
pub struct BattleRng {
    rng: Pcg32,
    seed: u64,
}

impl BattleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 重置到初始状态
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    pub fn reseed(&mut self, new_seed: u64) {
        self.seed = new_seed;
        self.reset();
    }
}

impl Dice for BattleRng {
    fn roll_percent(&mut self) -> u32 {
        self.rng.random_range(0..100)
    }

    fn roll_between(&mut self, low: i32, high: i32) -> i32 {
        self.rng.random_range(low..=high)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index on an empty pool");
        self.rng.random_range(0..len)
    }

    fn shuffle_indices(&mut self, indices: &mut [usize]) {
        indices.shuffle(&mut self.rng);
    }
}

impl RngCore for BattleRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.rng.fill_bytes(dst)
    }
}

impl Serialize for BattleRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.seed)
    }
}

impl<'de> Deserialize<'de> for BattleRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(Self::new(seed))
    }
}

/// 测试用的固定骰子序列
///
/// 队列耗尽后返回后备值，默认百分比为99（不暴击、不闪避、敌人防御）。
/// 洗牌不改变顺序。
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    percents: VecDeque<u32>,
    betweens: VecDeque<i32>,
    picks: VecDeque<usize>,
    fallback_percent: Option<u32>,
}

impl ScriptedDice {
    pub fn new(percents: impl IntoIterator<Item = u32>) -> Self {
        Self {
            percents: percents.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_betweens(mut self, rolls: impl IntoIterator<Item = i32>) -> Self {
        self.betweens.extend(rolls);
        self
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn with_fallback(mut self, percent: u32) -> Self {
        self.fallback_percent = Some(percent.min(99));
        self
    }

    /// 剩余的百分比骰
    pub fn remaining(&self) -> usize {
        self.percents.len()
    }
}

impl Dice for ScriptedDice {
    fn roll_percent(&mut self) -> u32 {
        self.percents
            .pop_front()
            .map(|r| r.min(99))
            .unwrap_or(self.fallback_percent.unwrap_or(99))
    }

    fn roll_between(&mut self, low: i32, high: i32) -> i32 {
        match self.betweens.pop_front() {
            Some(roll) => roll.clamp(low, high),
            None => 0.clamp(low, high),
        }
    }

    fn pick_index(&mut self, len: usize) -> usize {
        match self.picks.pop_front() {
            Some(pick) if len > 0 => pick % len,
            _ => 0,
        }
    }

    fn shuffle_indices(&mut self, _indices: &mut [usize]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_rng() {
        let mut rng1 = BattleRng::new(123);
        let mut rng2 = BattleRng::new(123);

        assert_eq!(rng1.roll_percent(), rng2.roll_percent());
        assert_eq!(rng1.roll_between(-1, 1), rng2.roll_between(-1, 1));

        rng1.reseed(456);
        rng2.reseed(456);
        assert_eq!(rng1.roll_percent(), rng2.roll_percent());
    }

    #[test]
    fn test_reset_replays_sequence() {
        let mut rng = BattleRng::new(7);
        let first: Vec<u32> = (0..5).map(|_| rng.roll_percent()).collect();
        rng.reset();
        let second: Vec<u32> = (0..5).map(|_| rng.roll_percent()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ranges() {
        let mut rng = BattleRng::new(99);
        for _ in 0..500 {
            assert!(rng.roll_percent() < 100);
            let jitter = rng.roll_between(-1, 1);
            assert!((-1..=1).contains(&jitter));
            assert!(rng.pick_index(3) < 3);
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = BattleRng::new(5);
        let mut indices: Vec<usize> = (0..10).collect();
        rng.shuffle_indices(&mut indices);
        let mut sorted = indices.clone();
        sorted.sort();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_scripted_dice_replays_then_falls_back() {
        let mut dice = ScriptedDice::new([5, 150]).with_betweens([1]).with_fallback(42);
        assert_eq!(dice.roll_percent(), 5);
        assert_eq!(dice.roll_percent(), 99, "rolls are clamped into range");
        assert_eq!(dice.roll_percent(), 42);
        assert_eq!(dice.roll_between(-1, 1), 1);
        assert_eq!(dice.roll_between(-1, 1), 0);
        assert_eq!(dice.remaining(), 0);
    }
}
