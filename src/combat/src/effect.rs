//src/combat/src/effect.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString};

/// 战斗单位身上的一个状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    kind: StatusKind,
    magnitude: u32,
    remaining_rounds: u32,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, magnitude: u32, rounds: u32) -> Self {
        Self {
            kind,
            magnitude,
            remaining_rounds: rounds,
        }
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn magnitude(&self) -> u32 {
        self.magnitude
    }

    pub fn remaining_rounds(&self) -> u32 {
        self.remaining_rounds
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_rounds == 0
    }

    /// 减少一回合，返回是否仍然有效
    pub fn update(&mut self) -> bool {
        if self.remaining_rounds > 0 {
            self.remaining_rounds -= 1;
            !self.is_expired()
        } else {
            false
        }
    }
}

impl fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounds = match self.remaining_rounds {
            1 => "1 round".to_string(),
            n => format!("{} rounds", n),
        };
        match self.kind {
            StatusKind::Weaken => write!(f, "Weaken -{} ({})", self.magnitude, rounds),
            StatusKind::Enraged => write!(f, "Enraged +{} ({})", self.magnitude, rounds),
            StatusKind::Poison => write!(f, "Poison {}/round ({})", self.magnitude, rounds),
            StatusKind::Regeneration => {
                write!(f, "Regeneration +{}/round ({})", self.magnitude, rounds)
            }
            StatusKind::Stun | StatusKind::Fortify => write!(f, "{} ({})", self.kind, rounds),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum StatusKind {
    /// 虚弱：降低攻击伤害
    Weaken,
    /// 眩晕：跳过行动，由行动消耗而非回合结算
    Stun,
    /// 坚守：护甲保留到下回合
    Fortify,
    /// 再生：每回合恢复生命
    Regeneration,
    /// 中毒：每回合扣除生命，无视护甲
    Poison,
    /// 狂怒：提升攻击伤害
    Enraged,
}

impl StatusKind {
    /// 由被阻止的行动消耗的状态
    pub fn gates_action(self) -> bool {
        matches!(self, StatusKind::Stun)
    }
}
