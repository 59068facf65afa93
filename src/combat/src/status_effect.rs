//! Status effect ledger for combatants
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::combatant::HasHealth;
use crate::effect::{StatusEffect, StatusKind};

/// Active statuses of one combatant, at most one entry per kind, kept in
/// insertion order so ticks are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLedger {
    effects: Vec<StatusEffect>,
}

impl StatusLedger {
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Add an effect, or replace magnitude and duration of an existing entry
    /// of the same kind in place. Returns the replaced entry, if any.
    /// A zero-round effect is never recorded.
    pub fn apply(&mut self, effect: StatusEffect) -> Option<StatusEffect> {
        if effect.is_expired() {
            return None;
        }
        match self.effects.iter().position(|e| e.kind() == effect.kind()) {
            Some(idx) => Some(std::mem::replace(&mut self.effects[idx], effect)),
            None => {
                self.effects.push(effect);
                None
            }
        }
    }

    pub fn remove(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        let idx = self.effects.iter().position(|e| e.kind() == kind)?;
        Some(self.effects.remove(idx))
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind() == kind)
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    /// Magnitude of `kind`, or 0 when absent
    pub fn magnitude(&self, kind: StatusKind) -> u32 {
        self.get(kind).map_or(0, StatusEffect::magnitude)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Spend one round of an action-gating status such as Stun.
    /// Returns the rounds left afterwards, or `None` if the status was absent.
    pub fn consume_round(&mut self, kind: StatusKind) -> Option<u32> {
        let idx = self.effects.iter().position(|e| e.kind() == kind)?;
        let still_active = self.effects[idx].update();
        let left = self.effects[idx].remaining_rounds();
        if !still_active {
            self.effects.remove(idx);
        }
        Some(left)
    }

    /// Age every non-gating entry by one round, dropping those that reach zero.
    /// Returns what each entry was worth this round, in insertion order.
    fn advance(&mut self) -> Vec<Pulse> {
        let mut pulses = Vec::with_capacity(self.effects.len());
        self.effects.retain_mut(|effect| {
            if effect.kind().gates_action() {
                return true;
            }
            let kind = effect.kind();
            let magnitude = effect.magnitude();
            let is_active = effect.update();
            pulses.push(Pulse {
                kind,
                magnitude,
                expired: !is_active,
            });
            is_active
        });
        pulses
    }

    /// Display-only rendering, e.g. `Weaken -3 (2 rounds), Stun (1 round)`
    pub fn summary(&self) -> String {
        if self.effects.is_empty() {
            return "none".to_string();
        }
        self.effects
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

struct Pulse {
    kind: StatusKind,
    magnitude: u32,
    expired: bool,
}

/// Something a status did during a round tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    Damaged {
        target: String,
        kind: StatusKind,
        amount: u32,
    },
    Healed {
        target: String,
        kind: StatusKind,
        amount: u32,
    },
    ArmorRetained {
        target: String,
    },
    Expired {
        target: String,
        kind: StatusKind,
    },
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEvent::Damaged {
                target,
                kind,
                amount,
            } => write!(f, "{} takes {} damage from {}", target, amount, kind),
            StatusEvent::Healed {
                target,
                kind,
                amount,
            } => write!(f, "{} recovers {} HP from {}", target, amount, kind),
            StatusEvent::ArmorRetained { target } => {
                write!(f, "{}'s armor holds thanks to Fortify", target)
            }
            StatusEvent::Expired { target, kind } => write!(f, "{}'s {} has expired", target, kind),
        }
    }
}

/// A combatant that carries a status ledger
pub trait StatusBearer: HasHealth {
    fn statuses(&self) -> &StatusLedger;

    fn statuses_mut(&mut self) -> &mut StatusLedger;

    fn add_status(&mut self, effect: StatusEffect) -> Option<StatusEffect> {
        self.statuses_mut().apply(effect)
    }

    fn has_status(&self, kind: StatusKind) -> bool {
        self.statuses().has(kind)
    }
}

/// Advance every status on `combatant` by one round: apply each entry's
/// per-round effect, age it, and drop it once its duration runs out.
/// Action-gating statuses are left for the action that consumes them.
pub fn tick<T: StatusBearer + ?Sized>(combatant: &mut T) -> Vec<StatusEvent> {
    let pulses = combatant.statuses_mut().advance();
    let mut events = Vec::new();

    for pulse in pulses {
        let target = combatant.name().to_string();
        match pulse.kind {
            StatusKind::Poison => {
                let amount = combatant.lose_health(pulse.magnitude);
                events.push(StatusEvent::Damaged {
                    target: target.clone(),
                    kind: pulse.kind,
                    amount,
                });
            }
            // no healing back from 0 HP
            StatusKind::Regeneration if combatant.is_dead() => {}
            StatusKind::Regeneration => {
                let amount = combatant.heal(pulse.magnitude);
                events.push(StatusEvent::Healed {
                    target: target.clone(),
                    kind: pulse.kind,
                    amount,
                });
            }
            StatusKind::Fortify => events.push(StatusEvent::ArmorRetained {
                target: target.clone(),
            }),
            StatusKind::Weaken | StatusKind::Enraged | StatusKind::Stun => {}
        }
        if pulse.expired {
            events.push(StatusEvent::Expired {
                target,
                kind: pulse.kind,
            });
        }
    }

    trace!(combatant = combatant.name(), events = events.len(), "status tick");
    events
}
