//src/battle.rs
use cards::{Ability, Card, CardEffect, CardId};
use combat::{
    BattleRng, Combat, CombatResult, Dice, Enemy, HasHealth, IntentKind, IntentPlanner,
    Rejection, StatusBearer, StatusEffect, StatusEvent, StatusKind, tick,
};
use hero::Player;
use std::fmt;
use tracing::{debug, info};

use crate::autoplay::CardChooser;
use crate::config::BattleConfig;

/// Where a battle stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Ongoing,
    Victory,
    Defeat,
    /// The caller's round limit ran out before either side fell
    Abandoned,
}

impl BattleOutcome {
    pub fn is_over(self) -> bool {
        self != BattleOutcome::Ongoing
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BattleOutcome::Ongoing => "Ongoing",
            BattleOutcome::Victory => "Victory",
            BattleOutcome::Defeat => "Defeat",
            BattleOutcome::Abandoned => "Abandoned",
        };
        f.write_str(text)
    }
}

/// Bookkeeping produced by [`Battle::end_round`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// Round that just ended
    pub round: u32,
    /// Status ticks, player first
    pub events: Vec<StatusEvent>,
    pub armor_retained: bool,
    pub outcome: BattleOutcome,
}

/// One battle between a player and an enemy.
///
/// Both combatants are borrowed for the battle's lifetime, so every mutation
/// (HP, armor, mana, card cooldowns, statuses) is visible to their owner
/// once the battle is dropped. All randomness goes through `D`.
pub struct Battle<'a, D: Dice = BattleRng> {
    player: &'a mut Player,
    enemy: &'a mut Enemy,
    dice: D,
    config: BattleConfig,
    planner: IntentPlanner,
    hand: Vec<CardId>,
    /// Set by `draw_hand`; from then on only hand cards are playable this round
    hand_drawn: bool,
    round: u32,
}

impl<'a> Battle<'a, BattleRng> {
    pub fn seeded(player: &'a mut Player, enemy: &'a mut Enemy, seed: u64) -> Self {
        Self::new(player, enemy, BattleRng::new(seed))
    }
}

impl<'a, D: Dice> Battle<'a, D> {
    pub fn new(player: &'a mut Player, enemy: &'a mut Enemy, dice: D) -> Self {
        Self::with_config(player, enemy, dice, BattleConfig::default())
    }

    /// Bind a battle. The player starts with full mana, no armor and no
    /// statuses left over from earlier fights; deck cooldowns carry over.
    pub fn with_config(
        player: &'a mut Player,
        enemy: &'a mut Enemy,
        dice: D,
        config: BattleConfig,
    ) -> Self {
        player.refill_mana();
        player.reset_armor();
        player.statuses_mut().clear();
        info!(player = %player.name, enemy = enemy.name(), "battle started");

        let planner = IntentPlanner::new(config.planner.clone());
        Self {
            player,
            enemy,
            dice,
            config,
            planner,
            hand: Vec::new(),
            hand_drawn: false,
            round: 1,
        }
    }

    pub fn player(&self) -> &Player {
        &*self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &*self.enemy
    }

    pub fn enemy_mut(&mut self) -> &mut Enemy {
        &mut *self.enemy
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Current hand, as snapshots of the deck entries
    pub fn hand(&self) -> Vec<Card> {
        self.hand
            .iter()
            .filter_map(|id| self.player.card(*id).cloned())
            .collect()
    }

    /// Roll a fresh intent for the enemy, replacing the telegraphed one
    pub fn plan_enemy_intent(&mut self) -> IntentKind {
        self.planner.plan(&mut *self.enemy, &mut self.dice)
    }

    /// Start-of-round draw. Every deck cooldown ticks down first; then up to
    /// `hand_size` ready cards are picked uniformly at random.
    pub fn draw_hand(&mut self) -> Vec<Card> {
        for card in self.player.master_deck.iter_mut() {
            card.tick_cooldown();
        }

        let mut ready: Vec<usize> = self
            .player
            .master_deck
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_ready())
            .map(|(idx, _)| idx)
            .collect();
        self.dice.shuffle_indices(&mut ready);
        ready.truncate(self.config.hand_size);

        let hand: Vec<Card> = ready
            .into_iter()
            .map(|idx| self.player.master_deck[idx].clone())
            .collect();
        self.hand = hand.iter().map(Card::id).collect();
        self.hand_drawn = true;
        debug!(round = self.round, cards = hand.len(), "hand drawn");
        hand
    }

    /// Resolve one card. Unplayable cards come back as a rejected result
    /// with the battle untouched. Once `draw_hand` has run this round, only
    /// cards from that hand (plus any drawn by a Draw ability) are playable.
    pub fn play_card(&mut self, card: &Card) -> CombatResult {
        let card = match self.check_playable(card.id()) {
            Ok(card) => card,
            Err(rejection) => {
                debug!(card = %card.name(), %rejection, "card rejected");
                return CombatResult::rejected(rejection);
            }
        };

        self.player.spend_mana(card.cost());
        self.hand.retain(|id| *id != card.id());
        if let Some(deck_card) = self.player.card_mut(card.id()) {
            deck_card.set_cooldown(self.config.card_cooldown);
        }

        let mut result = match card.effect() {
            CardEffect::Attack(value) => self.resolve_attack(&card, value),
            CardEffect::Defense(value) => {
                let armor = value.saturating_add(self.player.agility / 2);
                self.player.add_armor(armor);
                let mut result = CombatResult::new(format!(
                    "You played {} and gained {} armor.",
                    card.name(),
                    armor
                ));
                result.armor_gained = armor;
                result
            }
            CardEffect::Power(ability, value) => self.resolve_power(&card, ability, value),
        };

        info!(
            card = %card.name(),
            damage = result.damage_dealt,
            crit = result.is_crit,
            mana_left = self.player.current_mana(),
            "card played"
        );
        if self.enemy.is_dead() {
            result.message.push_str(&format!(" {} is defeated!", self.enemy.name()));
            self.announce(BattleOutcome::Victory);
        }
        result
    }

    fn check_playable(&self, id: CardId) -> Result<Card, Rejection> {
        let card = self.player.card(id).ok_or(Rejection::NotInDeck)?;
        if !card.is_ready() {
            return Err(Rejection::OnCooldown {
                remaining: card.cooldown(),
            });
        }
        if self.hand_drawn && !self.hand.contains(&id) {
            return Err(Rejection::NotInHand);
        }
        if card.cost() > self.player.current_mana() {
            return Err(Rejection::InsufficientMana {
                needed: card.cost(),
                available: self.player.current_mana(),
            });
        }
        if self.outcome().is_over() {
            return Err(Rejection::BattleOver);
        }
        Ok(card.clone())
    }

    fn resolve_attack(&mut self, card: &Card, value: u32) -> CombatResult {
        let mut damage = value.saturating_add(self.player.total_damage());
        let is_crit = Combat::roll_chance(&mut self.dice, self.player.crit_chance());
        debug!(chance = self.player.crit_chance(), is_crit, "crit roll");
        if is_crit {
            damage = Combat::apply_crit(damage);
        }
        self.enemy.take_damage(damage);

        let message = if is_crit {
            format!(
                "Critical hit! {} deals {} damage to {}.",
                card.name(),
                damage,
                self.enemy.name()
            )
        } else {
            format!(
                "You played {} and dealt {} damage to {}.",
                card.name(),
                damage,
                self.enemy.name()
            )
        };
        CombatResult {
            damage_dealt: damage,
            is_crit,
            ..CombatResult::new(message)
        }
    }

    fn resolve_power(&mut self, card: &Card, ability: Ability, value: u32) -> CombatResult {
        let mut result = CombatResult::new(format!("You played {}.", card.name()));
        let enemy = self.enemy.name().to_string();

        let narration = match ability {
            Ability::None => {
                result.healed = self.player.heal(value);
                result.message = format!(
                    "You played {} and recovered {} HP.",
                    card.name(),
                    result.healed
                );
                return result;
            }
            Ability::ManaSurge => {
                let gained = self
                    .player
                    .gain_mana(value, self.config.mana_surge_capped);
                format!("Mana surges! +{} mana.", gained)
            }
            Ability::Weaken => {
                self.enemy.add_status(StatusEffect::new(
                    StatusKind::Weaken,
                    self.config.weaken_magnitude,
                    self.config.weaken_rounds,
                ));
                format!(
                    "{} is weakened: -{} damage for {} rounds.",
                    enemy, self.config.weaken_magnitude, self.config.weaken_rounds
                )
            }
            Ability::Draw => match self.draw_extra() {
                Some(drawn) => {
                    let text = format!("You draw {}.", drawn.name());
                    result.drawn = Some(drawn);
                    text
                }
                None => "No card left to draw.".to_string(),
            },
            Ability::Stun | Ability::Fortify if value == 0 => {
                format!("{} fizzles; nothing happens.", card.name())
            }
            Ability::Stun => {
                self.enemy
                    .add_status(StatusEffect::new(StatusKind::Stun, 0, value));
                format!("{} is stunned for {} round(s).", enemy, value)
            }
            Ability::Fortify => {
                self.player
                    .add_status(StatusEffect::new(StatusKind::Fortify, 0, value));
                format!("Your armor will hold for {} round(s).", value)
            }
            Ability::Regenerate => {
                let rounds = self.config.regeneration_rounds;
                self.player.add_status(StatusEffect::new(
                    StatusKind::Regeneration,
                    value,
                    rounds,
                ));
                format!("You regenerate {} HP per round for {} rounds.", value, rounds)
            }
            Ability::Poison => {
                let rounds = self.config.poison_rounds;
                self.enemy
                    .add_status(StatusEffect::new(StatusKind::Poison, value, rounds));
                format!(
                    "{} is poisoned: {} damage per round for {} rounds.",
                    enemy, value, rounds
                )
            }
        };
        result.ability_message = Some(narration);
        result
    }

    /// One extra ready card not already in hand that is still affordable
    fn draw_extra(&mut self) -> Option<Card> {
        let mana = self.player.current_mana();
        let pool: Vec<&Card> = self
            .player
            .master_deck
            .iter()
            .filter(|c| c.is_ready() && c.cost() <= mana && !self.hand.contains(&c.id()))
            .collect();
        if pool.is_empty() {
            return None;
        }
        let drawn = pool[self.dice.pick_index(pool.len())].clone();
        self.hand.push(drawn.id());
        Some(drawn)
    }

    /// Resolve the enemy's telegraphed action, then plan the next one
    pub fn enemy_turn(&mut self) -> CombatResult {
        if self.outcome().is_over() {
            return CombatResult::rejected(Rejection::BattleOver);
        }

        let mut result = if self
            .enemy
            .statuses_mut()
            .consume_round(StatusKind::Stun)
            .is_some()
        {
            info!(enemy = self.enemy.name(), "enemy stunned");
            CombatResult {
                is_stunned: true,
                ..CombatResult::new(format!("{} is stunned and cannot act!", self.enemy.name()))
            }
        } else {
            self.resolve_intent()
        };

        self.planner.plan(&mut *self.enemy, &mut self.dice);
        if self.player.is_dead() {
            result.message.push_str(" You have fallen...");
            self.announce(BattleOutcome::Defeat);
        }
        result
    }

    fn resolve_intent(&mut self) -> CombatResult {
        let name = self.enemy.name().to_string();
        let intent = self.enemy.intent();
        info!(enemy = %name, intent = %intent, value = self.enemy.intent_value(), "enemy acts");

        match intent {
            IntentKind::Attack => {
                let damage = self.enemy.attack_damage();
                let dodge_chance = self.player.dodge_chance();
                let is_dodge = Combat::roll_chance(&mut self.dice, dodge_chance);
                debug!(chance = dodge_chance, is_dodge, "dodge roll");
                if is_dodge {
                    return CombatResult {
                        is_dodge: true,
                        ..CombatResult::new(format!("You dodged {}'s attack!", name))
                    };
                }
                let (blocked, lost) = self.player.absorb_hit(damage);
                let message = if blocked > 0 {
                    format!(
                        "{} attacks for {} damage ({} blocked, {} HP lost).",
                        name, damage, blocked, lost
                    )
                } else {
                    format!("{} attacks for {} damage.", name, damage)
                };
                CombatResult {
                    damage_dealt: damage,
                    ..CombatResult::new(message)
                }
            }
            IntentKind::Defend => {
                let healed = self.enemy.heal(self.enemy.intent_value());
                CombatResult {
                    healed,
                    ..CombatResult::new(format!("{} defends and recovers {} HP.", name, healed))
                }
            }
            IntentKind::Buff if self.enemy.can_buff() => {
                let value = self.enemy.intent_value();
                self.enemy.add_status(StatusEffect::new(
                    StatusKind::Enraged,
                    value,
                    self.config.enrage_rounds,
                ));
                CombatResult::new(format!("{} roars and gains +{} damage!", name, value))
            }
            IntentKind::Buff => CombatResult::new(format!("{} hesitates.", name)),
        }
    }

    /// Close the round: tick statuses (player first), reset armor unless
    /// Fortify held it, refill mana and advance the round counter.
    /// A finished battle is left as it is and only reports its outcome.
    pub fn end_round(&mut self) -> RoundReport {
        let outcome = self.outcome();
        if outcome.is_over() {
            return RoundReport {
                round: self.round,
                events: Vec::new(),
                armor_retained: false,
                outcome,
            };
        }

        let mut events = tick(&mut *self.player);
        if self.player.is_alive() {
            events.extend(tick(&mut *self.enemy));
        }

        let armor_retained = events
            .iter()
            .any(|e| matches!(e, StatusEvent::ArmorRetained { .. }));
        if !armor_retained {
            self.player.reset_armor();
        }
        self.player.refill_mana();

        let outcome = self.outcome();
        if outcome.is_over() {
            self.announce(outcome);
        }
        let report = RoundReport {
            round: self.round,
            events,
            armor_retained,
            outcome,
        };
        self.hand.clear();
        self.hand_drawn = false;
        self.round += 1;
        report
    }

    pub fn is_enemy_dead(&self) -> bool {
        self.enemy.is_dead()
    }

    pub fn is_player_dead(&self) -> bool {
        self.player.is_dead()
    }

    pub fn outcome(&self) -> BattleOutcome {
        if self.enemy.is_dead() {
            BattleOutcome::Victory
        } else if self.player.is_dead() {
            BattleOutcome::Defeat
        } else {
            BattleOutcome::Ongoing
        }
    }

    /// Display-only rendering of both ledgers
    pub fn status_summary(&self) -> String {
        format!(
            "{}: {} | {}: {}",
            self.player.name(),
            self.player.statuses().summary(),
            self.enemy.name(),
            self.enemy.statuses().summary()
        )
    }

    /// Run rounds until one side falls or `max_rounds` have been played.
    /// The chooser picks cards from the hand until it passes or a pick is
    /// rejected.
    pub fn fight<C: CardChooser + ?Sized>(
        &mut self,
        chooser: &mut C,
        max_rounds: u32,
    ) -> BattleOutcome {
        while self.round <= max_rounds {
            self.draw_hand();

            loop {
                let hand = self.hand();
                let Some(id) = chooser.choose(&hand, &*self.player, &*self.enemy) else {
                    break;
                };
                let Some(card) = hand.iter().find(|c| c.id() == id) else {
                    break;
                };
                let result = self.play_card(card);
                if result.is_rejected() {
                    break;
                }
                if self.outcome().is_over() {
                    return self.outcome();
                }
            }

            self.enemy_turn();
            if self.outcome().is_over() {
                return self.outcome();
            }

            let report = self.end_round();
            if report.outcome.is_over() {
                return report.outcome;
            }
        }

        info!(rounds = max_rounds, "battle abandoned at round limit");
        BattleOutcome::Abandoned
    }

    fn announce(&self, outcome: BattleOutcome) {
        info!(
            %outcome,
            round = self.round,
            player_hp = self.player.hp(),
            enemy_hp = self.enemy.hp(),
            "battle over"
        );
    }
}
