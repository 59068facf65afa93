//src/rewards.rs
use cards::{Card, CardId, CardLibrary};
use combat::{Enemy, HasHealth};
use hero::Player;
use rand::Rng;
use tracing::info;

/// Share of max HP restored after a won fight, in percent
const POST_FIGHT_HEAL_PERCENT: u32 = 15;

/// What a won battle paid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reward {
    pub gold: u32,
    pub xp: u32,
    pub healed: u32,
    pub levelled_up: bool,
    pub card: Option<Card>,
}

/// Add a copy of `card` to the player's deck under a fresh identity, so the
/// deck never shares an instance with a shop, a library or another deck.
pub fn grant_card(player: &mut Player, card: &Card) -> CardId {
    let granted = card.reissue();
    let id = granted.id();
    player.master_deck.push(granted);
    id
}

/// Pay out a victory over `enemy`. `tier` is the wave or stage number and
/// scales gold and XP; bosses also drop a random library card.
pub fn victory_reward<R: Rng + ?Sized>(
    player: &mut Player,
    enemy: &Enemy,
    tier: u32,
    rng: &mut R,
) -> Reward {
    let gold = rng.random_range(10..=30) + 3 * tier;
    let xp = 10 + 8 * tier;
    player.add_gold(gold);
    let levelled_up = player.gain_xp(xp);
    let healed = player.heal(player.max_hp() * POST_FIGHT_HEAL_PERCENT / 100);

    let card = enemy.is_boss().then(|| {
        let card = CardLibrary::random_card(rng, player.level);
        grant_card(player, &card);
        card
    });

    info!(
        enemy = enemy.name(),
        gold,
        xp,
        healed,
        card = card.as_ref().map(Card::name),
        "victory reward"
    );
    Reward {
        gold,
        xp,
        healed,
        levelled_up,
        card,
    }
}
