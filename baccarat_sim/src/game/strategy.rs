use crate::game::stats::BetResult;
use baccarat_lib::Side;
use rand::{Rng, RngCore};
use std::fmt::Display;

pub mod prelude {
    pub use super::{
        AlwaysBanker, AlwaysPlayer, BetState, BettingStrategy, FlatBetting, GuessStrategy,
        MartingaleBetting, PlayerStrategy, PlayerStrategyDyn, RandomGuess, Strategy,
    };
}

/// Struct for encapsulating all the information a `BettingStrategy` needs to size the next bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetState {
    /// The bet placed on the previous round, before any clamping of the next bet.
    pub current_bet: u64,
    pub min_bet: u64,
    /// The result of the previous round, `None` if no round has been played yet.
    pub last_result: Option<BetResult>,
}

/// Trait for a generic betting strategy. Returns the desired bet for the next round, the caller is
/// responsible for clamping it to the table maximum and the bettor's bankroll.
pub trait BettingStrategy {
    fn bet(&self, state: BetState) -> u64;
    fn label(&self) -> String;
}

/// Trait for deciding which side to back on the next round.
pub trait GuessStrategy {
    fn guess(&mut self, rng: &mut dyn RngCore) -> Side;
    fn label(&self) -> String;
}

/// Progressive betting: double the bet after a loss, return to the minimum after a win, and hold the
/// bet after a tie.
#[derive(Debug, Clone, Copy, Default)]
pub struct MartingaleBetting;

impl MartingaleBetting {
    pub fn new() -> MartingaleBetting {
        MartingaleBetting
    }
}

impl BettingStrategy for MartingaleBetting {
    fn bet(&self, state: BetState) -> u64 {
        match state.last_result {
            None | Some(BetResult::Win) => state.min_bet,
            Some(BetResult::Tie) => state.current_bet,
            Some(BetResult::Loss) => state.current_bet.saturating_mul(2),
        }
    }

    fn label(&self) -> String {
        "martingale".to_string()
    }
}

/// Always bets the table minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatBetting;

impl FlatBetting {
    pub fn new() -> FlatBetting {
        FlatBetting
    }
}

impl BettingStrategy for FlatBetting {
    fn bet(&self, state: BetState) -> u64 {
        state.min_bet
    }

    fn label(&self) -> String {
        "flat".to_string()
    }
}

/// Backs player or banker with equal probability, the naive baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGuess;

impl RandomGuess {
    pub fn new() -> RandomGuess {
        RandomGuess
    }
}

impl GuessStrategy for RandomGuess {
    fn guess(&mut self, rng: &mut dyn RngCore) -> Side {
        if rng.gen_bool(0.5) {
            Side::Banker
        } else {
            Side::Player
        }
    }

    fn label(&self) -> String {
        "random".to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysBanker;

impl GuessStrategy for AlwaysBanker {
    fn guess(&mut self, _rng: &mut dyn RngCore) -> Side {
        Side::Banker
    }

    fn label(&self) -> String {
        "banker".to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysPlayer;

impl GuessStrategy for AlwaysPlayer {
    fn guess(&mut self, _rng: &mut dyn RngCore) -> Side {
        Side::Player
    }

    fn label(&self) -> String {
        "player".to_string()
    }
}

/// A struct that combines a guessing strategy and a betting strategy into a full playing strategy.
pub struct PlayerStrategy<G, B>
where
    G: GuessStrategy,
    B: BettingStrategy,
{
    guess_strategy: G,
    betting_strategy: B,
}

impl<G, B> PlayerStrategy<G, B>
where
    G: GuessStrategy,
    B: BettingStrategy,
{
    pub fn new(guess_strategy: G, betting_strategy: B) -> PlayerStrategy<G, B> {
        PlayerStrategy {
            guess_strategy,
            betting_strategy,
        }
    }
}

impl<G, B> Display for PlayerStrategy<G, B>
where
    G: GuessStrategy,
    B: BettingStrategy,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Strategy::label(self))
    }
}

/// A trait for creating dynamic strategy trait objects. Useful for when testing multiple strategies against each other.
pub trait Strategy {
    fn bet(&self, state: BetState) -> u64;
    fn guess(&mut self, rng: &mut dyn RngCore) -> Side;
    fn label(&self) -> String;
}

pub type PlayerStrategyDyn = dyn Strategy + Send;

impl<G, B> Strategy for PlayerStrategy<G, B>
where
    G: GuessStrategy,
    B: BettingStrategy,
{
    fn bet(&self, state: BetState) -> u64 {
        self.betting_strategy.bet(state)
    }

    fn guess(&mut self, rng: &mut dyn RngCore) -> Side {
        self.guess_strategy.guess(rng)
    }

    fn label(&self) -> String {
        format!(
            "{}/{}",
            self.guess_strategy.label(),
            self.betting_strategy.label()
        )
    }
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn bet(&self, state: BetState) -> u64 {
        (**self).bet(state)
    }

    fn guess(&mut self, rng: &mut dyn RngCore) -> Side {
        (**self).guess(rng)
    }

    fn label(&self) -> String {
        (**self).label()
    }
}
