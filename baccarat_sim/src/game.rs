//! Module that focuses on the simulation of a single game session of baccarat. In other words,
//!  this module provides all the functionality needed to play one shoe with a given betting strategy.

pub mod player;
pub mod stats;
pub mod strategy;
pub mod table;
pub mod prelude {
    pub use super::BaccaratGameSim;
    pub use crate::game::player::{PlayerSim, StopReason};
    pub use crate::game::stats::{format_percentage, BetResult, Category, Statistics};
    pub use crate::game::strategy;
    pub use crate::game::table::{BaccaratTableSim, RoundState};
    pub use baccarat_lib::{BaccaratGameError, BaccaratTable, Outcome, RoundResult, Side};
}

pub use prelude::*;
use strategy::Strategy;

/// Struct that plays one session: a player betting against a single table until the table's shoe is
/// exhausted or the player runs out of funds.
pub struct BaccaratGameSim<'a, S: Strategy> {
    table: BaccaratTableSim,
    player: &'a mut PlayerSim<S>,
    pub stop_reason: Option<StopReason>,
}

impl<'a, S: Strategy> BaccaratGameSim<'a, S> {
    /// Associated method for building a new game session. The player's bet statistics are reset,
    /// its bankroll carries over. If `start_with_minimum_bet` is set the first bet is the table minimum.
    pub fn new(
        table: BaccaratTableSim,
        player: &'a mut PlayerSim<S>,
        start_with_minimum_bet: bool,
    ) -> BaccaratGameSim<'a, S> {
        player.start_new_session(start_with_minimum_bet);
        BaccaratGameSim {
            table,
            player,
            stop_reason: None,
        }
    }

    /// Runs the session to completion and returns why it stopped.
    pub fn run(&mut self) -> StopReason {
        let reason = self.player.play_until_stopped(&mut self.table);
        self.stop_reason = Some(reason);
        reason
    }

    pub fn table(&self) -> &BaccaratTableSim {
        &self.table
    }

    pub fn player(&self) -> &PlayerSim<S> {
        self.player
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strategy::{MartingaleBetting, PlayerStrategy, RandomGuess};

    #[test]
    fn test_game() {
        let mut rng = StdRng::seed_from_u64(31);
        let strategy = PlayerStrategy::new(RandomGuess::new(), MartingaleBetting::new());
        let mut player = PlayerSim::new(500_000, 10, 5_000_000, strategy, StdRng::seed_from_u64(32));

        for _ in 0..3 {
            let table = BaccaratTableSim::new(6, &mut rng).unwrap();
            let mut game = BaccaratGameSim::new(table, &mut player, true);
            let reason = game.run();
            assert_eq!(game.stop_reason, Some(reason));
            if reason == StopReason::OutOfFunds {
                break;
            }
            assert!(!game.table().can_continue());
            assert_eq!(
                game.player().stats().total(),
                game.table().stats().total()
            );
        }
    }

    #[test]
    fn test_broke_player_places_no_bets() {
        let mut rng = StdRng::seed_from_u64(4);
        let strategy = PlayerStrategy::new(RandomGuess::new(), MartingaleBetting::new());
        let mut player = PlayerSim::new(5, 10, 5_000_000, strategy, StdRng::seed_from_u64(4));
        let table = BaccaratTableSim::new(6, &mut rng).unwrap();
        let mut game = BaccaratGameSim::new(table, &mut player, true);
        assert_eq!(game.run(), StopReason::OutOfFunds);
        assert_eq!(game.table().stats().total(), 0);
        assert_eq!(game.player().balance(), 5);
    }
}
