use crate::game::stats::{BetResult, Statistics};
use crate::game::strategy::{BetState, Strategy};
use baccarat_lib::{BaccaratGameError, BaccaratTable, Outcome};
use log::{debug, warn};
use rand::rngs::StdRng;
use std::fmt::Display;

/// Why a player stopped betting on a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The table could not deal another round.
    ShoeExhausted,
    /// The bankroll fell below the minimum bet.
    OutOfFunds,
}

/// Struct for a simulated bettor. Carries a bankroll across sessions and records bet level statistics
/// for the current session.
pub struct PlayerSim<S: Strategy> {
    strategy: S,
    rng: StdRng,
    pub initial_bankroll: u64,
    pub bankroll: u64,
    min_bet: u64,
    max_bet: u64,
    current_bet: u64,
    won_last_hand: bool,
    tied_last_hand: bool,
    max_bet_seen: u64,
    stats: Statistics<BetResult>,
}

impl<S: Strategy> PlayerSim<S> {
    /// Associated function to create a new `PlayerSim` struct. `rng` is the player's own generator, used
    /// only for guessing which side to back.
    pub fn new(bankroll: u64, min_bet: u64, max_bet: u64, strategy: S, rng: StdRng) -> PlayerSim<S> {
        PlayerSim {
            strategy,
            rng,
            initial_bankroll: bankroll,
            bankroll,
            min_bet,
            max_bet,
            current_bet: min_bet,
            won_last_hand: true,
            tied_last_hand: false,
            max_bet_seen: 0,
            stats: Statistics::new(),
        }
    }

    /// Prepares the player for a fresh session. Bet statistics are cleared but the bankroll is kept.
    /// If `start_with_minimum_bet` is set the first bet of the session is the minimum bet.
    pub fn start_new_session(&mut self, start_with_minimum_bet: bool) {
        self.stats.reset();
        self.max_bet_seen = 0;
        if start_with_minimum_bet {
            self.won_last_hand = true;
            self.tied_last_hand = false;
        }
    }

    /// Restores the player to its starting bankroll and clears the betting progression and statistics.
    pub fn reset(&mut self) {
        self.bankroll = self.initial_bankroll;
        self.current_bet = self.min_bet;
        self.start_new_session(true);
    }

    /// Method for determining whether the player can afford to continue to play or not
    pub fn continue_play(&self) -> bool {
        self.bankroll >= self.min_bet
    }

    pub fn balance(&self) -> u64 {
        self.bankroll
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn won_last_hand(&self) -> bool {
        self.won_last_hand
    }

    pub fn tied_last_hand(&self) -> bool {
        self.tied_last_hand
    }

    /// The largest bet placed during the current session.
    pub fn max_bet_seen(&self) -> u64 {
        self.max_bet_seen
    }

    pub fn stats(&self) -> &Statistics<BetResult> {
        &self.stats
    }

    pub fn label(&self) -> String {
        self.strategy.label()
    }

    fn last_result(&self) -> BetResult {
        if self.won_last_hand {
            BetResult::Win
        } else if self.tied_last_hand {
            BetResult::Tie
        } else {
            BetResult::Loss
        }
    }

    /// Sizes the next bet: the strategy picks a bet from the previous result, then the bet is clamped to
    /// the table maximum and after that to the bankroll.
    pub fn next_bet(&self) -> u64 {
        let state = BetState {
            current_bet: self.current_bet,
            min_bet: self.min_bet,
            last_result: Some(self.last_result()),
        };
        self.strategy
            .bet(state)
            .min(self.max_bet)
            .min(self.bankroll)
    }

    /// Bets on a single round against `table`, or returns why the player has to stop instead.
    pub fn play_round<T: BaccaratTable>(&mut self, table: &mut T) -> Result<BetResult, StopReason> {
        if !table.can_continue() {
            return Err(StopReason::ShoeExhausted);
        }
        if !self.continue_play() {
            return Err(StopReason::OutOfFunds);
        }

        self.current_bet = self.next_bet();
        if self.current_bet > self.max_bet_seen {
            self.max_bet_seen = self.current_bet;
        }

        // Place the bet
        self.bankroll -= self.current_bet;
        let guess = self.strategy.guess(&mut self.rng);

        let round = match table.play_round() {
            Ok(round) => round,
            Err(BaccaratGameError::ShoeExhausted) => {
                warn!("table refused a round after a bet was placed, refunding");
                self.bankroll += self.current_bet;
                return Err(StopReason::ShoeExhausted);
            }
            Err(BaccaratGameError::ShoeEmpty) => {
                warn!("shoe emptied mid round, refunding");
                self.bankroll += self.current_bet;
                return Err(StopReason::ShoeExhausted);
            }
        };

        let result = match round.outcome {
            Outcome::Tie => {
                // Push, the stake is returned
                self.bankroll += self.current_bet;
                self.won_last_hand = false;
                self.tied_last_hand = true;
                BetResult::Tie
            }
            outcome if outcome.winner() == Some(guess) => {
                self.bankroll += self.current_bet * 2;
                self.won_last_hand = true;
                self.tied_last_hand = false;
                BetResult::Win
            }
            _ => {
                self.won_last_hand = false;
                self.tied_last_hand = false;
                BetResult::Loss
            }
        };
        self.stats.record(result);
        debug!(
            "bet {} on {:?}, {} {} -> {}, bankroll {}",
            self.current_bet, guess, round.outcome, round.score, result, self.bankroll
        );

        Ok(result)
    }

    /// Bets round after round until the table is exhausted or the bankroll falls below the minimum bet.
    pub fn play_until_stopped<T: BaccaratTable>(&mut self, table: &mut T) -> StopReason {
        loop {
            if let Err(reason) = self.play_round(table) {
                return reason;
            }
        }
    }
}

impl<S: Strategy> Display for PlayerSim<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: bankroll {}, current bet {}, max bet {}",
            self.label(),
            self.bankroll,
            self.current_bet,
            self.max_bet_seen
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::strategy::{
        AlwaysBanker, GuessStrategy, MartingaleBetting, PlayerStrategy, RandomGuess,
    };
    use crate::game::table::BaccaratTableSim;
    use baccarat_lib::{RoundResult, Side};
    use rand::{RngCore, SeedableRng};
    use std::collections::VecDeque;

    /// A table that deals a fixed list of outcomes and then reports the shoe as exhausted.
    struct ScriptedTable {
        outcomes: VecDeque<Outcome>,
        rounds_played: usize,
    }

    impl ScriptedTable {
        fn new(outcomes: &[Outcome]) -> Self {
            ScriptedTable {
                outcomes: outcomes.iter().copied().collect(),
                rounds_played: 0,
            }
        }
    }

    impl BaccaratTable for ScriptedTable {
        fn can_continue(&self) -> bool {
            !self.outcomes.is_empty()
        }

        fn play_round(&mut self) -> Result<RoundResult, BaccaratGameError> {
            let outcome = self
                .outcomes
                .pop_front()
                .ok_or(BaccaratGameError::ShoeExhausted)?;
            self.rounds_played += 1;
            Ok(RoundResult { outcome, score: 5 })
        }
    }

    fn banker_bettor(
        bankroll: u64,
        min_bet: u64,
        max_bet: u64,
    ) -> PlayerSim<PlayerStrategy<AlwaysBanker, MartingaleBetting>> {
        PlayerSim::new(
            bankroll,
            min_bet,
            max_bet,
            PlayerStrategy::new(AlwaysBanker, MartingaleBetting::new()),
            StdRng::seed_from_u64(0),
        )
    }

    /// Records every bet sized by the player, in order, by asking for the next bet before each round.
    fn bets_for(outcomes: &[Outcome], bankroll: u64, max_bet: u64) -> (Vec<u64>, u64) {
        let mut player = banker_bettor(bankroll, 10, max_bet);
        let mut table = ScriptedTable::new(outcomes);
        let mut bets = vec![];
        while let Ok(_) = player.play_round(&mut table) {
            bets.push(player.current_bet());
        }
        (bets, player.balance())
    }

    #[test]
    fn test_doubling_after_loss_and_reset_after_win() {
        use Outcome::*;
        let (bets, bankroll) =
            bets_for(&[Player, Player, Player, Banker, Player], 500_000, 5_000_000);
        assert_eq!(bets, vec![10, 20, 40, 80, 10]);
        // lost 10 + 20 + 40, won 80, lost 10
        assert_eq!(bankroll, 500_000 - 70 + 80 - 10);
    }

    #[test]
    fn test_tie_holds_bet_and_pushes() {
        use Outcome::*;
        let (bets, bankroll) = bets_for(&[Player, Tie, Tie, Player, Banker], 1_000, 5_000_000);
        assert_eq!(bets, vec![10, 20, 20, 20, 40]);
        assert_eq!(bankroll, 1_000 - 10 - 20 + 40);
    }

    #[test]
    fn test_bet_clamped_to_max_bet() {
        use Outcome::*;
        let (bets, _) = bets_for(&[Player, Player, Player, Player], 500_000, 50);
        assert_eq!(bets, vec![10, 20, 40, 50]);
    }

    #[test]
    fn test_bet_clamped_to_bankroll_after_max_bet() {
        use Outcome::*;
        // 100 - 10 - 20 = 70 left, doubling wants 40, then 80 but only 30 remain
        let (bets, bankroll) = bets_for(&[Player, Player, Player, Player, Banker], 100, 5_000_000);
        assert_eq!(bets, vec![10, 20, 40, 30]);
        assert_eq!(bankroll, 0);
    }

    #[test]
    fn test_tie_bet_is_clamped_to_bankroll() {
        // a bet held over a tie is still clamped to what is left
        let mut player = banker_bettor(100, 10, 5_000_000);
        let mut table = ScriptedTable::new(&[Outcome::Player, Outcome::Player, Outcome::Tie]);
        player.play_round(&mut table).unwrap();
        player.play_round(&mut table).unwrap();
        assert_eq!(player.balance(), 70);
        player.play_round(&mut table).unwrap();
        assert_eq!(player.current_bet(), 40);
        assert_eq!(player.balance(), 70);
        player.bankroll = 25;
        assert_eq!(player.next_bet(), 25);
    }

    #[test]
    fn test_stops_when_out_of_funds() {
        use Outcome::*;
        let mut player = banker_bettor(30, 10, 5_000_000);
        let mut table = ScriptedTable::new(&[Player, Player, Player, Player]);
        assert_eq!(player.play_until_stopped(&mut table), StopReason::OutOfFunds);
        assert_eq!(table.rounds_played, 2);
        assert_eq!(player.balance(), 0);
        assert_eq!(player.stats().max_streak(BetResult::Loss), 2);
    }

    #[test]
    fn test_stops_when_shoe_exhausted() {
        use Outcome::*;
        let mut player = banker_bettor(1_000, 10, 5_000_000);
        let mut table = ScriptedTable::new(&[Banker, Banker, Tie, Banker]);
        assert_eq!(player.play_until_stopped(&mut table), StopReason::ShoeExhausted);
        let stats = player.stats();
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.wins(), 3);
        assert_eq!(stats.ties(), 1);
        assert_eq!(stats.max_streak(BetResult::Win), 2);
        assert_eq!(stats.current_streak(BetResult::Win), 1);
        assert_eq!(player.balance(), 1_030);
    }

    #[test]
    fn test_max_bet_seen_and_session_reset() {
        use Outcome::*;
        let mut player = banker_bettor(1_000, 10, 5_000_000);
        let mut table = ScriptedTable::new(&[Player, Player, Player]);
        player.play_until_stopped(&mut table);
        assert_eq!(player.max_bet_seen(), 40);
        assert!(!player.won_last_hand());

        player.start_new_session(false);
        assert_eq!(player.max_bet_seen(), 0);
        assert_eq!(player.stats().total(), 0);
        assert_eq!(player.balance(), 930);
        // the progression carries over when not starting at the minimum
        assert_eq!(player.next_bet(), 80);

        player.start_new_session(true);
        assert_eq!(player.next_bet(), 10);

        player.reset();
        assert_eq!(player.balance(), 1_000);
        assert_eq!(player.current_bet(), 10);
    }

    /// Always guesses the side it was given, so the outcome of a round decides the bet result.
    struct Fixed(Side);

    impl GuessStrategy for Fixed {
        fn guess(&mut self, _rng: &mut dyn RngCore) -> Side {
            self.0
        }

        fn label(&self) -> String {
            "fixed".to_string()
        }
    }

    #[test]
    fn test_player_side_guess() {
        use Outcome::*;
        let mut player = PlayerSim::new(
            100,
            10,
            1_000,
            PlayerStrategy::new(Fixed(Side::Player), MartingaleBetting::new()),
            StdRng::seed_from_u64(0),
        );
        let mut table = ScriptedTable::new(&[Player, Banker]);
        assert_eq!(player.play_round(&mut table), Ok(BetResult::Win));
        assert_eq!(player.play_round(&mut table), Ok(BetResult::Loss));
        assert_eq!(player.balance(), 100);
    }

    #[test]
    fn test_play_until_stopped_terminates_on_real_shoe() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut table = BaccaratTableSim::new(6, &mut rng).unwrap();
        let mut player = PlayerSim::new(
            500_000,
            10,
            5_000_000,
            PlayerStrategy::new(RandomGuess::new(), MartingaleBetting::new()),
            StdRng::seed_from_u64(18),
        );
        let reason = player.play_until_stopped(&mut table);
        assert_eq!(reason, StopReason::ShoeExhausted);
        assert!(!table.can_continue());
        let stats = player.stats();
        assert_eq!(stats.total(), table.stats().total());
        assert_eq!(stats.ties(), table.stats().ties());
        assert!(player.max_bet_seen() >= 10);
        assert!(player.max_bet_seen() <= 5_000_000);
    }
}
