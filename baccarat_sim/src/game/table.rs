use crate::game::stats::Statistics;
use baccarat_lib::rules::{banker_draws, player_draws};
use baccarat_lib::{
    BaccaratGameError, BaccaratTable, Burn, Card, Hand, Outcome, RoundResult, Shoe,
};
use log::{debug, trace};
use rand::Rng;

/// The stages a single round moves through while it is being dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Ready,
    Dealt,
    NaturalSettled,
    PlayerDecided,
    BankerDecided,
    Settled,
}

/// Struct for a simulated baccarat table, i.e. one game session played from a single shoe until the
/// shoe is down to its last deck. Records the game level statistics of every round dealt.
pub struct BaccaratTableSim {
    shoe: Shoe,
    pub player_hand: Hand,
    pub banker_hand: Hand,
    stats: Statistics<Outcome>,
    burn: Option<Burn>,
    can_continue: bool,
    state: RoundState,
}

impl BaccaratTableSim {
    /// Associated method for opening a new session: builds a shoe of `num_decks` decks, shuffles it with
    /// `rng` and burns it. Fails with `ShoeEmpty` only if the shoe is too small to burn.
    pub fn new<R: Rng + ?Sized>(num_decks: usize, rng: &mut R) -> Result<Self, BaccaratGameError> {
        let mut shoe = Shoe::new(num_decks);
        shoe.shuffle(rng);
        let burn = shoe.burn()?;
        debug!(
            "new shoe of {} decks, burned {} and discarded {} cards",
            num_decks, burn.top_card, burn.discarded
        );
        let mut table = BaccaratTableSim::with_shoe(shoe);
        table.burn = Some(burn);
        Ok(table)
    }

    /// Opens a session on a shoe that has already been prepared, no shuffle or burn is performed.
    pub fn with_shoe(shoe: Shoe) -> Self {
        BaccaratTableSim {
            shoe,
            player_hand: Hand::new(),
            banker_hand: Hand::new(),
            stats: Statistics::new(),
            burn: None,
            can_continue: true,
            state: RoundState::Ready,
        }
    }

    pub fn stats(&self) -> &Statistics<Outcome> {
        &self.stats
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// The burn performed when the session was opened, if any.
    pub fn burn(&self) -> Option<Burn> {
        self.burn
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    fn transition(&mut self, state: RoundState) {
        trace!("round state {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// Draws the next card. Gating guarantees at least a deck remains whenever a round starts,
    /// so an empty shoe here is a defect.
    fn next_card(&mut self) -> Result<Card, BaccaratGameError> {
        let card = self.shoe.draw();
        debug_assert!(card.is_ok(), "shoe emptied mid round");
        card
    }

    /// Deals two cards to the player and two cards to the banker using the order: player, banker, player, banker.
    fn deal_hands(&mut self) -> Result<(), BaccaratGameError> {
        self.player_hand.clear();
        self.banker_hand.clear();
        for _ in 0..2 {
            let card = self.next_card()?;
            self.player_hand.receive_card(card);
            let card = self.next_card()?;
            self.banker_hand.receive_card(card);
        }
        self.transition(RoundState::Dealt);
        Ok(())
    }

    /// Compares the final hands, records the result and returns it.
    fn settle(&mut self) -> RoundResult {
        let player_score = self.player_hand.score();
        let banker_score = self.banker_hand.score();
        let result = if player_score > banker_score {
            RoundResult {
                outcome: Outcome::Player,
                score: player_score,
            }
        } else if banker_score > player_score {
            RoundResult {
                outcome: Outcome::Banker,
                score: banker_score,
            }
        } else {
            RoundResult {
                outcome: Outcome::Tie,
                score: player_score,
            }
        };
        self.stats.record(result.outcome);
        self.transition(RoundState::Settled);
        debug!(
            "player {} banker {} -> {} {}",
            self.player_hand, self.banker_hand, result.outcome, result.score
        );
        result
    }
}

impl BaccaratTable for BaccaratTableSim {
    fn can_continue(&self) -> bool {
        self.can_continue && self.shoe.can_deal()
    }

    /// Plays a single round according to the fixed drawing rules.
    fn play_round(&mut self) -> Result<RoundResult, BaccaratGameError> {
        if !self.can_continue() {
            self.can_continue = false;
            return Err(BaccaratGameError::ShoeExhausted);
        }
        self.transition(RoundState::Ready);
        self.deal_hands()?;

        if self.player_hand.is_natural() || self.banker_hand.is_natural() {
            self.transition(RoundState::NaturalSettled);
            return Ok(self.settle());
        }

        let mut player_third = None;
        if player_draws(self.player_hand.score()) {
            let card = self.next_card()?;
            player_third = Some(card.pip_value());
            self.player_hand.receive_card(card);
        }
        self.transition(RoundState::PlayerDecided);

        if banker_draws(self.banker_hand.score(), player_third) {
            let card = self.next_card()?;
            self.banker_hand.receive_card(card);
        }
        self.transition(RoundState::BankerDecided);

        Ok(self.settle())
    }
}
