//! Building blocks for simulating punto banco baccarat: cards, a multi deck shoe,
//! hand scoring, the fixed drawing rules, and the `BaccaratTable` trait a betting player plays against.

pub mod card;
pub mod hand;
pub mod rules;
pub mod shoe;

pub use card::{standard_deck, Card, Rank, Suit, DECK_SIZE, RANK_TABLE};
pub use hand::{score, Hand};
pub use shoe::{Burn, Shoe};

use std::fmt::Display;
use thiserror::Error;

/// Errors that can occur while dealing from a shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BaccaratGameError {
    /// The shoe is down to its last deck, no further rounds will be dealt.
    #[error("the shoe is exhausted")]
    ShoeExhausted,
    /// A card was requested from an empty shoe.
    #[error("attempted to draw from an empty shoe")]
    ShoeEmpty,
}

/// The side a bet can be placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Banker,
}

/// The result of a single round of baccarat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Player,
    Banker,
    Tie,
}

impl Outcome {
    /// Returns the side that won, `None` for a tie.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Player => Some(Side::Player),
            Outcome::Banker => Some(Side::Banker),
            Outcome::Tie => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Player => write!(f, "player"),
            Outcome::Banker => write!(f, "banker"),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}

/// The settled result of a round: who won and with what total. For a tie `score` is the tied total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub outcome: Outcome,
    pub score: u8,
}

/// Trait for a baccarat table that a player can bet against, one round at a time.
pub trait BaccaratTable {
    /// Returns true if the table can deal another full round.
    fn can_continue(&self) -> bool;
    /// Deals and settles a single round. Returns `BaccaratGameError::ShoeExhausted` without drawing
    /// any cards if the table cannot continue.
    fn play_round(&mut self) -> Result<RoundResult, BaccaratGameError>;
}
