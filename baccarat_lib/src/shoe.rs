use crate::card::{standard_deck, Card, DECK_SIZE};
use crate::BaccaratGameError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// Record of the burn procedure performed on a freshly shuffled shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Burn {
    /// The card drawn to determine how many cards to discard.
    pub top_card: Card,
    /// The number of cards discarded after the top card.
    pub discarded: usize,
}

/// Struct for a shoe made up of one or more standard decks. Cards are always drawn from the front
/// and the remaining cards are never reordered after the shoe has been shuffled.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: VecDeque<Card>,
    num_decks: usize,
}

impl Shoe {
    /// Associated function that builds an unshuffled shoe of `num_decks` canonical decks laid end to end.
    pub fn new(num_decks: usize) -> Shoe {
        let mut cards = VecDeque::with_capacity(num_decks * DECK_SIZE);
        for _ in 0..num_decks {
            cards.extend(standard_deck());
        }
        Shoe { cards, num_decks }
    }

    /// Builds a shoe that will deal `cards` in exactly the given order. Mainly useful for scripting rounds.
    pub fn from_cards(cards: Vec<Card>) -> Shoe {
        let num_decks = (cards.len() + DECK_SIZE - 1) / DECK_SIZE;
        Shoe {
            cards: VecDeque::from(cards),
            num_decks,
        }
    }

    /// Shuffles every card currently in the shoe as a single pool using the generator `rng`.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Removes and returns the card at the front of the shoe.
    pub fn draw(&mut self) -> Result<Card, BaccaratGameError> {
        self.cards.pop_front().ok_or(BaccaratGameError::ShoeEmpty)
    }

    /// Performs the burn: draws one card and discards as many further cards as its pip value.
    pub fn burn(&mut self) -> Result<Burn, BaccaratGameError> {
        let top_card = self.draw()?;
        let discarded = top_card.pip_value() as usize;
        for _ in 0..discarded {
            self.draw()?;
        }
        Ok(Burn {
            top_card,
            discarded,
        })
    }

    /// Returns the number of cards left in the shoe.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The number of decks the shoe was built from.
    pub fn num_decks(&self) -> usize {
        self.num_decks
    }

    /// Returns how many decks, counting a partially dealt deck as a whole one, are still in the shoe.
    pub fn decks_remaining(&self) -> usize {
        (self.cards.len() + DECK_SIZE - 1) / DECK_SIZE
    }

    /// Returns true while more than one deck remains, i.e. while the shoe can support another round.
    pub fn can_deal(&self) -> bool {
        self.decks_remaining() > 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
