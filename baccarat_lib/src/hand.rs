use crate::card::Card;
use std::fmt::Display;

/// Computes the baccarat point total of `cards`, the sum of their pip values modulo 10.
pub fn score(cards: &[Card]) -> u8 {
    let total: u32 = cards.iter().map(|card| card.pip_value() as u32).sum();
    (total % 10) as u8
}

/// Struct for one side's hand during a single round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(3),
        }
    }

    pub fn from_cards(cards: Vec<Card>) -> Hand {
        Hand { cards }
    }

    /// Method for receiving a card, appends `card` to the end of the hand.
    pub fn receive_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self) -> u8 {
        score(&self.cards)
    }

    /// A natural is a two card hand scoring 8 or 9.
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.score() >= 8
    }

    /// Returns the third card of the hand if one was drawn.
    pub fn third_card(&self) -> Option<&Card> {
        self.cards.get(2)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "[{}] ({})", cards, self.score())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::card::{standard_deck, Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(Suit::Diamonds, rank)
    }

    #[test]
    fn test_score_is_pip_sum_mod_ten() {
        let deck = standard_deck();
        for a in deck.iter().take(13) {
            for b in deck.iter().take(13) {
                for c in deck.iter().take(13) {
                    let cards = [*a, *b, *c];
                    let expected = (a.pip_value() + b.pip_value() + c.pip_value()) % 10;
                    assert_eq!(score(&cards), expected);
                    assert!(score(&cards) <= 9);
                }
            }
        }
    }

    #[test]
    fn test_face_cards_count_zero() {
        let hand = Hand::from_cards(vec![card(Rank::King), card(Rank::Ten), card(Rank::Three)]);
        assert_eq!(hand.score(), 3);
        assert_eq!(score(&[]), 0);
    }

    #[test]
    fn test_naturals() {
        assert!(Hand::from_cards(vec![card(Rank::Four), card(Rank::Four)]).is_natural());
        assert!(Hand::from_cards(vec![card(Rank::Queen), card(Rank::Nine)]).is_natural());
        // 8 with three cards is not a natural
        let three = Hand::from_cards(vec![card(Rank::Two), card(Rank::Two), card(Rank::Four)]);
        assert_eq!(three.score(), 8);
        assert!(!three.is_natural());
        assert!(!Hand::from_cards(vec![card(Rank::Seven), card(Rank::King)]).is_natural());
    }

    #[test]
    fn test_receive_and_third_card() {
        let mut hand = Hand::new();
        assert!(hand.is_empty());
        hand.receive_card(card(Rank::Ace));
        hand.receive_card(card(Rank::Two));
        assert_eq!(hand.third_card(), None);
        hand.receive_card(card(Rank::Six));
        assert_eq!(hand.third_card().map(|c| c.pip_value()), Some(6));
        assert_eq!(hand.score(), 9);
        assert_eq!(
            hand.to_string(),
            "[Ace of Diamonds, Two of Diamonds, Six of Diamonds] (9)"
        );
        hand.clear();
        assert_eq!(hand.len(), 0);
    }
}
