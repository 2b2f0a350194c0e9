use std::fmt::Display;

/// The number of cards in a single standard deck.
pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// All four suits, in the order a fresh deck is laid out.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

/// Ordered lookup table of every rank and its pip value. Decks are built by walking this table,
/// so the unshuffled order of a shoe never depends on anything but the table itself.
pub const RANK_TABLE: [(Rank, u8); 13] = [
    (Rank::Ace, 1),
    (Rank::Two, 2),
    (Rank::Three, 3),
    (Rank::Four, 4),
    (Rank::Five, 5),
    (Rank::Six, 6),
    (Rank::Seven, 7),
    (Rank::Eight, 8),
    (Rank::Nine, 9),
    (Rank::Ten, 10),
    (Rank::Jack, 10),
    (Rank::Queen, 10),
    (Rank::King, 10),
];

impl Rank {
    /// Returns the pip value of the rank: 1 for an ace, 10 for tens and face cards,
    /// and the numeric value of the rank otherwise.
    pub fn pip_value(&self) -> u8 {
        RANK_TABLE[*self as usize].1
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }
}

/// Struct for a single immutable playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    suit: Suit,
    rank: Rank,
    pip_value: u8,
}

impl Card {
    /// Associated function for creating a new `Card`, the pip value is derived from `rank`.
    pub fn new(suit: Suit, rank: Rank) -> Card {
        Card {
            suit,
            rank,
            pip_value: rank.pip_value(),
        }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn pip_value(&self) -> u8 {
        self.pip_value
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank.name(), self.suit.name())
    }
}

/// Returns a single canonical 52 card deck, suit by suit, each suit ordered ace through king.
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| RANK_TABLE.iter().map(move |&(rank, _)| Card::new(suit, rank)))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pip_values() {
        assert_eq!(Rank::Ace.pip_value(), 1);
        assert_eq!(Rank::Five.pip_value(), 5);
        assert_eq!(Rank::Nine.pip_value(), 9);
        for rank in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King] {
            assert_eq!(rank.pip_value(), 10);
        }
        assert_eq!(Card::new(Suit::Clubs, Rank::Seven).pip_value(), 7);
    }

    #[test]
    fn test_standard_deck_composition() {
        let deck = standard_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        for suit in Suit::ALL {
            assert_eq!(deck.iter().filter(|c| c.suit() == suit).count(), 13);
        }
        let pip_total: u32 = deck.iter().map(|c| c.pip_value() as u32).sum();
        // (1 + 2 + ... + 9 + 4 * 10) * 4
        assert_eq!(pip_total, 340);
        assert_eq!(deck[0], Card::new(Suit::Spades, Rank::Ace));
        assert_eq!(deck[51], Card::new(Suit::Clubs, Rank::King));
    }

    #[test]
    fn test_display() {
        let card = Card::new(Suit::Hearts, Rank::Queen);
        assert_eq!(card.to_string(), "Queen of Hearts");
    }
}
