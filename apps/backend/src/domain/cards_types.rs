//! Core card-related types: Card, Suit, SuitRank, TrumpRank

use crate::errors::domain::{DomainError, ValidationKind};

/// Ordinary suits in canonical order: Spades, Hearts, Diamonds, Clubs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub const fn letter(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }

    pub(crate) const fn position(self) -> usize {
        match self {
            Suit::Spades => 0,
            Suit::Hearts => 1,
            Suit::Diamonds => 2,
            Suit::Clubs => 3,
        }
    }
}

/// Rank of a suit card, 1 low through King high (Knight sits between Jack and Queen).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SuitRank {
    One,
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
    Knight,
    Queen,
    King,
}

impl SuitRank {
    pub const ALL: [SuitRank; 14] = [
        SuitRank::One,
        SuitRank::Two,
        SuitRank::Three,
        SuitRank::Four,
        SuitRank::Five,
        SuitRank::Six,
        SuitRank::Seven,
        SuitRank::Eight,
        SuitRank::Nine,
        SuitRank::Ten,
        SuitRank::Jack,
        SuitRank::Knight,
        SuitRank::Queen,
        SuitRank::King,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            SuitRank::One => "1",
            SuitRank::Two => "2",
            SuitRank::Three => "3",
            SuitRank::Four => "4",
            SuitRank::Five => "5",
            SuitRank::Six => "6",
            SuitRank::Seven => "7",
            SuitRank::Eight => "8",
            SuitRank::Nine => "9",
            SuitRank::Ten => "10",
            SuitRank::Jack => "J",
            SuitRank::Knight => "N",
            SuitRank::Queen => "Q",
            SuitRank::King => "K",
        }
    }

    pub(crate) fn position(self) -> usize {
        self as usize
    }
}

/// Trump number, always within 1..=21.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TrumpRank(u8);

impl TrumpRank {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 21;

    pub fn new(n: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(DomainError::validation(
                ValidationKind::ParseCard,
                format!("Trump number out of range: {n}"),
            ))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

/// One of the 78 tarot cards.
///
/// The derived ordering is the canonical deck order: Excuse, trumps
/// ascending, then each suit (Spades, Hearts, Diamonds, Clubs) from 1 to King.
/// The same order seeds the shuffle and canonicalizes hands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Card {
    Excuse,
    Trump(TrumpRank),
    Suited { suit: Suit, rank: SuitRank },
}

impl Card {
    pub const fn suited(suit: Suit, rank: SuitRank) -> Self {
        Card::Suited { suit, rank }
    }

    pub fn trump(n: u8) -> Result<Self, DomainError> {
        TrumpRank::new(n).map(Card::Trump)
    }

    pub const fn is_trump(&self) -> bool {
        matches!(self, Card::Trump(_))
    }
}
