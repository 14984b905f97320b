//! Card tokens: parsing from and formatting to the persisted form ("EX", "T21", "10H", "NC").

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Suit, SuitRank, TrumpRank};
use crate::errors::domain::{DomainError, ValidationKind};

fn parse_err(s: &str) -> DomainError {
    DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s}"))
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Excuse => f.write_str("EX"),
            Card::Trump(t) => write!(f, "T{}", t.get()),
            Card::Suited { suit, rank } => write!(f, "{}{}", rank.token(), suit.letter()),
        }
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "EX" {
            return Ok(Card::Excuse);
        }

        if let Some(num) = s.strip_prefix('T') {
            // Strict decimal: no sign, no leading zero
            if num.is_empty() || num.starts_with('0') || !num.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(parse_err(s));
            }
            let n: u8 = num.parse().map_err(|_| parse_err(s))?;
            return TrumpRank::new(n)
                .map(Card::Trump)
                .map_err(|_| parse_err(s));
        }

        let suit_ch = s.chars().last().ok_or_else(|| parse_err(s))?;
        let suit = match suit_ch {
            'S' => Suit::Spades,
            'H' => Suit::Hearts,
            'D' => Suit::Diamonds,
            'C' => Suit::Clubs,
            _ => return Err(parse_err(s)),
        };
        let rank_token = &s[..s.len() - 1];
        let rank = SuitRank::ALL
            .into_iter()
            .find(|r| r.token() == rank_token)
            .ok_or_else(|| parse_err(s))?;
        Ok(Card::Suited { suit, rank })
    }
}

/// Non-panicking helper to parse card tokens into Card instances.
/// Fails on the first invalid token.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}

pub fn format_cards(cards: &[Card]) -> Vec<String> {
    cards.iter().map(Card::to_string).collect()
}
