// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator sorts the cards by rank and then looks for the hand patterns
//! in order of strength: a flush (and a straight flush within it), quads and
//! full houses from the rank groups, a straight, and finally pairs, trips and
//! high cards.
//!
//! The category precedence relies on the hand having at most 7 cards, with 7
//! cards a flush can't coexist with quads or a full house.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use thiserror::Error;

use riverboat_cards::{Card, Rank};

mod patterns;
use patterns::HAND_SIZE;

/// Errors returned by the evaluator.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// Fewer than 5 cards.
    #[error("a hand needs at least 5 cards, got {0}")]
    InsufficientCards(usize),
    /// More than 7 cards.
    #[error("a hand can have at most 7 cards, got {0}")]
    TooManyCards(usize),
}

/// The category of a poker hand, from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// No pairs.
    HighCard,
    /// Two cards of the same rank.
    Pair,
    /// Two pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five cards of consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// A straight of the same suit.
    StraightFlush,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::HighCard => "high card",
            HandCategory::Pair => "pair",
            HandCategory::TwoPair => "two pair",
            HandCategory::ThreeOfAKind => "three of a kind",
            HandCategory::Straight => "straight",
            HandCategory::Flush => "flush",
            HandCategory::FullHouse => "full house",
            HandCategory::FourOfAKind => "four of a kind",
            HandCategory::StraightFlush => "straight flush",
        };

        write!(f, "{name}")
    }
}

/// The best five cards hand and its category.
///
/// The cards are ordered by tie break precedence, the primary group first and
/// then the kickers from the highest. Straights start from their highest card,
/// so a wheel is reported as `5 4 3 2 A`.
///
/// Two hands compare by category and then card by card by rank, suits never
/// matter so two hands can be equal with different cards.
#[derive(Debug, Clone, Copy)]
pub struct RankedHand {
    category: HandCategory,
    cards: [Card; HAND_SIZE],
}

impl RankedHand {
    /// The minimum number of cards that can be evaluated.
    pub const MIN_CARDS: usize = 5;

    /// The maximum number of cards that can be evaluated.
    pub const MAX_CARDS: usize = 7;

    /// Evaluates a 5, 6 or 7 cards hand.
    pub fn eval(cards: &[Card]) -> Result<Self, EvalError> {
        if cards.len() < Self::MIN_CARDS {
            return Err(EvalError::InsufficientCards(cards.len()));
        }

        if cards.len() > Self::MAX_CARDS {
            return Err(EvalError::TooManyCards(cards.len()));
        }

        let sorted = patterns::sorted(cards);
        let flush = patterns::flush_pool(&sorted);
        let straight = patterns::straight_pool(&sorted);
        let (grouped, grouped_cards) = patterns::grouped_hand(&sorted);

        let (category, cards) = if !flush.is_empty() {
            match patterns::straight_flush(&straight, &flush) {
                Some(cards) => (HandCategory::StraightFlush, cards),
                None => (HandCategory::Flush, patterns::take_five(flush)),
            }
        } else if matches!(
            grouped,
            HandCategory::FourOfAKind | HandCategory::FullHouse
        ) {
            (grouped, grouped_cards)
        } else if let Some(cards) = patterns::top_straight(&straight) {
            (HandCategory::Straight, cards)
        } else {
            (grouped, grouped_cards)
        };

        Ok(Self { category, cards })
    }

    /// The hand category.
    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// The five cards that make the hand.
    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.cards
    }

    /// The hand cards ranks in tie break order.
    pub fn ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.cards.iter().map(Card::rank)
    }
}

impl PartialEq for RankedHand {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedHand {}

impl PartialOrd for RankedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.ranks().cmp(other.ranks()))
    }
}

impl fmt::Display for RankedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.category)?;
        for (idx, card) in self.cards.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        write!(f, "]")
    }
}

/// Evaluates a 5, 6 or 7 cards hand, see [RankedHand::eval].
pub fn evaluate(cards: &[Card]) -> Result<RankedHand, EvalError> {
    RankedHand::eval(cards)
}

/// Compares two hands by category and then by their cards ranks, the first
/// different rank decides.
pub fn compare(a: &RankedHand, b: &RankedHand) -> Ordering {
    a.cmp(b)
}
