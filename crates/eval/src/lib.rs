// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Riverboat Poker hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands. The evaluator finds the
//! best five cards out of the hand together with their [HandCategory], the
//! cards are ordered so that two hands of the same category can be compared
//! card by card (see [compare]).
//!
//! ```
//! # use riverboat_eval::*;
//! let cards = ["AS", "5D", "4C", "3H", "2S", "KD", "9C"]
//!     .iter()
//!     .map(|c| c.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//!
//! let hand = evaluate(&cards).unwrap();
//! assert_eq!(hand.category(), HandCategory::Straight);
//! assert_eq!(hand.to_string(), "straight [5D 4C 3H 2S AS]");
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{EvalError, HandCategory, RankedHand, compare, evaluate};

// Reexport cards types.
pub use riverboat_cards::{Card, Deck, Rank, Suit};
