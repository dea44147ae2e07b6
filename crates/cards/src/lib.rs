// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Riverboat Poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use riverboat_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "KD".parse().unwrap();
//! assert!(ah.rank() > kd.rank());
//! ```
//!
//! and a [Deck] type for shuffling, dealing, sampling, and iterating cards in
//! the deck.
//!
//! For example to deal a flop from a shuffled deck:
//!
//! ```
//! # use riverboat_cards::Deck;
//! let mut deck = Deck::new_and_shuffled(&mut rand::rng());
//! let flop = deck.draw(3).unwrap();
//! assert_eq!(flop.len(), 3);
//! assert_eq!(deck.count(), Deck::SIZE - 3);
//! ```
//!
//! or to sample 10 random 5-cards hands:
//!
//! ```
//! # use riverboat_cards::Deck;
//! let mut counter = 0;
//! Deck::default().sample(&mut rand::rng(), 10, 5, |hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter += 1;
//! });
//! assert_eq!(counter, 10);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, ParseCardError, Rank, Suit};
