// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Riverboat Poker core types.
//!
//! The [betting] module runs one street of betting over a [player::Roster]
//! asking a [betting::DecisionProvider] for each player action, the [table]
//! module deals the cards, runs the four streets, and settles the showdown.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod betting;
pub mod player;
pub mod poker;
pub mod table;
