// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Street betting engine.
//!
//! A street is played by [run_street] that asks a [DecisionProvider] for each
//! player action until the action returns to the last aggressor or only one
//! player is left contesting the pot. Front ends that need to drive a street
//! one action at a time can use [BettingRound] directly.
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    player::{Player, PlayerId, Roster},
    poker::{Card, Chips, Stakes, Street},
};

mod round;
pub use round::{BettingRound, BettingState};

/// A player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Leave the hand.
    Fold,
    /// Match the largest bet, checks when there is nothing to call.
    CheckCall,
    /// Bet or raise to the given street total.
    BetRaise(Chips),
}

/// The state a player sees when asked for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRequest {
    /// The player that has to act.
    pub player_id: PlayerId,
    /// The player position at the table.
    pub position: usize,
    /// The street being played.
    pub street: Street,
    /// The largest bet in this street.
    pub largest_bet: Chips,
    /// The chips this player has already bet in this street.
    pub player_bet: Chips,
    /// The chips needed to call, capped by the player stack.
    pub to_call: Chips,
    /// The smallest total bet for a full raise.
    pub min_raise: Chips,
    /// The largest total bet this player can make.
    pub max_bet: Chips,
    /// The pot including all bets in this street.
    pub pot: Chips,
}

impl ActionRequest {
    /// Checks if the player can check.
    pub fn can_check(&self) -> bool {
        self.to_call == Chips::ZERO
    }

    /// Checks if the player can bet or raise.
    pub fn can_raise(&self) -> bool {
        self.max_bet > self.largest_bet
    }

    /// Returns a raise to `amount` adjusted to the allowed range, or a call
    /// if the player cannot raise.
    pub fn raise_to(&self, amount: Chips) -> Action {
        if self.can_raise() {
            Action::BetRaise(amount.max(self.min_raise).min(self.max_bet))
        } else {
            Action::CheckCall
        }
    }
}

/// Chooses the actions for the players at a table.
pub trait DecisionProvider {
    /// Returns the action for a player.
    fn request_decision(&mut self, player: &Player, req: &ActionRequest) -> Action;

    /// Called when the action returned by [DecisionProvider::request_decision]
    /// has been rejected, the returned action is applied instead.
    fn rejected(&mut self, _player: &Player, _req: &ActionRequest, _err: &BettingError) -> Action {
        Action::Fold
    }

    /// Called when board cards are dealt, with all the board cards so far.
    fn board_dealt(&mut self, _board: &[Card]) {}
}

/// Betting errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BettingError {
    /// The raise is below the minimum raise or above the player stack.
    #[error("invalid raise to {amount}, minimum is {minimum} maximum is {maximum}")]
    InvalidRaiseAmount {
        /// The rejected bet.
        amount: Chips,
        /// The smallest total bet for a full raise.
        minimum: Chips,
        /// The largest bet the player can afford.
        maximum: Chips,
    },
    /// An action was applied after the street closed.
    #[error("action after the betting round closed")]
    ActionAfterRoundClosed,
    /// The round was closed while players still had to act.
    #[error("betting round is not closed")]
    RoundNotClosed,
}

/// The result of a street betting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetResult {
    /// The street that was played.
    pub street: Street,
    /// The pot after collecting this street bets, if there is an early
    /// winner the pot has been paid to the winner.
    pub pot: Chips,
    /// The player that won because all other players folded or went all-in.
    pub winner: Option<PlayerId>,
    /// The players that can still act in the next street.
    pub contesting: Vec<PlayerId>,
}

/// Runs a street betting round asking the provider for each player action.
pub fn run_street<P>(
    roster: &mut Roster,
    pot: Chips,
    street: Street,
    stakes: &Stakes,
    provider: &mut P,
) -> Result<StreetResult, BettingError>
where
    P: DecisionProvider + ?Sized,
{
    let mut round = BettingRound::start(roster, pot, street, stakes);

    while let Some(req) = round.next_request(roster) {
        let mut action = provider.request_decision(roster.seat(req.position), &req);

        loop {
            match round.apply(roster, action) {
                Ok(()) => break,
                Err(err @ BettingError::InvalidRaiseAmount { .. }) => {
                    let player = roster.seat(req.position);
                    warn!("{} {err}", player.nickname);
                    action = provider.rejected(player, &req, &err);
                }
                Err(err) => return Err(err),
            }
        }
    }

    round.close(roster)
}
