// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Single street betting state machine.
use ahash::AHashSet;
use log::{debug, info};

use crate::{
    player::Roster,
    poker::{Chips, Stakes, Street},
};

use super::{Action, ActionRequest, BettingError, StreetResult};

/// The street bets and pot ledger.
///
/// Bets and turns are indexed by roster position, the roster seating order
/// cannot change while a street is in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettingState {
    /// The chips collected from previous streets and antes.
    pub pot: Chips,
    /// The bets placed in this street by each position.
    pub bets: Vec<Chips>,
    /// The position that acts next.
    pub turn: usize,
    /// The position of the last player that bet or raised, never a folded
    /// player.
    pub last_aggressor: usize,
    /// Positions that have neither folded nor gone all-in.
    pub contesting: AHashSet<usize>,
}

impl BettingState {
    /// The largest bet in this street.
    pub fn largest_bet(&self) -> Chips {
        self.bets.iter().max().copied().unwrap_or_default()
    }

    /// The sum of all bets in this street.
    pub fn street_bets(&self) -> Chips {
        self.bets.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Acting,
    Closed { early_winner: Option<usize> },
}

/// A street betting round.
///
/// The round is driven by calling [BettingRound::next_request] to get the
/// next player to act and [BettingRound::apply] with that player action,
/// until there are no more requests, then [BettingRound::close] collects the
/// bets into the pot.
#[derive(Debug, Clone)]
pub struct BettingRound {
    street: Street,
    state: BettingState,
    big_blind: Chips,
    /// The turn has reached the aggressor after the last bet or raise.
    orbit_reached: bool,
    /// Preflop unraised pot, the big blind still has the option.
    blind_option: bool,
    /// The position waiting for an action.
    pending: Option<usize>,
    phase: Phase,
}

impl BettingRound {
    /// Starts a street betting round, preflop the antes and the blinds are
    /// collected from the players.
    pub fn start(roster: &mut Roster, pot: Chips, street: Street, stakes: &Stakes) -> Self {
        let seats = roster.len();
        let mut state = BettingState {
            pot,
            bets: vec![Chips::ZERO; seats],
            turn: 0,
            last_aggressor: 0,
            contesting: AHashSet::with_capacity(seats),
        };

        let preflop = street == Street::Preflop && seats > 0;
        if preflop {
            // Antes are dead money and go straight to the pot.
            if stakes.ante > Chips::ZERO {
                for pos in 0..seats {
                    state.pot += roster.seat_mut(pos).commit(stakes.ante);
                }
            }

            let bb = 1 % seats;
            state.bets[0] += roster.seat_mut(0).commit(stakes.small_blind);
            state.bets[bb] += roster.seat_mut(bb).commit(stakes.big_blind);
            state.turn = 2 % seats;
            state.last_aggressor = bb;
        } else if let Some(pos) = (0..seats).find(|&pos| !roster.seat(pos).folded) {
            // Players that folded on a previous street are skipped.
            state.last_aggressor = pos;
        }

        state
            .contesting
            .extend((0..seats).filter(|&pos| roster.seat(pos).can_act()));

        debug!(
            "Start {street} pot {} bets {} contesting {}",
            state.pot,
            state.street_bets(),
            state.contesting.len()
        );

        Self {
            street,
            state,
            big_blind: stakes.big_blind,
            orbit_reached: false,
            blind_option: preflop,
            pending: None,
            phase: if seats == 0 {
                Phase::Closed { early_winner: None }
            } else {
                Phase::Acting
            },
        }
    }

    /// The street this round is betting on.
    pub fn street(&self) -> Street {
        self.street
    }

    /// The current bets and pot.
    pub fn state(&self) -> &BettingState {
        &self.state
    }

    /// Checks if no more actions are accepted.
    pub fn is_closed(&self) -> bool {
        matches!(self.phase, Phase::Closed { .. })
    }

    /// Returns the request for the next player to act, or `None` if the
    /// round has closed.
    ///
    /// Until an action is applied the same request is returned.
    pub fn next_request(&mut self, roster: &Roster) -> Option<ActionRequest> {
        loop {
            if self.is_closed() {
                return None;
            }

            if let Some(pos) = self.pending {
                return Some(self.request(roster, pos));
            }

            if self.close_on_early_win() {
                return None;
            }

            let pos = self.state.turn;
            let can_act = roster.seat(pos).can_act();

            if pos == self.state.last_aggressor {
                if self.orbit_reached {
                    self.phase = Phase::Closed { early_winner: None };
                    return None;
                }

                self.orbit_reached = true;

                // Nobody raised the big blind and it cannot take its option.
                if self.blind_option && !can_act {
                    self.phase = Phase::Closed { early_winner: None };
                    return None;
                }
            }

            if can_act {
                self.pending = Some(pos);
                return Some(self.request(roster, pos));
            }

            self.advance();
        }
    }

    /// Applies an action for the player that has to act.
    ///
    /// An invalid raise is rejected leaving the round untouched.
    pub fn apply(&mut self, roster: &mut Roster, action: Action) -> Result<(), BettingError> {
        if self.pending.is_none() {
            self.next_request(roster);
        }

        let pos = self.pending.ok_or(BettingError::ActionAfterRoundClosed)?;
        let largest_bet = self.state.largest_bet();
        let player_bet = self.state.bets[pos];
        // The big blind used its option without raising.
        let option_taken = self.blind_option && pos == self.state.last_aggressor;
        let player = roster.seat_mut(pos);

        match action {
            Action::Fold => {
                player.fold();
                self.state.contesting.remove(&pos);
            }
            Action::CheckCall => {
                self.state.bets[pos] += player.commit(largest_bet - player_bet);
            }
            Action::BetRaise(amount) => {
                let minimum = largest_bet + self.big_blind;
                let maximum = player_bet + player.chips;

                // A raise below the minimum is only allowed when all-in.
                if amount <= largest_bet || amount > maximum || (amount < minimum && amount != maximum)
                {
                    return Err(BettingError::InvalidRaiseAmount {
                        amount,
                        minimum,
                        maximum,
                    });
                }

                self.state.bets[pos] += player.commit(amount - player_bet);
                self.state.last_aggressor = pos;
                self.orbit_reached = true;
            }
        }

        if player.all_in {
            self.state.contesting.remove(&pos);
        }

        debug!(
            "{} {} {:?} bet {} chips {}",
            self.street, player.nickname, action, self.state.bets[pos], player.chips
        );

        if matches!(action, Action::Fold) && pos == self.state.last_aggressor {
            self.pass_aggressor(roster, pos);
        }

        if matches!(action, Action::BetRaise(_)) {
            self.blind_option = false;
        }

        self.pending = None;
        self.advance();

        if !self.close_on_early_win() && option_taken && self.blind_option {
            self.phase = Phase::Closed { early_winner: None };
        }

        Ok(())
    }

    /// Closes the round moving all bets into the pot.
    ///
    /// If only one player is left contesting the pot it is paid to that
    /// player.
    pub fn close(self, roster: &mut Roster) -> Result<StreetResult, BettingError> {
        let Phase::Closed { early_winner } = self.phase else {
            return Err(BettingError::RoundNotClosed);
        };

        let pot = self.state.pot + self.state.street_bets();

        let mut contesting = self.state.contesting.iter().copied().collect::<Vec<_>>();
        contesting.sort_unstable();
        let contesting = contesting
            .into_iter()
            .map(|pos| roster.seat(pos).id())
            .collect();

        let winner = early_winner.map(|pos| {
            let player = roster.seat_mut(pos);
            player.chips += pot;
            info!("{} wins {pot} chips on the {}", player.nickname, self.street);
            player.id()
        });

        Ok(StreetResult {
            street: self.street,
            pot,
            winner,
            contesting,
        })
    }

    fn request(&self, roster: &Roster, pos: usize) -> ActionRequest {
        let player = roster.seat(pos);
        let largest_bet = self.state.largest_bet();
        let player_bet = self.state.bets[pos];

        ActionRequest {
            player_id: player.id(),
            position: pos,
            street: self.street,
            largest_bet,
            player_bet,
            to_call: (largest_bet - player_bet).min(player.chips),
            min_raise: largest_bet + self.big_blind,
            max_bet: player_bet + player.chips,
            pot: self.state.pot + self.state.street_bets(),
        }
    }

    fn close_on_early_win(&mut self) -> bool {
        if self.is_closed() {
            return true;
        }

        if self.state.contesting.len() == 1 {
            let early_winner = self.state.contesting.iter().next().copied();
            self.phase = Phase::Closed { early_winner };
            self.pending = None;
            return true;
        }

        false
    }

    /// Moves the closing point to the next player that has not folded, that
    /// player acts next and the street closes when the turn comes back to it.
    fn pass_aggressor(&mut self, roster: &Roster, folded: usize) {
        let seats = self.state.bets.len();
        let next = (1..seats)
            .map(|offset| (folded + offset) % seats)
            .find(|&pos| !roster.seat(pos).folded);

        if let Some(pos) = next {
            self.state.last_aggressor = pos;
            self.orbit_reached = false;
        }
    }

    fn advance(&mut self) {
        self.state.turn = (self.state.turn + 1) % self.state.bets.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(stacks: &[u32]) -> Roster {
        Roster::new(
            stacks
                .iter()
                .enumerate()
                .map(|(idx, &chips)| (format!("p{idx}"), Chips::new(chips))),
        )
    }

    fn next_position(round: &mut BettingRound, roster: &Roster) -> Option<usize> {
        round.next_request(roster).map(|req| req.position)
    }

    #[test]
    fn preflop_blinds_and_turn() {
        let mut roster = roster(&[100, 100, 100, 100]);
        let stakes = Stakes::new(Chips::new(5), Chips::new(10));
        let mut round = BettingRound::start(&mut roster, Chips::ZERO, Street::Preflop, &stakes);

        let state = round.state();
        assert_eq!(state.bets[0], Chips::new(5));
        assert_eq!(state.bets[1], Chips::new(10));
        assert_eq!(state.turn, 2);
        assert_eq!(state.last_aggressor, 1);
        assert_eq!(roster.seat(1).chips, Chips::new(90));

        let req = round.next_request(&roster).unwrap();
        assert_eq!(req.position, 2);
        assert_eq!(req.to_call, Chips::new(10));
        assert_eq!(req.min_raise, Chips::new(20));
        assert_eq!(req.pot, Chips::new(15));

        // The same request until an action is applied.
        assert_eq!(next_position(&mut round, &roster), Some(2));
    }

    #[test]
    fn heads_up_small_blind_acts_first() {
        let mut roster = roster(&[100, 100]);
        let mut round =
            BettingRound::start(&mut roster, Chips::ZERO, Street::Preflop, &Stakes::default());

        assert_eq!(next_position(&mut round, &roster), Some(0));
        round.apply(&mut roster, Action::CheckCall).unwrap();

        // Big blind option.
        assert_eq!(next_position(&mut round, &roster), Some(1));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert!(round.is_closed());

        let res = round.close(&mut roster).unwrap();
        assert_eq!(res.pot, Chips::new(4));
        assert_eq!(res.winner, None);
        assert_eq!(res.contesting.len(), 2);
    }

    #[test]
    fn antes_go_to_the_pot() {
        let mut roster = roster(&[100, 100, 100]);
        let stakes = Stakes::default().with_ante(Chips::new(3));
        let round = BettingRound::start(&mut roster, Chips::new(7), Street::Preflop, &stakes);

        let state = round.state();
        assert_eq!(state.pot, Chips::new(16));
        assert_eq!(state.largest_bet(), Chips::new(2));
        assert_eq!(roster.seat(1).chips, Chips::new(95));
        assert_eq!(roster.seat(2).chips, Chips::new(97));
    }

    #[test]
    fn blind_all_in_is_not_contesting() {
        let mut roster = roster(&[100, 1, 100]);
        let stakes = Stakes::default();
        let mut round = BettingRound::start(&mut roster, Chips::ZERO, Street::Preflop, &stakes);

        assert!(roster.seat(1).all_in);
        assert_eq!(round.state().bets[1], Chips::new(1));
        assert!(!round.state().contesting.contains(&1));

        // The big blind is skipped and cannot take the option.
        assert_eq!(next_position(&mut round, &roster), Some(2));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), Some(0));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), None);

        let res = round.close(&mut roster).unwrap();
        assert_eq!(res.pot, Chips::new(3));
    }

    #[test]
    fn postflop_checks_around() {
        let mut roster = roster(&[100, 100, 100]);
        let mut round =
            BettingRound::start(&mut roster, Chips::new(6), Street::Flop, &Stakes::default());

        for pos in 0..3 {
            assert_eq!(next_position(&mut round, &roster), Some(pos));
            round.apply(&mut roster, Action::CheckCall).unwrap();
        }

        assert_eq!(next_position(&mut round, &roster), None);
        assert_eq!(round.close(&mut roster).unwrap().pot, Chips::new(6));
    }

    #[test]
    fn aggressor_fold_passes_the_closing_point() {
        let mut roster = roster(&[100, 100, 100]);
        let mut round =
            BettingRound::start(&mut roster, Chips::ZERO, Street::Flop, &Stakes::default());

        round.apply(&mut roster, Action::Fold).unwrap();
        let aggressor = round.state().last_aggressor;
        assert_eq!(aggressor, 1);
        assert!(!roster.seat(aggressor).folded);

        // The remaining players still act once each.
        assert_eq!(next_position(&mut round, &roster), Some(1));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), Some(2));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), None);

        let res = round.close(&mut roster).unwrap();
        assert_eq!(res.winner, None);
        assert_eq!(res.contesting.len(), 2);
    }

    #[test]
    fn aggressor_fold_then_bet() {
        let mut roster = roster(&[100, 100, 100, 100]);
        let mut round =
            BettingRound::start(&mut roster, Chips::ZERO, Street::Turn, &Stakes::default());

        round.apply(&mut roster, Action::Fold).unwrap();
        round.apply(&mut roster, Action::CheckCall).unwrap();
        round.apply(&mut roster, Action::BetRaise(Chips::new(10))).unwrap();
        assert_eq!(round.state().last_aggressor, 2);

        assert_eq!(next_position(&mut round, &roster), Some(3));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), Some(1));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), None);

        assert_eq!(round.close(&mut roster).unwrap().pot, Chips::new(30));
    }

    #[test]
    fn street_skips_folded_first_position() {
        let mut roster = roster(&[100, 100, 100]);
        roster.seat_mut(0).fold();

        let mut round =
            BettingRound::start(&mut roster, Chips::new(6), Street::River, &Stakes::default());
        assert_eq!(round.state().last_aggressor, 1);

        assert_eq!(next_position(&mut round, &roster), Some(1));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), Some(2));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), None);
        assert_eq!(round.street(), Street::River);
    }

    #[test]
    fn raise_reopens_the_action() {
        let mut roster = roster(&[100, 100, 100]);
        let mut round =
            BettingRound::start(&mut roster, Chips::ZERO, Street::Flop, &Stakes::default());

        round.apply(&mut roster, Action::CheckCall).unwrap();
        round.apply(&mut roster, Action::BetRaise(Chips::new(10))).unwrap();
        assert_eq!(round.state().last_aggressor, 1);

        // Both other players respond, the raiser is not asked again.
        assert_eq!(next_position(&mut round, &roster), Some(2));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), Some(0));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), None);

        let res = round.close(&mut roster).unwrap();
        assert_eq!(res.pot, Chips::new(30));
        assert!(roster.seated().all(|p| p.chips == Chips::new(90)));
    }

    #[test]
    fn raise_before_the_big_blind_option() {
        let mut roster = roster(&[100, 100, 100]);
        let mut round =
            BettingRound::start(&mut roster, Chips::ZERO, Street::Preflop, &Stakes::default());

        // Under the gun raises, blinds call, the raiser does not act twice.
        round.apply(&mut roster, Action::BetRaise(Chips::new(6))).unwrap();
        assert_eq!(next_position(&mut round, &roster), Some(0));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), Some(1));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), None);

        assert_eq!(round.close(&mut roster).unwrap().pot, Chips::new(18));
    }

    #[test]
    fn big_blind_raises_its_option() {
        let mut roster = roster(&[100, 100, 100]);
        let mut round =
            BettingRound::start(&mut roster, Chips::ZERO, Street::Preflop, &Stakes::default());

        round.apply(&mut roster, Action::CheckCall).unwrap();
        round.apply(&mut roster, Action::CheckCall).unwrap();
        round.apply(&mut roster, Action::BetRaise(Chips::new(8))).unwrap();

        assert_eq!(next_position(&mut round, &roster), Some(2));
        round.apply(&mut roster, Action::Fold).unwrap();
        assert_eq!(next_position(&mut round, &roster), Some(0));
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), None);

        let res = round.close(&mut roster).unwrap();
        assert_eq!(res.pot, Chips::new(18));
        assert_eq!(res.contesting.len(), 2);
    }

    #[test]
    fn invalid_raise_leaves_state_untouched() {
        let mut roster = roster(&[100, 100, 100]);
        let mut round =
            BettingRound::start(&mut roster, Chips::ZERO, Street::Preflop, &Stakes::default());

        let before = round.state().clone();

        // Below the minimum raise.
        let err = round
            .apply(&mut roster, Action::BetRaise(Chips::new(3)))
            .unwrap_err();
        assert_eq!(
            err,
            BettingError::InvalidRaiseAmount {
                amount: Chips::new(3),
                minimum: Chips::new(4),
                maximum: Chips::new(100),
            }
        );

        // Above the player stack.
        assert!(
            round
                .apply(&mut roster, Action::BetRaise(Chips::new(101)))
                .is_err()
        );

        assert_eq!(round.state(), &before);
        assert_eq!(roster.seat(2).chips, Chips::new(100));
        assert_eq!(next_position(&mut round, &roster), Some(2));
    }

    #[test]
    fn short_all_in_raise() {
        let mut roster = roster(&[100, 100, 3]);
        let mut round =
            BettingRound::start(&mut roster, Chips::ZERO, Street::Preflop, &Stakes::default());

        // Raise to 3 is less than the minimum 4 but it is the whole stack.
        round.apply(&mut roster, Action::BetRaise(Chips::new(3))).unwrap();
        assert!(roster.seat(2).all_in);
        assert_eq!(round.state().last_aggressor, 2);
        assert!(!round.state().contesting.contains(&2));
    }

    #[test]
    fn action_after_close() {
        let mut roster = roster(&[100, 100]);
        let mut round =
            BettingRound::start(&mut roster, Chips::ZERO, Street::Flop, &Stakes::default());

        round.apply(&mut roster, Action::CheckCall).unwrap();
        round.apply(&mut roster, Action::CheckCall).unwrap();
        assert_eq!(next_position(&mut round, &roster), None);

        assert_eq!(
            round.apply(&mut roster, Action::CheckCall),
            Err(BettingError::ActionAfterRoundClosed)
        );
    }

    #[test]
    fn close_while_acting() {
        let mut roster = roster(&[100, 100]);
        let round = BettingRound::start(&mut roster, Chips::ZERO, Street::Flop, &Stakes::default());
        assert_eq!(
            round.close(&mut roster).unwrap_err(),
            BettingError::RoundNotClosed
        );
    }
}
