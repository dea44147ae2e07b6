// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table hand orchestration.
use log::{debug, info};
use rand::Rng;
use std::cmp::Ordering;
use thiserror::Error;

use crate::{
    betting::{BettingError, DecisionProvider, run_street},
    player::{Player, PlayerId, Roster},
    poker::{Card, Chips, Deck, EvalError, PlayerCards, RankedHand, Stakes, Street, evaluate},
};

/// Table errors.
#[derive(Debug, Error)]
pub enum TableError {
    /// A hand needs at least two players.
    #[error("not enough players {0}")]
    NotEnoughPlayers(usize),
    /// The deck has not enough cards for the deal.
    #[error("the deck is exhausted")]
    DeckExhausted,
    /// Betting error.
    #[error("betting error: {0}")]
    Betting(#[from] BettingError),
    /// Hand evaluation error.
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

/// A hand payoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandPayoff {
    /// The player that won chips.
    pub player_id: PlayerId,
    /// The chips won.
    pub chips: Chips,
    /// The winning hand, none if the other players folded.
    pub hand: Option<RankedHand>,
}

/// The summary of a played hand.
#[derive(Debug, Clone)]
pub struct HandSummary {
    /// The hand number starting from 1.
    pub hand: u64,
    /// The board cards.
    pub board: Vec<Card>,
    /// The last street played.
    pub street: Street,
    /// The total pot.
    pub pot: Chips,
    /// The players that won chips.
    pub payoffs: Vec<HandPayoff>,
    /// The hands of the players that went to showdown.
    pub showdown: Vec<(PlayerId, RankedHand)>,
    /// Players that run out of chips in this hand.
    pub eliminated: Vec<PlayerId>,
}

/// A table that plays hands until one player has all the chips.
#[derive(Debug)]
pub struct Table {
    roster: Roster,
    stakes: Stakes,
    hands: u64,
}

impl Table {
    /// Creates a table with the given players and stakes.
    pub fn new(roster: Roster, stakes: Stakes) -> Self {
        Self {
            roster,
            stakes,
            hands: 0,
        }
    }

    /// The table players.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The table stakes.
    pub fn stakes(&self) -> &Stakes {
        &self.stakes
    }

    /// The number of hands played.
    pub fn hands(&self) -> u64 {
        self.hands
    }

    /// Checks if there are not enough players with chips for a new hand.
    pub fn is_over(&self) -> bool {
        self.roster.len() < 2
    }

    /// The seated player with most chips, on a tie the one in the earliest
    /// position.
    pub fn chip_leader(&self) -> Option<&Player> {
        self.roster
            .seated()
            .fold(None, |leader: Option<&Player>, p| match leader {
                Some(l) if l.chips >= p.chips => Some(l),
                _ => Some(p),
            })
    }

    /// Plays a hand, the provider chooses the actions for all players.
    ///
    /// At the end of the hand the positions rotate and the players without
    /// chips leave the table.
    pub fn play_hand<R, P>(&mut self, rng: &mut R, provider: &mut P) -> Result<HandSummary, TableError>
    where
        R: Rng,
        P: DecisionProvider + ?Sized,
    {
        let seats = self.roster.len();
        if seats < 2 {
            return Err(TableError::NotEnoughPlayers(seats));
        }

        self.hands += 1;
        self.roster.start_hand();
        info!("Hand {} players {seats}", self.hands);

        let mut deck = Deck::new_and_shuffled(rng);
        for pos in 0..seats {
            let cards = deck.draw(2).ok_or(TableError::DeckExhausted)?;
            let player = self.roster.seat_mut(pos);
            player.hole_cards = PlayerCards::Cards(cards[0], cards[1]);
            debug!("{} cards {} {}", player.nickname, cards[0], cards[1]);
        }

        let mut board = Vec::with_capacity(5);
        let mut pot = Chips::ZERO;
        let mut last_street = Street::Preflop;

        for street in Street::ALL {
            if street != Street::Preflop {
                let cards = deck
                    .draw(street.board_cards())
                    .ok_or(TableError::DeckExhausted)?;
                board.extend(cards);
                provider.board_dealt(&board);
                debug!("Board {}", cards_to_string(&board));
            }

            last_street = street;
            let res = run_street(&mut self.roster, pot, street, &self.stakes, provider)?;
            pot = res.pot;

            if let Some(winner) = res.winner {
                let payoffs = vec![HandPayoff {
                    player_id: winner,
                    chips: pot,
                    hand: None,
                }];

                return Ok(self.end_hand(board, last_street, pot, payoffs, Vec::new()));
            }
        }

        let showdown = self.showdown(&board)?;
        let payoffs = self.pay_winners(pot, &showdown);
        Ok(self.end_hand(board, last_street, pot, payoffs, showdown))
    }

    /// Evaluates the hands of the players that have not folded.
    fn showdown(&self, board: &[Card]) -> Result<Vec<(PlayerId, RankedHand)>, TableError> {
        let mut hands = Vec::with_capacity(self.roster.len());

        for player in self.roster.seated().filter(|p| !p.folded) {
            let mut cards = player.hole_cards.to_vec();
            cards.extend_from_slice(board);

            let hand = evaluate(&cards)?;
            info!("{} shows {hand}", player.nickname);
            hands.push((player.id(), hand));
        }

        Ok(hands)
    }

    /// Splits the pot between the best hands, the odd chips go to the
    /// winners in the earliest positions.
    fn pay_winners(&mut self, pot: Chips, showdown: &[(PlayerId, RankedHand)]) -> Vec<HandPayoff> {
        let Some(best) = showdown.iter().map(|(_, h)| h).max() else {
            return Vec::new();
        };

        let winners = showdown
            .iter()
            .filter(|(_, h)| h.cmp(best) == Ordering::Equal)
            .collect::<Vec<_>>();

        let count = winners.len() as u32;
        let share = pot / count;
        let mut odd_chips = (pot % count).amount();

        winners
            .into_iter()
            .filter_map(|(id, hand)| {
                let mut chips = share;
                if odd_chips > 0 {
                    chips += Chips::new(1);
                    odd_chips -= 1;
                }

                let player = self.roster.player_mut(*id)?;
                player.chips += chips;
                info!("{} wins {chips} with {hand}", player.nickname);

                Some(HandPayoff {
                    player_id: *id,
                    chips,
                    hand: Some(*hand),
                })
            })
            .collect()
    }

    fn end_hand(
        &mut self,
        board: Vec<Card>,
        street: Street,
        pot: Chips,
        payoffs: Vec<HandPayoff>,
        showdown: Vec<(PlayerId, RankedHand)>,
    ) -> HandSummary {
        self.roster.rotate();
        let eliminated = self.roster.remove_with_no_chips();

        for id in &eliminated {
            if let Some(player) = self.roster.player(*id) {
                info!("{} is out of chips", player.nickname);
            }
        }

        if let Some(leader) = self.chip_leader() {
            debug!("Chip leader {} with {}", leader.nickname, leader.chips);
        }

        HandSummary {
            hand: self.hands,
            board,
            street,
            pot,
            payoffs,
            showdown,
            eliminated,
        }
    }
}

fn cards_to_string(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::betting::{Action, ActionRequest};
    use rand::{SeedableRng, rngs::StdRng};

    /// Calls every bet and records the streets it was asked on.
    #[derive(Default)]
    struct Calling {
        streets: Vec<Street>,
        boards: Vec<usize>,
    }

    impl DecisionProvider for Calling {
        fn request_decision(&mut self, _player: &Player, req: &ActionRequest) -> Action {
            self.streets.push(req.street);
            Action::CheckCall
        }

        fn board_dealt(&mut self, board: &[Card]) {
            self.boards.push(board.len());
        }
    }

    /// Folds every hand unless it can check.
    struct Folding(Vec<Street>);

    impl DecisionProvider for Folding {
        fn request_decision(&mut self, _player: &Player, req: &ActionRequest) -> Action {
            self.0.push(req.street);
            if req.can_check() {
                Action::CheckCall
            } else {
                Action::Fold
            }
        }
    }

    /// Every player shoves preflop.
    struct Shoving;

    impl DecisionProvider for Shoving {
        fn request_decision(&mut self, _player: &Player, req: &ActionRequest) -> Action {
            req.raise_to(req.max_bet)
        }
    }

    fn table(stacks: &[u32]) -> Table {
        let roster = Roster::new(
            stacks
                .iter()
                .enumerate()
                .map(|(idx, &chips)| (format!("p{idx}"), Chips::new(chips))),
        );

        Table::new(roster, Stakes::default())
    }

    fn total_chips(table: &Table) -> Chips {
        table.roster().players().map(|p| p.chips).sum()
    }

    #[test]
    fn not_enough_players() {
        let mut table = table(&[100]);
        let res = table.play_hand(&mut StdRng::seed_from_u64(1), &mut Calling::default());
        assert!(matches!(res, Err(TableError::NotEnoughPlayers(1))));
        assert!(table.is_over());
        assert_eq!(table.stakes(), &Stakes::default());
    }

    #[test]
    fn hand_goes_to_showdown() {
        let mut table = table(&[100, 100, 100]);
        let mut provider = Calling::default();
        let mut rng = StdRng::seed_from_u64(7);

        let summary = table.play_hand(&mut rng, &mut provider).unwrap();
        assert_eq!(summary.hand, 1);
        assert_eq!(summary.street, Street::River);
        assert_eq!(summary.board.len(), 5);
        assert_eq!(summary.pot, Chips::new(6));
        assert_eq!(summary.showdown.len(), 3);
        assert_eq!(provider.boards, vec![3, 4, 5]);

        let paid = summary.payoffs.iter().map(|p| p.chips).sum::<Chips>();
        assert_eq!(paid, summary.pot);
        assert!(summary.payoffs.iter().all(|p| p.hand.is_some()));
        assert_eq!(total_chips(&table), Chips::new(300));
    }

    #[test]
    fn early_win_skips_streets() {
        let mut table = table(&[100, 100, 100]);
        let first = table.roster().seat(1).id();
        let mut provider = Folding(Vec::new());
        let mut rng = StdRng::seed_from_u64(7);

        let summary = table.play_hand(&mut rng, &mut provider).unwrap();
        assert_eq!(summary.street, Street::Preflop);
        assert!(summary.board.is_empty());
        assert!(provider.0.iter().all(|&s| s == Street::Preflop));
        assert_eq!(summary.payoffs.len(), 1);
        assert_eq!(summary.payoffs[0].player_id, first);
        assert_eq!(summary.payoffs[0].chips, Chips::new(3));
        assert!(summary.showdown.is_empty());
        assert_eq!(total_chips(&table), Chips::new(300));
    }

    #[test]
    fn positions_rotate() {
        let mut table = table(&[100, 100, 100]);
        let ids = table.roster().seated().map(Player::id).collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(3);

        table.play_hand(&mut rng, &mut Folding(Vec::new())).unwrap();
        assert_eq!(table.roster().seat(0).id(), ids[1]);
        assert_eq!(table.roster().seat(2).id(), ids[0]);
        assert_eq!(table.hands(), 1);
    }

    #[test]
    fn play_until_one_player_left() {
        let mut table = table(&[20, 30, 40, 50]);
        let mut rng = StdRng::seed_from_u64(11);

        let mut eliminated = Vec::new();
        while !table.is_over() {
            let summary = table.play_hand(&mut rng, &mut Shoving).unwrap();
            eliminated.extend(summary.eliminated);
            assert_eq!(total_chips(&table), Chips::new(140));
            assert!(table.hands() < 1_000);
        }

        assert_eq!(eliminated.len(), 3);
        let leader = table.chip_leader().unwrap();
        assert_eq!(leader.chips, Chips::new(140));
        assert_eq!(table.roster().len(), 1);
    }

    #[test]
    fn chip_leader_prefers_earliest_position() {
        let table = table(&[50, 80, 80, 10]);
        let leader = table.chip_leader().unwrap();
        assert_eq!(leader.nickname, "p1");
    }
}
