// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bot strategies.
use rand::{Rng, SeedableRng, rngs::StdRng};

use riverboat_core::{
    betting::{Action, ActionRequest},
    player::Player,
    poker::{Card, Chips, HandCategory, Rank, Street, evaluate},
};

/// A Poker bot strategy.
pub trait Strategy {
    /// Returns an action given the request, the acting player and the board.
    fn execute(&mut self, req: &ActionRequest, player: &Player, board: &[Card]) -> Action;
}

/// The available strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyKind {
    /// Always check or call.
    Calling,
    /// Random actions.
    Random,
    /// Bet with strong hands, fold weak ones.
    Strength,
}

impl StrategyKind {
    /// Creates a strategy of this kind, the seed is used by random strategies.
    pub fn build(self, seed: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Calling => Box::new(CallingStrategy),
            StrategyKind::Random => Box::new(RandomStrategy::new(seed)),
            StrategyKind::Strength => Box::new(HandStrengthStrategy),
        }
    }
}

/// Always check or call.
#[derive(Debug, Clone, Copy)]
pub struct CallingStrategy;

impl Strategy for CallingStrategy {
    fn execute(&mut self, _req: &ActionRequest, _player: &Player, _board: &[Card]) -> Action {
        Action::CheckCall
    }
}

/// Folds, calls or raises at random.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: StdRng,
    fold: f64,
    raise: f64,
}

impl RandomStrategy {
    /// Creates a strategy that folds 10% and raises 20% of the times.
    pub fn new(seed: u64) -> Self {
        Self::with_odds(seed, 0.1, 0.2)
    }

    /// Creates a strategy with the given fold and raise probabilities.
    pub fn with_odds(seed: u64, fold: f64, raise: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            fold,
            raise,
        }
    }
}

impl Strategy for RandomStrategy {
    fn execute(&mut self, req: &ActionRequest, _player: &Player, _board: &[Card]) -> Action {
        let p = self.rng.random::<f64>();

        if p < self.fold && !req.can_check() {
            Action::Fold
        } else if p >= 1.0 - self.raise && req.can_raise() {
            // Raise between the minimum and the pot.
            let extra = self.rng.random_range(0..=req.pot.amount());
            req.raise_to(req.min_raise + Chips::new(extra))
        } else {
            Action::CheckCall
        }
    }
}

/// Plays according to the hand category.
///
/// Preflop it raises with pairs and big cards and calls small bets, after the
/// flop it bets half the pot with two pair or better, calls with a pair and
/// gives up otherwise.
#[derive(Debug, Clone, Copy)]
pub struct HandStrengthStrategy;

impl HandStrengthStrategy {
    fn preflop(req: &ActionRequest, cards: &[Card]) -> Action {
        let [c1, c2] = cards else {
            return Self::check_or_fold(req);
        };

        let big_cards = c1.rank() >= Rank::Ten && c2.rank() >= Rank::Ten;
        if c1.rank() == c2.rank() || big_cards {
            let big_blind = req.min_raise - req.largest_bet;
            if req.largest_bet <= big_blind * 4 {
                req.raise_to(req.min_raise)
            } else {
                Action::CheckCall
            }
        } else if c1.rank() == Rank::Ace || c2.rank() == Rank::Ace || req.to_call <= req.pot / 4 {
            Action::CheckCall
        } else {
            Self::check_or_fold(req)
        }
    }

    fn postflop(req: &ActionRequest, cards: &[Card]) -> Action {
        match evaluate(cards).map(|h| h.category()) {
            Ok(c) if c >= HandCategory::TwoPair => req.raise_to(req.largest_bet + req.pot / 2),
            Ok(HandCategory::Pair) if req.to_call <= req.pot / 2 => Action::CheckCall,
            _ => Self::check_or_fold(req),
        }
    }

    fn check_or_fold(req: &ActionRequest) -> Action {
        if req.can_check() {
            Action::CheckCall
        } else {
            Action::Fold
        }
    }
}

impl Strategy for HandStrengthStrategy {
    fn execute(&mut self, req: &ActionRequest, player: &Player, board: &[Card]) -> Action {
        let mut cards = player.hole_cards.to_vec();
        if req.street == Street::Preflop {
            Self::preflop(req, &cards)
        } else {
            cards.extend_from_slice(board);
            Self::postflop(req, &cards)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riverboat_core::{
        player::Roster,
        poker::{Chips, PlayerCards},
    };

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn roster_with(hole: &str) -> Roster {
        let mut roster = Roster::new([("bot", Chips::new(100)), ("villain", Chips::new(100))]);
        let hole = cards(hole);
        roster.seat_mut(0).hole_cards = PlayerCards::Cards(hole[0], hole[1]);
        roster
    }

    fn request(roster: &Roster, street: Street, largest_bet: u32, pot: u32) -> ActionRequest {
        let player = roster.seat(0);
        ActionRequest {
            player_id: player.id(),
            position: 0,
            street,
            largest_bet: Chips::new(largest_bet),
            player_bet: Chips::ZERO,
            to_call: Chips::new(largest_bet),
            min_raise: Chips::new(largest_bet + 2),
            max_bet: player.chips,
            pot: Chips::new(pot),
        }
    }

    #[test]
    fn calling_strategy() {
        let roster = roster_with("2C 7D");
        let req = request(&roster, Street::Flop, 50, 60);
        let action = CallingStrategy.execute(&req, roster.seat(0), &[]);
        assert_eq!(action, Action::CheckCall);
    }

    #[test]
    fn random_strategy_odds() {
        let roster = roster_with("2C 7D");
        let player = roster.seat(0);

        let mut folding = RandomStrategy::with_odds(1, 1.0, 0.0);
        let req = request(&roster, Street::Turn, 10, 20);
        assert_eq!(folding.execute(&req, player, &[]), Action::Fold);

        // Never folds when it can check.
        let req = request(&roster, Street::Turn, 0, 20);
        assert_eq!(folding.execute(&req, player, &[]), Action::CheckCall);

        let mut raising = RandomStrategy::with_odds(1, 0.0, 1.0);
        for _ in 0..100 {
            let Action::BetRaise(amount) = raising.execute(&req, player, &[]) else {
                panic!("expected a raise");
            };

            assert!(amount >= req.min_raise && amount <= req.max_bet);
        }
    }

    #[test]
    fn strength_preflop() {
        let roster = roster_with("9C 9D");
        let req = request(&roster, Street::Preflop, 2, 3);
        let action = HandStrengthStrategy.execute(&req, roster.seat(0), &[]);
        assert_eq!(action, Action::BetRaise(Chips::new(4)));

        // Calls a big raise with a pair.
        let req = request(&roster, Street::Preflop, 40, 50);
        let action = HandStrengthStrategy.execute(&req, roster.seat(0), &[]);
        assert_eq!(action, Action::CheckCall);

        let roster = roster_with("7C 2D");
        let req = request(&roster, Street::Preflop, 40, 50);
        let action = HandStrengthStrategy.execute(&req, roster.seat(0), &[]);
        assert_eq!(action, Action::Fold);
    }

    #[test]
    fn strength_postflop() {
        let roster = roster_with("KC KD");
        let board = cards("KS 7H 2C");

        let req = request(&roster, Street::Flop, 0, 20);
        let action = HandStrengthStrategy.execute(&req, roster.seat(0), &board);
        assert_eq!(action, Action::BetRaise(Chips::new(10)));

        // Nothing on the board folds to a bet and checks otherwise.
        let roster = roster_with("4C 5D");
        let board = cards("KS QH 9C");
        let req = request(&roster, Street::Flop, 10, 20);
        let action = HandStrengthStrategy.execute(&req, roster.seat(0), &board);
        assert_eq!(action, Action::Fold);

        let req = request(&roster, Street::Flop, 0, 20);
        let action = HandStrengthStrategy.execute(&req, roster.seat(0), &board);
        assert_eq!(action, Action::CheckCall);
    }
}
