// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Riverboat Bot.
//!
//! Runs a table of bots until one player has all the chips or the hands limit
//! is reached.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};

use riverboat_core::{
    betting::{Action, ActionRequest, BettingError, DecisionProvider},
    player::{Player, Roster},
    poker::{Card, Chips, Stakes, Street},
    table::Table,
};

pub use riverboat_core as core;

mod strategy;
pub use strategy::{CallingStrategy, HandStrengthStrategy, RandomStrategy, Strategy, StrategyKind};

/// Table simulation configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of players at the table.
    pub players: u8,
    /// Starting chips for each player.
    pub chips: u32,
    /// The small blind.
    pub small_blind: u32,
    /// The big blind.
    pub big_blind: u32,
    /// The ante paid by every player each hand.
    pub ante: u32,
    /// Maximum number of hands to play.
    pub hands: u64,
    /// The random seed, a random one is used if not set.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: 6,
            chips: 1_000,
            small_blind: 5,
            big_blind: 10,
            ante: 0,
            hands: 1_000,
            seed: None,
        }
    }
}

static NICKNAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "Dave", "Frank", "Mike", "Nina", "Oscar", "Paula",
];

/// Dispatches the table decisions to each player strategy.
pub struct Bots {
    strategies: Vec<Box<dyn Strategy>>,
    board: Vec<Card>,
}

impl Bots {
    /// Creates bots from strategies indexed by player id.
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self {
            strategies,
            board: Vec::with_capacity(5),
        }
    }
}

impl DecisionProvider for Bots {
    fn request_decision(&mut self, player: &Player, req: &ActionRequest) -> Action {
        // The board from the previous hand is stale until the flop.
        let board = if req.street == Street::Preflop {
            &[][..]
        } else {
            &self.board[..]
        };

        match self.strategies.get_mut(player.id().index()) {
            Some(strategy) => strategy.execute(req, player, board),
            None => Action::Fold,
        }
    }

    fn rejected(&mut self, player: &Player, req: &ActionRequest, err: &BettingError) -> Action {
        warn!("{} action rejected: {err}", player.nickname);
        if req.can_check() {
            Action::CheckCall
        } else {
            Action::Fold
        }
    }

    fn board_dealt(&mut self, board: &[Card]) {
        self.board.clear();
        self.board.extend_from_slice(board);
    }
}

/// The final chips count.
#[derive(Debug, Clone)]
pub struct Standings {
    /// The number of hands played.
    pub hands: u64,
    /// Players nicknames and chips sorted by chips.
    pub players: Vec<(String, Chips)>,
}

impl Standings {
    /// The player with most chips.
    pub fn leader(&self) -> Option<&(String, Chips)> {
        self.players.first()
    }
}

/// Runs a table given a config and a strategy factory called for each seat.
pub fn run<F>(config: &Config, mut factory: F) -> Result<Standings>
where
    F: FnMut(usize) -> Box<dyn Strategy>,
{
    if !(2..=NICKNAMES.len()).contains(&(config.players as usize)) {
        bail!("Invalid number of players {}", config.players);
    }

    if config.chips == 0 {
        bail!("Players need some chips to play");
    }

    if config.small_blind > config.big_blind || config.big_blind == 0 {
        bail!(
            "Invalid blinds {}/{}",
            config.small_blind,
            config.big_blind
        );
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let seats = config.players as usize;
    let roster = Roster::new(
        NICKNAMES[..seats]
            .iter()
            .map(|&nickname| (nickname, Chips::new(config.chips))),
    );

    let stakes = Stakes::new(config.small_blind.into(), config.big_blind.into())
        .with_ante(config.ante.into());

    let mut bots = Bots::new((0..seats).map(&mut factory).collect());
    let mut table = Table::new(roster, stakes);

    info!(
        "Starting table players {seats} chips {} blinds {}/{} ante {} seed {seed}",
        Chips::new(config.chips),
        stakes.small_blind,
        stakes.big_blind,
        stakes.ante
    );

    while !table.is_over() && table.hands() < config.hands {
        let summary = table.play_hand(&mut rng, &mut bots)?;
        for payoff in &summary.payoffs {
            if let Some(player) = table.roster().player(payoff.player_id) {
                info!(
                    "Hand {} {} won {} on the {}",
                    summary.hand, player.nickname, payoff.chips, summary.street
                );
            }
        }
    }

    let mut players = table
        .roster()
        .players()
        .map(|p| (p.nickname.clone(), p.chips))
        .collect::<Vec<_>>();
    players.sort_by(|a, b| b.1.cmp(&a.1));

    if let Some(leader) = table.chip_leader() {
        info!(
            "Table ended after {} hands, {} leads with {}",
            table.hands(),
            leader.nickname,
            leader.chips
        );
    }

    Ok(Standings {
        hands: table.hands(),
        players,
    })
}
