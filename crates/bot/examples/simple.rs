// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A simple example bot strategy.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;

use riverboat_bot::{
    CallingStrategy, Config, Strategy,
    core::{
        betting::{Action, ActionRequest},
        player::Player,
        poker::{Card, PlayerCards, Street},
    },
};

/// Raises preflop with a pair, then calls down.
#[derive(Clone)]
struct PairRaiser;

impl Strategy for PairRaiser {
    fn execute(&mut self, req: &ActionRequest, player: &Player, _board: &[Card]) -> Action {
        // Some randomness.
        let p = rand::random::<f64>();

        if let PlayerCards::Cards(c1, c2) = player.hole_cards {
            if c1.rank() == c2.rank() && req.street == Street::Preflop && p > 0.2 {
                return req.raise_to(req.min_raise);
            }
        }

        if p < 0.1 && !req.can_check() {
            Action::Fold
        } else {
            Action::CheckCall
        }
    }
}

#[derive(Debug, Parser)]
struct Cli {
    /// Number of players at the table.
    #[clap(long, short, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=9))]
    players: u8,
    /// Random seed for reproducible runs.
    #[clap(long, short)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = Config {
        players: cli.players,
        seed: cli.seed,
        ..Default::default()
    };

    // The first seat plays the pair raiser against calling stations.
    let standings = riverboat_bot::run(&config, |idx| -> Box<dyn Strategy> {
        if idx == 0 {
            Box::new(PairRaiser)
        } else {
            Box::new(CallingStrategy)
        }
    })?;

    if let Some((nickname, chips)) = standings.leader() {
        println!("{nickname} leads with {chips} chips");
    }

    Ok(())
}
