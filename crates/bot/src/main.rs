// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Riverboat Bot.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use clap::Parser;
use log::info;

use riverboat_bot::{Config, StrategyKind};

#[derive(Debug, Parser)]
struct Cli {
    /// Number of players at the table.
    #[clap(long, short, default_value_t = 6, value_parser = clap::value_parser!(u8).range(2..=9))]
    players: u8,
    /// Starting chips for each player.
    #[clap(long, short, default_value_t = 1_000)]
    chips: u32,
    /// The small blind.
    #[clap(long, default_value_t = 5)]
    small_blind: u32,
    /// The big blind.
    #[clap(long, default_value_t = 10)]
    big_blind: u32,
    /// The ante paid by every player each hand.
    #[clap(long, default_value_t = 0)]
    ante: u32,
    /// Maximum number of hands to play.
    #[clap(long, default_value_t = 1_000)]
    hands: u64,
    /// Random seed for reproducible runs.
    #[clap(long, short)]
    seed: Option<u64>,
    /// Strategies assigned to the seats in turn.
    #[clap(long, value_enum, value_delimiter = ',', default_value = "strength,random,calling")]
    strategies: Vec<StrategyKind>,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = Config {
        players: cli.players,
        chips: cli.chips,
        small_blind: cli.small_blind,
        big_blind: cli.big_blind,
        ante: cli.ante,
        hands: cli.hands,
        seed: cli.seed,
    };

    let base_seed = cli.seed.unwrap_or_else(rand::random);
    let kinds = cli.strategies;
    if kinds.is_empty() {
        bail!("At least one strategy is needed");
    }

    let standings = riverboat_bot::run(&config, |idx| {
        kinds[idx % kinds.len()].build(base_seed.wrapping_add(idx as u64))
    })?;

    for (nickname, chips) in &standings.players {
        info!("{nickname} {chips}");
    }

    Ok(())
}
