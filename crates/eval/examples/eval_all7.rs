// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_all7
// ...
// Total hands      133784560
//
// high card        23294460
// pair             58627800
// two pair         31433400
// three of a kind  6461620
// straight         6180020
// flush            4047644
// full house       3473184
// four of a kind   224848
// straight flush   41584
// ```

use std::time::Instant;

use riverboat_eval::*;

const CATEGORIES: [HandCategory; 9] = [
    HandCategory::HighCard,
    HandCategory::Pair,
    HandCategory::TwoPair,
    HandCategory::ThreeOfAKind,
    HandCategory::Straight,
    HandCategory::Flush,
    HandCategory::FullHouse,
    HandCategory::FourOfAKind,
    HandCategory::StraightFlush,
];

fn main() -> Result<(), EvalError> {
    // Evaluate all 133M hands.
    let now = Instant::now();
    let mut counts = [0usize; 9];
    let mut error = None;

    Deck::default().for_each(7, |hand| match evaluate(hand) {
        Ok(hand) => counts[hand.category() as usize] += 1,
        Err(e) => error = Some(e),
    });

    if let Some(e) = error {
        return Err(e);
    }

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<usize>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for category in CATEGORIES {
        let name = category.to_string();
        println!("{name:<16} {}", counts[category as usize]);
    }

    Ok(())
}
