// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Straight, flush and rank groups detection.
use ahash::AHashMap;

use riverboat_cards::{Card, Rank, Suit};

use super::HandCategory;

/// Number of cards in a poker hand.
pub(super) const HAND_SIZE: usize = 5;

/// A card in a straight search sequence.
///
/// The value is the card rank value, or 0 for the duplicate of an ace that
/// plays as the lowest card of a wheel. The card itself always keeps its
/// natural rank so that extracted aces are reported as aces.
#[derive(Debug, Clone, Copy)]
pub(super) struct Slot {
    value: u8,
    card: Card,
}

/// Sorts cards by rank from highest to lowest, equal ranks are ordered by
/// suit so that the same cards always produce the same sequence.
pub(super) fn sorted(cards: &[Card]) -> Vec<Card> {
    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| b.rank().cmp(&a.rank()).then(a.suit().cmp(&b.suit())));
    sorted
}

/// Returns the run of consecutive ranks that holds the highest straight in the
/// descending sorted cards, or an empty vector if there is no straight.
///
/// The run may contain more than five cards, cards with duplicate ranks are
/// kept so that a straight flush can be searched for within the run.
pub(super) fn straight_pool(sorted: &[Card]) -> Vec<Slot> {
    let mut slots = sorted
        .iter()
        .map(|&card| Slot {
            value: card.rank().value(),
            card,
        })
        .collect::<Vec<_>>();

    // Aces play low too, their low duplicates go at the end of the sequence.
    let low_aces = sorted
        .iter()
        .filter(|c| c.rank() == Rank::Ace)
        .map(|&card| Slot { value: 0, card })
        .collect::<Vec<_>>();
    slots.extend(low_aces);

    find_run(&slots).map(<[Slot]>::to_vec).unwrap_or_default()
}

/// Finds the first run with at least five distinct consecutive values in a
/// descending sequence of slots.
fn find_run(slots: &[Slot]) -> Option<&[Slot]> {
    let mut start = 0;
    let mut distinct = 1;

    for idx in 1..=slots.len() {
        if let Some(slot) = slots.get(idx) {
            let prev = slots[idx - 1].value;
            if slot.value + 1 == prev {
                distinct += 1;
                continue;
            } else if slot.value == prev {
                continue;
            }
        }

        // The run ended either on a gap or at the end of the sequence.
        if distinct >= HAND_SIZE {
            return Some(&slots[start..idx]);
        }

        start = idx;
        distinct = 1;
    }

    None
}

/// Returns the five highest distinct cards of a straight run.
pub(super) fn top_straight(run: &[Slot]) -> Option<[Card; HAND_SIZE]> {
    let mut cards = Vec::with_capacity(HAND_SIZE);
    let mut last = None;

    for slot in run {
        if last != Some(slot.value) {
            cards.push(slot.card);
            last = Some(slot.value);
        }
    }

    (cards.len() >= HAND_SIZE).then(|| take_five(cards))
}

/// Returns all cards of the flush suit, or an empty vector if there are fewer
/// than five cards of any suit.
///
/// All suited cards are returned so that a straight flush can be searched
/// amongst them.
pub(super) fn flush_pool(sorted: &[Card]) -> Vec<Card> {
    let count = |suit: Suit| sorted.iter().filter(|c| c.suit() == suit).count();

    match Suit::suits().max_by_key(|&s| count(s)) {
        Some(suit) if count(suit) >= HAND_SIZE => sorted
            .iter()
            .filter(|c| c.suit() == suit)
            .copied()
            .collect(),
        _ => Vec::new(),
    }
}

/// Searches the straight run for five consecutive cards of the flush suit.
pub(super) fn straight_flush(straight: &[Slot], flush: &[Card]) -> Option<[Card; HAND_SIZE]> {
    let suit = flush.first()?.suit();

    let suited = straight
        .iter()
        .filter(|s| s.card.suit() == suit)
        .copied()
        .collect::<Vec<_>>();

    find_run(&suited).and_then(top_straight)
}

/// Groups cards by rank.
///
/// Groups are ordered by size and then by rank from the highest, so the first
/// group is the primary scoring group and kickers always prefer higher ranks.
fn rank_groups(sorted: &[Card]) -> Vec<Vec<Card>> {
    let mut groups = AHashMap::<Rank, Vec<Card>>::with_capacity(sorted.len());
    for &card in sorted {
        groups.entry(card.rank()).or_default().push(card);
    }

    let mut groups = groups.into_iter().collect::<Vec<_>>();
    groups.sort_by(|(r1, g1), (r2, g2)| g2.len().cmp(&g1.len()).then(r2.cmp(r1)));
    groups.into_iter().map(|(_, cards)| cards).collect()
}

/// Returns the best hand made of pairs, trips and quads, this covers every
/// category that is not a straight or a flush.
pub(super) fn grouped_hand(sorted: &[Card]) -> (HandCategory, [Card; HAND_SIZE]) {
    let groups = rank_groups(sorted);
    let best = groups.first().map_or(0, Vec::len);
    let second = groups.get(1).map_or(0, Vec::len);

    // How many groups make the primary part of the hand.
    let (category, primary) = match (best, best * second) {
        (4, _) => (HandCategory::FourOfAKind, 1),
        (2 | 3, 2) => (HandCategory::Pair, 1),
        (2 | 3, 3) => (HandCategory::ThreeOfAKind, 1),
        (2 | 3, 4) => (HandCategory::TwoPair, 2),
        (2 | 3, 6 | 9) => (HandCategory::FullHouse, 2),
        _ => (HandCategory::HighCard, 0),
    };

    let primary = &groups[..primary.min(groups.len())];
    let kickers = sorted
        .iter()
        .filter(|c| !primary.iter().any(|g| g[0].rank() == c.rank()));

    let cards = primary
        .iter()
        .flatten()
        .chain(kickers)
        .copied()
        .take(HAND_SIZE)
        .collect::<Vec<_>>();

    (category, take_five(cards))
}

/// Copies the first five cards, callers have checked there are at least five.
pub(super) fn take_five(cards: Vec<Card>) -> [Card; HAND_SIZE] {
    debug_assert!(cards.len() >= HAND_SIZE);

    let mut hand = [Card::new(Rank::Deuce, Suit::Clubs); HAND_SIZE];
    for (dst, src) in hand.iter_mut().zip(cards) {
        *dst = src;
    }

    hand
}
