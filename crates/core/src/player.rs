// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::poker::{Chips, PlayerCards};

/// A stable player identifier, an index into the roster players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(usize);

impl PlayerId {
    /// The index of this player in the roster.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A table player state.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    /// This player nickname.
    pub nickname: String,
    /// This player chips.
    pub chips: Chips,
    /// This player private cards.
    pub hole_cards: PlayerCards,
    /// The player has folded this hand.
    pub folded: bool,
    /// The player has committed all the chips this hand.
    pub all_in: bool,
}

impl Player {
    fn new(id: PlayerId, nickname: String, chips: Chips) -> Self {
        Self {
            id,
            nickname,
            chips,
            hole_cards: PlayerCards::None,
            folded: false,
            all_in: false,
        }
    }

    /// The player identifier.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Takes up to `amount` chips from this player stack and returns the chips
    /// actually taken.
    ///
    /// A commitment that reaches the stack size takes the whole stack and sets
    /// the player all-in.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        if amount >= self.chips {
            let committed = self.chips;
            self.chips = Chips::ZERO;
            self.all_in = true;
            committed
        } else {
            self.chips -= amount;
            amount
        }
    }

    /// Sets this player in fold state.
    pub fn fold(&mut self) {
        self.folded = true;
    }

    /// Checks if this player can still act in the hand.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    /// Reset state for a new hand.
    fn start_hand(&mut self) {
        self.folded = false;
        self.all_in = false;
        self.hole_cards = PlayerCards::None;
    }
}

/// The table players.
///
/// Players are stored in an arena indexed by [PlayerId] and never removed,
/// the seats hold the players still in the game ordered by position, position
/// 0 posts the small blind and position 1 the big blind.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
    seats: Vec<PlayerId>,
}

impl Roster {
    /// Creates a roster from nicknames and stacks, players are seated in the
    /// given order.
    pub fn new<S, I>(players: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Chips)>,
    {
        let mut roster = Self::default();
        for (nickname, chips) in players {
            roster.join(nickname, chips);
        }

        roster
    }

    /// Adds a player in the last position.
    pub fn join(&mut self, nickname: impl Into<String>, chips: Chips) -> PlayerId {
        let id = PlayerId(self.players.len());
        self.players.push(Player::new(id, nickname.into(), chips));
        self.seats.push(id);
        id
    }

    /// Returns the number of seated players.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Checks if there are no seated players.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Returns the player at the given position.
    ///
    /// Panics if the position is not less than [Roster::len].
    pub fn seat(&self, position: usize) -> &Player {
        &self.players[self.seats[position].0]
    }

    /// Returns the mutable player at the given position.
    ///
    /// Panics if the position is not less than [Roster::len].
    pub fn seat_mut(&mut self, position: usize) -> &mut Player {
        &mut self.players[self.seats[position].0]
    }

    /// Returns a player by id, seated or not.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0)
    }

    /// Returns a mutable player by id, seated or not.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.0)
    }

    /// Returns the position of a seated player.
    pub fn position(&self, id: PlayerId) -> Option<usize> {
        self.seats.iter().position(|&s| s == id)
    }

    /// Returns an iterator to the seated players in position order.
    pub fn seated(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().map(|id| &self.players[id.0])
    }

    /// Returns an iterator to all players including the eliminated ones.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Set state for a new hand.
    pub fn start_hand(&mut self) {
        for id in &self.seats {
            self.players[id.0].start_hand();
        }
    }

    /// Moves every player one position down, the small blind moves to the
    /// last position.
    pub fn rotate(&mut self) {
        if !self.seats.is_empty() {
            self.seats.rotate_left(1);
        }
    }

    /// Removes players that run out of chips and returns their ids.
    pub fn remove_with_no_chips(&mut self) -> Vec<PlayerId> {
        let players = &self.players;
        let (seated, broke) = self
            .seats
            .iter()
            .copied()
            .partition::<Vec<_>, _>(|id| players[id.0].chips > Chips::ZERO);

        self.seats = seated;
        broke
    }
}
