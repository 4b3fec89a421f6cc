//! Players and the pair that owns both of them.
//!
//! A player refers to its opponent by seat rather than by reference. Shots are
//! resolved on [`Players`], the only place that can lend out the opponent's
//! board mutably.

use alloc::string::String;
use core::fmt;
use core::ops::Index;
use rand::Rng;

use crate::board::{GameBoard, Slot};
use crate::common::{BoardError, Coordinate, Orientation, PlayerError};
use crate::ship::ShipId;

/// Which of the two players a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    /// The other seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Zero-based player index.
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    /// Seat for a zero-based player index.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::First),
            1 => Some(Seat::Second),
            _ => None,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::First => write!(f, "player 1"),
            Seat::Second => write!(f, "player 2"),
        }
    }
}

/// Outcome of one shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Shot {
    pub hit: bool,
    pub coord: Coordinate,
}

/// A named player with its own board.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    name: String,
    is_ai: bool,
    board: GameBoard,
    opponent: Option<Seat>,
}

impl Player {
    pub fn new(
        name: impl Into<String>,
        is_ai: bool,
        dimension: usize,
        ship_lengths: &[usize],
    ) -> Result<Self, BoardError> {
        Ok(Self {
            name: name.into(),
            is_ai,
            board: GameBoard::new(dimension, ship_lengths)?,
            opponent: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_ai(&self) -> bool {
        self.is_ai
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn opponent(&self) -> Option<Seat> {
        self.opponent
    }

    /// Link (or unlink) the opponent. Callers wire both directions.
    pub fn set_opponent(&mut self, opponent: Option<Seat>) {
        self.opponent = opponent;
    }

    pub fn place_ship(
        &mut self,
        slot_index: usize,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        self.board.place_ship(slot_index, origin, orientation)
    }

    /// Place the first unplaced ship of `length`.
    pub fn place_ship_of_length(
        &mut self,
        length: usize,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        let slot_index = self
            .board
            .slot_for_length(length)
            .ok_or(BoardError::NoShipOfLength(length))?;
        self.board.place_ship(slot_index, origin, orientation)
    }

    pub fn remove_ship(&mut self, slot_index: usize) -> Result<(), BoardError> {
        self.board.remove_ship(slot_index)
    }

    pub fn place_random_ships<R: Rng>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        self.board.place_random_ships(rng)
    }

    pub fn clear_ships(&mut self) {
        self.board.clear_ships();
    }

    pub fn clear_shots_received(&mut self) {
        self.board.clear_shots_received();
    }

    pub fn receive_attack(&mut self, coord: Coordinate) -> Result<bool, BoardError> {
        self.board.receive_attack(coord)
    }

    pub fn slots(&self) -> &[Slot] {
        self.board.slots()
    }

    pub fn all_ships_placed(&self) -> bool {
        self.board.all_ships_placed()
    }

    pub fn all_sunk(&self) -> bool {
        self.board.all_sunk()
    }
}

/// The two players of a game, linked to each other as opponents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Players {
    seats: [Player; 2],
}

impl Players {
    /// Take ownership of both players and link them as opponents.
    pub fn new(mut first: Player, mut second: Player) -> Self {
        first.set_opponent(Some(Seat::Second));
        second.set_opponent(Some(Seat::First));
        Self {
            seats: [first, second],
        }
    }

    pub fn get(&self, seat: Seat) -> &Player {
        &self.seats[seat.index()]
    }

    pub fn get_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.seats[seat.index()]
    }

    pub fn first(&self) -> &Player {
        &self.seats[0]
    }

    pub fn second(&self) -> &Player {
        &self.seats[1]
    }

    /// The player `shooter` is linked to.
    fn target_of(&self, shooter: Seat) -> Result<Seat, PlayerError> {
        self.get(shooter).opponent().ok_or(PlayerError::NoOpponent)
    }

    /// Fire at `coord` on the board of `shooter`'s opponent.
    pub fn shoot(&mut self, shooter: Seat, coord: Coordinate) -> Result<Shot, PlayerError> {
        let target = self.target_of(shooter)?;
        let hit = self.get_mut(target).receive_attack(coord)?;
        Ok(Shot { hit, coord })
    }

    /// Fire at a uniformly random cell the opponent has not been attacked on.
    pub fn shoot_auto<R: Rng>(&mut self, shooter: Seat, rng: &mut R) -> Result<Shot, PlayerError> {
        let target = self.target_of(shooter)?;
        let open: alloc::vec::Vec<Coordinate> = self.get(target).board().unshot_cells().collect();
        if open.is_empty() {
            return Err(PlayerError::NoEmptySpaces);
        }
        let coord = open[rng.random_range(0..open.len())];
        self.shoot(shooter, coord)
    }
}

impl Index<Seat> for Players {
    type Output = Player;

    fn index(&self, seat: Seat) -> &Player {
        self.get(seat)
    }
}
