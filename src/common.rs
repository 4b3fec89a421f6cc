//! Common types for the naval combat engine: coordinates, orientations and the
//! error enums returned by every layer.

use core::fmt;
use core::str::FromStr;

use crate::game::Phase;
use crate::player::Seat;

/// A cell on a square board. `x` is the column and `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance between two cells; diagonal neighbours are at distance 1.
    pub fn chebyshev(&self, other: &Coordinate) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends towards increasing `x`.
    Horizontal,
    /// Extends towards increasing `y`.
    Vertical,
}

impl Orientation {
    /// The `i`th cell of a ship starting at `origin`.
    pub(crate) fn step(self, origin: Coordinate, i: usize) -> Coordinate {
        match self {
            Orientation::Horizontal => Coordinate::new(origin.x + i, origin.y),
            Orientation::Vertical => Coordinate::new(origin.x, origin.y + i),
        }
    }
}

impl FromStr for Orientation {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" | "horizontal" => Ok(Orientation::Horizontal),
            "v" | "vertical" => Ok(Orientation::Vertical),
            _ => Err(BoardError::InvalidOrientation),
        }
    }
}

impl TryFrom<char> for Orientation {
    type Error = BoardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'h' => Ok(Orientation::Horizontal),
            'v' => Ok(Orientation::Vertical),
            _ => Err(BoardError::InvalidOrientation),
        }
    }
}

/// Errors returned by `Ship` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipError {
    /// Ships must be at least one cell long.
    InvalidLength,
    /// The ship already took as many hits as it has cells.
    AlreadySunk,
}

impl fmt::Display for ShipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipError::InvalidLength => write!(f, "Ship length must be greater than 0"),
            ShipError::AlreadySunk => write!(f, "Ship is already sunk"),
        }
    }
}

/// Errors returned by `GameBoard` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Board dimension was zero.
    InvalidDimension,
    /// Board dimension exceeds `MAX_DIMENSION`.
    DimensionTooLarge { dimension: usize, max: usize },
    /// No ship lengths were configured.
    NoShipLengths,
    /// A configured ship length falls outside `1..=dimension`.
    InvalidShipLength { length: usize, dimension: usize },
    /// Slot index is out of range.
    InvalidIndex(usize),
    /// Attempted to place a slot that is already placed.
    ShipAlreadyPlaced(usize),
    /// Attempted to remove a slot that is not placed.
    ShipNotPlaced(usize),
    /// No unplaced slot has the requested length.
    NoShipOfLength(usize),
    /// Orientation text was neither horizontal nor vertical.
    InvalidOrientation,
    /// Origin or span leaves the board.
    ShipOutOfBounds,
    /// Span overlaps or touches an existing ship.
    ShipCollides,
    /// Random placement ran out of attempts for the given slot.
    UnableToPlaceShip(usize),
    /// Attack coordinates are off the board.
    AttackOutOfBounds,
    /// The cell was attacked before.
    AlreadyAttacked,
    /// A serialized board does not describe a reachable state.
    InvalidSnapshot,
    /// Underlying ship error.
    Ship(ShipError),
}

impl From<ShipError> for BoardError {
    fn from(err: ShipError) -> Self {
        BoardError::Ship(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidDimension => write!(f, "Gameboard dimension must be greater than 0"),
            BoardError::DimensionTooLarge { dimension, max } => write!(
                f,
                "Gameboard dimension {} exceeds the maximum of {}",
                dimension, max
            ),
            BoardError::NoShipLengths => write!(f, "Ship lengths must not be empty"),
            BoardError::InvalidShipLength { length, dimension } => write!(
                f,
                "Ship length {} must be between 1 and the board dimension {}",
                length, dimension
            ),
            BoardError::InvalidIndex(i) => {
                write!(f, "There are no ships of index {} on this board", i)
            }
            BoardError::ShipAlreadyPlaced(i) => {
                write!(f, "Ship of index {} has already been placed", i)
            }
            BoardError::ShipNotPlaced(i) => {
                write!(f, "Ship of index {} is not placed, cannot remove", i)
            }
            BoardError::NoShipOfLength(len) => {
                write!(f, "There are no unplaced ships of length {}", len)
            }
            BoardError::InvalidOrientation => {
                write!(f, "Orientation must be either \"v\" or \"h\"")
            }
            BoardError::ShipOutOfBounds => write!(f, "Placed ship out of bounds"),
            BoardError::ShipCollides => {
                write!(f, "Placed ship collides or adjacent to an existing ship")
            }
            BoardError::UnableToPlaceShip(i) => {
                write!(f, "Unable to find a random position for ship of index {}", i)
            }
            BoardError::AttackOutOfBounds => write!(f, "Attack coordinates out of bounds"),
            BoardError::AlreadyAttacked => write!(f, "Attack coordinates already hit"),
            BoardError::InvalidSnapshot => write!(f, "Board snapshot is inconsistent"),
            BoardError::Ship(e) => write!(f, "{}", e),
        }
    }
}

/// Errors returned when a player shoots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerError {
    /// The shooter has no opponent linked.
    NoOpponent,
    /// Every cell of the opponent board has already been attacked.
    NoEmptySpaces,
    /// Underlying board error.
    Board(BoardError),
}

impl From<BoardError> for PlayerError {
    fn from(err: BoardError) -> Self {
        PlayerError::Board(err)
    }
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::NoOpponent => write!(f, "No opponent set"),
            PlayerError::NoEmptySpaces => write!(f, "No empty spaces left"),
            PlayerError::Board(e) => write!(f, "{}", e),
        }
    }
}

/// Errors returned by `GameController` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// The operation requires `expected`, but the game is in `actual`.
    WrongPhase { expected: Phase, actual: Phase },
    /// Player index was neither 0 nor 1.
    InvalidPlayerIndex(usize),
    /// No players have been created yet.
    NoPlayers,
    /// The given seat still has unplaced ships.
    FleetIncomplete(Seat),
    /// Underlying player error.
    Player(PlayerError),
    /// Underlying board error.
    Board(BoardError),
}

impl From<PlayerError> for GameError {
    fn from(err: PlayerError) -> Self {
        GameError::Player(err)
    }
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::WrongPhase { expected, actual } => {
                write!(f, "Not in {} state (currently {})", expected, actual)
            }
            GameError::InvalidPlayerIndex(i) => {
                write!(f, "Player index must be 0 or 1, got {}", i)
            }
            GameError::NoPlayers => write!(f, "Players have not been created"),
            GameError::FleetIncomplete(seat) => {
                write!(f, "Not all ships have been placed for {}", seat)
            }
            GameError::Player(e) => write!(f, "{}", e),
            GameError::Board(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShipError {}
#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for PlayerError {}
#[cfg(feature = "std")]
impl std::error::Error for GameError {}
