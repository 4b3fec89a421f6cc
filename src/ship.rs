//! Ships as hit counters. Where a ship sits is tracked by the board, not here.

use core::fmt;

use crate::common::ShipError;

/// Identifier of a live ship on one board. Grid cells and adjacency sets refer
/// to ships through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub u64);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A ship of fixed length counting the hits it has taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    length: usize,
    hits: usize,
}

impl Ship {
    /// Create an undamaged ship. Fails for a zero length.
    pub fn new(length: usize) -> Result<Self, ShipError> {
        if length == 0 {
            return Err(ShipError::InvalidLength);
        }
        Ok(Self { length, hits: 0 })
    }

    /// Register one hit. Fails once the ship is sunk.
    pub fn hit(&mut self) -> Result<(), ShipError> {
        if self.is_sunk() {
            return Err(ShipError::AlreadySunk);
        }
        self.hits += 1;
        Ok(())
    }

    pub fn is_sunk(&self) -> bool {
        self.hits == self.length
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}
