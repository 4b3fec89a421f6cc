use alloc::vec::Vec;

use crate::common::BoardError;

pub const DEFAULT_DIMENSION: usize = 10;
pub const DEFAULT_SHIP_LENGTHS: [usize; 5] = [2, 2, 3, 4, 5];

/// Largest accepted board dimension.
pub const MAX_DIMENSION: usize = 1_000;

/// Whole-fleet layouts tried before random placement gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1_000;

/// Board size and fleet shared by both players.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "RawGameConfig"))]
pub struct GameConfig {
    dimension: usize,
    ship_lengths: Vec<usize>,
}

impl GameConfig {
    /// Validated configuration. Fails under the same rules as `GameBoard::new`.
    pub fn new(dimension: usize, ship_lengths: &[usize]) -> Result<Self, BoardError> {
        validate(dimension, ship_lengths)?;
        Ok(Self {
            dimension,
            ship_lengths: ship_lengths.to_vec(),
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn ship_lengths(&self) -> &[usize] {
        &self.ship_lengths
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            ship_lengths: DEFAULT_SHIP_LENGTHS.to_vec(),
        }
    }
}

#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawGameConfig {
    dimension: usize,
    ship_lengths: Vec<usize>,
}

#[cfg(feature = "std")]
impl TryFrom<RawGameConfig> for GameConfig {
    type Error = BoardError;

    fn try_from(raw: RawGameConfig) -> Result<Self, BoardError> {
        GameConfig::new(raw.dimension, &raw.ship_lengths)
    }
}

/// Check a board dimension and fleet: the dimension must be in
/// `1..=MAX_DIMENSION` and every ship must fit along one edge.
pub(crate) fn validate(dimension: usize, ship_lengths: &[usize]) -> Result<(), BoardError> {
    if dimension == 0 {
        return Err(BoardError::InvalidDimension);
    }
    if dimension > MAX_DIMENSION {
        return Err(BoardError::DimensionTooLarge {
            dimension,
            max: MAX_DIMENSION,
        });
    }
    if ship_lengths.is_empty() {
        return Err(BoardError::NoShipLengths);
    }
    if let Some(&length) = ship_lengths
        .iter()
        .find(|&&len| len == 0 || len > dimension)
    {
        return Err(BoardError::InvalidShipLength { length, dimension });
    }
    Ok(())
}
