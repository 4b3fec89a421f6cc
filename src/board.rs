//! Game board state: fleet slots, ship grid, shot grid and the adjacency index.
//!
//! Every cell of the adjacency index holds the ids of ships that occupy or
//! touch it (Chebyshev distance 1). A span is free exactly when all of its
//! cells have an empty set, which rules out both overlaps and touching ships
//! without comparing against every placed ship.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::cmp::Reverse;
use log::{trace, warn};
use rand::Rng;

use crate::common::{BoardError, Coordinate, Orientation};
use crate::config::{self, MAX_PLACEMENT_ATTEMPTS};
use crate::ship::{Ship, ShipId};

/// Where a slot's ship was put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub origin: Coordinate,
    pub orientation: Orientation,
}

/// Placement record for one ship length, independent of the live `Ship`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    length: usize,
    placement: Option<Placement>,
}

impl Slot {
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn placed(&self) -> bool {
        self.placement.is_some()
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn origin(&self) -> Option<Coordinate> {
        self.placement.map(|p| p.origin)
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.placement.map(|p| p.orientation)
    }
}

/// One player's side of the ocean.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "BoardSnapshot"))]
pub struct GameBoard {
    dimension: usize,
    slots: Vec<Slot>,
    ships: BTreeMap<ShipId, Ship>,
    /// Row-major, indexed `y * dimension + x`.
    placed: Vec<Option<ShipId>>,
    shots: Vec<bool>,
    adjacency: Vec<BTreeSet<ShipId>>,
    next_id: u64,
}

impl GameBoard {
    /// Create an empty board. Slots are ordered by ascending ship length.
    pub fn new(dimension: usize, ship_lengths: &[usize]) -> Result<Self, BoardError> {
        config::validate(dimension, ship_lengths)?;
        let mut lengths = ship_lengths.to_vec();
        lengths.sort_unstable();
        let cells = dimension * dimension;
        Ok(Self {
            dimension,
            slots: lengths
                .into_iter()
                .map(|length| Slot {
                    length,
                    placement: None,
                })
                .collect(),
            ships: BTreeMap::new(),
            placed: alloc::vec![None; cells],
            shots: alloc::vec![false; cells],
            adjacency: alloc::vec![BTreeSet::new(); cells],
            next_id: 0,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Index of the first unplaced slot with the given length.
    pub fn slot_for_length(&self, length: usize) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.length == length && !s.placed())
    }

    fn in_bounds(&self, c: Coordinate) -> bool {
        c.x < self.dimension && c.y < self.dimension
    }

    fn index(&self, c: Coordinate) -> usize {
        c.y * self.dimension + c.x
    }

    /// Cells covered by a ship of `length` at `origin`.
    fn span(
        &self,
        length: usize,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<Vec<Coordinate>, BoardError> {
        if !self.in_bounds(origin) || !self.in_bounds(orientation.step(origin, length - 1)) {
            return Err(BoardError::ShipOutOfBounds);
        }
        Ok((0..length).map(|i| orientation.step(origin, i)).collect())
    }

    /// The 3×3 block around `c`, clamped to the board edges.
    fn neighbourhood(&self, c: Coordinate) -> impl Iterator<Item = Coordinate> {
        let last = self.dimension - 1;
        let xs = c.x.saturating_sub(1)..=(c.x + 1).min(last);
        let ys = c.y.saturating_sub(1)..=(c.y + 1).min(last);
        ys.flat_map(move |y| xs.clone().map(move |x| Coordinate::new(x, y)))
    }

    /// Place the ship of slot `slot_index` with its first cell at `origin`.
    pub fn place_ship(
        &mut self,
        slot_index: usize,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        let slot = *self
            .slots
            .get(slot_index)
            .ok_or(BoardError::InvalidIndex(slot_index))?;
        if slot.placed() {
            return Err(BoardError::ShipAlreadyPlaced(slot_index));
        }
        let cells = self.span(slot.length, origin, orientation)?;
        if !self.fits(slot.length, origin, orientation) {
            return Err(BoardError::ShipCollides);
        }

        let id = ShipId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.ships.insert(id, Ship::new(slot.length)?);
        for &c in &cells {
            let idx = self.index(c);
            self.placed[idx] = Some(id);
            let around: Vec<usize> = self.neighbourhood(c).map(|n| self.index(n)).collect();
            for n in around {
                self.adjacency[n].insert(id);
            }
        }
        self.slots[slot_index].placement = Some(Placement {
            origin,
            orientation,
        });
        trace!(
            "placed ship {} (slot {}, length {}) at {} {:?}",
            id,
            slot_index,
            slot.length,
            origin,
            orientation
        );
        Ok(id)
    }

    /// Take the ship of slot `slot_index` off the board.
    pub fn remove_ship(&mut self, slot_index: usize) -> Result<(), BoardError> {
        let slot = *self
            .slots
            .get(slot_index)
            .ok_or(BoardError::InvalidIndex(slot_index))?;
        let placement = slot
            .placement
            .ok_or(BoardError::ShipNotPlaced(slot_index))?;
        let cells = self.span(slot.length, placement.origin, placement.orientation)?;
        for c in cells {
            let idx = self.index(c);
            if let Some(id) = self.placed[idx].take() {
                let around: Vec<usize> = self.neighbourhood(c).map(|n| self.index(n)).collect();
                for n in around {
                    self.adjacency[n].remove(&id);
                }
                self.ships.remove(&id);
            }
        }
        self.slots[slot_index].placement = None;
        trace!("removed ship of slot {}", slot_index);
        Ok(())
    }

    /// Whether a ship of `length` at `origin` stays on the board and clear of
    /// every placed ship.
    fn fits(&self, length: usize, origin: Coordinate, orientation: Orientation) -> bool {
        match self.span(length, origin, orientation) {
            Ok(cells) => cells
                .iter()
                .all(|&c| self.adjacency[self.index(c)].is_empty()),
            Err(_) => false,
        }
    }

    /// Every origin and orientation a ship of `length` could take right now.
    fn legal_placements(&self, length: usize) -> Vec<(Coordinate, Orientation)> {
        let n = self.dimension;
        (0..n)
            .flat_map(|y| (0..n).map(move |x| Coordinate::new(x, y)))
            .flat_map(|origin| {
                [Orientation::Horizontal, Orientation::Vertical]
                    .into_iter()
                    .map(move |orientation| (origin, orientation))
            })
            .filter(|&(origin, orientation)| self.fits(length, origin, orientation))
            .collect()
    }

    /// Clear the board and place every slot at random legal positions.
    ///
    /// Longer ships go first, each at a position drawn uniformly from the ones
    /// still legal. When a slot has nowhere left to go the whole layout starts
    /// over, up to `MAX_PLACEMENT_ATTEMPTS` layouts. If none completes the board
    /// is left empty and the slot that got stuck last is reported.
    pub fn place_random_ships<R: Rng>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        let mut order: Vec<usize> = (0..self.slots.len()).collect();
        order.sort_by_key(|&i| Reverse(self.slots[i].length));

        let mut stuck = 0;
        for attempt in 0..MAX_PLACEMENT_ATTEMPTS {
            self.clear_ships();
            match self.random_layout(&order, rng)? {
                None => {
                    trace!("random layout found after {} attempts", attempt + 1);
                    return Ok(());
                }
                Some(slot_index) => stuck = slot_index,
            }
        }
        warn!(
            "no random layout found after {} attempts, slot {} has no room",
            MAX_PLACEMENT_ATTEMPTS, stuck
        );
        self.clear_ships();
        Err(BoardError::UnableToPlaceShip(stuck))
    }

    /// One layout attempt over `order`. Returns the first slot left without a
    /// legal position.
    fn random_layout<R: Rng>(
        &mut self,
        order: &[usize],
        rng: &mut R,
    ) -> Result<Option<usize>, BoardError> {
        for &slot_index in order {
            let candidates = self.legal_placements(self.slots[slot_index].length);
            if candidates.is_empty() {
                return Ok(Some(slot_index));
            }
            let (origin, orientation) = candidates[rng.random_range(0..candidates.len())];
            self.place_ship(slot_index, origin, orientation)?;
        }
        Ok(None)
    }

    /// Remove every ship and reset all slots. Shot history is kept.
    pub fn clear_ships(&mut self) {
        self.ships.clear();
        self.placed.iter_mut().for_each(|c| *c = None);
        self.adjacency.iter_mut().for_each(BTreeSet::clear);
        self.slots.iter_mut().for_each(|s| s.placement = None);
    }

    pub fn clear_shots_received(&mut self) {
        self.shots.iter_mut().for_each(|s| *s = false);
    }

    /// Resolve an attack. Returns `true` if a ship was hit.
    pub fn receive_attack(&mut self, coord: Coordinate) -> Result<bool, BoardError> {
        if !self.in_bounds(coord) {
            return Err(BoardError::AttackOutOfBounds);
        }
        let idx = self.index(coord);
        if self.shots[idx] {
            return Err(BoardError::AlreadyAttacked);
        }
        self.shots[idx] = true;
        let hit = match self.placed[idx].and_then(|id| self.ships.get_mut(&id)) {
            Some(ship) => {
                ship.hit()?;
                true
            }
            None => false,
        };
        trace!("attack at {}: {}", coord, if hit { "hit" } else { "miss" });
        Ok(hit)
    }

    /// Returns `true` when every slot has a ship on the board.
    pub fn all_ships_placed(&self) -> bool {
        self.slots.iter().all(Slot::placed)
    }

    /// Returns `true` when every placed ship is sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.values().all(Ship::is_sunk)
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(&id)
    }

    pub fn ships(&self) -> impl Iterator<Item = (ShipId, &Ship)> {
        self.ships.iter().map(|(&id, ship)| (id, ship))
    }

    /// Id of the ship occupying `coord`, if any.
    pub fn ship_id_at(&self, coord: Coordinate) -> Option<ShipId> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.placed[self.index(coord)]
    }

    pub fn ship_at(&self, coord: Coordinate) -> Option<&Ship> {
        self.ship_id_at(coord).and_then(|id| self.ships.get(&id))
    }

    /// Whether `coord` has been attacked. Off-board cells never are.
    pub fn is_shot(&self, coord: Coordinate) -> bool {
        self.in_bounds(coord) && self.shots[self.index(coord)]
    }

    /// Ids of the ships occupying or touching `coord`.
    pub fn adjacent_ships(&self, coord: Coordinate) -> Option<&BTreeSet<ShipId>> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(&self.adjacency[self.index(coord)])
    }

    /// Snapshot of the ship grid as rows (`grid[y][x]`).
    pub fn ship_grid(&self) -> Vec<Vec<Option<ShipId>>> {
        self.placed
            .chunks(self.dimension)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Snapshot of the shot grid as rows (`grid[y][x]`).
    pub fn shot_grid(&self) -> Vec<Vec<bool>> {
        self.shots
            .chunks(self.dimension)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Snapshot of the adjacency index as rows (`grid[y][x]`).
    pub fn adjacency_grid(&self) -> Vec<Vec<BTreeSet<ShipId>>> {
        self.adjacency
            .chunks(self.dimension)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Cells that have not been attacked yet, row by row.
    pub fn unshot_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let dimension = self.dimension;
        self.shots
            .iter()
            .enumerate()
            .filter(|(_, shot)| !**shot)
            .map(move |(i, _)| Coordinate::new(i % dimension, i / dimension))
    }
}

/// What a serialized board is rebuilt from. The derived grids are recomputed
/// by replaying placements and shots.
#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct BoardSnapshot {
    dimension: usize,
    slots: Vec<Slot>,
    shots: Vec<bool>,
}

#[cfg(feature = "std")]
impl TryFrom<BoardSnapshot> for GameBoard {
    type Error = BoardError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self, BoardError> {
        let lengths: Vec<usize> = snapshot.slots.iter().map(Slot::length).collect();
        let mut board = GameBoard::new(snapshot.dimension, &lengths)?;
        if !board.slots.iter().map(Slot::length).eq(lengths.iter().copied())
            || snapshot.shots.len() != board.shots.len()
        {
            return Err(BoardError::InvalidSnapshot);
        }
        for (slot_index, slot) in snapshot.slots.iter().enumerate() {
            if let Some(p) = slot.placement {
                board.place_ship(slot_index, p.origin, p.orientation)?;
            }
        }
        let dimension = board.dimension;
        for (i, _) in snapshot.shots.iter().enumerate().filter(|(_, shot)| **shot) {
            board.receive_attack(Coordinate::new(i % dimension, i / dimension))?;
        }
        Ok(board)
    }
}
