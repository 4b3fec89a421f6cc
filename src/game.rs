//! Game controller: drives two players through setup, placement and shooting,
//! and reports every state change on the event bus.

use alloc::string::String;
use core::fmt;
use log::debug;
use rand::rngs::SmallRng;

use crate::common::{Coordinate, GameError, Orientation};
use crate::config::GameConfig;
use crate::events::EventBus;
use crate::player::{Player, Players, Seat};
use crate::ship::ShipId;

/// Name of the only event the controller emits.
pub const GAME_STATE_CHANGE: &str = "gameStateChange";

/// Phase of the game.
///
/// `GameSetup` → `PlacingShips` → `ShotReceived` ⇄ `ShotPrimed` → `GameOver`,
/// after which the controller drops back to `GameSetup`. Creating or restarting
/// players re-enters `PlacingShips` from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    GameSetup,
    PlacingShips,
    /// A shot has been resolved; the next one is not yet accepted.
    ShotReceived,
    /// Waiting for the active player's shot.
    ShotPrimed,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::GameSetup => "game setup",
            Phase::PlacingShips => "placing ships",
            Phase::ShotReceived => "shot received",
            Phase::ShotPrimed => "shot primed",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// The shot carried by a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct ShotReport {
    pub shooting_player: Seat,
    pub ship_hit: bool,
    pub x: usize,
    pub y: usize,
}

/// Payload of [`GAME_STATE_CHANGE`]: a snapshot taken right after the change.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct GameStateChange {
    pub phase: Phase,
    pub shot: Option<ShotReport>,
    pub player1: Option<Player>,
    pub player2: Option<Player>,
    pub active_player: Option<Seat>,
    pub winner: Option<Seat>,
}

/// Top-level game state machine.
pub struct GameController {
    events: EventBus<GameStateChange>,
    config: GameConfig,
    players: Option<Players>,
    active: Option<Seat>,
    winner: Option<Seat>,
    phase: Phase,
    rng: SmallRng,
}

impl GameController {
    /// Controller for the standard 10×10 game, seeded from the thread RNG.
    #[cfg(feature = "std")]
    pub fn new(events: EventBus<GameStateChange>) -> Self {
        Self::with_config(events, GameConfig::default())
    }

    /// Controller for a custom board and fleet, seeded from the thread RNG.
    #[cfg(feature = "std")]
    pub fn with_config(events: EventBus<GameStateChange>, config: GameConfig) -> Self {
        use rand::SeedableRng;
        let mut seed_rng = rand::rng();
        Self::with_rng(events, config, SmallRng::from_rng(&mut seed_rng))
    }

    /// Controller using the given RNG for random placement and automatic shots.
    pub fn with_rng(events: EventBus<GameStateChange>, config: GameConfig, rng: SmallRng) -> Self {
        Self {
            events,
            config,
            players: None,
            active: None,
            winner: None,
            phase: Phase::GameSetup,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn players(&self) -> Option<&Players> {
        self.players.as_ref()
    }

    /// Player at `index` (0 or 1).
    pub fn player(&self, index: usize) -> Result<&Player, GameError> {
        let seat = seat_for(index)?;
        Ok(self.players.as_ref().ok_or(GameError::NoPlayers)?.get(seat))
    }

    pub fn active_player(&self) -> Option<Seat> {
        self.active
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    /// The bus notifications are emitted on; subscribe handlers here.
    pub fn events_mut(&mut self) -> &mut EventBus<GameStateChange> {
        &mut self.events
    }

    /// Replace any existing players with a fresh pair and begin ship placement.
    pub fn create_players(
        &mut self,
        name1: impl Into<String>,
        is_ai1: bool,
        name2: impl Into<String>,
        is_ai2: bool,
    ) -> Result<(), GameError> {
        let dimension = self.config.dimension();
        let lengths = self.config.ship_lengths();
        let first = Player::new(name1, is_ai1, dimension, lengths)?;
        let second = Player::new(name2, is_ai2, dimension, lengths)?;
        self.players = Some(Players::new(first, second));
        self.active = Some(Seat::First);
        self.winner = None;
        self.set_phase(Phase::PlacingShips);
        self.notify(None);
        Ok(())
    }

    /// Start over with the current players' names and AI flags.
    pub fn restart_game(&mut self) -> Result<(), GameError> {
        let players = self.players.as_ref().ok_or(GameError::NoPlayers)?;
        let (first, second) = (players.first(), players.second());
        let (name1, is_ai1) = (String::from(first.name()), first.is_ai());
        let (name2, is_ai2) = (String::from(second.name()), second.is_ai());
        self.create_players(name1, is_ai1, name2, is_ai2)
    }

    /// Place the first unplaced ship of `length` for the player at `player_index`.
    pub fn place_ship(
        &mut self,
        player_index: usize,
        length: usize,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipId, GameError> {
        let player = self.placing_player(player_index)?;
        let id = player.place_ship_of_length(length, origin, orientation)?;
        self.notify(None);
        Ok(id)
    }

    pub fn remove_ship(&mut self, player_index: usize, slot_index: usize) -> Result<(), GameError> {
        self.placing_player(player_index)?.remove_ship(slot_index)?;
        self.notify(None);
        Ok(())
    }

    pub fn place_random_ships(&mut self, player_index: usize) -> Result<(), GameError> {
        self.expect_phase(Phase::PlacingShips)?;
        let seat = seat_for(player_index)?;
        let players = self.players.as_mut().ok_or(GameError::NoPlayers)?;
        players.get_mut(seat).place_random_ships(&mut self.rng)?;
        self.notify(None);
        Ok(())
    }

    pub fn clear_ships(&mut self, player_index: usize) -> Result<(), GameError> {
        self.placing_player(player_index)?.clear_ships();
        self.notify(None);
        Ok(())
    }

    /// Hand placement over to a human second player. Returns `false` and does
    /// nothing outside ship placement or when player 2 is an AI.
    pub fn placing_player2(&mut self) -> bool {
        if self.phase != Phase::PlacingShips {
            return false;
        }
        match &self.players {
            Some(players) if !players.second().is_ai() => {}
            _ => return false,
        }
        self.active = Some(Seat::Second);
        debug!("ship placement handed to {}", Seat::Second);
        self.notify(None);
        true
    }

    /// Begin shooting. Player 1's fleet must be complete; an AI second player
    /// then gets a random fleet, and player 2's fleet must be complete too.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::PlacingShips)?;
        let players = self.players.as_mut().ok_or(GameError::NoPlayers)?;
        if !players.first().all_ships_placed() {
            return Err(GameError::FleetIncomplete(Seat::First));
        }
        let second = players.get_mut(Seat::Second);
        if second.is_ai() {
            second.place_random_ships(&mut self.rng)?;
        }
        if !second.all_ships_placed() {
            return Err(GameError::FleetIncomplete(Seat::Second));
        }
        self.active = Some(Seat::First);
        self.set_phase(Phase::ShotReceived);
        self.notify(None);
        Ok(())
    }

    /// Accept the next shot.
    pub fn prime_shot(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::ShotReceived)?;
        self.set_phase(Phase::ShotPrimed);
        self.notify(None);
        Ok(())
    }

    /// Fire the active player's shot: at `target`, or at a random open cell
    /// when `target` is `None`.
    ///
    /// A miss passes the turn; a hit keeps it. Sinking the opponent's last ship
    /// emits a second, game-over notification before the controller returns to
    /// `GameSetup`. Returns whether the game ended.
    pub fn make_shot(&mut self, target: Option<Coordinate>) -> Result<bool, GameError> {
        self.expect_phase(Phase::ShotPrimed)?;
        let shooter = self.active.ok_or(GameError::NoPlayers)?;
        self.set_phase(Phase::ShotReceived);

        let players = self.players.as_mut().ok_or(GameError::NoPlayers)?;
        let shot = match target {
            Some(coord) => players.shoot(shooter, coord)?,
            None => players.shoot_auto(shooter, &mut self.rng)?,
        };
        let attacked = players.get(shooter).opponent().unwrap_or(shooter.opponent());
        let defeated = players.get(attacked).all_sunk();

        if !shot.hit {
            self.active = Some(shooter.opponent());
        }
        let report = ShotReport {
            shooting_player: shooter,
            ship_hit: shot.hit,
            x: shot.coord.x,
            y: shot.coord.y,
        };
        debug!(
            "{} fired at {}: {}",
            shooter,
            shot.coord,
            if shot.hit { "hit" } else { "miss" }
        );
        self.notify(Some(report));

        if defeated {
            self.winner = Some(shooter);
            self.active = None;
            self.set_phase(Phase::GameOver);
            self.notify(Some(report));
            self.set_phase(Phase::GameSetup);
            return Ok(true);
        }
        Ok(false)
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    /// Player at `player_index`, provided ships are being placed.
    fn placing_player(&mut self, player_index: usize) -> Result<&mut Player, GameError> {
        self.expect_phase(Phase::PlacingShips)?;
        let seat = seat_for(player_index)?;
        let players = self.players.as_mut().ok_or(GameError::NoPlayers)?;
        Ok(players.get_mut(seat))
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!("phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    fn notify(&mut self, shot: Option<ShotReport>) {
        let payload = GameStateChange {
            phase: self.phase,
            shot,
            player1: self.players.as_ref().map(|p| p.first().clone()),
            player2: self.players.as_ref().map(|p| p.second().clone()),
            active_player: self.active,
            winner: self.winner,
        };
        let delivered = self.events.emit(GAME_STATE_CHANGE, &payload);
        debug!("{} ({}) delivered to {} handlers", GAME_STATE_CHANGE, self.phase, delivered);
    }
}

fn seat_for(index: usize) -> Result<Seat, GameError> {
    Seat::from_index(index).ok_or(GameError::InvalidPlayerIndex(index))
}

impl fmt::Debug for GameController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameController")
            .field("phase", &self.phase)
            .field("active", &self.active)
            .field("winner", &self.winner)
            .field("config", &self.config)
            .field("players", &self.players)
            .finish()
    }
}
