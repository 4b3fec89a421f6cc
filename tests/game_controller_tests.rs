use naval_combat::{
    BoardError, Coordinate, EventBus, GameConfig, GameController, GameError, Orientation, Phase,
    PlayerError, Seat,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const H: Orientation = Orientation::Horizontal;

fn controller(dimension: usize, lengths: &[usize]) -> GameController {
    let config = GameConfig::new(dimension, lengths).unwrap();
    GameController::with_rng(EventBus::new(), config, SmallRng::seed_from_u64(11))
}

fn at(x: usize, y: usize) -> Coordinate {
    Coordinate::new(x, y)
}

/// Two humans, one length-2 ship each at the top-left corner, game started.
fn started_duel() -> GameController {
    let mut game = controller(10, &[2]);
    game.create_players("A", false, "B", false).unwrap();
    game.place_ship(0, 2, at(0, 0), H).unwrap();
    game.place_ship(1, 2, at(0, 0), H).unwrap();
    game.start_game().unwrap();
    game
}

#[test]
fn test_initial_state() {
    let game = controller(10, &[2]);
    assert_eq!(game.phase(), Phase::GameSetup);
    assert!(game.players().is_none());
    assert_eq!(game.active_player(), None);
    assert_eq!(game.winner(), None);
    assert_eq!(game.player(0).unwrap_err(), GameError::NoPlayers);
}

#[test]
fn test_default_config() {
    let game = GameController::new(EventBus::new());
    assert_eq!(game.config().dimension(), 10);
    assert_eq!(game.config().ship_lengths(), &[2, 2, 3, 4, 5]);
}

#[test]
fn test_operations_check_phase() {
    let mut game = controller(10, &[2]);
    assert_eq!(
        game.place_ship(0, 2, at(0, 0), H).unwrap_err(),
        GameError::WrongPhase { expected: Phase::PlacingShips, actual: Phase::GameSetup }
    );
    assert_eq!(
        game.start_game().unwrap_err(),
        GameError::WrongPhase { expected: Phase::PlacingShips, actual: Phase::GameSetup }
    );
    assert_eq!(
        game.prime_shot().unwrap_err(),
        GameError::WrongPhase { expected: Phase::ShotReceived, actual: Phase::GameSetup }
    );
    assert_eq!(
        game.make_shot(None).unwrap_err(),
        GameError::WrongPhase { expected: Phase::ShotPrimed, actual: Phase::GameSetup }
    );
    assert!(game
        .clear_ships(0)
        .unwrap_err()
        .to_string()
        .starts_with("Not in placing ships state"));
    assert!(!game.placing_player2());
}

#[test]
fn test_create_players() {
    let mut game = controller(10, &[2]);
    game.create_players("Alice", false, "Computer", true).unwrap();
    assert_eq!(game.phase(), Phase::PlacingShips);
    assert_eq!(game.active_player(), Some(Seat::First));
    assert_eq!(game.winner(), None);

    let players = game.players().unwrap();
    assert_eq!(players.first().name(), "Alice");
    assert!(!players.first().is_ai());
    assert_eq!(players.first().opponent(), Some(Seat::Second));
    assert_eq!(players.second().name(), "Computer");
    assert!(players.second().is_ai());
    assert_eq!(players.second().opponent(), Some(Seat::First));
}

#[test]
fn test_invalid_player_index() {
    let mut game = controller(10, &[2]);
    game.create_players("A", false, "B", false).unwrap();
    assert_eq!(
        game.place_ship(2, 2, at(0, 0), H).unwrap_err(),
        GameError::InvalidPlayerIndex(2)
    );
    assert_eq!(game.place_random_ships(5).unwrap_err(), GameError::InvalidPlayerIndex(5));
    assert_eq!(game.player(2).unwrap_err(), GameError::InvalidPlayerIndex(2));
}

#[test]
fn test_placement_errors_bubble_up() {
    let mut game = controller(10, &[2]);
    game.create_players("A", false, "B", false).unwrap();
    assert_eq!(
        game.place_ship(0, 2, at(9, 0), H).unwrap_err(),
        GameError::Board(BoardError::ShipOutOfBounds)
    );
    game.place_ship(0, 2, at(0, 0), H).unwrap();
    assert_eq!(
        game.place_ship(0, 2, at(5, 5), H).unwrap_err(),
        GameError::Board(BoardError::NoShipOfLength(2))
    );
    game.remove_ship(0, 0).unwrap();
    game.place_ship(0, 2, at(5, 5), H).unwrap();
    game.clear_ships(0).unwrap();
    assert!(!game.player(0).unwrap().all_ships_placed());
}

#[test]
fn test_start_requires_complete_fleets() {
    let mut game = controller(10, &[2]);
    game.create_players("A", false, "B", false).unwrap();
    assert_eq!(game.start_game().unwrap_err(), GameError::FleetIncomplete(Seat::First));
    game.place_ship(0, 2, at(0, 0), H).unwrap();
    assert_eq!(game.start_game().unwrap_err(), GameError::FleetIncomplete(Seat::Second));
    assert_eq!(game.phase(), Phase::PlacingShips);
}

#[test]
fn test_start_checks_human_fleet_before_placing_ai_fleet() {
    let mut game = controller(10, &[2]);
    game.create_players("A", false, "Computer", true).unwrap();
    assert_eq!(game.start_game().unwrap_err(), GameError::FleetIncomplete(Seat::First));
    let computer = game.player(1).unwrap();
    assert!(!computer.all_ships_placed());
    assert_eq!(computer.board().ships().count(), 0);
}

#[test]
fn test_ai_game_starts_with_tight_fleet() {
    for seed in 0..200 {
        let config = GameConfig::new(5, &[1, 2, 3]).unwrap();
        let mut game =
            GameController::with_rng(EventBus::new(), config, SmallRng::seed_from_u64(seed));
        game.create_players("Computer 1", true, "Computer 2", true).unwrap();
        game.place_random_ships(0).unwrap();
        assert_eq!(game.start_game(), Ok(()), "seed {}", seed);
    }
}

#[test]
fn test_start_places_ai_fleet() {
    let mut game = controller(10, &[2, 3]);
    game.create_players("A", false, "Computer", true).unwrap();
    game.place_random_ships(0).unwrap();
    game.start_game().unwrap();
    assert_eq!(game.phase(), Phase::ShotReceived);
    assert_eq!(game.active_player(), Some(Seat::First));
    assert!(game.player(1).unwrap().all_ships_placed());
}

#[test]
fn test_placing_player2() {
    let mut game = controller(10, &[2]);
    game.create_players("A", false, "B", false).unwrap();
    assert!(game.placing_player2());
    assert_eq!(game.active_player(), Some(Seat::Second));

    game.create_players("A", false, "Computer", true).unwrap();
    assert!(!game.placing_player2());
    assert_eq!(game.active_player(), Some(Seat::First));
}

#[test]
fn test_scenario_hit_twice_and_win() {
    let mut game = started_duel();
    assert_eq!(game.phase(), Phase::ShotReceived);
    assert_eq!(game.active_player(), Some(Seat::First));

    game.prime_shot().unwrap();
    assert_eq!(game.phase(), Phase::ShotPrimed);
    assert_eq!(game.make_shot(Some(at(0, 0))), Ok(false));
    assert_eq!(game.phase(), Phase::ShotReceived);
    assert_eq!(game.active_player(), Some(Seat::First));
    assert_eq!(game.winner(), None);

    game.prime_shot().unwrap();
    assert_eq!(game.make_shot(Some(at(1, 0))), Ok(true));
    assert_eq!(game.winner(), Some(Seat::First));
    assert_eq!(game.active_player(), None);
    assert!(game.player(1).unwrap().all_sunk());
    assert_eq!(game.phase(), Phase::GameSetup);
}

#[test]
fn test_miss_passes_turn() {
    let mut game = started_duel();
    game.prime_shot().unwrap();
    assert_eq!(game.make_shot(Some(at(9, 9))), Ok(false));
    assert_eq!(game.active_player(), Some(Seat::Second));

    game.prime_shot().unwrap();
    assert_eq!(game.make_shot(Some(at(9, 9))), Ok(false));
    assert_eq!(game.active_player(), Some(Seat::First));
    assert!(game.player(0).unwrap().board().is_shot(at(9, 9)));
}

#[test]
fn test_repeated_shot_fails() {
    let mut game = started_duel();
    game.prime_shot().unwrap();
    game.make_shot(Some(at(0, 0))).unwrap();
    game.prime_shot().unwrap();
    assert_eq!(
        game.make_shot(Some(at(0, 0))).unwrap_err(),
        GameError::Player(PlayerError::Board(BoardError::AlreadyAttacked))
    );
    assert_eq!(game.phase(), Phase::ShotReceived);
    assert_eq!(game.active_player(), Some(Seat::First));
}

#[test]
fn test_no_shots_after_game_over() {
    let mut game = started_duel();
    for x in 0..2 {
        game.prime_shot().unwrap();
        game.make_shot(Some(at(x, 0))).unwrap();
    }
    assert_eq!(
        game.prime_shot().unwrap_err(),
        GameError::WrongPhase { expected: Phase::ShotReceived, actual: Phase::GameSetup }
    );
}

#[test]
fn test_restart_game() {
    let mut game = controller(10, &[2]);
    assert_eq!(game.restart_game().unwrap_err(), GameError::NoPlayers);

    let mut game2 = started_duel();
    for x in 0..2 {
        game2.prime_shot().unwrap();
        game2.make_shot(Some(at(x, 0))).unwrap();
    }
    game2.restart_game().unwrap();
    assert_eq!(game2.phase(), Phase::PlacingShips);
    assert_eq!(game2.winner(), None);
    assert_eq!(game2.active_player(), Some(Seat::First));
    let players = game2.players().unwrap();
    assert_eq!((players.first().name(), players.second().name()), ("A", "B"));
    assert!(!players.second().all_ships_placed());
    assert!(!players.second().board().is_shot(at(0, 0)));

    game.create_players("X", true, "Y", true).unwrap();
    game.restart_game().unwrap();
    assert!(game.player(0).unwrap().is_ai());
}

#[test]
fn test_ai_game_runs_to_completion() {
    let mut game = controller(6, &[1, 2, 3]);
    game.create_players("Computer 1", true, "Computer 2", true).unwrap();
    game.place_random_ships(0).unwrap();
    game.start_game().unwrap();

    let mut shots = 0;
    loop {
        game.prime_shot().unwrap();
        shots += 1;
        if game.make_shot(None).unwrap() {
            break;
        }
        assert!(shots < 2 * 36, "game took too many shots");
    }
    let winner = game.winner().unwrap();
    assert!(game.player(winner.opponent().index()).unwrap().all_sunk());
    assert!(!game.player(winner.index()).unwrap().all_sunk());
}
