use gridlock_core::{Command, Coord, Direction, Event, GameState};
use gridlock_system_control::{Control, ControlInput};

fn moving(direction: Direction) -> ControlInput {
    ControlInput::new(Some(direction), false)
}

#[test]
fn direction_emits_move_for_selected_player() {
    let mut control = Control::default();
    let mut commands = Vec::new();

    control.handle(&[], moving(Direction::Up), 2, &mut commands);

    assert_eq!(
        commands,
        vec![Command::MakeMove {
            player: 0,
            direction: Direction::Up,
        }]
    );
}

#[test]
fn cycling_wraps_around_live_players() {
    let mut control = Control::new();
    let mut commands = Vec::new();
    let cycle = ControlInput {
        cycle_player: true,
        ..ControlInput::default()
    };

    control.handle(&[], cycle, 3, &mut commands);
    assert_eq!(control.selected(), 1);
    control.handle(&[], cycle, 3, &mut commands);
    control.handle(&[], cycle, 3, &mut commands);
    assert_eq!(control.selected(), 0);
    assert!(commands.is_empty(), "cycling alone emits nothing");
}

#[test]
fn cycle_and_move_in_one_input_moves_the_next_hero() {
    let mut control = Control::new();
    let mut commands = Vec::new();

    control.handle(
        &[],
        ControlInput::new(Some(Direction::Left), true),
        2,
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::MakeMove {
            player: 1,
            direction: Direction::Left,
        }]
    );
}

#[test]
fn escape_rewraps_dangling_selection() {
    let mut control = Control::new();
    let mut commands = Vec::new();
    let cycle = ControlInput::new(None, true);
    control.handle(&[], cycle, 2, &mut commands);
    assert_eq!(control.selected(), 1);

    control.handle(
        &[Event::PlayerEscaped {
            player: 1,
            coord: Coord::new(0, 0),
        }],
        moving(Direction::Right),
        1,
        &mut commands,
    );

    assert_eq!(control.selected(), 0);
    assert_eq!(
        commands,
        vec![Command::MakeMove {
            player: 0,
            direction: Direction::Right,
        }]
    );
}

#[test]
fn terminal_state_disables_commands() {
    let mut control = Control::new();
    let mut commands = Vec::new();

    control.handle(
        &[Event::GameStateChanged {
            state: GameState::Lost,
        }],
        moving(Direction::Down),
        1,
        &mut commands,
    );

    assert!(!control.is_active());
    assert!(commands.is_empty());

    control.handle(&[], moving(Direction::Down), 1, &mut commands);
    assert!(commands.is_empty());
}

#[test]
fn no_players_means_no_commands() {
    let mut control = Control::new();
    let mut commands = Vec::new();

    control.handle(&[], moving(Direction::Down), 0, &mut commands);

    assert!(commands.is_empty());
}
