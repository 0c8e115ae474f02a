//! Tests for the tic-tac-toe engine and its player view.

use ttt_matchmaker::{Seat, SessionId, Square, Symbol, TicTacToe};

fn alice_vs_bob() -> TicTacToe {
    TicTacToe::new(
        Seat::new(SessionId::from(1), "Alice"),
        Seat::new(SessionId::from(2), "Bob"),
    )
}

fn play(game: &mut TicTacToe, moves: &[(usize, usize)]) {
    for &(row, col) in moves {
        assert!(game.mark(row, col), "move ({row}, {col}) rejected");
    }
}

#[test]
fn test_new_game_is_empty() {
    let game = alice_vs_bob();
    assert!(game.board().squares().all(|s| s == Square::Empty));
    assert_eq!(game.turn(), Symbol::X);
    assert!(game.winner().is_none());
    assert!(!game.is_over());
    assert!(!game.is_draw());
}

#[test]
fn test_moves_alternate() {
    let mut game = alice_vs_bob();

    assert!(game.mark(0, 0));
    assert_eq!(game.board().get(0, 0), Some(Square::Occupied(Symbol::X)));
    assert_eq!(game.turn(), Symbol::O);

    assert!(game.mark(1, 1));
    assert_eq!(game.board().get(1, 1), Some(Square::Occupied(Symbol::O)));
    assert_eq!(game.turn(), Symbol::X);
}

#[test]
fn test_occupied_cell_rejected_without_change() {
    let mut game = alice_vs_bob();
    assert!(game.mark(0, 0));

    let board = game.board().clone();
    assert!(!game.mark(0, 0));
    assert_eq!(game.board(), &board);
    assert_eq!(game.turn(), Symbol::O);
}

#[test]
fn test_off_board_rejected() {
    let mut game = alice_vs_bob();
    assert!(!game.mark(3, 0));
    assert!(!game.mark(0, 3));
    assert_eq!(game.turn(), Symbol::X);
}

#[test]
fn test_winner_in_a_row() {
    let mut game = alice_vs_bob();
    play(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

    assert_eq!(game.winner().map(|s| s.name().as_str()), Some("Alice"));
    assert_eq!(game.winning_symbol(), Some(Symbol::X));
    assert!(game.is_over());
    assert!(!game.is_draw());
}

#[test]
fn test_winner_in_a_column() {
    let mut game = alice_vs_bob();
    play(&mut game, &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]);
    assert_eq!(game.winner().map(|s| s.name().as_str()), Some("Alice"));
}

#[test]
fn test_winner_on_diagonals() {
    let mut game = alice_vs_bob();
    play(&mut game, &[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);
    assert_eq!(game.winner().map(|s| s.name().as_str()), Some("Alice"));

    let mut game = alice_vs_bob();
    play(&mut game, &[(0, 2), (0, 1), (1, 1), (0, 0), (2, 0)]);
    assert_eq!(game.winner().map(|s| s.name().as_str()), Some("Alice"));
}

#[test]
fn test_second_player_can_win() {
    let mut game = alice_vs_bob();
    play(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (1, 2)]);
    assert_eq!(game.winner().map(|s| *s.id()), Some(SessionId::from(2)));
}

#[test]
fn test_no_moves_after_win() {
    let mut game = alice_vs_bob();
    play(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

    let board = game.board().clone();
    let turn = game.turn();
    assert!(!game.mark(2, 2));
    assert_eq!(game.board(), &board);
    assert_eq!(game.turn(), turn);
    assert_eq!(game.winning_symbol(), Some(Symbol::X));
}

#[test]
fn test_draw() {
    let mut game = alice_vs_bob();
    play(
        &mut game,
        &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
    );

    assert!(game.is_draw());
    assert!(game.is_over());
    assert!(game.winner().is_none());
    assert!(!game.mark(0, 0));
}

#[test]
fn test_reset_keeps_seats() {
    let mut game = alice_vs_bob();
    play(&mut game, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
    assert!(game.is_over());

    game.reset();

    assert!(game.winner().is_none());
    assert!(!game.is_over());
    assert!(!game.is_draw());
    assert_eq!(game.turn(), Symbol::X);
    assert!(game.board().squares().all(|s| s == Square::Empty));
    assert_eq!(game.seat(Symbol::X).name(), "Alice");
    assert_eq!(game.seat(Symbol::O).name(), "Bob");
    assert!(game.mark(1, 1));
}

#[test]
fn test_view_for_each_seat() {
    let game = alice_vs_bob();

    let alice = game.view_for(SessionId::from(1)).expect("Alice is seated");
    assert_eq!(alice.you.name, "Alice");
    assert_eq!(alice.you.symbol, Symbol::X);
    assert_eq!(alice.opponent.name, "Bob");
    assert_eq!(alice.opponent.symbol, Symbol::O);
    assert!(alice.is_your_turn);
    assert_eq!(alice.board, vec![""; 9]);

    let bob = game.view_for(SessionId::from(2)).expect("Bob is seated");
    assert_eq!(bob.you.name, "Bob");
    assert_eq!(bob.you.symbol, Symbol::O);
    assert_eq!(bob.opponent.name, "Alice");
    assert!(!bob.is_your_turn);
}

#[test]
fn test_view_after_marking() {
    let mut game = alice_vs_bob();
    assert!(game.mark(0, 0));

    let bob = game.view_for(SessionId::from(2)).expect("Bob is seated");
    assert!(bob.is_your_turn);
    assert_eq!(bob.board, ["X", "", "", "", "", "", "", "", ""]);

    let alice = game.view_for(SessionId::from(1)).expect("Alice is seated");
    assert!(!alice.is_your_turn);
    assert_eq!(alice.board, bob.board);
}

#[test]
fn test_view_for_stranger_fails() {
    let game = alice_vs_bob();
    assert!(game.view_for(SessionId::from(99)).is_err());
}
