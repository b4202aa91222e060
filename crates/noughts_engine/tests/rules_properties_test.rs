//! Properties of the rule engine over every reachable board.

use noughts_engine::{
    Board, Mark, Match, MoveError, Status, apply_move, available_moves, create_empty, evaluate,
    next_mark, winning_line,
};

/// Visits every board reachable by alternating legal play from empty,
/// with X moving first and play stopping at terminal boards.
fn visit_reachable(board: Board, to_move: Mark, visit: &mut dyn FnMut(&Board, Status)) {
    let status = evaluate(&board);
    visit(&board, status);
    if status.is_terminal() {
        return;
    }
    for index in available_moves(&board) {
        let next = apply_move(&board, index, to_move).expect("available move is legal");
        visit_reachable(next, to_move.opponent(), visit);
    }
}

#[test]
fn test_reachable_boards_keep_count_invariant() {
    let mut visited = 0usize;
    visit_reachable(create_empty(), Mark::X, &mut |board, _| {
        visited += 1;
        assert!(next_mark(board, Mark::X).is_ok(), "unreachable: {board}");
    });
    // Number of nodes in the tic-tac-toe game tree.
    assert_eq!(visited, 549_946);
}

#[test]
fn test_status_is_consistent_with_board() {
    visit_reachable(create_empty(), Mark::X, &mut |board, status| match status {
        Status::Win(mark) => {
            let (line_mark, _) = winning_line(board).expect("win has a line");
            assert_eq!(line_mark, mark);
        }
        Status::Draw => {
            assert!(winning_line(board).is_none());
            assert!(available_moves(board).is_empty());
        }
        Status::Ongoing => {
            assert!(winning_line(board).is_none());
            assert!(!available_moves(board).is_empty());
        }
    });
}

#[test]
fn test_win_is_monotonic() {
    // A won board stays won whatever marks are added to its empty cells.
    let won: Board = "XXXOO----".parse().expect("valid board");
    let mut boards = vec![won];
    while let Some(board) = boards.pop() {
        assert_eq!(evaluate(&board), Status::Win(Mark::X));
        for index in available_moves(&board) {
            for mark in [Mark::X, Mark::O] {
                boards.push(apply_move(&board, index, mark).expect("legal"));
            }
        }
    }
}

#[test]
fn test_occupied_cell_never_accepted_twice() {
    let mut board = create_empty();
    for index in 0..9 {
        let mark = if index % 2 == 0 { Mark::X } else { Mark::O };
        board = apply_move(&board, index, mark).expect("first placement");
        for retry in [Mark::X, Mark::O] {
            assert!(matches!(
                apply_move(&board, index, retry),
                Err(MoveError::IllegalMove { .. })
            ));
        }
    }
}

#[test]
fn test_full_board_draw() {
    let board: Board = "XOXOXOOXO".parse().expect("valid board");
    assert_eq!(evaluate(&board), Status::Draw);
}

#[test]
fn test_match_reports_draw() {
    let mut game = Match::new(Mark::X);
    let moves = [0, 1, 2, 4, 3, 5, 7, 6, 8];
    let mut status = Status::Ongoing;
    for (turn, index) in moves.into_iter().enumerate() {
        let mark = if turn % 2 == 0 { Mark::X } else { Mark::O };
        status = game.play(index, mark).expect("legal move");
    }
    assert_eq!(status, Status::Draw);
    assert_eq!(game.board().encode(), "XOXXOOOXX");
}
