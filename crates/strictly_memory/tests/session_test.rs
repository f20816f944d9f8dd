//! Tests for the pick/resolve protocol of a memory session.

use strictly_memory::{
    BoardSpec, CellState, Coord, PendingPicks, PickOutcome, Session, SessionError,
};

fn aabb() -> Session {
    Session::create(2, 2, ["A", "A", "B", "B"]).unwrap()
}

fn state_at(session: &Session, row: usize, col: usize) -> CellState {
    session.cell(Coord::new(row, col)).unwrap().state()
}

#[test]
fn test_create_starts_face_down() {
    let session = Session::create(2, 3, ["a", "b", "c", "a", "b", "c"]).unwrap();
    assert_eq!((session.rows(), session.cols()), (2, 3));
    assert!(session.pending().is_empty());
    for row in 0..2 {
        for col in 0..3 {
            let cell = session.cell(Coord::new(row, col)).unwrap();
            assert!(!cell.revealed(), "({row}, {col}) should start face down");
        }
    }
    assert!(!session.is_complete());
}

#[test]
fn test_create_places_values_row_major() {
    let session = Session::create(2, 2, ["w", "x", "y", "z"]).unwrap();
    let value = session.cell(Coord::new(1, 0)).unwrap().value().clone();
    assert_eq!(value.as_str(), "y");
}

#[test]
fn test_create_rejects_wrong_value_count() {
    let result = Session::create(2, 2, ["A", "A", "B"]);
    assert_eq!(
        result.unwrap_err(),
        SessionError::ShapeMismatch {
            rows: 2,
            cols: 2,
            expected: 4,
            actual: 3
        }
    );
}

#[test]
fn test_create_rejects_zero_area() {
    let empty: [&str; 0] = [];
    let result = Session::create(0, 4, empty);
    assert!(matches!(result, Err(SessionError::ShapeMismatch { .. })));
}

#[test]
fn test_picking_pending_cell_again_fails() {
    let mut session = aabb();
    session.pick(0, 0).unwrap();
    assert_eq!(
        session.pick(0, 0),
        Err(SessionError::CellAlreadyRevealed {
            coord: Coord::new(0, 0)
        })
    );
    assert_eq!(session.pending(), PendingPicks::One(Coord::new(0, 0)));
}

#[test]
fn test_third_pick_awaits_resolve_regardless_of_position() {
    let mut session = aabb();
    session.pick(0, 0).unwrap();
    session.pick(1, 0).unwrap();

    assert_eq!(session.pick(1, 1), Err(SessionError::AwaitingResolve));
    assert_eq!(session.pick(-1, 7), Err(SessionError::AwaitingResolve));
    assert_eq!(session.pick(0, 0), Err(SessionError::AwaitingResolve));
}

#[test]
fn test_matching_pair_stays_revealed() {
    let mut session = aabb();

    let first = session.pick(0, 0).unwrap();
    assert_eq!(first.matched(), None);
    assert_eq!(first.outcome(), PickOutcome::First);

    let second = session.pick(0, 1).unwrap();
    assert_eq!(second.value().as_str(), "A");
    assert_eq!(second.matched(), Some(true));

    assert_eq!(state_at(&session, 0, 0), CellState::Matched);
    assert_eq!(state_at(&session, 0, 1), CellState::Matched);
    assert!(session.pending().is_empty());
    assert_eq!(session.resolve(), Err(SessionError::NothingToResolve));
}

#[test]
fn test_mismatch_then_resolve() {
    let mut session = aabb();
    session.pick(0, 0).unwrap();
    let second = session.pick(1, 0).unwrap();

    assert_eq!(second.value().as_str(), "B");
    assert_eq!(second.matched(), Some(false));
    assert_eq!(
        second.outcome(),
        PickOutcome::Mismatch {
            pending_hide: [Coord::new(0, 0), Coord::new(1, 0)]
        }
    );
    assert!(session.cell(Coord::new(0, 0)).unwrap().revealed());
    assert!(session.cell(Coord::new(1, 0)).unwrap().revealed());

    let resolved = session.resolve().unwrap();
    assert_eq!(resolved.hidden(), &[Coord::new(0, 0), Coord::new(1, 0)]);
    assert_eq!(state_at(&session, 0, 0), CellState::FaceDown);
    assert_eq!(state_at(&session, 1, 0), CellState::FaceDown);
    assert!(session.pending().is_empty());

    assert!(session.pick(0, 0).is_ok());
}

#[test]
fn test_resolve_twice_fails() {
    let mut session = aabb();
    session.pick(0, 0).unwrap();
    session.pick(1, 1).unwrap();
    session.resolve().unwrap();
    assert_eq!(session.resolve(), Err(SessionError::NothingToResolve));
}

#[test]
fn test_complete_only_when_all_matched() {
    let mut session = aabb();
    session.pick(0, 0).unwrap();
    session.pick(0, 1).unwrap();
    assert!(!session.is_complete());

    session.pick(1, 0).unwrap();
    assert!(!session.is_complete(), "a lone pending card is not matched");
    session.pick(1, 1).unwrap();
    assert!(session.is_complete());
    assert_eq!(session.matched_pairs(), 2);
}

#[test]
fn test_complete_false_while_mismatch_pending() {
    let mut session = Session::create(1, 4, ["A", "B", "A", "B"]).unwrap();
    session.pick(0, 0).unwrap();
    session.pick(0, 2).unwrap();
    session.pick(0, 1).unwrap();
    assert!(!session.is_complete());

    let mut almost = Session::create(1, 2, ["A", "B"]).unwrap();
    almost.pick(0, 0).unwrap();
    almost.pick(0, 1).unwrap();
    assert!(!almost.is_complete());
}

#[test]
fn test_out_of_bounds_never_mutates() {
    let mut session = aabb();
    session.pick(1, 1).unwrap();
    let before = session.clone();

    for (row, col) in [(-1, 0), (0, -1), (2, 0), (0, 2), (i64::MAX, i64::MIN)] {
        let result = session.pick(row, col);
        assert!(
            matches!(result, Err(SessionError::OutOfBounds { .. })),
            "({row}, {col}) should be out of bounds, got {result:?}"
        );
    }
    assert_eq!(session, before);
}

#[test]
fn test_equal_values_need_not_be_adjacent() {
    let mut session = Session::create(3, 1, ["cat", "dog", "cat"]).unwrap();
    session.pick(2, 0).unwrap();
    let result = session.pick(0, 0).unwrap();
    assert_eq!(
        result.outcome(),
        PickOutcome::Match {
            pair: [Coord::new(2, 0), Coord::new(0, 0)]
        }
    );
}

#[test]
fn test_board_file_game() {
    let spec: BoardSpec = "2x2\nsun\nmoon\nmoon\nsun\n".parse().unwrap();
    let mut session = spec.into_session().unwrap();

    session.pick(0, 0).unwrap();
    session.pick(1, 1).unwrap();
    session.pick(0, 1).unwrap();
    session.pick(1, 0).unwrap();

    assert!(session.is_complete());
    assert_eq!(
        session.view().look(),
        "2x2\nmatched sun\nmatched moon\nmatched moon\nmatched sun\n"
    );
}

#[test]
fn test_new_session_replaces_old() {
    let mut session = aabb();
    session.pick(0, 0).unwrap();
    session = Session::create(1, 2, ["z", "z"]).unwrap();
    assert!(session.pending().is_empty());
    assert_eq!(session.view().face_down().len(), 2);
}
