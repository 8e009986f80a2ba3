//! Integration tests for the move engine
//!
//! Group properties over scrambled states plus the classic regression fixtures

use cubewalk::core::{apply, apply_sequence, oracle_request};
use cubewalk::types::{parse_moves, Face, FaceletState, Label, Modifier, Move};
use cubewalk::CENTER_INDEX;
use pretty_assertions::assert_eq;

fn every_move() -> Vec<Move> {
    Face::ALL
        .into_iter()
        .flat_map(|face| {
            [Modifier::Clockwise, Modifier::CounterClockwise, Modifier::Half]
                .into_iter()
                .map(move |m| Move::new(face, m))
        })
        .collect()
}

fn scrambled() -> FaceletState {
    let scramble = parse_moves("D2 R' D' F2 U B' L2 U' R2 B R' F U2 L").unwrap();
    apply_sequence(&FaceletState::solved(), &scramble)
}

/// Inverse sequence: reversed, each move inverted
fn inverse(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(Move::inverse).collect()
}

#[test]
fn test_move_and_inverse_on_scrambled_state() {
    let start = scrambled();
    for mv in every_move() {
        assert_eq!(apply(&apply(&start, mv), mv.inverse()), start, "{}", mv);
    }
}

#[test]
fn test_order_four_on_scrambled_state() {
    let start = scrambled();
    for face in Face::ALL {
        let mv = Move::clockwise(face);
        let end = (0..4).fold(start, |s, _| apply(&s, mv));
        assert_eq!(end, start, "{} x4", face);
    }
}

#[test]
fn test_centers_invariant_through_long_sequence() {
    let mut state = FaceletState::solved();
    for mv in every_move().iter().cycle().take(200) {
        state = apply(&state, *mv);
        for face in Face::ALL {
            assert_eq!(state.face(face)[CENTER_INDEX], Label::of(face));
        }
    }
}

#[test]
fn test_label_counts_preserved() {
    let state = scrambled();
    for face in Face::ALL {
        let count = state.labels().filter(|l| *l == Label::of(face)).count();
        assert_eq!(count, 9, "label {}", face);
    }
}

#[test]
fn test_scramble_then_inverse_solves() {
    let scramble = parse_moves("R U2 B' L F2 D' B2 R' U").unwrap();
    let state = apply_sequence(&FaceletState::solved(), &scramble);
    assert!(!state.is_solved());
    assert_eq!(apply_sequence(&state, &inverse(&scramble)), FaceletState::solved());
}

#[test]
fn test_sexy_move_six_times_is_identity() {
    let sexy = parse_moves("R U R' U'").unwrap();
    let four = (0..4).fold(FaceletState::solved(), |s, _| apply_sequence(&s, &sexy));
    assert!(!four.is_solved(), "R U R' U' has order 6, not 4");

    let six = (0..6).fold(FaceletState::solved(), |s, _| apply_sequence(&s, &sexy));
    assert_eq!(six, FaceletState::solved());
}

#[test]
fn test_back_turn_equals_reoriented_front_turn() {
    let start = scrambled();
    for modifier in [Modifier::Clockwise, Modifier::CounterClockwise, Modifier::Half] {
        let direct = apply(&start, Move::new(Face::B, modifier));
        let via_front = apply(&start.reoriented(), Move::new(Face::F, modifier)).reoriented();
        assert_eq!(direct, via_front);
    }
}

#[test]
fn test_solved_oracle_string() {
    let request = oracle_request(&FaceletState::solved()).unwrap();
    let expected: String = Face::ORACLE_ORDER
        .into_iter()
        .map(|f| f.letter().to_string().repeat(9))
        .collect();
    assert_eq!(request, expected);
    assert_eq!(&request[..9], "UUUUUUUUU");
    assert_eq!(&request[9..18], "RRRRRRRRR");
}

#[test]
fn test_scrambled_oracle_string_has_nine_of_each() {
    let request = oracle_request(&scrambled()).unwrap();
    assert_eq!(request.len(), 54);
    for c in "URFDLB".chars() {
        assert_eq!(request.chars().filter(|x| *x == c).count(), 9);
    }
}
