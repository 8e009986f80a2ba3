//! Move Engine: applies face turns to a facelet state
//!
//! Every turn is built from one primitive, repeated per quarter turn:
//! - rotate the turned face's stickers 90° clockwise
//! - cycle the bordering sticker triplets of the four adjacent faces
//!
//! Sticker layout (each face viewed from outside):
//!
//! ```text
//!           U0 U1 U2
//!           U3 U4 U5
//!           U6 U7 U8
//! L0 L1 L2  F0 F1 F2  R0 R1 R2  B0 B1 B2
//! L3 L4 L5  F3 F4 F5  R3 R4 R5  B3 B4 B5
//! L6 L7 L8  F6 F7 F8  R6 R7 R8  B6 B7 B8
//!           D0 D1 D2
//!           D3 D4 D5
//!           D6 D7 D8
//! ```

use crate::types::{FaceletState, Face, Move, Result};
use crate::CLOCKWISE_PERMUTATION;

/// Sticker triplet on one adjacent face, in matching order across the cycle
type Triplet = [usize; 3];

/// Adjacent faces of a turned face, in the order their triplets flow
/// during a clockwise quarter turn: face\[0\] → face\[1\] → face\[2\] → face\[3\] → face\[0\].
#[derive(Debug, Clone, Copy)]
struct EdgeCycle {
    faces: [Face; 4],
    indices: [Triplet; 4],
}

const TOP_ROW: Triplet = [0, 1, 2];
const BOTTOM_ROW: Triplet = [6, 7, 8];
const LEFT_COLUMN: Triplet = [0, 3, 6];
const RIGHT_COLUMN_UP: Triplet = [8, 5, 2];
const TOP_ROW_REVERSED: Triplet = [2, 1, 0];

/// Edge cycle for a clockwise turn of `face`
fn edge_cycle(face: Face) -> EdgeCycle {
    match face {
        Face::U => EdgeCycle {
            faces: [Face::B, Face::R, Face::F, Face::L],
            indices: [TOP_ROW; 4],
        },
        Face::D => EdgeCycle {
            faces: [Face::F, Face::R, Face::B, Face::L],
            indices: [BOTTOM_ROW; 4],
        },
        Face::F => EdgeCycle {
            faces: [Face::U, Face::R, Face::D, Face::L],
            indices: [BOTTOM_ROW, LEFT_COLUMN, TOP_ROW_REVERSED, RIGHT_COLUMN_UP],
        },
        Face::B => EdgeCycle {
            faces: [Face::U, Face::L, Face::D, Face::R],
            indices: [TOP_ROW_REVERSED, LEFT_COLUMN, BOTTOM_ROW, RIGHT_COLUMN_UP],
        },
        Face::L => EdgeCycle {
            faces: [Face::U, Face::F, Face::D, Face::B],
            indices: [LEFT_COLUMN, LEFT_COLUMN, LEFT_COLUMN, RIGHT_COLUMN_UP],
        },
        Face::R => EdgeCycle {
            faces: [Face::U, Face::B, Face::D, Face::F],
            indices: [RIGHT_COLUMN_UP, LEFT_COLUMN, RIGHT_COLUMN_UP, RIGHT_COLUMN_UP],
        },
    }
}

/// Rotate one face 90° clockwise in place
fn rotate_face(state: &mut FaceletState, face: Face) {
    let old = *state.face(face);
    let stickers = state.face_mut(face);
    for (i, &from) in CLOCKWISE_PERMUTATION.iter().enumerate() {
        stickers[i] = old[from];
    }
}

/// Shift the four triplets one place along the cycle
fn cycle_edges(state: &mut FaceletState, cycle: &EdgeCycle) {
    let last = cycle.faces[3];
    let saved = cycle.indices[3].map(|i| state.face(last)[i]);

    for k in (1..4).rev() {
        let (to, from) = (cycle.faces[k], cycle.faces[k - 1]);
        for j in 0..3 {
            let label = state.face(from)[cycle.indices[k - 1][j]];
            state.face_mut(to)[cycle.indices[k][j]] = label;
        }
    }

    let first = state.face_mut(cycle.faces[0]);
    for j in 0..3 {
        first[cycle.indices[0][j]] = saved[j];
    }
}

/// Apply one move, returning the new state. The input is left untouched.
pub fn apply(state: &FaceletState, mv: Move) -> FaceletState {
    let mut next = *state;
    let cycle = edge_cycle(mv.face);
    for _ in 0..mv.quarter_turns() {
        rotate_face(&mut next, mv.face);
        cycle_edges(&mut next, &cycle);
    }
    next
}

/// Apply moves left to right
pub fn apply_sequence(state: &FaceletState, moves: &[Move]) -> FaceletState {
    moves.iter().fold(*state, |acc, mv| apply(&acc, *mv))
}

/// Parse and apply a single notation token such as `"R'"`
pub fn apply_token(state: &FaceletState, token: &str) -> Result<FaceletState> {
    let mv: Move = token.parse()?;
    Ok(apply(state, mv))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{parse_moves, CubeError, Label, Modifier};
    use crate::CENTER_INDEX;
    use pretty_assertions::assert_eq;

    /// Every sticker distinct, so any misplaced triplet shows up
    fn numbered_state() -> FaceletState {
        let glyphs: Vec<char> = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ01".chars().collect();
        FaceletState::from_fn(|face| {
            let base = face.index() * 9;
            std::array::from_fn(|i| Label(glyphs[base + i]))
        })
    }

    fn all_moves() -> Vec<Move> {
        let mut moves = Vec::new();
        for face in Face::ALL {
            for modifier in [Modifier::Clockwise, Modifier::CounterClockwise, Modifier::Half] {
                moves.push(Move::new(face, modifier));
            }
        }
        moves
    }

    fn sorted_labels(state: &FaceletState) -> Vec<Label> {
        let mut labels: Vec<Label> = state.labels().collect();
        labels.sort();
        labels
    }

    #[test]
    fn test_input_not_mutated() {
        let state = numbered_state();
        let before = state;
        let _ = apply(&state, Move::clockwise(Face::R));
        assert_eq!(state, before);
    }

    #[test]
    fn test_move_then_inverse_restores() {
        let start = numbered_state();
        for mv in all_moves() {
            let there = apply(&start, mv);
            assert_ne!(there, start, "{} should change the state", mv);
            assert_eq!(apply(&there, mv.inverse()), start, "{} then {}", mv, mv.inverse());
        }
    }

    #[test]
    fn test_half_turn_twice_restores() {
        let start = numbered_state();
        for face in Face::ALL {
            let mv = Move::half(face);
            assert_eq!(apply(&apply(&start, mv), mv), start);
        }
    }

    #[test]
    fn test_quarter_turn_has_order_four() {
        let start = numbered_state();
        for face in Face::ALL {
            let mv = Move::clockwise(face);
            let mut state = start;
            for n in 1..=4 {
                state = apply(&state, mv);
                if n < 4 {
                    assert_ne!(state, start);
                }
            }
            assert_eq!(state, start, "{}4", face);
        }
    }

    #[test]
    fn test_centers_never_move() {
        let start = numbered_state();
        for mv in all_moves() {
            let next = apply(&start, mv);
            for face in Face::ALL {
                assert_eq!(next.face(face)[CENTER_INDEX], start.face(face)[CENTER_INDEX]);
            }
        }
    }

    #[test]
    fn test_labels_are_permuted_not_rewritten() {
        let start = numbered_state();
        let expected = sorted_labels(&start);
        let mut state = start;
        for mv in all_moves() {
            state = apply(&state, mv);
            assert_eq!(sorted_labels(&state), expected);
        }
    }

    #[test]
    fn test_counter_clockwise_is_three_clockwise() {
        let start = numbered_state();
        for face in Face::ALL {
            let cw = Move::clockwise(face);
            let three = apply(&apply(&apply(&start, cw), cw), cw);
            assert_eq!(apply(&start, Move::counter_clockwise(face)), three);
        }
    }

    #[test]
    fn test_u_turn_moves_front_row_to_left() {
        let state = apply(&FaceletState::solved(), Move::clockwise(Face::U));
        assert_eq!(state.face_string(Face::L), "FFFLLLLLL");
        assert_eq!(state.face_string(Face::F), "RRRFFFFFF");
        assert_eq!(state.face_string(Face::R), "BBBRRRRRR");
        assert_eq!(state.face_string(Face::B), "LLLBBBBBB");
        assert_eq!(state.face_string(Face::U), "UUUUUUUUU");
    }

    #[test]
    fn test_r_turn_moves_front_column_up() {
        let state = apply(&FaceletState::solved(), Move::clockwise(Face::R));
        assert_eq!(state.face_string(Face::U), "UUFUUFUUF");
        assert_eq!(state.face_string(Face::B), "UBBUBBUBB");
        assert_eq!(state.face_string(Face::D), "DDBDDBDDB");
        assert_eq!(state.face_string(Face::F), "FFDFFDFFD");
    }

    #[test]
    fn test_f_turn_corner_tracking() {
        let start = numbered_state();
        let next = apply(&start, Move::clockwise(Face::F));
        // U6 → R0, R0 → D2, D2 → L8, L8 → U6
        assert_eq!(next.face(Face::R)[0], start.face(Face::U)[6]);
        assert_eq!(next.face(Face::D)[2], start.face(Face::R)[0]);
        assert_eq!(next.face(Face::L)[8], start.face(Face::D)[2]);
        assert_eq!(next.face(Face::U)[6], start.face(Face::L)[8]);
    }

    #[test]
    fn test_back_turn_matches_front_turn_after_reorient() {
        let start = apply_sequence(&numbered_state(), &parse_moves("R U2 L' D F2").unwrap());
        for (back, front) in [("B", "F"), ("B'", "F'"), ("B2", "F2")] {
            let direct = apply_token(&start, back).unwrap();
            let via_front = apply_token(&start.reoriented(), front).unwrap().reoriented();
            assert_eq!(direct, via_front, "{} vs REORIENT {} REORIENT", back, front);
        }
    }

    #[test]
    fn test_every_face_matches_its_opposite_under_reorient() {
        let start = numbered_state();
        for face in [Face::L, Face::R, Face::F, Face::B] {
            let direct = apply(&start, Move::clockwise(face));
            let spun = apply(&start.reoriented(), Move::clockwise(face.opposite_after_spin())).reoriented();
            assert_eq!(direct, spun, "{}", face);
        }
    }

    #[test]
    fn test_sexy_move_has_order_six() {
        let sexy = parse_moves("R U R' U'").unwrap();
        let solved = FaceletState::solved();
        let mut state = solved;
        for n in 1..=6 {
            state = apply_sequence(&state, &sexy);
            if n < 6 {
                assert!(!state.is_solved(), "solved early after {} repetitions", n);
            }
        }
        assert_eq!(state, solved);
    }

    #[test]
    fn test_invalid_token() {
        let err = apply_token(&FaceletState::solved(), "Q").unwrap_err();
        assert_eq!(err, CubeError::InvalidMove("Q".to_string()));
    }
}
