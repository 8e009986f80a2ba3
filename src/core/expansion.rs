//! Move Expansion: oracle moves → steps a person can perform
//!
//! The back face is never visible in the scanning orientation, so a back
//! move becomes REORIENT, the same turn on the (now front) face, REORIENT.
//! Half turns are made as two separate quarter turns.

use crate::types::{parse_moves, Face, Modifier, Move, Result, Step};

/// Expand a single logical move into its physical steps
pub fn expand_move(mv: Move) -> Vec<Step> {
    if mv.face.is_reachable() {
        return match mv.modifier {
            Modifier::Half => {
                let quarter = Step::Turn(Move::clockwise(mv.face));
                vec![quarter, quarter]
            }
            _ => vec![Step::Turn(mv)],
        };
    }

    let front = Face::F;
    let mut steps = vec![Step::Reorient];
    match mv.modifier {
        Modifier::Half => {
            steps.push(Step::Turn(Move::clockwise(front)));
            steps.push(Step::Turn(Move::clockwise(front)));
        }
        modifier => steps.push(Step::Turn(Move::new(front, modifier))),
    }
    steps.push(Step::Reorient);
    steps
}

/// Expand a whole move sequence, preserving order
pub fn expand(moves: &[Move]) -> Vec<Step> {
    moves.iter().flat_map(|mv| expand_move(*mv)).collect()
}

/// Parse oracle notation and expand it
pub fn expand_str(solution: &str) -> Result<Vec<Step>> {
    Ok(expand(&parse_moves(solution)?))
}

/// Presses needed to complete every move in the sequence
pub fn total_presses(moves: &[Move]) -> usize {
    moves.iter().map(Move::required_presses).sum()
}
