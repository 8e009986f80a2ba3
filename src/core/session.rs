//! Solve plan: everything between "six faces scanned" and the first press

use serde::Serialize;
use tracing::info;

use crate::core::expansion::expand;
use crate::core::oracle::{solve_moves, SolveOracle};
use crate::core::publisher::StatePublisher;
use crate::core::scan::{oracle_request, ScannedFaces};
use crate::core::tracker::PressTracker;
use crate::types::{format_moves, FaceletState, Move, Result, Step};

/// Result of scanning and solving, ready to be walked through
#[derive(Debug, Clone, Serialize)]
pub struct SolvePlan {
    /// State as scanned
    pub state: FaceletState,
    /// String sent to the oracle
    pub facelets: String,
    /// Logical moves from the oracle
    pub moves: Vec<Move>,
    /// Physical steps for the operator
    pub steps: Vec<Step>,
}

impl SolvePlan {
    /// Scan → state → oracle request → oracle → moves → steps.
    ///
    /// The scanned state is published once before the oracle is asked, so a
    /// viewer shows the cube even when solving fails.
    pub fn prepare(
        scan: &ScannedFaces,
        oracle: &(impl SolveOracle + ?Sized),
        publisher: &mut impl StatePublisher,
    ) -> Result<Self> {
        let state = scan.to_state()?;
        let facelets = oracle_request(&state)?;
        publisher.publish(&state);

        let moves = solve_moves(oracle, &facelets)?;
        let steps = expand(&moves);
        info!(solution = %format_moves(&moves), steps = steps.len(), "plan ready");

        Ok(Self { state, facelets, moves, steps })
    }

    /// Oracle solution in notation
    pub fn solution(&self) -> String {
        format_moves(&self.moves)
    }

    /// Hand the plan to a press tracker
    pub fn into_tracker(self) -> PressTracker {
        PressTracker::new(self.state, self.moves)
    }
}
