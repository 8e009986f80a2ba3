//! Press Tracker: state machine driving the physical walkthrough
//!
//! One confirmation per expanded step. The logical move is applied to the
//! tracked state (and published) on the press that completes it:
//! - plain quarter turn: 1 press
//! - half turn: 2 presses
//! - back turn: 3 presses (REORIENT, F, REORIENT), back half turn: 4

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::core::engine;
use crate::core::expansion::expand;
use crate::core::publisher::StatePublisher;
use crate::types::{CubeError, FaceletState, Move, PressOutput, ReasonCode, Result, Step, TrackerPhase};

/// Walks the operator through an expanded move sequence
#[derive(Debug, Clone)]
pub struct PressTracker {
    /// Logical moves from the oracle
    moves: Vec<Move>,
    /// Physical steps derived from `moves`
    steps: Vec<Step>,
    /// Last committed state, the authoritative picture of the physical cube
    state: FaceletState,
    /// Next step to be confirmed
    step_cursor: usize,
    /// Logical move currently being executed
    logical_index: usize,
    /// Presses still owed on `moves[logical_index]`
    presses_remaining: usize,
    /// Current phase
    phase: TrackerPhase,
}

impl PressTracker {
    /// Start tracking `moves` from `state`
    pub fn new(state: FaceletState, moves: Vec<Move>) -> Self {
        let steps = expand(&moves);
        let presses_remaining = moves.first().map(Move::required_presses).unwrap_or(0);
        let phase = if steps.is_empty() {
            TrackerPhase::Finished
        } else {
            TrackerPhase::Ready
        };
        Self {
            moves,
            steps,
            state,
            step_cursor: 0,
            logical_index: 0,
            presses_remaining,
            phase,
        }
    }

    /// Handle one "I did it" confirmation.
    ///
    /// Publishes exactly once when the press completes a logical move.
    pub fn confirm(&mut self, publisher: &mut impl StatePublisher) -> Result<PressOutput> {
        if self.phase.is_closed() {
            return Err(CubeError::TrackerClosed);
        }

        let step = self.steps[self.step_cursor];
        let mv = match self.moves.get(self.logical_index) {
            Some(mv) if self.presses_remaining > 0 => *mv,
            _ => {
                return Err(self.fault(format!(
                    "step {} has no logical move (index {} of {}, {} presses left)",
                    self.step_cursor,
                    self.logical_index,
                    self.moves.len(),
                    self.presses_remaining
                )))
            }
        };

        self.presses_remaining -= 1;
        self.step_cursor += 1;
        self.phase = TrackerPhase::Executing;
        debug!(step = %step, cursor = self.step_cursor, left = self.presses_remaining, "press");

        let mut committed = None;
        let mut reason = match step {
            Step::Reorient => ReasonCode::P001_REORIENT_CONFIRMED,
            Step::Turn(_) => ReasonCode::P001_STEP_CONFIRMED,
        };

        if self.presses_remaining == 0 {
            self.state = engine::apply(&self.state, mv);
            publisher.publish(&self.state);
            info!(mv = %mv, index = self.logical_index + 1, total = self.moves.len(), "move committed");

            committed = Some(mv);
            reason = ReasonCode::P002_MOVE_COMMITTED;
            self.logical_index += 1;
            if let Some(next) = self.moves.get(self.logical_index) {
                self.presses_remaining = next.required_presses();
            }
        }

        if self.step_cursor == self.steps.len() {
            if self.logical_index != self.moves.len() {
                return Err(self.fault(format!(
                    "steps exhausted with {} of {} moves committed",
                    self.logical_index,
                    self.moves.len()
                )));
            }
            self.phase = TrackerPhase::Finished;
            reason = ReasonCode::P003_SEQUENCE_COMPLETE;
            info!(solved = self.state.is_solved(), "sequence complete");
        }

        Ok(self.output(committed, reason))
    }

    /// Cancel the walkthrough. The last committed state is kept as is.
    pub fn abort(&mut self) -> PressOutput {
        if !self.phase.is_closed() {
            info!(cursor = self.step_cursor, total = self.steps.len(), "walkthrough aborted");
            self.phase = TrackerPhase::Aborted;
        }
        self.output(None, ReasonCode::P003_ABORTED)
    }

    /// Snapshot of progress without changing anything
    pub fn status(&self) -> PressOutput {
        let reason = match self.phase {
            TrackerPhase::Finished if self.steps.is_empty() => ReasonCode::P003_EMPTY_SEQUENCE,
            TrackerPhase::Finished => ReasonCode::P003_SEQUENCE_COMPLETE,
            TrackerPhase::Aborted => ReasonCode::P003_ABORTED,
            TrackerPhase::Ready => ReasonCode::P000_AWAITING_FIRST_PRESS,
            TrackerPhase::Executing => ReasonCode::P001_STEP_CONFIRMED,
        };
        self.output(None, reason)
    }

    fn fault(&mut self, detail: String) -> CubeError {
        warn!(%detail, "press accounting out of step with expansion");
        self.phase = TrackerPhase::Aborted;
        CubeError::SequenceConsistencyFault(detail)
    }

    fn output(&self, committed: Option<Move>, reason: ReasonCode) -> PressOutput {
        PressOutput {
            timestamp: Utc::now(),
            phase: self.phase,
            step_cursor: self.step_cursor,
            total_steps: self.steps.len(),
            moves_done: self.logical_index,
            presses_remaining: self.presses_remaining,
            committed,
            next_step: self.current_step(),
            reason,
        }
    }

    /// Step the operator should perform now
    pub fn current_step(&self) -> Option<Step> {
        if self.phase.is_closed() {
            None
        } else {
            self.steps.get(self.step_cursor).copied()
        }
    }

    /// Operator instruction for the current step.
    ///
    /// A REORIENT that is the last press of its move is the closing one.
    pub fn current_instruction(&self) -> Option<String> {
        self.current_step()
            .map(|step| step.instruction(self.presses_remaining == 1))
    }

    /// Logical move the current step belongs to
    pub fn current_move(&self) -> Option<Move> {
        if self.phase.is_closed() {
            None
        } else {
            self.moves.get(self.logical_index).copied()
        }
    }

    /// Tracked state (last committed)
    pub fn state(&self) -> &FaceletState {
        &self.state
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TrackerPhase::Finished
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_cursor(&self) -> usize {
        self.step_cursor
    }

    pub fn logical_index(&self) -> usize {
        self.logical_index
    }

    pub fn presses_remaining(&self) -> usize {
        self.presses_remaining
    }

    /// Fraction of steps confirmed, 0.0-1.0
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            1.0
        } else {
            self.step_cursor as f64 / self.steps.len() as f64
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::publisher::RecordingPublisher;
    use crate::types::{parse_moves, Face};
    use pretty_assertions::assert_eq;

    fn tracker(solution: &str) -> PressTracker {
        PressTracker::new(FaceletState::solved(), parse_moves(solution).unwrap())
    }

    #[test]
    fn test_initial_state() {
        let t = tracker("B2 R");
        assert_eq!(t.phase(), TrackerPhase::Ready);
        assert_eq!(t.presses_remaining(), 4);
        assert_eq!(t.current_step(), Some(Step::Reorient));
        assert_eq!(t.current_move(), Some(Move::half(Face::B)));
        assert_eq!(t.status().reason, ReasonCode::P000_AWAITING_FIRST_PRESS);
    }

    #[test]
    fn test_status_after_first_press() {
        let mut t = tracker("U2");
        let mut publisher = RecordingPublisher::new();
        t.confirm(&mut publisher).unwrap();
        assert_eq!(t.phase(), TrackerPhase::Executing);
        assert_eq!(t.status().reason, ReasonCode::P001_STEP_CONFIRMED);
    }

    #[test]
    fn test_reorient_instructions_open_and_close() {
        let mut t = tracker("B' B2");
        let mut publisher = RecordingPublisher::new();
        let mut shown = Vec::new();
        while let Some(instruction) = t.current_instruction() {
            shown.push(instruction);
            t.confirm(&mut publisher).unwrap();
        }
        assert_eq!(
            shown,
            [
                "Rotate the cube to show its back",
                "Turn F'",
                "Rotate the cube back to the original front",
                "Rotate the cube to show its back",
                "Turn F",
                "Turn F",
                "Rotate the cube back to the original front",
            ]
        );
    }

    #[test]
    fn test_empty_sequence_is_terminal() {
        let mut t = tracker("");
        let mut publisher = RecordingPublisher::new();
        assert!(t.is_finished());
        assert_eq!(t.status().reason, ReasonCode::P003_EMPTY_SEQUENCE);
        assert_eq!(t.confirm(&mut publisher).unwrap_err(), CubeError::TrackerClosed);
        assert!(publisher.is_empty());
    }

    #[test]
    fn test_single_press_commits() {
        let mut t = tracker("R U");
        let mut publisher = RecordingPublisher::new();

        let out = t.confirm(&mut publisher).unwrap();
        assert_eq!(out.committed, Some(Move::clockwise(Face::R)));
        assert_eq!(out.reason, ReasonCode::P002_MOVE_COMMITTED);
        assert_eq!(out.next_step, Some(Step::Turn(Move::clockwise(Face::U))));
        assert_eq!(publisher.len(), 1);
        assert_eq!(t.presses_remaining(), 1);
    }

    #[test]
    fn test_back_move_commits_on_third_press() {
        let mut t = tracker("B");
        let mut publisher = RecordingPublisher::new();

        let first = t.confirm(&mut publisher).unwrap();
        assert_eq!(first.reason, ReasonCode::P001_REORIENT_CONFIRMED);
        assert_eq!(first.committed, None);
        t.confirm(&mut publisher).unwrap();
        assert!(publisher.is_empty());
        assert_eq!(*t.state(), FaceletState::solved());

        let last = t.confirm(&mut publisher).unwrap();
        assert_eq!(last.committed, Some(Move::clockwise(Face::B)));
        assert_eq!(last.phase, TrackerPhase::Finished);
        assert_eq!(last.reason, ReasonCode::P003_SEQUENCE_COMPLETE);
        assert_eq!(publisher.len(), 1);
        assert_eq!(*t.state(), engine::apply(&FaceletState::solved(), Move::clockwise(Face::B)));
    }

    #[test]
    fn test_half_turn_needs_two_presses() {
        let mut t = tracker("U2");
        let mut publisher = RecordingPublisher::new();
        assert!(t.confirm(&mut publisher).unwrap().committed.is_none());
        assert_eq!(t.confirm(&mut publisher).unwrap().committed, Some(Move::half(Face::U)));
        assert!(t.is_finished());
    }

    #[test]
    fn test_presses_remaining_stays_in_range() {
        let mut t = tracker("B2 F2 B' R");
        let mut publisher = RecordingPublisher::new();
        while !t.is_finished() {
            let required = t.current_move().unwrap().required_presses();
            assert!(t.presses_remaining() >= 1 && t.presses_remaining() <= required);
            t.confirm(&mut publisher).unwrap();
        }
        assert_eq!(publisher.len(), 4);
        assert_eq!(t.step_cursor(), 4 + 2 + 3 + 1);
    }

    #[test]
    fn test_abort_keeps_last_committed_state() {
        let mut t = tracker("R B");
        let mut publisher = RecordingPublisher::new();
        t.confirm(&mut publisher).unwrap(); // R committed
        t.confirm(&mut publisher).unwrap(); // REORIENT of B

        let out = t.abort();
        assert_eq!(out.phase, TrackerPhase::Aborted);
        assert_eq!(out.next_step, None);
        assert_eq!(*t.state(), *publisher.latest().unwrap());
        assert_eq!(t.confirm(&mut publisher).unwrap_err(), CubeError::TrackerClosed);
    }

    #[test]
    fn test_confirm_after_finish_rejected() {
        let mut t = tracker("L");
        let mut publisher = RecordingPublisher::new();
        t.confirm(&mut publisher).unwrap();
        assert_eq!(t.confirm(&mut publisher).unwrap_err(), CubeError::TrackerClosed);
        assert_eq!(publisher.len(), 1);
    }

    #[test]
    fn test_inconsistent_accounting_is_fatal() {
        let mut t = tracker("R");
        // Simulate an expansion that emitted more steps than presses owed
        t.steps.push(Step::Turn(Move::clockwise(Face::R)));
        let mut publisher = RecordingPublisher::new();
        let first = t.confirm(&mut publisher);
        assert!(first.is_ok());
        match t.confirm(&mut publisher) {
            Err(CubeError::SequenceConsistencyFault(_)) => {}
            other => panic!("expected fault, got {:?}", other),
        }
        assert_eq!(t.phase(), TrackerPhase::Aborted);
    }

    #[test]
    fn test_steps_exhausted_before_moves_is_fatal() {
        let mut t = tracker("R U");
        // Expansion that lost the last step: R commits, U never gets a press
        t.steps.pop();
        let mut publisher = RecordingPublisher::new();
        match t.confirm(&mut publisher) {
            Err(CubeError::SequenceConsistencyFault(detail)) => {
                assert!(detail.contains("1 of 2 moves committed"), "{}", detail);
            }
            other => panic!("expected fault, got {:?}", other),
        }
        assert_eq!(t.phase(), TrackerPhase::Aborted);
        assert_eq!(t.current_step(), None);
        assert_eq!(publisher.len(), 1);
        assert_eq!(t.confirm(&mut publisher).unwrap_err(), CubeError::TrackerClosed);
    }
}
