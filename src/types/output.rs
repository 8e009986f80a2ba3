//! Output structures for terminal display

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Move, ReasonCode, Step, TrackerPhase};

/// Output record for each confirmation (or abort)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PressOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Phase after the event
    pub phase: TrackerPhase,
    /// Steps confirmed so far
    pub step_cursor: usize,
    /// Total expanded steps
    pub total_steps: usize,
    /// Logical moves committed so far
    pub moves_done: usize,
    /// Presses still owed on the current logical move
    pub presses_remaining: usize,
    /// Move committed by this press, if any
    pub committed: Option<Move>,
    /// What the operator should do next
    pub next_step: Option<Step>,
    /// Reason for the outcome
    pub reason: ReasonCode,
}

impl PressOutput {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.phase.color_code();
        let reset = TrackerPhase::color_reset();
        let emoji = self.phase.emoji();

        format!(
            "{}{} step={}/{} | moves={} | left={} | {}{}{}",
            color,
            emoji,
            self.step_cursor,
            self.total_steps,
            self.moves_done,
            self.presses_remaining,
            self.reason.code(),
            self.committed_suffix(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "step={}/{} | phase={} | moves={} | left={} | reason={}{}",
            self.step_cursor,
            self.total_steps,
            self.phase,
            self.moves_done,
            self.presses_remaining,
            self.reason.code(),
            self.committed_suffix()
        )
    }

    fn committed_suffix(&self) -> String {
        match self.committed {
            Some(mv) => format!(" | applied={}", mv),
            None => String::new(),
        }
    }
}
