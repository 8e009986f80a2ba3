//! Reason codes attached to every press outcome

use serde::{Deserialize, Serialize};

/// Why the tracker is where it is after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // P000: Idle
    // =========================================================================
    /// Sequence loaded, no press yet
    P000_AWAITING_FIRST_PRESS,

    // =========================================================================
    // P001: Presses
    // =========================================================================
    /// Step confirmed, logical move still needs more presses
    P001_STEP_CONFIRMED,
    /// Reorientation confirmed
    P001_REORIENT_CONFIRMED,

    // =========================================================================
    // P002: Commits
    // =========================================================================
    /// Last press of a logical move, state updated and published
    P002_MOVE_COMMITTED,

    // =========================================================================
    // P003: Terminal
    // =========================================================================
    /// Every step done
    P003_SEQUENCE_COMPLETE,
    /// Operator cancelled
    P003_ABORTED,
    /// Nothing to do: the oracle returned no moves
    P003_EMPTY_SEQUENCE,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::P000_AWAITING_FIRST_PRESS => "P000_AWAITING_FIRST_PRESS",
            Self::P001_STEP_CONFIRMED => "P001_STEP_CONFIRMED",
            Self::P001_REORIENT_CONFIRMED => "P001_REORIENT_CONFIRMED",
            Self::P002_MOVE_COMMITTED => "P002_MOVE_COMMITTED",
            Self::P003_SEQUENCE_COMPLETE => "P003_SEQUENCE_COMPLETE",
            Self::P003_ABORTED => "P003_ABORTED",
            Self::P003_EMPTY_SEQUENCE => "P003_EMPTY_SEQUENCE",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::P000_AWAITING_FIRST_PRESS => "Waiting for the first step",
            Self::P001_STEP_CONFIRMED => "Step confirmed",
            Self::P001_REORIENT_CONFIRMED => "Cube reoriented",
            Self::P002_MOVE_COMMITTED => "Move completed and applied",
            Self::P003_SEQUENCE_COMPLETE => "Cube solved",
            Self::P003_ABORTED => "Walkthrough aborted",
            Self::P003_EMPTY_SEQUENCE => "Nothing to do",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
