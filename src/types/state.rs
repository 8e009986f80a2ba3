//! Press tracker phase definitions

use serde::{Deserialize, Serialize};

/// Lifecycle of a guided solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackerPhase {
    /// No confirmation received yet
    Ready,
    /// At least one step confirmed, steps remain
    Executing,
    /// Every expanded step confirmed
    Finished,
    /// Cancelled, or stopped on an internal fault
    Aborted,
}

impl TrackerPhase {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            TrackerPhase::Ready => "\x1b[90m",     // Gray
            TrackerPhase::Executing => "\x1b[33m", // Yellow
            TrackerPhase::Finished => "\x1b[32m",  // Green
            TrackerPhase::Aborted => "\x1b[31m",   // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for phase
    pub fn emoji(&self) -> &'static str {
        match self {
            TrackerPhase::Ready => "⏳",
            TrackerPhase::Executing => "🔁",
            TrackerPhase::Finished => "🎉",
            TrackerPhase::Aborted => "⛔",
        }
    }

    /// No further confirmations accepted
    pub fn is_closed(&self) -> bool {
        matches!(self, TrackerPhase::Finished | TrackerPhase::Aborted)
    }
}

impl std::fmt::Display for TrackerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TrackerPhase::Ready => "READY",
            TrackerPhase::Executing => "EXECUTING",
            TrackerPhase::Finished => "FINISHED",
            TrackerPhase::Aborted => "ABORTED",
        };
        write!(f, "{}", name)
    }
}
