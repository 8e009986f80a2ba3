//! Executable steps: what the operator is asked to do with their hands

use serde::{Deserialize, Serialize};

use crate::types::{CubeError, Move};

/// Marker text for a whole-cube reorientation
pub const REORIENT_TOKEN: &str = "REORIENT";

/// One physical action, confirmed by one press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Step {
    /// Quarter turn of a face the operator can reach directly
    Turn(Move),
    /// Spin the whole cube 180° to expose the other side
    Reorient,
}

impl Step {
    /// Short instruction for the operator.
    ///
    /// `closing` marks the reorientation that ends a back-face move and
    /// brings the original front into view again.
    pub fn instruction(&self, closing: bool) -> String {
        match self {
            Step::Turn(mv) => format!("Turn {}", mv),
            Step::Reorient if closing => "Rotate the cube back to the original front".to_string(),
            Step::Reorient => "Rotate the cube to show its back".to_string(),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Turn(mv) => write!(f, "{}", mv),
            Step::Reorient => write!(f, "{}", REORIENT_TOKEN),
        }
    }
}

impl TryFrom<String> for Step {
    type Error = CubeError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        if token == REORIENT_TOKEN {
            Ok(Step::Reorient)
        } else {
            token.parse().map(Step::Turn)
        }
    }
}

impl From<Step> for String {
    fn from(step: Step) -> Self {
        step.to_string()
    }
}
