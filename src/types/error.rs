//! Error taxonomy for the scan → solve → execute pipeline

use thiserror::Error;

use crate::types::Face;

/// Every failure the core can report. All of them are synchronous and local.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CubeError {
    /// Fewer than six faces were scanned
    #[error("incomplete scan: missing faces {}", format_faces(.missing))]
    IncompleteScan { missing: Vec<Face> },

    /// A scanned label has no face center to map onto, or two centers share a label
    #[error("ambiguous color mapping: {reason}")]
    AmbiguousColorMapping { reason: String },

    /// The solving oracle rejected the cube or could not be reached
    #[error("oracle failure: {0}")]
    OracleFailure(String),

    /// A move token outside `[UDFBLR]['2]?`
    #[error("invalid move token {0:?}")]
    InvalidMove(String),

    /// Expanded steps and press accounting disagree
    #[error("sequence consistency fault: {0}")]
    SequenceConsistencyFault(String),

    /// A confirmation arrived after the tracker finished or was aborted
    #[error("tracker is closed")]
    TrackerClosed,

    /// A face did not carry exactly nine labels
    #[error("face {face} has {count} stickers, expected 9")]
    MalformedFace { face: Face, count: usize },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CubeError>;

fn format_faces(faces: &[Face]) -> String {
    faces
        .iter()
        .map(|f| f.letter().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_scan_lists_faces() {
        let err = CubeError::IncompleteScan { missing: vec![Face::D, Face::B] };
        assert_eq!(err.to_string(), "incomplete scan: missing faces D,B");
    }

    #[test]
    fn test_oracle_failure_is_verbatim() {
        let err = CubeError::OracleFailure("Error 1: There is not exactly one facelet of each colour".into());
        assert!(err.to_string().ends_with("There is not exactly one facelet of each colour"));
    }
}
