//! Solve Oracle boundary
//!
//! The search itself lives outside this crate. An oracle takes the 54-letter
//! facelet string and answers with whitespace-separated moves, or fails with
//! a diagnostic that is shown to the operator verbatim.

use std::process::Command;

use tracing::{debug, info};

use crate::types::{parse_moves, CubeError, Move, Result};
use crate::UNMAPPED_LABEL;

/// External cube solver
pub trait SolveOracle {
    /// Raw solution text for a facelet string in `U,R,F,D,L,B` order
    fn solve(&self, facelets: &str) -> Result<String>;
}

/// Ask the oracle and parse its answer into moves
pub fn solve_moves(oracle: &(impl SolveOracle + ?Sized), facelets: &str) -> Result<Vec<Move>> {
    if facelets.contains(UNMAPPED_LABEL) {
        return Err(CubeError::AmbiguousColorMapping {
            reason: "facelet string contains unmapped stickers".to_string(),
        });
    }
    info!(facelets, "requesting solution");
    let solution = oracle.solve(facelets)?;
    let moves = parse_moves(&solution)?;
    info!(moves = moves.len(), "solution received");
    Ok(moves)
}

/// Always answers with a preset solution, e.g. one pasted from a web solver
#[derive(Debug, Clone)]
pub struct ScriptedOracle {
    solution: String,
}

impl ScriptedOracle {
    pub fn new(solution: impl Into<String>) -> Self {
        Self { solution: solution.into() }
    }
}

impl SolveOracle for ScriptedOracle {
    fn solve(&self, _facelets: &str) -> Result<String> {
        Ok(self.solution.clone())
    }
}

/// Oracle that always refuses, with a fixed reason
#[derive(Debug, Clone)]
pub struct FailingOracle {
    reason: String,
}

impl FailingOracle {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl SolveOracle for FailingOracle {
    fn solve(&self, _facelets: &str) -> Result<String> {
        Err(CubeError::OracleFailure(self.reason.clone()))
    }
}

/// Runs an external solver program with the facelet string as its last argument
/// and reads the solution from stdout.
#[derive(Debug, Clone)]
pub struct CommandOracle {
    program: String,
    args: Vec<String>,
}

impl CommandOracle {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl SolveOracle for CommandOracle {
    fn solve(&self, facelets: &str) -> Result<String> {
        debug!(program = %self.program, args = ?self.args, "spawning solver");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(facelets)
            .output()
            .map_err(|e| CubeError::OracleFailure(format!("cannot run {}: {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = if stderr.is_empty() { stdout } else { stderr };
            return Err(CubeError::OracleFailure(reason));
        }
        // Common solver CLIs report bad cubes on stdout with exit code 0
        if stdout.starts_with("Error") {
            return Err(CubeError::OracleFailure(stdout));
        }
        Ok(stdout)
    }
}
