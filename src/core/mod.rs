//! Core modules for cubewalk

pub mod engine;
pub mod expansion;
pub mod tracker;
pub mod publisher;
pub mod scan;
pub mod classify;
pub mod oracle;
pub mod session;
pub mod api;

pub use engine::{apply, apply_sequence, apply_token};
pub use expansion::{expand, expand_move, expand_str, total_presses};
pub use tracker::PressTracker;
pub use publisher::{
    BroadcastPublisher, FanoutPublisher, JsonLinePublisher, LogPublisher, RecordingPublisher, StatePublisher,
};
pub use scan::{color_mapping, mapped_facelets, oracle_request, ScannedFaces};
pub use classify::{ColorClassifier, HsvSample, HsvThresholds};
pub use oracle::{solve_moves, CommandOracle, FailingOracle, ScriptedOracle, SolveOracle};
pub use session::SolvePlan;
pub use api::{create_router, run_server, SharedOracle};
