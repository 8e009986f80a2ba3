//! Core types for cubewalk

mod error;
mod face;
mod facelet;
mod moves;
mod output;
mod reason;
mod state;
mod step;

pub use error::{CubeError, Result};
pub use face::Face;
pub use facelet::{FaceMap, FaceStickers, FaceletState, Label};
pub use moves::{format_moves, parse_moves, Modifier, Move};
pub use output::PressOutput;
pub use reason::ReasonCode;
pub use state::TrackerPhase;
pub use step::{Step, REORIENT_TOKEN};
