//! cubewalk: guided manual solving of a physical Rubik's Cube
//!
//! Scan six faces → ask a solving oracle for moves → expand them into steps a
//! person can perform without flipping the cube → track confirmations and
//! keep the logical cube state in sync, publishing a snapshot per move.

pub mod core;
pub mod types;

// =============================================================================
// CUBE GEOMETRY [C]
// =============================================================================

/// Stickers on one face
pub const STICKERS_PER_FACE: usize = 9;

/// Total stickers on the cube (and length of the oracle request string)
pub const FACELET_COUNT: usize = 54;

/// Index of the center sticker, the permanent identity of a face
pub const CENTER_INDEX: usize = 4;

/// 90° clockwise face rotation: new[i] = old[CLOCKWISE_PERMUTATION[i]]
pub const CLOCKWISE_PERMUTATION: [usize; STICKERS_PER_FACE] = [6, 3, 0, 7, 4, 1, 8, 5, 2];

/// Placeholder written into the oracle string for a label with no matching center
pub const UNMAPPED_LABEL: char = '?';

// =============================================================================
// RUNTIME DEFAULTS
// =============================================================================

/// Default listen address for `--serve`
pub const DEFAULT_ADDR: &str = "127.0.0.1:5001";

/// Capacity of the per-session snapshot broadcast channel
pub const SNAPSHOT_CHANNEL_CAPACITY: usize = 100;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
