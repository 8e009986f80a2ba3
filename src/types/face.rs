//! Face identifiers

use serde::{Deserialize, Serialize};

/// One of the six faces of the cube, named by its position in the scanning orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    /// Up
    U,
    /// Down
    D,
    /// Front, facing the camera
    F,
    /// Back, hidden from the camera
    B,
    /// Left
    L,
    /// Right
    R,
}

impl Face {
    /// All faces in storage order
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::F, Face::B, Face::L, Face::R];

    /// Order the solving oracle expects facelets in
    pub const ORACLE_ORDER: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    /// Storage slot inside a facelet state
    pub fn index(self) -> usize {
        match self {
            Face::U => 0,
            Face::D => 1,
            Face::F => 2,
            Face::B => 3,
            Face::L => 4,
            Face::R => 5,
        }
    }

    /// Letter used in move notation and oracle strings
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
            Face::L => 'L',
            Face::R => 'R',
        }
    }

    /// Parse a face letter (upper case only, matching move notation)
    pub fn from_letter(c: char) -> Option<Face> {
        match c {
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            'L' => Some(Face::L),
            'R' => Some(Face::R),
            _ => None,
        }
    }

    /// Can the operator turn this face without spinning the whole cube?
    pub fn is_reachable(self) -> bool {
        self != Face::B
    }

    /// Face that takes this one's place after a 180° spin about the U-D axis
    pub fn opposite_after_spin(self) -> Face {
        match self {
            Face::F => Face::B,
            Face::B => Face::F,
            Face::L => Face::R,
            Face::R => Face::L,
            other => other,
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
