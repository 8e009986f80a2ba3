//! Move notation: a face plus a modifier

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{CubeError, Face};

lazy_static! {
    /// Single move token: face letter, optional `'` or `2`
    static ref RE_MOVE: Regex = Regex::new(r"^([UDFBLR])(['2]?)$").unwrap();
}

/// How far the face is turned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Quarter turn clockwise (no suffix)
    Clockwise,
    /// Quarter turn counter-clockwise (`'`)
    CounterClockwise,
    /// Half turn (`2`)
    Half,
}

impl Modifier {
    /// Number of clockwise quarter turns this modifier stands for
    pub fn quarter_turns(self) -> usize {
        match self {
            Modifier::Clockwise => 1,
            Modifier::Half => 2,
            Modifier::CounterClockwise => 3,
        }
    }

    /// Notation suffix
    pub fn suffix(self) -> &'static str {
        match self {
            Modifier::Clockwise => "",
            Modifier::CounterClockwise => "'",
            Modifier::Half => "2",
        }
    }
}

/// One logical move as produced by the solving oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Move {
    pub face: Face,
    pub modifier: Modifier,
}

impl Move {
    pub fn new(face: Face, modifier: Modifier) -> Self {
        Self { face, modifier }
    }

    pub fn clockwise(face: Face) -> Self {
        Self::new(face, Modifier::Clockwise)
    }

    pub fn counter_clockwise(face: Face) -> Self {
        Self::new(face, Modifier::CounterClockwise)
    }

    pub fn half(face: Face) -> Self {
        Self::new(face, Modifier::Half)
    }

    /// Clockwise quarter turns needed to realize this move
    pub fn quarter_turns(&self) -> usize {
        self.modifier.quarter_turns()
    }

    /// Physical confirmations the operator gives before this move counts as done.
    ///
    /// Back moves are bracketed by two reorientations; half turns are made as
    /// two separate quarter turns.
    pub fn required_presses(&self) -> usize {
        match (self.face.is_reachable(), self.modifier) {
            (true, Modifier::Half) => 2,
            (true, _) => 1,
            (false, Modifier::Half) => 4,
            (false, _) => 3,
        }
    }

    /// Move that undoes this one
    pub fn inverse(&self) -> Self {
        let modifier = match self.modifier {
            Modifier::Clockwise => Modifier::CounterClockwise,
            Modifier::CounterClockwise => Modifier::Clockwise,
            Modifier::Half => Modifier::Half,
        };
        Self::new(self.face, modifier)
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let caps = RE_MOVE
            .captures(token)
            .ok_or_else(|| CubeError::InvalidMove(token.to_string()))?;

        let face = caps[1]
            .chars()
            .next()
            .and_then(Face::from_letter)
            .ok_or_else(|| CubeError::InvalidMove(token.to_string()))?;
        let modifier = match &caps[2] {
            "'" => Modifier::CounterClockwise,
            "2" => Modifier::Half,
            _ => Modifier::Clockwise,
        };
        Ok(Self::new(face, modifier))
    }
}

impl TryFrom<String> for Move {
    type Error = CubeError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> Self {
        mv.to_string()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.face, self.modifier.suffix())
    }
}

/// Parse a whitespace-separated move sequence such as `"R U R' U'"`
pub fn parse_moves(text: &str) -> Result<Vec<Move>, CubeError> {
    text.split_whitespace().map(str::parse).collect()
}

/// Render a move sequence back into notation
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().map(Move::to_string).collect::<Vec<_>>().join(" ")
}
