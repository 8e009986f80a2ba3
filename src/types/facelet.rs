//! Facelet state: six faces of nine labelled stickers

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{CubeError, Face};
use crate::{CENTER_INDEX, STICKERS_PER_FACE};

/// An opaque sticker label, e.g. a scanned color letter or a face letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub char);

impl Label {
    /// Label carrying the face's own letter (canonical, post-mapping form)
    pub fn of(face: Face) -> Self {
        Label(face.letter())
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Nine stickers of one face, row-major, center at index 4
pub type FaceStickers = [Label; STICKERS_PER_FACE];

/// Serialized shape: `{"U": "WWWWWWWWW", ...}`
pub type FaceMap = BTreeMap<Face, String>;

/// Complete sticker configuration of the cube.
///
/// A plain value: moves produce new states and never touch the one they were
/// given, so snapshots handed to a viewer stay consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FaceMap", into = "FaceMap")]
pub struct FaceletState {
    faces: [FaceStickers; 6],
}

impl FaceletState {
    /// Build a state from one sticker array per face
    pub fn from_fn(mut stickers: impl FnMut(Face) -> FaceStickers) -> Self {
        let mut faces = [[Label(' '); STICKERS_PER_FACE]; 6];
        for face in Face::ALL {
            faces[face.index()] = stickers(face);
        }
        Self { faces }
    }

    /// Solved cube labelled with face letters (`U` face is all `U`, ...)
    pub fn solved() -> Self {
        Self::from_fn(|face| [Label::of(face); STICKERS_PER_FACE])
    }

    /// Stickers of one face
    pub fn face(&self, face: Face) -> &FaceStickers {
        &self.faces[face.index()]
    }

    pub(crate) fn face_mut(&mut self, face: Face) -> &mut FaceStickers {
        &mut self.faces[face.index()]
    }

    /// Center label, the permanent identity of a face
    pub fn center(&self, face: Face) -> Label {
        self.faces[face.index()][CENTER_INDEX]
    }

    /// All 54 labels, face by face in storage order
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.faces.iter().flat_map(|f| f.iter().copied())
    }

    /// One face as a 9-character string
    pub fn face_string(&self, face: Face) -> String {
        self.face(face).iter().map(|l| l.0).collect()
    }

    /// Every face shows a single label
    pub fn is_solved(&self) -> bool {
        self.faces
            .iter()
            .all(|stickers| stickers.iter().all(|l| *l == stickers[CENTER_INDEX]))
    }

    /// The same physical cube after a 180° spin about the U-D axis.
    ///
    /// F and B swap, L and R swap, U and D keep their place but turn half way
    /// round. This is what the operator sees after a REORIENT step.
    pub fn reoriented(&self) -> Self {
        Self::from_fn(|face| {
            let source = self.face(face.opposite_after_spin());
            match face {
                Face::U | Face::D => {
                    let mut turned = *source;
                    turned.reverse();
                    turned
                }
                _ => *source,
            }
        })
    }
}

impl From<FaceletState> for FaceMap {
    fn from(state: FaceletState) -> Self {
        Face::ALL
            .into_iter()
            .map(|face| (face, state.face_string(face)))
            .collect()
    }
}

impl TryFrom<FaceMap> for FaceletState {
    type Error = CubeError;

    fn try_from(map: FaceMap) -> Result<Self, Self::Error> {
        let missing: Vec<Face> = Face::ALL.into_iter().filter(|f| !map.contains_key(f)).collect();
        if !missing.is_empty() {
            return Err(CubeError::IncompleteScan { missing });
        }

        let mut faces = [[Label(' '); STICKERS_PER_FACE]; 6];
        for (face, stickers) in &map {
            let labels: Vec<Label> = stickers.chars().map(Label).collect();
            faces[face.index()] = labels
                .try_into()
                .map_err(|v: Vec<Label>| CubeError::MalformedFace { face: *face, count: v.len() })?;
        }
        Ok(Self { faces })
    }
}

impl std::fmt::Display for FaceletState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for face in Face::ORACLE_ORDER {
            let s = self.face_string(face);
            writeln!(f, "{}: {} {} {}", face, &s[0..3], &s[3..6], &s[6..9])?;
        }
        Ok(())
    }
}
