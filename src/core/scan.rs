//! Scan assembly: six scanned faces → facelet state → oracle request
//!
//! Scanned labels are arbitrary colors. Each face's center names the face,
//! so every other sticker is mapped to the face whose center shares its color.

use std::collections::{BTreeMap, HashMap};

use crate::types::{CubeError, Face, FaceStickers, FaceletState, Label, Result};
use crate::{FACELET_COUNT, UNMAPPED_LABEL};

/// Faces collected so far, keyed by face. Rescanning a face replaces it.
#[derive(Debug, Clone, Default)]
pub struct ScannedFaces {
    faces: BTreeMap<Face, FaceStickers>,
}

impl ScannedFaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the nine labels read for `face`
    pub fn insert(&mut self, face: Face, stickers: FaceStickers) -> &mut Self {
        self.faces.insert(face, stickers);
        self
    }

    /// Record a face from a 9-character string such as `"WWRGWYBOO"`
    pub fn insert_str(&mut self, face: Face, stickers: &str) -> Result<&mut Self> {
        let labels: Vec<Label> = stickers.chars().map(Label).collect();
        let stickers: FaceStickers = labels
            .try_into()
            .map_err(|v: Vec<Label>| CubeError::MalformedFace { face, count: v.len() })?;
        Ok(self.insert(face, stickers))
    }

    pub fn get(&self, face: Face) -> Option<&FaceStickers> {
        self.faces.get(&face)
    }

    /// Faces not yet scanned, in oracle order
    pub fn missing(&self) -> Vec<Face> {
        Face::ORACLE_ORDER
            .into_iter()
            .filter(|f| !self.faces.contains_key(f))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.faces.len() == Face::ALL.len()
    }

    /// Build the facelet state. Needs all six faces.
    pub fn to_state(&self) -> Result<FaceletState> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(CubeError::IncompleteScan { missing });
        }
        Ok(FaceletState::from_fn(|face| self.faces[&face]))
    }
}

impl From<FaceletState> for ScannedFaces {
    fn from(state: FaceletState) -> Self {
        let mut scan = Self::new();
        for face in Face::ALL {
            scan.insert(face, *state.face(face));
        }
        scan
    }
}

/// Center label → face. Two faces sharing a center color cannot be told apart.
pub fn color_mapping(state: &FaceletState) -> Result<HashMap<Label, Face>> {
    let mut mapping = HashMap::new();
    for face in Face::ORACLE_ORDER {
        let center = state.center(face);
        if let Some(other) = mapping.insert(center, face) {
            return Err(CubeError::AmbiguousColorMapping {
                reason: format!("faces {} and {} share center color {}", other, face, center),
            });
        }
    }
    Ok(mapping)
}

/// 54 face letters in oracle order, `?` where a label matches no center
pub fn mapped_facelets(state: &FaceletState, mapping: &HashMap<Label, Face>) -> String {
    Face::ORACLE_ORDER
        .into_iter()
        .flat_map(|face| state.face(face).iter())
        .map(|label| mapping.get(label).map(|f| f.letter()).unwrap_or(UNMAPPED_LABEL))
        .collect()
}

/// Oracle request string. Never contains a placeholder: any unmapped label
/// is reported as `AmbiguousColorMapping` instead.
pub fn oracle_request(state: &FaceletState) -> Result<String> {
    let mapping = color_mapping(state)?;
    let facelets = mapped_facelets(state, &mapping);

    let unmapped: Vec<String> = Face::ORACLE_ORDER
        .into_iter()
        .flat_map(|face| (0..9).map(move |i| (face, i)))
        .filter(|(face, i)| !mapping.contains_key(&state.face(*face)[*i]))
        .map(|(face, i)| format!("{}{}={}", face, i, state.face(face)[i]))
        .collect();
    if !unmapped.is_empty() {
        return Err(CubeError::AmbiguousColorMapping {
            reason: format!("no face center for stickers {}", unmapped.join(" ")),
        });
    }

    debug_assert_eq!(facelets.len(), FACELET_COUNT);
    Ok(facelets)
}
