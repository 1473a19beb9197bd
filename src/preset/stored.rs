//! On-disk shape of curves and preset banks.
//!
//! In memory a node's handles are offsets from its endpoint. On disk every
//! point is absolute, which keeps saved files readable and independent of
//! how the model happens to store handles. Anything read back is validated
//! before it becomes a [`Curve`].

use serde::{Deserialize, Serialize};

use super::{Preset, PresetBank};
use crate::{
    curve::{Curve, Node, Point},
    error::PresetError,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredPoint {
    pub x: f32,
    pub y: f32,
}

/// A node with all three points absolute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredNode {
    pub end_point: StoredPoint,
    pub control_in: StoredPoint,
    pub control_out: StoredPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCurve {
    pub name: String,
    pub nodes: Vec<StoredNode>,
}

/// Everything needed to restore an editing session.
///
/// `presets` holds the user presets only; "Bypass" is implied at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBank {
    pub preset_index: usize,
    pub active: Vec<StoredNode>,
    #[serde(default)]
    pub presets: Vec<StoredCurve>,
}

impl From<Point> for StoredPoint {
    fn from(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl From<StoredPoint> for Point {
    fn from(point: StoredPoint) -> Self {
        Point::new(point.x, point.y)
    }
}

impl From<&Node> for StoredNode {
    fn from(node: &Node) -> Self {
        Self {
            end_point: node.end_point.into(),
            control_in: node.control_in_absolute().into(),
            control_out: node.control_out_absolute().into(),
        }
    }
}

impl From<StoredNode> for Node {
    fn from(stored: StoredNode) -> Self {
        let end_point = Point::from(stored.end_point);
        Node::new(
            end_point,
            Point::from(stored.control_in) - end_point,
            Point::from(stored.control_out) - end_point,
        )
    }
}

/// Absolute nodes of `curve`.
pub fn store_nodes(curve: &Curve) -> Vec<StoredNode> {
    curve.nodes().iter().map(StoredNode::from).collect()
}

/// Rebuild and validate a curve from absolute nodes.
pub fn load_nodes(nodes: &[StoredNode]) -> Result<Curve, PresetError> {
    let nodes = nodes.iter().copied().map(Node::from).collect();
    Ok(Curve::new(nodes)?)
}

impl From<&Preset> for StoredCurve {
    fn from(preset: &Preset) -> Self {
        Self {
            name: preset.name.clone(),
            nodes: store_nodes(preset.curve()),
        }
    }
}

impl TryFrom<StoredCurve> for Preset {
    type Error = PresetError;

    fn try_from(stored: StoredCurve) -> Result<Self, Self::Error> {
        let curve = load_nodes(&stored.nodes)?;
        Ok(Preset::new(stored.name, curve))
    }
}

impl StoredBank {
    pub fn new(bank: &PresetBank, preset_index: usize, active: &Curve) -> Self {
        Self {
            preset_index,
            active: store_nodes(active),
            presets: bank.iter().skip(1).map(StoredCurve::from).collect(),
        }
    }

    /// Validate and rebuild the bank and the active curve.
    pub fn load(self) -> Result<(PresetBank, usize, Curve), PresetError> {
        let presets = self
            .presets
            .into_iter()
            .map(Preset::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let bank = PresetBank::with_presets(presets);

        if self.preset_index >= bank.len() {
            return Err(PresetError::UnknownPreset {
                index: self.preset_index,
                len: bank.len(),
            });
        }

        let active = load_nodes(&self.active)?;
        Ok((bank, self.preset_index, active))
    }
}
