use log::{debug, info};

use crate::{
    curve::{Curve, Node},
    error::PresetError,
};

/// Name of the preset every bank starts with.
pub const BYPASS_NAME: &str = "Bypass";

/// A named curve in the bank.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    curve: Curve,
}

impl Preset {
    pub fn new(name: impl Into<String>, curve: Curve) -> Self {
        Self {
            name: name.into(),
            curve,
        }
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn nodes(&self) -> &[Node] {
        self.curve.nodes()
    }
}

/// The list of curves a user can switch between.
///
/// Index 0 always holds the identity "Bypass" curve. Everything in the bank
/// is a validated [`Curve`], which is what lets a swap skip validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetBank {
    presets: Vec<Preset>,
}

impl PresetBank {
    pub fn new() -> Self {
        Self {
            presets: vec![Preset::new(BYPASS_NAME, Curve::bypass())],
        }
    }

    /// A bank holding "Bypass" followed by `presets`.
    pub fn with_presets(presets: impl IntoIterator<Item = Preset>) -> Self {
        let mut bank = Self::new();
        bank.presets.extend(presets);
        bank
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Never true; "Bypass" is always there.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name.as_str())
    }

    /// Index of the first preset called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.presets.iter().position(|p| p.name == name)
    }

    /// Look up a preset for loading.
    pub fn select(&self, index: usize) -> Result<&Preset, PresetError> {
        self.presets.get(index).ok_or(PresetError::UnknownPreset {
            index,
            len: self.presets.len(),
        })
    }

    /// Append a preset and return its index.
    pub fn push(&mut self, name: impl Into<String>, curve: Curve) -> usize {
        let preset = Preset::new(name, curve);
        debug!("preset '{}' added at {}", preset.name, self.presets.len());
        self.presets.push(preset);
        self.presets.len() - 1
    }

    /// Append a preset from untrusted nodes.
    pub fn push_nodes(
        &mut self,
        name: impl Into<String>,
        nodes: Vec<Node>,
    ) -> Result<usize, PresetError> {
        let curve = Curve::new(nodes)?;
        Ok(self.push(name, curve))
    }

    /// Append an evenly spaced identity curve of `node_count` nodes.
    pub fn create(&mut self, name: impl Into<String>, node_count: usize) -> Result<usize, PresetError> {
        let curve = Curve::identity(node_count)?;
        Ok(self.push(name, curve))
    }

    /// Save `curve` under `name`.
    ///
    /// An existing preset of that name is overwritten in place, except
    /// "Bypass", which is never replaced; storing under that name appends a
    /// new entry instead.
    pub fn store_current(&mut self, name: impl Into<String>, curve: &Curve) -> usize {
        let name = name.into();
        match self.position(&name).filter(|&index| index != 0) {
            Some(index) => {
                info!("preset '{name}' overwritten");
                self.presets[index].curve = curve.clone();
                index
            }
            None => {
                info!("preset '{name}' stored");
                self.push(name, curve.clone())
            }
        }
    }
}

impl Default for PresetBank {
    fn default() -> Self {
        Self::new()
    }
}
