//! Error types for curve construction, editing, presets and configuration.

use thiserror::Error;

use crate::curve::Handle;

/// A curve that breaks one of the model invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// Fewer than two nodes.
    #[error("a curve needs at least 2 nodes, got {count}")]
    TooFewNodes {
        /// Number of nodes supplied.
        count: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("node {index} has a non-finite coordinate")]
    NonFinite {
        /// Offending node.
        index: usize,
    },

    /// First endpoint is not pinned to x = -1.
    #[error("first endpoint must sit at x = -1, found {x}")]
    DomainStart {
        /// Actual x of the first endpoint.
        x: f32,
    },

    /// Last endpoint is not pinned to x = 1.
    #[error("last endpoint must sit at x = 1, found {x}")]
    DomainEnd {
        /// Actual x of the last endpoint.
        x: f32,
    },

    /// Endpoint x does not strictly increase.
    #[error("endpoint {index} is not strictly right of its predecessor")]
    NonMonotonic {
        /// Node whose endpoint is out of order.
        index: usize,
    },

    /// A control offset points backwards past its own endpoint.
    #[error("node {index} has a {handle} handle pointing the wrong way")]
    ControlReversed {
        /// Offending node.
        index: usize,
        /// Which handle.
        handle: Handle,
    },

    /// A control point crosses the neighbouring endpoint in x.
    #[error("node {index} has a {handle} handle crossing its neighbour")]
    ControlCrossesNeighbour {
        /// Offending node.
        index: usize,
        /// Which handle.
        handle: Handle,
    },

    /// An endpoint or absolute control y is outside [-1, 1].
    #[error("node {index} has a {handle} y outside [-1, 1]: {y}")]
    OutOfRange {
        /// Offending node.
        index: usize,
        /// Which point of the node.
        handle: Handle,
        /// The out-of-range y.
        y: f32,
    },
}

/// A gesture that could not be applied.
///
/// Rejected gestures never touch the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    /// The node index does not exist.
    #[error("no node at index {index} (curve has {len} nodes)")]
    UnknownNode {
        /// Requested index.
        index: usize,
        /// Current node count.
        len: usize,
    },

    /// The handle exists but lies outside the domain and cannot be edited.
    #[error("the {handle} handle of node {index} is not editable")]
    InertHandle {
        /// Requested node.
        index: usize,
        /// Requested handle.
        handle: Handle,
    },

    /// A move or release arrived without a preceding press.
    #[error("no gesture in progress")]
    NotDragging,
}

/// Preset bank failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PresetError {
    /// Selection index past the end of the bank.
    #[error("no preset at index {index} (bank has {len} presets)")]
    UnknownPreset {
        /// Requested index.
        index: usize,
        /// Number of presets.
        len: usize,
    },

    /// A loaded or generated preset is not a valid curve.
    #[error("invalid preset curve: {0}")]
    InvalidCurve(#[from] CurveError),
}

/// Rejected [`ShaperConfig`](crate::ShaperConfig) values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Table resolution must be a power of two no smaller than 2.
    #[error("table resolution must be a power of two >= 2, got {0}")]
    TableResolution(usize),

    /// Ramp time must be finite and non-negative.
    #[error("mix ramp must be a non-negative number of seconds, got {0}")]
    MixRamp(f32),

    /// The publication ring needs room for at least one table.
    #[error("publish queue capacity must be at least 1")]
    PublishQueue,
}
