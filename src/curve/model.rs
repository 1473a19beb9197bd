use crate::{
    curve::{Handle, Node, Point},
    error::CurveError,
};

/// Slack allowed when checking invariants, absorbing f32 rounding in the
/// offset/absolute conversions.
pub(crate) const TOLERANCE: f32 = 1.0e-5;

/// The editable transfer curve.
///
/// Always holds at least two nodes, pinned to x = -1 and x = 1, with
/// strictly increasing endpoint x. Only the constraint engine and preset
/// swaps mutate a curve once it exists, so every public constructor
/// validates and every crate-internal mutation is checked in debug builds.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    nodes: Vec<Node>,
}

impl Curve {
    /// Build a curve from untrusted nodes.
    pub fn new(nodes: Vec<Node>) -> Result<Self, CurveError> {
        validate_nodes(&nodes)?;
        Ok(Self { nodes })
    }

    /// The default curve: identity line through x = -1, 0, 1.
    pub fn bypass() -> Self {
        Self::identity(3).unwrap_or_else(|_| unreachable!("three nodes always form a curve"))
    }

    /// An identity-like curve with `node_count` evenly spaced nodes.
    ///
    /// Every handle points one third of the way to its neighbour along the
    /// diagonal, so the curve starts out as y = x.
    pub fn identity(node_count: usize) -> Result<Self, CurveError> {
        if node_count < 2 {
            return Err(CurveError::TooFewNodes { count: node_count });
        }

        let last = node_count - 1;
        let spacing = 2.0 / last as f32;
        let third = Point::new(spacing / 3.0, spacing / 3.0);

        let nodes = (0..node_count)
            .map(|i| {
                let x = if i == last { 1.0 } else { -1.0 + i as f32 * spacing };
                let end_point = Point::new(x, x);
                let control_in = if i == 0 { Point::ZERO } else { -third };
                let control_out = if i == last { Point::ZERO } else { third };
                Node::new(end_point, control_in, control_out)
            })
            .collect();

        Self::new(nodes)
    }

    /// Trusted construction for nodes produced by this crate.
    pub(crate) fn from_trusted(nodes: Vec<Node>) -> Self {
        debug_assert_eq!(validate_nodes(&nodes), Ok(()));
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true; a curve always has two nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn first(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn last(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn last_index(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Input range covered by the curve.
    pub fn domain(&self) -> (f32, f32) {
        (self.first().end_point.x, self.last().end_point.x)
    }

    /// Whether `handle` on node `index` shapes a segment.
    ///
    /// The first node's incoming handle and the last node's outgoing handle
    /// sit outside the domain and never do.
    pub fn is_editable(&self, index: usize, handle: Handle) -> bool {
        if index >= self.nodes.len() {
            return false;
        }
        match handle {
            Handle::EndPoint => true,
            Handle::ControlIn => index > 0,
            Handle::ControlOut => index < self.last_index(),
        }
    }

    pub fn validate(&self) -> Result<(), CurveError> {
        validate_nodes(&self.nodes)
    }

    /// Overwrite one node, returning what was there.
    pub(crate) fn set_node(&mut self, index: usize, node: Node) -> Node {
        let previous = std::mem::replace(&mut self.nodes[index], node);
        debug_assert_eq!(self.validate(), Ok(()));
        previous
    }

    /// Replace the whole node list with a copy of `nodes`.
    ///
    /// Reuses the existing allocation where it can.
    pub(crate) fn replace_nodes(&mut self, nodes: &[Node]) {
        debug_assert_eq!(validate_nodes(nodes), Ok(()));
        self.nodes.clear();
        self.nodes.extend_from_slice(nodes);
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::bypass()
    }
}

impl TryFrom<Vec<Node>> for Curve {
    type Error = CurveError;

    fn try_from(nodes: Vec<Node>) -> Result<Self, Self::Error> {
        Curve::new(nodes)
    }
}

/// Check every model invariant on a node list.
pub fn validate_nodes(nodes: &[Node]) -> Result<(), CurveError> {
    if nodes.len() < 2 {
        return Err(CurveError::TooFewNodes { count: nodes.len() });
    }

    if let Some(index) = nodes.iter().position(|n| !n.is_finite()) {
        return Err(CurveError::NonFinite { index });
    }

    let first = nodes[0].end_point.x;
    if first != -1.0 {
        return Err(CurveError::DomainStart { x: first });
    }
    let end = nodes[nodes.len() - 1].end_point.x;
    if end != 1.0 {
        return Err(CurveError::DomainEnd { x: end });
    }

    let last = nodes.len() - 1;
    for (index, node) in nodes.iter().enumerate() {
        check_y(index, Handle::EndPoint, node.end_point.y)?;

        if index > 0 {
            let prev = &nodes[index - 1];
            if node.end_point.x <= prev.end_point.x {
                return Err(CurveError::NonMonotonic { index });
            }
            if node.control_in.x > 0.0 {
                return Err(CurveError::ControlReversed {
                    index,
                    handle: Handle::ControlIn,
                });
            }
            if node.control_in_absolute().x < prev.end_point.x - TOLERANCE {
                return Err(CurveError::ControlCrossesNeighbour {
                    index,
                    handle: Handle::ControlIn,
                });
            }
            check_y(index, Handle::ControlIn, node.control_in_absolute().y)?;
        }

        if index < last {
            let next = &nodes[index + 1];
            if node.control_out.x < 0.0 {
                return Err(CurveError::ControlReversed {
                    index,
                    handle: Handle::ControlOut,
                });
            }
            if node.control_out_absolute().x > next.end_point.x + TOLERANCE {
                return Err(CurveError::ControlCrossesNeighbour {
                    index,
                    handle: Handle::ControlOut,
                });
            }
            check_y(index, Handle::ControlOut, node.control_out_absolute().y)?;
        }
    }

    Ok(())
}

fn check_y(index: usize, handle: Handle, y: f32) -> Result<(), CurveError> {
    if (-1.0 - TOLERANCE..=1.0 + TOLERANCE).contains(&y) {
        Ok(())
    } else {
        Err(CurveError::OutOfRange { index, handle, y })
    }
}
