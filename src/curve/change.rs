use super::{Curve, Node};

/// What happened to a curve, as seen by observers.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveChange {
    /// A single node moved (endpoint or handle).
    Node {
        index: usize,
        previous: Node,
        current: Node,
    },
    /// The whole node list was swapped out (preset load, new curve).
    Replaced { node_count: usize },
}

impl CurveChange {
    /// The x span a renderer has to redraw after this change.
    ///
    /// A moved node reshapes the segments on both sides of it, so the span
    /// runs from the previous endpoint to the next one. `curve` is the
    /// curve after the change.
    pub fn dirty_range(&self, curve: &Curve) -> (f32, f32) {
        match self {
            CurveChange::Node { index, .. } => {
                let nodes = curve.nodes();
                let lo = index.saturating_sub(1);
                let hi = (index + 1).min(nodes.len() - 1);
                (nodes[lo].end_point.x, nodes[hi].end_point.x)
            }
            CurveChange::Replaced { .. } => curve.domain(),
        }
    }
}

/// Receives a callback whenever the curve changes.
pub trait CurveObserver: Send {
    fn curve_changed(&mut self, curve: &Curve, change: &CurveChange);
}

/// Closures work as observers.
impl<F> CurveObserver for F
where
    F: FnMut(&Curve, &CurveChange) + Send,
{
    fn curve_changed(&mut self, curve: &Curve, change: &CurveChange) {
        self(curve, change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_change_dirties_neighbouring_segments() {
        let curve = Curve::identity(5).unwrap();
        let node = *curve.node(2).unwrap();
        let change = CurveChange::Node {
            index: 2,
            previous: node,
            current: node,
        };
        assert_eq!(change.dirty_range(&curve), (-0.5, 0.5));
    }

    #[test]
    fn test_edge_node_change_is_clamped_to_domain() {
        let curve = Curve::identity(5).unwrap();
        let node = *curve.first();
        let change = CurveChange::Node {
            index: 0,
            previous: node,
            current: node,
        };
        assert_eq!(change.dirty_range(&curve), (-1.0, -0.5));
    }

    #[test]
    fn test_replacement_dirties_everything() {
        let curve = Curve::bypass();
        let change = CurveChange::Replaced { node_count: 3 };
        assert_eq!(change.dirty_range(&curve), (-1.0, 1.0));
    }
}
