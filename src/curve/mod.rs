//! The curve model: nodes, invariants, change events and evaluation.

/// Change notifications and the observer trait.
pub mod change;
/// Bézier segment evaluation and the cached evaluator.
pub mod evaluate;
/// The validated node list.
pub mod model;
/// Endpoints with their two tangent handles.
pub mod node;
/// 2D points in normalized curve space.
pub mod point;

pub use change::{CurveChange, CurveObserver};
pub use evaluate::{evaluate, CurveEvaluator, Parameterization, Segment};
pub use model::{validate_nodes, Curve};
pub use node::{Handle, Node};
pub use point::Point;
