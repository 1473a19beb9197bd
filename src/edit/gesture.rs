use log::{debug, warn};

use super::constraint::{constrain, ControlPointMode, DragTarget};
use crate::{
    curve::{Curve, CurveChange, Node, Point},
    error::EditError,
};

/// Where the engine is in a press/drag/release cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Dragging {
        target: DragTarget,
        /// The node as it was at press time. Every move is corrected from
        /// here, so clamping never accumulates.
        origin: Node,
    },
}

/// Applies pointer gestures to a curve while keeping it well formed.
///
/// One gesture at a time: `begin` on press, `drag` on every move, `end` on
/// release.
#[derive(Debug, Clone)]
pub struct ConstraintEngine {
    mode: ControlPointMode,
    state: GestureState,
}

impl ConstraintEngine {
    pub fn new(mode: ControlPointMode) -> Self {
        Self {
            mode,
            state: GestureState::Idle,
        }
    }

    pub fn mode(&self) -> ControlPointMode {
        self.mode
    }

    /// Takes effect from the next move, including mid-gesture.
    pub fn set_mode(&mut self, mode: ControlPointMode) {
        self.mode = mode;
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// The point being dragged, if any.
    pub fn target(&self) -> Option<DragTarget> {
        match self.state {
            GestureState::Dragging { target, .. } => Some(target),
            GestureState::Idle => None,
        }
    }

    /// Pointer press on `target`.
    ///
    /// A press while another gesture is active abandons that gesture where
    /// it stands and starts the new one.
    pub fn begin(&mut self, curve: &Curve, target: DragTarget) -> Result<(), EditError> {
        check_target(curve, target).inspect_err(|err| warn!("rejected press: {err}"))?;

        if let Some(previous) = self.target() {
            debug!("press on {target:?} replaces unfinished drag of {previous:?}");
        }

        self.state = GestureState::Dragging {
            target,
            origin: curve.nodes()[target.node],
        };
        debug!("drag started on {target:?}");
        Ok(())
    }

    /// Pointer move to `proposed` (absolute, curve coordinates).
    ///
    /// Writes the corrected node into `curve`. Returns `None` when the
    /// correction leaves the node where it already is.
    pub fn drag(
        &mut self,
        curve: &mut Curve,
        proposed: Point,
    ) -> Result<Option<CurveChange>, EditError> {
        let GestureState::Dragging { target, origin } = self.state else {
            return Err(EditError::NotDragging);
        };

        if let Err(err) = check_target(curve, target) {
            // The curve was swapped out from under the gesture.
            self.state = GestureState::Idle;
            warn!("dropping drag: {err}");
            return Err(err);
        }

        let corrected = constrain(curve, target, &origin, proposed, self.mode);
        Ok(write_node(curve, target.node, corrected))
    }

    /// Pointer release.
    pub fn end(&mut self) -> Result<(), EditError> {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Dragging { target, .. } => {
                debug!("drag finished on {target:?}");
                Ok(())
            }
            GestureState::Idle => Err(EditError::NotDragging),
        }
    }

    /// Drop any gesture in progress without touching the curve.
    ///
    /// Used when the curve is replaced under the pointer.
    pub fn abandon(&mut self) {
        if let GestureState::Dragging { target, .. } =
            std::mem::replace(&mut self.state, GestureState::Idle)
        {
            debug!("drag abandoned on {target:?}");
        }
    }

    /// Abandon the gesture and put the node back where it was at press time.
    pub fn cancel(&mut self, curve: &mut Curve) -> Result<Option<CurveChange>, EditError> {
        let GestureState::Dragging { target, origin } =
            std::mem::replace(&mut self.state, GestureState::Idle)
        else {
            return Err(EditError::NotDragging);
        };

        check_target(curve, target)?;
        debug!("drag cancelled on {target:?}");
        Ok(write_node(curve, target.node, origin))
    }
}

impl Default for ConstraintEngine {
    fn default() -> Self {
        Self::new(ControlPointMode::default())
    }
}

fn check_target(curve: &Curve, target: DragTarget) -> Result<(), EditError> {
    if target.node >= curve.len() {
        return Err(EditError::UnknownNode {
            index: target.node,
            len: curve.len(),
        });
    }
    if !curve.is_editable(target.node, target.handle) {
        return Err(EditError::InertHandle {
            index: target.node,
            handle: target.handle,
        });
    }
    Ok(())
}

fn write_node(curve: &mut Curve, index: usize, node: Node) -> Option<CurveChange> {
    if curve.nodes()[index] == node {
        return None;
    }
    let previous = curve.set_node(index, node);
    Some(CurveChange::Node {
        index,
        previous,
        current: node,
    })
}
