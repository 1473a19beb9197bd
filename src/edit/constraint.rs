#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    curve::{Curve, Handle, Node, Point},
    MIN_NODE_GAP,
};

/*
Drag Constraints
================

While a point is dragged, the pointer can go anywhere. The curve cannot: it
has to stay a function of x that lives inside the unit square. Every pointer
move is therefore corrected to the nearest legal geometry before it reaches
the model.

Only the dragged node and its two neighbours are consulted, so a correction
costs the same on a 3-node curve as on a 300-node one.


Endpoints
---------

The first and last endpoints are pinned to x = -1 and x = 1; only their y
moves. An interior endpoint E carries its handles with it, and has to stay
inside a window set by its neighbours:

        prev                     E                      next
         ●──────○ · · · · ○──────●──────○ · · · · ○──────●
                │         │             │         │
       prev.out ┘   E.in  ┘       E.out ┘ next.in ┘

    lower bound = max( prev.x + gap,      E cannot reach prev
                       prev.out.x,        prev's handle cannot pass E
                       prev.x - E.in.dx ) E's handle cannot pass prev
    upper bound = min( next.x - gap,
                       next.in.x,
                       next.x - E.out.dx )

If the neighbours leave no window at all, x stays where it was when the
gesture began.


Handles
-------

A handle is dragged as an absolute point and written back as an offset:

    outgoing    0 <= dx,  E.x + dx <= next.x
    incoming    dx <= 0,  prev.x <= E.x + dx

The y offset is free as long as the absolute y stays inside [-1, 1]: a handle
may pull the curve into steep bends, it may never fold it back on itself.


Mirrored handles
----------------

In mirrored mode the opposite handle is written as the exact negation of the
dragged one, which keeps the junction smooth:

            in = -out
        ○───────●───────○

The mirror has to obey its own bounds too. When it would not, both handles
are shortened by the same factor until it does, so the junction stays
mirrored rather than bending.

Moving the endpoint of a mirrored node works the same way: if either handle
would leave the unit square, both are shortened by the one factor that
brings the worse of the two back inside.
*/

/// How the two handles of a node relate while one of them is dragged.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlPointMode {
    /// Each handle moves on its own; corners are allowed.
    #[default]
    Independent,
    /// The opposite handle mirrors the dragged one through the endpoint.
    Mirrored,
}

/// A draggable point: one handle of one node.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragTarget {
    pub node: usize,
    pub handle: Handle,
}

impl DragTarget {
    pub fn new(node: usize, handle: Handle) -> Self {
        Self { node, handle }
    }

    pub fn end_point(node: usize) -> Self {
        Self::new(node, Handle::EndPoint)
    }

    pub fn control_in(node: usize) -> Self {
        Self::new(node, Handle::ControlIn)
    }

    pub fn control_out(node: usize) -> Self {
        Self::new(node, Handle::ControlOut)
    }
}

/// Corrected version of `origin` with `target` moved as close to `proposed`
/// as the curve allows.
///
/// `origin` is the node as it was when the gesture began; `curve` supplies
/// the neighbours. The target must be editable on `curve`.
pub fn constrain(
    curve: &Curve,
    target: DragTarget,
    origin: &Node,
    proposed: Point,
    mode: ControlPointMode,
) -> Node {
    debug_assert!(curve.is_editable(target.node, target.handle));

    match target.handle {
        Handle::EndPoint => constrain_end_point(curve, target.node, origin, proposed, mode),
        handle => constrain_handle(curve, target.node, handle, origin, proposed, mode),
    }
}

fn constrain_end_point(
    curve: &Curve,
    index: usize,
    origin: &Node,
    proposed: Point,
    mode: ControlPointMode,
) -> Node {
    let nodes = curve.nodes();
    let last = curve.last_index();
    let current = origin.end_point;

    let y = finite_or(proposed.y, current.y).clamp(-1.0, 1.0);
    let x = if index == 0 || index == last {
        current.x
    } else {
        let prev = &nodes[index - 1];
        let next = &nodes[index + 1];

        let lower = (prev.end_point.x + MIN_NODE_GAP)
            .max(prev.control_out_absolute().x)
            .max(prev.end_point.x - origin.control_in.x);
        let upper = (next.end_point.x - MIN_NODE_GAP)
            .min(next.control_in_absolute().x)
            .min(next.end_point.x - origin.control_out.x);

        if lower <= upper {
            finite_or(proposed.x, current.x).clamp(lower, upper)
        } else {
            current.x
        }
    };

    let end_point = Point::new(x, y);
    let mut node = *origin;
    node.end_point = end_point;

    let mirrored = mode == ControlPointMode::Mirrored
        && index > 0
        && index < last
        && origin.control_in == -origin.control_out;
    if mirrored {
        let (lo, hi) = offset_x_bounds(curve, index, Handle::ControlOut, end_point);
        let out_scale = mirror_scale(origin.control_out, end_point, lo, hi);
        let (lo, hi) = offset_x_bounds(curve, index, Handle::ControlIn, end_point);
        let in_scale = mirror_scale(origin.control_in, end_point, lo, hi);

        node.control_out = origin.control_out * out_scale.min(in_scale);
        node.control_in = -node.control_out;
        return node;
    }

    if index > 0 {
        node.control_in = clamp_offset_y(end_point, origin.control_in);
    }
    if index < last {
        node.control_out = clamp_offset_y(end_point, origin.control_out);
    }
    node
}

fn constrain_handle(
    curve: &Curve,
    index: usize,
    handle: Handle,
    origin: &Node,
    proposed: Point,
    mode: ControlPointMode,
) -> Node {
    let end_point = origin.end_point;
    let current = origin.absolute(handle);
    let proposed = Point::new(
        finite_or(proposed.x, current.x),
        finite_or(proposed.y, current.y),
    );

    let mut offset = constrain_offset(curve, index, handle, end_point, proposed - end_point);
    let mut node = *origin;

    let mirror = match (mode, handle.opposite()) {
        (ControlPointMode::Mirrored, Some(opposite)) if curve.is_editable(index, opposite) => {
            Some(opposite)
        }
        _ => None,
    };

    if let Some(opposite) = mirror {
        let (lo, hi) = offset_x_bounds(curve, index, opposite, end_point);
        offset = offset * mirror_scale(-offset, end_point, lo, hi);
        set_offset(&mut node, opposite, -offset);
    }
    set_offset(&mut node, handle, offset);
    node
}

/// Allowed range of a handle's x offset.
fn offset_x_bounds(curve: &Curve, index: usize, handle: Handle, end_point: Point) -> (f32, f32) {
    let nodes = curve.nodes();
    match handle {
        Handle::ControlOut => (0.0, (nodes[index + 1].end_point.x - end_point.x).max(0.0)),
        Handle::ControlIn => ((nodes[index - 1].end_point.x - end_point.x).min(0.0), 0.0),
        Handle::EndPoint => (0.0, 0.0),
    }
}

fn constrain_offset(
    curve: &Curve,
    index: usize,
    handle: Handle,
    end_point: Point,
    offset: Point,
) -> Point {
    let (lo, hi) = offset_x_bounds(curve, index, handle, end_point);
    clamp_offset_y(end_point, Point::new(offset.x.clamp(lo, hi), offset.y))
}

/// Keep the absolute y of a handle inside [-1, 1].
fn clamp_offset_y(end_point: Point, offset: Point) -> Point {
    let y = end_point.y + offset.y;
    if (-1.0..=1.0).contains(&y) {
        offset
    } else {
        Point::new(offset.x, y.clamp(-1.0, 1.0) - end_point.y)
    }
}

/// Largest factor in [0, 1] that brings `mirrored` inside its bounds.
///
/// Every bound contains the zero offset, so shrinking towards the endpoint
/// always succeeds.
fn mirror_scale(mirrored: Point, end_point: Point, lo: f32, hi: f32) -> f32 {
    let mut scale = 1.0_f32;

    if mirrored.x > hi {
        scale = scale.min(hi / mirrored.x);
    } else if mirrored.x < lo {
        scale = scale.min(lo / mirrored.x);
    }

    let y = end_point.y + mirrored.y;
    if y > 1.0 {
        scale = scale.min((1.0 - end_point.y) / mirrored.y);
    } else if y < -1.0 {
        scale = scale.min((-1.0 - end_point.y) / mirrored.y);
    }

    scale.clamp(0.0, 1.0)
}

fn set_offset(node: &mut Node, handle: Handle, offset: Point) {
    match handle {
        Handle::ControlIn => node.control_in = offset,
        Handle::ControlOut => node.control_out = offset,
        Handle::EndPoint => {}
    }
}

#[inline]
fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
