#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Curve, Node, Point};

/*
Curve Evaluation
================

The transfer curve is a chain of cubic Bézier segments, one between each pair
of neighbouring nodes. Evaluating it means answering "for this input sample x,
what is the output y?".

Vocabulary
----------

  segment     The piece of curve between node i and node i+1. Four points
              define it:

                P0 = left endpoint
                P1 = left endpoint + left outgoing offset
                P2 = right endpoint + right incoming offset
                P3 = right endpoint

  parameter   The Bézier variable t in [0, 1]. t = 0 sits on P0, t = 1 on P3.
              Both x and y of the segment are cubics in t.

  bracket     The segment whose endpoints straddle the query x.


De Casteljau
------------

A cubic is evaluated by repeated linear interpolation:

    P0 ────── P1 ────── P2 ────── P3
        a          b          c         (lerp neighbours at t)
             d           e              (lerp again)
                   f                    (and again: the curve point)

Three rounds of lerps, no powers of t, numerically well behaved.


From x to t
-----------

We are given x, but the Bézier is parameterized by t. Two strategies:

  Linear    t = (x - P0.x) / (P3.x - P0.x)

            Cheap, and exact when the handles are spaced evenly in x (the
            identity curve, for example). Otherwise the curve is sampled with
            a slight horizontal warp. This is what the curve editor has
            always drawn and what users tune by ear.

  Exact     Solve x(t) = x with Newton steps, falling back to bisection
            whenever a step would leave the bracket. Matches the drawn
            geometry exactly at a few extra multiplies per sample.

Either way the result is clamped to [-1, 1] before it leaves the segment.
*/

/// How an input x is turned into the Bézier parameter t.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parameterization {
    /// Linear renormalization across the segment.
    #[default]
    Linear,
    /// Numerical inversion of the segment's x(t).
    Exact,
}

const NEWTON_ITERATIONS: usize = 16;
const NEWTON_TOLERANCE: f32 = 1.0e-6;

/// Absolute control points of one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl Segment {
    pub fn between(left: &Node, right: &Node) -> Self {
        Self {
            p0: left.end_point,
            p1: left.control_out_absolute(),
            p2: right.control_in_absolute(),
            p3: right.end_point,
        }
    }

    /// Curve point at parameter `t`.
    #[inline]
    pub fn point_at(&self, t: f32) -> Point {
        let a = self.p0.lerp(self.p1, t);
        let b = self.p1.lerp(self.p2, t);
        let c = self.p2.lerp(self.p3, t);
        let d = a.lerp(b, t);
        let e = b.lerp(c, t);
        d.lerp(e, t)
    }

    /// Output y for an input `x` inside the segment, clamped to [-1, 1].
    #[inline]
    pub fn y_at(&self, x: f32, parameterization: Parameterization) -> f32 {
        let width = self.p3.x - self.p0.x;
        if width.abs() <= f32::EPSILON {
            return self.p0.y.clamp(-1.0, 1.0);
        }

        let linear = ((x - self.p0.x) / width).clamp(0.0, 1.0);
        let t = match parameterization {
            Parameterization::Linear => linear,
            Parameterization::Exact => self.solve_t(x, linear),
        };

        self.point_at(t).y.clamp(-1.0, 1.0)
    }

    fn x_and_slope(&self, t: f32) -> (f32, f32) {
        let (c0, c1, c2, c3) = (self.p0.x, self.p1.x, self.p2.x, self.p3.x);
        let u = 1.0 - t;
        let x = u * u * u * c0 + 3.0 * u * u * t * c1 + 3.0 * u * t * t * c2 + t * t * t * c3;
        let slope = 3.0 * u * u * (c1 - c0) + 6.0 * u * t * (c2 - c1) + 3.0 * t * t * (c3 - c2);
        (x, slope)
    }

    /// Newton iteration on x(t) = x, kept inside a shrinking bracket.
    ///
    /// The bracket keeps x(lo) <= x <= x(hi), which holds even when the
    /// handles make x(t) non-monotonic.
    fn solve_t(&self, x: f32, guess: f32) -> f32 {
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        let mut t = guess;

        for _ in 0..NEWTON_ITERATIONS {
            let (xt, slope) = self.x_and_slope(t);
            let error = xt - x;
            if error.abs() < NEWTON_TOLERANCE {
                break;
            }
            if error > 0.0 {
                hi = t;
            } else {
                lo = t;
            }

            let step = if slope.abs() > f32::EPSILON {
                t - error / slope
            } else {
                f32::NAN
            };
            t = if step > lo && step < hi {
                step
            } else {
                0.5 * (lo + hi)
            };
        }

        t
    }
}

/// Evaluate `curve` at `x` without caching anything.
///
/// `x` outside the curve domain is clamped to the nearest bound.
pub fn evaluate(curve: &Curve, x: f32) -> f32 {
    evaluate_nodes(curve.nodes(), x, Parameterization::Linear)
}

fn evaluate_nodes(nodes: &[Node], x: f32, parameterization: Parameterization) -> f32 {
    let x = clamp_to_domain(x, nodes[0].end_point.x, nodes[nodes.len() - 1].end_point.x);

    match nodes.windows(2).find(|pair| pair[1].end_point.x >= x) {
        Some(pair) => Segment::between(&pair[0], &pair[1]).y_at(x, parameterization),
        None => {
            debug_assert!(false, "no segment brackets x = {x}");
            nodes[nodes.len() - 1].end_point.y.clamp(-1.0, 1.0)
        }
    }
}

#[inline]
fn clamp_to_domain(x: f32, lo: f32, hi: f32) -> f32 {
    if x.is_nan() {
        0.0_f32.clamp(lo, hi)
    } else {
        x.clamp(lo, hi)
    }
}

/// Curve evaluation against a flattened copy of the curve.
///
/// Holds the absolute control points of every segment so evaluation never
/// re-derives them from node offsets. Call [`CurveEvaluator::reset`] after
/// the curve changes.
#[derive(Debug, Clone)]
pub struct CurveEvaluator {
    segments: Vec<Segment>,
    parameterization: Parameterization,
}

impl CurveEvaluator {
    pub fn new(curve: &Curve) -> Self {
        Self::with_parameterization(curve, Parameterization::default())
    }

    pub fn with_parameterization(curve: &Curve, parameterization: Parameterization) -> Self {
        let mut evaluator = Self {
            segments: Vec::with_capacity(curve.len() - 1),
            parameterization,
        };
        evaluator.reset(curve);
        evaluator
    }

    /// Refresh the cached segments from `curve`.
    pub fn reset(&mut self, curve: &Curve) {
        self.segments.clear();
        self.segments.extend(
            curve
                .nodes()
                .windows(2)
                .map(|pair| Segment::between(&pair[0], &pair[1])),
        );
    }

    pub fn parameterization(&self) -> Parameterization {
        self.parameterization
    }

    pub fn set_parameterization(&mut self, parameterization: Parameterization) {
        self.parameterization = parameterization;
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn domain(&self) -> (f32, f32) {
        let lo = self.segments[0].p0.x;
        let hi = self.segments[self.segments.len() - 1].p3.x;
        (lo, hi)
    }

    /// Output y for input `x`, clamped to [-1, 1].
    pub fn evaluate(&self, x: f32) -> f32 {
        let (lo, hi) = self.domain();
        let x = clamp_to_domain(x, lo, hi);

        match self.segments.iter().find(|segment| segment.p3.x >= x) {
            Some(segment) => segment.y_at(x, self.parameterization),
            None => {
                debug_assert!(false, "no segment brackets x = {x}");
                self.segments[self.segments.len() - 1].p3.y.clamp(-1.0, 1.0)
            }
        }
    }
}
