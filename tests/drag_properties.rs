//! Property tests for the drag constraints.
//!
//! Random gesture sequences on random curves must never leave the curve
//! invalid, no matter where the pointer goes.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test drag_properties
//! ```

use proptest::prelude::*;

use orioto_dsp::{
    curve::{evaluate, Curve, CurveEvaluator, Handle, Parameterization, Point},
    edit::{ConstraintEngine, ControlPointMode, DragTarget},
    table::TransferTable,
};

/// Slack for float rounding between offsets and absolute positions.
const SLACK: f32 = 1.0e-5;

#[derive(Debug, Clone)]
struct Gesture {
    node: usize,
    handle: Handle,
    moves: Vec<Point>,
}

fn handle() -> impl Strategy<Value = Handle> {
    prop_oneof![
        Just(Handle::EndPoint),
        Just(Handle::ControlIn),
        Just(Handle::ControlOut),
    ]
}

/// Pointer positions, well outside the unit square some of the time.
fn position() -> impl Strategy<Value = Point> {
    (-3.0f32..3.0, -3.0f32..3.0).prop_map(|(x, y)| Point::new(x, y))
}

fn gesture() -> impl Strategy<Value = Gesture> {
    (0usize..16, handle(), prop::collection::vec(position(), 1..6))
        .prop_map(|(node, handle, moves)| Gesture { node, handle, moves })
}

fn mode() -> impl Strategy<Value = ControlPointMode> {
    prop_oneof![
        Just(ControlPointMode::Independent),
        Just(ControlPointMode::Mirrored),
    ]
}

/// Run `gestures` against an identity curve of `node_count` nodes.
///
/// Gestures on missing nodes or inert handles are rejected and skipped,
/// exactly as a UI would see them. `check` runs after every move.
fn run_gestures(
    node_count: usize,
    mode: ControlPointMode,
    gestures: &[Gesture],
    mut check: impl FnMut(&Curve) -> Result<(), TestCaseError>,
) -> Result<Curve, TestCaseError> {
    let mut curve = Curve::identity(node_count).unwrap();
    let mut engine = ConstraintEngine::new(mode);

    for gesture in gestures {
        let target = DragTarget::new(gesture.node % (node_count + 1), gesture.handle);
        if engine.begin(&curve, target).is_err() {
            prop_assert!(!engine.is_dragging());
            continue;
        }
        for &position in &gesture.moves {
            engine.drag(&mut curve, position).unwrap();
            check(&curve)?;
        }
        engine.end().unwrap();
    }

    Ok(curve)
}

proptest! {
    /// The curve passes full validation after every move.
    #[test]
    fn drags_keep_curve_valid(
        node_count in 2usize..8,
        mode in mode(),
        gestures in prop::collection::vec(gesture(), 1..12),
    ) {
        run_gestures(node_count, mode, &gestures, |curve| {
            prop_assert_eq!(curve.validate(), Ok(()));
            Ok(())
        })?;
    }

    /// Endpoint x strictly increases and the domain stays pinned.
    #[test]
    fn endpoints_stay_ordered(
        node_count in 2usize..8,
        mode in mode(),
        gestures in prop::collection::vec(gesture(), 1..12),
    ) {
        run_gestures(node_count, mode, &gestures, |curve| {
            prop_assert_eq!(curve.domain(), (-1.0, 1.0));
            for pair in curve.nodes().windows(2) {
                prop_assert!(pair[0].end_point.x < pair[1].end_point.x);
            }
            Ok(())
        })?;
    }

    /// No handle reaches past the neighbouring endpoint.
    #[test]
    fn handles_never_cross_neighbours(
        node_count in 2usize..8,
        mode in mode(),
        gestures in prop::collection::vec(gesture(), 1..12),
    ) {
        run_gestures(node_count, mode, &gestures, |curve| {
            let nodes = curve.nodes();
            for (i, pair) in nodes.windows(2).enumerate() {
                let (left, right) = (&pair[0], &pair[1]);
                prop_assert!(
                    left.control_out_absolute().x <= right.end_point.x + SLACK,
                    "node {} outgoing handle crosses node {}", i, i + 1
                );
                prop_assert!(
                    right.control_in_absolute().x >= left.end_point.x - SLACK,
                    "node {} incoming handle crosses node {}", i + 1, i
                );
                prop_assert!(left.control_out.x >= 0.0);
                prop_assert!(right.control_in.x <= 0.0);
            }
            Ok(())
        })?;
    }

    /// Mirrored drags leave the two handles of the dragged node exact mirrors,
    /// whether a handle or the endpoint itself is moved.
    #[test]
    fn mirrored_handles_stay_mirrored(
        node_count in 3usize..8,
        node in 1usize..7,
        handle in handle(),
        moves in prop::collection::vec(position(), 1..6),
    ) {
        let node = node.min(node_count - 2);
        let gesture = Gesture { node, handle, moves };

        run_gestures(node_count, ControlPointMode::Mirrored, &[gesture], |curve| {
            let dragged = curve.nodes()[node];
            prop_assert_eq!(dragged.control_in, -dragged.control_out);
            Ok(())
        })?;
    }

    /// Whatever the shape, the curve hits its endpoints and stays in range.
    #[test]
    fn evaluation_hits_endpoints_and_stays_in_range(
        node_count in 2usize..8,
        mode in mode(),
        gestures in prop::collection::vec(gesture(), 1..8),
        probes in prop::collection::vec(-1.5f32..1.5, 16),
    ) {
        let curve = run_gestures(node_count, mode, &gestures, |_| Ok(()))?;

        prop_assert_eq!(evaluate(&curve, -1.0), curve.first().end_point.y);
        prop_assert_eq!(evaluate(&curve, 1.0), curve.last().end_point.y);

        let exact = CurveEvaluator::with_parameterization(&curve, Parameterization::Exact);
        for x in probes {
            let linear = evaluate(&curve, x);
            prop_assert!((-1.0..=1.0).contains(&linear));
            prop_assert!((-1.0..=1.0).contains(&exact.evaluate(x)));
        }
    }

    /// The table follows the evaluator between its sample points too.
    #[test]
    fn table_matches_evaluator_between_samples(
        node_count in 2usize..8,
        gestures in prop::collection::vec(gesture(), 1..8),
        probes in prop::collection::vec(-1.0f32..1.0, 64),
    ) {
        let curve = run_gestures(node_count, ControlPointMode::Independent, &gestures, |_| Ok(()))?;
        let evaluator = CurveEvaluator::new(&curve);
        let table = TransferTable::build(&evaluator, 256).unwrap();

        // Between two samples the lerp and the curve both stay within
        // slope * spacing of the left sample.
        let spacing = 2.0 / (table.resolution() - 1) as f32;
        let epsilon = max_slope(&curve) * spacing + 1.0e-4;

        let midpoints = (0..table.resolution() - 1).map(|i| table.x_at(i) + 0.5 * spacing);
        for x in midpoints.chain(probes) {
            let difference = (table.lookup(x) - evaluator.evaluate(x)).abs();
            prop_assert!(
                difference <= epsilon,
                "x = {}: difference {} over bound {}", x, difference, epsilon
            );
        }
    }
}

/// Upper bound on |dy/dx| of the linearly parameterized curve.
///
/// On each segment dy/dt is at most three times the largest step between
/// consecutive control y values, and t advances as x / segment width.
fn max_slope(curve: &Curve) -> f32 {
    curve
        .nodes()
        .windows(2)
        .map(|pair| {
            let (left, right) = (&pair[0], &pair[1]);
            let ys = [
                left.end_point.y,
                left.control_out_absolute().y,
                right.control_in_absolute().y,
                right.end_point.y,
            ];
            let step = ys.windows(2).map(|w| (w[1] - w[0]).abs()).fold(0.0, f32::max);
            3.0 * step / (right.end_point.x - left.end_point.x)
        })
        .fold(0.0, f32::max)
}
