//! Benchmarks for control-thread curve work.

mod constrain;
mod evaluate;
mod rebuild;

pub use constrain::bench_constrain;
pub use evaluate::bench_evaluate;
pub use rebuild::bench_rebuild;

use orioto_dsp::{Curve, Node, Point};

/// A bent curve with `node_count` nodes, handles pulled off the diagonal.
pub fn bent_curve(node_count: usize) -> Curve {
    let identity = Curve::identity(node_count).expect("at least two nodes");
    let last = node_count - 1;
    let nodes = identity
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let y = (node.end_point.x * 2.5).tanh() / 2.5f32.tanh();
            // Shrinks near the rails so handles stay inside [-1, 1].
            let lift = 0.1 * (1.0 - y.abs());
            Node::new(
                Point::new(node.end_point.x, y),
                if i == 0 { Point::ZERO } else { Point::new(node.control_in.x, -lift) },
                if i == last { Point::ZERO } else { Point::new(node.control_out.x, lift) },
            )
        })
        .collect();
    Curve::new(nodes).expect("bent curve is valid")
}
