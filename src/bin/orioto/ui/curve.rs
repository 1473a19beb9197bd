//! Transfer curve widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use orioto_dsp::{curve::Handle, edit::DragTarget, session::CurveSession};

/// Points sampled along the curve for drawing.
const CURVE_RESOLUTION: usize = 256;

/// Render the curve, its handles and the selected point
pub fn render_curve(frame: &mut Frame, area: Rect, session: &CurveSession, selected: DragTarget) {
    let block = Block::default()
        .title(" Transfer curve ")
        .borders(Borders::ALL);

    let identity = [(-1.0, -1.0), (1.0, 1.0)];

    let curve: Vec<(f64, f64)> = (0..CURVE_RESOLUTION)
        .map(|i| {
            let x = -1.0 + 2.0 * i as f32 / (CURVE_RESOLUTION - 1) as f32;
            (x as f64, session.evaluate(x) as f64)
        })
        .collect();

    let nodes = session.nodes();
    let last = nodes.len() - 1;

    let endpoints: Vec<(f64, f64)> = nodes
        .iter()
        .map(|n| (n.end_point.x as f64, n.end_point.y as f64))
        .collect();

    // Each handle is drawn as a short line from its endpoint.
    let handle_lines: Vec<[(f64, f64); 2]> = nodes
        .iter()
        .enumerate()
        .flat_map(|(i, node)| {
            let end = (node.end_point.x as f64, node.end_point.y as f64);
            let incoming = (i > 0).then(|| {
                let p = node.control_in_absolute();
                [end, (p.x as f64, p.y as f64)]
            });
            let outgoing = (i < last).then(|| {
                let p = node.control_out_absolute();
                [end, (p.x as f64, p.y as f64)]
            });
            incoming.into_iter().chain(outgoing)
        })
        .collect();

    let selected_point: Vec<(f64, f64)> = session
        .node(selected.node)
        .map(|node| {
            let p = node.absolute(selected.handle);
            (p.x as f64, p.y as f64)
        })
        .into_iter()
        .collect();

    let mut datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&identity),
    ];
    datasets.extend(handle_lines.iter().map(|line| {
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(line)
    }));
    datasets.push(
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&curve),
    );
    datasets.push(
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::White))
            .data(&endpoints),
    );
    datasets.push(
        Dataset::default()
            .name(handle_label(selected.handle))
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&selected_point),
    );

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("in")
                .bounds([-1.0, 1.0])
                .labels(vec!["-1", "0", "1"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .title("out")
                .bounds([-1.0, 1.0])
                .labels(vec!["-1", "0", "1"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

fn handle_label(handle: Handle) -> &'static str {
    match handle {
        Handle::EndPoint => "node",
        Handle::ControlIn => "in",
        Handle::ControlOut => "out",
    }
}
