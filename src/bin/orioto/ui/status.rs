//! Status bar - preset, selection, handle mode and blend

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use orioto_dsp::edit::{ControlPointMode, DragTarget};

/// Everything the status bar shows
pub struct StatusLine<'a> {
    pub preset_name: &'a str,
    pub preset_index: usize,
    pub selected: DragTarget,
    pub mode: ControlPointMode,
    pub mix: f32,
    pub bypassed: bool,
    pub generation: u64,
    pub message: &'a str,
}

/// Render the status bar
pub fn render_status(frame: &mut Frame, area: Rect, status: &StatusLine<'_>) {
    let block = Block::default()
        .title(" orioto ")
        .borders(Borders::ALL);

    let mode = match status.mode {
        ControlPointMode::Independent => "free",
        ControlPointMode::Mirrored => "mirrored",
    };
    let bypass = if status.bypassed { "BYPASS" } else { "active" };
    let bypass_color = if status.bypassed {
        Color::Red
    } else {
        Color::Green
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {}: {}  ", status.preset_index, status.preset_name),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!(
                "node {} {}  ",
                status.selected.node, status.selected.handle
            ),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(format!("handles: {mode}  ")),
        Span::raw(format!("blend: {:>3.0}%  ", status.mix * 100.0)),
        Span::styled(format!("{bypass}  "), Style::default().fg(bypass_color)),
        Span::styled(
            format!("table #{}  ", status.generation),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(status.message, Style::default().fg(Color::White)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
