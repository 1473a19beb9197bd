//! TUI module for orioto
//!
//! Draws the transfer curve and the shaped tone, and turns key presses into
//! curve gestures.

mod curve;
mod spectrum;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;

use orioto_dsp::{
    curve::{Handle, Point},
    edit::{ControlPointMode, DragTarget},
    session::CurveSession,
    table::PublishOutcome,
    EditError,
};

use curve::render_curve;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, StatusLine};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// How far one arrow press moves the selected point.
const NUDGE: f32 = 0.02;

/// Blend change per `+`/`-` press.
const MIX_STEP: f32 = 0.1;

/// Node count of presets made with `n`.
const NEW_PRESET_NODES: usize = 5;

/// Commands sent from the UI thread to the audio thread
#[derive(Clone, Copy, Debug)]
pub enum ControlMessage {
    SetMix(f32),
    SetBypassed(bool),
}

/// UI application state
pub struct UiApp {
    session: CurveSession,
    /// Shaped samples from the audio thread
    audio_rx: Consumer<f32>,
    control_tx: Producer<ControlMessage>,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    selected_node: usize,
    selected_handle: Handle,
    mix: f32,
    bypassed: bool,
    /// Last thing worth telling the user
    message: String,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        session: CurveSession,
        audio_rx: Consumer<f32>,
        control_tx: Producer<ControlMessage>,
        sample_rate: f32,
    ) -> Self {
        Self {
            session,
            audio_rx,
            control_tx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            selected_node: 1,
            selected_handle: Handle::EndPoint,
            mix: 1.0,
            bypassed: false,
            message: String::from("ready"),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            // A table held back by a slow audio thread goes out once there is
            // room.
            if self.session.flush() == PublishOutcome::Deferred {
                log::debug!("audio thread still behind on tables");
            }

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Poll for new audio samples from ring buffer
    fn poll_audio(&mut self) {
        if self.audio_rx.is_empty() {
            return;
        }

        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
        self.spectrum.update(&self.audio_buffer);
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('[') => self.select_node(self.selected_node.saturating_sub(1)),
            KeyCode::Char(']') => self.select_node(self.selected_node + 1),
            KeyCode::Tab => self.cycle_handle(),
            KeyCode::Left => self.nudge(-NUDGE, 0.0),
            KeyCode::Right => self.nudge(NUDGE, 0.0),
            KeyCode::Up => self.nudge(0.0, NUDGE),
            KeyCode::Down => self.nudge(0.0, -NUDGE),
            KeyCode::Char('m') => self.toggle_mirrored(),
            KeyCode::Char('p') => self.next_preset(),
            KeyCode::Char('n') => self.new_preset(),
            KeyCode::Char('s') => self.store_preset(),
            KeyCode::Char('b') => {
                self.bypassed = !self.bypassed;
                self.send(ControlMessage::SetBypassed(self.bypassed));
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_mix(MIX_STEP),
            KeyCode::Char('-') => self.change_mix(-MIX_STEP),
            _ => {}
        }
    }

    fn select_node(&mut self, index: usize) {
        self.selected_node = index.min(self.session.len() - 1);
        if !self
            .session
            .curve()
            .is_editable(self.selected_node, self.selected_handle)
        {
            self.selected_handle = Handle::EndPoint;
        }
    }

    /// Step through the handles of the selected node that can be dragged.
    fn cycle_handle(&mut self) {
        let curve = self.session.curve();
        let start = Handle::ALL
            .iter()
            .position(|&h| h == self.selected_handle)
            .unwrap_or(0);

        self.selected_handle = (1..=Handle::ALL.len())
            .map(|step| Handle::ALL[(start + step) % Handle::ALL.len()])
            .find(|&h| curve.is_editable(self.selected_node, h))
            .unwrap_or(Handle::EndPoint);
    }

    /// Drag the selected point by (dx, dy) as one complete gesture.
    fn nudge(&mut self, dx: f32, dy: f32) {
        let target = DragTarget::new(self.selected_node, self.selected_handle);
        let Some(node) = self.session.node(target.node) else {
            return;
        };
        let position = node.absolute(target.handle) + Point::new(dx, dy);

        if let Err(err) = self.drag_to(target, position) {
            self.message = err.to_string();
        }
    }

    fn drag_to(&mut self, target: DragTarget, position: Point) -> Result<(), EditError> {
        self.session.pointer_down(target)?;
        self.session.pointer_drag(position)?;
        self.session.pointer_up()
    }

    fn toggle_mirrored(&mut self) {
        let mode = match self.session.control_point_mode() {
            ControlPointMode::Independent => ControlPointMode::Mirrored,
            ControlPointMode::Mirrored => ControlPointMode::Independent,
        };
        self.session.set_control_point_mode(mode);
        self.message = format!("handles {}", mode_name(mode));
    }

    fn next_preset(&mut self) {
        let next = (self.session.preset_index() + 1) % self.session.bank().len();
        match self.session.select_preset(next) {
            Ok(()) => {
                self.select_node(self.selected_node);
                self.message = format!("loaded '{}'", self.preset_name());
            }
            Err(err) => self.message = err.to_string(),
        }
    }

    fn new_preset(&mut self) {
        let name = format!("Curve {}", self.session.bank().len());
        match self.session.create_preset(name, NEW_PRESET_NODES) {
            Ok(_) => {
                self.select_node(self.selected_node);
                self.message = format!("created '{}'", self.preset_name());
            }
            Err(err) => self.message = err.to_string(),
        }
    }

    fn store_preset(&mut self) {
        // Editing a user preset saves over it; edits to Bypass go to a new one.
        let name = match self.session.preset_index() {
            0 => format!("Curve {}", self.session.bank().len()),
            _ => self.preset_name().to_string(),
        };
        self.session.store_preset(name);
        self.message = format!("stored '{}'", self.preset_name());
    }

    fn change_mix(&mut self, delta: f32) {
        self.mix = (self.mix + delta).clamp(0.0, 1.0);
        self.send(ControlMessage::SetMix(self.mix));
    }

    fn send(&mut self, message: ControlMessage) {
        if self.control_tx.push(message).is_err() {
            self.message = String::from("audio thread not responding");
        }
    }

    fn preset_name(&self) -> &str {
        self.session
            .bank()
            .get(self.session.preset_index())
            .map_or("?", |preset| preset.name.as_str())
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: status, curve, scope row, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(12),   // Curve editor
                Constraint::Length(10), // Waveform + spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let status = StatusLine {
            preset_name: self.preset_name(),
            preset_index: self.session.preset_index(),
            selected: DragTarget::new(self.selected_node, self.selected_handle),
            mode: self.session.control_point_mode(),
            mix: self.mix,
            bypassed: self.bypassed,
            generation: self.session.generation(),
            message: &self.message,
        };
        render_status(frame, chunks[0], &status);

        render_curve(
            frame,
            chunks[1],
            &self.session,
            DragTarget::new(self.selected_node, self.selected_handle),
        );

        let scopes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);
        render_waveform(frame, scopes[0], &self.audio_buffer);
        render_spectrum(frame, scopes[1], self.spectrum.data());

        let help = Paragraph::new(
            " [Q] Quit  [ [ ] ] Node  [Tab] Handle  [Arrows] Drag  [M] Mirror  [P] Preset  [N] New  [S] Store  [B] Bypass  [+/-] Blend",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}

fn mode_name(mode: ControlPointMode) -> &'static str {
    match mode {
        ControlPointMode::Independent => "independent",
        ControlPointMode::Mirrored => "mirrored",
    }
}
