//! Orioto - application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use super::ui::{ControlMessage, UiApp};

use orioto_dsp::{dsp::Waveshaper, session::CurveSession, ShaperConfig, MAX_BLOCK_SIZE};

/// Level the shaped tone is played back at.
const OUTPUT_GAIN: f32 = 0.25;

/// Samples the audio thread can queue for the scope before it starts
/// dropping them.
const TAP_CAPACITY: usize = 16_384;

/// Main application builder
pub struct Orioto {
    config: ShaperConfig,
    tone_hz: f32,
    tone_level: f32,
}

impl Orioto {
    pub fn new() -> Self {
        Self {
            config: ShaperConfig::default(),
            tone_hz: 110.0,
            tone_level: 0.9,
        }
    }

    pub fn config(mut self, config: ShaperConfig) -> Self {
        self.config = config;
        self
    }

    /// Frequency and peak level of the test tone fed into the shaper.
    pub fn tone(mut self, hz: f32, level: f32) -> Self {
        self.tone_hz = hz;
        self.tone_level = level.clamp(0.0, 1.0);
        self
    }

    /// Open the audio device, start the tone and hand over to the TUI.
    pub fn run(self) -> EyreResult<()> {
        let (session, reader) =
            CurveSession::new(self.config).wrap_err("invalid shaper configuration")?;

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        log::info!("audio output: {sample_rate} Hz, {channels} channels");

        let mut shaper = Waveshaper::new(reader, self.config.mix_ramp_seconds);
        shaper.prepare(sample_rate);

        let (mut audio_tx, audio_rx) = RingBuffer::<f32>::new(TAP_CAPACITY);
        let (control_tx, mut control_rx) = RingBuffer::<ControlMessage>::new(64);

        let mut tone = Sine::new(self.tone_hz, self.tone_level, sample_rate);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                while let Ok(message) = control_rx.pop() {
                    match message {
                        ControlMessage::SetMix(mix) => shaper.set_mix(mix),
                        ControlMessage::SetBypassed(bypassed) => shaper.set_bypassed(bypassed),
                    }
                }

                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];

                    tone.fill(block);
                    shaper.process_block(block);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        // A full tap only costs the scope a few samples.
                        let _ = audio_tx.push(s);
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s * OUTPUT_GAIN;
                        }
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(session, audio_rx, control_tx, sample_rate).run(&mut terminal);
        ratatui::restore();

        result
    }
}

impl Default for Orioto {
    fn default() -> Self {
        Self::new()
    }
}

/// Test tone generator.
struct Sine {
    phase: f32,
    increment: f32,
    level: f32,
}

impl Sine {
    fn new(hz: f32, level: f32, sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            increment: hz / sample_rate,
            level,
        }
    }

    fn fill(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = (self.phase * std::f32::consts::TAU).sin() * self.level;
            self.phase = (self.phase + self.increment).fract();
        }
    }
}
