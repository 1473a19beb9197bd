//! orioto - Terminal curve editor for the waveshaper
//!
//! Run with: cargo run
//!
//! Plays a sine tone through the shaper while you bend the transfer curve.
//! Log output goes to stderr; redirect it (`2> orioto.log`) to keep the
//! screen clean when raising `RUST_LOG`.

mod app;
mod logging;
mod ui;

use app::Orioto;
use orioto_dsp::ShaperConfig;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init_logger();

    Orioto::new()
        .config(ShaperConfig::default())
        .tone(110.0, 0.9)
        .run()
}
