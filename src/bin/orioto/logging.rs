//! Logger setup for the terminal front end.

/// Warnings only by default so log lines don't scribble over the TUI.
/// `RUST_LOG` overrides the level.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format(|buf, record| {
            use std::io::Write;
            // Leading \r keeps lines aligned while the terminal is in raw mode.
            writeln!(
                buf,
                "\r[{} {:5} {}] {}",
                buf.timestamp(),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        })
        .init();
}
