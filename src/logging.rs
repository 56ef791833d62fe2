use simplelog::{Config, ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::Path;

/// Send log output to `path`. Selection changes are only logged at trace
/// level, so `trace` is needed to follow the caret.
pub fn init(path: &Path, trace: bool) -> std::io::Result<()> {
    let file = File::create(path)?;
    let level = if trace {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };

    WriteLogger::init(level, config(), file).map_err(std::io::Error::other)?;
    Ok(())
}

fn config() -> Config {
    ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Error)
        .build()
}
