//! Air Hockey entry point
//!
//! Loads settings and assets, sends logs to a file, and runs the game in the
//! terminal.

use std::fs::File;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use air_hockey::assets::Assets;
use air_hockey::{App, Settings};

fn init_logging(settings: &Settings) -> air_hockey::Result<()> {
    let file = File::create(&settings.log_file)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn start() -> air_hockey::Result<()> {
    let settings = Settings::load()?;
    init_logging(&settings)?;
    log::info!("Air Hockey starting...");
    log::debug!("{:?}", settings);

    let assets = Assets::load(&settings.assets_dir)?;
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let app = App::new(&settings, assets, seed)?;
    air_hockey::platform::run(app, &settings)
}

fn main() -> ExitCode {
    match start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("air-hockey: {}", e);
            ExitCode::FAILURE
        }
    }
}
