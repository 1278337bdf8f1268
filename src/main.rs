//! Ball Pit entry point
//!
//! On the web the page drives a `Simulation` handle directly (see
//! `platform::web`). Natively this runs a headless soak: seeded spawns,
//! fixed-rate stepping, drawing into a recorder, then a replay check.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use ballpit::Session;
    use ballpit::renderer::CommandRecorder;
    use ballpit::settings::{Settings, SettingsError};
    use ballpit::sim::Scenario;

    /// Seed for the demo spawn layout
    const DEMO_SEED: u64 = 19;
    const DEMO_BALLS: u32 = 24;
    /// Simulated wall-clock run time
    const DEMO_SECONDS: u32 = 10;
    /// Simulated display refresh rate
    const FRAME_HZ: u32 = 144;

    fn load_settings() -> Result<Settings, SettingsError> {
        match std::env::args_os().nth(1) {
            Some(path) => Settings::load_from(&PathBuf::from(path)),
            None => {
                log::info!("No settings file given, using defaults");
                Ok(Settings::default())
            }
        }
    }

    pub fn run() -> ExitCode {
        let settings = match load_settings() {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings: {}", e);
                return ExitCode::FAILURE;
            }
        };
        // The replay check needs a recording
        let settings = Settings {
            record_inputs: true,
            ..settings
        };

        let mut session = Session::new(settings);
        for (x, y) in Scenario::new(DEMO_SEED, DEMO_BALLS).positions() {
            session.spawn(x, y);
        }
        log::info!("Spawned {} balls (seed {})", DEMO_BALLS, DEMO_SEED);

        let frame_dt = 1.0 / FRAME_HZ as f64;
        let mut surface = CommandRecorder::new();
        let mut ticks = 0u64;
        for _ in 0..DEMO_SECONDS * FRAME_HZ {
            ticks += u64::from(session.advance(frame_dt));
            surface.clear();
            session.draw(&mut surface);
        }
        log::info!(
            "Ran {} ticks, last frame drew {} circles",
            ticks,
            surface.circle_count()
        );

        let live = session.checksum_hex();
        let Some(replayed) = session.replay_recorded() else {
            log::error!("Session was not recording");
            return ExitCode::FAILURE;
        };
        let replayed = ballpit::persistence::state_digest(&replayed).to_hex().to_string();

        log::info!("live digest     {}", live);
        log::info!("replayed digest {}", replayed);
        if live != replayed {
            log::error!("Replay diverged from live simulation");
            return ExitCode::FAILURE;
        }

        println!("{}", live);
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ball pit (headless) starting...");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
