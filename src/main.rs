//! Drone Strike headless entry point
//!
//! Plays one seeded match on a simulated 60 Hz clock with a simple autopilot
//! and prints the final stats as JSON.
//!
//! Usage: `drone-strike [--seed N] [--tuning path.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args = match headless::Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: drone-strike [--seed N] [--tuning path.json]");
            std::process::exit(2);
        }
    };

    let stats = headless::run(&args);
    match serde_json::to_string_pretty(&stats) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode stats: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `drone_strike::platform::Host` directly
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use drone_strike::audio::LogSink;
    use drone_strike::platform::{Host, Key, ManualClock};
    use drone_strike::sim::{Engine, MatchStats};
    use drone_strike::{Settings, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frames the autopilot holds one direction before switching
    const SWEEP_FRAMES: u32 = 90;

    #[derive(Debug, Default)]
    pub struct Args {
        pub seed: Option<u64>,
        pub tuning: Option<PathBuf>,
    }

    impl Args {
        pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mut parsed = Args::default();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--seed" => {
                        let value = args.next().ok_or("--seed needs a value")?;
                        let seed = value
                            .parse()
                            .map_err(|_| format!("invalid seed '{value}'"))?;
                        parsed.seed = Some(seed);
                    }
                    "--tuning" => {
                        let value = args.next().ok_or("--tuning needs a path")?;
                        parsed.tuning = Some(PathBuf::from(value));
                    }
                    other => return Err(format!("unknown argument '{other}'")),
                }
            }
            Ok(parsed)
        }
    }

    pub fn run(args: &Args) -> MatchStats {
        let tuning = match &args.tuning {
            Some(path) => Tuning::load_or_default(path),
            None => Tuning::default(),
        };
        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        log::info!("Drone Strike starting with seed: {}", seed);

        let engine = Engine::with_seed(tuning, seed);
        let mut host = Host::new(
            engine,
            ManualClock::new(0.0),
            Box::new(LogSink),
            Settings::default(),
        );

        let mut frame = 0u32;
        loop {
            autopilot(&mut host, frame);
            host.clock_mut().advance(FRAME_MS);
            if host.frame().is_terminal() {
                break;
            }
            frame += 1;
        }
        log::info!("Match finished after {} frames", frame + 1);
        host.stats()
    }

    /// Sweep up and down while holding the trigger
    fn autopilot(host: &mut Host<ManualClock>, frame: u32) {
        let input = host.input_mut();
        if (frame / SWEEP_FRAMES) % 2 == 0 {
            input.key_up(Key::ArrowUp);
            input.key_down(Key::ArrowDown);
        } else {
            input.key_up(Key::ArrowDown);
            input.key_down(Key::ArrowUp);
        }
        input.key_down(Key::Space);
    }
}
