use clap::Args;
use evil_timer_core::{Config, Event, Mode, RngPicker, Stopwatch};

#[derive(Args)]
pub struct SimulateArgs {
    /// Mode to run in (defaults to the configured mode)
    #[arg(long)]
    pub mode: Option<Mode>,
    /// Wall-clock seconds to run for (at most one day)
    #[arg(long, default_value = "10")]
    pub seconds: f64,
    /// Seed for phrase selection; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print every event as a JSON line instead of only the final state
    #[arg(long)]
    pub events: bool,
}

/// Longest headless run accepted, in wall-clock seconds.
const MAX_SIMULATED_SECS: f64 = 86_400.0;

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        return Err(format!("--seconds must be a non-negative number, got {}", args.seconds).into());
    }
    if args.seconds > MAX_SIMULATED_SECS {
        return Err(format!(
            "--seconds must be at most {MAX_SIMULATED_SECS} (one day), got {}",
            args.seconds
        )
        .into());
    }

    let config = Config::load()?;
    let mut settings = config.stopwatch_settings();
    if let Some(mode) = args.mode {
        settings.mode = mode;
    }

    let mut stopwatch = match args.seed {
        Some(seed) => Stopwatch::with_picker(settings, Box::new(RngPicker::seeded(seed))),
        None => Stopwatch::new(settings),
    };

    let tick = settings.tick_interval_secs;
    let ticks = (args.seconds / tick).round() as u64;
    tracing::debug!(ticks, tick, mode = %settings.mode, "simulating");

    let mut log: Vec<Event> = Vec::new();
    log.extend(stopwatch.start());
    for _ in 0..ticks {
        log.extend(stopwatch.on_tick(tick));
    }
    log.extend(stopwatch.stop());

    if args.events {
        log.push(stopwatch.snapshot());
        for event in &log {
            println!("{}", serde_json::to_string(event)?);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&stopwatch.snapshot())?);
    }

    stopwatch.teardown();
    Ok(())
}
