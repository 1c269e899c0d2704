//! Production Line entry point
//!
//! Native builds run the line headless through the frame loop and report
//! station activity. Browser builds use `platform::web::WebLine` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result, ensure};
    use clap::Parser;
    use serde::Serialize;

    use production_line::sim::{LineEvent, LineSimulation};
    use production_line::{FrameLoop, LineConfig, SceneLayout, StationBoard};

    #[derive(Parser)]
    #[command(name = "production-line", about = "Headless production line simulation")]
    struct Cli {
        /// JSON line config; missing fields use the demo scene defaults
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the config seed
        #[arg(long)]
        seed: Option<u64>,
        /// Simulated wall time to run (seconds)
        #[arg(long, default_value_t = 30.0)]
        seconds: f32,
        /// Display frame rate fed to the frame loop
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
        /// Print a snapshot every N ticks (0 = never)
        #[arg(long, default_value_t = 0)]
        snapshot_every: u64,
        /// Emit events and snapshots as JSON lines
        #[arg(long)]
        json: bool,
        /// Print the effective config as JSON and exit
        #[arg(long)]
        dump_config: bool,
        /// Print the static scene layout as JSON and exit
        #[arg(long)]
        dump_layout: bool,
    }

    #[derive(Serialize)]
    struct EventLine<'a> {
        tick: u64,
        #[serde(flatten)]
        event: &'a LineEvent,
    }

    #[derive(Debug, Clone, Copy, Default)]
    struct StationStats {
        activations: u32,
        arrivals: u32,
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let mut config = match &cli.config {
            Some(path) => LineConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => LineConfig::default(),
        };
        if let Some(seed) = cli.seed {
            config.seed = seed;
        }

        if cli.dump_config {
            println!("{}", config.to_json_pretty()?);
            return Ok(());
        }

        ensure!(cli.fps > 0.0, "--fps must be positive, got {}", cli.fps);
        ensure!(cli.seconds >= 0.0, "--seconds must not be negative, got {}", cli.seconds);

        let mut line = LineSimulation::initialize(&config)?;

        if cli.dump_layout {
            println!("{}", serde_json::to_string_pretty(&SceneLayout::for_line(&line))?);
            return Ok(());
        }

        log::info!("Production line starting with seed {}", config.seed);

        let mut board = StationBoard::for_line(&line);
        let mut frames = FrameLoop::default();
        let mut stats = vec![StationStats::default(); line.station_count()];

        let frame_secs = 1.0 / cli.fps;
        let frame_count = (cli.seconds * cli.fps).round() as u64;
        let mut next_snapshot = cli.snapshot_every;

        for _ in 0..frame_count {
            let events = frames.advance(&mut line, frame_secs);
            board.apply(&events);

            for event in &events {
                match event {
                    LineEvent::PalletEntered(entered) => {
                        stats[entered.new_station].arrivals += 1;
                    }
                    LineEvent::StationChanged(change) => {
                        if change.active {
                            stats[change.station].activations += 1;
                        }
                        if !cli.json {
                            if let Some(display) = board.get(change.station) {
                                println!(
                                    "[tick {:>6}] {:<10} {}",
                                    line.ticks(),
                                    display.title(),
                                    display.status_text()
                                );
                            }
                        }
                    }
                }
                if cli.json {
                    let record = EventLine {
                        tick: line.ticks(),
                        event,
                    };
                    println!("{}", serde_json::to_string(&record)?);
                }
            }

            if cli.snapshot_every > 0 && line.ticks() >= next_snapshot {
                print_snapshot(&line, cli.json)?;
                next_snapshot = line.ticks() + cli.snapshot_every;
            }
        }

        log::info!(
            "Ran {} ticks over {} frames, {} stations active at end",
            frames.steps_run(),
            frame_count,
            board.active_count()
        );

        if !cli.json {
            println!();
            println!("{:<10} {:>11} {:>9}  status", "station", "activations", "arrivals");
            for (display, s) in board.displays().iter().zip(&stats) {
                println!(
                    "{:<10} {:>11} {:>9}  {}",
                    display.title(),
                    s.activations,
                    s.arrivals,
                    display.status_text()
                );
            }
        }

        Ok(())
    }

    fn print_snapshot(line: &LineSimulation, json: bool) -> Result<()> {
        let snapshot = line.snapshot();
        if json {
            println!("{}", serde_json::to_string(&snapshot)?);
            return Ok(());
        }

        println!("--- tick {} ---", snapshot.tick);
        for pallet in &snapshot.pallets {
            println!(
                "  pallet {} at {:.4} (station {}) pos ({:.1}, {:.1}, {:.1})",
                pallet.id,
                pallet.progress,
                pallet.station + 1,
                pallet.position.x,
                pallet.position.y,
                pallet.position.z
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
