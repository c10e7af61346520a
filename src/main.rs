use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use compass::{Inclination, SensorReadings, SensorSample, Solver, SolverConfig};

/// Replay accelerometer/magnetometer samples and print the device orientation
/// after every update.
///
/// Each input line is `kind,x,y,z` or `timestamp,kind,x,y,z`, where kind is
/// `accel` or `mag`.
#[derive(Parser)]
#[command(name = "compass")]
#[command(version)]
struct Cli {
    /// Sample file to replay (stdin when omitted)
    input: Option<PathBuf>,

    /// Solver configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the degeneracy threshold
    #[arg(long)]
    epsilon: Option<f64>,

    /// Reject gravity readings weaker than this many m/s²
    #[arg(long)]
    free_fall: Option<f64>,

    /// Print angles in radians instead of degrees
    #[arg(long)]
    radians: bool,
}

fn load_config(cli: &Cli) -> Result<SolverConfig> {
    let mut config = match &cli.config {
        Some(path) => SolverConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SolverConfig::default(),
    };

    if let Some(epsilon) = cli.epsilon {
        config.epsilon = epsilon;
    }
    if let Some(threshold) = cli.free_fall {
        config.free_fall_threshold = Some(threshold);
    }
    config.validate()?;

    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let solver = Solver::new(load_config(&cli)?);
    log::debug!("solver config: {:?}", solver.config());

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut readings = SensorReadings::new();
    let (mut samples, mut solved) = (0usize, 0usize);

    for (line_number, line) in reader.lines().enumerate() {
        let line = line.context("reading samples")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let sample: SensorSample = match line.parse() {
            Ok(sample) => sample,
            Err(e) => {
                log::warn!("skipping line {}: {}", line_number + 1, e);
                continue;
            }
        };
        samples += 1;

        // degenerate pairs are logged by the readings and produce no output
        let Ok((frame, orientation)) = readings.update(&sample, &solver) else {
            continue;
        };
        solved += 1;

        let dip = Inclination::from_frame(&frame, &readings.geomagnetic).angle();
        let [azimuth, pitch, roll, dip] = if cli.radians {
            [orientation.azimuth, orientation.pitch, orientation.roll, dip]
        } else {
            let [azimuth, pitch, roll] = orientation.to_degrees();
            [azimuth, pitch, roll, dip.to_degrees()]
        };

        if let Some(timestamp) = readings.last_timestamp {
            write!(out, "t={timestamp} ")?;
        }
        writeln!(
            out,
            "azimuth={azimuth:.3}, pitch={pitch:.3}, roll={roll:.3}, inclination={dip:.3}, |a|={:.3}",
            readings.acceleration_magnitude()
        )?;
    }

    log::info!("{} samples read, {} orientations resolved", samples, solved);
    Ok(())
}
