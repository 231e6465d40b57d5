mod driver;

use clap::{Parser, ValueEnum};
use data::{
    parameters::{Axis, Parameters, RateField, Stencil, DEFAULT_FEED_RATE, DEFAULT_KILL_RATE},
    Precision,
};
use driver::Config;
use eyre::{Result, WrapErr};
use log::{info, warn};
use render::{BmpSink, Color, Palette, SnapshotNames};
use std::{num::NonZeroUsize, path::PathBuf};

/// Perform reaction-diffusion simulation, saving snapshots as BMP images
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of rows of the simulation grid
    #[arg(short = 'r', long, default_value_t = 600)]
    nbrow: usize,

    /// Number of columns of the simulation grid
    #[arg(short = 'c', long, default_value_t = 600)]
    nbcol: usize,

    /// Image whose dimensions override nbrow and nbcol, if it can be read
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Rate of the process which feeds A
    #[arg(short, long)]
    feedrate: Option<Precision>,

    /// Make the feed rate a gradient from feedrate to this value
    #[arg(long)]
    feedrate_end: Option<Precision>,

    /// Axis of the feed rate gradient
    #[arg(long, value_enum, default_value_t = AxisArg::Y)]
    feed_axis: AxisArg,

    /// Rate of the process which removes B
    #[arg(short, long)]
    killrate: Option<Precision>,

    /// Make the kill rate a gradient from killrate to this value
    #[arg(long)]
    killrate_end: Option<Precision>,

    /// Axis of the kill rate gradient
    #[arg(long, value_enum, default_value_t = AxisArg::X)]
    kill_axis: AxisArg,

    /// Diffusion rate of species A
    #[arg(long)]
    diffusion_a: Option<Precision>,

    /// Diffusion rate of species B
    #[arg(long)]
    diffusion_b: Option<Precision>,

    /// Laplacian weight of orthogonally adjacent neighbors
    #[arg(long)]
    adjacent_weight: Option<Precision>,

    /// Laplacian weight of diagonal neighbors
    #[arg(long)]
    diagonal_weight: Option<Precision>,

    /// Simulated time interval on each simulation step
    #[arg(short = 't', long)]
    deltat: Option<Precision>,

    /// Radius of the initial disc of species B
    #[arg(long)]
    radius: Option<Precision>,

    /// Number of simulation steps
    #[arg(short = 'n', long, default_value_t = 10_000)]
    nbiter: usize,

    /// Number of simulation steps between snapshots
    #[arg(short = 'e', long, default_value_t = NonZeroUsize::new(200).unwrap())]
    interval: NonZeroUsize,

    /// Color of pure species A, as R,G,B
    #[arg(long, value_parser = ui::parse_color, default_value = "0,0,0")]
    color_a: Color,

    /// Color of pure species B, as R,G,B
    #[arg(long, value_parser = ui::parse_color, default_value = "50,230,255")]
    color_b: Color,

    /// Directory where snapshots will be saved
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Snapshot file name prefix, followed by the iteration number
    #[arg(long, default_value = "Output")]
    prefix: String,
}
//
impl Args {
    /// Assemble the simulation configuration, with defaults for unset options
    fn config(&self) -> Config {
        let defaults = Parameters::default();
        let params = Parameters {
            stencil: Stencil {
                adjacent: self.adjacent_weight.unwrap_or(defaults.stencil.adjacent),
                diagonal: self.diagonal_weight.unwrap_or(defaults.stencil.diagonal),
            },
            diffusion_rate_a: self.diffusion_a.unwrap_or(defaults.diffusion_rate_a),
            diffusion_rate_b: self.diffusion_b.unwrap_or(defaults.diffusion_rate_b),
            feed_rate: RateField::linear(
                self.feed_axis.into(),
                self.feedrate.unwrap_or(DEFAULT_FEED_RATE),
                self.feedrate_end,
            ),
            kill_rate: RateField::linear(
                self.kill_axis.into(),
                self.killrate.unwrap_or(DEFAULT_KILL_RATE),
                self.killrate_end,
            ),
            time_step: self.deltat.unwrap_or(defaults.time_step),
            seed_radius: self.radius.unwrap_or(defaults.seed_radius),
        };
        Config {
            params,
            shape: self.shape(),
            iterations: self.nbiter,
            snapshot_interval: self.interval,
            palette: Palette {
                color_a: self.color_a,
                color_b: self.color_b,
            },
            names: SnapshotNames {
                prefix: self.prefix.clone(),
                ..Default::default()
            },
        }
    }

    /// Grid dimensions as [width, height]
    ///
    /// Taken from the reference image if there is a readable one, otherwise
    /// from nbcol and nbrow.
    fn shape(&self) -> [usize; 2] {
        let fallback = [self.nbcol, self.nbrow];
        let Some(reference) = &self.reference else {
            return fallback;
        };
        match render::read_raster_dimensions(reference) {
            Ok([width, height]) => {
                info!(
                    "Using {width}x{height} grid from reference image {}",
                    reference.display()
                );
                [width as usize, height as usize]
            }
            Err(e) => {
                warn!(
                    "Ignoring reference image: {:#}, using a {}x{} grid",
                    eyre::Report::new(e),
                    fallback[0],
                    fallback[1]
                );
                fallback
            }
        }
    }
}

/// Grid axis, as spelled on the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum AxisArg {
    X,
    Y,
}
//
impl From<AxisArg> for Axis {
    fn from(axis: AxisArg) -> Self {
        match axis {
            AxisArg::X => Axis::X,
            AxisArg::Y => Axis::Y,
        }
    }
}

fn main() -> Result<()> {
    // Enable logging to syslog
    ui::init_syslog();

    // Parse CLI arguments and handle clap-incompatible defaults
    let args = Args::parse();
    let config = args.config();
    std::fs::create_dir_all(&args.output_dir).wrap_err_with(|| {
        format!(
            "Failed to create output directory {}",
            args.output_dir.display()
        )
    })?;
    let mut sink = BmpSink::new(&args.output_dir);

    // Run the simulation
    let progress = ui::init_progress_reporting("Running simulation step", config.iterations);
    let summary = driver::run(&config, &mut sink, &progress)?;
    progress.finish_using_style();
    info!("Simulation finished! {summary}");
    Ok(())
}
