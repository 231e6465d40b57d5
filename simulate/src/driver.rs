//! Simulation main loop

use compute::Simulation;
use data::parameters::Parameters;
use eyre::Result;
use indicatif::ProgressBar;
use log::{error, info};
use render::{Palette, RasterSink, Renderer, SnapshotNames};
use std::{fmt, num::NonZeroUsize};

/// Everything needed to run a simulation
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Reaction-diffusion parameters
    pub params: Parameters,

    /// Grid dimensions as [width, height]
    pub shape: [usize; 2],

    /// Number of simulation steps
    pub iterations: usize,

    /// Number of simulation steps between snapshots
    pub snapshot_interval: NonZeroUsize,

    /// Snapshot colors
    pub palette: Palette,

    /// Snapshot naming scheme
    pub names: SnapshotNames,
}
//
impl Default for Config {
    fn default() -> Self {
        Self {
            params: Parameters::default(),
            shape: [600, 600],
            iterations: 10_000,
            snapshot_interval: NonZeroUsize::new(200).expect("200 is not zero"),
            palette: Palette::default(),
            names: SnapshotNames::default(),
        }
    }
}

/// Outcome of a simulation run
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    /// Number of snapshots that were successfully written
    pub snapshots_written: usize,

    /// Number of snapshots that could not be written
    pub snapshots_failed: usize,
}
//
impl RunSummary {
    /// Account for a snapshot write attempt, logging failures
    fn record(&mut self, iteration: usize, result: render::Result<()>) {
        match result {
            Ok(()) => self.snapshots_written += 1,
            Err(e) => {
                let report = eyre::Report::new(e);
                error!("Failed to write snapshot of iteration {iteration}: {report:#}");
                self.snapshots_failed += 1;
            }
        }
    }
}
//
impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} snapshot(s) written", self.snapshots_written)?;
        if self.snapshots_failed > 0 {
            write!(f, ", {} failed", self.snapshots_failed)?;
        }
        Ok(())
    }
}

/// Run the simulation, sending snapshots to `sink`
///
/// A snapshot of the state before step `i` is taken whenever `i` is a multiple
/// of the snapshot interval, and a final snapshot is taken after the last
/// step. Failing to write a snapshot does not stop the simulation.
pub fn run(
    config: &Config,
    sink: &mut impl RasterSink,
    progress: &ProgressBar,
) -> Result<RunSummary> {
    let simulation = Simulation::new(config.params);
    let mut buffers = simulation.make_buffers(config.shape)?;
    let mut renderer = Renderer::new(config.palette, config.names.clone(), config.shape)?;
    let interval = config.snapshot_interval.get();
    info!(
        "Simulating {} steps on a {}x{} grid, with a snapshot every {interval} steps",
        config.iterations, config.shape[0], config.shape[1]
    );

    let mut summary = RunSummary::default();
    for iteration in 0..config.iterations {
        let (current, next) = buffers.current_next();
        simulation.advance(current, next);
        if iteration % interval == 0 {
            summary.record(iteration, renderer.snapshot(current, iteration, sink));
        }
        buffers.flip();
        progress.inc(1);
    }
    summary.record(
        config.iterations,
        renderer.snapshot(buffers.current(), config.iterations, sink),
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::grid::Cell;
    use image::RgbImage;
    use std::sync::Once;

    fn init_logger() {
        static INIT_LOGGER: Once = Once::new();
        INIT_LOGGER.call_once(|| env_logger::init());
    }

    /// Sink that keeps snapshots in memory, failing on request
    #[derive(Default)]
    struct MemorySink {
        snapshots: Vec<(String, RgbImage)>,
        failing: Vec<String>,
    }
    //
    impl RasterSink for MemorySink {
        fn write_raster(&mut self, name: &str, image: &RgbImage) -> render::Result<()> {
            if self.failing.iter().any(|failing| failing == name) {
                return Err(render::Error::Write {
                    path: name.into(),
                    source: image::ImageError::IoError(std::io::Error::other("disk full")),
                });
            }
            self.snapshots.push((name.to_owned(), image.clone()));
            Ok(())
        }
    }
    //
    impl MemorySink {
        fn names(&self) -> Vec<&str> {
            self.snapshots.iter().map(|(name, _)| name.as_str()).collect()
        }
    }

    fn small_config(iterations: usize, interval: usize) -> Config {
        Config {
            params: Parameters {
                seed_radius: 2.0,
                ..Default::default()
            },
            shape: [8, 6],
            iterations,
            snapshot_interval: NonZeroUsize::new(interval).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn snapshot_schedule() {
        init_logger();
        let mut sink = MemorySink::default();
        let summary = run(&small_config(10, 4), &mut sink, &ProgressBar::hidden()).unwrap();
        assert_eq!(
            sink.names(),
            ["Output0.bmp", "Output4.bmp", "Output8.bmp", "Output10.bmp"]
        );
        assert_eq!(
            summary,
            RunSummary {
                snapshots_written: 4,
                snapshots_failed: 0
            }
        );
    }

    #[test]
    fn snapshots_show_pre_step_state() {
        init_logger();
        let config = small_config(3, 1);
        let mut sink = MemorySink::default();
        run(&config, &mut sink, &ProgressBar::hidden()).unwrap();

        let simulation = Simulation::new(config.params);
        let mut buffers = simulation.make_buffers(config.shape).unwrap();
        let mut renderer =
            Renderer::new(config.palette, config.names.clone(), config.shape).unwrap();
        for (iteration, (name, image)) in sink.snapshots.iter().enumerate() {
            assert_eq!(name, &config.names.name(iteration));
            assert_eq!(image, renderer.draw(buffers.current()), "{name}");
            simulation.perform_step(&mut buffers);
        }
        assert_eq!(sink.snapshots.len(), 4);
    }

    #[test]
    fn write_failures_are_not_fatal() {
        init_logger();
        let mut sink = MemorySink {
            failing: vec!["Output2.bmp".to_owned()],
            ..Default::default()
        };
        let summary = run(&small_config(5, 2), &mut sink, &ProgressBar::hidden()).unwrap();
        assert_eq!(sink.names(), ["Output0.bmp", "Output4.bmp", "Output5.bmp"]);
        assert_eq!(
            summary,
            RunSummary {
                snapshots_written: 3,
                snapshots_failed: 1
            }
        );
        assert_eq!(summary.to_string(), "3 snapshot(s) written, 1 failed");
    }

    #[test]
    fn zero_iterations_only_snapshot_the_seed() {
        init_logger();
        let mut sink = MemorySink::default();
        run(&small_config(0, 200), &mut sink, &ProgressBar::hidden()).unwrap();
        assert_eq!(sink.names(), ["Output0.bmp"]);

        let (_, image) = &sink.snapshots[0];
        let palette = Palette::default();
        assert_eq!(palette.color(Cell::PURE_B), Some(*image.get_pixel(3, 4)));
        assert_eq!(palette.color(Cell::PURE_A), Some(*image.get_pixel(0, 0)));
    }

    #[test]
    fn oversized_grid_is_fatal() {
        let config = Config {
            shape: [usize::MAX, 2],
            ..small_config(1, 1)
        };
        let result = run(&config, &mut MemorySink::default(), &ProgressBar::hidden());
        assert!(result.is_err());
    }
}
