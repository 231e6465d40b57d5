//! Rasterization of simulation grids into RGB images

pub mod sink;

use data::{
    grid::{Cell, Grid},
    Precision,
};
use image::{Rgb, RgbImage};
use log::debug;
use std::path::PathBuf;
use thiserror::Error;

pub use sink::{read_raster_dimensions, BmpSink, RasterSink};

/// Errors that can occur while producing snapshots
#[derive(Debug, Error)]
pub enum Error {
    /// Grid is too large to be represented as an image
    #[error("a {width}x{height} grid cannot be rendered as an image")]
    Dimensions { width: usize, height: usize },

    /// Raster could not be written
    #[error("failed to write raster {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Raster could not be read
    #[error("failed to read raster {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Result type of fallible operations in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// 8-bit RGB color
pub type Color = Rgb<u8>;

/// Endpoint colors of the concentration -> color mapping
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Palette {
    /// Color of cells that only contain species A
    pub color_a: Color,

    /// Color of cells that only contain species B
    pub color_b: Color,
}
//
impl Palette {
    /// Color of a cell, if it has any concentration at all
    ///
    /// Colors are interpolated according to the share of species B in the
    /// cell, irrespective of the absolute concentrations.
    pub fn color(&self, Cell { a, b }: Cell) -> Option<Color> {
        let denominator = a + b;
        (denominator != 0.0).then(|| lerp(self.color_a, self.color_b, b / denominator))
    }
}
//
impl Default for Palette {
    fn default() -> Self {
        Self {
            color_a: Rgb([0, 0, 0]),
            color_b: Rgb([50, 230, 255]),
        }
    }
}

/// Linear interpolation between two colors
///
/// The offset from `from` is truncated towards zero on each channel. Results
/// that fall outside of the 8-bit range, as happens with `t` outside of [0, 1],
/// are clamped to it.
pub fn lerp(from: Color, to: Color, t: Precision) -> Color {
    Rgb(std::array::from_fn(|channel| {
        let start = from.0[channel] as Precision;
        let end = to.0[channel] as Precision;
        let offset = ((end - start) * t) as i32;
        (from.0[channel] as i32 + offset).clamp(0, u8::MAX as i32) as u8
    }))
}

/// Naming scheme of snapshot files
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SnapshotNames {
    /// Text that goes before the iteration number
    pub prefix: String,

    /// File extension, without the leading dot
    pub extension: String,
}
//
impl SnapshotNames {
    /// Name of the snapshot taken at some iteration
    pub fn name(&self, iteration: usize) -> String {
        format!("{}{iteration}.{}", self.prefix, self.extension)
    }
}
//
impl Default for SnapshotNames {
    fn default() -> Self {
        Self {
            prefix: "Output".to_owned(),
            extension: "bmp".to_owned(),
        }
    }
}

/// Turns grids into images and hands them over to a [`RasterSink`]
///
/// Cell (x, y) is drawn at pixel row x, column y. The image is therefore
/// `height` pixels wide and `width` pixels high for a grid of `width` columns
/// and `height` rows.
///
/// The image buffer is reused from one snapshot to the next, so pixels of
/// cells without any concentration keep whatever color they last had
/// (initially black).
#[derive(Clone, Debug)]
pub struct Renderer {
    /// Concentration -> color mapping
    palette: Palette,

    /// Snapshot naming scheme
    names: SnapshotNames,

    /// Image buffer
    image: RgbImage,
}
//
impl Renderer {
    /// Prepare to render grids of dimensions [width, height]
    pub fn new(
        palette: Palette,
        names: SnapshotNames,
        [width, height]: [usize; 2],
    ) -> Result<Self> {
        let dimensions_error = || Error::Dimensions { width, height };
        let image_width = u32::try_from(height).map_err(|_| dimensions_error())?;
        let image_height = u32::try_from(width).map_err(|_| dimensions_error())?;
        Ok(Self {
            palette,
            names,
            image: RgbImage::new(image_width, image_height),
        })
    }

    /// Draw a grid into the image buffer
    pub fn draw(&mut self, grid: &Grid) -> &RgbImage {
        assert_eq!(
            [grid.height(), grid.width()],
            [self.image.width() as usize, self.image.height() as usize],
            "Grid does not match the renderer's dimensions"
        );
        for ((x, y), &cell) in grid.indexed_iter() {
            if let Some(color) = self.palette.color(cell) {
                self.image.put_pixel(y as u32, x as u32, color);
            }
        }
        &self.image
    }

    /// Draw a grid and write it out as the snapshot of some iteration
    pub fn snapshot(
        &mut self,
        grid: &Grid,
        iteration: usize,
        sink: &mut impl RasterSink,
    ) -> Result<()> {
        self.draw(grid);
        let name = self.names.name(iteration);
        debug!("Writing snapshot {name}");
        sink.write_raster(&name, &self.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: Color = Rgb([1, 2, 3]);

    #[test]
    fn endpoint_colors() {
        let palette = Palette::default();
        assert_eq!(palette.color(Cell::PURE_A), Some(palette.color_a));
        assert_eq!(palette.color(Cell::PURE_B), Some(palette.color_b));
        assert_eq!(palette.color(Cell { a: 0.0, b: 0.0 }), None);
    }

    #[test]
    fn color_depends_on_ratio_only() {
        let palette = Palette::default();
        assert_eq!(
            palette.color(Cell { a: 0.5, b: 0.5 }),
            palette.color(Cell { a: 2.0, b: 2.0 })
        );
        assert_eq!(palette.color(Cell { a: 0.5, b: 0.5 }), Some(Rgb([25, 115, 127])));
    }

    #[test]
    fn lerp_truncates() {
        let from = Rgb([255, 0, 100]);
        let to = Rgb([0, 255, 101]);
        assert_eq!(lerp(from, to, 0.0), from);
        assert_eq!(lerp(from, to, 1.0), to);
        assert_eq!(lerp(from, to, 0.5), Rgb([128, 127, 100]));
        assert_eq!(lerp(from, to, 0.999), Rgb([1, 254, 100]));
    }

    #[test]
    fn lerp_rounds_towards_start_color() {
        let from = Rgb([10, 10, 10]);
        let to = Rgb([0, 0, 20]);
        assert_eq!(lerp(from, to, 0.15), Rgb([9, 9, 11]));
    }

    #[test]
    fn snapshot_names() {
        let names = SnapshotNames::default();
        assert_eq!(names.name(0), "Output0.bmp");
        assert_eq!(names.name(10000), "Output10000.bmp");
    }

    #[test]
    fn draw_transposes_and_skips_empty_cells() {
        let mut grid = Grid::filled(3, 2, Cell::PURE_A).unwrap();
        grid[(2, 0)] = Cell::PURE_B;
        grid[(1, 1)] = Cell { a: 0.0, b: 0.0 };

        let palette = Palette::default();
        let mut renderer = Renderer::new(palette, SnapshotNames::default(), grid.shape()).unwrap();
        for pixel in renderer.image.pixels_mut() {
            *pixel = SENTINEL;
        }
        let image = renderer.draw(&grid);

        assert_eq!(image.dimensions(), (2, 3));
        assert_eq!(*image.get_pixel(0, 2), palette.color_b);
        assert_eq!(*image.get_pixel(1, 1), SENTINEL);
        assert_eq!(*image.get_pixel(0, 0), palette.color_a);
        assert_eq!(*image.get_pixel(1, 2), palette.color_a);
    }

    #[derive(Default)]
    struct MemorySink(Vec<(String, RgbImage)>);
    //
    impl RasterSink for MemorySink {
        fn write_raster(&mut self, name: &str, image: &RgbImage) -> Result<()> {
            self.0.push((name.to_owned(), image.clone()));
            Ok(())
        }
    }

    #[test]
    fn snapshot_hands_image_to_sink() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.seed(1.0);
        let mut renderer =
            Renderer::new(Palette::default(), SnapshotNames::default(), grid.shape()).unwrap();
        let mut sink = MemorySink::default();
        renderer.snapshot(&grid, 200, &mut sink).unwrap();

        let [(name, image)] = &sink.0[..] else {
            panic!("Expected exactly one snapshot")
        };
        assert_eq!(name, "Output200.bmp");
        assert_eq!(*image.get_pixel(2, 2), Palette::default().color_b);
        assert_eq!(*image.get_pixel(0, 1), Palette::default().color_a);
    }
}
