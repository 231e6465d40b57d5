//! Moving rasters to and from image files

use crate::{Error, Result};
use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};

/// Destination of rendered snapshots
pub trait RasterSink {
    /// Write an RGB raster under some artifact name
    fn write_raster(&mut self, name: &str, image: &RgbImage) -> Result<()>;
}

/// Writes rasters as uncompressed 24-bit BMP files in some directory
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BmpSink {
    /// Directory where files are created
    directory: PathBuf,
}
//
impl BmpSink {
    /// Prepare to write files into `directory`, which must already exist
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Path of the file that an artifact name maps to
    pub fn path(&self, name: &str) -> PathBuf {
        self.directory.join(name)
    }
}
//
impl RasterSink for BmpSink {
    fn write_raster(&mut self, name: &str, image: &RgbImage) -> Result<()> {
        let path = self.path(name);
        image
            .save_with_format(&path, ImageFormat::Bmp)
            .map_err(|source| Error::Write { path, source })
    }
}

/// Read the [width, height] of an existing image file
pub fn read_raster_dimensions(path: impl AsRef<Path>) -> Result<[u32; 2]> {
    let path = path.as_ref();
    let (width, height) = image::image_dimensions(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;
    Ok([width, height])
}
