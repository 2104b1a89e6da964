use crate::error::Result;
use crate::extent::{Extent, Hemisphere};
use crate::raster::Raster;
use std::fmt;

pub trait MaskReader {
    fn read_mask(&self) -> Result<DecodedMask>;
}

/// The decoded grid together with where it sits on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMask {
    pub raster: Raster,
    pub extent: Extent,
    pub hemisphere: Hemisphere,
}

impl DecodedMask {
    pub fn into_parts(self) -> (Raster, Extent, Hemisphere) {
        (self.raster, self.extent, self.hemisphere)
    }

    /// Cell size (x, y) in meters.
    pub fn pixel_size(&self) -> Option<(f64, f64)> {
        let (rows, cols) = self.raster.shape();
        self.extent.pixel_size(rows, cols)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    RawBinary,
    Hdf4,
}

impl fmt::Display for DecodedMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\nHemisphere: {}\nExtent: {}",
            self.raster, self.hemisphere, self.extent
        )?;
        if let Some((dx, dy)) = self.pixel_size() {
            write!(f, "\nPixel size: {dx} x {dy} m")?;
        }
        Ok(())
    }
}
