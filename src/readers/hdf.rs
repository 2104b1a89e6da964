//! HDF4 mask containers
//!
//! Only the mapping from file name to hemisphere and dataset name lives here; container
//! parsing is delegated to GDAL's HDF4 driver (cargo feature `hdf`).

use super::{DecodedMask, MaskReader};
use crate::error::{MaskError, Result};
use crate::extent::{Extent, Hemisphere};
use std::path::PathBuf;

/// Dataset holding the grid in every container that is not a NIC product.
pub const LANDMASK_DATASET: &str = "landmask";

const NIC_TOKEN: &str = "_nic_";

/// Later entries win, like the raw layout rules.
const HEMISPHERE_RULES: &[(&[&str], Hemisphere)] = &[
    (&["6n", "12n", "25n"], Hemisphere::North),
    (&["6s", "12s", "25s"], Hemisphere::South),
];

const NIC_DATASETS: &[(&str, &str)] = &[
    ("6s", "amsr_nic_6s_6250_band1"),
    ("12s", "amsr_nic_12s_12500_band1"),
    ("25s", "amsr_nic_25s_25000_band1"),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HdfTarget {
    pub hemisphere: Hemisphere,
    pub extent: Extent,
    pub dataset_name: &'static str,
}

pub fn resolve_hdf_target(identifier: &str) -> Result<HdfTarget> {
    let hemisphere = HEMISPHERE_RULES
        .iter()
        .filter(|(tokens, _)| tokens.iter().any(|t| identifier.contains(t)))
        .map(|&(_, hemisphere)| hemisphere)
        .last()
        .ok_or_else(|| MaskError::UnresolvedLayout {
            identifier: identifier.to_string(),
        })?;

    let dataset_name = if identifier.contains(NIC_TOKEN) {
        NIC_DATASETS
            .iter()
            .filter(|(token, _)| identifier.contains(token))
            .map(|&(_, name)| name)
            .last()
            .ok_or_else(|| MaskError::UnresolvedDataset {
                identifier: identifier.to_string(),
            })?
    } else {
        LANDMASK_DATASET
    };

    log::debug!(
        "resolved HDF '{}' to dataset '{}' ({})",
        identifier,
        dataset_name,
        hemisphere
    );

    Ok(HdfTarget {
        hemisphere,
        extent: Extent::for_hemisphere(hemisphere),
        dataset_name,
    })
}

/// Picks the `SUBDATASET_n_NAME` whose matching `_DESC` names `dataset`.
///
/// GDAL describes HDF4 scientific datasets as `[896x608] landmask (8-bit unsigned integer)`.
pub fn find_subdataset(entries: &[String], dataset: &str) -> Option<String> {
    entries.iter().find_map(|entry| {
        let (key, desc) = entry.split_once('=')?;
        let index = key.strip_prefix("SUBDATASET_")?.strip_suffix("_DESC")?;
        if !desc.split_whitespace().any(|word| word == dataset) {
            return None;
        }

        let name_key = format!("SUBDATASET_{index}_NAME=");
        entries
            .iter()
            .find_map(|e| e.strip_prefix(name_key.as_str()))
            .map(str::to_string)
    })
}

pub struct HdfMaskReader {
    pub file_name: PathBuf,
}

#[cfg(feature = "hdf")]
impl MaskReader for HdfMaskReader {
    fn read_mask(&self) -> Result<DecodedMask> {
        use crate::raster::Raster;
        use gdal::raster::GdalDataType;
        use gdal::{Dataset, Metadata};
        use ndarray::Array2;

        let target = resolve_hdf_target(&self.file_name.to_string_lossy())?;
        let not_found = || MaskError::DatasetNotFound {
            dataset: target.dataset_name.to_string(),
            path: self.file_name.clone(),
        };

        let container = Dataset::open(&self.file_name)?;
        let entries = container
            .metadata_domain("SUBDATASETS")
            .ok_or_else(not_found)?;
        let subdataset = find_subdataset(&entries, target.dataset_name).ok_or_else(not_found)?;
        log::debug!("opening HDF subdataset {}", subdataset);

        let dataset = Dataset::open(&subdataset)?;
        let band = dataset.rasterband(1)?;
        let (cols, rows) = dataset.raster_size();
        let window = (cols, rows);

        let shape_error = |_: ndarray::ShapeError| MaskError::ShapeMismatch {
            expected: (rows, cols, 0),
            actual: (rows, cols, 0),
        };

        let raster = match band.band_type() {
            GdalDataType::UInt8 => {
                let buffer = band.read_as::<u8>((0, 0), window, window, None)?;
                Raster::U8(
                    Array2::from_shape_vec((rows, cols), buffer.data().to_vec())
                        .map_err(shape_error)?,
                )
            }
            GdalDataType::UInt16 => {
                let buffer = band.read_as::<u16>((0, 0), window, window, None)?;
                Raster::U16(
                    Array2::from_shape_vec((rows, cols), buffer.data().to_vec())
                        .map_err(shape_error)?,
                )
            }
            other => {
                return Err(MaskError::UnsupportedSampleType {
                    data_type: format!("{other:?}"),
                });
            }
        };

        Ok(DecodedMask {
            raster,
            extent: target.extent,
            hemisphere: target.hemisphere,
        })
    }
}

#[cfg(not(feature = "hdf"))]
impl MaskReader for HdfMaskReader {
    fn read_mask(&self) -> Result<DecodedMask> {
        // Name errors still surface first.
        resolve_hdf_target(&self.file_name.to_string_lossy())?;
        Err(MaskError::HdfUnavailable {
            path: self.file_name.clone(),
        })
    }
}
