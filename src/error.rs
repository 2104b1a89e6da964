use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MaskError>;

#[derive(Error, Debug)]
pub enum MaskError {
    /// The identifier matched no known mask family.
    #[error("no mask layout matches '{identifier}'")]
    UnresolvedLayout { identifier: String },

    #[error("truncated mask file: expected {expected} bytes, found {actual}")]
    TruncatedFile { expected: usize, actual: usize },

    #[error("I/O error while decoding mask: {0}")]
    DecodeIo(#[from] std::io::Error),

    /// A `_nic_` identifier without a 6s/12s/25s resolution token.
    #[error("no HDF dataset name matches '{identifier}'")]
    UnresolvedDataset { identifier: String },

    #[error("dataset '{dataset}' not found in {path:?}")]
    DatasetNotFound { dataset: String, path: PathBuf },

    #[error("unsupported sample type {data_type}, expected 8 or 16-bit unsigned")]
    UnsupportedSampleType { data_type: String },

    #[error("raster shape {actual:?} does not match layout {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize, u8),
        actual: (usize, usize, u8),
    },

    #[cfg(feature = "hdf")]
    #[error("GDAL error: {0}")]
    Hdf(#[from] gdal::errors::GdalError),

    #[error("{path:?} is an HDF container but HDF support was not compiled in (enable the `hdf` feature)")]
    HdfUnavailable { path: PathBuf },
}
