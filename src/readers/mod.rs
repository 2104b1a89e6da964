pub mod hdf;
pub mod raw;
pub mod types;
pub mod utils;

pub use hdf::{HdfMaskReader, HdfTarget, resolve_hdf_target};
pub use raw::{RawMaskReader, decode_mask, decode_mask_bytes};
pub use types::{DecodedMask, FileType, MaskReader};
pub use utils::file_type_from_path;

use std::path::PathBuf;

pub fn create_reader(file_name: impl Into<PathBuf>) -> Box<dyn MaskReader> {
    let file_name = file_name.into();
    match file_type_from_path(&file_name) {
        FileType::RawBinary => Box::new(RawMaskReader { file_name }),
        FileType::Hdf4 => Box::new(HdfMaskReader { file_name }),
    }
}
