//! Decoder for polar stereographic mask files.
//!
//! Mask files are fixed-layout rasters whose dimensions, sample width, header length and
//! hemisphere are encoded in the file name (`gsfc_12n.msk`, `region_s.msk`, `ntb_land.msk`...).
//! Decoding yields the raster, its canonical extent in projected meters and the hemisphere.
//!
//! ```rust,no_run
//! let mask = psmask::decode_mask("masks/pole_n.msk")?;
//! let (raster, extent, hemisphere) = mask.into_parts();
//! println!("{:?} {} {}", raster.shape(), extent, hemisphere.sign());
//! # Ok::<(), psmask::MaskError>(())
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod extent;
pub mod layout;
pub mod raster;
pub mod readers;

pub use error::{MaskError, Result};
pub use extent::{Extent, Hemisphere};
pub use layout::{LayoutDescriptor, resolve_layout};
pub use raster::{Raster, decode_samples, encode_samples};
pub use readers::{DecodedMask, MaskReader, create_reader, decode_mask, decode_mask_bytes};
