use super::{DecodedMask, MaskReader};
use crate::error::Result;
use crate::layout::{LayoutDescriptor, resolve_layout, resolve_layout_for_path};
use crate::raster::decode_samples;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Headerless (or fixed-header) binary mask whose layout is encoded in its name.
pub struct RawMaskReader {
    pub file_name: PathBuf,
}

impl MaskReader for RawMaskReader {
    fn read_mask(&self) -> Result<DecodedMask> {
        let layout = resolve_layout_for_path(&self.file_name)?;
        let bytes = read_bounded(&self.file_name, &layout)?;
        into_decoded(&bytes, &layout)
    }
}

/// Resolves the layout from `path`, reads at most the bytes it needs and decodes them.
pub fn decode_mask(path: impl AsRef<Path>) -> Result<DecodedMask> {
    RawMaskReader {
        file_name: path.as_ref().to_path_buf(),
    }
    .read_mask()
}

/// Same as [`decode_mask`] for a buffer already in memory.
pub fn decode_mask_bytes(identifier: &str, bytes: &[u8]) -> Result<DecodedMask> {
    let layout = resolve_layout(identifier)?;
    into_decoded(bytes, &layout)
}

fn into_decoded(bytes: &[u8], layout: &LayoutDescriptor) -> Result<DecodedMask> {
    let raster = decode_samples(bytes, layout)?;
    Ok(DecodedMask {
        raster,
        extent: layout.extent,
        hemisphere: layout.hemisphere,
    })
}

fn read_bounded(path: &Path, layout: &LayoutDescriptor) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    let file_len = file.metadata()?.len();
    let required = layout.required_len();

    if file_len > required as u64 {
        log::warn!(
            "{:?} holds {} bytes past the {} byte mask, ignoring them",
            path,
            file_len - required as u64,
            required
        );
    }

    let mut bytes = Vec::with_capacity(required);
    BufReader::new(file)
        .take(required as u64)
        .read_to_end(&mut bytes)?;
    log::debug!("read {} of {} bytes from {:?}", bytes.len(), required, path);

    Ok(bytes)
}
