//! Mask layout resolution
//!
//! A mask file carries no self-describing header, so its byte layout is inferred from
//! substring tokens in its name. Resolution walks an ordered table of independent rules;
//! every rule whose token appears in the identifier fires and overrides its fields, so
//! a later rule wins over an earlier one. The final `region` rule only overrides the
//! header length and therefore stacks on top of whichever size rule fired.
//!
//! ```rust
//! use psmask::layout::{resolve_layout, ElementWidth};
//! use psmask::extent::Hemisphere;
//!
//! let layout = resolve_layout("masks/region_n.msk").unwrap();
//! assert_eq!((layout.rows, layout.cols), (448, 304));
//! assert_eq!(layout.header_len, 300);
//! assert_eq!(layout.element_width, ElementWidth::One);
//! assert_eq!(layout.hemisphere, Hemisphere::North);
//! ```

pub mod family;
pub mod rules;

pub use family::{ElementWidth, MaskFamily};
pub use rules::{LAYOUT_RULES, LayoutOverride, LayoutRule, REGION_HEADER_LEN};

use crate::error::{MaskError, Result};
use crate::extent::{Extent, Hemisphere};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Decode parameters for one mask family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutDescriptor {
    pub family: MaskFamily,
    pub rows: usize,
    pub cols: usize,
    pub element_width: ElementWidth,
    pub header_len: usize,
    pub hemisphere: Hemisphere,
    pub extent: Extent,
}

impl LayoutDescriptor {
    /// Bytes of sample data following the header.
    pub fn payload_len(&self) -> usize {
        self.rows * self.cols * self.element_width.bytes()
    }

    /// Bytes the decoder reads: header plus payload. Never more.
    pub fn required_len(&self) -> usize {
        self.header_len + self.payload_len()
    }

    pub fn sample_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn with_header_len(self, header_len: usize) -> Self {
        Self { header_len, ..self }
    }
}

impl fmt::Display for LayoutDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Family: {}\nRows: {}\nColumns: {}\nElement width: {} byte(s)\nHeader: {} bytes\nHemisphere: {}\nExtent: {}",
            self.family,
            self.rows,
            self.cols,
            self.element_width.bytes(),
            self.header_len,
            self.hemisphere,
            self.extent,
        )
    }
}

/// Resolves the layout of a mask file from its identifier (usually the path as given).
pub fn resolve_layout(identifier: &str) -> Result<LayoutDescriptor> {
    let mut family = None;
    let mut header_len = 0;
    let mut fired = Vec::new();

    for rule in LAYOUT_RULES {
        if !rule.matches(identifier) {
            continue;
        }
        match rule.apply {
            LayoutOverride::Family(f) => {
                family = Some(f);
                fired.push(f);
            }
            LayoutOverride::HeaderLength(len) => header_len = len,
        }
    }

    let family = family.ok_or_else(|| MaskError::UnresolvedLayout {
        identifier: identifier.to_string(),
    })?;

    if fired.len() > 1 {
        log::warn!(
            "'{}' matches several mask families {:?}; using the last one ({})",
            identifier,
            fired,
            family
        );
    }

    let layout = family.descriptor().with_header_len(header_len);
    log::debug!(
        "resolved '{}' to family {} ({}x{}, {} byte samples, {} byte header)",
        identifier,
        layout.family,
        layout.rows,
        layout.cols,
        layout.element_width.bytes(),
        layout.header_len
    );

    Ok(layout)
}

pub fn resolve_layout_for_path(path: &Path) -> Result<LayoutDescriptor> {
    resolve_layout(&path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_layout(
        layout: &LayoutDescriptor,
        dims: (usize, usize),
        width: ElementWidth,
        header_len: usize,
        hemisphere: Hemisphere,
    ) {
        assert_eq!((layout.rows, layout.cols), dims);
        assert_eq!(layout.element_width, width);
        assert_eq!(layout.header_len, header_len);
        assert_eq!(layout.hemisphere, hemisphere);
        assert_eq!(layout.extent, Extent::for_hemisphere(hemisphere));
    }

    #[test]
    fn test_12n_layout() {
        for id in ["gsfc_12n.msk", "masks/amsr_12n_land.bin", "12n"] {
            let layout = resolve_layout(id).unwrap();
            assert_layout(&layout, (896, 608), ElementWidth::One, 0, Hemisphere::North);
            assert_eq!(
                layout.extent.as_tuple(),
                (-3_850_000.0, 3_750_000.0, -5_350_000.0, 5_850_000.0)
            );
        }
    }

    #[test]
    fn test_12s_layout() {
        let layout = resolve_layout("masks/gsfc_12s.msk").unwrap();
        assert_layout(&layout, (664, 632), ElementWidth::One, 0, Hemisphere::South);
        assert_eq!(
            layout.extent.as_tuple(),
            (-3_950_000.0, 3_950_000.0, -3_950_000.0, 4_350_000.0)
        );
    }

    #[test]
    fn test_25n_aliases_share_one_layout() {
        for id in ["gsfc_25n.msk", "pole_n.msk", "ltln_N17.msk"] {
            let layout = resolve_layout(id).unwrap();
            assert_eq!(layout.family, MaskFamily::Grid25North);
            assert_layout(&layout, (448, 304), ElementWidth::One, 0, Hemisphere::North);
        }
    }

    #[test]
    fn test_25s_layout() {
        let layout = resolve_layout("gsfc_25s.msk").unwrap();
        assert_layout(&layout, (332, 316), ElementWidth::One, 0, Hemisphere::South);
    }

    #[test]
    fn test_two_byte_families() {
        let ntb = resolve_layout("ntb_land.msk").unwrap();
        assert_layout(&ntb, (448, 304), ElementWidth::Two, 0, Hemisphere::North);
        assert_eq!(ntb.required_len(), 448 * 304 * 2);

        let stb = resolve_layout("stb_land.msk").unwrap();
        assert_layout(&stb, (332, 316), ElementWidth::Two, 0, Hemisphere::South);
    }

    #[test]
    fn test_region_files_carry_header() {
        let north = resolve_layout("region_n.msk").unwrap();
        assert_layout(&north, (448, 304), ElementWidth::One, 300, Hemisphere::North);
        assert_eq!(north.required_len(), 300 + 448 * 304);

        let south = resolve_layout("region_s.msk").unwrap();
        assert_layout(&south, (332, 316), ElementWidth::One, 300, Hemisphere::South);
    }

    #[test]
    fn test_region_header_stacks_on_any_size_rule() {
        let layout = resolve_layout("region_12n.msk").unwrap();
        assert_layout(&layout, (896, 608), ElementWidth::One, 300, Hemisphere::North);
    }

    #[test]
    fn test_later_rule_wins_when_several_match() {
        // 12n fires first, then 25s overrides it.
        let layout = resolve_layout("gsfc_12n_25s.msk").unwrap();
        assert_eq!(layout.family, MaskFamily::Grid25South);

        // "ntb" comes after the 25n size rule.
        let layout = resolve_layout("pole_n_ntb.msk").unwrap();
        assert_layout(&layout, (448, 304), ElementWidth::Two, 0, Hemisphere::North);
    }

    #[test]
    fn test_region_alone_is_not_a_layout() {
        assert!(matches!(
            resolve_layout("region.msk"),
            Err(MaskError::UnresolvedLayout { .. })
        ));
    }

    #[test]
    fn test_unknown_identifier_fails() {
        let err = resolve_layout("unknown.msk").unwrap_err();
        match err {
            MaskError::UnresolvedLayout { identifier } => assert_eq!(identifier, "unknown.msk"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolution_uses_whole_path() {
        let layout = resolve_layout_for_path(Path::new("data/region/gsfc_25n.msk")).unwrap();
        assert_eq!(layout.header_len, 300);
    }
}
