use crate::error::{MaskError, Result};
use crate::layout::{ElementWidth, LayoutDescriptor};
use ndarray::Array2;
use std::collections::BTreeMap;
use std::fmt;

/// Row-major grid of unsigned samples. Row 0 is the first row stored in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raster {
    U8(Array2<u8>),
    U16(Array2<u16>),
}

impl Raster {
    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Raster::U8(a) => a.dim(),
            Raster::U16(a) => a.dim(),
        }
    }

    pub fn element_width(&self) -> ElementWidth {
        match self {
            Raster::U8(_) => ElementWidth::One,
            Raster::U16(_) => ElementWidth::Two,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u16> {
        match self {
            Raster::U8(a) => a.get((row, col)).map(|&v| u16::from(v)),
            Raster::U16(a) => a.get((row, col)).copied(),
        }
    }

    pub fn len(&self) -> usize {
        let (rows, cols) = self.shape();
        rows * cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Samples widened to u16, in row-major order.
    pub fn values(&self) -> Box<dyn Iterator<Item = u16> + '_> {
        match self {
            Raster::U8(a) => Box::new(a.iter().map(|&v| u16::from(v))),
            Raster::U16(a) => Box::new(a.iter().copied()),
        }
    }

    pub fn min_max(&self) -> Option<(u16, u16)> {
        self.values().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Number of samples per distinct value. Masks are categorical, so this is short.
    pub fn value_counts(&self) -> BTreeMap<u16, usize> {
        let mut counts = BTreeMap::new();
        for v in self.values() {
            *counts.entry(v).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.shape();
        let (min_value, max_value) = match self.min_max() {
            Some((lo, hi)) => (lo.to_string(), hi.to_string()),
            None => ("n/a".to_string(), "n/a".to_string()),
        };

        write!(
            f,
            "Rows: {}\nColumns: {}\nSample width: {} byte(s)\nMin value: {}\nMax value: {}",
            rows,
            cols,
            self.element_width().bytes(),
            min_value,
            max_value,
        )
    }
}

/// Decodes the sample block described by `layout` out of `bytes`.
///
/// The header is skipped and exactly `rows * cols` samples are read. Bytes past
/// `layout.required_len()` are ignored. 16-bit samples keep the host byte order.
pub fn decode_samples(bytes: &[u8], layout: &LayoutDescriptor) -> Result<Raster> {
    let required = layout.required_len();
    if bytes.len() < required {
        return Err(MaskError::TruncatedFile {
            expected: required,
            actual: bytes.len(),
        });
    }

    let payload = &bytes[layout.header_len..required];
    let dims = (layout.rows, layout.cols);
    let width = layout.element_width.bytes();
    let shape_error = |_: ndarray::ShapeError| MaskError::ShapeMismatch {
        expected: (layout.rows, layout.cols, width as u8),
        actual: (payload.len() / width, 1, width as u8),
    };

    let raster = match layout.element_width {
        ElementWidth::One => {
            Raster::U8(Array2::from_shape_vec(dims, payload.to_vec()).map_err(shape_error)?)
        }
        ElementWidth::Two => {
            let samples: Vec<u16> = payload
                .chunks_exact(2)
                .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
                .collect();
            Raster::U16(Array2::from_shape_vec(dims, samples).map_err(shape_error)?)
        }
    };

    Ok(raster)
}

/// Inverse of [`decode_samples`]: a zero-filled header followed by the samples.
pub fn encode_samples(raster: &Raster, layout: &LayoutDescriptor) -> Result<Vec<u8>> {
    let (rows, cols) = raster.shape();
    if (rows, cols) != (layout.rows, layout.cols) || raster.element_width() != layout.element_width
    {
        return Err(MaskError::ShapeMismatch {
            expected: (layout.rows, layout.cols, layout.element_width.bytes() as u8),
            actual: (rows, cols, raster.element_width().bytes() as u8),
        });
    }

    let mut bytes = vec![0u8; layout.header_len];
    bytes.reserve(layout.payload_len());
    match raster {
        Raster::U8(a) => bytes.extend(a.iter().copied()),
        Raster::U16(a) => {
            for v in a.iter() {
                bytes.extend_from_slice(&v.to_ne_bytes());
            }
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{MaskFamily, resolve_layout};

    fn tiny_layout(width: ElementWidth, header_len: usize) -> LayoutDescriptor {
        let family = match width {
            ElementWidth::One => MaskFamily::Grid25North,
            ElementWidth::Two => MaskFamily::Wide25North,
        };
        LayoutDescriptor {
            rows: 2,
            cols: 3,
            ..family.descriptor()
        }
        .with_header_len(header_len)
    }

    #[test]
    fn test_decode_one_byte_row_major() {
        let layout = tiny_layout(ElementWidth::One, 0);
        let raster = decode_samples(&[1, 2, 3, 4, 5, 6], &layout).unwrap();

        assert_eq!(raster.shape(), (2, 3));
        assert_eq!(raster.get(0, 0), Some(1));
        assert_eq!(raster.get(0, 2), Some(3));
        assert_eq!(raster.get(1, 0), Some(4));
        assert_eq!(raster.get(1, 2), Some(6));
        assert_eq!(raster.get(2, 0), None);
    }

    #[test]
    fn test_decode_skips_header() {
        let layout = tiny_layout(ElementWidth::One, 4);
        let bytes = [0xAA, 0xBB, 0xCC, 0xDD, 10, 20, 30, 40, 50, 60];
        let raster = decode_samples(&bytes, &layout).unwrap();

        assert_eq!(raster.values().collect::<Vec<_>>(), vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_decode_two_byte_native_order() {
        let layout = tiny_layout(ElementWidth::Two, 0);
        let expected: [u16; 6] = [0x0102, 0xFF00, 7, 300, 65535, 0];
        let bytes: Vec<u8> = expected.iter().flat_map(|v| v.to_ne_bytes()).collect();

        let raster = decode_samples(&bytes, &layout).unwrap();
        assert!(matches!(raster, Raster::U16(_)));
        assert_eq!(raster.values().collect::<Vec<_>>(), expected.to_vec());
        assert_eq!(raster.get(1, 0), Some(300));
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let layout = tiny_layout(ElementWidth::One, 0);
        let raster = decode_samples(&[1, 2, 3, 4, 5, 6, 99, 99], &layout).unwrap();
        assert_eq!(raster.min_max(), Some((1, 6)));
    }

    #[test]
    fn test_decode_truncated() {
        let layout = tiny_layout(ElementWidth::Two, 2);
        let err = decode_samples(&[0u8; 13], &layout).unwrap_err();
        match err {
            MaskError::TruncatedFile { expected, actual } => {
                assert_eq!(expected, 14);
                assert_eq!(actual, 13);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_encode_then_decode_region_layout() {
        let layout = resolve_layout("region_s.msk").unwrap();
        let data = Array2::from_shape_fn((layout.rows, layout.cols), |(r, c)| {
            ((r * 7 + c * 3) % 251) as u8
        });
        let raster = Raster::U8(data);

        let bytes = encode_samples(&raster, &layout).unwrap();
        assert_eq!(bytes.len(), layout.required_len());
        assert!(bytes[..300].iter().all(|&b| b == 0));

        assert_eq!(decode_samples(&bytes, &layout).unwrap(), raster);
    }

    #[test]
    fn test_encode_then_decode_wide_layout() {
        let layout = resolve_layout("stb_land.msk").unwrap();
        let data = Array2::from_shape_fn((layout.rows, layout.cols), |(r, c)| {
            (r * layout.cols + c) as u16
        });
        let raster = Raster::U16(data);

        let bytes = encode_samples(&raster, &layout).unwrap();
        assert_eq!(decode_samples(&bytes, &layout).unwrap(), raster);
    }

    #[test]
    fn test_encode_rejects_mismatched_raster() {
        let layout = tiny_layout(ElementWidth::Two, 0);
        let raster = Raster::U8(Array2::zeros((2, 3)));
        assert!(matches!(
            encode_samples(&raster, &layout),
            Err(MaskError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_value_counts_and_display() {
        let layout = tiny_layout(ElementWidth::One, 0);
        let raster = decode_samples(&[0, 0, 1, 1, 1, 254], &layout).unwrap();

        let counts = raster.value_counts();
        assert_eq!(counts.get(&0), Some(&2));
        assert_eq!(counts.get(&1), Some(&3));
        assert_eq!(counts.get(&254), Some(&1));

        let summary = raster.to_string();
        assert!(summary.contains("Rows: 2"));
        assert!(summary.contains("Max value: 254"));
    }
}
