use serde::{Deserialize, Serialize};
use std::fmt;

/// Northern or southern polar stereographic grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// +1 for north, -1 for south.
    pub fn sign(self) -> i8 {
        match self {
            Hemisphere::North => 1,
            Hemisphere::South => -1,
        }
    }

    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Hemisphere::North),
            -1 => Some(Hemisphere::South),
            _ => None,
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hemisphere::North => write!(f, "north (+1)"),
            Hemisphere::South => write!(f, "south (-1)"),
        }
    }
}

/// Bounding box of a grid in projected meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

pub const NORTH_EXTENT: Extent = Extent {
    xmin: -3_850_000.0,
    xmax: 3_750_000.0,
    ymin: -5_350_000.0,
    ymax: 5_850_000.0,
};

pub const SOUTH_EXTENT: Extent = Extent {
    xmin: -3_950_000.0,
    xmax: 3_950_000.0,
    ymin: -3_950_000.0,
    ymax: 4_350_000.0,
};

impl Extent {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, String> {
        if !xmin.is_finite() || !xmax.is_finite() || !ymin.is_finite() || !ymax.is_finite() {
            return Err("Extent values must be finite".to_string());
        }

        if xmin > xmax || ymin > ymax {
            return Err("Min values must be <= max values".to_string());
        }

        Ok(Extent {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// The canonical grid extent for a hemisphere. Never derived from file content.
    pub fn for_hemisphere(hemisphere: Hemisphere) -> Self {
        match hemisphere {
            Hemisphere::North => NORTH_EXTENT,
            Hemisphere::South => SOUTH_EXTENT,
        }
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Cell size (x, y) in meters for a grid of `rows` x `cols` covering this extent.
    pub fn pixel_size(&self, rows: usize, cols: usize) -> Option<(f64, f64)> {
        if rows == 0 || cols == 0 {
            return None;
        }
        Some((self.width() / cols as f64, self.height() / rows as f64))
    }

    /// Same extent with the lower-left corner moved to (0, 0).
    pub fn translated_to_origin(&self) -> Self {
        Extent {
            xmin: 0.0,
            xmax: self.width(),
            ymin: 0.0,
            ymax: self.height(),
        }
    }

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.xmin, self.xmax, self.ymin, self.ymax)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_extent_min_max_order() {
        assert!(Extent::new(-1.0, 1.0, -2.0, 2.0).is_ok());
        assert!(Extent::new(1.0, -1.0, 0.0, 1.0).is_err());
        assert!(Extent::new(0.0, 1.0, 1.0, 0.0).is_err());
        assert!(Extent::new(f64::NAN, 1.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_canonical_extents() {
        assert_eq!(
            Extent::for_hemisphere(Hemisphere::North).as_tuple(),
            (-3_850_000.0, 3_750_000.0, -5_350_000.0, 5_850_000.0)
        );
        assert_eq!(
            Extent::for_hemisphere(Hemisphere::South).as_tuple(),
            (-3_950_000.0, 3_950_000.0, -3_950_000.0, 4_350_000.0)
        );
    }

    #[test]
    fn test_pixel_size_matches_grid_resolution() {
        let north = Extent::for_hemisphere(Hemisphere::North);
        assert_eq!(north.pixel_size(896, 608), Some((12_500.0, 12_500.0)));
        assert_eq!(north.pixel_size(448, 304), Some((25_000.0, 25_000.0)));

        let south = Extent::for_hemisphere(Hemisphere::South);
        assert_eq!(south.pixel_size(664, 632), Some((12_500.0, 12_500.0)));
        assert_eq!(south.pixel_size(332, 316), Some((25_000.0, 25_000.0)));

        assert_eq!(north.pixel_size(0, 10), None);
    }

    #[test]
    fn test_translated_to_origin() {
        let shifted = NORTH_EXTENT.translated_to_origin();
        assert_eq!(shifted.as_tuple(), (0.0, 7_600_000.0, 0.0, 11_200_000.0));
    }

    #[test]
    fn test_hemisphere_sign() {
        assert_eq!(Hemisphere::North.sign(), 1);
        assert_eq!(Hemisphere::South.sign(), -1);
        assert_eq!(Hemisphere::from_sign(-1), Some(Hemisphere::South));
        assert_eq!(Hemisphere::from_sign(0), None);
    }
}
