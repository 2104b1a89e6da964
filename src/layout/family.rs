use super::LayoutDescriptor;
use crate::extent::{Extent, Hemisphere};
use serde::Serialize;
use std::fmt;

/// Width of one unsigned sample in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementWidth {
    One,
    Two,
}

impl ElementWidth {
    pub fn bytes(self) -> usize {
        match self {
            ElementWidth::One => 1,
            ElementWidth::Two => 2,
        }
    }
}

/// The six grid families a raw mask can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MaskFamily {
    Grid12North,
    Grid12South,
    Grid25North,
    Grid25South,
    /// 16-bit north grid ("ntb").
    Wide25North,
    /// 16-bit south grid ("stb").
    Wide25South,
}

impl MaskFamily {
    pub fn hemisphere(self) -> Hemisphere {
        match self {
            MaskFamily::Grid12North | MaskFamily::Grid25North | MaskFamily::Wide25North => {
                Hemisphere::North
            }
            MaskFamily::Grid12South | MaskFamily::Grid25South | MaskFamily::Wide25South => {
                Hemisphere::South
            }
        }
    }

    /// (rows, cols)
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            MaskFamily::Grid12North => (896, 608),
            MaskFamily::Grid12South => (664, 632),
            MaskFamily::Grid25North | MaskFamily::Wide25North => (448, 304),
            MaskFamily::Grid25South | MaskFamily::Wide25South => (332, 316),
        }
    }

    pub fn element_width(self) -> ElementWidth {
        match self {
            MaskFamily::Wide25North | MaskFamily::Wide25South => ElementWidth::Two,
            _ => ElementWidth::One,
        }
    }

    /// Headerless descriptor for this family.
    pub fn descriptor(self) -> LayoutDescriptor {
        let (rows, cols) = self.dimensions();
        let hemisphere = self.hemisphere();
        LayoutDescriptor {
            family: self,
            rows,
            cols,
            element_width: self.element_width(),
            header_len: 0,
            hemisphere,
            extent: Extent::for_hemisphere(hemisphere),
        }
    }
}

impl fmt::Display for MaskFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaskFamily::Grid12North => "12n",
            MaskFamily::Grid12South => "12s",
            MaskFamily::Grid25North => "25n",
            MaskFamily::Grid25South => "25s",
            MaskFamily::Wide25North => "ntb",
            MaskFamily::Wide25South => "stb",
        };
        write!(f, "{name}")
    }
}
