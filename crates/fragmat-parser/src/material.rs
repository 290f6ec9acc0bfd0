//! Material records stored in the meshes material collection.

use crate::table::Table;
use fragmat_error::{FragError, Result};
use std::fmt;

/// Field ids of the `Material` table
pub mod fields {
    pub const R: u16 = 0;
    pub const G: u16 = 1;
    pub const B: u16 = 2;
    pub const A: u16 = 3;
    pub const RENDERED_FACES: u16 = 4;
    pub const STROKE: u16 = 5;

    pub const NAMES: [&str; 6] = ["r", "g", "b", "a", "rendered_faces", "stroke"];
}

/// Which faces of a mesh the material renders
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum RenderedFaces {
    One = 0,
    Two = 1,
}

impl RenderedFaces {
    pub const VARIANTS: [RenderedFaces; 2] = [RenderedFaces::One, RenderedFaces::Two];

    pub fn as_str(self) -> &'static str {
        match self {
            RenderedFaces::One => "ONE",
            RenderedFaces::Two => "TWO",
        }
    }
}

impl TryFrom<u8> for RenderedFaces {
    type Error = FragError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(RenderedFaces::One),
            1 => Ok(RenderedFaces::Two),
            other => Err(FragError::decode_invalid_enum(format!(
                "unknown RenderedFaces tag {other}"
            ))),
        }
    }
}

impl fmt::Display for RenderedFaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outline mode of the material
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Stroke {
    Default = 0,
}

impl Stroke {
    pub const VARIANTS: [Stroke; 1] = [Stroke::Default];

    pub fn as_str(self) -> &'static str {
        match self {
            Stroke::Default => "DEFAULT",
        }
    }
}

impl TryFrom<u8> for Stroke {
    type Error = FragError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Stroke::Default),
            other => Err(FragError::decode_invalid_enum(format!(
                "unknown Stroke tag {other}"
            ))),
        }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded material entry
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MaterialRecord {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub rendered_faces: RenderedFaces,
    pub stroke: Stroke,
}

impl MaterialRecord {
    /// Decode a `Material` table. Missing scalar fields take the value 0.
    pub fn decode(table: &Table<'_>) -> Result<Self> {
        let faces_tag = table.field_u8(fields::RENDERED_FACES, 0)?;
        let stroke_tag = table.field_u8(fields::STROKE, 0)?;
        Ok(Self {
            r: table.field_u8(fields::R, 0)?,
            g: table.field_u8(fields::G, 0)?,
            b: table.field_u8(fields::B, 0)?,
            a: table.field_u8(fields::A, 0)?,
            rendered_faces: RenderedFaces::try_from(faces_tag)
                .map_err(|e| e.with_offset(table.position()))?,
            stroke: Stroke::try_from(stroke_tag).map_err(|e| e.with_offset(table.position()))?,
        })
    }

    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fragmat_error::DecodeErrorKind;

    #[test]
    fn tags_round_through_display() {
        assert_eq!(RenderedFaces::try_from(0).unwrap().to_string(), "ONE");
        assert_eq!(RenderedFaces::try_from(1).unwrap().to_string(), "TWO");
        assert_eq!(Stroke::try_from(0).unwrap().to_string(), "DEFAULT");
    }

    #[test]
    fn unknown_tags_are_invalid_enum() {
        let err = RenderedFaces::try_from(2).unwrap_err();
        assert_eq!(err.decode_kind(), Some(&DecodeErrorKind::InvalidEnum));
        assert_eq!(err.category(), "InvalidEnum");
        assert!(Stroke::try_from(1).is_err());
    }
}
