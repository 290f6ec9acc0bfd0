//! Field ids used to reach the material collection from the root table.
//!
//! Writers of different versions have placed `meshes` and `materials` at
//! different ids, so both are configurable.

use crate::material::{RenderedFaces, Stroke, fields};
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SchemaLayout {
    /// Field id of `Model.meshes`
    pub model_meshes_field: u16,
    /// Field id of `Meshes.materials`
    pub meshes_materials_field: u16,
}

impl Default for SchemaLayout {
    fn default() -> Self {
        Self {
            model_meshes_field: 6,
            meshes_materials_field: 6,
        }
    }
}

impl SchemaLayout {
    /// Highest field id a vtable can describe: its length is a `u16` covering
    /// the 4-byte header plus one `u16` slot per id.
    pub const MAX_FIELD_ID: u16 = (u16::MAX - 4) / 2 - 1;

    /// Fixed description of the material schema as this reader understands it.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SchemaLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<&str> = RenderedFaces::VARIANTS.iter().map(|v| v.as_str()).collect();
        let strokes: Vec<&str> = Stroke::VARIANTS.iter().map(|v| v.as_str()).collect();

        writeln!(f, "Material Class Structure:")?;
        writeln!(f, "  Material Fields: {}", fields::NAMES.join(", "))?;
        writeln!(f, "  RenderedFaces: {}", faces.join(", "))?;
        writeln!(f, "  Stroke: {}", strokes.join(", "))?;
        writeln!(f)?;
        writeln!(f, "Meshes Table:")?;
        writeln!(
            f,
            "  Materials Field: id {} ([Material])",
            self.meshes_materials_field
        )?;
        writeln!(f, "Model Table:")?;
        writeln!(f, "  Meshes Field: id {} (Meshes)", self.model_meshes_field)
    }
}
