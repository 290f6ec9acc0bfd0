//! Resolver output value objects.

use fragmat_parser::MaterialRecord;
use serde::{Serialize, Serializer};
use std::fmt;

/// Placeholder color for results no strategy could resolve
pub const SENTINEL_MAGENTA: [u8; 4] = [255, 0, 255, 255];
/// Placeholder color for results that only found a reference material
pub const SENTINEL_PURPLE: [u8; 4] = [128, 0, 128, 255];

pub const UNKNOWN_TAG: &str = "UNKNOWN";

/// Which strategy produced a [`MaterialInfo`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessMethod {
    /// Decoded from the addressed record
    Standard,
    /// The addressed record raised a decode fault; holds the fault message
    StandardFailed(String),
    /// Only a sibling record at the given index could be decoded
    ReferenceComparison(usize),
    /// Sentinel placeholder
    Default,
}

impl fmt::Display for AccessMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMethod::Standard => f.write_str("Standard"),
            AccessMethod::StandardFailed(message) => {
                write!(f, "Standard access failed: {message}")
            }
            AccessMethod::ReferenceComparison(index) => {
                write!(f, "Reference comparison (index {index})")
            }
            AccessMethod::Default => f.write_str("Default"),
        }
    }
}

impl Serialize for AccessMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Channels of the sibling record used for comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceMaterial {
    pub index: usize,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialInfo {
    pub material_index: usize,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub rendered_faces: String,
    pub stroke: String,
    pub is_valid: bool,
    pub access_method: AccessMethod,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error_details: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub exception_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceMaterial>,
}

impl MaterialInfo {
    /// Result decoded straight from the addressed record
    pub fn from_record(index: usize, record: &MaterialRecord) -> Self {
        Self {
            material_index: index,
            r: record.r,
            g: record.g,
            b: record.b,
            a: record.a,
            rendered_faces: record.rendered_faces.to_string(),
            stroke: record.stroke.to_string(),
            is_valid: true,
            access_method: AccessMethod::Standard,
            error_details: String::new(),
            exception_type: String::new(),
            reference: None,
        }
    }

    /// Magenta placeholder carrying `error` as its explanation
    pub fn placeholder<E: Into<String>>(index: usize, error: E) -> Self {
        let [r, g, b, a] = SENTINEL_MAGENTA;
        Self {
            material_index: index,
            r,
            g,
            b,
            a,
            rendered_faces: UNKNOWN_TAG.to_string(),
            stroke: UNKNOWN_TAG.to_string(),
            is_valid: false,
            access_method: AccessMethod::Default,
            error_details: error.into(),
            exception_type: String::new(),
            reference: None,
        }
    }

    /// Purple placeholder pointing at a decodable sibling record
    pub fn reference_only(index: usize, reference_index: usize, reference: &MaterialRecord) -> Self {
        let [r, g, b, a] = SENTINEL_PURPLE;
        Self {
            r,
            g,
            b,
            a,
            access_method: AccessMethod::ReferenceComparison(reference_index),
            reference: Some(ReferenceMaterial {
                index: reference_index,
                r: reference.r,
                g: reference.g,
                b: reference.b,
                a: reference.a,
            }),
            ..Self::placeholder(index, "Could not access directly")
        }
    }

    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn reference_index(&self) -> Option<usize> {
        self.reference.map(|r| r.index)
    }

    /// `#RRGGBB`, alpha omitted
    pub fn hex_color(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for MaterialInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Material #{}:", self.material_index)?;
        writeln!(
            f,
            "  Color: rgba({},{},{},{}) - Hex: {}",
            self.r,
            self.g,
            self.b,
            self.a,
            self.hex_color()
        )?;
        writeln!(f, "  Faces: {}, Stroke: {}", self.rendered_faces, self.stroke)?;
        writeln!(
            f,
            "  Valid: {}, Access Method: {}",
            self.is_valid, self.access_method
        )?;
        if !self.error_details.is_empty() {
            writeln!(f, "  Error: {}", self.error_details)?;
        }
        if !self.exception_type.is_empty() {
            writeln!(f, "  Exception: {}", self.exception_type)?;
        }
        if let Some(reference) = &self.reference {
            writeln!(f, "  Reference Index: {}", reference.index)?;
            writeln!(
                f,
                "  Reference Color: rgba({},{},{},{})",
                reference.r, reference.g, reference.b, reference.a
            )?;
        }
        Ok(())
    }
}
