use std::{fmt::Debug, str::FromStr};

use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

/// Scalar type of the samples in a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    #[serde(rename = "uint8", alias = "u8")]
    U8,
    #[serde(rename = "uint16", alias = "u16")]
    U16,
    #[serde(rename = "float32", alias = "f32")]
    F32,
}

impl ElementType {
    /// Number of bytes used by one sample.
    pub fn size_bytes(self) -> usize {
        match self {
            ElementType::U8 => 1,
            ElementType::U16 => 2,
            ElementType::F32 => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementType::U8 => "uint8",
            ElementType::U16 => "uint16",
            ElementType::F32 => "float32",
        }
    }

    pub fn is_integer(self) -> bool {
        !matches!(self, ElementType::F32)
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ElementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uint8" | "u8" => Ok(ElementType::U8),
            "uint16" | "u16" => Ok(ElementType::U16),
            "float32" | "f32" => Ok(ElementType::F32),
            _ => Err(Error::invalid_parameter(format!(
                "Invalid element type: {s}, expected uint8, uint16 or float32"
            ))),
        }
    }
}

/// A scalar that can be stored in a [`crate::PixelGrid`].
///
/// Samples are plain old data, so a grid can be reinterpreted as bytes
/// (and back) without copying each value.
pub trait Sample:
    bytemuck::Pod + PartialEq + Debug + std::fmt::Display + FromStr + Send + Sync + 'static
{
    const ELEMENT_TYPE: ElementType;

    /// Text form used by the delimited writer. Integer types ignore `precision`.
    fn format_text(&self, _precision: usize) -> String {
        self.to_string()
    }
}

impl Sample for u8 {
    const ELEMENT_TYPE: ElementType = ElementType::U8;
}

impl Sample for u16 {
    const ELEMENT_TYPE: ElementType = ElementType::U16;
}

impl Sample for f32 {
    const ELEMENT_TYPE: ElementType = ElementType::F32;

    fn format_text(&self, precision: usize) -> String {
        format!("{:.*}", precision, self)
    }
}
