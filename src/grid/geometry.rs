use serde_derive::{Deserialize, Serialize};

use super::{ChannelMode, ElementType};
use crate::error::{Error, Result};

/// Everything needed to interpret an untagged raw file: its shape and the
/// type of its samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geometry {
    /// Pixel columns.
    pub width: usize,
    /// Pixel rows.
    pub height: usize,
    /// Samples per pixel.
    pub channels: usize,
    pub element_type: ElementType,
}

impl Geometry {
    pub fn new(width: usize, height: usize, channels: usize, element_type: ElementType) -> Self {
        Self {
            width,
            height,
            channels,
            element_type,
        }
    }

    /// `width * height * channels`, or an error if it does not fit in memory.
    pub fn sample_count(&self) -> Result<usize> {
        expected_samples(self.width, self.height, self.channels)
    }

    pub fn byte_len(&self) -> Result<usize> {
        self.sample_count()?
            .checked_mul(self.element_type.size_bytes())
            .ok_or_else(|| Error::invalid_parameter(format!("{self} overflows the address space")))
    }

    pub fn channel_mode(&self) -> ChannelMode {
        ChannelMode::from_channels(self.channels)
    }
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}x{}x{} {}",
            self.width, self.height, self.channels, self.element_type
        )
    }
}

pub(crate) fn expected_samples(width: usize, height: usize, channels: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or_else(|| {
            Error::invalid_parameter(format!(
                "{width}x{height}x{channels} overflows the address space"
            ))
        })
}
