use log::debug;
use ndarray::Array3;

use crate::{
    error::{Error, Result},
    grid::{expected_samples, AnyGrid, ElementType, Geometry, PixelGrid, Sample, SampleBuffer},
};

/// Checks that a flat sample sequence holds exactly `width * height * channels`
/// samples and reshapes it into a row-major grid.
///
/// # Arguments
///
/// * `samples` - The samples in row-major, channel interleaved order.
/// * `width` - Pixel columns.
/// * `height` - Pixel rows.
/// * `channels` - Samples per pixel.
///
/// # Returns
///
/// The grid, or `SizeMismatch` with the expected and actual sample counts.
/// Samples are never reordered, truncated or padded.
pub fn validate<T: Sample>(
    samples: Vec<T>,
    width: usize,
    height: usize,
    channels: usize,
) -> Result<PixelGrid<T>> {
    let expected = expected_samples(width, height, channels)?;
    if samples.len() != expected {
        return Err(Error::SizeMismatch {
            path: None,
            expected,
            actual: samples.len(),
            bytes: None,
        });
    }

    let data = Array3::from_shape_vec((height, width, channels), samples)
        .map_err(Error::invalid_parameter)?;
    Ok(PixelGrid::from_array(data))
}

/// Validates an untyped buffer against its geometry and decodes it into a
/// grid of the geometry's element type.
pub fn validate_buffer(buffer: &SampleBuffer, geometry: &Geometry) -> Result<AnyGrid> {
    if buffer.element_type() != geometry.element_type {
        return Err(Error::invalid_parameter(format!(
            "buffer holds {} samples but the geometry declares {}",
            buffer.element_type(),
            geometry.element_type
        )));
    }

    let expected = geometry.sample_count()?;
    if buffer.byte_len() != geometry.byte_len()? {
        return Err(Error::SizeMismatch {
            path: None,
            expected,
            actual: buffer.len(),
            bytes: Some((buffer.byte_len(), geometry.element_type.size_bytes())),
        });
    }
    debug!("Validated {} samples as {geometry}", expected);

    let Geometry {
        width,
        height,
        channels,
        element_type,
    } = *geometry;
    let grid: AnyGrid = match element_type {
        ElementType::U8 => validate(buffer.to_samples::<u8>(), width, height, channels)?.into(),
        ElementType::U16 => validate(buffer.to_samples::<u16>(), width, height, channels)?.into(),
        ElementType::F32 => validate(buffer.to_samples::<f32>(), width, height, channels)?.into(),
    };
    Ok(grid)
}
