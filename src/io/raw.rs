use std::{io::Write, path::Path};

use log::{debug, info};

use super::output::write_output;
use crate::{
    error::{Error, Result},
    grid::{AnyGrid, ElementType, Geometry, SampleBuffer},
    validate::validate_buffer,
};

/// Reads an untagged raw file as a flat sequence of `element_type` samples.
///
/// The geometry is not checked here, see [`crate::validate_buffer`] or
/// [`load_raw`].
pub fn load_untagged<P: AsRef<Path>>(path: P, element_type: ElementType) -> Result<SampleBuffer> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|err| Error::read(path, err))?;
    debug!(
        "Read {} bytes of {element_type} samples from {}",
        bytes.len(),
        path.display()
    );
    Ok(SampleBuffer::new(bytes, element_type))
}

/// Reads and validates an untagged raw file.
pub fn load_raw<P: AsRef<Path>>(path: P, geometry: &Geometry) -> Result<AnyGrid> {
    let path = path.as_ref();
    let buffer = load_untagged(path, geometry.element_type)?;
    validate_buffer(&buffer, geometry).map_err(|err| err.with_path(path))
}

/// The samples in row-major order at their native width and byte order,
/// without any header.
pub fn to_raw_bytes(grid: &AnyGrid) -> Vec<u8> {
    grid.as_bytes().to_vec()
}

pub fn write_raw<W: Write>(grid: &AnyGrid, writer: &mut W) -> std::io::Result<()> {
    writer.write_all(grid.as_bytes())
}

pub fn save_raw<P: AsRef<Path>>(path: P, grid: &AnyGrid) -> Result<()> {
    let path = path.as_ref();
    write_output(path, |writer| write_raw(grid, writer))?;
    info!(
        "Saved {} raw samples ({}) to {}",
        grid.len(),
        grid.geometry(),
        path.display()
    );
    Ok(())
}
