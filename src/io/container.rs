use std::{io::Cursor, io::Write, path::Path};

use image::ImageFormat;
use log::info;

use super::output::write_output;
use crate::{
    error::{Error, Result},
    grid::AnyGrid,
    image::{color_type_u8, IntoAnyGrid},
};

/// Decodes a self-describing image file. Width, height, channel count and
/// sample depth are taken from the file itself.
pub fn load_tagged<P: AsRef<Path>>(path: P) -> Result<AnyGrid> {
    let path = path.as_ref();
    let image = image::io::Reader::open(path)
        .map_err(|err| Error::read(path, err))?
        .with_guessed_format()
        .map_err(|err| Error::read(path, err))?
        .decode()
        .map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    let grid = image.into_any_grid();
    info!(
        "Loaded {} ({} {}) from {}",
        grid.geometry(),
        grid.channel_mode(),
        grid.element_type(),
        path.display()
    );
    Ok(grid)
}

/// Encodes an 8-bit grid with 1 to 4 channels into `format`.
///
/// 16-bit and float grids are refused with `UnsupportedDepth` instead of
/// being narrowed to 8 bits.
pub fn encode_tagged(grid: &AnyGrid, format: ImageFormat) -> Result<Vec<u8>> {
    let grid = match grid {
        AnyGrid::U8(grid) => grid,
        other => return Err(Error::UnsupportedDepth(other.element_type())),
    };
    let color_type = color_type_u8(grid.channel_mode())?;
    let width = u32::try_from(grid.width()).map_err(Error::invalid_parameter)?;
    let height = u32::try_from(grid.height()).map_err(Error::invalid_parameter)?;

    let mut cursor = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut cursor,
        grid.samples(),
        width,
        height,
        color_type,
        format,
    )
    .map_err(|source| Error::Encode { path: None, source })?;
    Ok(cursor.into_inner())
}

/// Saves an 8-bit grid as an image file whose format follows the extension.
/// Nothing is created when the grid cannot be encoded.
pub fn save_tagged<P: AsRef<Path>>(path: P, grid: &AnyGrid) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).map_err(|_| {
        Error::invalid_parameter(format!(
            "Unable to guess the image format of {}",
            path.display()
        ))
    })?;
    let bytes = encode_tagged(grid, format).map_err(|err| err.with_path(path))?;
    write_output(path, |writer| writer.write_all(&bytes))?;
    info!(
        "Saved {} as {format:?} to {}",
        grid.geometry(),
        path.display()
    );
    Ok(())
}
