use std::{
    ffi::OsString,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use log::debug;

use super::output::write_output;
use crate::{
    error::{Error, Result},
    grid::Geometry,
};

/// Path of the JSON file describing `data_path`: `depth.raw` -> `depth.raw.json`.
pub fn sidecar_path<P: AsRef<Path>>(data_path: P) -> PathBuf {
    let mut name = data_path
        .as_ref()
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".json");
    data_path.as_ref().with_file_name(name)
}

pub fn write_geometry_sidecar<P: AsRef<Path>>(path: P, geometry: &Geometry) -> Result<()> {
    let path = path.as_ref();
    write_output(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, geometry)?;
        Ok(())
    })?;
    debug!("Wrote geometry {geometry} to {}", path.display());
    Ok(())
}

pub fn read_geometry_sidecar<P: AsRef<Path>>(path: P) -> Result<Geometry> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| Error::read(path, err))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|err| Error::Parse {
        path: path.to_path_buf(),
        line: err.line(),
        message: err.to_string(),
    })
}
