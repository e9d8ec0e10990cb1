use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use log::warn;

use crate::error::{Error, Result};

/// Creates `path` and hands a buffered writer to `write`. If writing fails the
/// partial file is removed on a best effort basis.
pub(crate) fn write_output<P, F>(path: P, write: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| Error::write(path, err))?;
    let mut writer = BufWriter::new(file);

    let result = write(&mut writer).and_then(|_| writer.flush());
    drop(writer);

    if let Err(err) = result {
        if let Err(remove_err) = std::fs::remove_file(path) {
            warn!(
                "Unable to remove partial output {}: {remove_err}",
                path.display()
            );
        }
        return Err(Error::write(path, err));
    }
    Ok(())
}
