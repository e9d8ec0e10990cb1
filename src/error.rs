use std::{
    io,
    path::{Path, PathBuf},
};

use image::ImageError;

use crate::grid::ElementType;

/// Pipeline stage where an error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Validate,
    Serialize,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Stage::Load => write!(f, "load"),
            Stage::Validate => write!(f, "validate"),
            Stage::Serialize => write!(f, "serialize"),
        }
    }
}

/// Main error type for the library.
#[derive(Debug)]
pub enum Error {
    /// The input path does not exist.
    FileNotFound(PathBuf),
    /// The input exists but could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The tagged container is corrupt or of an unsupported format.
    Decode { path: PathBuf, source: ImageError },
    /// A text table or a geometry sidecar is malformed.
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    /// The number of samples disagrees with width * height * channels.
    SizeMismatch {
        path: Option<PathBuf>,
        expected: usize,
        actual: usize,
        /// Byte length and bytes per sample, for raw buffers.
        bytes: Option<(usize, usize)>,
    },
    /// The output format cannot represent the grid's element type.
    UnsupportedDepth(ElementType),
    /// The output format cannot represent the grid's channel count.
    UnsupportedLayout(usize),
    /// The image encoder rejected the grid.
    Encode {
        path: Option<PathBuf>,
        source: ImageError,
    },
    /// The output could not be created or written.
    Write { path: PathBuf, source: io::Error },
    /// Used when the user pass a logical invalid parameter to a function.
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a error with the kind `InvalidParameter`.
    /// # Arguments
    /// * `msg` - The error message.
    pub fn invalid_parameter<T: ToString>(msg: T) -> Self {
        Error::InvalidParameter(msg.to_string())
    }

    /// Maps an IO error raised while opening or reading `path`.
    pub fn read<P: AsRef<Path>>(path: P, err: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if err.kind() == io::ErrorKind::NotFound {
            Error::FileNotFound(path)
        } else {
            Error::Read { path, source: err }
        }
    }

    pub fn write<P: AsRef<Path>>(path: P, err: io::Error) -> Self {
        Error::Write {
            path: path.as_ref().to_path_buf(),
            source: err,
        }
    }

    /// Attaches the offending file to errors that were raised without one.
    pub fn with_path<P: AsRef<Path>>(self, path: P) -> Self {
        match self {
            Error::SizeMismatch {
                path: None,
                expected,
                actual,
                bytes,
            } => Error::SizeMismatch {
                path: Some(path.as_ref().to_path_buf()),
                expected,
                actual,
                bytes,
            },
            Error::Encode { path: None, source } => Error::Encode {
                path: Some(path.as_ref().to_path_buf()),
                source,
            },
            other => other,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Error::FileNotFound(_)
            | Error::Read { .. }
            | Error::Decode { .. }
            | Error::Parse { .. } => Stage::Load,
            Error::SizeMismatch { .. } | Error::InvalidParameter(_) => Stage::Validate,
            Error::UnsupportedDepth(_)
            | Error::UnsupportedLayout(_)
            | Error::Encode { .. }
            | Error::Write { .. } => Stage::Serialize,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}: ", self.stage())?;
        match self {
            Error::FileNotFound(path) => write!(f, "file not found: {}", path.display()),
            Error::Read { path, source } => {
                write!(f, "unable to read {}: {source}", path.display())
            }
            Error::Decode { path, source } => {
                write!(f, "unable to decode {}: {source}", path.display())
            }
            Error::Parse {
                path,
                line,
                message,
            } => write!(f, "{}:{line}: {message}", path.display()),
            Error::SizeMismatch {
                path,
                expected,
                actual,
                bytes,
            } => {
                write!(f, "size mismatch")?;
                if let Some(path) = path {
                    write!(f, " in {}", path.display())?;
                }
                write!(f, ": expected {expected} samples (width x height x channels)")?;
                match bytes {
                    Some((len, sample_size)) if len % sample_size != 0 => write!(
                        f,
                        " in {} bytes, got {:.1} samples in {len} bytes",
                        expected * sample_size,
                        *len as f64 / *sample_size as f64
                    ),
                    Some((len, sample_size)) => write!(
                        f,
                        " in {} bytes, got {actual} samples in {len} bytes",
                        expected * sample_size
                    ),
                    None => write!(f, ", got {actual}"),
                }
            }
            Error::UnsupportedDepth(element_type) => write!(
                f,
                "{element_type} samples cannot be stored in a tagged container"
            ),
            Error::UnsupportedLayout(channels) => write!(
                f,
                "{channels} channels cannot be stored in a tagged container"
            ),
            Error::Encode { path, source } => match path {
                Some(path) => write!(f, "unable to encode {}: {source}", path.display()),
                None => write!(f, "unable to encode image: {source}"),
            },
            Error::Write { path, source } => {
                write!(f, "unable to write {}: {source}", path.display())
            }
            Error::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read { source, .. } | Error::Write { source, .. } => Some(source),
            Error::Decode { source, .. } | Error::Encode { source, .. } => Some(source),
            Error::FileNotFound(_)
            | Error::Parse { .. }
            | Error::SizeMismatch { .. }
            | Error::UnsupportedDepth(_)
            | Error::UnsupportedLayout(_)
            | Error::InvalidParameter(_) => None,
        }
    }
}
