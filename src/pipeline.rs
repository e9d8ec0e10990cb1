use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    str::FromStr,
};

use itertools::Itertools;
use log::{error, info};
use rayon::prelude::*;
use serde_derive::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::{AnyGrid, Geometry},
    io::{
        load_raw, load_tagged, read_geometry_sidecar, save_raw, save_tagged, save_text,
        sidecar_path, write_geometry_sidecar, TextLayout, TextOptions,
    },
};

/// Representation written by a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    Raw,
    TextFlat,
    TextTagged,
    Container,
}

impl OutputMode {
    pub fn text_layout(self) -> Option<TextLayout> {
        match self {
            OutputMode::TextFlat => Some(TextLayout::Flat),
            OutputMode::TextTagged => Some(TextLayout::TaggedPixel),
            OutputMode::Raw | OutputMode::Container => None,
        }
    }

    /// File extension used when the output name is derived from the input.
    pub fn extension(self) -> &'static str {
        match self {
            OutputMode::Raw => "raw",
            OutputMode::TextFlat | OutputMode::TextTagged => "csv",
            OutputMode::Container => "png",
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            OutputMode::Raw => "raw",
            OutputMode::TextFlat => "text-flat",
            OutputMode::TextTagged => "text-tagged",
            OutputMode::Container => "container",
        };
        write!(f, "{name}")
    }
}

impl FromStr for OutputMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "raw" => Ok(OutputMode::Raw),
            "text-flat" | "csv" => Ok(OutputMode::TextFlat),
            "text-tagged" => Ok(OutputMode::TextTagged),
            "container" | "png" => Ok(OutputMode::Container),
            _ => Err(Error::invalid_parameter(format!(
                "Invalid output mode: {s}, expected raw, text-flat, text-tagged or container"
            ))),
        }
    }
}

/// Where the grid of a conversion comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InputSource {
    /// An image file that describes its own geometry.
    Tagged { path: PathBuf },
    /// A raw dump. Without a geometry, it is read from the dump's sidecar.
    Untagged {
        path: PathBuf,
        #[serde(default)]
        geometry: Option<Geometry>,
    },
}

impl InputSource {
    pub fn path(&self) -> &Path {
        match self {
            InputSource::Tagged { path } | InputSource::Untagged { path, .. } => path,
        }
    }

    /// Runs the load and validate stages.
    pub fn load(&self) -> Result<AnyGrid> {
        match self {
            InputSource::Tagged { path } => load_tagged(path),
            InputSource::Untagged { path, geometry } => {
                let geometry = match geometry {
                    Some(geometry) => *geometry,
                    None => read_geometry_sidecar(sidecar_path(path))?,
                };
                load_raw(path, &geometry)
            }
        }
    }
}

fn default_precision() -> usize {
    TextOptions::default().precision
}

/// One conversion: load, validate and serialize a single grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionJob {
    pub input: InputSource,
    pub output: PathBuf,
    pub mode: OutputMode,
    /// Decimal places of float samples in text outputs.
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Also write `<output>.json` with the geometry needed to read the output back.
    #[serde(default)]
    pub write_sidecar: bool,
}

impl ConversionJob {
    pub fn new<P: Into<PathBuf>>(input: InputSource, output: P, mode: OutputMode) -> Self {
        Self {
            input,
            output: output.into(),
            mode,
            precision: default_precision(),
            write_sidecar: false,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_sidecar(mut self, write_sidecar: bool) -> Self {
        self.write_sidecar = write_sidecar;
        self
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: OutputMode,
    pub geometry: Geometry,
    pub sidecar: Option<PathBuf>,
}

impl std::fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} ({}, {})",
            self.input.display(),
            self.output.display(),
            self.mode,
            self.geometry
        )
    }
}

/// Runs the serialize stage.
pub fn serialize(grid: &AnyGrid, output: &Path, mode: OutputMode, precision: usize) -> Result<()> {
    match mode {
        OutputMode::Raw => save_raw(output, grid),
        OutputMode::Container => save_tagged(output, grid),
        OutputMode::TextFlat | OutputMode::TextTagged => {
            let options = TextOptions {
                layout: mode.text_layout().unwrap_or(TextLayout::Flat),
                precision,
            };
            save_text(output, grid, &options)
        }
    }
}

/// Runs one job. Nothing is written unless the input loads and validates.
pub fn convert(job: &ConversionJob) -> Result<ConversionReport> {
    info!(
        "Converting {} to {} ({})",
        job.input.path().display(),
        job.output.display(),
        job.mode
    );
    let grid = job.input.load()?;
    serialize(&grid, &job.output, job.mode, job.precision)?;

    let geometry = grid.geometry();
    let sidecar = if job.write_sidecar && job.mode != OutputMode::Container {
        let path = sidecar_path(&job.output);
        write_geometry_sidecar(&path, &geometry)?;
        Some(path)
    } else {
        None
    };

    Ok(ConversionReport {
        input: job.input.path().to_path_buf(),
        output: job.output.clone(),
        mode: job.mode,
        geometry,
        sidecar,
    })
}

/// Runs independent jobs in parallel. Each job gets its own result; a failing
/// job does not stop the others. Jobs sharing an output path are not run.
pub fn convert_batch(jobs: &[ConversionJob]) -> Vec<Result<ConversionReport>> {
    let outputs = jobs.iter().map(|job| job.output.as_path()).counts();
    jobs.par_iter()
        .map(|job| {
            let result = if outputs[&job.output.as_path()] > 1 {
                Err(Error::invalid_parameter(format!(
                    "{} is the output of more than one job",
                    job.output.display()
                )))
            } else {
                convert(job)
            };
            if let Err(err) = &result {
                error!("{}: {err}", job.input.path().display());
            }
            result
        })
        .collect()
}

/// Reads a JSON array of jobs.
pub fn load_jobs<P: AsRef<Path>>(path: P) -> Result<Vec<ConversionJob>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| Error::read(path, err))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|err| Error::Parse {
        path: path.to_path_buf(),
        line: err.line(),
        message: err.to_string(),
    })
}
