use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use log::{error, info, warn};
use pixgrid::{
    convert, convert_batch, io::load_tagged, pipeline::load_jobs, ConversionJob, ElementType,
    Geometry, InputSource, OutputMode,
};

/// Converts pixel grids between image files, raw dumps and CSV tables.
#[derive(Parser)]
#[clap(name = "pixconv", version)]
struct CommandLine {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Converts a single file
    Convert {
        /// Input image or raw dump
        input: PathBuf,
        /// Output file
        output: PathBuf,
        #[clap(flatten)]
        output_args: OutputArgs,
        #[clap(flatten)]
        geometry: GeometryArgs,
    },
    /// Converts every file matching a glob pattern into a directory
    Batch {
        /// Glob pattern, e.g. "captures/*_Depth.raw"
        pattern: String,
        /// Directory receiving the outputs
        #[clap(long)]
        out_dir: PathBuf,
        #[clap(flatten)]
        output_args: OutputArgs,
        #[clap(flatten)]
        geometry: GeometryArgs,
    },
    /// Runs the conversions listed in a JSON job file
    Jobs {
        /// JSON array of conversion jobs
        file: PathBuf,
    },
    /// Prints the geometry of an image file and how to read its raw dump
    Info {
        /// Input image
        input: PathBuf,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Output format: raw, text-flat, text-tagged or container
    #[clap(short, long)]
    mode: OutputMode,
    /// Decimal places of float samples in text outputs
    #[clap(long, default_value = "2")]
    precision: usize,
    /// Writes <output>.json with the geometry of the output
    #[clap(long, action)]
    write_sidecar: bool,
}

/// Geometry of raw inputs. Without it, inputs are read as image files.
#[derive(Args)]
struct GeometryArgs {
    /// Pixel columns of the raw input
    #[clap(long)]
    width: Option<usize>,
    /// Pixel rows of the raw input
    #[clap(long)]
    height: Option<usize>,
    /// Samples per pixel of the raw input
    #[clap(long, default_value = "1")]
    channels: usize,
    /// Sample type of the raw input: uint8, uint16 or float32
    #[clap(long, default_value = "uint8")]
    element_type: ElementType,
    /// Reads the raw geometry from <input>.json
    #[clap(long, action)]
    sidecar: bool,
}

impl GeometryArgs {
    fn input_source(&self, path: &Path) -> Result<InputSource, pixgrid::Error> {
        let path = path.to_path_buf();
        if self.sidecar {
            return Ok(InputSource::Untagged {
                path,
                geometry: None,
            });
        }
        match (self.width, self.height) {
            (Some(width), Some(height)) => Ok(InputSource::Untagged {
                path,
                geometry: Some(Geometry::new(
                    width,
                    height,
                    self.channels,
                    self.element_type,
                )),
            }),
            (None, None) => Ok(InputSource::Tagged { path }),
            _ => Err(pixgrid::Error::invalid_parameter(
                "--width and --height must be given together",
            )),
        }
    }
}

impl OutputArgs {
    fn job(&self, input: InputSource, output: PathBuf) -> ConversionJob {
        ConversionJob::new(input, output, self.mode)
            .with_precision(self.precision)
            .with_sidecar(self.write_sidecar)
    }
}

fn run_jobs(jobs: &[ConversionJob]) -> ExitCode {
    if jobs.is_empty() {
        warn!("Nothing to convert");
        return ExitCode::SUCCESS;
    }
    let results = convert_batch(jobs);
    let failures = results.iter().filter(|result| result.is_err()).count();
    for report in results.iter().flatten() {
        info!("{report}");
    }
    info!(
        "Converted {} of {} files",
        jobs.len() - failures,
        jobs.len()
    );
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn batch_jobs(
    pattern: &str,
    out_dir: &Path,
    output_args: &OutputArgs,
    geometry: &GeometryArgs,
) -> Result<Vec<ConversionJob>, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(out_dir)?;
    let inputs = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
    let stems = inputs.iter().map(|input| input.file_stem()).counts();
    let mut jobs = Vec::new();
    for input in &inputs {
        // a.png and a.bmp are written to a.png.raw and a.bmp.raw
        let name = if stems[&input.file_stem()] > 1 {
            input.file_name()
        } else {
            input.file_stem()
        };
        let name = name.unwrap_or_default().to_string_lossy();
        let output = out_dir.join(format!("{name}.{}", output_args.mode.extension()));
        jobs.push(output_args.job(geometry.input_source(input)?, output));
    }
    Ok(jobs)
}

fn print_info(input: &Path) -> Result<(), pixgrid::Error> {
    let grid = load_tagged(input)?;
    let geometry = grid.geometry();
    println!("File:          {}", input.display());
    println!("Dimensions:    {} x {}", geometry.width, geometry.height);
    println!(
        "Mode:          {} ({})",
        grid.channel_mode(),
        grid.channel_mode().column_names().iter().join(",")
    );
    println!("Element type:  {}", geometry.element_type);
    println!(
        "Raw shape:     (height, width, channels) = ({}, {}, {})",
        geometry.height, geometry.width, geometry.channels
    );
    println!(
        "Read raw with: --width {} --height {} --channels {} --element-type {}",
        geometry.width, geometry.height, geometry.channels, geometry.element_type
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CommandLine::parse();

    let result: Result<ExitCode, Box<dyn std::error::Error>> = match args.command {
        Command::Convert {
            input,
            output,
            output_args,
            geometry,
        } => geometry
            .input_source(&input)
            .and_then(|source| convert(&output_args.job(source, output)))
            .map(|report| {
                info!("{report}");
                ExitCode::SUCCESS
            })
            .map_err(Into::into),
        Command::Batch {
            pattern,
            out_dir,
            output_args,
            geometry,
        } => batch_jobs(&pattern, &out_dir, &output_args, &geometry).map(|jobs| run_jobs(&jobs)),
        Command::Jobs { file } => load_jobs(file)
            .map(|jobs| run_jobs(&jobs))
            .map_err(Into::into),
        Command::Info { input } => print_info(&input)
            .map(|_| ExitCode::SUCCESS)
            .map_err(Into::into),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
