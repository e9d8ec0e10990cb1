use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::Path,
    str::FromStr,
};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use log::info;
use serde_derive::{Deserialize, Serialize};

use super::output::write_output;
use crate::{
    error::{Error, Result},
    grid::{with_grid, AnyGrid, ElementType, Geometry, PixelGrid, Sample},
    validate::validate,
};

/// How a grid is laid out as delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextLayout {
    /// One line per row with `width * channels` values, channels interleaved
    /// per pixel.
    Flat,
    /// A `row,column,<channels>` header then one line per pixel.
    TaggedPixel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextOptions {
    pub layout: TextLayout,
    /// Decimal places of float samples.
    pub precision: usize,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            layout: TextLayout::Flat,
            precision: 2,
        }
    }
}

impl TextOptions {
    pub fn flat() -> Self {
        Self::default()
    }

    pub fn tagged_pixel() -> Self {
        Self {
            layout: TextLayout::TaggedPixel,
            ..Self::default()
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

/// Header line of the tagged-pixel layout, e.g. `row,column,R,G,B`.
pub fn tagged_pixel_header(grid: &AnyGrid) -> Vec<String> {
    let mut header = vec!["row".to_string(), "column".to_string()];
    header.extend(grid.channel_mode().column_names());
    header
}

/// Writes the grid as comma separated values, one `\n` terminated line at a
/// time.
pub fn write_text<W: Write>(
    grid: &AnyGrid,
    mut writer: W,
    options: &TextOptions,
) -> io::Result<()> {
    let geometry = grid.geometry();
    if options.layout == TextLayout::Flat && geometry.width * geometry.channels == 0 {
        // csv writes an empty record as `""`, rows without samples are bare lines.
        for _ in 0..geometry.height {
            writer.write_all(b"\n")?;
        }
        return writer.flush();
    }

    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    let result = match options.layout {
        TextLayout::Flat => {
            with_grid!(grid, typed => write_flat(typed, &mut csv_writer, options.precision))
        }
        TextLayout::TaggedPixel => {
            csv_writer.write_record(tagged_pixel_header(grid))?;
            with_grid!(grid, typed => write_tagged_pixels(typed, &mut csv_writer, options.precision))
        }
    };
    result?;
    csv_writer.flush()
}

fn write_flat<T: Sample, W: Write>(
    grid: &PixelGrid<T>,
    writer: &mut csv::Writer<W>,
    precision: usize,
) -> csv::Result<()> {
    for row in grid.as_array().outer_iter() {
        for value in row.iter() {
            writer.write_field(value.format_text(precision))?;
        }
        writer.write_record(None::<&[u8]>)?;
    }
    Ok(())
}

fn write_tagged_pixels<T: Sample, W: Write>(
    grid: &PixelGrid<T>,
    writer: &mut csv::Writer<W>,
    precision: usize,
) -> csv::Result<()> {
    for pixel in grid.pixels() {
        writer.write_field(pixel.row.to_string())?;
        writer.write_field(pixel.column.to_string())?;
        for value in pixel.values {
            writer.write_field(value.format_text(precision))?;
        }
        writer.write_record(None::<&[u8]>)?;
    }
    Ok(())
}

/// Renders the grid as a string, see [`write_text`].
pub fn to_text(grid: &AnyGrid, options: &TextOptions) -> String {
    let mut buffer = Vec::new();
    write_text(grid, &mut buffer, options).expect("writing to memory never fails");
    String::from_utf8(buffer).expect("csv output is utf-8")
}

pub fn save_text<P: AsRef<Path>>(path: P, grid: &AnyGrid, options: &TextOptions) -> Result<()> {
    let path = path.as_ref();
    write_output(path, |writer| write_text(grid, writer, options))?;
    info!(
        "Saved {} as {:?} text to {}",
        grid.geometry(),
        options.layout,
        path.display()
    );
    Ok(())
}

/// Reads a grid back from text written by [`save_text`].
///
/// Rows of the flat layout must hold `width * channels` values; pixels of the
/// tagged-pixel layout must come in row-then-column order.
pub fn read_text<P: AsRef<Path>>(
    path: P,
    layout: TextLayout,
    geometry: &Geometry,
) -> Result<AnyGrid> {
    let path = path.as_ref();
    let grid: AnyGrid = match geometry.element_type {
        ElementType::U8 => read_text_grid::<u8>(path, layout, geometry)?.into(),
        ElementType::U16 => read_text_grid::<u16>(path, layout, geometry)?.into(),
        ElementType::F32 => read_text_grid::<f32>(path, layout, geometry)?.into(),
    };
    info!("Read {} from {}", grid.geometry(), path.display());
    Ok(grid)
}

struct TextParserContext<'a> {
    path: &'a Path,
    line: usize,
}

impl<'a> TextParserContext<'a> {
    fn gen_error(&self, message: String) -> Error {
        Error::Parse {
            path: self.path.to_path_buf(),
            line: self.line,
            message,
        }
    }

    fn parse<T: FromStr>(&self, field: &str) -> Result<T> {
        field
            .parse::<T>()
            .map_err(|_| self.gen_error(format!("Invalid value. Got `{field}`")))
    }

    fn expect_fields(&self, record: &StringRecord, expected: usize) -> Result<()> {
        if record.len() != expected {
            return Err(self.gen_error(format!(
                "Expected {expected} values, got {}",
                record.len()
            )));
        }
        Ok(())
    }
}

fn read_text_grid<T: Sample>(
    path: &Path,
    layout: TextLayout,
    geometry: &Geometry,
) -> Result<PixelGrid<T>> {
    let file = File::open(path).map_err(|err| Error::read(path, err))?;
    // Every sample takes at least one byte of text.
    let file_len = file.metadata().map_or(0, |metadata| metadata.len() as usize);
    let capacity = geometry.sample_count()?.min(file_len);
    let mut reader = ReaderBuilder::new()
        .has_headers(layout == TextLayout::TaggedPixel)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let mut context = TextParserContext { path, line: 1 };
    let mut samples = Vec::with_capacity(capacity);
    let mut record = StringRecord::new();
    let mut index = 0;

    loop {
        let has_record = reader.read_record(&mut record).map_err(|err| {
            let line = err.position().map_or(context.line, |pos| pos.line() as usize);
            Error::Parse {
                path: path.to_path_buf(),
                line,
                message: err.to_string(),
            }
        })?;
        if !has_record {
            break;
        }
        context.line = record.position().map_or(context.line + 1, |pos| pos.line() as usize);

        match layout {
            TextLayout::Flat => {
                context.expect_fields(&record, geometry.width * geometry.channels)?;
            }
            TextLayout::TaggedPixel => {
                context.expect_fields(&record, geometry.channels + 2)?;
                let row: usize = context.parse(&record[0])?;
                let column: usize = context.parse(&record[1])?;
                if geometry.width == 0
                    || (row, column) != (index / geometry.width, index % geometry.width)
                {
                    return Err(context.gen_error(format!(
                        "Pixel ({row}, {column}) is out of row-then-column order"
                    )));
                }
                index += 1;
            }
        }

        let skip = if layout == TextLayout::TaggedPixel { 2 } else { 0 };
        for field in record.iter().skip(skip) {
            samples.push(context.parse::<T>(field)?);
        }
    }

    validate(samples, geometry.width, geometry.height, geometry.channels)
        .map_err(|err| err.with_path(path))
}
