//! Plain-text colour files.
//!
//! One `r,g,b` colour per line with components in `[0, 1]`. Blank lines and
//! lines starting with `#` are ignored. A terrain palette file holds exactly
//! six colours in the order low, high, ocean, river, shoreline, snow.

use std::fmt::Write as _;
use std::path::Path;

use terra_mesh::FloatRgba;

use crate::error::ColourFileError;
use crate::params::TerrainParameters;

/// Number of colours in a terrain palette file.
pub const TERRAIN_COLOUR_COUNT: usize = 6;

/// Parse every colour in `text`.
///
/// A line without exactly three comma-separated fields is a `BadLine`. A
/// field that is empty or not a number, as in `1,,0.5`, is a `BadNumber`.
pub fn parse_colours(text: &str) -> Result<Vec<FloatRgba>, ColourFileError> {
    let mut colours = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        colours.push(parse_colour(index + 1, line)?);
    }
    Ok(colours)
}

/// Every field must hold a number; empty fields are not read as zero.
fn parse_colour(line: usize, text: &str) -> Result<FloatRgba, ColourFileError> {
    let fields: Vec<&str> = text.split(',').collect();
    let &[r, g, b] = fields.as_slice() else {
        return Err(ColourFileError::BadLine {
            line,
            text: text.to_string(),
        });
    };
    let component = |s: &str| {
        s.trim()
            .parse::<f32>()
            .map_err(|source| ColourFileError::BadNumber { line, source })
    };
    Ok(FloatRgba::rgb(component(r)?, component(g)?, component(b)?))
}

/// Format colours one per line. Alpha is not stored.
pub fn format_colours(colours: &[FloatRgba]) -> String {
    let mut out = String::new();
    for c in colours {
        let _ = writeln!(out, "{},{},{}", c.r, c.g, c.b);
    }
    out
}

/// Read every colour in the file at `path`.
pub fn read_colours(path: &Path) -> Result<Vec<FloatRgba>, ColourFileError> {
    let text = std::fs::read_to_string(path).map_err(ColourFileError::ReadError)?;
    parse_colours(&text)
}

pub fn write_colours(path: &Path, colours: &[FloatRgba]) -> Result<(), ColourFileError> {
    std::fs::write(path, format_colours(colours)).map_err(ColourFileError::WriteError)
}

/// Replace the six terrain colours of `params` with those in `path`.
///
/// `params` is untouched if the file is unreadable or holds the wrong
/// number of colours.
pub fn load_terrain_colours(
    path: &Path,
    params: &mut TerrainParameters,
) -> Result<(), ColourFileError> {
    let colours = read_colours(path)?;
    let palette: [FloatRgba; TERRAIN_COLOUR_COUNT] =
        colours
            .try_into()
            .map_err(|c: Vec<FloatRgba>| ColourFileError::WrongColourCount {
                expected: TERRAIN_COLOUR_COUNT,
                found: c.len(),
            })?;
    params.set_colours(palette);
    log_palette(path, "Loaded");
    Ok(())
}

/// Write the six terrain colours of `params` to `path`.
pub fn save_terrain_colours(
    path: &Path,
    params: &TerrainParameters,
) -> Result<(), ColourFileError> {
    write_colours(path, &params.colours())?;
    log_palette(path, "Saved");
    Ok(())
}

fn log_palette(path: &Path, action: &str) {
    tracing::info!("{action} terrain colours at {}", path.display());
}
