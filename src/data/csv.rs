use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{debug, warn};

use super::{DataErr, Result, SampleStore};

/// Loads a sample set from a two column `x,y` CSV file.
///
/// # Arguments
/// * `path` - The path of the CSV file.
///
/// # Returns
/// The loaded `SampleStore`, see `read_csv` for the accepted format.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<SampleStore> {
    let path = path.as_ref();
    let file = File::open(path)?;
    debug!("reading samples from {}", path.display());

    read_csv(BufReader::new(file))
}

/// Reads a sample set from CSV formatted input.
///
/// The first line is a header and is always discarded. Every other line must
/// start with two finite numeric columns, lines that don't are skipped.
///
/// # Arguments
/// * `reader` - The buffered CSV input.
///
/// # Returns
/// A `MissingHeader` error if the input is empty, an io error if reading
/// fails or a store error if no valid sample was found.
pub fn read_csv<R: BufRead>(reader: R) -> Result<SampleStore> {
    let mut lines = reader.lines();

    match lines.next() {
        Some(header) => {
            let _header = header?;
        }
        None => return Err(DataErr::MissingHeader),
    }

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut skipped = 0usize;

    for line in lines {
        let line = line?;
        match parse_row(&line) {
            Some((x, y)) => {
                xs.push(x);
                ys.push(y);
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped = skipped, loaded = xs.len(); "skipped malformed csv rows");
    }

    Ok(SampleStore::new(xs, ys)?)
}

fn parse_row(line: &str) -> Option<(f64, f64)> {
    let mut cols = line.split(',');
    let x: f64 = cols.next()?.trim().parse().ok()?;
    let y: f64 = cols.next()?.trim().parse().ok()?;
    (x.is_finite() && y.is_finite()).then_some((x, y))
}
