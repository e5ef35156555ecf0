// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub fn write_probes<W: Write>(out: &mut W, positions: &[Vector3f]) -> io::Result<()> {
    writeln!(out, "# light probes: {}", positions.len())?;
    for p in positions {
        writeln!(out, "{} {} {}", p.x, p.y, p.z)?;
    }
    Ok(())
}

pub fn write_probes_to_file<P: AsRef<Path>>(path: P, positions: &[Vector3f]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_probes(&mut out, positions)?;
    out.flush()
}

/// Parse "x y z" lines. Blank lines and `#` comments are ignored.
pub fn read_probes<R: BufRead>(input: R) -> io::Result<Vec<Vector3f>> {
    let mut positions = Vec::new();
    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let values: Vec<Float> = trimmed
            .split_whitespace()
            .map(|s| s.parse::<Float>())
            .collect::<Result<_, _>>()
            .map_err(|e| invalid_line(line_no, &e.to_string()))?;
        if values.len() != 3 {
            return Err(invalid_line(line_no, "expected three components"));
        }
        positions.push(Vector3f::new(values[0], values[1], values[2]));
    }
    Ok(positions)
}

pub fn read_probes_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Vector3f>> {
    read_probes(BufReader::new(File::open(path)?))
}

fn invalid_line(line_no: usize, reason: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, format!("line {}: {}", line_no + 1, reason))
}
