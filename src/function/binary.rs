//! Canonical binary layout shared by both storage engines.
//!
//! A 4-byte unsigned little-endian point count followed by `count` pairs of
//! 8-byte IEEE-754 doubles `(x, y)` in index order. No padding, no version
//! header. Bytes written from one engine reconstruct an equal function on
//! either engine.

use std::io::{Read, Write};

use crate::errors::FunctionError;
use crate::function::TabulatedFunction;
use crate::point::Point;

/// Writes a function's points in the canonical layout.
pub fn write<W, F>(function: &F, writer: &mut W) -> Result<(), FunctionError>
where
    W: Write,
    F: TabulatedFunction + ?Sized,
{
    let count = function.point_count();
    let header = u32::try_from(count).map_err(|_| FunctionError::InvalidConstruction {
        reason: format!("{count} points exceed the layout's 4-byte count field"),
    })?;
    writer.write_all(&header.to_le_bytes())?;
    for index in 0..count {
        let point = function.point_at(index)?;
        writer.write_all(&point.x.to_le_bytes())?;
        writer.write_all(&point.y.to_le_bytes())?;
    }
    Ok(())
}

/// Reads a point sequence in the canonical layout.
///
/// The result is ready for an engine's `from_points` constructor, which
/// re-validates it; a truncated stream fails with [`FunctionError::Io`] and
/// never yields a half-built function.
pub fn read_points<R: Read>(reader: &mut R) -> Result<Vec<Point>, FunctionError> {
    let mut header = [0u8; 4];
    reader.read_exact(&mut header)?;
    let count = u32::from_le_bytes(header) as usize;

    let mut points = Vec::new();
    let mut coordinate = [0u8; 8];
    for _ in 0..count {
        reader.read_exact(&mut coordinate)?;
        let x = f64::from_le_bytes(coordinate);
        reader.read_exact(&mut coordinate)?;
        let y = f64::from_le_bytes(coordinate);
        points.push(Point::new(x, y));
    }
    Ok(points)
}
