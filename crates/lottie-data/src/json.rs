//! Readers for the small structural shapes that recur across Lottie values:
//! points written as arrays or `{"x", "y"}` objects, and plain number lists.

use crate::model::Vec2;
use crate::reader::{ReaderError, TokenKind, TokenReader};

/// Reads a number, or the first element of an array of numbers.
///
/// Exporters write one-dimensional easing handles both as `{"x": 0.5}` and
/// `{"x": [0.5]}`; the remaining array elements are skipped.
pub fn first_number(reader: &mut dyn TokenReader) -> Result<f64, ReaderError> {
    match reader.peek() {
        TokenKind::Number => reader.next_number(),
        TokenKind::BeginArray => {
            reader.begin_array()?;
            let value = reader.next_number()?;
            while reader.has_next() {
                reader.skip_value()?;
            }
            reader.end_array()?;
            Ok(value)
        }
        found => Err(ReaderError::UnexpectedToken {
            expected: TokenKind::Number,
            found,
        }),
    }
}

/// Reads `[x, y, ...]`. Extra components are skipped.
pub fn point_from_array(reader: &mut dyn TokenReader, scale: f32) -> Result<Vec2, ReaderError> {
    reader.begin_array()?;
    let point = point_from_elements(reader, scale)?;
    while reader.has_next() {
        reader.skip_value()?;
    }
    reader.end_array()?;
    Ok(point)
}

/// Reads `x` and `y` from an array that has already been opened.
pub fn point_from_elements(
    reader: &mut dyn TokenReader,
    scale: f32,
) -> Result<Vec2, ReaderError> {
    let x = reader.next_number()? as f32;
    let y = reader.next_number()? as f32;
    Ok([x * scale, y * scale])
}

/// Reads `{"x": .., "y": ..}` where each component is a number or an array
/// whose first element is used. Missing components read as zero.
pub fn point_from_object(reader: &mut dyn TokenReader, scale: f32) -> Result<Vec2, ReaderError> {
    let mut x = 0.0;
    let mut y = 0.0;
    reader.begin_object()?;
    while reader.has_next() {
        match reader.next_name()?.as_str() {
            "x" => x = first_number(reader)? as f32,
            "y" => y = first_number(reader)? as f32,
            _ => reader.skip_value()?,
        }
    }
    reader.end_object()?;
    Ok([x * scale, y * scale])
}

/// Reads a point in either of its encodings.
pub fn point(reader: &mut dyn TokenReader, scale: f32) -> Result<Vec2, ReaderError> {
    match reader.peek() {
        TokenKind::BeginArray => point_from_array(reader, scale),
        TokenKind::BeginObject => point_from_object(reader, scale),
        found => Err(ReaderError::UnexpectedToken {
            expected: TokenKind::BeginArray,
            found,
        }),
    }
}

/// Reads an array of points, e.g. the `v`, `i` and `o` lists of shape data.
pub fn points(reader: &mut dyn TokenReader, scale: f32) -> Result<Vec<Vec2>, ReaderError> {
    let mut values = Vec::new();
    reader.begin_array()?;
    while reader.has_next() {
        values.push(point(reader, scale)?);
    }
    reader.end_array()?;
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::JsonTokenReader;
    use serde_json::json;

    #[test]
    fn test_point_from_array_ignores_z() {
        let mut reader = JsonTokenReader::new(&json!([10, 20, 0]));
        assert_eq!(point(&mut reader, 2.0).unwrap(), [20.0, 40.0]);
        assert_eq!(reader.peek(), TokenKind::EndDocument);
    }

    #[test]
    fn test_point_from_object_accepts_wrapped_components() {
        let mut reader = JsonTokenReader::new(&json!({"x": [0.25, 0.5], "y": 0.75, "n": "e"}));
        assert_eq!(point(&mut reader, 1.0).unwrap(), [0.25, 0.75]);
        assert_eq!(reader.peek(), TokenKind::EndDocument);
    }

    #[test]
    fn test_point_rejects_scalars() {
        let mut reader = JsonTokenReader::new(&json!(3));
        assert!(matches!(
            point(&mut reader, 1.0),
            Err(ReaderError::UnexpectedToken {
                found: TokenKind::Number,
                ..
            })
        ));
    }

    #[test]
    fn test_points_reads_vertex_lists() {
        let mut reader = JsonTokenReader::new(&json!([[0, 0], [1, 2]]));
        assert_eq!(points(&mut reader, 1.0).unwrap(), vec![[0.0, 0.0], [1.0, 2.0]]);
    }
}
