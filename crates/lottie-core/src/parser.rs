//! Value deserialization, one parser per value kind.
//!
//! A parser is handed a reader positioned at a value node and always consumes
//! the whole node, so the caller can continue with the next key.

use crate::animatable::Interpolatable;
use crate::error::{LottieError, Result};
use crate::shape::ShapeData;
use glam::{Vec2, Vec4};
use lottie_data::{json, TokenKind, TokenReader};

pub trait ValueParser {
    type Output: Interpolatable;

    /// Value kind named in `MalformedValue` errors.
    const EXPECTED: &'static str;

    fn parse(&self, reader: &mut dyn TokenReader, scale: f32) -> Result<Self::Output> {
        match reader.peek() {
            TokenKind::BeginArray => {
                reader.begin_array()?;
                let value = self.from_elements(reader, scale)?;
                while reader.has_next() {
                    reader.skip_value()?;
                }
                reader.end_array()?;
                Ok(value)
            }
            TokenKind::Number => {
                let value = reader.next_number()?;
                self.from_number(value, scale)
            }
            TokenKind::BeginObject => self.from_object(reader, scale),
            found => Err(LottieError::malformed(Self::EXPECTED, found)),
        }
    }

    /// Reads the value from the elements of an array that is already open.
    /// Trailing elements are left for the caller to skip.
    fn from_elements(&self, reader: &mut dyn TokenReader, scale: f32) -> Result<Self::Output>;

    fn from_number(&self, _value: f64, _scale: f32) -> Result<Self::Output> {
        Err(LottieError::malformed(Self::EXPECTED, TokenKind::Number))
    }

    fn from_object(&self, reader: &mut dyn TokenReader, _scale: f32) -> Result<Self::Output> {
        Err(LottieError::malformed(Self::EXPECTED, reader.peek()))
    }
}

fn first_element_number(reader: &mut dyn TokenReader, expected: &'static str) -> Result<f64> {
    match reader.peek() {
        TokenKind::Number => Ok(reader.next_number()?),
        found => Err(LottieError::malformed(expected, found)),
    }
}

/// Whole numbers such as opacity. Scaled values round half away from zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerParser;

impl ValueParser for IntegerParser {
    type Output = i32;
    const EXPECTED: &'static str = "integer";

    fn from_elements(&self, reader: &mut dyn TokenReader, scale: f32) -> Result<i32> {
        let value = first_element_number(reader, Self::EXPECTED)?;
        self.from_number(value, scale)
    }

    fn from_number(&self, value: f64, scale: f32) -> Result<i32> {
        Ok(((value * scale as f64) as f32).round() as i32)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FloatParser;

impl ValueParser for FloatParser {
    type Output = f32;
    const EXPECTED: &'static str = "float";

    fn from_elements(&self, reader: &mut dyn TokenReader, scale: f32) -> Result<f32> {
        let value = first_element_number(reader, Self::EXPECTED)?;
        self.from_number(value, scale)
    }

    fn from_number(&self, value: f64, scale: f32) -> Result<f32> {
        Ok(value as f32 * scale)
    }
}

/// Points written as `[x, y, ...]` or `{"x": .., "y": ..}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointParser;

impl ValueParser for PointParser {
    type Output = Vec2;
    const EXPECTED: &'static str = "point";

    fn from_elements(&self, reader: &mut dyn TokenReader, scale: f32) -> Result<Vec2> {
        match reader.peek() {
            TokenKind::Number => Ok(Vec2::from(json::point_from_elements(reader, scale)?)),
            // Some exporters wrap the point in one more array.
            TokenKind::BeginArray | TokenKind::BeginObject => self.parse(reader, scale),
            found => Err(LottieError::malformed(Self::EXPECTED, found)),
        }
    }

    fn from_object(&self, reader: &mut dyn TokenReader, scale: f32) -> Result<Vec2> {
        Ok(Vec2::from(json::point_from_object(reader, scale)?))
    }
}

/// RGBA colors normalized to 0..1. Components written on a 0..255 scale are
/// detected and divided down; a missing alpha is opaque. Scale is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorParser;

impl ValueParser for ColorParser {
    type Output = Vec4;
    const EXPECTED: &'static str = "color";

    fn from_elements(&self, reader: &mut dyn TokenReader, _scale: f32) -> Result<Vec4> {
        let mut components = [0.0f32, 0.0, 0.0, 1.0];
        let mut count = 0;
        while count < 4 && reader.peek() == TokenKind::Number {
            components[count] = reader.next_number()? as f32;
            count += 1;
        }
        if count < 3 {
            return Err(LottieError::malformed(Self::EXPECTED, reader.peek()));
        }
        if components[..count].iter().any(|c| *c > 1.0) {
            for c in &mut components[..count] {
                *c /= 255.0;
            }
        }
        Ok(Vec4::from(components))
    }
}

/// Bezier outlines: `{"c": bool, "v": [..], "i": [..], "o": [..]}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeDataParser;

impl ValueParser for ShapeDataParser {
    type Output = ShapeData;
    const EXPECTED: &'static str = "shape";

    fn from_elements(&self, reader: &mut dyn TokenReader, scale: f32) -> Result<ShapeData> {
        match reader.peek() {
            TokenKind::BeginObject => self.from_object(reader, scale),
            found => Err(LottieError::malformed(Self::EXPECTED, found)),
        }
    }

    fn from_object(&self, reader: &mut dyn TokenReader, scale: f32) -> Result<ShapeData> {
        let mut shape = ShapeData::default();
        reader.begin_object()?;
        while reader.has_next() {
            match reader.next_name()?.as_str() {
                "c" => shape.closed = reader.next_bool()?,
                "v" => shape.vertices = to_vecs(json::points(reader, scale)?),
                "i" => shape.in_tangents = to_vecs(json::points(reader, scale)?),
                "o" => shape.out_tangents = to_vecs(json::points(reader, scale)?),
                _ => reader.skip_value()?,
            }
        }
        reader.end_object()?;
        Ok(shape)
    }
}

fn to_vecs(points: Vec<[f32; 2]>) -> Vec<Vec2> {
    points.into_iter().map(Vec2::from).collect()
}
