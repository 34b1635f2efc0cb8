//! Arc-length parameterisation of a polyline route.

use super::{Point, Vec2};
use crate::config::{ConfigError, require_positive};

/// An immutable polyline plus the factor converting drawing units into real
/// distance units.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    vertices: Vec<Point>,
    scale: f64,
    /// Real length of each segment, `segment_lengths[i]` joins vertex `i` and `i + 1`.
    segment_lengths: Vec<f64>,
    total_length: f64,
}

impl Path {
    pub fn new(vertices: Vec<Point>, scale: f64) -> Result<Self, ConfigError> {
        require_positive("path scale", scale)?;
        if vertices.len() < 2 {
            return Err(ConfigError::TooFewVertices(vertices.len()));
        }
        if vertices.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
            return Err(ConfigError::NonFinite("path vertex"));
        }

        let mut segment_lengths = Vec::with_capacity(vertices.len() - 1);
        for (i, pair) in vertices.windows(2).enumerate() {
            let length = (pair[1] - pair[0]).magnitude() * scale;
            if length <= 0.0 {
                return Err(ConfigError::DegenerateSegment(i));
            }
            segment_lengths.push(length);
        }
        let total_length = segment_lengths.iter().sum();

        Ok(Self {
            vertices,
            scale,
            segment_lengths,
            total_length,
        })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn segment_count(&self) -> usize {
        self.segment_lengths.len()
    }

    /// Scaled length of the whole polyline.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Position of something that has travelled `distance` from the first
    /// vertex.
    ///
    /// Negative distances extrapolate backwards along the first segment and
    /// distances past [`Path::total_length`] extrapolate forwards along the
    /// last one, so every real input has an answer.
    pub fn coordinate_at(&self, distance: f64) -> Point {
        if distance < 0.0 {
            return self.along_segment(0, distance);
        }
        if distance == 0.0 {
            return self.vertices[0];
        }

        let mut travelled = 0.0;
        for (i, length) in self.segment_lengths.iter().enumerate() {
            let segment_end = travelled + length;
            if distance == segment_end {
                return self.vertices[i + 1];
            }
            if distance < segment_end {
                return self.along_segment(i, distance - travelled);
            }
            travelled = segment_end;
        }

        // Beyond the end: keep heading in the last segment's direction
        let last = self.segment_lengths.len() - 1;
        let last_start = travelled - self.segment_lengths[last];
        self.along_segment(last, distance - last_start)
    }

    /// Point `offset` real units from the start of segment `index`, measured
    /// along its direction. `offset` may fall outside the segment.
    fn along_segment(&self, index: usize, offset: f64) -> Point {
        let start = self.vertices[index];
        let direction: Vec2 = self.vertices[index + 1] - start;
        start + direction / self.segment_lengths[index] * offset
    }
}
