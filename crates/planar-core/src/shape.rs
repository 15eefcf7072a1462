use std::fmt;

use crate::error::{Error, Result};

// Shape: 1 to 3 dimensional tensor shape
//
// The dimension vector is what callers see; rows/cols/channels are what the
// storage cube uses. The mapping applies the degeneracy defaults:
//
//   [size]                  → rows = 1,    cols = size, channels = 1
//   [rows, cols]            → rows,        cols,        channels = 1
//   [channels, rows, cols]  → rows,        cols,        channels
//
// A 3-dim shape is always (channels, rows, cols), whichever operation
// produced it (constructor, reshape, padding).
//
// The only shape with zero entries is `Shape::default()`, the shape of an
// empty (moved-out) tensor. It cannot be built through `Shape::new`.

/// Validated dimension vector of a tensor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Shape(Vec<usize>);

impl Shape {
    /// Highest supported rank.
    pub const MAX_RANK: usize = 3;

    /// Create a shape, checking the rank is in 1..=3, every entry is > 0
    /// and the element count fits in `usize`.
    pub fn new(dims: impl Into<Vec<usize>>) -> Result<Self> {
        let dims = dims.into();
        let count = dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d));
        if dims.is_empty() || dims.len() > Self::MAX_RANK || dims.contains(&0) || count.is_none()
        {
            return Err(Error::Shape { dims });
        }
        Ok(Shape(dims))
    }

    /// The dimension sizes as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Number of dimensions (1, 2 or 3; 0 only for the empty shape).
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    pub fn rows(&self) -> usize {
        match self.0.as_slice() {
            [] => 0,
            [_] => 1,
            [rows, _] => *rows,
            [_, rows, _] => *rows,
            _ => unreachable!("rank is validated on construction"),
        }
    }

    pub fn cols(&self) -> usize {
        self.0.last().copied().unwrap_or(0)
    }

    pub fn channels(&self) -> usize {
        match self.0.as_slice() {
            [] => 0,
            [channels, _, _] => *channels,
            _ => 1,
        }
    }

    /// Elements in one channel plane (rows × cols).
    pub fn plane_size(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Total number of elements (rows × cols × channels).
    pub fn size(&self) -> usize {
        self.plane_size() * self.channels()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Physical cube extents as (rows, cols, channels).
    pub fn extents(&self) -> (usize, usize, usize) {
        (self.rows(), self.cols(), self.channels())
    }

    /// Shape `[channels, rows, cols]` reduced to the lowest rank that can
    /// still hold it, never going below `min_rank`.
    pub(crate) fn from_extents(
        rows: usize,
        cols: usize,
        channels: usize,
        min_rank: usize,
    ) -> Result<Self> {
        if channels > 1 || min_rank >= 3 {
            Shape::new(vec![channels, rows, cols])
        } else if rows > 1 || min_rank == 2 {
            Shape::new(vec![rows, cols])
        } else {
            Shape::new(vec![cols])
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

// Fallible conversions
// These let you write: Shape::try_from((2, 3)) instead of Shape::new(vec![2, 3])

impl TryFrom<usize> for Shape {
    type Error = Error;
    fn try_from(d: usize) -> Result<Self> {
        Shape::new(vec![d])
    }
}

impl TryFrom<(usize, usize)> for Shape {
    type Error = Error;
    fn try_from((d0, d1): (usize, usize)) -> Result<Self> {
        Shape::new(vec![d0, d1])
    }
}

impl TryFrom<(usize, usize, usize)> for Shape {
    type Error = Error;
    fn try_from((d0, d1, d2): (usize, usize, usize)) -> Result<Self> {
        Shape::new(vec![d0, d1, d2])
    }
}

impl TryFrom<Vec<usize>> for Shape {
    type Error = Error;
    fn try_from(v: Vec<usize>) -> Result<Self> {
        Shape::new(v)
    }
}

impl TryFrom<&[usize]> for Shape {
    type Error = Error;
    fn try_from(s: &[usize]) -> Result<Self> {
        Shape::new(s.to_vec())
    }
}
