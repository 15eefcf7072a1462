use std::fmt;

use rand::Rng;

use crate::display::{render_planes, PrintOptions};
use crate::dtype::{DType, WithDType};
use crate::error::{Error, Result};
use crate::order;
use crate::padding::{self, Pads};
use crate::plane::{Plane, PlaneMut};
use crate::shape::Shape;
use crate::storage::StorageCube;

// Tensor: dense 1 to 3 dimensional array
//
// A Tensor owns exactly one Shape (what callers see) and one StorageCube
// (the column-major planes). Every mutating operation updates both or
// neither; a failed call leaves the tensor untouched.
//
// OWNERSHIP:
//
//   Clone is a deep copy of shape and buffer. Moves transfer the buffer;
//   `std::mem::take` leaves behind the empty tensor (Tensor::default()),
//   on which size-dependent operations fail with Error::EmptyTensor.
//
// VIEWS:
//
//   slice()/slice_mut() hand out plane views borrowing the tensor, so
//   reshape/flatten/padding cannot be called while a view is alive.
//
// ORDER FLAGS:
//
//   fill_values and values default to row-major in most call sites;
//   reshape and flatten default to the raw (column-major) reinterpretation.
//   Pass the flag explicitly either way.

/// A dense tensor of rank 1 to 3 with column-major channel planes.
///
/// # Example
/// ```
/// use planar_core::Tensor;
///
/// let mut t = Tensor::<f32>::new_3d(2, 2, 3)?;
/// t.fill_values(&(0..12).map(|v| v as f32).collect::<Vec<_>>(), true)?;
/// assert_eq!(t.at(1, 0, 2)?, 8.0);
/// assert_eq!(t.values(false)?[..6], [0.0f32, 3.0, 1.0, 4.0, 2.0, 5.0]);
/// # Ok::<(), planar_core::Error>(())
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct Tensor<T> {
    shape: Shape,
    data: StorageCube<T>,
}

impl<T: WithDType> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor(shape={}, dtype={})", self.shape, T::DTYPE)
    }
}

impl<T: WithDType> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", self)?;
        render_planes(f, self.data.planes(), self.channels(), &PrintOptions::default())
    }
}

impl<T: WithDType> Tensor<T> {
    // Constructors

    fn with_shape(shape: Shape) -> Result<Self> {
        let (rows, cols, channels) = shape.extents();
        Ok(Tensor {
            data: StorageCube::zeros(rows, cols, channels)?,
            shape,
        })
    }

    /// 1-D tensor of `size` zeros (one row, `size` columns).
    pub fn new_1d(size: usize) -> Result<Self> {
        Self::with_shape(Shape::new(vec![size])?)
    }

    /// 2-D tensor of zeros.
    pub fn new_2d(rows: usize, cols: usize) -> Result<Self> {
        Self::with_shape(Shape::new(vec![rows, cols])?)
    }

    /// 3-D tensor of zeros, shape `[channels, rows, cols]`.
    pub fn new_3d(channels: usize, rows: usize, cols: usize) -> Result<Self> {
        Self::with_shape(Shape::new(vec![channels, rows, cols])?)
    }

    /// Tensor of zeros from a shape vector of 1 to 3 positive entries.
    pub fn from_shape(dims: &[usize]) -> Result<Self> {
        Self::with_shape(Shape::try_from(dims)?)
    }

    /// Build a tensor and fill it from `values` in one step.
    pub fn from_values(dims: &[usize], values: &[T], row_major: bool) -> Result<Self> {
        let mut t = Self::from_shape(dims)?;
        t.fill_values(values, row_major)?;
        Ok(t)
    }

    // Accessors

    pub fn rows(&self) -> usize {
        self.data.rows()
    }

    pub fn cols(&self) -> usize {
        self.data.cols()
    }

    pub fn channels(&self) -> usize {
        self.data.channels()
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Elements per channel plane (rows × cols).
    pub fn plane_size(&self) -> usize {
        self.data.plane_size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Snapshot of the shape vector.
    pub fn shapes(&self) -> Vec<usize> {
        self.shape.dims().to_vec()
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Size of the element buffer in bytes.
    pub fn nbytes(&self) -> usize {
        self.size() * T::DTYPE.size_in_bytes()
    }

    /// The element buffer in physical (column-major per plane) order.
    pub fn raw_data(&self) -> &[T] {
        self.data.as_slice()
    }

    fn ensure_nonempty(&self, op: &'static str) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyTensor { op });
        }
        Ok(())
    }

    // Element and plane access

    /// Borrowed view of one channel plane.
    pub fn slice(&self, channel: usize) -> Result<Plane<'_, T>> {
        self.data.slice(channel)
    }

    pub fn slice_mut(&mut self, channel: usize) -> Result<PlaneMut<'_, T>> {
        self.data.slice_mut(channel)
    }

    /// Owned copy of one channel plane.
    pub fn plane_values(&self, channel: usize, row_major: bool) -> Result<Vec<T>> {
        Ok(self.data.slice(channel)?.to_vec(row_major))
    }

    pub fn at(&self, channel: usize, row: usize, col: usize) -> Result<T> {
        self.data.at(channel, row, col)
    }

    /// Element at a flat offset in physical order (same order as `at`).
    pub fn index(&self, offset: usize) -> Result<T> {
        self.data.index(offset)
    }

    pub fn index_mut(&mut self, offset: usize) -> Result<&mut T> {
        self.data.index_mut(offset)
    }

    // Mutation

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) -> Result<()> {
        self.ensure_nonempty("fill")?;
        self.data.fill(value);
        Ok(())
    }

    /// Fill from a flat sequence of exactly `size()` elements.
    ///
    /// With `row_major` (the usual choice) `values` lists each plane row by
    /// row, planes in channel order. Without it `values` is copied in
    /// physical column-major order.
    pub fn fill_values(&mut self, values: &[T], row_major: bool) -> Result<()> {
        self.ensure_nonempty("fill_values")?;
        order::fill_from(&mut self.data, &self.shape, values, row_major)
    }

    /// Apply `f` to every element in place. `f` must be pure; the visiting
    /// order is unspecified.
    pub fn transform<F: Fn(T) -> T>(&mut self, f: F) -> Result<()> {
        self.ensure_nonempty("transform")?;
        self.data.transform(f);
        Ok(())
    }

    /// Like [`Tensor::transform`], spread across the rayon thread pool.
    pub fn par_transform<F: Fn(T) -> T + Sync + Send>(&mut self, f: F) -> Result<()> {
        self.ensure_nonempty("par_transform")?;
        self.data.par_transform(f);
        Ok(())
    }

    /// Fill with standard-normal samples.
    pub fn rand(&mut self) -> Result<()> {
        self.ensure_nonempty("rand")?;
        self.data.randomize();
        Ok(())
    }

    /// Fill with standard-normal samples drawn from `rng`.
    pub fn rand_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.ensure_nonempty("rand")?;
        self.data.randomize_with(rng);
        Ok(())
    }

    /// Change the shape to `dims` (same element count).
    ///
    /// `row_major = false` reinterprets the column-major memory under the
    /// new shape. `row_major = true` keeps the row-major element sequence:
    /// `values(true)` is unchanged by the reshape.
    pub fn reshape(&mut self, dims: &[usize], row_major: bool) -> Result<()> {
        self.ensure_nonempty("reshape")?;
        let new_shape = Shape::try_from(dims)?;
        order::reshape(&mut self.data, &mut self.shape, new_shape, row_major)
    }

    /// Reshape to the 1-D shape `[size()]`.
    pub fn flatten(&mut self, row_major: bool) -> Result<()> {
        self.ensure_nonempty("flatten")?;
        let size = self.size();
        self.reshape(&[size], row_major)
    }

    /// Pad every plane with `[top, bottom, left, right]` rows/columns of `value`.
    ///
    /// Rank-3 tensors keep the `[channels, rows, cols]` shape, rank-2 tensors
    /// stay `[rows, cols]`, and a rank-1 tensor becomes `[rows, cols]` only
    /// if rows were added.
    pub fn padding(&mut self, pads: impl Into<Pads>, value: T) -> Result<()> {
        self.ensure_nonempty("padding")?;
        padding::pad(&mut self.data, &mut self.shape, pads.into(), value)
    }

    /// [`Tensor::padding`] taking the pads as a slice of exactly 4 entries.
    pub fn padding_slice(&mut self, pads: &[usize], value: T) -> Result<()> {
        let pads: [usize; 4] = match pads.try_into() {
            Ok(p) => p,
            Err(_) => crate::bail!("padding expects 4 values, got {}", pads.len()),
        };
        self.padding(pads, value)
    }

    // Extraction

    /// All elements as a flat Vec of length `size()`: row by row within each
    /// plane when `row_major`, else in physical column-major order.
    pub fn values(&self, row_major: bool) -> Result<Vec<T>> {
        self.ensure_nonempty("values")?;
        Ok(order::extract(&self.data, row_major))
    }

    /// Render the planes as text.
    pub fn to_string_with(&self, opts: &PrintOptions) -> Result<String> {
        let mut out = String::new();
        render_planes(&mut out, self.data.planes(), self.channels(), opts)
            .map_err(|e| Error::msg(format!("rendering {:?}: {}", self, e)))?;
        Ok(out)
    }

    /// Log a dump of the tensor at info level.
    pub fn show(&self) -> Result<()> {
        self.show_with(&PrintOptions::default())
    }

    pub fn show_with(&self, opts: &PrintOptions) -> Result<()> {
        self.ensure_nonempty("show")?;
        log::info!("{:?}\n{}", self, self.to_string_with(opts)?);
        Ok(())
    }
}
