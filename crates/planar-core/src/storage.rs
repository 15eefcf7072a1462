use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use rayon::prelude::*;

use crate::dtype::WithDType;
use crate::error::{Error, Result};
use crate::layout::PlaneLayout;
use crate::plane::{Plane, PlaneMut};

// StorageCube: the physical buffer behind a tensor
//
// Three axes: row, column, channel. One flat Vec holds every element:
//
//   offset(channel, row, col) = row + col * rows + channel * rows * cols
//
// i.e. column-major inside a plane, planes laid out one after another.
// The cube knows nothing about the caller-facing shape vector; Tensor keeps
// the two in lockstep.

/// Dense 3-axis buffer, column-major per channel plane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageCube<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
    channels: usize,
}

/// Element count of a cube, or `None` when it does not fit in `usize`.
fn checked_len(rows: usize, cols: usize, channels: usize) -> Option<usize> {
    rows.checked_mul(cols)?.checked_mul(channels)
}

impl<T: WithDType> StorageCube<T> {
    /// Zero-initialized cube of the given extents.
    pub fn zeros(rows: usize, cols: usize, channels: usize) -> Result<Self> {
        Self::full(rows, cols, channels, T::zero())
    }

    /// Cube with every element set to `value`.
    pub fn full(rows: usize, cols: usize, channels: usize, value: T) -> Result<Self> {
        let len = checked_len(rows, cols, channels).ok_or_else(|| Error::Shape {
            dims: vec![channels, rows, cols],
        })?;
        Ok(StorageCube {
            data: vec![value; len],
            rows,
            cols,
            channels,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn plane_size(&self) -> usize {
        self.rows * self.cols
    }

    pub fn plane_layout(&self) -> PlaneLayout {
        PlaneLayout::new(self.rows, self.cols)
    }

    /// The whole buffer in physical order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn check_channel(&self, channel: usize) -> Result<std::ops::Range<usize>> {
        if channel >= self.channels {
            return Err(Error::out_of_bounds("channel", channel, self.channels));
        }
        let ps = self.plane_size();
        Ok(channel * ps..(channel + 1) * ps)
    }

    /// Borrowed view of one channel plane.
    pub fn slice(&self, channel: usize) -> Result<Plane<'_, T>> {
        let range = self.check_channel(channel)?;
        Ok(Plane::new(&self.data[range], self.plane_layout()))
    }

    /// Mutable borrowed view of one channel plane.
    pub fn slice_mut(&mut self, channel: usize) -> Result<PlaneMut<'_, T>> {
        let range = self.check_channel(channel)?;
        let layout = self.plane_layout();
        Ok(PlaneMut::new(&mut self.data[range], layout))
    }

    /// Iterate over all planes in channel order.
    pub fn planes(&self) -> impl Iterator<Item = Plane<'_, T>> + '_ {
        let layout = self.plane_layout();
        // chunks() panics on a zero chunk size; an empty cube has no planes.
        let ps = self.plane_size().max(1);
        self.data.chunks(ps).map(move |c| Plane::new(c, layout))
    }

    /// Iterate mutably over all planes in channel order.
    pub fn planes_mut(&mut self) -> impl Iterator<Item = PlaneMut<'_, T>> + '_ {
        let layout = self.plane_layout();
        let ps = self.plane_size().max(1);
        self.data.chunks_mut(ps).map(move |c| PlaneMut::new(c, layout))
    }

    /// Physical offset of (channel, row, col), bounds-checked on every axis.
    pub fn offset(&self, channel: usize, row: usize, col: usize) -> Result<usize> {
        if channel >= self.channels {
            return Err(Error::out_of_bounds("channel", channel, self.channels));
        }
        if row >= self.rows {
            return Err(Error::out_of_bounds("row", row, self.rows));
        }
        if col >= self.cols {
            return Err(Error::out_of_bounds("col", col, self.cols));
        }
        Ok(row + col * self.rows + channel * self.plane_size())
    }

    pub fn at(&self, channel: usize, row: usize, col: usize) -> Result<T> {
        Ok(self.data[self.offset(channel, row, col)?])
    }

    /// Element at a flat physical offset.
    pub fn index(&self, offset: usize) -> Result<T> {
        self.data
            .get(offset)
            .copied()
            .ok_or_else(|| Error::out_of_bounds("offset", offset, self.data.len()))
    }

    pub fn index_mut(&mut self, offset: usize) -> Result<&mut T> {
        let len = self.data.len();
        self.data
            .get_mut(offset)
            .ok_or_else(|| Error::out_of_bounds("offset", offset, len))
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Copy `values` into the buffer in physical order.
    pub fn copy_from_slice(&mut self, values: &[T]) -> Result<()> {
        if values.len() != self.data.len() {
            return Err(Error::SizeMismatch {
                op: "copy_from_slice",
                expected: self.data.len(),
                got: values.len(),
            });
        }
        self.data.copy_from_slice(values);
        Ok(())
    }

    /// Apply `f` to every element in place.
    pub fn transform<F: Fn(T) -> T>(&mut self, f: F) {
        for v in self.data.iter_mut() {
            *v = f(*v);
        }
    }

    /// Apply `f` to every element in place on the rayon thread pool.
    pub fn par_transform<F: Fn(T) -> T + Sync + Send>(&mut self, f: F) {
        self.data.par_iter_mut().for_each(|v| *v = f(*v));
    }

    /// Fill with independent standard-normal samples from the thread RNG.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    /// Fill with independent standard-normal samples from `rng`.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for v in self.data.iter_mut() {
            let sample: f64 = StandardNormal.sample(rng);
            *v = T::from_f64(sample);
        }
    }

    /// Relabel the axes of the same memory. The element count must not change.
    pub fn reshape_raw(&mut self, rows: usize, cols: usize, channels: usize) -> Result<()> {
        let new_len = checked_len(rows, cols, channels).ok_or_else(|| Error::Shape {
            dims: vec![channels, rows, cols],
        })?;
        if new_len != self.data.len() {
            return Err(Error::SizeMismatch {
                op: "reshape_raw",
                expected: self.data.len(),
                got: new_len,
            });
        }
        self.rows = rows;
        self.cols = cols;
        self.channels = channels;
        Ok(())
    }
}
