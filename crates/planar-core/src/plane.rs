use crate::dtype::WithDType;
use crate::error::{Error, Result};
use crate::layout::PlaneLayout;

// Plane views: borrowed access to one channel of a storage cube
//
// A view aliases the cube's memory; it never copies. Because it holds a
// borrow of the owning tensor, any operation that reallocates or relabels
// the buffer (reshape, flatten, padding, assignment, drop) cannot run while
// the view is alive. The compiler rejects what would otherwise be a stale
// pointer.
//
// `to_vec` is the copying alternative when the data has to outlive the
// borrow.

/// Read-only view of one channel plane.
#[derive(Debug, Clone, Copy)]
pub struct Plane<'a, T> {
    data: &'a [T],
    layout: PlaneLayout,
}

/// Mutable view of one channel plane.
#[derive(Debug)]
pub struct PlaneMut<'a, T> {
    data: &'a mut [T],
    layout: PlaneLayout,
}

fn check(layout: &PlaneLayout, row: usize, col: usize) -> Result<usize> {
    if row >= layout.rows() {
        return Err(Error::out_of_bounds("row", row, layout.rows()));
    }
    if col >= layout.cols() {
        return Err(Error::out_of_bounds("col", col, layout.cols()));
    }
    Ok(layout.offset(row, col))
}

impl<'a, T: WithDType> Plane<'a, T> {
    pub(crate) fn new(data: &'a [T], layout: PlaneLayout) -> Self {
        debug_assert_eq!(data.len(), layout.len());
        Plane { data, layout }
    }

    pub fn rows(&self) -> usize {
        self.layout.rows()
    }

    pub fn cols(&self) -> usize {
        self.layout.cols()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn layout(&self) -> PlaneLayout {
        self.layout
    }

    /// Element at (row, col), bounds-checked.
    pub fn at(&self, row: usize, col: usize) -> Result<T> {
        Ok(self.data[check(&self.layout, row, col)?])
    }

    /// The plane's memory in physical (column-major) order.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Copy the plane out, row by row when `row_major`, else column by column.
    pub fn to_vec(&self, row_major: bool) -> Vec<T> {
        if row_major {
            self.layout
                .row_major_offsets()
                .map(|off| self.data[off])
                .collect()
        } else {
            self.data.to_vec()
        }
    }

    /// Logical rows of the plane.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.rows())
            .map(|r| {
                (0..self.cols())
                    .map(|c| self.data[self.layout.offset(r, c)])
                    .collect()
            })
            .collect()
    }

    /// Physical columns of the plane, each one contiguous in memory.
    pub fn to_cols(&self) -> Vec<Vec<T>> {
        self.data
            .chunks(self.rows().max(1))
            .map(<[T]>::to_vec)
            .collect()
    }
}

impl<'a, T: WithDType> PlaneMut<'a, T> {
    pub(crate) fn new(data: &'a mut [T], layout: PlaneLayout) -> Self {
        debug_assert_eq!(data.len(), layout.len());
        PlaneMut { data, layout }
    }

    pub fn rows(&self) -> usize {
        self.layout.rows()
    }

    pub fn cols(&self) -> usize {
        self.layout.cols()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn layout(&self) -> PlaneLayout {
        self.layout
    }

    /// Reborrow as a read-only view.
    pub fn as_plane(&self) -> Plane<'_, T> {
        Plane::new(&*self.data, self.layout)
    }

    pub fn at(&self, row: usize, col: usize) -> Result<T> {
        Ok(self.data[check(&self.layout, row, col)?])
    }

    /// Mutable reference to the element at (row, col), bounds-checked.
    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut T> {
        let off = check(&self.layout, row, col)?;
        Ok(&mut self.data[off])
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Overwrite the plane with `values`, given row by row.
    pub fn assign_row_major(&mut self, values: &[T]) -> Result<()> {
        if values.len() != self.len() {
            return Err(Error::SizeMismatch {
                op: "assign_row_major",
                expected: self.len(),
                got: values.len(),
            });
        }
        for (off, &v) in self.layout.row_major_offsets().zip(values) {
            self.data[off] = v;
        }
        Ok(())
    }

    /// Copy `src` into the sub-rectangle whose top-left corner is (top, left).
    pub fn copy_block(&mut self, src: &Plane<'_, T>, top: usize, left: usize) -> Result<()> {
        let fits = |at: usize, len: usize, bound: usize| {
            at.checked_add(len).is_some_and(|end| end <= bound)
        };
        if !fits(top, src.rows(), self.rows()) || !fits(left, src.cols(), self.cols()) {
            return Err(Error::msg(format!(
                "block {}x{} at ({}, {}) does not fit a {}x{} plane",
                src.rows(),
                src.cols(),
                top,
                left,
                self.rows(),
                self.cols()
            )));
        }
        // Columns are contiguous in both planes, so copy column runs.
        for c in 0..src.cols() {
            let src_col = &src.as_slice()[c * src.rows()..(c + 1) * src.rows()];
            let start = self.layout.offset(top, left + c);
            self.data[start..start + src.rows()].copy_from_slice(src_col);
        }
        Ok(())
    }
}
