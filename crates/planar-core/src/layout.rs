// PlaneLayout: stride arithmetic of one column-major channel plane
//
// Inside a plane the row index varies fastest:
//
//   offset(row, col) = row * 1 + col * rows
//
// so a 2×3 plane holding the logical matrix
//
//   [[0, 1, 2],
//    [3, 4, 5]]
//
// is stored as [0, 3, 1, 4, 2, 5].
//
// Converting between the logical row-major order callers use and this
// physical order is a matter of walking the plane with the right strides.
// StridedIter does that walk and yields physical offsets, so a row-major
// traversal is `row_major_offsets()` → 0, 2, 4, 1, 3, 5 for the plane above.

/// Extents and strides of a single column-major plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneLayout {
    rows: usize,
    cols: usize,
}

impl PlaneLayout {
    pub fn new(rows: usize, cols: usize) -> Self {
        PlaneLayout { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of elements in the plane.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physical offset of (row, col) within the plane. Unchecked.
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row + col * self.rows
    }

    /// Physical offsets in logical row-major order (row by row).
    pub fn row_major_offsets(&self) -> StridedIter {
        StridedIter::new([self.rows, self.cols], [1, self.rows])
    }
}

// StridedIter: 2-D index walk producing flat offsets
//
// Advances the rightmost index first, like a row-major odometer, and maps
// each (outer, inner) pair through the strides.

/// Iterator that yields flat storage offsets for a 2-D strided walk.
#[derive(Debug, Clone)]
pub struct StridedIter {
    current: [usize; 2],
    dims: [usize; 2],
    strides: [usize; 2],
    remaining: usize,
    started: bool,
}

impl StridedIter {
    fn new(dims: [usize; 2], strides: [usize; 2]) -> Self {
        StridedIter {
            current: [0, 0],
            dims,
            strides,
            remaining: dims[0] * dims[1],
            started: false,
        }
    }

    fn flat_index(&self) -> usize {
        self.current[0] * self.strides[0] + self.current[1] * self.strides[1]
    }

    fn advance(&mut self) {
        self.current[1] += 1;
        if self.current[1] < self.dims[1] {
            return;
        }
        self.current[1] = 0;
        self.current[0] += 1;
    }
}

impl Iterator for StridedIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        if self.started {
            self.advance();
        }
        self.started = true;
        self.remaining -= 1;
        Some(self.flat_index())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for StridedIter {}
