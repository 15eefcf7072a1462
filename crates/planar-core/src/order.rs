use crate::dtype::WithDType;
use crate::error::{Error, Result};
use crate::shape::Shape;
use crate::storage::StorageCube;

// Order conversion: row-major logical sequences vs column-major planes
//
// Callers think row-major: a [2, 3] tensor filled with 0..6 holds
//
//   [[0, 1, 2],
//    [3, 4, 5]]
//
// while the cube stores each plane column-major: [0, 3, 1, 4, 2, 5].
// Order only matters *inside* a plane; planes always follow channel order.
//
// RESHAPE:
//
//   A raw reshape relabels the cube axes over the same memory, so it keeps
//   the column-major element sequence. A row-major reshape must keep the
//   row-major sequence instead, so it extracts row-major under the old
//   shape and refills row-major under the new one.
//
//   [2, 3] holding [[0, 1, 2], [3, 4, 5]] reshaped to [3, 2]:
//     raw:       memory [0, 3, 1, 4, 2, 5] → [[0, 4], [3, 2], [1, 5]]
//     row-major: logical 0..6              → [[0, 1], [2, 3], [4, 5]]

/// Fill `cube` from a flat sequence.
///
/// With `row_major` and a shape of rank ≥ 2, each `plane_size` chunk of
/// `values` is read as a row-major `rows × cols` matrix and transposed into
/// its plane. Otherwise `values` is copied straight into physical order;
/// for a rank-1 shape the two orders agree.
pub fn fill_from<T: WithDType>(
    cube: &mut StorageCube<T>,
    shape: &Shape,
    values: &[T],
    row_major: bool,
) -> Result<()> {
    if values.len() != cube.len() {
        return Err(Error::SizeMismatch {
            op: "fill",
            expected: cube.len(),
            got: values.len(),
        });
    }

    if !row_major || shape.rank() < 2 {
        return cube.copy_from_slice(values);
    }

    let channel_count = if shape.rank() == 3 { cube.channels() } else { 1 };
    let plane_size = cube.plane_size();
    for (i, mut plane) in cube.planes_mut().take(channel_count).enumerate() {
        plane.assign_row_major(&values[i * plane_size..(i + 1) * plane_size])?;
    }
    if log::log_enabled!(log::Level::Trace) {
        log::trace!(
            "fill_from: {} planes of {} transposed from row-major",
            channel_count,
            plane_size
        );
    }
    Ok(())
}

/// Flatten `cube` into a new Vec of length `cube.len()`.
///
/// Planes are emitted in channel order; each one row by row when
/// `row_major`, otherwise in its native column-major order. This is the
/// inverse of [`fill_from`] under the same flag.
pub fn extract<T: WithDType>(cube: &StorageCube<T>, row_major: bool) -> Vec<T> {
    if !row_major {
        return cube.as_slice().to_vec();
    }
    let mut result = Vec::with_capacity(cube.len());
    for plane in cube.planes() {
        result.extend(plane.to_vec(true));
    }
    result
}

/// Reshape `cube` to `new_shape`, updating `shape` in lockstep.
///
/// The cube axes are always relabelled to the new (rows, cols, channels).
/// With `row_major` the row-major element sequence is captured first and
/// refilled afterwards, so logical order survives instead of memory order.
pub fn reshape<T: WithDType>(
    cube: &mut StorageCube<T>,
    shape: &mut Shape,
    new_shape: Shape,
    row_major: bool,
) -> Result<()> {
    if new_shape.size() != cube.len() {
        return Err(Error::SizeMismatch {
            op: "reshape",
            expected: cube.len(),
            got: new_shape.size(),
        });
    }

    let captured = if row_major {
        Some(extract(cube, true))
    } else {
        None
    };

    let (rows, cols, channels) = new_shape.extents();
    cube.reshape_raw(rows, cols, channels)?;
    log::debug!(
        "reshape: {} -> {} (row_major={})",
        shape,
        new_shape,
        row_major
    );
    *shape = new_shape;

    if let Some(values) = captured {
        fill_from(cube, shape, &values, true)?;
    }
    Ok(())
}
