use crate::dtype::WithDType;
use crate::error::{Error, Result};
use crate::shape::Shape;
use crate::storage::StorageCube;

/// Spatial padding amounts, in rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pads {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl Pads {
    pub fn new(top: usize, bottom: usize, left: usize, right: usize) -> Self {
        Pads {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Same amount on every side.
    pub fn uniform(p: usize) -> Self {
        Pads::new(p, p, p, p)
    }

    pub fn is_zero(&self) -> bool {
        *self == Pads::default()
    }
}

impl From<[usize; 4]> for Pads {
    /// `[top, bottom, left, right]`
    fn from([top, bottom, left, right]: [usize; 4]) -> Self {
        Pads::new(top, bottom, left, right)
    }
}

/// Grow every plane of `cube` by `pads`, filling the border with `value`.
///
/// A new cube is allocated, filled with `value`, and each original plane is
/// copied into the sub-rectangle at (top, left). `shape` is rewritten to the
/// new extents, keeping its rank unless the rows of a rank-1 shape grew.
pub fn pad<T: WithDType>(
    cube: &mut StorageCube<T>,
    shape: &mut Shape,
    pads: Pads,
    value: T,
) -> Result<()> {
    if pads.is_zero() {
        return Ok(());
    }
    let grown = |extent: usize, a: usize, b: usize| {
        extent
            .checked_add(a)
            .and_then(|e| e.checked_add(b))
            .ok_or_else(|| Error::msg(format!("padding {:?} overflows the tensor extents", pads)))
    };
    let rows = grown(cube.rows(), pads.top, pads.bottom)?;
    let cols = grown(cube.cols(), pads.left, pads.right)?;
    let channels = cube.channels();
    let new_shape = Shape::from_extents(rows, cols, channels, shape.rank())?;

    let mut padded = StorageCube::full(rows, cols, channels, value)?;
    for (src, mut dst) in cube.planes().zip(padded.planes_mut()) {
        dst.copy_block(&src, pads.top, pads.left)?;
    }

    log::debug!("padding: {} -> {} with {:?}", shape, new_shape, pads);
    *cube = padded;
    *shape = new_shape;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{extract, fill_from};

    fn filled(dims: Vec<usize>) -> (StorageCube<i32>, Shape) {
        let shape = Shape::new(dims).unwrap();
        let (r, c, ch) = shape.extents();
        let mut cube = StorageCube::zeros(r, c, ch).unwrap();
        let values: Vec<i32> = (1..=shape.size() as i32).collect();
        fill_from(&mut cube, &shape, &values, true).unwrap();
        (cube, shape)
    }

    #[test]
    fn test_pad_2x2_border() {
        let (mut cube, mut shape) = filled(vec![2, 2]);
        pad(&mut cube, &mut shape, Pads::uniform(1), 0).unwrap();
        assert_eq!(shape.dims(), &[4, 4]);
        assert_eq!(
            extract(&cube, true),
            vec![0, 0, 0, 0, 0, 1, 2, 0, 0, 3, 4, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_pad_asymmetric_multichannel() {
        let (mut cube, mut shape) = filled(vec![2, 1, 2]);
        pad(&mut cube, &mut shape, Pads::new(0, 1, 2, 0), -1).unwrap();
        assert_eq!(shape.dims(), &[2, 2, 4]);
        assert_eq!(
            extract(&cube, true),
            vec![-1, -1, 1, 2, -1, -1, -1, -1, -1, -1, 3, 4, -1, -1, -1, -1]
        );
    }

    #[test]
    fn test_pad_zero_is_identity() {
        let (mut cube, mut shape) = filled(vec![3, 2]);
        let before = (cube.clone(), shape.clone());
        assert!(Pads::from([0, 0, 0, 0]).is_zero());
        assert!(!Pads::uniform(1).is_zero());
        pad(&mut cube, &mut shape, Pads::from([0, 0, 0, 0]), 9).unwrap();
        assert_eq!((cube, shape), before);
    }

    #[test]
    fn test_pad_overflow_is_an_error() {
        let (mut cube, mut shape) = filled(vec![2, 2]);
        let before = (cube.clone(), shape.clone());
        assert!(matches!(
            pad(&mut cube, &mut shape, Pads::new(usize::MAX, 1, 0, 0), 0),
            Err(Error::Msg(_))
        ));
        let wide = 1usize << (usize::BITS / 2);
        assert!(matches!(
            pad(&mut cube, &mut shape, Pads::new(wide, 0, wide, 0), 0),
            Err(Error::Shape { .. })
        ));
        assert_eq!((cube, shape), before);
    }

    #[test]
    fn test_pad_rank1_promotes_only_when_rows_grow() {
        let (mut cube, mut shape) = filled(vec![3]);
        pad(&mut cube, &mut shape, Pads::new(0, 0, 1, 1), 0).unwrap();
        assert_eq!(shape.dims(), &[5]);
        assert_eq!(extract(&cube, true), vec![0, 1, 2, 3, 0]);

        pad(&mut cube, &mut shape, Pads::new(1, 0, 0, 0), 7).unwrap();
        assert_eq!(shape.dims(), &[2, 5]);
        assert_eq!(extract(&cube, true), vec![7, 7, 7, 7, 7, 0, 1, 2, 3, 0]);
    }
}
