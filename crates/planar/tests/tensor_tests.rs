// Integration tests for planar
//
// These exercise the Tensor facade end to end: construction, row-major and
// column-major fills, reshape/flatten semantics, padding, bounds and the
// empty-tensor state.

use planar::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn iota(n: usize) -> Vec<f32> {
    (0..n).map(|v| v as f32).collect()
}

// Order conversion

#[test]
fn test_two_channel_scenario() -> planar::Result<()> {
    let mut t = Tensor::<f32>::new_3d(2, 2, 3)?;
    t.fill_values(&iota(12), true)?;

    assert_eq!(t.values(true)?, iota(12));
    assert_eq!(
        t.values(false)?,
        vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0, 6.0, 9.0, 7.0, 10.0, 8.0, 11.0]
    );
    Ok(())
}

#[test]
fn test_at_matches_logical_position() -> planar::Result<()> {
    let t = Tensor::<i32>::from_values(&[2, 3, 4], &(0..24).collect::<Vec<i32>>(), true)?;
    for c in 0..2 {
        for r in 0..3 {
            for col in 0..4 {
                assert_eq!(t.at(c, r, col)?, (c * 12 + r * 4 + col) as i32);
            }
        }
    }
    Ok(())
}

#[test]
fn test_index_uses_physical_order() -> planar::Result<()> {
    let t = Tensor::<i32>::from_values(&[2, 3], &[0, 1, 2, 3, 4, 5], true)?;
    let physical: Vec<i32> = (0..t.size()).map(|i| t.index(i)).collect::<planar::Result<_>>()?;
    assert_eq!(physical, vec![0, 3, 1, 4, 2, 5]);
    assert_eq!(physical, t.raw_data());
    Ok(())
}

#[test]
fn test_round_trip_both_orders() -> planar::Result<()> {
    for dims in [vec![7], vec![3, 5], vec![4, 1], vec![3, 2, 4], vec![1, 1, 9]] {
        let n: usize = dims.iter().product();
        for row_major in [true, false] {
            let t = Tensor::<f32>::from_values(&dims, &iota(n), row_major)?;
            assert_eq!(t.values(row_major)?, iota(n), "dims {:?} row_major {}", dims, row_major);
        }
    }
    Ok(())
}

#[test]
fn test_column_major_fill_reads_back_transposed() -> planar::Result<()> {
    // Column-major [1, 2, 3, 4] for a 2×2 plane is the logical [[1, 3], [2, 4]].
    let t = Tensor::<f32>::from_values(&[2, 2], &[1.0, 2.0, 3.0, 4.0], false)?;
    assert_eq!(t.values(true)?, vec![1.0, 3.0, 2.0, 4.0]);
    assert_eq!(t.slice(0)?.to_rows(), vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
    Ok(())
}

#[test]
fn test_fill_size_mismatch_is_not_committed() -> planar::Result<()> {
    let mut t = Tensor::<f32>::new_2d(2, 2)?;
    t.fill(3.0)?;
    let err = t.fill_values(&[1.0, 2.0], true).unwrap_err();
    assert!(matches!(err, Error::SizeMismatch { expected: 4, got: 2, .. }));
    assert_eq!(t.values(true)?, vec![3.0; 4]);
    Ok(())
}

// Reshape / Flatten

#[test]
fn test_reshape_row_major_preserves_logical_order() -> planar::Result<()> {
    let mut t = Tensor::<f32>::from_values(&[2, 2, 3], &iota(12), true)?;
    t.reshape(&[3, 4], true)?;
    assert_eq!(t.shapes(), vec![3, 4]);
    assert_eq!(t.values(true)?, iota(12));
    assert_eq!(t.at(0, 2, 1)?, 9.0);
    Ok(())
}

#[test]
fn test_reshape_raw_preserves_memory_order() -> planar::Result<()> {
    let mut t = Tensor::<f32>::from_values(&[2, 3], &iota(6), true)?;
    let before = t.values(false)?;
    t.reshape(&[3, 2], false)?;
    assert_eq!(t.values(false)?, before);
    assert_eq!(t.values(true)?, vec![0.0, 4.0, 3.0, 2.0, 1.0, 5.0]);
    Ok(())
}

#[test]
fn test_reshape_inverse() -> planar::Result<()> {
    for row_major in [true, false] {
        let mut t = Tensor::<f32>::from_values(&[2, 3, 4], &iota(24), true)?;
        let original = t.values(row_major)?;
        t.reshape(&[4, 6], row_major)?;
        t.reshape(&[2, 3, 4], row_major)?;
        assert_eq!(t.shapes(), vec![2, 3, 4]);
        assert_eq!(t.values(row_major)?, original);
    }
    Ok(())
}

#[test]
fn test_reshape_into_channels() -> planar::Result<()> {
    let mut t = Tensor::<f32>::from_values(&[12], &iota(12), true)?;
    t.reshape(&[2, 2, 3], true)?;
    assert_eq!((t.channels(), t.rows(), t.cols()), (2, 2, 3));
    assert_eq!(t.plane_values(1, true)?, iota(12)[6..].to_vec());
    Ok(())
}

#[test]
fn test_flatten_consistency() -> planar::Result<()> {
    let mut t = Tensor::<f32>::from_values(&[3, 2, 2], &iota(12), true)?;
    let expected = t.values(true)?;
    t.flatten(true)?;
    assert_eq!(t.shapes(), vec![12]);
    assert_eq!((t.rows(), t.cols(), t.channels()), (1, 12, 1));
    assert_eq!(t.values(true)?, expected);
    Ok(())
}

#[test]
fn test_flatten_raw_keeps_physical_sequence() -> planar::Result<()> {
    let mut t = Tensor::<f32>::from_values(&[2, 3], &iota(6), true)?;
    t.flatten(false)?;
    assert_eq!(t.values(true)?, vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
    Ok(())
}

// Padding

#[test]
fn test_padding_border() -> planar::Result<()> {
    let mut t = Tensor::<f32>::from_values(&[2, 2], &[1.0, 2.0, 3.0, 4.0], true)?;
    t.padding([1, 1, 1, 1], 0.0)?;
    assert_eq!(t.shapes(), vec![4, 4]);
    assert_eq!(t.channels(), 1);

    for r in 0..4 {
        for c in 0..4 {
            let v = t.at(0, r, c)?;
            if r == 0 || r == 3 || c == 0 || c == 3 {
                assert_eq!(v, 0.0, "border ({}, {})", r, c);
            }
        }
    }
    assert_eq!(t.at(0, 1, 1)?, 1.0);
    assert_eq!(t.at(0, 1, 2)?, 2.0);
    assert_eq!(t.at(0, 2, 1)?, 3.0);
    assert_eq!(t.at(0, 2, 2)?, 4.0);
    Ok(())
}

#[test]
fn test_padding_identity() -> planar::Result<()> {
    for fill in [0.0f32, -7.5] {
        let mut t = Tensor::<f32>::from_values(&[2, 3, 2], &iota(12), true)?;
        let before = t.clone();
        t.padding(Pads::default(), fill)?;
        assert_eq!(t, before);
    }
    Ok(())
}

#[test]
fn test_padding_keeps_channels_first_shape() -> planar::Result<()> {
    let mut t = Tensor::<f32>::new_3d(3, 2, 2)?;
    t.padding(Pads::new(1, 0, 0, 2), 1.0)?;
    assert_eq!(t.shapes(), vec![3, 3, 4]);
    assert_eq!((t.channels(), t.rows(), t.cols()), (3, 3, 4));
    assert_eq!(t.size(), 36);
    Ok(())
}

// Bounds and empty state

#[test]
fn test_bounds_errors() -> planar::Result<()> {
    let mut t = Tensor::<f32>::new_3d(2, 3, 4)?;
    let channels = t.channels();
    let size = t.size();
    assert!(matches!(t.slice(channels), Err(Error::OutOfBounds { .. })));
    assert!(matches!(t.slice_mut(channels), Err(Error::OutOfBounds { .. })));
    assert!(matches!(t.at(channels, 0, 0), Err(Error::OutOfBounds { .. })));
    assert!(matches!(t.index(size), Err(Error::OutOfBounds { .. })));
    Ok(())
}

#[test]
fn test_moved_out_tensor_is_empty() -> planar::Result<()> {
    let mut a = Tensor::<f32>::from_values(&[2, 2], &iota(4), true)?;
    let b = std::mem::take(&mut a);
    assert_eq!(b.values(true)?, iota(4));
    assert!(a.is_empty());
    assert!(matches!(a.reshape(&[4], true), Err(Error::EmptyTensor { .. })));
    assert!(matches!(a.transform(|x| x + 1.0), Err(Error::EmptyTensor { .. })));
    Ok(())
}

// Randomized fill

#[test]
fn test_rand_with_seed_is_reproducible() -> planar::Result<()> {
    let mut a = Tensor::<f64>::new_3d(2, 8, 8)?;
    let mut b = Tensor::<f64>::new_3d(2, 8, 8)?;
    a.rand_with(&mut StdRng::seed_from_u64(42))?;
    b.rand_with(&mut StdRng::seed_from_u64(42))?;
    assert_eq!(a, b);

    let vals = a.values(true)?;
    let mean = vals.iter().sum::<f64>() / vals.len() as f64;
    assert!(mean.abs() < 0.5, "mean {} too far from 0", mean);
    Ok(())
}

#[test]
fn test_rand_fills_half_precision() -> planar::Result<()> {
    let mut t = Tensor::<half::f16>::new_2d(4, 4)?;
    t.rand()?;
    assert_eq!(t.dtype(), DType::F16);
    assert!(t.values(true)?.iter().any(|v| v.to_f64() != 0.0));
    Ok(())
}

// Shared handles

#[test]
fn test_shared_tensor_between_stages() -> planar::Result<()> {
    let shared: SharedTensor<f32> = tensor_3d(2, 2, 2)?;
    let stage = std::sync::Arc::clone(&shared);
    let handle = std::thread::spawn(move || stage.size());
    assert_eq!(handle.join().unwrap(), 8);
    Ok(())
}
