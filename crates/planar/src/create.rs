use std::sync::Arc;

use planar_core::{Result, Tensor, WithDType};

/// Reference-counted tensor shared between pipeline stages.
///
/// Cloning the handle is cheap; the tensor itself is immutable through it.
/// Use [`Arc::make_mut`] to get a private, mutable copy when needed.
pub type SharedTensor<T> = Arc<Tensor<T>>;

/// Shared 1-D tensor of zeros.
pub fn tensor_1d<T: WithDType>(size: usize) -> Result<SharedTensor<T>> {
    Ok(Arc::new(Tensor::new_1d(size)?))
}

/// Shared 2-D tensor of zeros.
pub fn tensor_2d<T: WithDType>(rows: usize, cols: usize) -> Result<SharedTensor<T>> {
    Ok(Arc::new(Tensor::new_2d(rows, cols)?))
}

/// Shared 3-D tensor of zeros, shape `[channels, rows, cols]`.
pub fn tensor_3d<T: WithDType>(
    channels: usize,
    rows: usize,
    cols: usize,
) -> Result<SharedTensor<T>> {
    Ok(Arc::new(Tensor::new_3d(channels, rows, cols)?))
}

/// Shared tensor of zeros from a shape vector.
pub fn tensor_from_shape<T: WithDType>(dims: &[usize]) -> Result<SharedTensor<T>> {
    let t = Tensor::from_shape(dims)?;
    log::debug!("created shared tensor {:?}", t);
    Ok(Arc::new(t))
}
