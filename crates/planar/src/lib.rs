//! # planar
//!
//! Dense 1 to 3 dimensional tensors for inference pipelines.
//!
//! This is the facade crate that re-exports everything you need.
//!
//! ## Usage
//!
//! ```rust
//! use planar::prelude::*;
//!
//! let mut t = Tensor::<f32>::new_2d(2, 2)?;
//! t.fill_values(&[1.0, 2.0, 3.0, 4.0], true)?;
//! t.padding([1, 1, 1, 1], 0.0)?;
//! assert_eq!(t.shapes(), vec![4, 4]);
//! # Ok::<(), planar::Error>(())
//! ```
//!
//! ## Architecture
//!
//! | Crate | Purpose |
//! |-------|----------|
//! | `planar-core` | Tensor, Shape, StorageCube, plane views, order conversion, padding |
//! | `planar` | Re-exports, prelude, shared tensor handles |
//!
//! ## Memory order
//!
//! Callers fill and read tensors row-major; storage is column-major inside
//! each channel plane. See [`Tensor::fill_values`], [`Tensor::values`] and
//! [`Tensor::reshape`] for how the `row_major` flag selects between them.

/// Re-export core types.
pub use planar_core::{
    bail, layout, order, padding, DType, Error, Pads, Plane, PlaneLayout, PlaneMut, PrintOptions,
    Result, Shape, StorageCube, Tensor, WithDType,
};

/// Shared tensor handles for passing tensors between pipeline stages.
pub mod create;

/// Prelude: import this for the most common types.
pub mod prelude {
    pub use crate::create::{tensor_1d, tensor_2d, tensor_3d, tensor_from_shape, SharedTensor};
    pub use crate::{DType, Error, Pads, PrintOptions, Result, Shape, Tensor, WithDType};
}
