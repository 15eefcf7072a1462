//! # planar-core
//!
//! Dense 1 to 3 dimensional tensors for inference pipelines.
//!
//! This crate provides:
//! - [`Tensor`]: owning facade: construction, fill, reshape, padding, extraction
//! - [`Shape`]: validated dimension vector with row/col/channel degeneracy rules
//! - [`StorageCube`]: column-major-per-plane physical buffer
//! - [`Plane`] / [`PlaneMut`]: borrowed views of one channel plane
//! - [`PlaneLayout`]: stride arithmetic between row-major and column-major order
//! - [`DType`] / [`WithDType`]: numeric element types
// - order: row-major ⇄ column-major conversion (fill, extract, reshape)
// - padding: spatial growth of every plane
// - display: PrintOptions for diagnostic dumps

pub mod display;
pub mod dtype;
pub mod error;
pub mod layout;
pub mod order;
pub mod padding;
pub mod plane;
pub mod shape;
pub mod storage;
pub mod tensor;

pub use display::PrintOptions;
pub use dtype::{DType, WithDType};
pub use error::{Error, Result};
pub use layout::PlaneLayout;
pub use padding::Pads;
pub use plane::{Plane, PlaneMut};
pub use shape::Shape;
pub use storage::StorageCube;
pub use tensor::Tensor;
