//! Image processing: decode, resize, and WebP encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Decode** | `image::ImageReader` |
//! | **Resize** | `resize_exact` with Lanczos3 |
//! | **Encode → WebP** | `webp::Encoder`, lossy at configured quality |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing encode operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Output planning, colour normalisation, and writing

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{ResponsiveSize, calculate_responsive_sizes, scaled_height};
pub use operations::{
    OutputConfig, OutputTarget, get_dimensions, load_source, normalize_color, plan_outputs,
    write_target,
};
pub use params::{EncodeParams, Quality};
pub use rust_backend::RustBackend;
