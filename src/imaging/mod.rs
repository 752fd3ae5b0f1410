//! Image processing — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **EXIF capture metadata** | `kamadak-exif` via [`crate::exif`] |
//! | **Resize → WebP** | Lanczos3 + `webp` lossy encoder |
//! | **EXIF preservation** | RIFF container rewrite ([`webp_meta`]) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;
pub(crate) mod webp_meta;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{fit_within_box, scale_to_max_width};
pub use operations::{
    MirrorOpts, MirroredOutput, RenditionConfig, RenditionSet, create_renditions, get_dimensions,
    mirror_image,
};
pub use params::{Quality, ResizeParams};
pub use rust_backend::RustBackend;
