//! Poster export: sizing and rasterization.
//!
//! | Step | Function |
//! |---|---|
//! | **Size** | [`calculate_target_resolution`]: long edge kept, short edge from the aspect ratio |
//! | **Render** | [`Rasterizer`] trait, [`CanvasRasterizer`] layout proofs |
//! | **Batch** | [`export_batch`]: presets rendered in parallel with rayon |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Presets**: Stock named resolutions
//! - **Backend**: [`Rasterizer`] trait + [`RasterError`]
//! - **Canvas**: [`CanvasRasterizer`], the built-in PNG backend
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod canvas;
pub mod operations;
mod presets;

pub use backend::{RasterError, Rasterizer};
pub use calculations::{
    PixelRect, aspect_ratio_value, calculate_band_height, calculate_map_area,
    calculate_target_resolution,
};
pub use canvas::CanvasRasterizer;
pub use operations::{
    ExportError, ExportedPoster, PlannedExport, export_batch, export_poster, plan_export,
    write_export,
};
pub use presets::{DEFAULT_PRESET, stock_presets};
