//! High-level export operations.
//!
//! These functions combine the resolution calculator with a rasterizer.
//! They take a poster and named presets, compute the final pixel targets,
//! and hand them to the backend.

use super::backend::{RasterError, Rasterizer};
use super::calculations::calculate_target_resolution;
use crate::naming::export_file_name;
use crate::poster::{ExportResolution, PosterConfig};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Rasterization failed for preset '{preset}': {source}")]
    Raster {
        preset: String,
        #[source]
        source: RasterError,
    },
    #[error("Unknown export preset '{0}'")]
    UnknownPreset(String),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// An export sized for a poster but not yet rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedExport {
    pub preset: String,
    /// Nominal preset resolution.
    pub base: ExportResolution,
    /// Pixel size after applying the poster's aspect ratio and orientation.
    pub target: ExportResolution,
}

/// A rendered poster.
#[derive(Debug, Clone)]
pub struct ExportedPoster {
    pub preset: String,
    pub resolution: ExportResolution,
    pub bytes: Vec<u8>,
}

/// Plan an export without rendering it.
pub fn plan_export(poster: &PosterConfig, preset: &str, base: &ExportResolution) -> PlannedExport {
    PlannedExport {
        preset: preset.to_string(),
        base: base.clone(),
        target: calculate_target_resolution(
            base,
            &poster.format.aspect_ratio,
            poster.format.orientation,
        ),
    }
}

/// Render one poster at one preset.
pub fn export_poster(
    rasterizer: &impl Rasterizer,
    poster: &PosterConfig,
    preset: &str,
    base: &ExportResolution,
) -> Result<ExportedPoster> {
    let plan = plan_export(poster, preset, base);
    let bytes = rasterizer
        .render(poster, &plan.target)
        .map_err(|source| ExportError::Raster {
            preset: plan.preset.clone(),
            source,
        })?;

    info!(
        preset = %plan.preset,
        width = plan.target.width,
        height = plan.target.height,
        dpi = plan.target.dpi,
        bytes = bytes.len(),
        "rendered poster"
    );

    Ok(ExportedPoster {
        preset: plan.preset,
        resolution: plan.target,
        bytes,
    })
}

/// Render one poster at several presets in parallel.
///
/// Returns one result per preset, in input order. A failing preset does not
/// stop the others.
pub fn export_batch(
    rasterizer: &impl Rasterizer,
    poster: &PosterConfig,
    presets: &[(String, ExportResolution)],
) -> Vec<Result<ExportedPoster>> {
    presets
        .par_iter()
        .map(|(preset, base)| {
            let result = export_poster(rasterizer, poster, preset, base);
            if let Err(e) = &result {
                warn!(preset = %preset, error = %e, "export failed");
            }
            result
        })
        .collect()
}

/// Write a rendered poster into `output_dir` and return the file path.
pub fn write_export(
    output_dir: &Path,
    poster: &PosterConfig,
    exported: &ExportedPoster,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(export_file_name(&poster.location.name, &exported.preset));
    std::fs::write(&path, &exported.bytes)?;
    Ok(path)
}
