//! Rasterizer trait and shared error type.
//!
//! A [`Rasterizer`] turns a poster plus an exact pixel target into encoded
//! image bytes. The live map renderer used by the editor sits behind this
//! trait as an external collaborator; the crate ships
//! [`CanvasRasterizer`](super::canvas::CanvasRasterizer), which renders a
//! layout proof without map tiles.

use crate::poster::{ExportResolution, PosterConfig};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("Invalid colour '{0}'")]
    InvalidColor(String),
    #[error("Raster target {width}x{height} is empty")]
    EmptyTarget { width: u32, height: u32 },
    #[error("Encoding failed: {0}")]
    Encoding(String),
    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Trait for poster rasterization backends.
///
/// `resolution` is already the final pixel size (see
/// [`calculate_target_resolution`](super::calculate_target_resolution));
/// implementors must produce exactly that many pixels.
pub trait Rasterizer: Sync {
    /// Render the poster and return encoded image bytes (PNG).
    fn render(
        &self,
        poster: &PosterConfig,
        resolution: &ExportResolution,
    ) -> Result<Vec<u8>, RasterError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock rasterizer that records render calls without producing pixels.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockRasterizer {
        pub renders: Mutex<Vec<RecordedRender>>,
        /// Resolution names for which `render` fails.
        pub fail_on: Vec<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRender {
        pub location: String,
        pub palette: String,
        pub width: u32,
        pub height: u32,
        pub dpi: u32,
        pub name: String,
    }

    impl MockRasterizer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_on(names: &[&str]) -> Self {
            Self {
                renders: Mutex::new(Vec::new()),
                fail_on: names.iter().map(|n| n.to_string()).collect(),
            }
        }

        pub fn get_renders(&self) -> Vec<RecordedRender> {
            self.renders.lock().unwrap().clone()
        }
    }

    impl Rasterizer for MockRasterizer {
        fn render(
            &self,
            poster: &PosterConfig,
            resolution: &ExportResolution,
        ) -> Result<Vec<u8>, RasterError> {
            self.renders.lock().unwrap().push(RecordedRender {
                location: poster.location.name.clone(),
                palette: poster.palette.id.clone(),
                width: resolution.width,
                height: resolution.height,
                dpi: resolution.dpi,
                name: resolution.name.clone(),
            });

            if self.fail_on.contains(&resolution.name) {
                return Err(RasterError::RenderFailed(format!(
                    "mock failure for {}",
                    resolution.name
                )));
            }
            // Width and height as bytes so callers can tell renders apart
            let mut bytes = resolution.width.to_be_bytes().to_vec();
            bytes.extend_from_slice(&resolution.height.to_be_bytes());
            Ok(bytes)
        }
    }

    #[test]
    fn mock_records_render() {
        let rasterizer = MockRasterizer::new();
        let poster = PosterConfig::default();
        let res = ExportResolution::new(800, 1200, 72, "Preview");

        let bytes = rasterizer.render(&poster, &res).unwrap();
        assert_eq!(bytes.len(), 8);

        let renders = rasterizer.get_renders();
        assert_eq!(renders.len(), 1);
        assert!(matches!(
            &renders[0],
            RecordedRender {
                width: 800,
                height: 1200,
                dpi: 72,
                ..
            }
        ));
    }

    #[test]
    fn mock_fails_on_request() {
        let rasterizer = MockRasterizer::failing_on(&["Large Print"]);
        let poster = PosterConfig::default();
        let res = ExportResolution::new(7200, 10800, 300, "Large Print");

        let err = rasterizer.render(&poster, &res).unwrap_err();
        assert!(matches!(err, RasterError::RenderFailed(_)));
        assert_eq!(rasterizer.get_renders().len(), 1);
    }
}
