// toonstage/src/processors/pipeline.rs
use crate::core::{ParameterSet, Result, StyleKind};
use image::RgbImage;

/// Seam between the orchestrator and whatever stylization algorithm is
/// plugged in. Implementations must never mutate the source, must return an
/// image with identical dimensions, and must be callable off the interactive
/// thread.
pub trait TransformPipeline: Send + Sync {
    fn transform(&self, source: &RgbImage, params: &ParameterSet) -> Result<RgbImage>;
}

/// Reference implementation: duplicates the source unchanged.
pub struct IdentityPipeline;

impl TransformPipeline for IdentityPipeline {
    fn transform(&self, source: &RgbImage, _params: &ParameterSet) -> Result<RgbImage> {
        Ok(source.clone())
    }
}

/// Default pipeline: dispatches to one strategy per style. Adding a style
/// means adding a `Stylizer` and a match arm, not editing existing ones.
pub struct StylePipeline;

impl TransformPipeline for StylePipeline {
    fn transform(&self, source: &RgbImage, params: &ParameterSet) -> Result<RgbImage> {
        log::debug!(
            "stylizing {}x{} with {} (detail {}, color {}, edge {})",
            source.width(),
            source.height(),
            params.style,
            params.detail,
            params.color_intensity,
            params.edge_strength
        );

        let result = stylizer_for(params.style).stylize(source, params)?;
        debug_assert_eq!(result.dimensions(), source.dimensions());
        Ok(result)
    }
}

trait Stylizer: Send + Sync {
    fn stylize(&self, source: &RgbImage, params: &ParameterSet) -> Result<RgbImage>;
}

fn stylizer_for(style: StyleKind) -> &'static dyn Stylizer {
    match style {
        StyleKind::Anime => &AnimeStyle,
        StyleKind::ComicBook => &ComicBookStyle,
        StyleKind::PixarLike => &PixarStyle,
        StyleKind::Watercolor => &WatercolorStyle,
    }
}

// TODO: replace the identity copies below with the real per-style filters
// (edge pass + color quantization) once the cartoonization math is settled.

struct AnimeStyle;

impl Stylizer for AnimeStyle {
    fn stylize(&self, source: &RgbImage, _params: &ParameterSet) -> Result<RgbImage> {
        Ok(source.clone())
    }
}

struct ComicBookStyle;

impl Stylizer for ComicBookStyle {
    fn stylize(&self, source: &RgbImage, _params: &ParameterSet) -> Result<RgbImage> {
        Ok(source.clone())
    }
}

struct PixarStyle;

impl Stylizer for PixarStyle {
    fn stylize(&self, source: &RgbImage, _params: &ParameterSet) -> Result<RgbImage> {
        Ok(source.clone())
    }
}

struct WatercolorStyle;

impl Stylizer for WatercolorStyle {
    fn stylize(&self, source: &RgbImage, _params: &ParameterSet) -> Result<RgbImage> {
        Ok(source.clone())
    }
}
