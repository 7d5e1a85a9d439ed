// toonstage/src/processors/scaling.rs
use crate::utils::calculate_aspect_ratio;
use image::{imageops, imageops::FilterType, RgbImage};

/// Computes display dimensions that fit `source` inside the given box while
/// preserving aspect ratio. Never upscales: an image that already fits keeps
/// its own dimensions. A degenerate box or source yields (0, 0).
pub fn fit_to_box(
    source_width: u32,
    source_height: u32,
    box_width: u32,
    box_height: u32,
) -> (u32, u32) {
    if source_width == 0 || source_height == 0 || box_width == 0 || box_height == 0 {
        return (0, 0);
    }

    let aspect = calculate_aspect_ratio(source_width, source_height);

    if source_width > source_height {
        // Landscape: fit the width first, re-derive if the box is too short.
        let mut target_w = box_width.min(source_width);
        let mut target_h = ((target_w as f32 / aspect).round() as u32).max(1);
        if target_h > box_height {
            target_h = box_height;
            target_w = ((target_h as f32 * aspect).round() as u32).max(1);
        }
        (target_w, target_h)
    } else {
        // Portrait or square: fit the height first, re-derive if too narrow.
        let mut target_h = box_height.min(source_height);
        let mut target_w = ((target_h as f32 * aspect).round() as u32).max(1);
        if target_w > box_width {
            target_w = box_width;
            target_h = ((target_w as f32 / aspect).round() as u32).max(1);
        }
        (target_w, target_h)
    }
}

/// Produces a new image resampled to fit the box. The source is left
/// untouched; callers keep the full-resolution image for later runs.
pub fn fit_image(source: &RgbImage, box_width: u32, box_height: u32) -> RgbImage {
    let (target_w, target_h) = fit_to_box(source.width(), source.height(), box_width, box_height);

    if target_w == 0 || target_h == 0 {
        return RgbImage::new(0, 0);
    }

    if target_w == source.width() && target_h == source.height() {
        log::debug!("preview dimensions unchanged, skipping resample");
        return source.clone();
    }

    log::debug!(
        "resampling preview from {}x{} to {}x{}",
        source.width(),
        source.height(),
        target_w,
        target_h
    );

    imageops::resize(source, target_w, target_h, FilterType::Lanczos3)
}
