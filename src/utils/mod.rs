// toonstage/src/utils/mod.rs
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub fn calculate_aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        0.0
    } else {
        width as f32 / height as f32
    }
}

pub fn is_supported_input(path: &Path) -> bool {
    let extensions = ["png", "jpg", "jpeg", "bmp", "webp"];

    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn image_format_to_string(format: image::ImageFormat) -> String {
    match format {
        image::ImageFormat::Jpeg => "JPEG",
        image::ImageFormat::Png => "PNG",
        image::ImageFormat::WebP => "WebP",
        image::ImageFormat::Bmp => "BMP",
        _ => "Unknown",
    }
    .to_string()
}

/// Picks a save path for the exported cartoon. With no explicit output the
/// name follows the source with a "cartoonized" suffix, avoiding collisions
/// with existing files.
pub fn generate_output_path(input_path: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => {
            let stem = input_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("cartoonized_image");

            let timestamp = SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);

            let mut candidate =
                input_path.with_file_name(format!("{}_cartoonized_{}.png", stem, timestamp));
            let mut counter = 1;

            while candidate.exists() {
                candidate = input_path
                    .with_file_name(format!("{}_cartoonized_{}_{}.png", stem, timestamp, counter));
                counter += 1;
            }

            candidate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_handles_zero_height() {
        assert_eq!(calculate_aspect_ratio(100, 0), 0.0);
        assert_eq!(calculate_aspect_ratio(300, 200), 1.5);
    }

    #[test]
    fn supported_inputs_match_the_file_dialog_filter() {
        assert!(is_supported_input(Path::new("photo.PNG")));
        assert!(is_supported_input(Path::new("photo.jpeg")));
        assert!(is_supported_input(Path::new("photo.webp")));
        assert!(!is_supported_input(Path::new("photo.tiff")));
        assert!(!is_supported_input(Path::new("photo")));
    }

    #[test]
    fn explicit_output_path_wins() {
        let out = generate_output_path(Path::new("in.png"), Some(Path::new("out.jpg")));
        assert_eq!(out, PathBuf::from("out.jpg"));
    }

    #[test]
    fn generated_name_carries_the_cartoonized_suffix() {
        let out = generate_output_path(Path::new("/tmp/does_not_exist/holiday.jpg"), None);
        let name = out.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("holiday_cartoonized_"));
        assert!(name.ends_with(".png"));
    }
}
