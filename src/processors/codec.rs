// toonstage/src/processors/codec.rs
use crate::core::{CartoonError, Result};
use crate::utils::{image_format_to_string, is_supported_input};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, ImageReader, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

#[derive(Clone)]
pub struct Loader {
    max_dimensions: (u32, u32),
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: (100_000, 100_000),
        }
    }

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = (width, height);
        self
    }

    /// Decodes the file into a 3-channel image. Every failure mode maps to
    /// a decode error so the caller has a single notification path.
    pub fn load(&self, path: &Path) -> Result<RgbImage> {
        log::debug!("loading image from: {}", path.display());

        if !is_supported_input(path) {
            return Err(CartoonError::Decode(format!(
                "unsupported file type: {}",
                path.display()
            )));
        }

        let reader = ImageReader::open(path)
            .map_err(|e| CartoonError::Decode(format!("cannot open {}: {}", path.display(), e)))?
            .with_guessed_format()
            .map_err(|e| CartoonError::Decode(format!("cannot probe {}: {}", path.display(), e)))?;

        let format = reader.format().map(image_format_to_string);

        let image = reader
            .decode()
            .map_err(|e| CartoonError::Decode(format!("failed to decode image: {}", e)))?;

        let (max_w, max_h) = self.max_dimensions;
        if image.width() > max_w || image.height() > max_h {
            return Err(CartoonError::Decode(format!(
                "image dimensions {}x{} exceed maximum {}x{}",
                image.width(),
                image.height(),
                max_w,
                max_h
            )));
        }

        let rgb = image.to_rgb8();
        log::info!(
            "loaded image: {}x{} pixels, format: {}",
            rgb.width(),
            rgb.height(),
            format.as_deref().unwrap_or("unknown")
        );

        Ok(rgb)
    }

    pub fn load_from_bytes(&self, data: &[u8]) -> Result<RgbImage> {
        let image = image::load_from_memory(data)
            .map_err(|e| CartoonError::Decode(format!("failed to decode image bytes: {}", e)))?;
        Ok(image.to_rgb8())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Encoder {
    quality: u8,
    optimize_png: bool,
}

impl Encoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            optimize_png: true,
        }
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    /// Writes the image with a format inferred from the file extension.
    /// Only PNG and JPEG exports are supported.
    pub fn save(&self, image: &RgbImage, path: &Path) -> Result<()> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => self.save_png(image, path),
            Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => {
                self.save_jpeg(image, path)
            }
            _ => Err(CartoonError::Encode(format!(
                "unsupported export format: {}",
                path.display()
            ))),
        }
    }

    fn save_jpeg(&self, image: &RgbImage, path: &Path) -> Result<()> {
        log::debug!(
            "saving JPEG to {} at quality {}",
            path.display(),
            self.quality
        );

        let file = File::create(path)
            .map_err(|e| CartoonError::Encode(format!("cannot create {}: {}", path.display(), e)))?;
        let writer = BufWriter::new(file);

        let encoder = JpegEncoder::new_with_quality(writer, self.quality);
        image
            .write_with_encoder(encoder)
            .map_err(|e| CartoonError::Encode(format!("JPEG encode failed: {}", e)))?;

        self.log_save_result(path)
    }

    fn save_png(&self, image: &RgbImage, path: &Path) -> Result<()> {
        log::debug!("saving PNG to {}", path.display());

        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| CartoonError::Encode(format!("PNG encode failed: {}", e)))?;

        let data = if self.optimize_png {
            oxipng::optimize_from_memory(&buffer.into_inner(), &oxipng::Options::default())
                .map_err(|e| CartoonError::Encode(format!("PNG optimization failed: {}", e)))?
        } else {
            buffer.into_inner()
        };

        std::fs::write(path, data)
            .map_err(|e| CartoonError::Encode(format!("cannot write {}: {}", path.display(), e)))?;

        self.log_save_result(path)
    }

    fn log_save_result(&self, path: &Path) -> Result<()> {
        let file_size = std::fs::metadata(path)
            .map_err(|e| CartoonError::Encode(format!("cannot stat {}: {}", path.display(), e)))?
            .len();
        log::info!("saved image: {} ({} bytes)", path.display(), file_size);
        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(90)
    }
}
