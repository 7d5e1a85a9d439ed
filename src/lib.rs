mod core;
mod processors;
mod utils;

pub use crate::core::{
    CartoonError, ErrorKind, Event, Orchestrator, ParameterSet, Phase, Result, StyleKind,
    HIDE_DELAY, PROGRESS_CEILING, PROGRESS_INTERVAL,
};
pub use crate::processors::{
    fit_image, fit_to_box, Encoder, IdentityPipeline, Loader, PipelineWorker, StylePipeline,
    TransformJob, TransformOutcome, TransformPipeline,
};
pub use crate::utils::{
    calculate_aspect_ratio, generate_output_path, image_format_to_string, is_supported_input,
};

pub mod prelude {
    pub use crate::{
        fit_to_box, Orchestrator, ParameterSet, Phase, StylePipeline, StyleKind,
        TransformPipeline,
    };
}

// Re-export the pixel buffer type the whole API is built around
pub use image::RgbImage;
