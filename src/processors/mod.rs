// toonstage/src/processors/mod.rs
mod codec;
mod pipeline;
mod scaling;
mod worker;

pub use codec::{Encoder, Loader};
pub use pipeline::{IdentityPipeline, StylePipeline, TransformPipeline};
pub use scaling::{fit_image, fit_to_box};
pub use worker::{PipelineWorker, TransformJob, TransformOutcome};

pub mod prelude {
    pub use super::{Encoder, Loader, PipelineWorker, StylePipeline, TransformPipeline};
}
