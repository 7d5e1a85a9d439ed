// toonstage/src/core/mod.rs
pub mod orchestrator;

pub use orchestrator::{Orchestrator, HIDE_DELAY, PROGRESS_CEILING, PROGRESS_INTERVAL};

use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Anime,
    ComicBook,
    PixarLike,
    Watercolor,
}

impl StyleKind {
    pub const ALL: [StyleKind; 4] = [
        StyleKind::Anime,
        StyleKind::ComicBook,
        StyleKind::PixarLike,
        StyleKind::Watercolor,
    ];

    /// Label shown in the style selector.
    pub fn label(&self) -> &'static str {
        match self {
            StyleKind::Anime => "Anime",
            StyleKind::ComicBook => "Comic Book",
            StyleKind::PixarLike => "Pixar-like",
            StyleKind::Watercolor => "Watercolor",
        }
    }
}

impl std::fmt::Display for StyleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of the user-adjustable settings taken when a run starts.
/// Intensity fields are percentages in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSet {
    pub style: StyleKind,
    pub detail: u8,
    pub color_intensity: u8,
    pub edge_strength: u8,
}

impl ParameterSet {
    pub fn new(style: StyleKind, detail: u8, color_intensity: u8, edge_strength: u8) -> Self {
        debug_assert!(
            detail <= 100 && color_intensity <= 100 && edge_strength <= 100,
            "intensity values must be in 0..=100 (got {}, {}, {})",
            detail,
            color_intensity,
            edge_strength
        );
        Self {
            style,
            detail: detail.min(100),
            color_intensity: color_intensity.min(100),
            edge_strength: edge_strength.min(100),
        }
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            style: StyleKind::Anime,
            detail: 50,
            color_intensity: 50,
            edge_strength: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loaded,
    Running,
    Succeeded,
    Failed,
}

/// Classification used for user-visible error notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    Encode,
    Pipeline,
}

#[derive(Error, Debug)]
pub enum CartoonError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("pipeline error: {0}")]
    Pipeline(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("processing is already in progress")]
    Busy,
}

pub type Result<T> = std::result::Result<T, CartoonError>;

/// Notifications consumed by the presentation adapter.
#[derive(Debug, Clone)]
pub enum Event {
    PhaseChanged(Phase),
    Progress(u8),
    ResultReady(Arc<image::RgbImage>),
    Error { kind: ErrorKind, message: String },
}
