// toonstage/src/core/orchestrator.rs
use crate::core::{CartoonError, ErrorKind, Event, ParameterSet, Phase, Result};
use crate::processors::{
    Encoder, Loader, PipelineWorker, StylePipeline, TransformJob, TransformOutcome,
    TransformPipeline,
};
use image::RgbImage;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cadence at which the adapter should call `tick_progress` while a run is
/// active.
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// The asymptotic driver stops here; only completion reaches 100.
pub const PROGRESS_CEILING: u8 = 95;

/// How long the indicator stays visible at 100 after a successful run.
pub const HIDE_DELAY: Duration = Duration::from_millis(300);

/// Sequences load -> configure -> transform -> complete/error and owns the
/// images on either side of the pipeline. Lives on the interactive thread;
/// the transform itself runs on the worker and is collected via `pump`.
pub struct Orchestrator {
    phase: Phase,
    session: u64,
    progress: u8,
    source: Option<Arc<RgbImage>>,
    result: Option<Arc<RgbImage>>,
    hide_deadline: Option<Instant>,
    loader: Loader,
    encoder: Encoder,
    worker: PipelineWorker,
    events: VecDeque<Event>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::with_pipeline(Arc::new(StylePipeline))
    }

    pub fn with_pipeline(pipeline: Arc<dyn TransformPipeline>) -> Self {
        Self {
            phase: Phase::Idle,
            session: 0,
            progress: 0,
            source: None,
            result: None,
            hide_deadline: None,
            loader: Loader::new(),
            encoder: Encoder::default(),
            worker: PipelineWorker::spawn(pipeline),
            events: VecDeque::new(),
        }
    }

    /// Decodes and stages a new source image. Rejected while a run is in
    /// flight; a decode failure leaves the current phase untouched.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        if self.phase == Phase::Running {
            return Err(CartoonError::Busy);
        }

        match self.loader.load(path) {
            Ok(image) => self.load_image(image),
            Err(e) => {
                self.notify_error(ErrorKind::Decode, &e);
                Err(e)
            }
        }
    }

    /// Stages an already-decoded image, e.g. one handed over by a clipboard
    /// or drag-and-drop collaborator.
    pub fn load_image(&mut self, image: RgbImage) -> Result<()> {
        if self.phase == Phase::Running {
            return Err(CartoonError::Busy);
        }

        self.source = Some(Arc::new(image));
        self.progress = 0;
        self.hide_deadline = None;
        self.set_phase(Phase::Loaded);
        Ok(())
    }

    /// Starts a run with a snapshot of the given parameters. Single-flight:
    /// a second start while Running is rejected, not queued. A failed run
    /// requires a fresh load before starting again.
    pub fn start(&mut self, params: ParameterSet) -> Result<()> {
        match self.phase {
            Phase::Running => return Err(CartoonError::Busy),
            Phase::Idle => {
                return Err(CartoonError::InvalidParameter(
                    "no image loaded".to_string(),
                ))
            }
            Phase::Failed => {
                return Err(CartoonError::InvalidParameter(
                    "load an image before retrying a failed run".to_string(),
                ))
            }
            Phase::Loaded | Phase::Succeeded => {}
        }

        let source = match &self.source {
            Some(source) => Arc::clone(source),
            None => {
                return Err(CartoonError::InvalidParameter(
                    "no image loaded".to_string(),
                ))
            }
        };

        // Snapshot with re-clamped values so slider edits mid-run cannot
        // reach the pipeline.
        let snapshot = ParameterSet::new(
            params.style,
            params.detail,
            params.color_intensity,
            params.edge_strength,
        );

        self.session += 1;
        self.progress = 0;
        self.hide_deadline = None;
        self.events.push_back(Event::Progress(0));
        self.set_phase(Phase::Running);

        log::info!("starting session {} with style {}", self.session, snapshot.style);

        if let Err(e) = self.worker.submit(TransformJob {
            session: self.session,
            source,
            params: snapshot,
        }) {
            self.set_phase(Phase::Failed);
            self.notify_error(ErrorKind::Pipeline, &e);
            return Err(e);
        }

        Ok(())
    }

    /// One firing of the repeating progress driver. Returns whether the
    /// adapter should schedule another firing; false the moment the phase
    /// leaves Running or the ceiling is reached.
    pub fn tick_progress(&mut self) -> bool {
        if self.phase != Phase::Running || self.progress >= PROGRESS_CEILING {
            return false;
        }

        let remaining = PROGRESS_CEILING - self.progress;
        let increment = (remaining + 9) / 10;
        self.progress = (self.progress + increment.max(1)).min(PROGRESS_CEILING);
        self.events.push_back(Event::Progress(self.progress));

        self.progress < PROGRESS_CEILING
    }

    /// Collects finished pipeline work on the interactive thread. Call this
    /// from the event loop; it never blocks.
    pub fn pump(&mut self) {
        for outcome in self.worker.try_collect() {
            self.handle_outcome(outcome);
        }
    }

    fn handle_outcome(&mut self, outcome: TransformOutcome) {
        if outcome.session != self.session || self.phase != Phase::Running {
            log::debug!(
                "discarding result from stale session {} (current {}, phase {:?})",
                outcome.session,
                self.session,
                self.phase
            );
            return;
        }

        match outcome.result {
            Ok(image) => {
                let result = Arc::new(image);
                self.result = Some(Arc::clone(&result));
                self.progress = 100;
                self.events.push_back(Event::Progress(100));
                self.set_phase(Phase::Succeeded);
                self.events.push_back(Event::ResultReady(result));
                self.hide_deadline = Some(Instant::now() + HIDE_DELAY);
                log::info!("session {} complete", self.session);
            }
            Err(e) => {
                self.progress = 0;
                self.events.push_back(Event::Progress(0));
                self.hide_deadline = None;
                self.set_phase(Phase::Failed);
                self.notify_error(ErrorKind::Pipeline, &e);
                log::warn!("session {} failed: {}", self.session, e);
            }
        }
    }

    /// Writes the cartoon image to disk. Requires a completed run; the phase
    /// is unchanged whether the write succeeds or fails.
    pub fn export(&mut self, path: &Path) -> Result<()> {
        let result = match &self.result {
            Some(result) => Arc::clone(result),
            None => {
                return Err(CartoonError::InvalidParameter(
                    "no cartoon image to export".to_string(),
                ))
            }
        };

        if let Err(e) = self.encoder.save(&result, path) {
            self.notify_error(ErrorKind::Encode, &e);
            return Err(e);
        }
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn run_enabled(&self) -> bool {
        matches!(self.phase, Phase::Loaded | Phase::Succeeded)
    }

    pub fn export_enabled(&self) -> bool {
        self.result.is_some() && self.phase != Phase::Running
    }

    pub fn progress_visible(&self) -> bool {
        match self.phase {
            Phase::Running => true,
            Phase::Succeeded => self
                .hide_deadline
                .map(|deadline| Instant::now() < deadline)
                .unwrap_or(false),
            _ => false,
        }
    }

    pub fn source_image(&self) -> Option<Arc<RgbImage>> {
        self.source.clone()
    }

    pub fn result_image(&self) -> Option<Arc<RgbImage>> {
        self.result.clone()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::debug!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.events.push_back(Event::PhaseChanged(phase));
        }
    }

    fn notify_error(&mut self, kind: ErrorKind, error: &CartoonError) {
        self.events.push_back(Event::Error {
            kind,
            message: error.to_string(),
        });
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
