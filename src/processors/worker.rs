// toonstage/src/processors/worker.rs
use crate::core::{ParameterSet, Result};
use crate::processors::TransformPipeline;
use image::RgbImage;
use std::sync::{mpsc, Arc};
use std::thread;

/// A transform request tagged with the session that issued it. The tag lets
/// the orchestrator discard a result that outlived its session.
pub struct TransformJob {
    pub session: u64,
    pub source: Arc<RgbImage>,
    pub params: ParameterSet,
}

pub struct TransformOutcome {
    pub session: u64,
    pub result: Result<RgbImage>,
}

/// Dedicated worker thread running the transform pipeline so the interactive
/// thread never blocks on a run. Jobs go in over one channel, outcomes come
/// back over another and are collected with a non-blocking poll.
pub struct PipelineWorker {
    submit_tx: mpsc::Sender<TransformJob>,
    result_rx: mpsc::Receiver<TransformOutcome>,
}

impl PipelineWorker {
    pub fn spawn(pipeline: Arc<dyn TransformPipeline>) -> Self {
        let (submit_tx, submit_rx) = mpsc::channel::<TransformJob>();
        let (result_tx, result_rx) = mpsc::channel::<TransformOutcome>();

        thread::spawn(move || {
            while let Ok(job) = submit_rx.recv() {
                log::debug!("worker picked up session {}", job.session);
                let result = pipeline.transform(&job.source, &job.params);
                let outcome = TransformOutcome {
                    session: job.session,
                    result,
                };
                if result_tx.send(outcome).is_err() {
                    // Orchestrator dropped; nothing left to report to.
                    return;
                }
            }
            log::debug!("pipeline worker shutting down");
        });

        Self {
            submit_tx,
            result_rx,
        }
    }

    pub fn submit(&self, job: TransformJob) -> Result<()> {
        self.submit_tx.send(job).map_err(|e| {
            crate::core::CartoonError::Pipeline(format!("failed to enqueue transform job: {}", e))
        })
    }

    /// Drains every outcome that has arrived so far without blocking.
    pub fn try_collect(&self) -> Vec<TransformOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.result_rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StyleKind;
    use crate::processors::StylePipeline;
    use std::time::{Duration, Instant};

    fn collect_with_timeout(worker: &PipelineWorker, count: usize) -> Vec<TransformOutcome> {
        let deadline = Instant::now() + Duration::from_secs(2);
        let mut outcomes = Vec::new();
        while outcomes.len() < count && Instant::now() < deadline {
            outcomes.extend(worker.try_collect());
            thread::sleep(Duration::from_millis(2));
        }
        outcomes
    }

    #[test]
    fn outcomes_carry_their_session_tag() {
        let worker = PipelineWorker::spawn(Arc::new(StylePipeline));
        let source = Arc::new(RgbImage::from_pixel(8, 8, image::Rgb([9, 9, 9])));

        for session in [1u64, 2, 3] {
            worker
                .submit(TransformJob {
                    session,
                    source: Arc::clone(&source),
                    params: ParameterSet::new(StyleKind::ComicBook, 10, 20, 30),
                })
                .unwrap();
        }

        let outcomes = collect_with_timeout(&worker, 3);
        let sessions: Vec<u64> = outcomes.iter().map(|o| o.session).collect();
        assert_eq!(sessions, [1, 2, 3]);
        assert!(outcomes.iter().all(|o| o.result.is_ok()));
    }

    #[test]
    fn try_collect_is_empty_when_nothing_ran() {
        let worker = PipelineWorker::spawn(Arc::new(StylePipeline));
        assert!(worker.try_collect().is_empty());
    }
}
