use crate::composition::model::Composition;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{KeylineError, KeylineResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One render request, in the wire shape render endpoints expect.
pub struct RenderJob {
    /// Id of the composition to render.
    pub composition_id: String,
    /// Total frame count.
    pub duration_in_frames: FrameIndex,
    /// Frame rate.
    pub fps: Fps,
}

impl RenderJob {
    /// The job that renders `comp` in full.
    pub fn for_composition(comp: &Composition) -> Self {
        Self {
            composition_id: comp.id.clone(),
            duration_in_frames: comp.duration_in_frames,
            fps: comp.fps,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// What a finished render hands back.
pub struct RenderArtifact {
    /// Where the encoded result can be fetched.
    pub download_url: String,
}

/// The collaborator that actually renders a job.
///
/// Implementations block until the job finishes or fails; the queue does the
/// sequencing and nothing else. How a job travels (child process, HTTP,
/// in-process renderer) is entirely the implementation's business.
pub trait RenderDispatcher {
    /// Render one job to completion.
    fn dispatch(&mut self, job: &RenderJob) -> KeylineResult<RenderArtifact>;
}

#[derive(Debug, Default)]
/// Result of draining the queue: artifacts for the jobs that completed, and
/// the error that stopped the run early, if any.
pub struct RenderOutcome {
    /// Artifacts in queue order, one per completed job.
    pub artifacts: Vec<RenderArtifact>,
    /// The failure that aborted the run. `None` when every job completed.
    pub error: Option<KeylineError>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Ordered set of composition ids marked for rendering.
pub struct RenderQueue {
    queued: Vec<String>,
}

impl RenderQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queued ids in queue order.
    pub fn ids(&self) -> &[String] {
        &self.queued
    }

    /// Number of queued compositions.
    pub fn len(&self) -> usize {
        self.queued.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Whether `id` is queued.
    pub fn contains(&self, id: &str) -> bool {
        self.queued.iter().any(|held| held == id)
    }

    /// Add `id` to the back of the queue, or remove it if already queued.
    pub fn toggle(&mut self, id: &str) {
        if self.contains(id) {
            self.queued.retain(|held| held != id);
        } else {
            self.queued.push(id.to_owned());
        }
    }

    #[tracing::instrument(skip(self, project, dispatcher))]
    /// Dispatch every queued composition, strictly in queue order.
    ///
    /// Queued ids that no longer resolve in `project` are skipped. The first
    /// dispatch failure aborts the remainder of the run; artifacts collected
    /// so far are kept and the failure is reported next to them. Completed
    /// jobs are never rolled back.
    pub fn run<D: RenderDispatcher>(
        &self,
        project: &[Composition],
        dispatcher: &mut D,
    ) -> RenderOutcome {
        let mut outcome = RenderOutcome::default();
        for id in &self.queued {
            let Some(comp) = project.iter().find(|comp| comp.id == *id) else {
                tracing::debug!(comp = %id, "skipping queued id not in the project");
                continue;
            };
            let job = RenderJob::for_composition(comp);
            tracing::debug!(comp = %id, frames = job.duration_in_frames.0, "dispatching");
            match dispatcher.dispatch(&job) {
                Ok(artifact) => outcome.artifacts.push(artifact),
                Err(err) => {
                    outcome.error = Some(KeylineError::render(format!("rendering {id}: {err}")));
                    break;
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/render_queue.rs"]
mod tests;
