//! Generation pipeline
//!
//! Two stages per task:
//! 1. Planning: one chat call turns the feedback and current state into an
//!    evolved state plus a list of image prompts.
//! 2. Rendering: every planned prompt is rendered concurrently. The join is
//!    all-or-nothing: if any render fails after its retries the whole task
//!    fails, while a render that simply produced no image is skipped.
//!
//! Progress is written to the [`TaskStore`] as the run advances.

use chrono::Local;
use futures_util::future::try_join_all;
use std::sync::Arc;
use thiserror::Error;

use super::store::{TaskId, TaskStatus, TaskStore};
use crate::ai::{retry_with_backoff, AiError, DesignModel, RetryPolicy};
use crate::design::{DesignState, Environment, GeneratedImage, PlanItem};
use crate::prompts::{build_image_prompt, build_planning_prompt, describe_uploads, ImagePromptInput};
use crate::storage::{ImageStore, StorageError};

/// Errors that abort a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Planning or rendering call failed
    #[error(transparent)]
    Ai(#[from] AiError),

    /// Rendered image could not be stored
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Input of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// User feedback (typed or transcribed)
    pub feedback: String,
    /// Current design state from the client
    pub state: DesignState,
    /// Base64-encoded reference, environment and sketch images
    pub images: Vec<String>,
    /// Location description for Earth renders
    pub earth_location: Option<String>,
    /// Location description for Mars renders
    pub mars_location: Option<String>,
}

impl GenerationRequest {
    fn location_for(&self, environment: Environment) -> Option<&str> {
        match environment {
            Environment::Earth => self.earth_location.as_deref(),
            Environment::Mars => self.mars_location.as_deref(),
        }
    }
}

/// Runs generation tasks in the background
#[derive(Clone)]
pub struct GenerationPipeline {
    model: Arc<dyn DesignModel>,
    tasks: TaskStore,
    images: ImageStore,
    retry: RetryPolicy,
    image_size: String,
    max_image_count: usize,
}

impl GenerationPipeline {
    /// Create a pipeline
    ///
    /// # Arguments
    /// * `model` - Planning / rendering backend
    /// * `tasks` - Registry progress is written to
    /// * `images` - Where rendered images are saved
    /// * `retry` - Backoff policy for every remote call
    /// * `image_size` - Size requested from the image model
    /// * `max_image_count` - Cap enforced on `images` after each run
    pub fn new(
        model: Arc<dyn DesignModel>,
        tasks: TaskStore,
        images: ImageStore,
        retry: RetryPolicy,
        image_size: impl Into<String>,
        max_image_count: usize,
    ) -> Self {
        Self {
            model,
            tasks,
            images,
            retry,
            image_size: image_size.into(),
            max_image_count,
        }
    }

    /// Task registry this pipeline reports to
    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    /// Register a task and start it in the background
    ///
    /// Returns as soon as the task is registered; poll the [`TaskStore`]
    /// for progress.
    pub async fn submit(&self, request: GenerationRequest) -> TaskId {
        let task_id = self.tasks.create(&request.state).await;

        tracing::info!(
            task_id = %task_id,
            round = request.state.round(),
            image_count = request.images.len(),
            feedback_len = request.feedback.len(),
            "Generation task submitted"
        );

        let pipeline = self.clone();
        let id = task_id.clone();
        tokio::spawn(async move {
            pipeline.run(&id, request).await;
        });

        task_id
    }

    /// Run a task to completion, recording the outcome
    pub async fn run(&self, task_id: &str, request: GenerationRequest) {
        match self.execute(task_id, request).await {
            Ok(()) => {
                tracing::info!(task_id = %task_id, "Generation task completed");
                self.enforce_image_cap().await;
            }
            Err(e) => {
                tracing::error!(task_id = %task_id, error = %e, "Generation task failed");
                self.tasks
                    .update(task_id, |record| {
                        record.status = TaskStatus::Failed;
                        record.error = Some(e.to_string());
                    })
                    .await;
            }
        }
    }

    async fn execute(&self, task_id: &str, request: GenerationRequest) -> Result<(), PipelineError> {
        self.tasks.set_status(task_id, TaskStatus::Analyzing).await;

        let images_description = describe_uploads(request.images.len());
        let planning_prompt = build_planning_prompt(
            &request.feedback,
            &request.state,
            images_description.as_deref(),
        );

        self.tasks.set_status(task_id, TaskStatus::Evolving).await;
        let plan = retry_with_backoff(&self.retry, "generate_plan", || {
            self.model.generate_plan(&planning_prompt, &request.images)
        })
        .await?;

        let round = plan.round();
        let livin_dna = plan.updated_state.livin_dna();
        tracing::debug!(
            task_id = %task_id,
            round = round,
            planned_images = plan.plan.len(),
            dna_keywords = livin_dna.len(),
            "Plan received"
        );

        let updated_state = plan.updated_state.clone();
        self.tasks
            .update(task_id, |record| {
                record.status = TaskStatus::Rendering;
                record.updated_state = updated_state;
                record.round = round;
            })
            .await;

        let renders = plan
            .plan
            .iter()
            .enumerate()
            .map(|(index, item)| self.render(task_id, index, item, round, &livin_dna, &request));
        let results = try_join_all(renders).await?;

        let (earth_images, mars_images): (Vec<GeneratedImage>, Vec<GeneratedImage>) = results
            .into_iter()
            .flatten()
            .partition(|image| image.environment == Environment::Earth);

        self.tasks
            .update(task_id, |record| {
                record.earth_images = earth_images;
                record.mars_images = mars_images;
                record.status = TaskStatus::Completed;
            })
            .await;

        Ok(())
    }

    async fn render(
        &self,
        task_id: &str,
        index: usize,
        item: &PlanItem,
        round: u32,
        livin_dna: &[String],
        request: &GenerationRequest,
    ) -> Result<Option<GeneratedImage>, PipelineError> {
        let prompt = build_image_prompt(&ImagePromptInput {
            design_prompt: &item.prompt,
            environment: item.environment,
            view: item.view,
            round,
            livin_dna,
            location: request.location_for(item.environment),
        });

        let bytes = retry_with_backoff(&self.retry, "generate_image", || {
            self.model.generate_image(&prompt, &self.image_size)
        })
        .await?;

        let Some(bytes) = bytes else {
            tracing::warn!(task_id = %task_id, image = %item.name, "Image generation failed, skipping");
            return Ok(None);
        };

        let filename = ImageStore::image_filename(task_id, index, Local::now());
        self.images.save(&filename, &bytes).await?;

        Ok(Some(GeneratedImage::from_item(item, &filename)))
    }

    async fn enforce_image_cap(&self) {
        if let Err(e) = self.images.cleanup(self.max_image_count).await {
            tracing::warn!(error = %e, "Image cleanup failed");
        }
    }
}
