// Application state
// Cheap-to-clone bundle of the services the HTTP handlers need

use std::sync::Arc;

use crate::ai::DesignModel;
use crate::config::Config;
use crate::storage::ImageStore;
use crate::tasks::{GenerationPipeline, TaskStore};

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration
    pub config: Arc<Config>,
    /// Planning / rendering / transcription backend
    pub model: Arc<dyn DesignModel>,
    /// Generated images
    pub images: ImageStore,
    /// Background generation runner
    pub pipeline: GenerationPipeline,
}

impl AppState {
    /// Wire the pipeline to `model` and `images` using the limits in `config`
    pub fn new(config: Config, model: Arc<dyn DesignModel>, images: ImageStore) -> Self {
        let pipeline = GenerationPipeline::new(
            model.clone(),
            TaskStore::new(),
            images.clone(),
            config.retry,
            config.ai.image_size.clone(),
            config.storage.max_image_count,
        );

        Self {
            config: Arc::new(config),
            model,
            images,
            pipeline,
        }
    }

    /// Task registry the pipeline reports to
    pub fn tasks(&self) -> &TaskStore {
        self.pipeline.tasks()
    }
}
