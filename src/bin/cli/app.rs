use std::path::Path;

use anyhow::{Context, Result};

use study_buddy::ai::{OpenAiModerator, OpenAiProvider};
use study_buddy::config::Config;
use study_buddy::rag::{OpenAiEmbedder, VectorIndex};
use study_buddy::StudyBuddy;

/// Shared application state for CLI commands
pub struct App {
    pub buddy: StudyBuddy,
}

impl App {
    /// Load configuration, open the index and wire up the providers.
    pub fn new(index_override: Option<&Path>) -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;

        let index_path = config
            .resolved_index_path(index_override)
            .context("Could not determine an index location")?;
        let index = VectorIndex::open(&index_path)
            .with_context(|| format!("Failed to open index at {}", index_path.display()))?;

        let buddy = StudyBuddy::new(
            Box::new(OpenAiProvider::new(config.ai.clone())),
            Box::new(OpenAiEmbedder::new(config.ai.clone())),
            Box::new(OpenAiModerator::new(config.ai.clone())),
            index,
            config.top_k,
        )
        .context("Failed to initialize the study buddy")?;

        Ok(Self { buddy })
    }
}
