use std::path::PathBuf;

use clap::Args;

use common::ls::DEFAULT_CONCURRENCY;

use crate::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Block store directory (default: <ufs dir>/blocks)
    #[arg(long)]
    pub blocks: Option<PathBuf>,

    /// Arguments, and children per directory, fetched at once while listing
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Log level written to the config file
    #[arg(long, default_value = "warn")]
    pub default_log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            blocks_path: self.blocks.clone(),
            concurrency: self.concurrency,
            log_level: self.default_log_level.clone(),
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let output = format!(
            "Initialized ufs directory at: {}\n\
             - Blocks: {}\n\
             - Config: {}\n\
             - Concurrency: {}\n\
             - Log level: {}",
            state.ufs_dir.display(),
            state.blocks_path.display(),
            state.config_path.display(),
            state.config.concurrency,
            state.config.log_level,
        );

        Ok(output)
    }
}
