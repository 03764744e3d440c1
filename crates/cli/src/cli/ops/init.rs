use clap::Args;

use crate::state::AppState;

/// Write a default config file
#[derive(Args, Debug, Clone)]
pub struct Init;

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
}

impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::init(ctx.config_path.clone())?;

        Ok(format!(
            "Initialized boxkey directory at: {}\n\
             - Config: {}",
            state.config_dir.display(),
            state.config_path.display(),
        ))
    }
}
