use thiserror::Error;

/// Why the pipeline stopped, split by the stage that failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("load failure: {0:#}")]
    Load(anyhow::Error),

    #[error("compute failure: {0:#}")]
    Compute(anyhow::Error),

    #[error("render failure: {0:#}")]
    Render(anyhow::Error),
}
