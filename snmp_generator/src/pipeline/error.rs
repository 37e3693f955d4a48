use crate::batch::BatchError;
use crate::generator::GeneratorError;
use crate::request::RequestError;
use crate::tree::TreeError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Tree loading failed: {0}")]
    Tree(#[from] TreeError),

    #[error("Configuration loading failed: {0}")]
    Request(#[from] RequestError),

    #[error("Module generation failed: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Batch generation failed: {0}")]
    Batch(#[from] BatchError),

    #[error("Cannot write output '{path}': {message}")]
    Output { path: String, message: String },
}

impl PipelineError {
    pub fn output(path: &str, message: &str) -> Self {
        Self::Output {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::Tree(error) => error.error_code(),
            Self::Request(error) => error.error_code(),
            Self::Generator(error) => error.error_code(),
            Self::Batch(error) => error.error_code(),
            Self::Output { .. } => crate::logging::codes::system::INTERNAL_ERROR,
        }
    }
}
