use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecognizerError {
    #[error("model unavailable")]
    ModelUnavailable,

    #[error("invalid input image")]
    InvalidInput,

    #[error("image processing error")]
    Conversion,

    #[error("{0}")]
    Inference(String),

    #[error("no results")]
    NoResults,
}

impl RecognizerError {
    /// Short text shown in place of a result.
    pub fn status(&self) -> &'static str {
        match self {
            RecognizerError::ModelUnavailable => "Error: model unavailable",
            RecognizerError::InvalidInput => "Error: invalid image",
            RecognizerError::Conversion => "Error: could not process image",
            RecognizerError::Inference(_) => "Error: classification failed",
            RecognizerError::NoResults => "Error: no results",
        }
    }
}
