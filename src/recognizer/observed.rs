use crate::recognizer::core::{Phase, State};
use crate::recognizer::ranking::format_predictions;

pub const WAITING_TEXT: &str = "Waiting for image...";
pub const ANALYZING_TEXT: &str = "Analyzing image...";

/// The four fields a view renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Observed {
    pub result: String,
    pub predictions: Vec<String>,
    pub is_analyzing: bool,
    pub error_message: Option<String>,
}

impl From<&State> for Observed {
    fn from(state: &State) -> Self {
        match &state.phase {
            Phase::Idle => Observed {
                result: WAITING_TEXT.to_string(),
                ..Observed::default()
            },
            Phase::Analyzing { .. } => Observed {
                result: ANALYZING_TEXT.to_string(),
                is_analyzing: true,
                ..Observed::default()
            },
            Phase::Succeeded { predictions, .. } => Observed {
                result: predictions
                    .first()
                    .map(|best| best.summary())
                    .unwrap_or_default(),
                predictions: format_predictions(predictions),
                ..Observed::default()
            },
            Phase::Failed { error, .. } => Observed {
                result: error.status().to_string(),
                error_message: Some(error.to_string()),
                ..Observed::default()
            },
        }
    }
}
