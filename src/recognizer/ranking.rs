use crate::image_classifier::interface::Classification;
use crate::recognizer::error::RecognizerError;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

impl Prediction {
    pub fn percent(&self) -> u32 {
        percent(self.confidence)
    }

    /// `"<label> (<percent>%)"`
    pub fn summary(&self) -> String {
        format!("{} ({}%)", self.label, self.percent())
    }
}

/// Truncates, never rounds: 0.995 is 99%.
pub fn percent(confidence: f32) -> u32 {
    (confidence * 100.0) as u32
}

/// Keeps the `top_k` most confident classifications, dropping scores that are
/// not a finite value in [0, 1]. Fails with `NoResults` when nothing usable is
/// left.
pub fn rank(
    classifications: Vec<Classification>,
    top_k: usize,
) -> Result<Vec<Prediction>, RecognizerError> {
    let mut predictions: Vec<Prediction> = classifications
        .into_iter()
        .filter(|c| c.confidence.is_finite() && (0.0..=1.0).contains(&c.confidence))
        .map(|c| Prediction {
            label: c.label,
            confidence: c.confidence,
        })
        .collect();

    // stable, so an already ordered backend response is left untouched
    predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    predictions.truncate(top_k);

    if predictions.is_empty() {
        return Err(RecognizerError::NoResults);
    }

    Ok(predictions)
}

/// `"<rank>. <label> (<percent>%)"`, ranks starting at 1.
pub fn format_predictions(predictions: &[Prediction]) -> Vec<String> {
    predictions
        .iter()
        .enumerate()
        .map(|(index, prediction)| format!("{}. {}", index + 1, prediction.summary()))
        .collect()
}
