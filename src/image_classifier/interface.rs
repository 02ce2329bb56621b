use image::RgbImage;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

impl Classification {
    #[allow(dead_code)]
    pub fn new(label: &str, confidence: f32) -> Self {
        Self {
            label: label.to_string(),
            confidence,
        }
    }
}

/// How an input of arbitrary size is fitted to the model's fixed input shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CropAndScale {
    /// Scale the shorter side to fit, then crop the centre.
    #[default]
    CenterCrop,
    /// Scale the longer side to fit and pad the rest.
    ScaleFit,
    /// Stretch to the input shape, ignoring aspect ratio.
    ScaleFill,
}

/// A loaded model. Results are ordered by descending confidence.
pub trait ImageClassifier: Send + Sync {
    fn classify(
        &self,
        image: &RgbImage,
        crop_and_scale: CropAndScale,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>;
}
