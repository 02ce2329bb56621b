use crate::config::ModelConfig;
use crate::image_classifier::interface::{Classification, CropAndScale, ImageClassifier};
use crate::image_classifier::labels::load_labels;
use crate::image_classifier::tract::image::resize_image_to_tensor;
use crate::library::logger::interface::Logger;
use image::RgbImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    labels: Vec<String>,
    // 1 when the model has an extra leading "background" class
    label_offset: usize,
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    pub fn load(
        config: &ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let logger = logger.with_namespace("image_classifier").with_namespace("tract");
        let (height, width) = config.input_shape;

        logger.info(&format!(
            "Loading model {} ({}x{})",
            config.onnx_model_path.display(),
            width,
            height
        ))?;

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())?
            .into_optimized()?
            .into_runnable()?;

        let labels = load_labels(&config.labels_path)?;

        let classes = model
            .model()
            .output_fact(0)?
            .shape
            .as_concrete()
            .and_then(|shape| shape.last().copied())
            .ok_or("Model output shape is not concrete")?;

        let label_offset = match classes.checked_sub(labels.len()) {
            Some(0) => 0,
            Some(1) => 1,
            _ => {
                return Err(format!(
                    "Model has {} classes but {} labels were loaded",
                    classes,
                    labels.len()
                )
                .into())
            }
        };

        logger.info(&format!("Model loaded with {} classes", classes))?;

        Ok(Self {
            model,
            labels,
            label_offset,
            config: config.clone(),
            logger,
        })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(
        &self,
        image: &RgbImage,
        crop_and_scale: CropAndScale,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = self.config.input_shape;

        let input = resize_image_to_tensor(image, width, height, crop_and_scale);

        let outputs = self.model.run(tvec!(input.into_tvalue()))?;

        let output = outputs.first().ok_or("Model produced no outputs")?;
        let scores: Vec<f32> = output.to_array_view::<f32>()?.iter().copied().collect();

        let probabilities = if is_distribution(&scores) {
            scores
        } else {
            softmax(&scores)
        };

        let mut classifications: Vec<Classification> = probabilities
            .iter()
            .skip(self.label_offset)
            .zip(self.labels.iter())
            .map(|(&confidence, label)| Classification {
                label: label.clone(),
                confidence,
            })
            .collect();

        classifications.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        if let Some(best) = classifications.first() {
            self.logger.info(&format!(
                "Best of {}: {} ({:.3})",
                classifications.len(),
                best.label,
                best.confidence
            ))?;
        }

        Ok(classifications)
    }
}

fn is_distribution(scores: &[f32]) -> bool {
    let sum: f32 = scores.iter().sum();
    scores.iter().all(|s| (0.0..=1.0).contains(s)) && (sum - 1.0).abs() < 1e-3
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max_logit = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    let exp_values: Vec<f32> = logits.iter().map(|&x| (x - max_logit).exp()).collect();

    let sum: f32 = exp_values.iter().sum();

    exp_values.iter().map(|&x| x / sum).collect()
}
