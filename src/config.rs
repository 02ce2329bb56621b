use crate::image_classifier::interface::CropAndScale;
use chrono::Offset;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    pub labels_path: PathBuf,
    /// (height, width) the model was trained on
    pub input_shape: (u32, u32),
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            onnx_model_path: PathBuf::from("./models/mobilenetv2-7.onnx"),
            labels_path: PathBuf::from("./models/synset.txt"),
            input_shape: (224, 224),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub model: ModelConfig,
    pub top_k: usize,
    pub crop_and_scale: CropAndScale,
    pub retry_delay: Duration,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            top_k: 3,
            crop_and_scale: CropAndScale::CenterCrop,
            retry_delay: Duration::from_secs(2),
            logger_timezone: mountain_standard_time(),
        }
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap_or_else(|| chrono::Utc.fix())
}
