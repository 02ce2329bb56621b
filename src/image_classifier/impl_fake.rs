use crate::image_classifier::interface::{Classification, CropAndScale, ImageClassifier};
use crate::library::logger::interface::Logger;
use image::RgbImage;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const PREVIEW_LABELS: [&str; 18] = [
    "dog", "cat", "person", "car", "chair", "table", "bird", "tree", "bicycle", "book", "laptop",
    "phone", "cup", "bottle", "keyboard", "mouse", "plant", "clock",
];

#[derive(Debug, Clone)]
enum Response {
    Classifications(Vec<Classification>),
    Error(String),
    Random,
}

pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    response: Response,
    delay: Duration,
    calls: AtomicUsize,
}

impl ImageClassifierFake {
    fn with_response(logger: Arc<dyn Logger + Send + Sync>, response: Response) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            response,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always answers with `classifications`, in the given order.
    #[allow(dead_code)]
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, classifications: Vec<Classification>) -> Self {
        Self::with_response(logger, Response::Classifications(classifications))
    }

    #[allow(dead_code)]
    pub fn failing(logger: Arc<dyn Logger + Send + Sync>, message: &str) -> Self {
        Self::with_response(logger, Response::Error(message.to_string()))
    }

    /// Simulated results for running without a model file.
    pub fn random(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_response(logger, Response::Random)
    }

    #[allow(dead_code)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn random_classifications(
        &self,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();

        let index_dist = Uniform::new(0, PREVIEW_LABELS.len())?;

        let confidence_dist = Uniform::new(0.0f32, 1.0f32)?;

        let mut classifications: Vec<Classification> = (0..5)
            .map(|_| Classification {
                label: PREVIEW_LABELS[index_dist.sample(&mut rng)].to_string(),
                confidence: confidence_dist.sample(&mut rng),
            })
            .collect();

        classifications.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        Ok(classifications)
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        image: &RgbImage,
        crop_and_scale: CropAndScale,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        self.logger.info(&format!(
            "Classifying {}x{} image ({:?})",
            image.width(),
            image.height(),
            crop_and_scale
        ))?;

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        match &self.response {
            Response::Classifications(classifications) => Ok(classifications.clone()),
            Response::Error(message) => Err(message.clone().into()),
            Response::Random => self.random_classifications(),
        }
    }
}
