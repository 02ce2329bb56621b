use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::recognizer::core::{Effect, Event};
use crate::recognizer::error::RecognizerError;
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    event_sender: Sender<Event>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        event_sender: Sender<Event>,
    ) -> Self {
        Self {
            logger,
            image_classifier,
            event_sender,
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::ClassifyImage {
                request_id,
                bitmap,
                crop_and_scale,
            } => {
                let result = bitmap.to_rgb().and_then(|rgb| {
                    self.image_classifier
                        .classify(&rgb, crop_and_scale)
                        .map_err(|e| RecognizerError::Inference(e.to_string()))
                });

                if let Err(error) = &result {
                    let _ = self
                        .logger
                        .error(&format!("Request {} failed: {}", request_id, error));
                }

                // The receiver is gone only when the recognizer was dropped
                let _ = self
                    .event_sender
                    .send(Event::ClassifyDone { request_id, result });
            }
        }
    }
}
