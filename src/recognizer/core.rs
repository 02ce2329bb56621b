use crate::config::Config;
use crate::image_classifier::interface::{Classification, CropAndScale};
use crate::recognizer::bitmap::Bitmap;
use crate::recognizer::error::RecognizerError;
use crate::recognizer::ranking::{rank, Prediction};
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum Phase {
    Idle,
    Analyzing {
        request_id: u64,
        started_at: Instant,
    },
    Succeeded {
        predictions: Vec<Prediction>,
        finished_at: Instant,
    },
    Failed {
        error: RecognizerError,
        finished_at: Instant,
    },
}

#[derive(Debug, Clone)]
pub struct State {
    pub phase: Phase,
    pub model_available: bool,
    pub last_request_id: u64,
}

impl State {
    pub fn is_analyzing(&self) -> bool {
        matches!(self.phase, Phase::Analyzing { .. })
    }

    pub fn finished_at(&self) -> Option<Instant> {
        match self.phase {
            Phase::Succeeded { finished_at, .. } | Phase::Failed { finished_at, .. } => {
                Some(finished_at)
            }
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Event {
    ClassifyRequested {
        bitmap: Bitmap,
    },
    ClassifyDone {
        request_id: u64,
        result: Result<Vec<Classification>, RecognizerError>,
    },
}

impl Event {
    /// Like `Debug`, without dumping every classification.
    pub fn to_display_string(&self) -> String {
        match self {
            Event::ClassifyDone {
                request_id,
                result: Ok(classifications),
            } => match classifications.first() {
                Some(best) => format!(
                    "ClassifyDone {{ request_id: {}, result: Ok({} classifications, best {:?} {:.3}) }}",
                    request_id,
                    classifications.len(),
                    best.label,
                    best.confidence
                ),
                None => format!(
                    "ClassifyDone {{ request_id: {}, result: Ok(0 classifications) }}",
                    request_id
                ),
            },
            event => format!("{:?}", event),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ClassifyImage {
        request_id: u64,
        bitmap: Bitmap,
        crop_and_scale: CropAndScale,
    },
}

pub fn init(model_available: bool) -> (State, Vec<Effect>) {
    let phase = if model_available {
        Phase::Idle
    } else {
        Phase::Failed {
            error: RecognizerError::ModelUnavailable,
            finished_at: Instant::now(),
        }
    };

    (
        State {
            phase,
            model_available,
            last_request_id: 0,
        },
        vec![],
    )
}

fn failed(state: State, error: RecognizerError) -> (State, Vec<Effect>) {
    (
        State {
            phase: Phase::Failed {
                error,
                finished_at: Instant::now(),
            },
            ..state
        },
        vec![],
    )
}

pub fn transition(config: &Config, state: State, event: Event) -> (State, Vec<Effect>) {
    match (state.phase.clone(), event) {
        (_, Event::ClassifyRequested { .. }) if !state.model_available => {
            failed(state, RecognizerError::ModelUnavailable)
        }
        (_, Event::ClassifyRequested { bitmap }) if bitmap.has_zero_area() => {
            failed(state, RecognizerError::InvalidInput)
        }
        (_, Event::ClassifyRequested { bitmap }) => {
            let request_id = state.last_request_id + 1;
            (
                State {
                    phase: Phase::Analyzing {
                        request_id,
                        started_at: Instant::now(),
                    },
                    last_request_id: request_id,
                    ..state
                },
                vec![Effect::ClassifyImage {
                    request_id,
                    bitmap,
                    crop_and_scale: config.crop_and_scale,
                }],
            )
        }

        // Only the most recent request may settle the state
        (
            Phase::Analyzing {
                request_id: in_flight,
                ..
            },
            Event::ClassifyDone { request_id, result },
        ) if in_flight == request_id => match result.and_then(|c| rank(c, config.top_k)) {
            Ok(predictions) => (
                State {
                    phase: Phase::Succeeded {
                        predictions,
                        finished_at: Instant::now(),
                    },
                    ..state
                },
                vec![],
            ),
            Err(error) => failed(state, error),
        },

        (_, Event::ClassifyDone { .. }) => (state, vec![]),
    }
}
