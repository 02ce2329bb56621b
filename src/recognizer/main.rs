use crate::config::Config;
use crate::display::interface::Display;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::recognizer::bitmap::Bitmap;
use crate::recognizer::core::{init, transition, Effect, Event, Phase, State};
use crate::recognizer::observed::Observed;
use crate::recognizer::render::Render;
use crate::recognizer::run_effect::RunEffect;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Classifies one image at a time.
///
/// The thread that owns the recognizer is the only one that changes its
/// state. Classification runs on a worker thread per request and its
/// completion is queued back; call [`Recognizer::poll`] or
/// [`Recognizer::wait`] to apply it.
pub struct Recognizer {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    state: State,
    run_effect: Option<RunEffect>,
    event_receiver: Receiver<Event>,
    render: Render,
}

impl Recognizer {
    /// Never fails: a model that did not load leaves the recognizer in the
    /// "model unavailable" state.
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Result<
            Arc<dyn ImageClassifier + Send + Sync>,
            Box<dyn std::error::Error + Send + Sync>,
        >,
        display: Arc<Mutex<dyn Display + Send + Sync>>,
    ) -> Self {
        let logger = logger.with_namespace("recognizer");
        let (event_sender, event_receiver) = channel();

        let run_effect = match image_classifier {
            Ok(image_classifier) => Some(RunEffect::new(
                logger.clone(),
                image_classifier,
                event_sender,
            )),
            Err(e) => {
                let _ = logger.error(&format!("Model failed to load: {}", e));
                None
            }
        };

        let (state, effects) = init(run_effect.is_some());

        if let Ok(mut display) = display.lock() {
            if let Err(e) = display.init() {
                let _ = logger.error(&format!("Display init failed: {}", e));
            }
        }

        let recognizer = Self {
            config,
            logger,
            state,
            run_effect,
            event_receiver,
            render: Render::new(display),
        };

        recognizer.refresh();
        recognizer.spawn_effects(effects);

        recognizer
    }

    /// Starts classifying `bitmap`. Guard failures are applied before this
    /// returns; the result of an accepted request arrives later.
    pub fn classify(&mut self, bitmap: Bitmap) {
        self.apply(Event::ClassifyRequested { bitmap });
    }

    /// Applies every completion that has already arrived. Returns how many.
    #[allow(dead_code)]
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.event_receiver.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Blocks until no request is in flight. Returns false on timeout.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;

        while self.state.is_analyzing() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.event_receiver.recv_timeout(remaining) {
                Ok(event) => self.apply(event),
                Err(_) => return false,
            }
        }

        true
    }

    #[allow(dead_code)]
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn observed(&self) -> Observed {
        Observed::from(&self.state)
    }

    /// True once the last result has been on screen for `retry_delay`.
    pub fn retry_ready(&self) -> bool {
        self.state
            .finished_at()
            .is_some_and(|finished_at| finished_at.elapsed() >= self.config.retry_delay)
    }

    pub fn retry_delay_remaining(&self) -> Duration {
        self.state
            .finished_at()
            .map(|finished_at| self.config.retry_delay.saturating_sub(finished_at.elapsed()))
            .unwrap_or(Duration::ZERO)
    }

    /// Redraws the display from the current state.
    pub fn refresh(&self) {
        if let Err(e) = self.render.render(&self.observed(), self.retry_ready()) {
            let _ = self.logger.error(&format!("Render failed: {}", e));
        }
    }

    fn apply(&mut self, event: Event) {
        let _ = self.logger.info(&format!("Event: {}", event.to_display_string()));

        if let (
            Phase::Analyzing {
                request_id: in_flight,
                started_at,
            },
            Event::ClassifyDone { request_id, .. },
        ) = (&self.state.phase, &event)
        {
            if in_flight == request_id {
                let _ = self.logger.info(&format!(
                    "Request {} took {:?}",
                    request_id,
                    started_at.elapsed()
                ));
            } else {
                let _ = self.logger.info(&format!(
                    "Dropping stale result of request {} (waiting on {})",
                    request_id, in_flight
                ));
            }
        }

        let (new_state, effects) = transition(&self.config, self.state.clone(), event);

        let _ = self
            .logger
            .info(&format!("State: {:?}, effects: {:?}", new_state.phase, effects));

        self.state = new_state;

        self.refresh();

        self.spawn_effects(effects);
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        // Without a model no request is ever accepted, so there are no effects
        let Some(run_effect) = &self.run_effect else {
            return;
        };

        for effect in effects {
            let run_effect = run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }
}
