#[cfg(test)]
mod core_test {
    use crate::config::Config;
    use crate::image_classifier::interface::{Classification, CropAndScale};
    use crate::recognizer::core::{init, transition, Effect, Event, Phase, State};
    use crate::recognizer::error::RecognizerError;
    use crate::recognizer::observed::{Observed, ANALYZING_TEXT, WAITING_TEXT};
    use crate::recognizer::tests::fixture::{animals, image};

    fn analyzing(config: &Config) -> State {
        let (state, _) = init(true);
        let (state, _) = transition(
            config,
            state,
            Event::ClassifyRequested {
                bitmap: image(224, 224),
            },
        );
        state
    }

    #[test]
    fn test_init() {
        let (state, effects) = init(true);

        assert!(matches!(state.phase, Phase::Idle));
        assert!(effects.is_empty());
        assert_eq!(
            Observed::from(&state),
            Observed {
                result: WAITING_TEXT.to_string(),
                predictions: vec![],
                is_analyzing: false,
                error_message: None,
            }
        );
    }

    #[test]
    fn test_init_without_model() {
        let (state, effects) = init(false);

        match state.phase {
            Phase::Failed { error, .. } => assert_eq!(error, RecognizerError::ModelUnavailable),
            _ => panic!("Unexpected state"),
        }
        assert!(effects.is_empty());
    }

    #[test]
    fn test_request_without_model_fails() {
        let config = Config::default();
        let (state, _) = init(false);

        let (state, effects) = transition(
            &config,
            state,
            Event::ClassifyRequested {
                bitmap: image(224, 224),
            },
        );

        let observed = Observed::from(&state);
        assert_eq!(observed.error_message.as_deref(), Some("model unavailable"));
        assert_eq!(observed.result, "Error: model unavailable");
        assert!(!observed.is_analyzing);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_zero_area_request_fails() {
        let config = Config::default();

        for bitmap in [image(0, 224), image(224, 0), image(0, 0)] {
            let (state, _) = init(true);
            let (state, effects) =
                transition(&config, state, Event::ClassifyRequested { bitmap });

            match &state.phase {
                Phase::Failed { error, .. } => assert_eq!(error, &RecognizerError::InvalidInput),
                _ => panic!("Unexpected state"),
            }
            assert_eq!(
                Observed::from(&state).error_message.as_deref(),
                Some("invalid input image")
            );
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn test_model_check_comes_before_size_check() {
        let config = Config::default();
        let (state, _) = init(false);

        let (state, _) = transition(
            &config,
            state,
            Event::ClassifyRequested {
                bitmap: image(0, 0),
            },
        );

        assert_eq!(
            Observed::from(&state).error_message.as_deref(),
            Some("model unavailable")
        );
    }

    #[test]
    fn test_valid_request_starts_analyzing() {
        let config = Config::default();
        let (state, _) = init(true);

        let (state, effects) = transition(
            &config,
            state,
            Event::ClassifyRequested {
                bitmap: image(224, 224),
            },
        );

        assert!(matches!(state.phase, Phase::Analyzing { request_id: 1, .. }));
        assert_eq!(
            effects,
            vec![Effect::ClassifyImage {
                request_id: 1,
                bitmap: image(224, 224),
                crop_and_scale: CropAndScale::CenterCrop,
            }]
        );

        let observed = Observed::from(&state);
        assert!(observed.is_analyzing);
        assert_eq!(observed.result, ANALYZING_TEXT);
        assert!(observed.predictions.is_empty());
        assert_eq!(observed.error_message, None);
    }

    #[test]
    fn test_request_after_failure_clears_error() {
        let config = Config::default();
        let (state, _) = init(true);
        let (state, _) = transition(
            &config,
            state,
            Event::ClassifyRequested {
                bitmap: image(0, 0),
            },
        );
        assert!(Observed::from(&state).error_message.is_some());

        let (state, _) = transition(
            &config,
            state,
            Event::ClassifyRequested {
                bitmap: image(10, 10),
            },
        );

        let observed = Observed::from(&state);
        assert!(observed.is_analyzing);
        assert_eq!(observed.error_message, None);
    }

    #[test]
    fn test_results_succeed() {
        let config = Config::default();
        let state = analyzing(&config);

        let (state, effects) = transition(
            &config,
            state,
            Event::ClassifyDone {
                request_id: 1,
                result: Ok(animals()),
            },
        );

        let observed = Observed::from(&state);
        assert_eq!(
            observed.predictions,
            vec!["1. cat (97%)", "2. dog (2%)", "3. fox (1%)"]
        );
        assert_eq!(observed.result, "cat (97%)");
        assert!(!observed.is_analyzing);
        assert_eq!(observed.error_message, None);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_empty_results_fail() {
        let config = Config::default();
        let state = analyzing(&config);

        let (state, _) = transition(
            &config,
            state,
            Event::ClassifyDone {
                request_id: 1,
                result: Ok(vec![]),
            },
        );

        let observed = Observed::from(&state);
        assert_eq!(observed.error_message.as_deref(), Some("no results"));
        assert_eq!(observed.result, "Error: no results");
    }

    #[test]
    fn test_backend_error_fails_with_its_description() {
        let config = Config::default();
        let state = analyzing(&config);

        let (state, _) = transition(
            &config,
            state,
            Event::ClassifyDone {
                request_id: 1,
                result: Err(RecognizerError::Inference("out of memory".to_string())),
            },
        );

        let observed = Observed::from(&state);
        assert_eq!(observed.error_message.as_deref(), Some("out of memory"));
        assert_eq!(observed.result, "Error: classification failed");
    }

    #[test]
    fn test_conversion_error_fails() {
        let config = Config::default();
        let state = analyzing(&config);

        let (state, _) = transition(
            &config,
            state,
            Event::ClassifyDone {
                request_id: 1,
                result: Err(RecognizerError::Conversion),
            },
        );

        assert_eq!(
            Observed::from(&state).error_message.as_deref(),
            Some("image processing error")
        );
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let config = Config::default();
        let state = analyzing(&config);
        let (state, _) = transition(
            &config,
            state,
            Event::ClassifyRequested {
                bitmap: image(64, 64),
            },
        );
        assert!(matches!(state.phase, Phase::Analyzing { request_id: 2, .. }));

        let (state, effects) = transition(
            &config,
            state,
            Event::ClassifyDone {
                request_id: 1,
                result: Ok(vec![Classification::new("stale", 0.9)]),
            },
        );
        assert!(matches!(state.phase, Phase::Analyzing { request_id: 2, .. }));
        assert!(effects.is_empty());

        let (state, _) = transition(
            &config,
            state,
            Event::ClassifyDone {
                request_id: 2,
                result: Ok(animals()),
            },
        );
        assert_eq!(Observed::from(&state).result, "cat (97%)");

        // a late answer to request 1 does not overwrite request 2
        let (state, _) = transition(
            &config,
            state,
            Event::ClassifyDone {
                request_id: 1,
                result: Ok(vec![Classification::new("stale", 0.9)]),
            },
        );
        assert_eq!(Observed::from(&state).result, "cat (97%)");
    }

    #[test]
    fn test_result_while_idle_is_ignored() {
        let config = Config::default();
        let (state, _) = init(true);

        let (state, effects) = transition(
            &config,
            state,
            Event::ClassifyDone {
                request_id: 0,
                result: Ok(animals()),
            },
        );

        assert!(matches!(state.phase, Phase::Idle));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_top_k_and_crop_come_from_config() {
        let mut config = Config::default();
        config.top_k = 1;
        config.crop_and_scale = CropAndScale::ScaleFit;
        let (state, _) = init(true);

        let (state, effects) = transition(
            &config,
            state,
            Event::ClassifyRequested {
                bitmap: image(32, 32),
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [Effect::ClassifyImage {
                crop_and_scale: CropAndScale::ScaleFit,
                ..
            }]
        ));

        let (state, _) = transition(
            &config,
            state,
            Event::ClassifyDone {
                request_id: 1,
                result: Ok(animals()),
            },
        );
        assert_eq!(Observed::from(&state).predictions, vec!["1. cat (97%)"]);
    }

    #[test]
    fn test_done_event_display_string_is_short() {
        let classifications: Vec<Classification> = (0..1000)
            .map(|i| Classification::new(&format!("class{}", i), 1.0 / (i as f32 + 1.0)))
            .collect();
        let event = Event::ClassifyDone {
            request_id: 3,
            result: Ok(classifications),
        };

        let text = event.to_display_string();

        assert_eq!(
            text,
            "ClassifyDone { request_id: 3, result: Ok(1000 classifications, best \"class0\" 1.000) }"
        );
        assert!(!text.contains("class999"));
    }

    #[test]
    fn test_other_events_display_as_debug() {
        let empty = Event::ClassifyDone {
            request_id: 1,
            result: Ok(vec![]),
        };
        assert_eq!(
            empty.to_display_string(),
            "ClassifyDone { request_id: 1, result: Ok(0 classifications) }"
        );

        let failed = Event::ClassifyDone {
            request_id: 2,
            result: Err(RecognizerError::NoResults),
        };
        assert_eq!(failed.to_display_string(), format!("{:?}", failed));
    }
}
