mod tests {
    use core::f32::consts::PI;
    use std::cell::RefCell;

    use embassy_time::Duration;
    use myrtio_lite_led::{
        BLOCK_FOREVER, EffectConfig, EffectEngine, LedError, LedMode, LedRegistry, LedState,
        LedStatus, LookupCurve, ticks,
    };

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_ticks_truncate() {
        assert_eq!(ticks(ms(250), ms(100)), 2);
        assert_eq!(ticks(ms(99), ms(100)), 0);
        assert_eq!(ticks(ms(0), ms(100)), 0);
        assert_eq!(ticks(ms(100), Duration::from_micros(500)), 200);
        assert_eq!(ticks(Duration::from_micros(1250), Duration::from_micros(500)), 2);
        assert_eq!(ticks(ms(10_000_000_000), ms(1)), BLOCK_FOREVER - 1);
    }

    #[test]
    fn test_sub_millisecond_poll_period() {
        let mut registry: LedRegistry<'_, 2> = LedRegistry::new(Duration::from_micros(500));
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());

        registry
            .configure(0, &EffectConfig::on().with_lifetime(ms(100)))
            .unwrap();
        assert_eq!(registry.status(0).unwrap().lifetime_remaining, 200);
    }

    #[test]
    #[should_panic(expected = "poll period must be positive")]
    fn test_zero_poll_period_is_rejected() {
        let _registry: LedRegistry<'_, 1> = LedRegistry::new(Duration::from_ticks(0));
    }

    #[test]
    fn test_mode_raw_values() {
        assert_eq!(LedMode::from_raw(0), Some(LedMode::Off));
        assert_eq!(LedMode::from_raw(6), Some(LedMode::Alternate));
        assert_eq!(LedMode::from_raw(7), None);
        assert_eq!(LedMode::try_from(2), Ok(LedMode::Blink));
        assert_eq!(LedMode::try_from(42), Err(LedError::InvalidMode));
    }

    #[test]
    fn test_mode_names() {
        for raw in 0..=6 {
            let mode = LedMode::from_raw(raw).unwrap();
            assert_eq!(LedMode::parse_from_str(mode.as_str()), Ok(mode));
        }
        assert_eq!(LedMode::FadeIn.as_str(), "fade_in");
        assert_eq!(
            LedMode::parse_from_str("strobe"),
            Err(LedError::InvalidMode)
        );
    }

    #[test]
    fn test_out_of_range_id() {
        let mut output = |_: u8| {};
        let mut on_expired = || {};
        let mut registry: LedRegistry<'_, 4> = LedRegistry::default();

        assert_eq!(registry.init(4, &mut output), Err(LedError::InvalidArgument));
        assert_eq!(
            registry.register_expiry_handler(4, &mut on_expired),
            Err(LedError::InvalidArgument)
        );
        assert_eq!(
            registry.configure(4, &EffectConfig::on()),
            Err(LedError::InvalidArgument)
        );
        assert_eq!(registry.status(200), Err(LedError::InvalidArgument));
        assert_eq!(registry.mode(4), Err(LedError::InvalidArgument));

        for id in 0..4 {
            assert_eq!(registry.status(id), Ok(LedStatus::default()));
            assert_eq!(registry.mode(id), Ok(LedMode::Off));
        }
    }

    #[test]
    fn test_self_paired_alternate_keeps_config() {
        let log = RefCell::new(Vec::new());
        let mut output = |percent: u8| log.borrow_mut().push(percent);
        let mut registry: LedRegistry<'_, 2> = LedRegistry::default();
        let engine: EffectEngine = EffectEngine::default();

        registry.init(0, &mut output).unwrap();
        registry
            .configure(0, &EffectConfig::blink(ms(200), ms(800)))
            .unwrap();
        engine.tick(&mut registry);
        engine.tick(&mut registry);
        let before = registry.status(0).unwrap();

        assert_eq!(
            registry.configure(0, &EffectConfig::alternate(0, ms(500))),
            Err(LedError::InvalidAlternatePeer)
        );
        assert_eq!(registry.status(0), Ok(before));
        assert_eq!(registry.mode(0), Ok(LedMode::Blink));

        engine.tick(&mut registry);
        assert_eq!(*log.borrow(), [100, 0]);
    }

    #[test]
    fn test_configure_resets_status() {
        let mut output = |_: u8| {};
        let mut registry: LedRegistry<'_, 1> = LedRegistry::new(ms(100));
        let engine: EffectEngine = EffectEngine::default();

        registry.init(0, &mut output).unwrap();
        registry.configure(0, &EffectConfig::on()).unwrap();
        engine.tick(&mut registry);
        assert_eq!(registry.status(0).unwrap().state, LedState::On);

        registry
            .configure(0, &EffectConfig::blink(ms(100), ms(100)).with_lifetime(ms(550)))
            .unwrap();
        let status = registry.status(0).unwrap();
        assert_eq!(status.state, LedState::Off);
        assert_eq!(status.brightness, 0);
        assert_eq!(status.next_event, 0);
        assert_eq!(status.lifetime_remaining, 5);
        assert!(!status.expired);
    }

    #[test]
    fn test_fade_phase_setup() {
        let mut registry: LedRegistry<'_, 3> = LedRegistry::new(ms(100));

        registry.configure(0, &EffectConfig::fade_in(ms(1000))).unwrap();
        let status = registry.status(0).unwrap();
        assert_eq!(status.brightness, 0);
        assert!(status.phase.abs() < f32::EPSILON);
        assert!((status.phase_step - PI / 10.0).abs() < 1e-6);

        registry.configure(1, &EffectConfig::fade_out(ms(500))).unwrap();
        let status = registry.status(1).unwrap();
        assert_eq!(status.brightness, 100);
        assert!((status.phase - PI).abs() < 1e-6);
        assert!((status.phase_step + PI / 5.0).abs() < 1e-6);

        // Sub-period fades still advance
        registry.configure(2, &EffectConfig::breath(ms(50))).unwrap();
        let status = registry.status(2).unwrap();
        assert!((status.phase_step - PI / 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_init_discards_effect() {
        let mut first = |_: u8| {};
        let mut second = |_: u8| {};
        let mut registry: LedRegistry<'_, 1> = LedRegistry::default();

        registry.init(0, &mut first).unwrap();
        registry
            .configure(0, &EffectConfig::breath(ms(1000)).with_lifetime(ms(3000)))
            .unwrap();
        EffectEngine::<LookupCurve>::default().tick(&mut registry);

        registry.init(0, &mut second).unwrap();
        assert_eq!(registry.status(0), Ok(LedStatus::default()));
        assert_eq!(registry.mode(0), Ok(LedMode::Off));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(LedError::InvalidArgument.to_string(), "invalid LED id");
        assert_eq!(LedError::QueueFull.to_string(), "command queue is full");
    }
}
