#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;

    use crate::components::DomeRound;
    use crate::config::{MissionConfig, ScheduleSource};
    use crate::enums::*;
    use crate::error::{ConfigError, EngineError};
    use crate::threat::{SpawnDistribution, Threat, ThreatProfile, TimingTable};
    use crate::types::{SimTime, ThreatId};

    fn drone(distance: f64, velocity: f64) -> Threat {
        Threat::new(
            ThreatId(1),
            ThreatKind::Drone,
            &ThreatProfile::drone(),
            distance,
            velocity,
            0.0,
        )
        .unwrap()
    }

    // ---- Timing table ----

    #[test]
    fn test_timing_table_interpolates_between_keys() {
        let table = TimingTable::new(vec![(3.0, 4.0), (6.0, 6.0), (14.0, 9.0)]).unwrap();
        assert!((table.interpolate(3.0) - 4.0).abs() < 1e-12);
        assert!((table.interpolate(4.5) - 5.0).abs() < 1e-12);
        assert!((table.interpolate(10.0) - 7.5).abs() < 1e-12);
        assert!((table.interpolate(14.0) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_timing_table_extrapolates_with_edge_slope() {
        let table = TimingTable::new(vec![(3.0, 4.0), (6.0, 6.0), (14.0, 9.0)]).unwrap();
        // Below: slope of the (3,4)-(6,6) segment is 2/3.
        assert!((table.interpolate(0.0) - 2.0).abs() < 1e-12);
        // Above: slope of the (6,6)-(14,9) segment is 3/8.
        assert!((table.interpolate(22.0) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_timing_table_sorts_input() {
        let table = TimingTable::new(vec![(14.0, 14.0), (12.0, 12.0)]).unwrap();
        assert_eq!(table.points()[0], (12.0, 12.0));
        assert!((table.interpolate(13.0) - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_timing_table_too_short_is_config_error() {
        assert!(matches!(
            TimingTable::new(vec![(5.0, 5.0)]),
            Err(ConfigError::TimingTableTooShort(1))
        ));
        assert!(matches!(
            TimingTable::new(Vec::new()),
            Err(ConfigError::TimingTableTooShort(0))
        ));
    }

    #[test]
    fn test_timing_table_rejects_duplicates_and_nan() {
        assert!(matches!(
            TimingTable::new(vec![(5.0, 5.0), (5.0, 6.0)]),
            Err(ConfigError::TimingTableDuplicateKey(_))
        ));
        assert!(matches!(
            TimingTable::new(vec![(5.0, f64::NAN), (6.0, 6.0)]),
            Err(ConfigError::TimingTableNonFinite(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_interpolation_stays_on_connecting_line(
            d1 in 0.0f64..50.0,
            gap in 0.1f64..50.0,
            t1 in 0.0f64..30.0,
            t2 in 0.0f64..30.0,
            frac in -1.0f64..2.0,
        ) {
            let d2 = d1 + gap;
            let table = TimingTable::new(vec![(d1, t1), (d2, t2)]).unwrap();
            let d = d1 + frac * gap;
            let expected = t1 + (d - d1) * (t2 - t1) / (d2 - d1);
            prop_assert!((table.interpolate(d) - expected).abs() < 1e-9);
        }
    }

    // ---- Kinematics ----

    #[test]
    fn test_update_distance_closes_range() {
        let mut threat = drone(10.0, 180.0);
        // 180 km/h for 10 s = 0.5 km.
        threat.update_distance(10.0).unwrap();
        assert!((threat.distance_km - 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_update_distance_clamps_at_zero() {
        let mut threat = drone(0.01, 180.0);
        threat.update_distance(10.0).unwrap();
        assert_eq!(threat.distance_km, 0.0);
        assert!(threat.has_reached_ship());
    }

    #[test]
    fn test_update_distance_past_terminal_is_invalid_state() {
        let mut threat = drone(0.01, 180.0);
        threat.update_distance(10.0).unwrap();
        let err = threat.update_distance(0.1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidState { threat } if threat == ThreatId(1)));
    }

    #[test]
    fn test_arrival_time() {
        let threat = drone(10.0, 180.0);
        assert!((threat.arrival_time() - 200.0).abs() < 1e-9);

        let hovering = drone(10.0, 0.0);
        assert!(hovering.arrival_time().is_infinite());
    }

    #[test]
    fn test_time_to_range_limit() {
        let threat = drone(10.0, 180.0);
        // Drone range limit is 0.5 km: 9.5 km at 180 km/h = 190 s.
        assert_eq!(threat.range_limit(), Some(0.5));
        assert!((threat.time_to_range_limit() - 190.0).abs() < 1e-9);

        let inside = drone(0.3, 180.0);
        assert_eq!(inside.time_to_range_limit(), 0.0);
        assert!(inside.is_inside_range_limit());
    }

    #[test]
    fn test_ballistic_is_dome_only() {
        let threat = Threat::new(
            ThreatId(7),
            ThreatKind::Ballistic,
            &ThreatProfile::ballistic(),
            20.0,
            3000.0,
            1.0,
        )
        .unwrap();
        assert!(!threat.is_beam_capable());
        assert!(threat.range_limit().is_none());
        assert!(!threat.is_inside_range_limit());
        // No limit: time to limit equals time to impact.
        assert!((threat.time_to_range_limit() - threat.arrival_time()).abs() < 1e-9);
        assert!(threat.kill_probability(InterceptMode::Dome) > 0.0);
    }

    #[test]
    fn test_negative_distance_rejected_at_construction() {
        let result = Threat::new(
            ThreatId(0),
            ThreatKind::Drone,
            &ThreatProfile::drone(),
            -1.0,
            180.0,
            0.0,
        );
        assert!(matches!(result, Err(ConfigError::InvalidThreat(_))));
    }

    #[test]
    fn test_beam_profile_without_table_rejected() {
        let mut profile = ThreatProfile::drone();
        profile.timing_table = None;
        let result = Threat::new(ThreatId(0), ThreatKind::Drone, &profile, 5.0, 180.0, 0.0);
        assert!(matches!(
            result,
            Err(ConfigError::MissingTimingTable {
                kind: ThreatKind::Drone
            })
        ));
    }

    #[test]
    fn test_position_follows_bearing() {
        let mut threat = drone(10.0, 180.0);
        threat.bearing = std::f64::consts::FRAC_PI_2; // due East
        let pos = threat.position();
        assert!((pos.x - 10.0).abs() < 1e-9);
        assert!(pos.y.abs() < 1e-9);
    }

    #[test]
    fn test_spawn_distribution_respects_floor() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
        let wide = SpawnDistribution::Normal(crate::threat::Gaussian::new(0.0, 10.0));
        for _ in 0..200 {
            assert!(wide.sample(&mut rng, 0.1) >= 0.1);
        }
    }

    // ---- Dome geometry ----

    #[test]
    fn test_predict_intercept() {
        // 10 km, drone at 180 km/h, round at 2700 km/h: closure 2880 km/h.
        let (intercept, flight) = DomeRound::predict_intercept(10.0, 180.0, 2700.0);
        assert!((flight - 12.5).abs() < 1e-9);
        assert!((intercept - 9.375).abs() < 1e-9);
    }

    // ---- Time ----

    #[test]
    fn test_sim_time_does_not_drift() {
        let mut time = SimTime::default();
        for _ in 0..10_000 {
            time.advance(0.1);
        }
        assert_eq!(time.tick, 10_000);
        assert!((time.elapsed_secs - 1000.0).abs() < 1e-9);

        time.jump_to(5, 0.1);
        assert_eq!(time.tick, 10_000, "jump_to never moves backwards");
    }

    // ---- Config ----

    #[test]
    fn test_default_config_validates() {
        MissionConfig::default().validate().unwrap();
        assert_eq!(MissionConfig::default().horizon_ticks(), 12_096_000);
    }

    #[test]
    fn test_config_json_partial_override() {
        let json = r#"{
            "seed": 9,
            "dt_secs": 0.05,
            "beam": { "enabled": false },
            "schedule": { "type": "scripted", "events": [
                { "arrival_secs": 0.0, "size": "small" },
                { "arrival_secs": 30.0, "size": "big" }
            ] }
        }"#;
        let config = MissionConfig::from_json(json).unwrap();
        assert_eq!(config.seed, 9);
        assert!(!config.beam.enabled);
        assert!((config.beam.cooldown_secs - 2.0).abs() < 1e-12);
        assert!(config.dome.enabled);
        match &config.schedule {
            ScheduleSource::Scripted { events } => {
                assert_eq!(events.len(), 2);
                assert_eq!(events[1].size, BarrageSize::Big);
            }
            other => panic!("expected scripted schedule, got {other:?}"),
        }
    }

    #[test]
    fn test_config_json_rejects_short_timing_table() {
        let json = r#"{
            "threats": {
                "drone": {
                    "kill_probability": { "beam": 0.9, "dome": 0.8, "lrad": 0.0 },
                    "timing_table": [[3.0, 4.0]],
                    "range_limit_km": 0.5,
                    "spawn_distance_km": { "type": "fixed", "value": 10.0 },
                    "spawn_velocity_kmh": { "type": "fixed", "value": 180.0 }
                }
            }
        }"#;
        assert!(matches!(
            MissionConfig::from_json(json),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_config_rejects_zero_launcher_capacity() {
        let mut config = MissionConfig::default();
        config.dome.max_rounds_in_flight = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroCapacity { .. })
        ));
    }

    #[test]
    fn test_threat_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ThreatKind::AntiShip).unwrap();
        assert_eq!(json, "\"anti_ship\"");
        let back: ThreatKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ThreatKind::AntiShip);
    }
}
