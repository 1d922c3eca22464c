#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use bastion_core::config::BeamConfig;
    use bastion_core::enums::ThreatKind;
    use bastion_core::threat::{Threat, ThreatProfile, TimingTable};
    use bastion_core::types::ThreatId;

    use crate::curve::KillCurve;
    use crate::optimizer::{dwell_horizon, optimize, optimize_curve, ranking_score, realize};

    fn make_threat(kind: ThreatKind, distance: f64, velocity: f64) -> Threat {
        let profile = match kind {
            ThreatKind::Drone => ThreatProfile::drone(),
            ThreatKind::AntiShip => ThreatProfile::anti_ship(),
            ThreatKind::Ballistic => ThreatProfile::ballistic(),
        };
        Threat::new(ThreatId(0), kind, &profile, distance, velocity, 0.0).unwrap()
    }

    // ---- Curve shape ----

    #[test]
    fn test_curve_anchor_points() {
        let curve = KillCurve::new(0.9, 7.5, 0.95);
        assert_eq!(curve.probability(0.0), 0.0);
        assert!((curve.probability(7.5) - 0.95 * 0.9).abs() < 1e-12);
        assert!((curve.probability(1e6) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_curve_is_monotonic() {
        let curve = KillCurve::new(0.8, 12.0, 0.95);
        let mut prev = 0.0;
        for i in 1..200 {
            let p = curve.probability(i as f64 * 0.1);
            assert!(p >= prev, "curve dipped at t={}", i as f64 * 0.1);
            prev = p;
        }
    }

    // ---- Horizon ----

    #[test]
    fn test_horizon_interpolates_table() {
        let config = BeamConfig::default();
        let threat = make_threat(ThreatKind::Drone, 10.0, 180.0);
        // Between (6,6) and (14,9): 6 + 4 * 3/8 = 7.5.
        assert!((dwell_horizon(&threat, &config).unwrap() - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_horizon_near_field_floor() {
        let config = BeamConfig::default();
        let threat = make_threat(ThreatKind::Drone, 1.5, 180.0);
        assert_eq!(
            dwell_horizon(&threat, &config),
            Some(config.near_field_dwell_secs)
        );
    }

    #[test]
    fn test_horizon_falls_back_on_non_positive_extrapolation() {
        let config = BeamConfig::default();
        let mut profile = ThreatProfile::drone();
        // Steep table: extrapolates below zero at 2.5 km.
        profile.timing_table = Some(TimingTable::new(vec![(5.0, 1.0), (6.0, 3.0)]).unwrap());
        let threat = Threat::new(ThreatId(0), ThreatKind::Drone, &profile, 2.5, 180.0, 0.0)
            .unwrap();
        assert_eq!(
            dwell_horizon(&threat, &config),
            Some(config.near_field_dwell_secs)
        );
    }

    // ---- Optimizer ----

    #[test]
    fn test_single_drone_scenario() {
        let config = BeamConfig::default();
        let threat = make_threat(ThreatKind::Drone, 10.0, 180.0);
        let plan = optimize(&threat, &config).unwrap();

        assert!(plan.dwell_secs > 0.0);
        assert!(plan.dwell_secs <= 1.5 * plan.horizon_secs + 1e-12);
        assert!(plan.kill_probability <= 0.9);
        assert!(plan.kill_probability > 0.0);
        assert!((plan.ratio - plan.kill_probability / plan.dwell_secs).abs() < 1e-12);
    }

    #[test]
    fn test_optimum_beats_every_grid_point() {
        let curve = KillCurve::new(0.9, 7.5, 0.95);
        let plan = optimize_curve(&curve, 1.5, 300);
        for i in 1..=300 {
            let t = 11.25 * i as f64 / 300.0;
            assert!(curve.ratio(t) <= plan.ratio + 1e-15);
        }
        // With P(0) = 0 and a sigmoid rise, the best ratio sits inside the window.
        assert!(plan.dwell_secs < 11.25);
    }

    #[test]
    fn test_ballistic_has_no_plan() {
        let config = BeamConfig::default();
        let threat = make_threat(ThreatKind::Ballistic, 20.0, 3000.0);
        assert!(optimize(&threat, &config).is_none());
        assert!(ranking_score(&threat, &config).is_none());
    }

    #[test]
    fn test_ranking_prefers_cheaper_kill() {
        let config = BeamConfig::default();
        // Closer drone has a shorter horizon, so more probability per second.
        let near = make_threat(ThreatKind::Drone, 4.0, 180.0);
        let far = make_threat(ThreatKind::Drone, 13.0, 180.0);
        assert!(ranking_score(&near, &config).unwrap() > ranking_score(&far, &config).unwrap());
    }

    proptest! {
        #[test]
        fn prop_dwell_within_window(
            p_max in 0.05f64..1.0,
            horizon in 0.5f64..60.0,
        ) {
            let curve = KillCurve::new(p_max, horizon, 0.95);
            let plan = optimize_curve(&curve, 1.5, 300);
            prop_assert!(plan.dwell_secs > 0.0);
            prop_assert!(plan.dwell_secs <= 1.5 * horizon * (1.0 + 1e-12));
            prop_assert!(plan.kill_probability <= p_max);
        }

        #[test]
        fn prop_kill_probability_non_decreasing_in_horizon(
            p_max in 0.05f64..1.0,
            horizon in 0.5f64..60.0,
            growth in 0.0f64..30.0,
        ) {
            let short = optimize_curve(&KillCurve::new(p_max, horizon, 0.95), 1.5, 300);
            let long = optimize_curve(&KillCurve::new(p_max, horizon + growth, 0.95), 1.5, 300);
            prop_assert!(long.kill_probability >= short.kill_probability - 1e-12);
        }
    }

    // ---- Outcome draw ----

    #[test]
    fn test_realize_certain_kill_never_exceeds_optimum() {
        let config = BeamConfig::default();
        let threat = make_threat(ThreatKind::Drone, 10.0, 180.0);
        let plan = optimize(&threat, &config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            let outcome = realize(&plan, 1.0, config.dwell_jitter, &mut rng);
            assert!(outcome.hit);
            assert!(outcome.elapsed_secs <= plan.dwell_secs);
            assert!(outcome.elapsed_secs > 0.0);
        }
    }

    #[test]
    fn test_realize_certain_miss_burns_optimum() {
        let config = BeamConfig::default();
        let threat = make_threat(ThreatKind::AntiShip, 13.0, 800.0);
        let plan = optimize(&threat, &config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let outcome = realize(&plan, 0.0, config.dwell_jitter, &mut rng);
        assert!(!outcome.hit);
        assert_eq!(outcome.elapsed_secs, plan.dwell_secs);
    }

    #[test]
    fn test_realize_hit_rate_tracks_p_max() {
        let curve = KillCurve::new(0.9, 7.5, 0.95);
        let plan = optimize_curve(&curve, 1.5, 300);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let hits = (0..4000)
            .filter(|_| realize(&plan, 0.9, 0.15, &mut rng).hit)
            .count();
        let rate = hits as f64 / 4000.0;
        assert!((rate - 0.9).abs() < 0.03, "hit rate {rate}");
    }
}
