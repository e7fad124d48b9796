//! Tests for the ordering and termination of the parameter schedule

#[cfg(test)]
mod tests {
    use shrinkfit::convergence::{ConvergenceConfig, ParameterSchedule, Phase};

    fn config(min_quality: u8, shrink_step: u8, min_scale: u8) -> ConvergenceConfig {
        ConvergenceConfig::new(1000, min_quality, shrink_step, min_scale).unwrap()
    }

    // Tests the quality phase decreases one step at a time at full scale
    // Verified by decrementing quality by two
    #[test]
    fn test_quality_phase_is_monotonic() {
        let steps: Vec<_> = ParameterSchedule::new(&config(90, 10, 1))
            .take_while(|(phase, _)| *phase == Phase::Quality)
            .map(|(_, parameters)| parameters)
            .collect();

        assert_eq!(steps.len(), 11);
        assert!(steps.iter().all(|p| p.scale == 100));
        assert!(steps.windows(2).all(|w| w[1].quality + 1 == w[0].quality));
        assert_eq!(steps.first().map(|p| p.quality), Some(100));
        assert_eq!(steps.last().map(|p| p.quality), Some(90));
    }

    // Tests the scale phase steps by exactly the shrink step at the minimum quality
    // Verified by restarting the scale phase at 100
    #[test]
    fn test_scale_phase_steps_exactly() {
        let steps: Vec<_> = ParameterSchedule::new(&config(90, 15, 1))
            .filter(|(phase, _)| *phase == Phase::Scale)
            .map(|(_, parameters)| parameters)
            .collect();

        let scales: Vec<u8> = steps.iter().map(|p| p.scale).collect();
        assert_eq!(scales, vec![85, 70, 55, 40, 25, 10]);
        assert!(steps.iter().all(|p| p.quality == 90));
    }

    // Tests the schedule is finite and ends at or above the floor
    // Verified by removing the floor check
    #[test]
    fn test_schedule_terminates_at_floor() {
        let schedule: Vec<_> = ParameterSchedule::new(&config(95, 5, 1)).collect();

        assert_eq!(schedule.len(), 25);
        assert_eq!(schedule.last().map(|(_, p)| p.scale), Some(5));

        let raised_floor: Vec<_> = ParameterSchedule::new(&config(95, 5, 20)).collect();
        assert_eq!(raised_floor.last().map(|(_, p)| p.scale), Some(20));
    }

    // Tests a minimum quality of 100 goes straight to downscaling
    // Verified by allowing quality 99 in the quality phase
    #[test]
    fn test_full_min_quality_skips_to_scale() {
        let phases: Vec<_> = ParameterSchedule::new(&config(100, 50, 1))
            .map(|(phase, p)| (phase, p.quality, p.scale))
            .collect();

        assert_eq!(
            phases,
            vec![(Phase::Quality, 100, 100), (Phase::Scale, 100, 50)]
        );
    }

    // Tests the exact size hint matches the attempt budget as items are consumed
    // Verified by omitting scale attempts from size_hint
    #[test]
    fn test_len_tracks_remaining_attempts() {
        let cfg = config(97, 20, 1);
        let mut schedule = ParameterSchedule::new(&cfg);
        assert_eq!(schedule.len(), cfg.attempt_budget());

        let mut remaining = schedule.len();
        while schedule.next().is_some() {
            remaining -= 1;
            assert_eq!(schedule.len(), remaining);
        }
        assert_eq!(schedule.phase(), None);
    }

    // Tests the phase accessor follows the transition
    // Verified by never switching phase
    #[test]
    fn test_phase_transition() {
        let mut schedule = ParameterSchedule::new(&config(99, 10, 1));
        assert_eq!(schedule.phase(), Some(Phase::Quality));
        schedule.next();
        assert_eq!(schedule.phase(), Some(Phase::Quality));
        schedule.next();
        assert_eq!(schedule.phase(), Some(Phase::Scale));
    }
}
