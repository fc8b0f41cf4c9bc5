//! Chirp and phaser engine integration tests.

use chirpmaker_core::engine::{pulse_count, total_duration_us};
use chirpmaker_core::{
    chirp, phaser, ChirpError, ChirpSpec, FrequencyScale, PhaserSpec, RecordingDriver,
};
use pretty_assertions::assert_eq;

#[test]
fn test_chromatic_chirp_scenario() {
    let mut driver = RecordingDriver::new();
    let spec = ChirpSpec::new(1000.0, 4000.0, 10, FrequencyScale::Chromatic);
    chirp(&mut driver, &spec).unwrap();

    let periods: Vec<u32> = driver.pulses().iter().map(|(on, off)| on + off).collect();
    assert_eq!(periods, vec![1000, 871, 758, 660, 574, 500, 435, 379, 330, 287, 250]);
    for (on, off) in driver.pulses() {
        assert!(on.abs_diff(off) <= 1, "{on} vs {off}");
    }
    assert_eq!(driver.pauses(), vec![0]);
    assert!(!driver.is_high());
}

#[test]
fn test_chromatic_ratio_is_constant() {
    let freqs = FrequencyScale::Chromatic.sweep(440.0, 1760.0, 24);
    let first = freqs[1] / freqs[0];
    for pair in freqs.windows(2) {
        assert!((pair[1] / pair[0] - first).abs() < 1e-9);
    }
}

#[test]
fn test_scale_start_points() {
    let (a, b, n) = (800.0, 2400.0, 12);
    for scale in [
        FrequencyScale::Linear,
        FrequencyScale::Chromatic,
        FrequencyScale::SinePi,
        FrequencyScale::AtanPi,
        FrequencyScale::Atan2Pi,
    ] {
        let f0 = scale.frequency_at(0, a, b, n);
        assert!(((f0 - a) / a).abs() < 1e-9, "{scale}: {f0}");
    }

    let fm = (a + b) / 2.0;
    assert!((FrequencyScale::Sine2Pi.frequency_at(0, a, b, n) - fm).abs() < 1e-9);
    assert!((FrequencyScale::Linear.frequency_at(n, a, b, n) - b).abs() < 1e-9);
    assert!((FrequencyScale::Chromatic.frequency_at(n, a, b, n) - b).abs() < 1e-6);
}

#[test]
fn test_periods_split_exactly_for_every_duty() {
    for duty in [1, 17, 50, 63, 99] {
        let spec = ChirpSpec::new(523.0, 3100.0, 7, FrequencyScale::CosinePi).duty(duty);
        let timings = spec.step_timings().unwrap();
        for (step, timing) in timings.iter().enumerate() {
            let freq = FrequencyScale::CosinePi.frequency_at(step as u32, 523.0, 3100.0, 7);
            assert_eq!(timing.on_us + timing.off_us, (1e6 / freq).round() as u32);
            assert_eq!(timing.on_us, timing.period_us() * duty / 100);
        }
    }
}

#[test]
fn test_repeated_chirp_structure() {
    let spec = ChirpSpec::new(2000.0, 3000.0, 4, FrequencyScale::Linear)
        .periods(3)
        .chirps(2)
        .pause_ms(40);
    let actions = spec.plan().unwrap();

    assert_eq!(pulse_count(&actions), 2 * 5 * 3);
    let mut driver = RecordingDriver::new();
    chirp(&mut driver, &spec).unwrap();
    assert_eq!(driver.pulses().len(), 30);
    assert_eq!(driver.pauses(), vec![40, 40]);
    assert_eq!(driver.elapsed_us(), total_duration_us(&actions));
}

#[test]
fn test_invalid_chirp_emits_nothing() {
    let mut driver = RecordingDriver::new();
    let cases = [
        ChirpSpec::new(0.0, 1000.0, 5, FrequencyScale::Linear),
        ChirpSpec::new(1000.0, -5.0, 5, FrequencyScale::Linear),
        ChirpSpec::new(1000.0, 2000.0, 5, FrequencyScale::Linear).duty(0),
        ChirpSpec::new(1000.0, 2000.0, 5, FrequencyScale::Linear).duty(100),
        ChirpSpec::new(1000.0, 2000.0, 5, FrequencyScale::SincCentered { window: 0 }),
    ];
    for spec in &cases {
        assert!(chirp(&mut driver, spec).unwrap_err().is_precondition());
    }
    assert!(driver.events().is_empty());
}

#[test]
fn test_degenerate_step_aborts_whole_chirp() {
    // the first side lobe pulls the frequency below zero
    let spec = ChirpSpec::new(10000.0, 100.0, 8, FrequencyScale::SincLeading { window: 2 });
    let mut driver = RecordingDriver::new();
    let err = chirp(&mut driver, &spec).unwrap_err();

    assert!(matches!(err, ChirpError::DegenerateFrequency { .. }));
    assert!(driver.events().is_empty());
}

#[test]
fn test_phaser_scenario() {
    let mut driver = RecordingDriver::new();
    let spec = PhaserSpec::new(1000, 0, 100).periods(5);
    phaser(&mut driver, &spec).unwrap();

    let pulses = driver.pulses();
    assert_eq!(pulses.len(), 101 * 5);
    assert_eq!(pulses[0], (0, 1000));
    assert_eq!(pulses[pulses.len() - 1], (1000, 0));
    assert_eq!(pulses[5 * 50], (500, 500));
    assert!(pulses.iter().all(|(on, off)| on + off == 1000));

    let mut settings = pulses.clone();
    settings.dedup();
    assert_eq!(settings.len(), 101);
}

#[test]
fn test_phaser_rejects_bad_duty() {
    let mut driver = RecordingDriver::new();
    assert!(matches!(
        phaser(&mut driver, &PhaserSpec::new(1000, 60, 40)),
        Err(ChirpError::InvalidDutyRange { start: 60, end: 40 })
    ));
    assert!(matches!(
        phaser(&mut driver, &PhaserSpec::new(1000, 0, 101)),
        Err(ChirpError::InvalidDuty { duty: 101, .. })
    ));
    assert!(matches!(
        phaser(&mut driver, &PhaserSpec::new(0, 0, 100)),
        Err(ChirpError::InvalidFrequency { .. })
    ));
    assert!(driver.events().is_empty());
}
