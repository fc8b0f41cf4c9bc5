//! Voice and concert integration tests.

use std::collections::VecDeque;

use chirpmaker_core::profile::{between, fixed};
use chirpmaker_core::{
    create_rng, BirdProfile, ChirpCall, ChirpError, Chirpmaker, FrequencyScale, OutputPin,
    RandomSource, RecordingDriver, Registry, ToneEvent,
};
use pretty_assertions::assert_eq;

/// Hands out queued values and counts every draw.
struct Scripted {
    values: VecDeque<i64>,
    draws: usize,
}

impl Scripted {
    fn new(values: &[i64]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            draws: 0,
        }
    }
}

impl RandomSource for Scripted {
    fn uniform_int(&mut self, lo: i64, hi: i64) -> i64 {
        self.draws += 1;
        self.values.pop_front().unwrap_or(lo).clamp(lo, hi)
    }
}

/// Three profiles without random parameters, told apart by their pause.
fn tagged_registry() -> Registry {
    let profiles = (0..3)
        .map(|i| {
            let call = ChirpCall::new(
                fixed(1000.0),
                fixed(2000.0),
                fixed(2),
                fixed(1),
                fixed(1),
                FrequencyScale::Linear,
            )
            .pause(fixed(100 + i));
            BirdProfile::new(format!("tag{i}"), vec![call.into()])
        })
        .collect();
    Registry::new(profiles).unwrap()
}

#[test]
fn test_out_of_range_voice_touches_nothing() {
    let mut maker = Chirpmaker::new(OutputPin(2), RecordingDriver::new(), create_rng(5));
    for id in [15, 16, 1000] {
        assert!(matches!(
            maker.bird_voice(id, 10),
            Err(ChirpError::UnknownProfile { count: 15, .. })
        ));
    }
    assert!(maker.driver().events().is_empty());
}

#[test]
fn test_every_builtin_voice_plays() {
    let mut maker = Chirpmaker::new(OutputPin(2), RecordingDriver::new(), create_rng(77));
    for id in 0..maker.registry().len() {
        maker.driver_mut().clear();
        maker.bird_voice(id, 5).unwrap();
        assert!(!maker.driver().pulses().is_empty(), "bird {id} was silent");
        assert_eq!(maker.driver().pauses().last(), Some(&5));
        assert!(!maker.driver().is_high());
    }
}

#[test]
fn test_seeded_voice_replays_exactly() {
    let play = |seed| {
        let mut maker = Chirpmaker::new(OutputPin(2), RecordingDriver::new(), create_rng(seed));
        maker.bird_voice(6, 0).unwrap();
        maker.into_parts().0
    };
    assert_eq!(play(123).events(), play(123).events());
}

#[test]
fn test_seeded_concert_replays_exactly() {
    let concert = |seed| {
        let mut maker = Chirpmaker::new(OutputPin(2), RecordingDriver::new(), create_rng(seed));
        let sung = maker.bird_concert(500).unwrap();
        (sung, maker.into_parts().0)
    };

    let (sung_a, driver_a) = concert(2024);
    let (sung_b, driver_b) = concert(2024);
    assert_eq!(sung_a, sung_b);
    assert_eq!(driver_a.events(), driver_b.events());
}

#[test]
fn test_scripted_concert_follows_script() {
    let script = [2, 0, 0, 1, 2];
    let mut maker = Chirpmaker::new(OutputPin(9), RecordingDriver::new(), Scripted::new(&script))
        .with_registry(tagged_registry());

    let sung = maker.bird_concert_of(script.len(), 750).unwrap();

    assert_eq!(sung, vec![2, 0, 0, 1, 2]);
    // each voice pauses with its tag, the concert pause comes once at the end
    assert_eq!(maker.driver().pauses(), vec![102, 100, 100, 101, 102, 750]);
    assert_eq!(
        maker.driver().events().last(),
        Some(&ToneEvent::SleepMillis { ms: 750 })
    );
    let (_, rng) = maker.into_parts();
    assert_eq!(rng.draws, script.len());
}

#[test]
fn test_concert_with_failing_voice_plays_nothing() {
    let steady = ChirpCall::new(
        fixed(1000.0),
        fixed(2000.0),
        fixed(2),
        fixed(1),
        fixed(1),
        FrequencyScale::Linear,
    );
    // clean at 5 and 10 steps, dips below zero at 7
    let dipping = ChirpCall::new(
        fixed(800.0),
        fixed(5000.0),
        between(5, 10),
        fixed(1),
        fixed(1),
        FrequencyScale::SincCentered { window: 2 },
    );
    let registry = Registry::new(vec![
        BirdProfile::new("steady", vec![steady.into()]),
        BirdProfile::new("dipping", vec![dipping.into()]),
    ])
    .unwrap();

    let mut maker = Chirpmaker::new(OutputPin(9), RecordingDriver::new(), Scripted::new(&[0, 1, 7]))
        .with_registry(registry);
    let err = maker.bird_concert_of(2, 999).unwrap_err();

    assert!(matches!(err, ChirpError::DegenerateFrequency { .. }));
    assert!(maker.driver().events().is_empty());
}

#[test]
fn test_concert_length_follows_registry() {
    let mut maker = Chirpmaker::new(OutputPin(9), RecordingDriver::new(), Scripted::new(&[]))
        .with_registry(tagged_registry());
    let sung = maker.bird_concert(0).unwrap();
    assert_eq!(sung, vec![0, 0, 0]);
}

#[test]
fn test_named_voices_resolve_by_name() {
    let mut maker = Chirpmaker::new(OutputPin(1), RecordingDriver::new(), create_rng(3));
    maker.raven().unwrap();
    maker.chaffinch().unwrap();
    maker.blackbird().unwrap();

    assert_eq!(maker.driver().pauses().last(), Some(&20));
    assert_eq!(maker.registry().find("raven").unwrap().0, 12);
    assert_eq!(maker.registry().find("blackbird").unwrap().0, 14);
}

#[test]
fn test_custom_registry_from_json() {
    let json = r#"[
        {
            "name": "wren",
            "calls": [
                {
                    "kind": "chirp",
                    "f_start": [2800, 3200],
                    "f_stop": 4100,
                    "n_steps": 6,
                    "n_periods": [4, 8],
                    "n_chirps": 3,
                    "scale": { "curve": "sine_2pi" },
                    "pause_ms": 15
                },
                {
                    "kind": "phaser",
                    "freq_hz": 2500,
                    "n_periods": 2,
                    "duty_start": 10,
                    "duty_end": 90,
                    "n_chirps": 1
                }
            ],
            "repeat": 2,
            "tail_pause_ms": 40
        }
    ]"#;
    let registry = Registry::from_json(json).unwrap();
    assert_eq!(registry.len(), 1);

    let mut maker = Chirpmaker::new(OutputPin(3), RecordingDriver::new(), create_rng(8))
        .with_registry(registry);
    maker.sing("wren", 60).unwrap();
    assert_eq!(
        maker.driver().pauses(),
        vec![15, 15, 15, 0, 15, 15, 15, 0, 40, 60]
    );
}
