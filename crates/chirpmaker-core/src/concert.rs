//! Bird voice dispatcher.
//!
//! [`Chirpmaker`] owns one output line, a random source and a profile
//! registry. It plays single chirps and phasers, single bird voices by id or
//! name, and concerts of randomly chosen voices.

use log::info;

use crate::driver::{OutputPin, ToneDriver};
use crate::engine::{self, Action, ChirpSpec, PhaserSpec};
use crate::error::ChirpResult;
use crate::registry::Registry;
use crate::rng::RandomSource;
use crate::scale::FrequencyScale;

/// Pause after a named voice such as [`Chirpmaker::cuckoo`].
pub const NAMED_VOICE_PAUSE_MS: u32 = 20;

/// Chirp synthesizer bound to one output line.
#[derive(Debug)]
pub struct Chirpmaker<D, R> {
    pin: OutputPin,
    driver: D,
    rng: R,
    registry: Registry,
}

impl<D: ToneDriver, R: RandomSource> Chirpmaker<D, R> {
    /// Binds `driver` to `pin` and uses the built-in registry.
    pub fn new(pin: OutputPin, mut driver: D, rng: R) -> Self {
        driver.configure_output(pin);
        Self {
            pin,
            driver,
            rng,
            registry: Registry::builtin(),
        }
    }

    /// Replaces the profile registry.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Output line this instance drives.
    pub fn pin(&self) -> OutputPin {
        self.pin
    }

    /// Profile registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the underlying driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Splits into driver and random source.
    pub fn into_parts(self) -> (D, R) {
        (self.driver, self.rng)
    }

    /// Plays a frequency sweep.
    pub fn chirp(&mut self, spec: &ChirpSpec) -> ChirpResult<()> {
        engine::chirp(&mut self.driver, spec)
    }

    /// Plays a duty-cycle sweep.
    pub fn phaser(&mut self, spec: &PhaserSpec) -> ChirpResult<()> {
        engine::phaser(&mut self.driver, spec)
    }

    /// Plays profile `id`, then pauses for `pause_ms`.
    ///
    /// Fails without touching the driver if `id` is outside the registry.
    pub fn bird_voice(&mut self, id: usize, pause_ms: u32) -> ChirpResult<()> {
        self.sing_id(id)?;
        self.driver.sleep_millis(pause_ms);
        Ok(())
    }

    /// Plays the profile called `name`, then pauses for `pause_ms`.
    pub fn sing(&mut self, name: &str, pause_ms: u32) -> ChirpResult<()> {
        let (id, _) = self.registry.find(name)?;
        self.bird_voice(id, pause_ms)
    }

    /// One voice per registry entry, each picked at random, then one pause.
    ///
    /// Returns the ids in the order they sang.
    pub fn bird_concert(&mut self, pause_ms: u32) -> ChirpResult<Vec<usize>> {
        self.bird_concert_of(self.registry.len(), pause_ms)
    }

    /// `count` randomly picked voices, then one pause. Repeats are allowed.
    ///
    /// All ids are drawn first, then every voice is planned. If any voice
    /// fails to plan, nothing is played.
    pub fn bird_concert_of(&mut self, count: usize, pause_ms: u32) -> ChirpResult<Vec<usize>> {
        let sung: Vec<usize> = (0..count)
            .map(|_| self.rng.pick_index(self.registry.len()))
            .collect();

        let mut actions = Vec::new();
        for &id in &sung {
            let profile = self.registry.get(id)?;
            actions.extend(profile.plan(&mut self.rng)?);
        }
        actions.push(Action::Pause { ms: pause_ms });

        info!("concert of {} voices on {}: {:?}", sung.len(), self.pin, sung);
        engine::play(&mut self.driver, &actions);
        Ok(sung)
    }

    /// Built-in cuckoo call.
    pub fn cuckoo(&mut self) -> ChirpResult<()> {
        self.sing("cuckoo", NAMED_VOICE_PAUSE_MS)
    }

    /// Built-in raven call.
    pub fn raven(&mut self) -> ChirpResult<()> {
        self.sing("raven", NAMED_VOICE_PAUSE_MS)
    }

    /// Built-in chaffinch call.
    pub fn chaffinch(&mut self) -> ChirpResult<()> {
        self.sing("chaffinch", NAMED_VOICE_PAUSE_MS)
    }

    /// Built-in blackbird call.
    pub fn blackbird(&mut self) -> ChirpResult<()> {
        self.sing("blackbird", NAMED_VOICE_PAUSE_MS)
    }

    /// Rising then falling fanfare between 440 and 1320 Hz.
    pub fn signet(&mut self) -> ChirpResult<()> {
        let rise = ChirpSpec::new(440.0, 1320.0, 6, FrequencyScale::Cosine2Pi)
            .periods(300)
            .pause_ms(1000);
        let fall = ChirpSpec::new(1320.0, 440.0, 6, FrequencyScale::Cosine2Pi)
            .periods(300)
            .pause_ms(3000);
        let mut actions = rise.plan()?;
        actions.extend(fall.plan()?);
        engine::play(&mut self.driver, &actions);
        Ok(())
    }

    /// Telephone ring, `n_times` bursts.
    pub fn phone_call(&mut self, n_times: u32) -> ChirpResult<()> {
        let ring = ChirpSpec::new(667.0, 557.0, 2, FrequencyScale::SinePi)
            .periods(20)
            .chirps(n_times)
            .pause_ms(20);
        self.chirp(&ring)
    }

    fn sing_id(&mut self, id: usize) -> ChirpResult<()> {
        let profile = self.registry.get(id)?;
        info!("bird {} ({}) is singing on {}", id, profile.name, self.pin);
        profile.perform(&mut self.driver, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{RecordingDriver, ToneEvent};
    use crate::error::ChirpError;
    use crate::rng::create_rng;
    use rand_pcg::Pcg32;

    fn maker(seed: u32) -> Chirpmaker<RecordingDriver, Pcg32> {
        Chirpmaker::new(OutputPin(4), RecordingDriver::new(), create_rng(seed))
    }

    #[test]
    fn test_new_binds_pin() {
        let maker = maker(1);
        assert_eq!(maker.pin(), OutputPin(4));
        assert_eq!(maker.driver().pin(), Some(OutputPin(4)));
        assert!(maker.driver().events().is_empty());
    }

    #[test]
    fn test_bird_voice_out_of_range_is_silent() {
        let mut maker = maker(1);
        let err = maker.bird_voice(15, 100).unwrap_err();

        assert!(matches!(err, ChirpError::UnknownProfile { id: 15, count: 15 }));
        assert!(maker.driver().events().is_empty());
    }

    #[test]
    fn test_bird_voice_ends_with_pause() {
        let mut maker = maker(3);
        maker.bird_voice(8, 1234).unwrap();

        let events = maker.driver().events();
        assert_eq!(events.last(), Some(&ToneEvent::SleepMillis { ms: 1234 }));
        // bird8: 6 steps x 10 periods x 5 chirps
        assert_eq!(maker.driver().pulses().len(), 300);
        assert!(!maker.driver().is_high());
    }

    #[test]
    fn test_sing_unknown_name() {
        let mut maker = maker(1);
        assert!(matches!(
            maker.sing("dodo", 0),
            Err(ChirpError::ProfileNotFound { .. })
        ));
        assert!(maker.driver().events().is_empty());
    }

    #[test]
    fn test_cuckoo_shape() {
        let mut maker = maker(1);
        maker.cuckoo().unwrap();

        // four repetitions of two notes, then the tail pause and the voice pause
        assert_eq!(
            maker.driver().pauses(),
            vec![200, 830, 200, 830, 200, 830, 200, 830, 300, 20]
        );
        assert_eq!(maker.driver().pulses().len(), 4 * (2 * 46 + 2 * 52));
    }

    #[test]
    fn test_concert_plays_registry_size_voices() {
        let mut maker = maker(9);
        let sung = maker.bird_concert(4321).unwrap();

        assert_eq!(sung.len(), 15);
        assert!(sung.iter().all(|&id| id < 15));
        let concert_pauses = maker
            .driver()
            .pauses()
            .into_iter()
            .filter(|&ms| ms == 4321)
            .count();
        assert_eq!(concert_pauses, 1);
        assert_eq!(
            maker.driver().events().last(),
            Some(&ToneEvent::SleepMillis { ms: 4321 })
        );
    }

    #[test]
    fn test_concert_of_zero() {
        let mut maker = maker(2);
        let sung = maker.bird_concert_of(0, 50).unwrap();
        assert!(sung.is_empty());
        assert_eq!(maker.driver().events(), &[ToneEvent::SleepMillis { ms: 50 }]);
    }

    #[test]
    fn test_signet_and_phone_call() {
        let mut maker = maker(1);
        maker.signet().unwrap();
        assert_eq!(maker.driver().pauses(), vec![1000, 3000]);
        assert_eq!(maker.driver().pulses().len(), 2 * 7 * 300);

        maker.driver_mut().clear();
        maker.phone_call(3).unwrap();
        assert_eq!(maker.driver().pauses(), vec![20, 20, 20]);
        assert_eq!(maker.driver().pulses().len(), 3 * 3 * 20);
    }
}
