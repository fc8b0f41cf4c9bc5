//! Output line abstraction.
//!
//! The engine never touches hardware. Everything it emits goes through a
//! [`ToneDriver`]: a single binary output plus two blocking sleeps. Pulses are
//! always issued as `high → sleep(on) → low → sleep(off)`.

use std::fmt;

/// Identifier of the physical output line a driver is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputPin(pub u8);

impl fmt::Display for OutputPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pin {}", self.0)
    }
}

/// Binary output line with blocking timing primitives.
pub trait ToneDriver {
    /// Drives the line high (`true`) or low (`false`).
    fn set_output(&mut self, high: bool);

    /// Blocks for `us` microseconds.
    fn sleep_micros(&mut self, us: u32);

    /// Blocks for `ms` milliseconds.
    fn sleep_millis(&mut self, ms: u32);

    /// Binds the driver to `pin` and leaves the line low.
    ///
    /// Called once when a [`crate::Chirpmaker`] is constructed.
    fn configure_output(&mut self, _pin: OutputPin) {
        self.set_output(false);
    }

    /// Emits one square-wave period.
    fn pulse(&mut self, on_us: u32, off_us: u32) {
        self.set_output(true);
        self.sleep_micros(on_us);
        self.set_output(false);
        self.sleep_micros(off_us);
    }
}

impl<D: ToneDriver + ?Sized> ToneDriver for &mut D {
    fn set_output(&mut self, high: bool) {
        (**self).set_output(high);
    }

    fn sleep_micros(&mut self, us: u32) {
        (**self).sleep_micros(us);
    }

    fn sleep_millis(&mut self, ms: u32) {
        (**self).sleep_millis(ms);
    }

    fn configure_output(&mut self, pin: OutputPin) {
        (**self).configure_output(pin);
    }

    fn pulse(&mut self, on_us: u32, off_us: u32) {
        (**self).pulse(on_us, off_us);
    }
}

/// One recorded driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent {
    /// `set_output` call.
    Output { high: bool },
    /// `sleep_micros` call.
    SleepMicros { us: u32 },
    /// `sleep_millis` call.
    SleepMillis { ms: u32 },
}

/// Driver that records every call instead of toggling hardware.
///
/// Sleeping is free, so whole concerts can be replayed in tests and the
/// exact call order inspected afterwards.
#[derive(Debug, Default, Clone)]
pub struct RecordingDriver {
    pin: Option<OutputPin>,
    events: Vec<ToneEvent>,
}

impl RecordingDriver {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin bound through [`ToneDriver::configure_output`], if any.
    pub fn pin(&self) -> Option<OutputPin> {
        self.pin
    }

    /// All calls recorded so far, in order.
    pub fn events(&self) -> &[ToneEvent] {
        &self.events
    }

    /// Drops recorded calls.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Reassembles `(on_us, off_us)` pairs from the recorded pulse pattern.
    ///
    /// A pulse is a `high, sleep, low, sleep` sequence; anything else is skipped.
    pub fn pulses(&self) -> Vec<(u32, u32)> {
        self.events
            .windows(4)
            .filter_map(|w| match w {
                [ToneEvent::Output { high: true }, ToneEvent::SleepMicros { us: on }, ToneEvent::Output { high: false }, ToneEvent::SleepMicros { us: off }] => {
                    Some((*on, *off))
                }
                _ => None,
            })
            .collect()
    }

    /// Millisecond pauses in order.
    pub fn pauses(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ToneEvent::SleepMillis { ms } => Some(*ms),
                _ => None,
            })
            .collect()
    }

    /// Sum of all sleeps in microseconds.
    pub fn elapsed_us(&self) -> u64 {
        self.events
            .iter()
            .map(|event| match event {
                ToneEvent::SleepMicros { us } => *us as u64,
                ToneEvent::SleepMillis { ms } => *ms as u64 * 1000,
                ToneEvent::Output { .. } => 0,
            })
            .sum()
    }

    /// Issues the recorded calls, in order, on another driver.
    pub fn replay<D: ToneDriver + ?Sized>(&self, driver: &mut D) {
        for event in &self.events {
            match *event {
                ToneEvent::Output { high } => driver.set_output(high),
                ToneEvent::SleepMicros { us } => driver.sleep_micros(us),
                ToneEvent::SleepMillis { ms } => driver.sleep_millis(ms),
            }
        }
    }

    /// Line state after the last recorded call (`false` when nothing was recorded).
    pub fn is_high(&self) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|event| match event {
                ToneEvent::Output { high } => Some(*high),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl ToneDriver for RecordingDriver {
    fn set_output(&mut self, high: bool) {
        self.events.push(ToneEvent::Output { high });
    }

    fn sleep_micros(&mut self, us: u32) {
        self.events.push(ToneEvent::SleepMicros { us });
    }

    fn sleep_millis(&mut self, ms: u32) {
        self.events.push(ToneEvent::SleepMillis { ms });
    }

    fn configure_output(&mut self, pin: OutputPin) {
        self.pin = Some(pin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pulse_pattern() {
        let mut driver = RecordingDriver::new();
        driver.pulse(300, 700);

        assert_eq!(
            driver.events(),
            &[
                ToneEvent::Output { high: true },
                ToneEvent::SleepMicros { us: 300 },
                ToneEvent::Output { high: false },
                ToneEvent::SleepMicros { us: 700 },
            ]
        );
        assert_eq!(driver.pulses(), vec![(300, 700)]);
        assert!(!driver.is_high());
    }

    #[test]
    fn test_configure_binds_pin_without_events() {
        let mut driver = RecordingDriver::new();
        driver.configure_output(OutputPin(4));

        assert_eq!(driver.pin(), Some(OutputPin(4)));
        assert!(driver.events().is_empty());
    }

    #[test]
    fn test_elapsed_and_pauses() {
        let mut driver = RecordingDriver::new();
        driver.pulse(250, 250);
        driver.sleep_millis(20);
        driver.pulse(100, 400);

        assert_eq!(driver.pauses(), vec![20]);
        assert_eq!(driver.elapsed_us(), 500 + 20_000 + 500);
        assert_eq!(driver.pulses(), vec![(250, 250), (100, 400)]);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn emit<D: ToneDriver>(mut driver: D) {
            driver.configure_output(OutputPin(7));
            driver.pulse(1, 2);
            driver.sleep_millis(3);
        }

        let mut driver = RecordingDriver::new();
        emit(&mut driver);

        assert_eq!(driver.pin(), Some(OutputPin(7)));
        assert_eq!(driver.events().len(), 5);
    }

    #[test]
    fn test_replay_reproduces_calls() {
        let mut source = RecordingDriver::new();
        source.pulse(120, 80);
        source.sleep_millis(15);

        let mut copy = RecordingDriver::new();
        source.replay(&mut copy);
        assert_eq!(copy.events(), source.events());
    }
}
