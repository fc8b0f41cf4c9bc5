//! Ordered registry of bird profiles.
//!
//! Profile ids are the dense indices `0..len()`. A registry is immutable once
//! built.

use serde::Serialize;

use crate::error::{ChirpError, ChirpResult};
use crate::profile::{between, fixed, BirdProfile, ChirpCall, PhaserCall};
use crate::scale::FrequencyScale::*;

/// Third used by the cuckoo, between a minor (1.18) and a major (1.25) third.
const CUCKOO_THIRD: f64 = 1.222;

/// Pitch of the cuckoo's first note (E4 region).
const CUCKOO_HIGH: f64 = 667.0;

/// Ordered, validated collection of bird profiles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registry {
    profiles: Vec<BirdProfile>,
}

impl Registry {
    /// Builds a registry, validating every profile and rejecting duplicate names.
    pub fn new(profiles: Vec<BirdProfile>) -> ChirpResult<Self> {
        if profiles.is_empty() {
            return Err(ChirpError::invalid_param(
                "profiles",
                "registry needs at least one profile",
            ));
        }
        for (index, profile) in profiles.iter().enumerate() {
            profile.validate()?;
            if profiles[..index].iter().any(|p| p.name == profile.name) {
                return Err(ChirpError::invalid_profile(
                    &profile.name,
                    "duplicate profile name",
                ));
            }
        }
        Ok(Self { profiles })
    }

    /// Parses a JSON array of profiles.
    pub fn from_json(json: &str) -> ChirpResult<Self> {
        let profiles: Vec<BirdProfile> = serde_json::from_str(json)
            .map_err(|e| ChirpError::invalid_param("profiles", e.to_string()))?;
        Self::new(profiles)
    }

    /// The fifteen built-in profiles: `bird0`..`bird10`, `cuckoo`, `raven`,
    /// `chaffinch` and `blackbird`.
    pub fn builtin() -> Self {
        Self {
            profiles: builtin_profiles(),
        }
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Always false for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profile with the given id.
    pub fn get(&self, id: usize) -> ChirpResult<&BirdProfile> {
        self.profiles.get(id).ok_or(ChirpError::UnknownProfile {
            id,
            count: self.profiles.len(),
        })
    }

    /// Id and profile for a name.
    pub fn find(&self, name: &str) -> ChirpResult<(usize, &BirdProfile)> {
        self.profiles
            .iter()
            .enumerate()
            .find(|(_, profile)| profile.name == name)
            .ok_or_else(|| ChirpError::ProfileNotFound {
                name: name.to_string(),
            })
    }

    /// Profiles in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BirdProfile)> {
        self.profiles.iter().enumerate()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_profiles() -> Vec<BirdProfile> {
    let cuckoo_low = CUCKOO_HIGH / CUCKOO_THIRD;

    vec![
        BirdProfile::new(
            "bird0",
            vec![
                ChirpCall::new(between(1200, 1900), between(4300, 4500), between(10, 27), between(1, 5), fixed(5), Chromatic)
                    .pause(between(59, 199))
                    .into(),
                ChirpCall::new(between(2000, 2050), between(3200, 3400), between(5, 30), between(2, 15), between(4, 10), AtanPi)
                    .pause(fixed(20))
                    .into(),
                ChirpCall::new(fixed(1500.0), fixed(4500.0), between(50, 100), between(1, 13), between(1, 5), Sine2Pi)
                    .pause(fixed(100))
                    .into(),
            ],
        ),
        BirdProfile::new(
            "bird1",
            vec![
                ChirpCall::new(between(4200, 4400), between(2500, 2800), fixed(100), between(1, 3), between(3, 9), Chromatic)
                    .pause(between(25, 75))
                    .into(),
            ],
        ),
        BirdProfile::new(
            "bird2",
            vec![
                ChirpCall::new(between(3500, 3900), between(5600, 5900), between(3, 7), between(5, 10), fixed(1), Sine2Pi)
                    .pause(between(50, 100))
                    .into(),
                ChirpCall::new(between(5600, 5900), between(3500, 3900), between(6, 15), between(3, 7), fixed(1), Cosine2Pi)
                    .pause(between(50, 100))
                    .into(),
            ],
        ),
        BirdProfile::new(
            "bird3",
            vec![
                ChirpCall::new(between(1280, 1300), between(1310, 1620), fixed(10), between(4, 8), between(2, 9), Linear)
                    .pause(between(100, 200))
                    .into(),
            ],
        ),
        BirdProfile::new(
            "bird4",
            vec![
                ChirpCall::new(fixed(4000.0), fixed(4800.0), fixed(10), fixed(4), between(10, 15), Atan2Pi)
                    .pause(fixed(20))
                    .into(),
                ChirpCall::new(fixed(3500.0), fixed(4300.0), fixed(15), fixed(10), fixed(1), AtanPi)
                    .pause(fixed(20))
                    .into(),
                ChirpCall::new(fixed(3500.0), fixed(3000.0), fixed(25), fixed(10), fixed(1), SinePi)
                    .pause(between(75, 150))
                    .into(),
            ],
        ),
        BirdProfile::new(
            "bird5",
            vec![
                ChirpCall::new(between(4404, 4484), between(4380, 4420), fixed(20), between(1, 4), between(1, 7), Linear)
                    .pause(fixed(250))
                    .into(),
            ],
        ),
        BirdProfile::new(
            "bird6",
            vec![
                ChirpCall::new(between(1000, 1050), between(900, 1200), fixed(20), between(1, 5), between(10, 15), Chromatic)
                    .pause(between(150, 250))
                    .into(),
            ],
        ),
        BirdProfile::new(
            "bird7",
            vec![
                ChirpCall::new(fixed(2600.0), fixed(4400.0), fixed(10), fixed(1), between(5, 9), Chromatic)
                    .pause(between(20, 150))
                    .into(),
            ],
        ),
        BirdProfile::new(
            "bird8",
            vec![
                ChirpCall::new(fixed(1320.0), fixed(3880.0), fixed(5), fixed(10), fixed(5), Sine2Pi)
                    .pause(fixed(100))
                    .into(),
            ],
        ),
        BirdProfile::new(
            "bird9",
            vec![
                PhaserCall::new(between(3500, 3540), between(6, 12), 5, 50, between(3, 15)).into(),
                PhaserCall::new(between(1660, 1800), between(3, 10), 5, 30, between(6, 13))
                    .pause(between(100, 300))
                    .into(),
            ],
        ),
        BirdProfile::new(
            "bird10",
            vec![
                ChirpCall::new(fixed(1440.0), fixed(1880.0), fixed(20), fixed(10), between(1, 9), AtanPi)
                    .duty(5)
                    .pause(fixed(10))
                    .into(),
                ChirpCall::new(fixed(1880.0), fixed(1440.0), fixed(20), fixed(10), between(1, 9), AtanPi)
                    .pause(fixed(30))
                    .into(),
            ],
        ),
        BirdProfile::new(
            "cuckoo",
            vec![
                ChirpCall::new(fixed(CUCKOO_HIGH), fixed(CUCKOO_HIGH), fixed(1), fixed(46), fixed(1), Linear)
                    .pause(fixed(200))
                    .into(),
                ChirpCall::new(fixed(cuckoo_low), fixed(cuckoo_low), fixed(1), fixed(52), fixed(1), Linear)
                    .pause(fixed(830))
                    .into(),
            ],
        )
        .repeat(4)
        .tail_pause(300),
        BirdProfile::new(
            "raven",
            vec![
                ChirpCall::new(fixed(75.0), fixed(65.0), fixed(8), fixed(4), between(2, 6), AtanPi)
                    .duty(20)
                    .pause(fixed(550))
                    .into(),
            ],
        ),
        BirdProfile::new(
            "chaffinch",
            vec![
                ChirpCall::new(fixed(4000.0), fixed(5000.0), fixed(10), between(15, 30), between(1, 9), Chromatic)
                    .pause(between(10, 100))
                    .into(),
                ChirpCall::new(fixed(5000.0), fixed(4000.0), fixed(10), between(15, 50), between(1, 9), Chromatic)
                    .duty(15)
                    .pause(between(10, 30))
                    .into(),
            ],
        ),
        BirdProfile::new(
            "blackbird",
            vec![
                ChirpCall::new(fixed(900.0), fixed(2000.0), between(10, 50), fixed(13), between(1, 4), AtanPi)
                    .pause(fixed(80))
                    .into(),
                ChirpCall::new(fixed(2400.0), fixed(1000.0), between(15, 65), fixed(8), between(1, 3), Sine2Pi)
                    .pause(fixed(80))
                    .into(),
                ChirpCall::new(between(2000, 3000), between(1200, 1500), between(75, 120), between(2, 9), between(1, 4), Cosine2Pi)
                    .pause(fixed(80))
                    .into(),
            ],
        ),
    ]
}
