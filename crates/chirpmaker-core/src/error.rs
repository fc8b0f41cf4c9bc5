//! Error types for chirp synthesis.

use thiserror::Error;

/// Result type for chirp operations.
pub type ChirpResult<T> = Result<T, ChirpError>;

/// Errors that can occur while planning or playing chirps.
///
/// Every variant except [`ChirpError::Io`] is a precondition violation and is
/// raised before the first pulse reaches the driver.
#[derive(Debug, Error)]
pub enum ChirpError {
    /// A start/stop/fixed frequency is not a positive, finite number.
    #[error("invalid frequency '{name}': {freq} Hz")]
    InvalidFrequency {
        /// Parameter name.
        name: String,
        /// The invalid frequency.
        freq: f64,
    },

    /// A scale evaluated to a frequency that cannot be played.
    #[error("scale produced degenerate frequency {freq} Hz at step {step}")]
    DegenerateFrequency {
        /// Step index inside the sweep.
        step: u32,
        /// The degenerate frequency.
        freq: f64,
    },

    /// Frequency is finite and positive but its period does not fit in whole microseconds.
    #[error("frequency {freq} Hz has no representable period in microseconds")]
    PeriodOutOfRange {
        /// The offending frequency.
        freq: f64,
    },

    /// Duty cycle outside its allowed range.
    #[error("invalid duty cycle {duty}%: expected {min}..={max}")]
    InvalidDuty {
        /// The invalid duty cycle.
        duty: u32,
        /// Smallest allowed value.
        min: u32,
        /// Largest allowed value.
        max: u32,
    },

    /// Phaser sweep with start above end.
    #[error("invalid duty range: start {start}% is above end {end}%")]
    InvalidDutyRange {
        /// Duty cycle at the start of the sweep.
        start: u32,
        /// Duty cycle at the end of the sweep.
        end: u32,
    },

    /// Profile id outside the registry.
    #[error("unknown bird profile id {id}: registry holds {count} profiles")]
    UnknownProfile {
        /// Requested id.
        id: usize,
        /// Number of profiles in the registry.
        count: usize,
    },

    /// Profile name not present in the registry.
    #[error("no bird profile named '{name}'")]
    ProfileNotFound {
        /// Requested name.
        name: String,
    },

    /// A profile definition is malformed.
    #[error("invalid bird profile '{name}': {message}")]
    InvalidProfile {
        /// Profile name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// I/O error while writing rendered audio.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChirpError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid profile error.
    pub fn invalid_profile(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidProfile {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            ChirpError::InvalidFrequency { .. } => "CHIRP_001",
            ChirpError::DegenerateFrequency { .. } => "CHIRP_002",
            ChirpError::PeriodOutOfRange { .. } => "CHIRP_003",
            ChirpError::InvalidDuty { .. } => "CHIRP_004",
            ChirpError::InvalidDutyRange { .. } => "CHIRP_005",
            ChirpError::UnknownProfile { .. } => "CHIRP_006",
            ChirpError::ProfileNotFound { .. } => "CHIRP_007",
            ChirpError::InvalidProfile { .. } => "CHIRP_008",
            ChirpError::InvalidParameter { .. } => "CHIRP_009",
            ChirpError::Io(_) => "CHIRP_010",
        }
    }

    /// Error category for grouping related errors.
    pub fn category(&self) -> &'static str {
        "chirp"
    }

    /// Returns true for errors caused by caller-supplied values.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, ChirpError::Io(_))
    }
}
