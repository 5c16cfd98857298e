//! Common error infrastructure for battle-core.
//!
//! Three families of failure exist and each has its own type:
//!
//! - [`CharacterError`]: invalid character parameters, fatal to that construction.
//! - [`ConfigError`]: balance tables the resolver cannot work with.
//! - [`BattleError`]: the caller drove the battle out of order (e.g. acting after
//!   it finished).
//!
//! A rejected action (bad skill index, not enough resource) is *not* an error;
//! it is reported through [`crate::ActionOutcome::Rejected`].

use crate::character::StatKind;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - battle cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all battle-core errors.
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Invalid character parameters rejected at construction time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CharacterError {
    #[error("character name must not be empty")]
    EmptyName,

    #[error("character name is {len} characters long (max {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("{stat} {value} is outside [{min}, {max}]")]
    StatOutOfRange {
        stat: StatKind,
        value: u32,
        min: u32,
        max: u32,
    },
}

impl EngineError for CharacterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "CHARACTER_EMPTY_NAME",
            Self::NameTooLong { .. } => "CHARACTER_NAME_TOO_LONG",
            Self::StatOutOfRange { .. } => "CHARACTER_STAT_OUT_OF_RANGE",
        }
    }
}

/// Balance tables that fail validation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("elemental advantage multiplier must be greater than 1.0 (got {0})")]
    AdvantageNotAboveOne(f64),

    #[error("elemental disadvantage multiplier must be in (0.0, 1.0) (got {0})")]
    DisadvantageOutOfRange(f64),

    #[error("critical multiplier must be at least 1.0 (got {0})")]
    CritMultiplierBelowOne(f64),

    #[error("{name} must be a percentage in [0, 100] (got {value})")]
    ChanceOutOfRange { name: &'static str, value: f64 },

    #[error("{0} must be non-zero")]
    ZeroDivisor(&'static str),

    #[error("battle log capacity must be non-zero")]
    ZeroLogCapacity,

    #[error("{name} must be at least 1 turn (got {value})")]
    NonPositiveDuration { name: &'static str, value: i32 },
}

impl EngineError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AdvantageNotAboveOne(_) => "CONFIG_ADVANTAGE",
            Self::DisadvantageOutOfRange(_) => "CONFIG_DISADVANTAGE",
            Self::CritMultiplierBelowOne(_) => "CONFIG_CRIT_MULTIPLIER",
            Self::ChanceOutOfRange { .. } => "CONFIG_CHANCE",
            Self::ZeroDivisor(_) => "CONFIG_ZERO_DIVISOR",
            Self::ZeroLogCapacity => "CONFIG_LOG_CAPACITY",
            Self::NonPositiveDuration { .. } => "CONFIG_DURATION",
        }
    }
}

/// Battle operations invoked in a state that does not allow them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("battle has already been started")]
    AlreadyStarted,

    #[error("battle has not been started")]
    NotStarted,

    #[error("battle is finished; no further turns are processed")]
    Finished,

    #[error("the current turn has already been consumed; call end_turn")]
    TurnConsumed,

    #[error("the current turn has not been taken yet")]
    TurnNotConsumed,
}

impl EngineError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyStarted => "BATTLE_ALREADY_STARTED",
            Self::NotStarted => "BATTLE_NOT_STARTED",
            Self::Finished => "BATTLE_FINISHED",
            Self::TurnConsumed => "BATTLE_TURN_CONSUMED",
            Self::TurnNotConsumed => "BATTLE_TURN_NOT_CONSUMED",
        }
    }
}
