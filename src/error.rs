use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// Result alias used throughout the crate.
pub type SeedResult<T> = Result<T, SeedError>;

/// All validation failures this library can report.
///
/// Every variant is raised before any generator transition runs; a call that
/// returns one of these has not touched any state. Cancellation and an
/// exhausted search are ordinary outcomes ([`RunStatus`], [`SearchOutcome`]),
/// never errors.
///
/// [`RunStatus`]: crate::RunStatus
/// [`SearchOutcome`]: crate::SearchOutcome
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SeedError {
    /// The input text was empty or whitespace only.
    Empty,
    /// The input text is neither a decimal nor a `0x`-prefixed hexadecimal number.
    NonNumeric {
        /// The rejected text.
        input: String,
    },
    /// A raw seed of zero was passed to an API that does not coerce it.
    SeedOutOfRange {
        /// The rejected value.
        value: u32,
    },
    /// A roll count below zero.
    NegativeRollCount {
        /// The rejected value, as written by the caller.
        value: String,
    },
    /// A roll count whose transition total (`2n`) does not fit in a `u64`.
    RollCountTooLarge {
        /// The rejected value, as written by the caller.
        value: String,
        /// The largest accepted roll count.
        max: u64,
    },
    /// An execution mode name that is not `fast`, `normal` or `precise`.
    UnknownMode {
        /// The rejected text.
        input: String,
    },
    /// A direction name that is not `forward` or `backward`.
    UnknownDirection {
        /// The rejected text.
        input: String,
    },
    /// A configuration value outside its valid range.
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// Smallest accepted value.
        min: u64,
        /// Largest accepted value.
        max: u64,
        /// The value that was supplied.
        actual: u64,
    },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Empty => write!(f, "Input is empty."),
            SeedError::NonNumeric { input } => {
                write!(f, "Input {:?} is not a decimal or hexadecimal number.", input)
            }
            SeedError::SeedOutOfRange { value } => {
                write!(
                    f,
                    "Seed {} is out of range: seeds must be between 1 and {}",
                    value,
                    u32::MAX
                )
            }
            SeedError::NegativeRollCount { value } => {
                write!(f, "Roll count {} is negative.", value)
            }
            SeedError::RollCountTooLarge { value, max } => {
                write!(f, "Roll count {} exceeds the maximum of {}", value, max)
            }
            SeedError::UnknownMode { input } => {
                write!(
                    f,
                    "Unknown execution mode {:?}: expected fast, normal or precise",
                    input
                )
            }
            SeedError::UnknownDirection { input } => {
                write!(
                    f,
                    "Unknown direction {:?}: expected forward or backward",
                    input
                )
            }
            SeedError::InvalidConfig {
                field,
                min,
                max,
                actual,
            } => {
                write!(
                    f,
                    "Invalid configuration: {} must be between {} and {}, got {}",
                    field, min, max, actual
                )
            }
        }
    }
}

impl Error for SeedError {}
