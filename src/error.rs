use std::fmt::{self, Display};

/// Result type returned by every checked entry point of this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition violations detected before (or instead of) solving.
///
/// All of these are caller bugs: the input is rejected as a whole and no partial schedule is
/// ever produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// job `id` has a negative value of attribute `attr`
    NegativeAttribute { id: usize, attr: &'static str },
    /// job `id` appears more than once in the job set or schedule
    DuplicateJob { id: usize },
    /// given order is not a permutation of `0..n`
    NotAPermutation { n: usize, reason: String },
    /// priority weights must be finite and non-negative
    InvalidWeights { w_r: f64, w_p: f64, w_q: f64 },
    /// a completion time or objective value does not fit the time type
    Overflow,
    /// multi-start driver configured with no priority rule to start from
    NoStarts,
    /// selected scheduler cannot optimize the instance's objective
    Unsupported {
        scheduler: &'static str,
        objective: &'static str,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAttribute { id, attr } => {
                write!(f, "job {id} has negative attribute `{attr}`")
            }
            Self::DuplicateJob { id } => write!(f, "job {id} occurs more than once"),
            Self::NotAPermutation { n, reason } => {
                write!(f, "order is not a permutation of 0..{n}: {reason}")
            }
            Self::InvalidWeights { w_r, w_p, w_q } => write!(
                f,
                "priority weights (w_r={w_r}, w_p={w_p}, w_q={w_q}) must be finite and non-negative"
            ),
            Self::Overflow => write!(f, "value does not fit the time type"),
            Self::NoStarts => write!(f, "multi-start needs at least one priority rule"),
            Self::Unsupported {
                scheduler,
                objective,
            } => write!(f, "scheduler `{scheduler}` does not optimize {objective}"),
        }
    }
}

impl std::error::Error for Error {}
