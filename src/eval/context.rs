//! Evaluation context and options.
//!
//! One [`Context`] exists per `run`. It is threaded by `&mut` through every
//! visit so nested visits share a single result accumulator.

use std::fmt;
use std::str::FromStr;

use super::value::Value;

/// Environment variable read by [`Options::from_env`].
pub const CLAIM_POLICY_ENV: &str = "DSQL_CLAIM_POLICY";

/// How competing extension claims on one node are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimPolicy {
    /// All claim hooks run concurrently; the first to settle successfully
    /// decides. Non-deterministic when several extensions claim the same node.
    #[default]
    Race,
    /// Claim hooks run one at a time in registration order; the first that
    /// claims the node wins.
    Ordered,
}

impl FromStr for ClaimPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "race" => Ok(ClaimPolicy::Race),
            "ordered" => Ok(ClaimPolicy::Ordered),
            other => Err(format!("unknown claim policy '{other}'")),
        }
    }
}

impl fmt::Display for ClaimPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimPolicy::Race => write!(f, "race"),
            ClaimPolicy::Ordered => write!(f, "ordered"),
        }
    }
}

/// Evaluator options carried by every [`Context`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub claim_policy: ClaimPolicy,
}

impl Options {
    /// Reads options from the environment, falling back to defaults.
    ///
    /// An unrecognized `DSQL_CLAIM_POLICY` is logged and ignored.
    pub fn from_env() -> Self {
        let mut options = Options::default();
        if let Ok(raw) = std::env::var(CLAIM_POLICY_ENV) {
            match raw.parse() {
                Ok(policy) => options.claim_policy = policy,
                Err(e) => log::warn!("{CLAIM_POLICY_ENV}: {e}, using {}", options.claim_policy),
            }
        }
        options
    }

    /// Sets the claim policy.
    pub fn with_claim_policy(mut self, policy: ClaimPolicy) -> Self {
        self.claim_policy = policy;
        self
    }
}

/// Mutable state for one evaluation run.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// One entry per completed top-level statement, in order.
    pub stack: Vec<Value>,
    pub options: Options,
}

impl Context {
    /// Creates an empty context with the given options.
    pub fn new(options: Options) -> Self {
        Self {
            stack: Vec::new(),
            options,
        }
    }
}
