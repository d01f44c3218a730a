//! DSQL evaluation.
//!
//! # Architecture
//!
//! ```text
//! SourceElements ──▶ Evaluator ──▶ Backend
//!                      │   ▲
//!          before/claim│   │after
//!                      ▼   │
//!                   Extensions
//! ```
//!
//! - [`Evaluator`]: walks the AST, one statement at a time
//! - [`Extension`]: hooks that observe or override node handling
//! - [`Context`]: per-run result stack and options
//! - [`evaluate`]: condition semantics shared by backends
//! - [`Value`], [`Scalar`], [`Row`], [`Condition`]: runtime values

mod condition;
mod context;
mod error;
mod extension;
mod interpreter;
mod value;

pub use condition::evaluate;
pub use context::{CLAIM_POLICY_ENV, ClaimPolicy, Context, Options};
pub use error::EvalError;
pub use extension::{Extension, ExtensionError, HookFuture};
pub use interpreter::Evaluator;
pub use value::{Condition, Row, Scalar, Value};
