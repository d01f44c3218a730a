//! Data access layer behind the evaluator.
//!
//! The evaluator only builds requests; a [`Backend`] answers them.
//!
//! # Architecture
//!
//! ```text
//! +-------------------+
//! | Evaluator         |  SELECT / INSERT nodes
//! +-------------------+
//!          |
//!          v
//! +-------------------+
//! | Backend Trait     |  select(), insert()
//! +-------------------+
//!          |
//!          v
//! +-------------------+
//! | MemoryBackend     |  filters rows with eval::evaluate
//! +-------------------+
//! ```

mod error;
mod memory;
mod traits;

pub use error::BackendError;
pub use memory::MemoryBackend;
pub use traits::Backend;
