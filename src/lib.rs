pub mod backend;
pub mod eval;
pub mod sql;
