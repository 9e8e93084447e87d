//! celloapi - drive the Cello v2 genetic-circuit compiler from Rust
//!
//! The compiler runs in a container and communicates only through files.
//! This crate prepares its inputs, launches it, and turns its loosely
//! structured output into typed results:
//!
//! - [`relaxed`] repairs the compiler's almost-JSON
//! - [`results`] loads an output directory into a [`CelloResult`] with
//!   repressor and circuit scores
//! - [`query`] describes and launches a run, and prunes input-signal files
//! - [`sweep`] compiles every chassis and signal combination and keeps
//!   each outcome

pub mod config;
pub mod error;
pub mod query;
pub mod relaxed;
pub mod results;
pub mod sweep;

pub use error::{CelloError, Result, ScoreError, ScoreFailure};
pub use query::{CelloQuery, QueryConfig};
pub use results::{CelloResult, ResultOptions, ScanDirection};
