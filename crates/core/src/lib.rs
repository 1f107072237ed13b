//! Core of the long-polling job service.
//!
//! Holds the in-memory job registry, the execution engine that runs work
//! units on a bounded worker pool, and the handle type that carries a
//! job's single outcome. Nothing here knows about HTTP.

pub mod engine;
pub mod error;
pub mod handle;
pub mod job;
pub mod registry;
pub mod types;
pub mod work;

pub use engine::ExecutionEngine;
pub use error::{CoreError, WorkUnitError};
pub use handle::JobHandle;
pub use job::{JobOutcome, JobState};
pub use registry::JobRegistry;
pub use work::{SleepingWorkUnit, WorkFuture, WorkResult, WorkUnit};
