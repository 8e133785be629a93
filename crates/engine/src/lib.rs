//! Report generation and scheduling engine.
//!
//! Orchestrates the report lifecycle: validate the request, persist a
//! `generating` record, build the payload, encode it, write the file,
//! and terminalize the record. Also creates recurring schedules with a
//! computed next execution.

pub mod builders;
pub mod generator;
pub mod scheduler;
pub mod storage;

pub use generator::{generate, GenerateError};
pub use scheduler::{create_schedule, ScheduleError};
pub use storage::ReportStore;
