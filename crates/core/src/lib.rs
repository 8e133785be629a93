//! Pure domain logic for the Tradewind report engine.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the generation engine, and the API without cycles.
//! Everything here is synchronous and side-effect free: request
//! validation, report kind resolution, payload modelling, format
//! encoding, and schedule arithmetic.

pub mod encode;
pub mod error;
pub mod payload;
pub mod report;
pub mod schedule;
pub mod types;
