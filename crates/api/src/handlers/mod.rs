//! Request handlers.
//!
//! Handlers delegate to `tradewind_engine` for generation/scheduling and
//! to `tradewind_db` repositories for access operations, mapping errors
//! via [`AppError`](crate::error::AppError).

pub mod reports;
pub mod schedules;
