pub mod report;
pub mod schedule;
pub mod status;
pub mod trade;
