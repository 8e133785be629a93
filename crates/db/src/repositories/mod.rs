pub mod report_repo;
pub mod schedule_repo;
pub mod trade_repo;

pub use report_repo::ReportRepo;
pub use schedule_repo::ScheduleRepo;
pub use trade_repo::TradeRepo;
