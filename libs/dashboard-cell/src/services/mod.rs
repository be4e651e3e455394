pub mod dashboard;
pub mod filter;
pub mod stats;

pub use dashboard::DashboardService;
pub use filter::FilterEngine;
pub use stats::StatisticsService;
