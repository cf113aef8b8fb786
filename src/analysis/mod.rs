//! # Analysis Module
//!
//! Everything computed from classified columns: per-column summaries and the
//! period snapshot, trends across periods, respondent comments, the KPI strip
//! and row sorting for the response table.
pub mod comments;
pub mod kpi;
pub mod sorter;
pub mod stats;
pub mod trend;

pub use comments::collect_comments;
pub use comments::Badge;
pub use comments::BadgeClass;
pub use comments::Comment;
pub use kpi::Kpis;
pub use sorter::sort_rows;
pub use sorter::SortDirection;
pub use sorter::SortState;
pub use stats::summarize_column;
pub use stats::ColumnSummary;
pub use stats::Statistic;
pub use stats::StatisticKind;
pub use stats::StatsSnapshot;
pub use stats::Status;
pub use trend::find_trend;
pub use trend::Direction;
pub use trend::Trend;
