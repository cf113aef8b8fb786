//! # Column Model Module
//!
//! Semantic column types, the header-driven classifier and the processed
//! [`Table`] that ties a sheet's rows, columns and snapshot together.
pub mod classifier;
pub mod column;
pub mod table;

pub use classifier::classify_columns;
pub use classifier::clean_header;
pub use classifier::detect_type;
pub use column::Column;
pub use column::ColumnType;
pub use table::display_label;
pub use table::Table;
