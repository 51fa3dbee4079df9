pub mod types;
pub mod error;
pub mod partial_update;
pub mod filter_where;
pub mod company_filter;
pub mod job_filter;

pub use types::*;
pub use error::ClauseError;
pub use partial_update::{sql_for_partial_update, ColumnMap, PartialUpdate, UpdateData};
pub use filter_where::FilterWhere;
pub use company_filter::CompanyFilter;
pub use job_filter::JobFilter;
