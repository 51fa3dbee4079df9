use serde::{Deserialize, Serialize};

use super::error::ClauseError;
use super::filter_where::FilterWhere;
use super::types::SqlResult;

/// Optional criteria for listing companies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    /// Case-insensitive substring of the company name.
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// Build the `WHERE` fragment. The min/max check runs before anything else.
    pub fn where_clause(&self) -> Result<SqlResult, ClauseError> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(ClauseError::InvalidEmployeeRange { min, max });
            }
        }

        let mut w = FilterWhere::new();
        if let Some(name) = &self.name {
            w.condition("name ILIKE", format!("%{}%", name));
        }
        if let Some(min) = self.min_employees {
            w.condition("num_employees >=", min);
        }
        if let Some(max) = self.max_employees {
            w.condition("num_employees <=", max);
        }
        Ok(w.build())
    }
}
