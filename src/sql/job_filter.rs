use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::filter_where::FilterWhere;
use super::types::SqlResult;

/// Optional criteria for listing jobs. Columns are qualified with the `j`
/// alias used by the job listing query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    /// Only `true` narrows the listing; `false` behaves like absent.
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn where_clause(&self) -> SqlResult {
        let mut w = FilterWhere::new();
        if let Some(title) = &self.title {
            w.condition("j.title ILIKE", format!("%{}%", title));
        }
        if let Some(min) = self.min_salary {
            w.condition("j.salary >=", min);
        }
        if self.has_equity == Some(true) {
            w.condition("j.equity >", Decimal::ZERO);
        }
        w.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlParam;

    #[test]
    fn no_criteria() {
        assert_eq!(JobFilter::default().where_clause(), SqlResult::default());
    }

    #[test]
    fn has_equity_false_is_no_filter() {
        let filter = JobFilter { has_equity: Some(false), ..Default::default() };
        assert_eq!(filter.where_clause(), JobFilter::default().where_clause());
    }

    #[test]
    fn all_criteria_in_fixed_order() {
        let filter = JobFilter {
            has_equity: Some(true),
            min_salary: Some(300),
            title: Some("job".into()),
        };
        let res = filter.where_clause();
        assert_eq!(
            res.query,
            " WHERE j.title ILIKE $1 AND j.salary >= $2 AND j.equity > $3"
        );
        assert_eq!(
            res.params,
            vec![SqlParam::from("%job%"), SqlParam::from(300), SqlParam::from(Decimal::ZERO)]
        );
    }

    #[test]
    fn equity_alone_is_first_placeholder() {
        let filter = JobFilter { has_equity: Some(true), ..Default::default() };
        assert_eq!(filter.where_clause().query, " WHERE j.equity > $1");
    }
}
