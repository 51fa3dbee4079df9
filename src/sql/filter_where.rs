use super::types::{SqlParam, SqlResult};

/// Accumulates `AND`-joined predicates and their positional parameters.
pub struct FilterWhere {
    param_values: Vec<SqlParam>,
    conditions: Vec<String>,
}

impl FilterWhere {
    pub fn new() -> Self {
        Self {
            param_values: vec![],
            conditions: vec![],
        }
    }

    /// Push `<lhs> $N` where `$N` binds `value`.
    pub fn condition(&mut self, lhs: &str, value: impl Into<SqlParam>) -> &mut Self {
        let placeholder = self.param(value.into());
        self.conditions.push(format!("{} {}", lhs, placeholder));
        self
    }

    /// ` WHERE a AND b` (leading space included) or an empty string.
    pub fn build(self) -> SqlResult {
        let query = if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        };
        SqlResult { query, params: self.param_values }
    }

    fn param(&mut self, value: SqlParam) -> String {
        self.param_values.push(value);
        format!("${}", self.param_values.len())
    }
}

impl Default for FilterWhere {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_where() {
        let res = FilterWhere::new().build();
        assert_eq!(res.query, "");
        assert!(res.params.is_empty());
    }

    #[test]
    fn numbers_placeholders_in_push_order() {
        let mut w = FilterWhere::new();
        w.condition("a >=", 1).condition("b ILIKE", "%x%");
        let res = w.build();
        assert_eq!(res.query, " WHERE a >= $1 AND b ILIKE $2");
        assert_eq!(res.params, vec![SqlParam::from(1), SqlParam::from("%x%")]);
    }
}
