use super::error::ClauseError;
use super::types::{is_identifier, quote_identifier, SqlParam};

/// Insertion-ordered field -> value mapping for a partial update.
/// Setting a field twice replaces the value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateData {
    fields: Vec<(String, SqlParam)>,
}

impl UpdateData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<SqlParam>) -> &mut Self {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((field, value)),
        }
        self
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<SqlParam>) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlParam)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Ordered logical -> physical column pairs.
///
/// A strict map is also the allow-list of updatable fields: anything not listed
/// is rejected. A lenient map passes unlisted fields through as the column name.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    columns: &'static [(&'static str, &'static str)],
    strict: bool,
}

impl ColumnMap {
    pub const fn strict(columns: &'static [(&'static str, &'static str)]) -> Self {
        Self { columns, strict: true }
    }

    pub const fn lenient(columns: &'static [(&'static str, &'static str)]) -> Self {
        Self { columns, strict: false }
    }

    pub fn resolve<'a>(&self, field: &'a str) -> Result<&'a str, ClauseError> {
        let column = match self.columns.iter().find(|(logical, _)| *logical == field) {
            Some((_, physical)) => *physical,
            None if self.strict => return Err(ClauseError::UnknownField(field.to_string())),
            None => field,
        };
        if !is_identifier(column) {
            return Err(ClauseError::InvalidColumn(column.to_string()));
        }
        Ok(column)
    }
}

/// `SET` clause body and its values, e.g. `"first_name"=$1, "age"=$2`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    pub set_cols: String,
    pub values: Vec<SqlParam>,
}

impl PartialUpdate {
    /// Placeholder index for the first parameter appended after the values.
    pub fn next_index(&self) -> usize {
        self.values.len() + 1
    }
}

/// Build the assignment clause for a partial update.
///
/// Fails with `NoData` on an empty mapping and with `UnknownField` /
/// `InvalidColumn` when a field does not resolve to a usable column.
pub fn sql_for_partial_update(data: &UpdateData, columns: &ColumnMap) -> Result<PartialUpdate, ClauseError> {
    if data.is_empty() {
        return Err(ClauseError::NoData);
    }

    let mut cols = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());
    for (idx, (field, value)) in data.iter().enumerate() {
        let column = columns.resolve(field)?;
        cols.push(format!("{}=${}", quote_identifier(column), idx + 1));
        values.push(value.clone());
    }

    Ok(PartialUpdate { set_cols: cols.join(", "), values })
}
