use rust_decimal::Decimal;

/// A positional query parameter. Each variant carries its SQL type so that a
/// NULL still binds as the column's type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(Option<String>),
    Int(Option<i32>),
    Decimal(Option<Decimal>),
    Bool(Option<bool>),
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(Some(v.to_string()))
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(Some(v))
    }
}

impl From<Option<String>> for SqlParam {
    fn from(v: Option<String>) -> Self {
        SqlParam::Text(v)
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(Some(v))
    }
}

impl From<Option<i32>> for SqlParam {
    fn from(v: Option<i32>) -> Self {
        SqlParam::Int(v)
    }
}

impl From<Decimal> for SqlParam {
    fn from(v: Decimal) -> Self {
        SqlParam::Decimal(Some(v))
    }
}

impl From<Option<Decimal>> for SqlParam {
    fn from(v: Option<Decimal>) -> Self {
        SqlParam::Decimal(v)
    }
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        SqlParam::Bool(Some(v))
    }
}

/// A SQL fragment together with the values for its `$N` placeholders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}

/// Quote an identifier that has already passed `is_identifier`.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name)
}

/// Plain SQL identifier: leading letter or underscore, then alphanumerics or underscores.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("num_employees"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("name\"; DROP TABLE companies; --"));
        assert!(!is_identifier("logo-url"));
    }

    #[test]
    fn typed_nulls() {
        assert_eq!(SqlParam::from(None::<i32>), SqlParam::Int(None));
        assert_eq!(SqlParam::from(None::<String>), SqlParam::Text(None));
        assert_ne!(SqlParam::from(0), SqlParam::Int(None));
        assert_eq!(SqlParam::from("x"), SqlParam::Text(Some("x".into())));
    }
}
