use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{check_non_negative, check_not_empty, check_required, double_option, Company, FieldErrors};
use crate::sql::{ColumnMap, UpdateData};

/// Updatable job fields; they share their column names.
pub const JOB_COLUMNS: ColumnMap = ColumnMap::strict(&[
    ("title", "title"),
    ("salary", "salary"),
    ("equity", "equity"),
]);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// A job row from the listing query, with the owning company's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company: Company,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_not_empty(&mut errors, "title", &self.title);
        check_not_empty(&mut errors, "companyHandle", &self.company_handle);
        check_non_negative(&mut errors, "salary", self.salary);
        check_equity(&mut errors, self.equity);
        errors.into_result()
    }
}

/// Partial job update. `id` and `companyHandle` cannot be expressed here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub equity: Option<Option<Decimal>>,
}

impl JobUpdate {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_required(&mut errors, "title", self.title.as_ref());
        if let Some(title) = self.title.as_ref().and_then(|t| t.as_deref()) {
            check_not_empty(&mut errors, "title", title);
        }
        check_non_negative(&mut errors, "salary", self.salary.flatten());
        check_equity(&mut errors, self.equity.flatten());
        errors.into_result()
    }

    pub fn to_update_data(&self) -> UpdateData {
        let mut data = UpdateData::new();
        if let Some(title) = &self.title {
            data.set("title", title.clone());
        }
        if let Some(salary) = self.salary {
            data.set("salary", salary);
        }
        if let Some(equity) = self.equity {
            data.set("equity", equity);
        }
        data
    }
}

fn check_equity(errors: &mut FieldErrors, equity: Option<Decimal>) {
    if let Some(e) = equity {
        if e < Decimal::ZERO || e > Decimal::ONE {
            errors.add("equity", "must be between 0 and 1");
        }
    }
}
