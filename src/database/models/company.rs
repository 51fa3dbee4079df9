use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{check_non_negative, check_not_empty, check_required, double_option, FieldErrors};
use crate::sql::{ColumnMap, UpdateData};

/// Updatable company fields and their columns. Anything else is rejected.
pub const COMPANY_COLUMNS: ColumnMap = ColumnMap::strict(&[
    ("name", "name"),
    ("description", "description"),
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
]);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A job as listed under its company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CompanyJob {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl NewCompany {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_not_empty(&mut errors, "handle", &self.handle);
        if self.handle.chars().count() > 25 {
            errors.add("handle", "must be at most 25 characters");
        }
        if self.handle != self.handle.to_lowercase() {
            errors.add("handle", "must be lower case");
        }
        check_not_empty(&mut errors, "name", &self.name);
        check_non_negative(&mut errors, "numEmployees", self.num_employees);
        check_logo_url(&mut errors, self.logo_url.as_deref());
        errors.into_result()
    }
}

/// Partial company update. `handle` cannot be expressed here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub logo_url: Option<Option<String>>,
}

impl CompanyUpdate {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_required(&mut errors, "name", self.name.as_ref());
        if let Some(name) = self.name.as_ref().and_then(|n| n.as_deref()) {
            check_not_empty(&mut errors, "name", name);
        }
        check_required(&mut errors, "description", self.description.as_ref());
        check_non_negative(&mut errors, "numEmployees", self.num_employees.flatten());
        check_logo_url(&mut errors, self.logo_url.as_ref().and_then(|u| u.as_deref()));
        errors.into_result()
    }

    pub fn to_update_data(&self) -> UpdateData {
        let mut data = UpdateData::new();
        if let Some(name) = &self.name {
            data.set("name", name.clone());
        }
        if let Some(description) = &self.description {
            data.set("description", description.clone());
        }
        if let Some(num_employees) = self.num_employees {
            data.set("numEmployees", num_employees);
        }
        if let Some(logo_url) = &self.logo_url {
            data.set("logoUrl", logo_url.clone());
        }
        data
    }
}

fn check_logo_url(errors: &mut FieldErrors, logo_url: Option<&str>) {
    if let Some(u) = logo_url {
        if url::Url::parse(u).is_err() {
            errors.add("logoUrl", "must be a valid URL");
        }
    }
}
