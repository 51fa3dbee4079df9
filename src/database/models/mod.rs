pub mod company;
pub mod job;

pub use company::{Company, CompanyDetail, CompanyJob, CompanyUpdate, NewCompany, COMPANY_COLUMNS};
pub use job::{Job, JobDetail, JobListing, JobUpdate, NewJob, JOB_COLUMNS};

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Per-field problems found while validating an incoming payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(pub HashMap<String, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub(crate) fn check_not_empty(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "must not be empty");
    }
}

/// An explicit `null` for a column that cannot hold one
pub(crate) fn check_required<T>(errors: &mut FieldErrors, field: &str, value: Option<&Option<T>>) {
    if matches!(value, Some(None)) {
        errors.add(field, "must not be null");
    }
}

pub(crate) fn check_non_negative(errors: &mut FieldErrors, field: &str, value: Option<i32>) {
    if matches!(value, Some(v) if v < 0) {
        errors.add(field, "must be zero or greater");
    }
}
