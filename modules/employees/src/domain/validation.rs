//! Input normalization and validation rules for employee records.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::contract::model::NewEmployee;

static NIRC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w{3,20}$").expect("static regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));

pub const NIRC_REQUIRED: &str = "nirc is required";
pub const NIRC_FORMAT: &str =
    "nirc must be 3-20 characters long and contain only letters, digits or underscores";
pub const FULL_NAME_REQUIRED: &str = "fullName is required";
pub const EMAIL_FORMAT: &str = "email must be a valid email address";
pub const IDS_REQUIRED: &str = "ids must be a non-empty array";
pub const IDS_NOT_INTEGERS: &str = "ids must contain only integers";
pub const IDS_TOO_MANY: &str = "ids must contain at most 1000 entries";

/// Largest bulk delete accepted in one request; keeps `IN (...)` well under
/// the 65535 bind parameter limit of postgres.
pub const MAX_IDS_PER_DELETE: usize = 1000;

/// Trim every field; blank optional fields become `None`.
pub fn normalize(input: NewEmployee) -> NewEmployee {
    fn non_blank(v: Option<String>) -> Option<String> {
        v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
    }

    NewEmployee {
        nirc: input.nirc.trim().to_owned(),
        full_name: input.full_name.trim().to_owned(),
        position: non_blank(input.position),
        email: non_blank(input.email),
    }
}

/// Check a normalized employee, collecting every violated rule.
pub fn check(input: &NewEmployee) -> Vec<String> {
    let mut errors = Vec::new();

    if input.nirc.is_empty() {
        errors.push(NIRC_REQUIRED.to_owned());
    } else if !is_valid_nirc(&input.nirc) {
        errors.push(NIRC_FORMAT.to_owned());
    }

    if input.full_name.is_empty() {
        errors.push(FULL_NAME_REQUIRED.to_owned());
    }

    if let Some(email) = &input.email {
        if !EMAIL_RE.is_match(email) {
            errors.push(EMAIL_FORMAT.to_owned());
        }
    }

    errors
}

/// ASCII word characters only; `\w` in `regex` is Unicode-aware.
fn is_valid_nirc(nirc: &str) -> bool {
    nirc.is_ascii() && NIRC_RE.is_match(nirc)
}

/// Sort and collapse duplicate ids.
pub fn dedup_ids(mut ids: Vec<i32>) -> Vec<i32> {
    ids.sort_unstable();
    ids.dedup();
    ids
}
