use crate::utils::error::{RatingError, Result};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks that every key appears once and returns the set of keys seen.
pub fn validate_unique<K, I>(field_name: &str, items: I, reason: &str) -> Result<HashSet<K>>
where
    K: Eq + Hash + Display,
    I: IntoIterator<Item = K>,
{
    let mut seen = HashSet::new();
    for item in items {
        if seen.contains(&item) {
            return Err(RatingError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: item.to_string(),
                reason: reason.to_string(),
            });
        }
        seen.insert(item);
    }
    Ok(seen)
}

pub fn validate_reference<K>(field_name: &str, key: &K, known: &HashSet<K>) -> Result<()>
where
    K: Eq + Hash + Display,
{
    if !known.contains(key) {
        return Err(RatingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: key.to_string(),
            reason: "Referenced value is not defined".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| RatingError::MissingConfigError {
        field: field_name.to_string(),
    })
}
