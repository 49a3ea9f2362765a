//! Name validation for devfile elements
//!
//! Component names, command ids and project names must be DNS-1123 labels
//! and unique within their collection.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::{Devfile, ElementKind, Error, HasId, Result};

/// Maximum length of a DNS-1123 label.
pub const MAX_NAME_LENGTH: usize = 63;

static DNS1123_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("DNS-1123 pattern is valid")
});

/// Check a single element name.
pub fn validate_name(kind: ElementKind, name: &str) -> Result<()> {
    if name.len() > MAX_NAME_LENGTH {
        return Err(Error::InvalidName {
            kind,
            name: name.to_string(),
            reason: format!("must be at most {MAX_NAME_LENGTH} characters"),
        });
    }
    if !DNS1123_LABEL.is_match(name) {
        return Err(Error::InvalidName {
            kind,
            name: name.to_string(),
            reason: "must consist of lowercase alphanumerics or '-', and start and end with an alphanumeric".into(),
        });
    }
    Ok(())
}

fn validate_collection<T: HasId>(elements: &[T]) -> Result<()> {
    let mut seen = HashSet::new();
    for element in elements {
        validate_name(T::KIND, element.id())?;
        if !seen.insert(element.id()) {
            return Err(Error::DuplicateName {
                kind: T::KIND,
                name: element.id().to_string(),
            });
        }
    }
    Ok(())
}

impl Devfile {
    /// Check every component, command and project name.
    pub fn validate_names(&self) -> Result<()> {
        validate_collection(&self.content.components)?;
        validate_collection(&self.content.commands)?;
        validate_collection(&self.content.projects)?;
        Ok(())
    }
}
