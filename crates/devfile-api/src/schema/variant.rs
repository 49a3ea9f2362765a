//! Decoding elements that carry exactly one variant key

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{ElementKind, Error, Result};

/// Decode `fields` as `T`, rejecting elements that declare more than one of
/// `variant_keys`.
///
/// A flattened enum on its own takes the first variant key it meets and
/// drops the others, so the count has to happen on the raw map.
pub(crate) fn decode_single_variant<T: DeserializeOwned>(
    kind: ElementKind,
    key_field: &str,
    variant_keys: &[&str],
    fields: Map<String, Value>,
) -> Result<T> {
    let name = fields
        .get(key_field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let declared: Vec<String> = variant_keys
        .iter()
        .filter(|key| fields.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    if declared.len() > 1 {
        return Err(Error::MultipleVariants {
            kind,
            name,
            variants: declared,
        });
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| Error::InvalidElement {
        kind,
        name,
        message: e.to_string(),
    })
}
