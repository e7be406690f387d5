//! Recipe documents and the append-only merge

use super::CompositionError;
use serde_yaml::{Mapping, Value};

/// Key holding the ordered recipe list in every fragment
pub const RECIPE_LIST_KEY: &str = "recipeList";

/// A parsed recipe document. Key order is preserved on serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDocument {
    fields: Mapping,
}

impl RecipeDocument {
    pub fn parse(source: &str, origin: &str) -> Result<Self, CompositionError> {
        let value: Value =
            serde_yaml::from_str(source).map_err(|e| CompositionError::InvalidDocument {
                origin: origin.to_string(),
                message: e.to_string(),
            })?;

        match value {
            Value::Mapping(fields) => Ok(Self { fields }),
            _ => Err(CompositionError::InvalidDocument {
                origin: origin.to_string(),
                message: "top level is not a mapping".to_string(),
            }),
        }
    }

    /// Entries stored under `key`, if it holds a sequence
    pub fn entries(&self, key: &str) -> Option<&[Value]> {
        match self.fields.get(key) {
            Some(Value::Sequence(seq)) => Some(seq.as_slice()),
            _ => None,
        }
    }

    /// Recipe names under [`RECIPE_LIST_KEY`]. A configured entry
    /// (`- org.acme.Recipe: {option: 1}`) contributes its single key.
    pub fn recipe_names(&self) -> Vec<String> {
        self.entries(RECIPE_LIST_KEY)
            .unwrap_or_default()
            .iter()
            .filter_map(entry_name)
            .collect()
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Returns a copy whose `name` is `name`
    pub fn with_name(&self, name: &str) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(Value::from("name"), Value::from(name));
        Self { fields }
    }

    /// Appends `fragment`'s entries under `key` to a copy of `self`.
    ///
    /// Base entries come first, fragment entries follow in their own order.
    /// Nothing is deduplicated. Neither input is modified.
    ///
    /// # Errors
    ///
    /// `CompositionError::MissingKey` if either document lacks `key` as a sequence
    pub fn merge(&self, fragment: &RecipeDocument, key: &str) -> Result<Self, CompositionError> {
        let base_entries = self
            .entries(key)
            .ok_or_else(|| CompositionError::MissingKey {
                key: key.to_string(),
                document: "base".to_string(),
            })?;
        let fragment_entries =
            fragment
                .entries(key)
                .ok_or_else(|| CompositionError::MissingKey {
                    key: key.to_string(),
                    document: fragment.name().unwrap_or("fragment").to_string(),
                })?;

        let mut merged = Vec::with_capacity(base_entries.len() + fragment_entries.len());
        merged.extend_from_slice(base_entries);
        merged.extend_from_slice(fragment_entries);

        let mut fields = self.fields.clone();
        fields.insert(Value::from(key), Value::Sequence(merged));
        Ok(Self { fields })
    }

    pub fn to_yaml(&self) -> Result<String, CompositionError> {
        serde_yaml::to_string(&self.fields).map_err(|e| CompositionError::Serialize(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, CompositionError> {
        serde_json::to_string_pretty(&self.fields)
            .map_err(|e| CompositionError::Serialize(e.to_string()))
    }
}

fn entry_name(entry: &Value) -> Option<String> {
    match entry {
        Value::String(name) => Some(name.clone()),
        Value::Mapping(map) if map.len() == 1 => map
            .keys()
            .next()
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
