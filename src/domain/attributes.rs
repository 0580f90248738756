// Copyright (c) 2025 - Cowboy AI, Inc.
//! Custom Attribute Extraction
//!
//! Hosts and datastores are classified with vSphere-style custom attributes:
//! a set of field definitions (`availableField`, numeric key + name) and the
//! values set on the object (`customValue`, numeric key + value).
//!
//! Lookup distinguishes three outcomes:
//!
//! - [`AttributeLookup::Found`] - the attribute has a string value
//! - [`AttributeLookup::NotSet`] - the attribute is absent from the object
//! - [`AttributeLookup::Failed`] - the attribute store could not be read
//!
//! `NotSet` is a data quality condition that callers may tolerate. `Failed`
//! is an operational fault and must never be folded into `NotSet`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Custom field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldDef {
    pub key: i32,
    pub name: String,
}

/// Value held by a custom field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomValue {
    Text(String),
    /// Anything that is not a string value
    Other(Value),
}

/// Custom field value set on an object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldValue {
    pub key: i32,
    pub value: CustomValue,
}

/// Result of looking up a custom attribute by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeLookup {
    Found(String),
    NotSet,
    Failed(String),
}

/// Custom attribute store of a managed object
///
/// `available_fields` is `None` when the property was not retrieved, which
/// happens when the collecting account cannot read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAttributes {
    #[serde(rename = "availableField", default)]
    pub available_fields: Option<Vec<CustomFieldDef>>,

    #[serde(rename = "customValue", default)]
    pub values: Vec<CustomFieldValue>,
}

impl Default for CustomAttributes {
    fn default() -> Self {
        Self {
            available_fields: Some(Vec::new()),
            values: Vec::new(),
        }
    }
}

impl CustomAttributes {
    /// Attribute store that was not retrieved
    pub fn unreadable() -> Self {
        Self {
            available_fields: None,
            values: Vec::new(),
        }
    }

    /// Define an attribute without setting a value on this object
    pub fn with_definition(mut self, name: impl Into<String>) -> Self {
        self.define(name.into());
        self
    }

    /// Define an attribute and set its value
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let key = self.define(name.into());
        self.values.push(CustomFieldValue {
            key,
            value: CustomValue::Text(value.into()),
        });
        self
    }

    fn define(&mut self, name: String) -> i32 {
        let fields = self.available_fields.get_or_insert_with(Vec::new);
        let key = fields.iter().map(|f| f.key).max().unwrap_or(100) + 1;
        fields.push(CustomFieldDef { key, name });
        key
    }

    /// Look up an attribute value by exact name
    pub fn lookup(&self, name: &str) -> AttributeLookup {
        let Some(fields) = &self.available_fields else {
            return AttributeLookup::Failed("custom attribute definitions not retrieved".to_string());
        };

        let mut matching = fields.iter().filter(|f| f.name == name);
        let Some(definition) = matching.next() else {
            return AttributeLookup::NotSet;
        };
        if matching.next().is_some() {
            return AttributeLookup::Failed(format!(
                "multiple custom attribute definitions named '{}'",
                name
            ));
        }

        match self.values.iter().find(|v| v.key == definition.key) {
            None => AttributeLookup::NotSet,
            Some(CustomFieldValue {
                value: CustomValue::Text(text),
                ..
            }) => AttributeLookup::Found(text.clone()),
            Some(CustomFieldValue {
                value: CustomValue::Other(other),
                ..
            }) => AttributeLookup::Failed(format!(
                "custom attribute '{}' holds a non-string value: {}",
                name, other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_found() {
        let attrs = CustomAttributes::default().with_value("Location", "DC1");
        assert_eq!(attrs.lookup("Location"), AttributeLookup::Found("DC1".to_string()));
    }

    #[test]
    fn test_lookup_name_is_exact() {
        let attrs = CustomAttributes::default().with_value("Location", "DC1");
        assert_eq!(attrs.lookup("location"), AttributeLookup::NotSet);
    }

    #[test]
    fn test_lookup_not_defined() {
        let attrs = CustomAttributes::default().with_value("Owner", "ops");
        assert_eq!(attrs.lookup("Location"), AttributeLookup::NotSet);
    }

    #[test]
    fn test_lookup_defined_without_value() {
        let attrs = CustomAttributes::default().with_definition("Location");
        assert_eq!(attrs.lookup("Location"), AttributeLookup::NotSet);
    }

    #[test]
    fn test_lookup_unreadable_store_fails() {
        let attrs = CustomAttributes::unreadable();
        assert!(matches!(attrs.lookup("Location"), AttributeLookup::Failed(_)));
    }

    #[test]
    fn test_lookup_ambiguous_definition_fails() {
        let attrs = CustomAttributes::default()
            .with_value("Location", "DC1")
            .with_value("Location", "DC2");
        assert!(matches!(attrs.lookup("Location"), AttributeLookup::Failed(_)));
    }

    #[test]
    fn test_lookup_non_string_value_fails() {
        let attrs: CustomAttributes = serde_json::from_str(
            r#"{
                "availableField": [{"key": 201, "name": "Location"}],
                "customValue": [{"key": 201, "value": 42}]
            }"#,
        )
        .unwrap();
        assert!(matches!(attrs.lookup("Location"), AttributeLookup::Failed(_)));
    }

    #[test]
    fn test_missing_available_field_deserializes_as_unreadable() {
        let attrs: CustomAttributes = serde_json::from_str(r#"{"customValue": []}"#).unwrap();
        assert_eq!(attrs, CustomAttributes::unreadable());
    }
}
