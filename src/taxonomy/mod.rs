// src/taxonomy/mod.rs
//! The market taxonomy returned by the idea generator.
//!
//! The backend sends a five-level nested JSON object
//! (core market → category → subcategory → niche → sub-niche) where every
//! value is itself an object and leaves are `{}`. It is validated once at the
//! boundary into a [`Node`] tree and reshaped from there.

use serde::Serialize;
use serde_json::Value;

use crate::error::WizardError;

pub mod flatten;
pub mod results;

// Re-export commonly used types
pub use flatten::{flatten, FlattenedCategory, NicheLevel, SubNiche, Subcategory};
pub use results::{results_view, ResultCategory, ResultsView, SubTopic};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub name: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self { name: name.into(), children: Vec::new() }
    }

    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|c| c.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    pub core_markets: Vec<Node>,
}

impl Taxonomy {
    pub fn from_json_str(raw: &str) -> Result<Self, WizardError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| WizardError::parse(format!("Invalid market ideas format: {}", e)))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, WizardError> {
        let map = value
            .as_object()
            .ok_or_else(|| WizardError::parse("Market ideas must be a JSON object"))?;

        let mut path = Vec::new();
        let core_markets = map
            .iter()
            .map(|(name, children)| parse_node(name, children, &mut path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { core_markets })
    }

    pub fn is_empty(&self) -> bool {
        self.core_markets.is_empty()
    }
}

fn parse_node(name: &str, value: &Value, path: &mut Vec<String>) -> Result<Node, WizardError> {
    path.push(name.to_string());
    let map = value.as_object().ok_or_else(|| {
        WizardError::parse(format!(
            "Expected an object at '{}', found {}",
            path.join(" > "),
            json_kind(value)
        ))
    })?;

    let children = map
        .iter()
        .map(|(child, grandchildren)| parse_node(child, grandchildren, path))
        .collect::<Result<Vec<_>, _>>()?;
    path.pop();

    Ok(Node { name: name.to_string(), children })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_nested_objects_into_nodes() {
        let taxonomy = Taxonomy::from_json_str(r#"{"Health": {"Sleep": {"Tracking": {"Apps": {}}}}}"#).unwrap();
        assert_eq!(
            taxonomy.core_markets,
            vec![Node {
                name: "Health".into(),
                children: vec![Node {
                    name: "Sleep".into(),
                    children: vec![Node {
                        name: "Tracking".into(),
                        children: vec![Node::leaf("Apps")],
                    }],
                }],
            }]
        );
    }

    #[test]
    fn keeps_payload_key_order() {
        let taxonomy = Taxonomy::from_json_str(r#"{"Wealth": {}, "Health": {}, "Relationships": {}}"#).unwrap();
        let names: Vec<_> = taxonomy.core_markets.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Wealth", "Health", "Relationships"]);
    }

    #[test]
    fn rejects_non_object_levels_with_path() {
        let err = Taxonomy::from_json_str(r#"{"Health": {"Sleep": ["Apps"]}}"#).unwrap_err();
        match err {
            WizardError::Parse(msg) => assert!(msg.contains("Health > Sleep"), "{}", msg),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn rejects_non_object_root() {
        assert!(matches!(Taxonomy::from_json_str("[]"), Err(WizardError::Parse(_))));
        assert!(matches!(Taxonomy::from_json_str("not json"), Err(WizardError::Parse(_))));
    }

    #[test]
    fn empty_object_is_an_empty_taxonomy() {
        assert!(Taxonomy::from_json_str("{}").unwrap().is_empty());
    }
}
