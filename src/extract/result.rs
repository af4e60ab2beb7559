//! Extraction result types
//!
//! The JSON rendering follows the report shape consumers expect:
//!
//! ```json
//! {
//!   "vars": [{ "name": "--base-color", "value": "#fff" }],
//!   "extractedProperties": {
//!     "var(--base-color)": {
//!       "color": [{ "selectorName": "a" }],
//!       "associatedVars": [{ "name": "--base-color", "value": "#fff" }]
//!     }
//!   }
//! }
//! ```
//!
//! Maps are kept as ordered vectors so that keys come out in document order.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::css::stylesheet::Declaration;
use crate::error::{ExtractResult, JsonContext};

/// Message carried by warnings about variables used inside keyframes
pub const KEYFRAME_WARNING: &str = "Ignored variable in keyframe";

/// A root-declared custom property and its resolved value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    /// Fully resolved value, free of `var(` references
    pub value: String,
    /// Last known variable whose value was substituted while resolving
    #[serde(rename = "fallback", skip_serializing_if = "Option::is_none")]
    pub fallback_source: Option<String>,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            fallback_source: None,
        }
    }
}

/// One selector that uses a given value for a given property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSite {
    pub selector_name: String,
    /// `@name params` tags of the at-rules this usage appears in
    #[serde(rename = "atrules", skip_serializing_if = "Vec::is_empty")]
    pub at_rules: Vec<String>,
}

impl UsageSite {
    pub fn new(selector_name: impl Into<String>) -> Self {
        Self {
            selector_name: selector_name.into(),
            at_rules: Vec::new(),
        }
    }

    /// Record an at-rule context, keeping the list unique and ordered
    pub fn add_at_rule(&mut self, tag: &str) {
        if !self.at_rules.iter().any(|existing| existing == tag) {
            self.at_rules.push(tag.to_string());
        }
    }
}

/// Usage sites of one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyUsage {
    pub property: String,
    pub sites: Vec<UsageSite>,
}

/// Everything known about one raw value expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntry {
    /// Raw, unresolved value, with ` !important` when flagged
    pub value: String,
    pub properties: Vec<PropertyUsage>,
    /// Variables whose name appears in the raw value
    pub associated_vars: Vec<Variable>,
}

impl ExtractedEntry {
    pub fn new(value: impl Into<String>, associated_vars: Vec<Variable>) -> Self {
        Self {
            value: value.into(),
            properties: Vec::new(),
            associated_vars,
        }
    }

    /// Usage sites recorded for a property
    pub fn sites(&self, property: &str) -> Option<&[UsageSite]> {
        self.properties
            .iter()
            .find(|usage| usage.property == property)
            .map(|usage| usage.sites.as_slice())
    }

    /// Usage sites for a property, created empty on first use
    pub(crate) fn sites_mut(&mut self, property: &str) -> &mut Vec<UsageSite> {
        let index = match self.properties.iter().position(|usage| usage.property == property) {
            Some(index) => index,
            None => {
                self.properties.push(PropertyUsage {
                    property: property.to_string(),
                    sites: Vec::new(),
                });
                self.properties.len() - 1
            }
        };
        &mut self.properties[index].sites
    }
}

impl Serialize for ExtractedEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.properties.len() + 1))?;
        for usage in &self.properties {
            map.serialize_entry(&usage.property, &usage.sites)?;
        }
        map.serialize_entry("associatedVars", &self.associated_vars)?;
        map.end()
    }
}

/// The report produced by one extraction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub vars: Vec<Variable>,
    #[serde(serialize_with = "serialize_entries")]
    pub extracted_properties: Vec<ExtractedEntry>,
}

fn serialize_entries<S: Serializer>(entries: &[ExtractedEntry], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for entry in entries {
        map.serialize_entry(&entry.value, entry)?;
    }
    map.end()
}

impl ExtractionResult {
    /// Look up a resolved variable by name
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.vars.iter().find(|variable| variable.name == name)
    }

    /// Look up the entry for a raw value expression
    pub fn entry(&self, value: &str) -> Option<&ExtractedEntry> {
        self.extracted_properties.iter().find(|entry| entry.value == value)
    }

    /// Render the report as compact JSON
    pub fn to_json(&self) -> ExtractResult<String> {
        serde_json::to_string(self).with_json_context("Failed to render extraction result")
    }

    /// Render the report as indented JSON
    pub fn to_json_pretty(&self) -> ExtractResult<String> {
        serde_json::to_string_pretty(self).with_json_context("Failed to render extraction result")
    }
}

/// A non-fatal diagnostic raised during extraction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub message: String,
    /// The declaration the warning is about
    #[serde(rename = "node")]
    pub declaration: Declaration,
    /// The value that triggered the warning
    pub word: String,
}

/// Report plus the warnings raised while building it
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub contents: ExtractionResult,
    pub warnings: Vec<Warning>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_at_rule_deduplicates() {
        let mut site = UsageSite::new(".card");
        site.add_at_rule("@media print");
        site.add_at_rule("@media screen");
        site.add_at_rule("@media print");
        assert_eq!(site.at_rules, vec!["@media print", "@media screen"]);
    }

    #[test]
    fn test_entry_json_shape() {
        let mut entry = ExtractedEntry::new("var(--a)", vec![Variable::new("--a", "red")]);
        entry.sites_mut("color").push(UsageSite::new("a"));
        let mut site = UsageSite::new(".b");
        site.add_at_rule("@media print");
        entry.sites_mut("border-color").push(site);
        entry.sites_mut("color").push(UsageSite::new(".c"));

        let result = ExtractionResult {
            vars: vec![Variable {
                name: "--a".to_string(),
                value: "red".to_string(),
                fallback_source: Some("--base".to_string()),
            }],
            extracted_properties: vec![entry],
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "vars": [{ "name": "--a", "value": "red", "fallback": "--base" }],
                "extractedProperties": {
                    "var(--a)": {
                        "color": [{ "selectorName": "a" }, { "selectorName": ".c" }],
                        "border-color": [{ "selectorName": ".b", "atrules": ["@media print"] }],
                        "associatedVars": [{ "name": "--a", "value": "red" }]
                    }
                }
            })
        );
    }

    #[test]
    fn test_json_keeps_property_order() {
        let mut entry = ExtractedEntry::new("var(--a)", Vec::new());
        entry.sites_mut("z-index").push(UsageSite::new("a"));
        entry.sites_mut("color").push(UsageSite::new("a"));
        let result = ExtractionResult {
            vars: Vec::new(),
            extracted_properties: vec![entry],
        };

        let json = result.to_json().unwrap();
        let z = json.find("z-index").unwrap();
        let color = json.find("\"color\"").unwrap();
        let associated = json.find("associatedVars").unwrap();
        assert!(z < color && color < associated);
    }

    #[test]
    fn test_lookups() {
        let mut entry = ExtractedEntry::new("var(--a)", Vec::new());
        entry.sites_mut("color").push(UsageSite::new("a"));
        let result = ExtractionResult {
            vars: vec![Variable::new("--a", "red")],
            extracted_properties: vec![entry],
        };

        assert_eq!(result.variable("--a").unwrap().value, "red");
        assert!(result.variable("--b").is_none());
        assert_eq!(result.entry("var(--a)").unwrap().sites("color").unwrap().len(), 1);
        assert!(result.entry("var(--a)").unwrap().sites("margin").is_none());
        assert!(result.entry("var(--b)").is_none());
    }
}
