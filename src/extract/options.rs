//! Extraction options
//!
//! Options can be built in code or read from JSON. Every field has a default,
//! so `{}` is a valid options document.

use serde::{Deserialize, Serialize};

use crate::css::constants::ROOT_SELECTOR;
use crate::error::{ExtractError, ExtractResult};

/// Default upper bound on substitutions while resolving one declaration
pub const DEFAULT_MAX_SUBSTITUTIONS: usize = 1024;

/// Options for a single extraction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractOptions {
    /// Selector whose declarations define the variable table
    pub root_selector: String,
    /// Keyframe selectors whose usages are reported instead of recorded
    pub ignored_selectors: Vec<String>,
    /// Treat every selector containing `%` as a keyframe selector
    pub ignore_percent_selectors: bool,
    /// Substitutions allowed while resolving a single declaration
    pub max_substitutions: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            root_selector: ROOT_SELECTOR.to_string(),
            ignored_selectors: vec!["to".to_string(), "from".to_string()],
            ignore_percent_selectors: true,
            max_substitutions: DEFAULT_MAX_SUBSTITUTIONS,
        }
    }
}

impl ExtractOptions {
    /// Read options from a JSON document
    pub fn from_json_str(json: &str) -> ExtractResult<Self> {
        serde_json::from_str(json).map_err(|source| ExtractError::Options { source })
    }

    /// Whether usages under this selector belong to a keyframe block
    pub fn is_ignored_selector(&self, selector: &str) -> bool {
        self.ignored_selectors.iter().any(|ignored| ignored == selector)
            || (self.ignore_percent_selectors && selector.contains('%'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExtractOptions::default();
        assert_eq!(options.root_selector, ":root");
        assert!(options.is_ignored_selector("to"));
        assert!(options.is_ignored_selector("from"));
        assert!(options.is_ignored_selector("50%"));
        assert!(!options.is_ignored_selector(".to"));
        assert!(!options.is_ignored_selector("a"));
    }

    #[test]
    fn test_from_json_partial() {
        let options = ExtractOptions::from_json_str(
            r#"{ "ignoredSelectors": ["from"], "ignorePercentSelectors": false }"#,
        )
        .unwrap();
        assert_eq!(options.root_selector, ":root");
        assert_eq!(options.max_substitutions, DEFAULT_MAX_SUBSTITUTIONS);
        assert!(options.is_ignored_selector("from"));
        assert!(!options.is_ignored_selector("to"));
        assert!(!options.is_ignored_selector("50%"));
    }

    #[test]
    fn test_from_json_empty_document() {
        let options = ExtractOptions::from_json_str("{}").unwrap();
        assert_eq!(options, ExtractOptions::default());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = ExtractOptions::from_json_str(r#"{ "maxSubstitutions": "many" }"#).unwrap_err();
        assert!(matches!(err, ExtractError::Options { .. }));
    }
}
